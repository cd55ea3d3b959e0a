//! Thread-safe clinic handle.
//!
//! The membership and conflict checks and the commit that follows them run
//! under one write lock, so concurrent callers can never double-book a room
//! or a doctor.

use crate::clinic::Clinic;
use crate::error::Rejection;
use crate::models::{Appointment, AppointmentId};
use crate::scheduler::BatchSchedulingResult;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

#[derive(Debug, Clone)]
pub struct SharedClinic {
    inner: Arc<RwLock<Clinic>>,
}

impl SharedClinic {
    pub fn new(clinic: Clinic) -> Self {
        SharedClinic {
            inner: Arc::new(RwLock::new(clinic)),
        }
    }

    // Scheduling logs only after all commit mutations are done, and a panic in
    // an `update` closure lands between whole `Clinic` calls, each of which
    // leaves the clinic consistent. A poisoned lock is therefore still usable.
    fn read(&self) -> RwLockReadGuard<'_, Clinic> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Clinic> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Schedule an appointment as one critical section.
    pub fn schedule_appointment(
        &self,
        appointment: Appointment,
    ) -> Result<AppointmentId, Rejection> {
        self.write().schedule_appointment(appointment)
    }

    pub fn schedule_batch(&self, appointments: Vec<Appointment>) -> BatchSchedulingResult {
        self.write().schedule_batch(appointments)
    }

    /// Run `f` with exclusive access, e.g. to register entities.
    pub fn update<R>(&self, f: impl FnOnce(&mut Clinic) -> R) -> R {
        f(&mut *self.write())
    }

    /// Run `f` with shared access, e.g. to render a report.
    pub fn inspect<R>(&self, f: impl FnOnce(&Clinic) -> R) -> R {
        f(&*self.read())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SchedulingError;
    use crate::models::{Doctor, Patient, Room};
    use chrono::NaiveDate;
    use std::thread;

    #[test]
    fn racing_requests_book_a_slot_once() {
        let mut clinic = Clinic::new("Health").unwrap();
        let room = Room::new("101", "Consultation").unwrap();
        clinic.add_room(room.clone());

        let mut requests = Vec::new();
        for i in 0..8 {
            let doctor = Doctor::new(format!("Doctor {}", i), "Therapist", "Therapy").unwrap();
            let patient =
                Patient::new(format!("Patient {}", i), NaiveDate::from_ymd_opt(1990, 1, 1).unwrap())
                    .unwrap();
            clinic.add_doctor(doctor.clone());
            clinic.add_patient(patient.clone());
            requests.push((doctor, patient));
        }

        let shared = SharedClinic::new(clinic);
        let at = NaiveDate::from_ymd_opt(2025, 1, 10)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap();

        let handles: Vec<_> = requests
            .into_iter()
            .map(|(doctor, patient)| {
                let shared = shared.clone();
                let room = room.clone();
                thread::spawn(move || {
                    shared.schedule_appointment(Appointment::new(at, &doctor, &patient, &room))
                })
            })
            .collect();

        let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
        assert!(results
            .iter()
            .filter_map(|r| r.as_ref().err())
            .all(|r| r.reason == SchedulingError::RoomUnavailable { at }));
        assert_eq!(shared.inspect(|c| c.appointments().len()), 1);
    }

    #[test]
    fn update_and_inspect_share_state() {
        let shared = SharedClinic::new(Clinic::new("Health").unwrap());
        let id = shared.update(|c| c.add_room(Room::new("101", "Consultation").unwrap()));
        assert!(shared.inspect(|c| c.room(id).is_some()));
    }

    #[test]
    fn clinic_stays_usable_after_a_panicking_update() {
        let shared = SharedClinic::new(Clinic::new("Health").unwrap());
        let doctor = Doctor::new("Ivan", "Therapist", "Therapy").unwrap();
        let patient = Patient::new("Maria", NaiveDate::from_ymd_opt(1990, 5, 20).unwrap()).unwrap();
        let room = Room::new("101", "Consultation").unwrap();

        let outcome = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            shared.update(|c| {
                c.add_doctor(doctor.clone());
                c.add_patient(patient.clone());
                c.add_room(room.clone());
                panic!("driver crashed mid-update");
            })
        }));
        assert!(outcome.is_err());

        let at = NaiveDate::from_ymd_opt(2025, 1, 10)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap();
        let id = shared
            .schedule_appointment(Appointment::new(at, &doctor, &patient, &room))
            .unwrap();
        shared.inspect(|c| {
            assert_eq!(c.appointments().len(), 1);
            assert_eq!(c.appointments_for_doctor(doctor.id())[0].id(), id);
            assert_eq!(c.appointments_for_patient(patient.id())[0].id(), id);
        });
    }
}
