//! Appointment scheduling with conflict detection.
//!
//! A request is admitted only if its doctor, patient and room belong to the
//! clinic and neither the room nor the doctor is already booked at exactly
//! the same instant. Accepted requests are committed in one step; refused
//! ones leave the clinic and the appointment untouched.

use crate::clinic::Clinic;
use crate::error::{Rejection, SchedulingError};
use crate::models::{
    Appointment, AppointmentId, Doctor, DoctorId, Patient, PatientId, Room, RoomId,
};
use chrono::NaiveDateTime;
use tracing::{debug, info, warn};

/// Result of scheduling multiple requests.
#[derive(Debug)]
pub struct BatchSchedulingResult {
    pub confirmed: Vec<AppointmentId>,
    pub rejected: Vec<Rejection>,
    pub total_requests: usize,
}

impl BatchSchedulingResult {
    /// Calculate the success rate as a percentage.
    pub fn success_rate(&self) -> f64 {
        if self.total_requests == 0 {
            return 0.0;
        }
        (self.confirmed.len() as f64 / self.total_requests as f64) * 100.0
    }
}

impl Clinic {
    /// Check whether an appointment could be accepted right now.
    ///
    /// Checks run in a fixed order and the first failure wins: doctor,
    /// patient and room membership, then room conflict, then doctor conflict.
    pub fn check_admissible(&self, appointment: &Appointment) -> Result<(), SchedulingError> {
        if !self.doctors().iter().any(|d| d.id() == appointment.doctor()) {
            return Err(SchedulingError::DoctorNotAffiliated);
        }
        if !self.patients().iter().any(|p| p.id() == appointment.patient()) {
            return Err(SchedulingError::PatientNotRegistered);
        }
        if !self.rooms().iter().any(|r| r.id() == appointment.room()) {
            return Err(SchedulingError::RoomNotFound);
        }

        let at = appointment.timestamp();
        if self
            .appointments
            .iter()
            .any(|a| a.room() == appointment.room() && a.timestamp() == at)
        {
            return Err(SchedulingError::RoomUnavailable { at });
        }
        if self
            .appointments
            .iter()
            .any(|a| a.doctor() == appointment.doctor() && a.timestamp() == at)
        {
            return Err(SchedulingError::DoctorUnavailable { at });
        }

        Ok(())
    }

    /// Validate and commit an appointment.
    ///
    /// On success the appointment is confirmed, owned by this clinic and
    /// listed under its doctor and patient. On failure it is handed back
    /// unchanged inside the [`Rejection`].
    pub fn schedule_appointment(
        &mut self,
        appointment: Appointment,
    ) -> Result<AppointmentId, Rejection> {
        if let Err(reason) = self.check_admissible(&appointment) {
            warn!(
                clinic = %self.name,
                appointment = %appointment.id(),
                %reason,
                "appointment rejected"
            );
            return Err(Rejection::new(reason, appointment));
        }

        Ok(self.commit(appointment))
    }

    fn commit(&mut self, mut appointment: Appointment) -> AppointmentId {
        let id = appointment.id();
        let (patient, doctor) = (appointment.patient(), appointment.doctor());
        let (room, at) = (appointment.room(), appointment.timestamp());
        let position = self.appointments.len();

        appointment.assign_clinic(self.id());
        appointment.confirm();
        self.appointments.push(appointment);
        self.by_patient.entry(patient).or_default().push(position);
        self.by_doctor.entry(doctor).or_default().push(position);

        info!(
            clinic = %self.name,
            appointment = %id,
            %patient,
            %doctor,
            %room,
            at = %at.format("%Y-%m-%d %H:%M"),
            "appointment confirmed"
        );

        id
    }

    /// Build an appointment from roster ids and schedule it.
    ///
    /// Ids unknown to this clinic surface as the matching membership error.
    pub fn schedule_by_ids(
        &mut self,
        patient: PatientId,
        doctor: DoctorId,
        room: RoomId,
        at: NaiveDateTime,
    ) -> Result<AppointmentId, Rejection> {
        self.schedule_appointment(Appointment::from_ids(at, doctor, patient, room))
    }

    /// Schedule a batch of appointments in submission order.
    pub fn schedule_batch(&mut self, appointments: Vec<Appointment>) -> BatchSchedulingResult {
        let total = appointments.len();
        let mut confirmed = Vec::new();
        let mut rejected = Vec::new();

        for appointment in appointments {
            match self.schedule_appointment(appointment) {
                Ok(id) => confirmed.push(id),
                Err(rejection) => rejected.push(rejection),
            }
        }

        let result = BatchSchedulingResult {
            confirmed,
            rejected,
            total_requests: total,
        };
        debug!(
            clinic = %self.name,
            total,
            confirmed = result.confirmed.len(),
            success_rate = result.success_rate(),
            "batch processed"
        );
        result
    }
}

impl Patient {
    /// Book this patient with a doctor in a room at the given time.
    pub fn schedule_appointment(
        &self,
        clinic: &mut Clinic,
        doctor: &Doctor,
        room: &Room,
        at: NaiveDateTime,
    ) -> Result<AppointmentId, Rejection> {
        clinic.schedule_appointment(Appointment::new(at, doctor, self, room))
    }
}
