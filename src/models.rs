//! Data models for the clinic scheduling system.
//!
//! This module defines the core data structures used throughout the system:
//! - Identifiers: opaque ids giving every entity a stable identity
//! - Doctor, Patient, Room, MedicalService: roster entries of a clinic
//! - Appointment: a requested or confirmed booking

use crate::error::SchedulingError;
use chrono::{NaiveDate, NaiveDateTime};
use std::cmp::Ordering;
use std::fmt;
use uuid::Uuid;

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(Uuid);

        impl $name {
            fn generate() -> Self {
                $name(Uuid::new_v4())
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", &self.0.simple().to_string()[..8])
            }
        }
    };
}

entity_id!(
    /// Identity of a clinic.
    ClinicId
);
entity_id!(
    /// Identity of a doctor. Two doctors with equal names are still distinct.
    DoctorId
);
entity_id!(
    /// Identity of a patient.
    PatientId
);
entity_id!(
    /// Identity of a room.
    RoomId
);
entity_id!(
    /// Identity of a medical service.
    ServiceId
);
entity_id!(
    /// Identity of an appointment.
    AppointmentId
);

impl ClinicId {
    pub(crate) fn new() -> Self {
        Self::generate()
    }
}

fn require(value: String, what: &str) -> Result<String, SchedulingError> {
    if value.trim().is_empty() {
        return Err(SchedulingError::InvalidArgument(format!(
            "{} cannot be empty",
            what
        )));
    }
    Ok(value)
}

/// Staff member of a clinic.
pub trait Employee {
    fn name(&self) -> &str;

    fn position(&self) -> &str;

    /// Describe the employee's duties.
    fn duties(&self) -> String {
        format!("{} performs duties as {}", self.name(), self.position())
    }
}

/// A doctor working at (at most) one clinic.
///
/// Doctors order by name; the remaining fields only break ties.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Doctor {
    id: DoctorId,
    pub name: String,
    pub position: String,
    pub specialty: String,
    clinic: Option<ClinicId>,
}

impl Doctor {
    /// Create a new doctor with validation.
    pub fn new(
        name: impl Into<String>,
        position: impl Into<String>,
        specialty: impl Into<String>,
    ) -> Result<Self, SchedulingError> {
        Ok(Doctor {
            id: DoctorId::generate(),
            name: require(name.into(), "Doctor name")?,
            position: require(position.into(), "Doctor position")?,
            specialty: require(specialty.into(), "Doctor specialty")?,
            clinic: None,
        })
    }

    pub fn id(&self) -> DoctorId {
        self.id
    }

    /// The clinic this doctor was registered with, if any.
    pub fn clinic(&self) -> Option<ClinicId> {
        self.clinic
    }

    pub(crate) fn affiliate(&mut self, clinic: ClinicId) {
        self.clinic = Some(clinic);
    }

    /// Describe prescribing a medication to a patient.
    pub fn prescribe_medication(
        &self,
        patient: &Patient,
        medication: &str,
    ) -> Result<String, SchedulingError> {
        let medication = require(medication.to_string(), "Medication")?;
        Ok(format!(
            "{} prescribed {} to {}",
            self.name, medication, patient.full_name
        ))
    }
}

impl Employee for Doctor {
    fn name(&self) -> &str {
        &self.name
    }

    fn position(&self) -> &str {
        &self.position
    }
}

impl Ord for Doctor {
    fn cmp(&self, other: &Self) -> Ordering {
        (&self.name, &self.position, &self.specialty, self.id, self.clinic).cmp(&(
            &other.name,
            &other.position,
            &other.specialty,
            other.id,
            other.clinic,
        ))
    }
}

impl PartialOrd for Doctor {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Doctor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.name, self.position)
    }
}

/// A patient of the clinic.
#[derive(Debug, Clone, PartialEq)]
pub struct Patient {
    id: PatientId,
    pub full_name: String,
    pub date_of_birth: NaiveDate,
}

impl Patient {
    /// Create a new patient with validation.
    pub fn new(
        full_name: impl Into<String>,
        date_of_birth: NaiveDate,
    ) -> Result<Self, SchedulingError> {
        Ok(Patient {
            id: PatientId::generate(),
            full_name: require(full_name.into(), "Patient name")?,
            date_of_birth,
        })
    }

    pub fn id(&self) -> PatientId {
        self.id
    }
}

/// A room appointments take place in.
#[derive(Debug, Clone, PartialEq)]
pub struct Room {
    id: RoomId,
    pub room_number: String,
    pub room_type: String,
}

impl Room {
    /// Create a new room with validation.
    pub fn new(
        room_number: impl Into<String>,
        room_type: impl Into<String>,
    ) -> Result<Self, SchedulingError> {
        Ok(Room {
            id: RoomId::generate(),
            room_number: require(room_number.into(), "Room number")?,
            room_type: require(room_type.into(), "Room type")?,
        })
    }

    pub fn id(&self) -> RoomId {
        self.id
    }

    /// Describe reserving this room for an appointment.
    pub fn reserve(&self) -> String {
        format!("Room {} reserved for an appointment", self.room_number)
    }
}

/// A priced service offered by the clinic.
#[derive(Debug, Clone, PartialEq)]
pub struct MedicalService {
    id: ServiceId,
    pub name: String,
    pub price: f64,
}

impl MedicalService {
    /// Create a new medical service. The price must be finite and non-negative.
    pub fn new(name: impl Into<String>, price: f64) -> Result<Self, SchedulingError> {
        let name = require(name.into(), "Service name")?;
        if !price.is_finite() || price < 0.0 {
            return Err(SchedulingError::InvalidArgument(format!(
                "Service price must be a non-negative amount, got {}",
                price
            )));
        }

        Ok(MedicalService {
            id: ServiceId::generate(),
            name,
            price,
        })
    }

    pub fn id(&self) -> ServiceId {
        self.id
    }

    /// Describe providing this service to a patient.
    pub fn describe_for(&self, patient: &Patient) -> String {
        format!(
            "Provided '{}' to {}. Price: {:.2}",
            self.name, patient.full_name, self.price
        )
    }
}

/// A booking of a doctor, patient and room at an exact instant.
///
/// Created unconfirmed and without a clinic. Only the scheduler of a clinic
/// can confirm it, which happens at most once.
#[derive(Debug, Clone, PartialEq)]
pub struct Appointment {
    id: AppointmentId,
    timestamp: NaiveDateTime,
    doctor: DoctorId,
    patient: PatientId,
    room: RoomId,
    clinic: Option<ClinicId>,
    confirmed: bool,
}

impl Appointment {
    /// Create a new, unconfirmed appointment.
    pub fn new(timestamp: NaiveDateTime, doctor: &Doctor, patient: &Patient, room: &Room) -> Self {
        Self::from_ids(timestamp, doctor.id(), patient.id(), room.id())
    }

    pub(crate) fn from_ids(
        timestamp: NaiveDateTime,
        doctor: DoctorId,
        patient: PatientId,
        room: RoomId,
    ) -> Self {
        Appointment {
            id: AppointmentId::generate(),
            timestamp,
            doctor,
            patient,
            room,
            clinic: None,
            confirmed: false,
        }
    }

    pub fn id(&self) -> AppointmentId {
        self.id
    }

    pub fn timestamp(&self) -> NaiveDateTime {
        self.timestamp
    }

    pub fn doctor(&self) -> DoctorId {
        self.doctor
    }

    pub fn patient(&self) -> PatientId {
        self.patient
    }

    pub fn room(&self) -> RoomId {
        self.room
    }

    /// The clinic that accepted this appointment, `None` until scheduled.
    pub fn clinic(&self) -> Option<ClinicId> {
        self.clinic
    }

    pub fn is_confirmed(&self) -> bool {
        self.confirmed
    }

    pub(crate) fn assign_clinic(&mut self, clinic: ClinicId) {
        self.clinic = Some(clinic);
    }

    pub(crate) fn confirm(&mut self) {
        self.confirmed = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 1, 10)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
    }

    #[test]
    fn empty_names_are_rejected() {
        assert!(matches!(
            Doctor::new("", "Therapist", "Therapy"),
            Err(SchedulingError::InvalidArgument(_))
        ));
        assert!(matches!(
            Doctor::new("Ivan", "  ", "Therapy"),
            Err(SchedulingError::InvalidArgument(_))
        ));
        let dob = NaiveDate::from_ymd_opt(1990, 5, 20).unwrap();
        assert!(Patient::new("", dob).is_err());
        assert!(Room::new("101", "").is_err());
        assert!(MedicalService::new("", 10.0).is_err());
    }

    #[test]
    fn service_price_must_be_non_negative() {
        assert!(MedicalService::new("X-ray", -1.0).is_err());
        assert!(MedicalService::new("X-ray", f64::NAN).is_err());
        assert!(MedicalService::new("X-ray", f64::INFINITY).is_err());

        let free = MedicalService::new("Checkup", 0.0).unwrap();
        assert_eq!(free.price, 0.0);
    }

    #[test]
    fn same_fields_do_not_mean_same_entity() {
        let a = Doctor::new("Ivan", "Therapist", "Therapy").unwrap();
        let b = Doctor::new("Ivan", "Therapist", "Therapy").unwrap();
        assert_ne!(a.id(), b.id());
        assert_eq!(a.clone().id(), a.id());
    }

    #[test]
    fn new_appointment_is_unconfirmed_and_unassigned() {
        let doctor = Doctor::new("Ivan", "Therapist", "Therapy").unwrap();
        let patient = Patient::new("Maria", NaiveDate::from_ymd_opt(1990, 5, 20).unwrap()).unwrap();
        let room = Room::new("101", "Consultation").unwrap();

        let mut appointment = Appointment::new(at(10), &doctor, &patient, &room);
        assert!(!appointment.is_confirmed());
        assert_eq!(appointment.clinic(), None);
        assert_eq!(appointment.doctor(), doctor.id());
        assert_eq!(appointment.patient(), patient.id());
        assert_eq!(appointment.room(), room.id());
        assert_eq!(appointment.timestamp(), at(10));

        appointment.confirm();
        appointment.confirm();
        assert!(appointment.is_confirmed());
    }

    #[test]
    fn descriptions_mention_names() {
        let doctor = Doctor::new("Ivan", "Therapist", "Therapy").unwrap();
        assert_eq!(doctor.duties(), "Ivan performs duties as Therapist");

        let patient = Patient::new("Maria", NaiveDate::from_ymd_opt(1990, 5, 20).unwrap()).unwrap();
        let service = MedicalService::new("Consultation", 500.0).unwrap();
        assert_eq!(
            service.describe_for(&patient),
            "Provided 'Consultation' to Maria. Price: 500.00"
        );
        assert_eq!(
            Room::new("101", "Consultation").unwrap().reserve(),
            "Room 101 reserved for an appointment"
        );
    }

    #[test]
    fn prescription_requires_a_medication() {
        let doctor = Doctor::new("Ivan", "Therapist", "Therapy").unwrap();
        let patient = Patient::new("Maria", NaiveDate::from_ymd_opt(1990, 5, 20).unwrap()).unwrap();

        assert_eq!(
            doctor.prescribe_medication(&patient, "Ibuprofen").unwrap(),
            "Ivan prescribed Ibuprofen to Maria"
        );
        assert!(matches!(
            doctor.prescribe_medication(&patient, " "),
            Err(SchedulingError::InvalidArgument(_))
        ));
    }

    #[test]
    fn doctors_act_as_employees() {
        let petro = Doctor::new("Petro", "Surgeon", "Surgery").unwrap();
        let ivan = Doctor::new("Ivan", "Therapist", "Therapy").unwrap();
        let svitlana = Doctor::new("Svitlana", "Cardiologist", "Cardiology").unwrap();
        assert_eq!(ivan.to_string(), "Ivan - Therapist");

        let staff: Vec<&dyn Employee> = vec![&petro, &ivan];
        let duties: Vec<_> = staff.iter().map(|e| e.duties()).collect();
        assert_eq!(
            duties,
            ["Petro performs duties as Surgeon", "Ivan performs duties as Therapist"]
        );

        let mut doctors = vec![svitlana.clone(), petro.clone(), ivan.clone()];
        doctors.sort();
        let names: Vec<_> = doctors.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, ["Ivan", "Petro", "Svitlana"]);
        assert!(ivan < petro);
        assert_eq!(ivan.cmp(&ivan.clone()), Ordering::Equal);
    }
}
