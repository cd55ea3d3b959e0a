//! In-memory clinic management with appointment scheduling.
//!
//! A [`Clinic`] holds rosters of doctors, patients, rooms and medical
//! services and accepts appointments only when every participant belongs to
//! it and neither the room nor the doctor is already booked at that exact
//! instant. [`SharedClinic`] wraps a clinic for concurrent callers.
//!
//! ```
//! use chrono::NaiveDate;
//! use clinic_scheduler::{Clinic, Doctor, Patient, Room, SchedulingError};
//!
//! let mut clinic = Clinic::new("Health")?;
//! let doctor = Doctor::new("Ivan", "Therapist", "Therapy")?;
//! let maria = Patient::new("Maria", NaiveDate::from_ymd_opt(1990, 5, 20).unwrap())?;
//! let room = Room::new("101", "Consultation")?;
//! clinic.add_doctor(doctor.clone());
//! clinic.add_patient(maria.clone());
//! clinic.add_room(room.clone());
//!
//! let at = NaiveDate::from_ymd_opt(2025, 1, 10).unwrap().and_hms_opt(10, 0, 0).unwrap();
//! assert!(maria.schedule_appointment(&mut clinic, &doctor, &room, at).is_ok());
//! let again = maria.schedule_appointment(&mut clinic, &doctor, &room, at);
//! assert_eq!(again.unwrap_err().reason, SchedulingError::RoomUnavailable { at });
//! # Ok::<(), SchedulingError>(())
//! ```

pub mod clinic;
pub mod config;
pub mod error;
pub mod models;
pub mod scheduler;
pub mod shared;

pub use clinic::Clinic;
pub use error::{Rejection, SchedulingError};
pub use models::{
    Appointment, AppointmentId, ClinicId, Doctor, DoctorId, Employee, MedicalService, Patient,
    PatientId, Room, RoomId, ServiceId,
};
pub use scheduler::BatchSchedulingResult;
pub use shared::SharedClinic;
