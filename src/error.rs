//! Error types for registration and scheduling.

use crate::models::Appointment;
use chrono::NaiveDateTime;
use thiserror::Error;

/// Why a registration or scheduling request was refused.
///
/// Every variant is recoverable: the request is rejected and no state changes.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchedulingError {
    /// A required input was missing or empty.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    #[error("Doctor does not work at this clinic")]
    DoctorNotAffiliated,
    #[error("Patient is not registered at this clinic")]
    PatientNotRegistered,
    #[error("Room does not exist in this clinic")]
    RoomNotFound,
    #[error("Room is already booked at {}", .at.format("%Y-%m-%d %H:%M"))]
    RoomUnavailable { at: NaiveDateTime },
    #[error("Doctor already has an appointment at {}", .at.format("%Y-%m-%d %H:%M"))]
    DoctorUnavailable { at: NaiveDateTime },
}

/// A refused scheduling request.
///
/// Hands the appointment back untouched: still unconfirmed and without a
/// clinic.
#[derive(Error, Debug, Clone)]
#[error("{reason}")]
pub struct Rejection {
    pub reason: SchedulingError,
    pub appointment: Appointment,
}

impl Rejection {
    pub(crate) fn new(reason: SchedulingError, appointment: Appointment) -> Self {
        Rejection {
            reason,
            appointment,
        }
    }

    /// Recover the appointment, dropping the reason.
    pub fn into_appointment(self) -> Appointment {
        self.appointment
    }
}
