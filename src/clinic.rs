//! Roster management for the clinic scheduling system.
//!
//! This module provides the Clinic struct which owns the doctors, patients,
//! rooms, services and appointments of one clinic. Scheduling lives in
//! `scheduler.rs`.

use crate::error::SchedulingError;
use crate::models::{
    Appointment, AppointmentId, ClinicId, Doctor, DoctorId, MedicalService, Patient, PatientId,
    Room, RoomId, ServiceId,
};
use std::collections::HashMap;
use tracing::info;

#[derive(Debug, Clone)]
pub struct Clinic {
    id: ClinicId,
    pub name: String,
    doctors: Vec<Doctor>,
    patients: Vec<Patient>,
    rooms: Vec<Room>,
    medical_services: Vec<MedicalService>,
    pub(crate) appointments: Vec<Appointment>,
    // Positions in `appointments`, which only ever grows.
    pub(crate) by_doctor: HashMap<DoctorId, Vec<usize>>,
    pub(crate) by_patient: HashMap<PatientId, Vec<usize>>,
}

impl Clinic {
    /// Create an empty clinic.
    pub fn new(name: impl Into<String>) -> Result<Self, SchedulingError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(SchedulingError::InvalidArgument(
                "Clinic name cannot be empty".to_string(),
            ));
        }

        Ok(Clinic {
            id: ClinicId::new(),
            name,
            doctors: Vec::new(),
            patients: Vec::new(),
            rooms: Vec::new(),
            medical_services: Vec::new(),
            appointments: Vec::new(),
            by_doctor: HashMap::new(),
            by_patient: HashMap::new(),
        })
    }

    pub fn id(&self) -> ClinicId {
        self.id
    }

    /// Doctors in registration order.
    pub fn doctors(&self) -> &[Doctor] {
        &self.doctors
    }

    /// Patients in registration order.
    pub fn patients(&self) -> &[Patient] {
        &self.patients
    }

    /// Rooms in registration order.
    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    /// Medical services in registration order.
    pub fn medical_services(&self) -> &[MedicalService] {
        &self.medical_services
    }

    /// Confirmed appointments in the order they were accepted.
    pub fn appointments(&self) -> &[Appointment] {
        &self.appointments
    }

    /// Register a doctor and record this clinic as the doctor's clinic.
    ///
    /// Registering the same doctor twice yields two roster entries.
    pub fn add_doctor(&mut self, mut doctor: Doctor) -> DoctorId {
        doctor.affiliate(self.id);
        let id = doctor.id();
        info!(clinic = %self.name, doctor = %doctor.name, %id, "doctor added");
        self.doctors.push(doctor);
        id
    }

    /// Register a patient.
    pub fn add_patient(&mut self, patient: Patient) -> PatientId {
        let id = patient.id();
        info!(clinic = %self.name, patient = %patient.full_name, %id, "patient added");
        self.patients.push(patient);
        id
    }

    /// Register a room.
    pub fn add_room(&mut self, room: Room) -> RoomId {
        let id = room.id();
        info!(clinic = %self.name, room = %room.room_number, %id, "room added");
        self.rooms.push(room);
        id
    }

    /// Register a medical service.
    pub fn add_medical_service(&mut self, service: MedicalService) -> ServiceId {
        let id = service.id();
        info!(
            clinic = %self.name,
            service = %service.name,
            price = service.price,
            "medical service added"
        );
        self.medical_services.push(service);
        id
    }

    pub fn doctor(&self, id: DoctorId) -> Option<&Doctor> {
        self.doctors.iter().find(|d| d.id() == id)
    }

    pub fn patient(&self, id: PatientId) -> Option<&Patient> {
        self.patients.iter().find(|p| p.id() == id)
    }

    pub fn room(&self, id: RoomId) -> Option<&Room> {
        self.rooms.iter().find(|r| r.id() == id)
    }

    pub fn appointment(&self, id: AppointmentId) -> Option<&Appointment> {
        self.appointments.iter().find(|a| a.id() == id)
    }

    /// Appointments involving a doctor, in acceptance order.
    pub fn appointments_for_doctor(&self, id: DoctorId) -> Vec<&Appointment> {
        self.indexed(self.by_doctor.get(&id))
    }

    /// Appointments involving a patient, in acceptance order.
    pub fn appointments_for_patient(&self, id: PatientId) -> Vec<&Appointment> {
        self.indexed(self.by_patient.get(&id))
    }

    fn indexed(&self, positions: Option<&Vec<usize>>) -> Vec<&Appointment> {
        positions
            .map(|positions| {
                positions
                    .iter()
                    .filter_map(|&i| self.appointments.get(i))
                    .collect()
            })
            .unwrap_or_default()
    }
}

impl std::fmt::Display for Clinic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Clinic: {}", self.name)?;

        writeln!(f, "Doctors:")?;
        for doctor in &self.doctors {
            writeln!(
                f,
                " - {}, {}, Specialty: {}",
                doctor.name, doctor.position, doctor.specialty
            )?;
        }

        writeln!(f, "Patients:")?;
        for patient in &self.patients {
            writeln!(
                f,
                " - {}, Date of birth: {}",
                patient.full_name,
                patient.date_of_birth.format("%Y-%m-%d")
            )?;
        }

        writeln!(f, "Rooms:")?;
        for room in &self.rooms {
            writeln!(f, " - Room {}, Type: {}", room.room_number, room.room_type)?;
        }

        writeln!(f, "Medical services:")?;
        for service in &self.medical_services {
            writeln!(f, " - {}, Price: {:.2}", service.name, service.price)?;
        }

        writeln!(f, "Appointments:")?;
        for apt in &self.appointments {
            let patient = self.patient(apt.patient()).map_or("?", |p| p.full_name.as_str());
            let doctor = self.doctor(apt.doctor()).map_or("?", |d| d.name.as_str());
            let room = self.room(apt.room()).map_or("?", |r| r.room_number.as_str());
            writeln!(
                f,
                " - {} with {} at {} in room {}",
                patient,
                doctor,
                apt.timestamp().format("%Y-%m-%d %H:%M"),
                room
            )?;
        }

        Ok(())
    }
}
