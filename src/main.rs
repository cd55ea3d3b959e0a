//! Command-line interface for the clinic scheduling system.
//!
//! Provides an interactive menu for registering doctors, patients, rooms and
//! services, scheduling appointments and viewing the clinic.

use chrono::{NaiveDate, NaiveDateTime};
use clinic_scheduler::config::{get_config, CliConfig, ConfigError};
use clinic_scheduler::{
    Appointment, Clinic, Doctor, MedicalService, Patient, Room, SchedulingError,
};
use std::io::{self, BufRead, Write};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

struct ClinicCLI {
    clinic: Clinic,
    running: bool,
}

impl ClinicCLI {
    fn new(clinic: Clinic) -> Self {
        ClinicCLI {
            clinic,
            running: true,
        }
    }

    fn print_header(&self) {
        println!("\n{}", "=".repeat(60));
        println!("       CLINIC MANAGEMENT: {}", self.clinic.name);
        println!("{}", "=".repeat(60));
    }

    fn print_menu(&self) {
        println!("\n--- Main Menu ---");
        println!("1. Add doctor");
        println!("2. Add patient");
        println!("3. Add room");
        println!("4. Add medical service");
        println!("5. Schedule appointment");
        println!("6. Show clinic information");
        println!("7. Run batch demo");
        println!("8. Exit");
        println!("{}", "-".repeat(20));
    }

    /// Read one trimmed line. Stops the session on end of input or a read error.
    fn get_input(&mut self, prompt: &str) -> Option<String> {
        print!("{}: ", prompt);
        let _ = io::stdout().flush();

        let mut input = String::new();
        match io::stdin().lock().read_line(&mut input) {
            Ok(0) => {
                self.running = false;
                None
            }
            Err(e) => {
                println!("\nCould not read input: {}", e);
                tracing::error!(error = %e, "reading from stdin failed");
                self.running = false;
                None
            }
            Ok(_) => Some(input.trim().to_string()),
        }
    }

    fn get_index_input(&mut self, prompt: &str, len: usize) -> Option<usize> {
        let input = self.get_input(prompt)?;
        match input.parse::<usize>() {
            Ok(n) if (1..=len).contains(&n) => Some(n - 1),
            _ => {
                println!("Please enter a number between 1 and {}", len);
                None
            }
        }
    }

    fn report(&self, result: Result<(), SchedulingError>) {
        if let Err(e) = result {
            println!("Error: {}", e);
        }
    }

    fn add_doctor(&mut self) {
        let Some(name) = self.get_input("Doctor name") else {
            return;
        };
        let Some(position) = self.get_input("Doctor position") else {
            return;
        };
        let Some(specialty) = self.get_input("Doctor specialty") else {
            return;
        };

        let result = Doctor::new(name, position, specialty).map(|doctor| {
            println!("\nDoctor {} added", doctor.name);
            self.clinic.add_doctor(doctor);
        });
        self.report(result);
    }

    fn add_patient(&mut self) {
        let Some(full_name) = self.get_input("Patient full name") else {
            return;
        };
        let Some(dob) = self.get_input("Date of birth (YYYY-MM-DD)") else {
            return;
        };

        let Ok(date_of_birth) = NaiveDate::parse_from_str(&dob, "%Y-%m-%d") else {
            println!("Invalid date format");
            return;
        };

        let result = Patient::new(full_name, date_of_birth).map(|patient| {
            println!("\nPatient {} added", patient.full_name);
            self.clinic.add_patient(patient);
        });
        self.report(result);
    }

    fn add_room(&mut self) {
        let Some(number) = self.get_input("Room number") else {
            return;
        };
        let Some(room_type) = self.get_input("Room type") else {
            return;
        };

        let result = Room::new(number, room_type).map(|room| {
            println!("\nRoom {} added", room.room_number);
            self.clinic.add_room(room);
        });
        self.report(result);
    }

    fn add_medical_service(&mut self) {
        let Some(name) = self.get_input("Service name") else {
            return;
        };
        let Some(price) = self.get_input("Service price") else {
            return;
        };

        let Ok(price) = price.parse::<f64>() else {
            println!("Invalid price format");
            return;
        };

        let result = MedicalService::new(name, price).map(|service| {
            println!("\nMedical service '{}' added", service.name);
            self.clinic.add_medical_service(service);
        });
        self.report(result);
    }

    fn schedule_appointment(&mut self) {
        if self.clinic.doctors().is_empty() {
            println!("\nNo doctors available. Add a doctor first (option 1)");
            return;
        }
        if self.clinic.patients().is_empty() {
            println!("\nNo registered patients. Add a patient first (option 2)");
            return;
        }
        if self.clinic.rooms().is_empty() {
            println!("\nNo rooms available. Add a room first (option 3)");
            return;
        }

        println!("\nDoctors:");
        for (i, d) in self.clinic.doctors().iter().enumerate() {
            println!("  {}. {} ({})", i + 1, d.name, d.specialty);
        }
        let Some(d) = self.get_index_input("Select doctor", self.clinic.doctors().len()) else {
            return;
        };

        println!("\nPatients:");
        for (i, p) in self.clinic.patients().iter().enumerate() {
            println!("  {}. {}", i + 1, p.full_name);
        }
        let Some(p) = self.get_index_input("Select patient", self.clinic.patients().len()) else {
            return;
        };

        println!("\nRooms:");
        for (i, r) in self.clinic.rooms().iter().enumerate() {
            println!("  {}. Room {} ({})", i + 1, r.room_number, r.room_type);
        }
        let Some(r) = self.get_index_input("Select room", self.clinic.rooms().len()) else {
            return;
        };

        let Some(when) = self.get_input("Date and time (YYYY-MM-DD HH:MM)") else {
            return;
        };
        let Ok(at) = NaiveDateTime::parse_from_str(&when, "%Y-%m-%d %H:%M") else {
            println!("Invalid date/time format");
            return;
        };

        let doctor = self.clinic.doctors()[d].id();
        let patient = self.clinic.patients()[p].id();
        let room = self.clinic.rooms()[r].id();

        match self.clinic.schedule_by_ids(patient, doctor, room, at) {
            Ok(_) => {
                println!("\nAppointment scheduled for {}", at.format("%Y-%m-%d %H:%M"));
                println!("{}", self.clinic.rooms()[r].reserve());
            }
            Err(rejection) => println!("\nError: {}", rejection),
        }
    }

    fn run_demo(&mut self) {
        println!("\n--- Running Batch Demo ---");

        if self.clinic.doctors().len() < 2
            || self.clinic.patients().len() < 2
            || self.clinic.rooms().len() < 2
        {
            println!("The demo needs at least two doctors, patients and rooms");
            return;
        }

        let c = &self.clinic;
        let (d1, d2) = (&c.doctors()[0], &c.doctors()[1]);
        let (p1, p2) = (&c.patients()[0], &c.patients()[1]);
        let (r1, r2) = (&c.rooms()[0], &c.rooms()[1]);

        let day = chrono::Local::now().date_naive() + chrono::Duration::days(1);
        let slot = |hour: u32| day.and_hms_opt(hour, 0, 0).unwrap_or_default();

        let requests = vec![
            Appointment::new(slot(10), d1, p1, r1),
            Appointment::new(slot(10), d2, p2, r1),
            Appointment::new(slot(10), d1, p2, r2),
            Appointment::new(slot(11), d2, p2, r2),
        ];

        println!("Submitting {} appointment requests...", requests.len());
        let result = self.clinic.schedule_batch(requests);

        println!("\n--- Scheduling Results ---");
        println!("  Total requests: {}", result.total_requests);
        println!("  Confirmed: {}", result.confirmed.len());
        println!("  Rejected: {}", result.rejected.len());
        println!("  Success rate: {:.1}%", result.success_rate());

        for rejection in &result.rejected {
            println!(
                "  - {}: {}",
                rejection.appointment.timestamp().format("%Y-%m-%d %H:%M"),
                rejection.reason
            );
        }
    }

    fn run(&mut self) {
        self.print_header();

        while self.running {
            self.print_menu();

            let Some(choice) = self.get_input("Enter choice") else {
                break;
            };

            match choice.as_str() {
                "1" => self.add_doctor(),
                "2" => self.add_patient(),
                "3" => self.add_room(),
                "4" => self.add_medical_service(),
                "5" => self.schedule_appointment(),
                "6" => println!("\n{}", self.clinic),
                "7" => self.run_demo(),
                "8" => self.running = false,
                _ => println!("Invalid choice"),
            }
        }

        println!("\nGoodbye!");
    }
}

/// The roster the clinic starts with when `seed_demo` is enabled.
fn seed(clinic: &mut Clinic) -> Result<(), SchedulingError> {
    clinic.add_doctor(Doctor::new("Ivan Ivanovych", "Therapist", "Therapy")?);
    clinic.add_doctor(Doctor::new("Svitlana Svitlanivna", "Cardiologist", "Cardiology")?);

    let dob = |y, m, d| NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default();
    clinic.add_patient(Patient::new("Maria Petrivna", dob(1990, 5, 20))?);
    clinic.add_patient(Patient::new("Oleh Oleksandrovych", dob(1985, 3, 15))?);

    clinic.add_room(Room::new("101", "Consultation")?);
    clinic.add_room(Room::new("102", "Operating")?);

    clinic.add_medical_service(MedicalService::new("Consultation", 500.0)?);
    clinic.add_medical_service(MedicalService::new("X-ray", 300.0)?);
    Ok(())
}

fn build_clinic(config: &CliConfig) -> Result<Clinic, SchedulingError> {
    let mut clinic = Clinic::new(config.clinic_name.clone())?;
    if config.seed_demo {
        seed(&mut clinic)?;
    }
    Ok(clinic)
}

fn main() -> Result<(), ConfigError> {
    let config = get_config()?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log_filter.as_str().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    match build_clinic(&config) {
        Ok(clinic) => ClinicCLI::new(clinic).run(),
        Err(e) => {
            tracing::error!(error = %e, "could not set up clinic");
            eprintln!("Error: {}", e);
        }
    }

    Ok(())
}
