// Hospital Network - Core Library
// Exposes the model, the form shell and the ambient stack for the CLI and tests

pub mod error;
pub mod entities;
pub mod network;
pub mod forms;          // Raw text → typed values
pub mod shell;          // Tabs, forms, dispatch
pub mod views;          // Text summaries per tab
pub mod config;
pub mod logging;
pub mod demo;

// Re-export commonly used types
pub use error::{HospitalError, HospitalResult, InputError, ShellError, TeamError};
pub use entities::{
    ActKind, Appointment, AppointmentStatus, Center, City, Department, MedicalAct,
    MedicalRecord, Patient, Region, Staff, StaffKind,
};
pub use network::HospitalNetwork;
pub use shell::{Form, FormDefaults, FormKind, Outcome, Tab};
pub use config::AppConfig;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
