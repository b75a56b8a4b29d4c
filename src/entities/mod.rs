// Entity Models - the hospital network's building blocks
//
// Each entity is identified by a natural key (region name, department code,
// city key, center name, staff email, patient NSS, appointment id) and
// refers to other entities by key. The network owns all of them.

pub mod geography;
pub mod center;
pub mod staff;
pub mod patient;
pub mod record;
pub mod appointment;

pub use geography::{city_key, City, Department, Region};
pub use center::Center;
pub use staff::{NewStaff, Staff, StaffKind};
pub use patient::{NewPatient, Patient};
pub use record::{ActKind, MedicalAct, MedicalRecord, Participant, RecordTransfer};
pub use appointment::{Appointment, AppointmentStatus, NewAppointment, PATIENT_CANCELLATION_NOTICE_HOURS};
