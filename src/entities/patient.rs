// 🧑 Patient - identity is the social security number (NSS)

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::entities::record::MedicalRecord;
use crate::error::{HospitalError, HospitalResult};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Patient {
    pub last_name: String,
    pub first_name: String,
    pub birth_date: NaiveDate,

    /// Identity
    pub nss: String,
    pub insurance_number: Option<String>,
    pub address: String,
    pub phone: String,
    pub email: String,

    /// City key of residence
    pub city: String,
    /// Region of residence
    pub region: String,
    pub current_center: String,

    pub record: MedicalRecord,

    /// Appointment ids, in booking order
    pub appointments: Vec<String>,
}

/// Everything needed to register a patient.
#[derive(Debug, Clone)]
pub struct NewPatient {
    pub last_name: String,
    pub first_name: String,
    pub birth_date: NaiveDate,
    pub nss: String,
    pub insurance_number: Option<String>,
    pub address: String,
    pub phone: String,
    pub email: String,
    pub city: String,
    pub region: String,
    pub center: String,
}

impl Patient {
    /// Build the patient and open their medical record at `center`.
    ///
    /// Geography checks (city inside region) are done by the network, which
    /// owns the region/department tables.
    pub fn new(details: NewPatient) -> Self {
        let record = MedicalRecord::for_patient(&details.nss, details.center.clone());

        Patient {
            last_name: details.last_name,
            first_name: details.first_name,
            birth_date: details.birth_date,
            nss: details.nss,
            insurance_number: details.insurance_number,
            address: details.address,
            phone: details.phone,
            email: details.email,
            city: details.city,
            region: details.region,
            current_center: details.center,
            record,
            appointments: Vec::new(),
        }
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn transfer_record(&mut self, new_center: &str, at: NaiveDateTime) -> HospitalResult<()> {
        if new_center == self.current_center {
            return Err(HospitalError::AlreadyInCenter);
        }

        let previous = std::mem::replace(&mut self.current_center, new_center.to_string());
        self.record.record_transfer(previous, new_center.to_string(), at);
        Ok(())
    }
}
