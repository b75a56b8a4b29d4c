// 🩺 Medical Staff - doctors, nurses, surgeons
//
// A staff member is identified by email. They can be attached to several
// centers but are available (on duty) in at most one of them at a time.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{HospitalError, HospitalResult};

// ============================================================================
// STAFF KIND
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StaffKind {
    Doctor,
    Nurse,
    Surgeon,
}

impl StaffKind {
    pub const ALL: [StaffKind; 3] = [StaffKind::Doctor, StaffKind::Nurse, StaffKind::Surgeon];

    pub fn as_str(&self) -> &'static str {
        match self {
            StaffKind::Doctor => "Doctor",
            StaffKind::Nurse => "Nurse",
            StaffKind::Surgeon => "Surgeon",
        }
    }

    /// Case-insensitive lookup by display name
    pub fn from_name(name: &str) -> Option<StaffKind> {
        StaffKind::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(name.trim()))
    }
}

// ============================================================================
// STAFF MEMBER
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Staff {
    pub kind: StaffKind,
    pub last_name: String,
    pub first_name: String,
    pub birth_date: NaiveDate,
    pub start_date: NaiveDate,
    pub contract: String,
    pub phone: String,

    /// Identity
    pub email: String,

    /// Center names this staff member is attached to
    pub centers: Vec<String>,

    /// Center where the staff member is currently on duty
    pub available_at: Option<String>,
}

/// Everything needed to register a staff member.
#[derive(Debug, Clone)]
pub struct NewStaff {
    pub kind: StaffKind,
    pub last_name: String,
    pub first_name: String,
    pub birth_date: NaiveDate,
    pub start_date: NaiveDate,
    pub contract: String,
    pub phone: String,
    pub email: String,
}

impl Staff {
    pub fn new(details: NewStaff) -> Self {
        Staff {
            kind: details.kind,
            last_name: details.last_name,
            first_name: details.first_name,
            birth_date: details.birth_date,
            start_date: details.start_date,
            contract: details.contract,
            phone: details.phone,
            email: details.email,
            centers: Vec::new(),
            available_at: None,
        }
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn is_attached_to(&self, center: &str) -> bool {
        self.centers.iter().any(|c| c == center)
    }

    /// Record the attachment on the staff side (the roster side is kept by `Center`)
    pub fn attach(&mut self, center: &str) {
        if !self.is_attached_to(center) {
            self.centers.push(center.to_string());
        }
    }

    pub fn set_available_at(&mut self, center: &str) -> HospitalResult<()> {
        if !self.is_attached_to(center) {
            return Err(HospitalError::AvailabilityRefused);
        }
        self.available_at = Some(center.to_string());
        Ok(())
    }

    pub fn clear_availability(&mut self) {
        self.available_at = None;
    }

    pub fn is_available_in(&self, center: &str) -> bool {
        self.available_at.as_deref() == Some(center)
    }
}
