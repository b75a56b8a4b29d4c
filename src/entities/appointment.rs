// 📅 Appointment - Scheduled → Cancelled | Performed
//
// Only scheduled appointments can be moved, cancelled or performed.
// Cross-entity rules (region, roster, conflicts) live in the network.

use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::entities::record::ActKind;
use crate::error::{HospitalError, HospitalResult};

/// Minimum notice a patient must give to cancel
pub const PATIENT_CANCELLATION_NOTICE_HOURS: i64 = 24;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AppointmentStatus {
    Scheduled,
    Cancelled,
    Performed,
}

impl AppointmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AppointmentStatus::Scheduled => "Scheduled",
            AppointmentStatus::Cancelled => "Cancelled",
            AppointmentStatus::Performed => "Performed",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Appointment {
    pub id: String,
    pub scheduled_at: NaiveDateTime,
    pub patient: String,
    pub center: String,
    pub kind: ActKind,

    /// Staff emails
    pub staff: Vec<String>,
    pub status: AppointmentStatus,
}

/// Booking request as handed to `HospitalNetwork::create_appointment`.
#[derive(Debug, Clone)]
pub struct NewAppointment {
    pub id: String,
    pub scheduled_at: NaiveDateTime,
    pub patient: String,
    pub center: String,
    pub kind: ActKind,
    pub staff: Vec<String>,
}

impl Appointment {
    pub fn new(request: NewAppointment) -> Self {
        Appointment {
            id: request.id,
            scheduled_at: request.scheduled_at,
            patient: request.patient,
            center: request.center,
            kind: request.kind,
            staff: request.staff,
            status: AppointmentStatus::Scheduled,
        }
    }

    /// Fresh id for bookings submitted without one: "RDV-" + 8 hex chars
    pub fn generate_id() -> String {
        let id = uuid::Uuid::new_v4().simple().to_string();
        format!("RDV-{}", &id[..8])
    }

    pub fn is_scheduled(&self) -> bool {
        self.status == AppointmentStatus::Scheduled
    }

    pub fn ensure_scheduled(&self) -> HospitalResult<()> {
        if !self.is_scheduled() {
            return Err(HospitalError::NotScheduled);
        }
        Ok(())
    }

    pub fn involves(&self, email: &str) -> bool {
        self.staff.iter().any(|s| s == email)
    }

    pub fn cancel_by_patient(&mut self, requested_at: NaiveDateTime) -> HospitalResult<()> {
        self.ensure_scheduled()?;
        if self.scheduled_at - requested_at < Duration::hours(PATIENT_CANCELLATION_NOTICE_HOURS) {
            return Err(HospitalError::LateCancellation);
        }
        self.status = AppointmentStatus::Cancelled;
        Ok(())
    }

    pub fn cancel_by_staff(&mut self, email: &str) -> HospitalResult<()> {
        self.ensure_scheduled()?;
        if !self.involves(email) {
            return Err(HospitalError::StaffNotAssigned);
        }
        self.status = AppointmentStatus::Cancelled;
        Ok(())
    }

    pub fn reschedule(&mut self, new_time: NaiveDateTime) -> HospitalResult<()> {
        self.ensure_scheduled()?;
        self.scheduled_at = new_time;
        Ok(())
    }

    pub fn mark_performed(&mut self) -> HospitalResult<()> {
        self.ensure_scheduled()?;
        self.status = AppointmentStatus::Performed;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(day: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 6, day)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    fn appointment() -> Appointment {
        Appointment::new(NewAppointment {
            id: "RDV-1".to_string(),
            scheduled_at: at(10, 9),
            patient: "2980412756012".to_string(),
            center: "CH Versailles".to_string(),
            kind: ActKind::Consultation,
            staff: vec!["paul@h.fr".to_string()],
        })
    }

    #[test]
    fn test_generated_ids_are_distinct() {
        let a = Appointment::generate_id();
        let b = Appointment::generate_id();
        assert!(a.starts_with("RDV-"));
        assert_eq!(a.len(), 12);
        assert_ne!(a, b);
    }

    #[test]
    fn test_patient_cancellation_needs_24h_notice() {
        let mut rdv = appointment();

        // 23h before
        assert_eq!(
            rdv.cancel_by_patient(at(9, 10)),
            Err(HospitalError::LateCancellation)
        );
        assert!(rdv.is_scheduled());

        // exactly 24h before is fine
        rdv.cancel_by_patient(at(9, 9)).unwrap();
        assert_eq!(rdv.status, AppointmentStatus::Cancelled);
    }

    #[test]
    fn test_staff_cancellation_requires_assignment() {
        let mut rdv = appointment();
        assert_eq!(
            rdv.cancel_by_staff("nora@h.fr"),
            Err(HospitalError::StaffNotAssigned)
        );
        rdv.cancel_by_staff("paul@h.fr").unwrap();
        assert_eq!(rdv.status, AppointmentStatus::Cancelled);
    }

    #[test]
    fn test_closed_appointment_rejects_operations() {
        let mut rdv = appointment();
        rdv.mark_performed().unwrap();

        assert_eq!(rdv.reschedule(at(12, 9)), Err(HospitalError::NotScheduled));
        assert_eq!(rdv.cancel_by_staff("paul@h.fr"), Err(HospitalError::NotScheduled));
        assert_eq!(rdv.cancel_by_patient(at(1, 9)), Err(HospitalError::NotScheduled));
        assert_eq!(rdv.mark_performed(), Err(HospitalError::NotScheduled));
    }
}
