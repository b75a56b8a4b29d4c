// 📋 Medical Record - performed acts + transfer history
//
// Acts are appended only once performed; transfers are appended each time
// the patient moves to another center. Nothing is ever removed.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::entities::staff::{Staff, StaffKind};
use crate::error::{HospitalError, HospitalResult, TeamError};

// ============================================================================
// ACT KIND
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActKind {
    Consultation,
    Care,
    Surgery,
}

impl ActKind {
    pub const ALL: [ActKind; 3] = [ActKind::Consultation, ActKind::Care, ActKind::Surgery];

    pub fn as_str(&self) -> &'static str {
        match self {
            ActKind::Consultation => "Consultation",
            ActKind::Care => "Care",
            ActKind::Surgery => "Surgery",
        }
    }

    /// Case-insensitive lookup by display name
    pub fn from_name(name: &str) -> Option<ActKind> {
        ActKind::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(name.trim()))
    }

    /// Check that a team of staff kinds may carry out this act.
    ///
    /// - Consultation: exactly one doctor
    /// - Care: exactly one nurse
    /// - Surgery: surgeons and nurses only, at least one of each
    pub fn check_team(&self, team: &[StaffKind]) -> Result<(), TeamError> {
        if team.is_empty() {
            return Err(TeamError::Empty);
        }

        match self {
            ActKind::Consultation => {
                if team != [StaffKind::Doctor] {
                    return Err(TeamError::SingleDoctor);
                }
            }
            ActKind::Care => {
                if team != [StaffKind::Nurse] {
                    return Err(TeamError::SingleNurse);
                }
            }
            ActKind::Surgery => {
                if team.iter().any(|k| *k == StaffKind::Doctor) {
                    return Err(TeamError::SurgeryOutsiders);
                }
                let has_surgeon = team.contains(&StaffKind::Surgeon);
                let has_nurse = team.contains(&StaffKind::Nurse);
                if !(has_surgeon && has_nurse) {
                    return Err(TeamError::SurgeryIncomplete);
                }
            }
        }

        Ok(())
    }
}

// ============================================================================
// MEDICAL ACT
// ============================================================================

/// Snapshot of a staff member taking part in an act
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub email: String,
    pub name: String,
    pub kind: StaffKind,
}

impl From<&Staff> for Participant {
    fn from(staff: &Staff) -> Self {
        Participant {
            email: staff.email.clone(),
            name: staff.full_name(),
            kind: staff.kind,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MedicalAct {
    pub kind: ActKind,
    pub performed_at: NaiveDateTime,
    pub patient: String,
    pub center: String,
    pub participants: Vec<Participant>,
    pub performed: bool,
}

impl MedicalAct {
    pub fn new(
        kind: ActKind,
        performed_at: NaiveDateTime,
        patient: String,
        center: String,
        participants: Vec<Participant>,
    ) -> Self {
        MedicalAct {
            kind,
            performed_at,
            patient,
            center,
            participants,
            performed: false,
        }
    }

    /// Verify qualifications, then file the act into the record.
    pub fn perform(&mut self, record: &mut MedicalRecord) -> HospitalResult<()> {
        if self.performed {
            return Err(HospitalError::ActAlreadyPerformed);
        }

        let team: Vec<StaffKind> = self.participants.iter().map(|p| p.kind).collect();
        self.kind.check_team(&team).map_err(HospitalError::ActTeam)?;

        self.performed = true;
        record.acts.push(self.clone());
        Ok(())
    }

    pub fn participant_names(&self) -> String {
        self.participants
            .iter()
            .map(|p| p.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

// ============================================================================
// TRANSFERS
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordTransfer {
    pub transferred_at: NaiveDateTime,
    pub from_center: String,
    pub to_center: String,
}

// ============================================================================
// MEDICAL RECORD
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MedicalRecord {
    pub number: String,
    pub reference_center: String,
    pub acts: Vec<MedicalAct>,
    pub transfers: Vec<RecordTransfer>,
}

impl MedicalRecord {
    /// Record numbers are "DOS-" followed by the last six characters of the NSS
    pub fn for_patient(nss: &str, reference_center: String) -> Self {
        let chars: Vec<char> = nss.chars().collect();
        let suffix: String = chars[chars.len().saturating_sub(6)..].iter().collect();

        MedicalRecord {
            number: format!("DOS-{}", suffix),
            reference_center,
            acts: Vec::new(),
            transfers: Vec::new(),
        }
    }

    pub fn record_transfer(&mut self, from_center: String, to_center: String, at: NaiveDateTime) {
        self.transfers.push(RecordTransfer {
            transferred_at: at,
            from_center,
            to_center: to_center.clone(),
        });
        self.reference_center = to_center;
    }

    pub fn history(&self) -> &[MedicalAct] {
        &self.acts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 3, 10)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    fn participant(kind: StaffKind) -> Participant {
        Participant {
            email: format!("{}@h.fr", kind.as_str().to_lowercase()),
            name: kind.as_str().to_string(),
            kind,
        }
    }

    #[test]
    fn test_act_kind_from_name() {
        assert_eq!(ActKind::from_name("surgery"), Some(ActKind::Surgery));
        assert_eq!(ActKind::from_name("CARE"), Some(ActKind::Care));
        assert_eq!(ActKind::from_name("xray"), None);
    }

    #[test]
    fn test_consultation_team() {
        let kind = ActKind::Consultation;
        assert!(kind.check_team(&[StaffKind::Doctor]).is_ok());
        assert_eq!(kind.check_team(&[]), Err(TeamError::Empty));
        assert_eq!(kind.check_team(&[StaffKind::Nurse]), Err(TeamError::SingleDoctor));
        assert_eq!(
            kind.check_team(&[StaffKind::Doctor, StaffKind::Doctor]),
            Err(TeamError::SingleDoctor)
        );
    }

    #[test]
    fn test_care_team() {
        assert!(ActKind::Care.check_team(&[StaffKind::Nurse]).is_ok());
        assert_eq!(
            ActKind::Care.check_team(&[StaffKind::Surgeon]),
            Err(TeamError::SingleNurse)
        );
    }

    #[test]
    fn test_surgery_team() {
        let kind = ActKind::Surgery;
        assert!(kind.check_team(&[StaffKind::Surgeon, StaffKind::Nurse]).is_ok());
        assert!(kind
            .check_team(&[StaffKind::Surgeon, StaffKind::Surgeon, StaffKind::Nurse])
            .is_ok());
        assert_eq!(
            kind.check_team(&[StaffKind::Surgeon, StaffKind::Doctor, StaffKind::Nurse]),
            Err(TeamError::SurgeryOutsiders)
        );
        assert_eq!(
            kind.check_team(&[StaffKind::Surgeon]),
            Err(TeamError::SurgeryIncomplete)
        );
    }

    #[test]
    fn test_record_number_uses_last_six_chars() {
        let record = MedicalRecord::for_patient("2980412756012", "CH Versailles".to_string());
        assert_eq!(record.number, "DOS-756012");

        let short = MedicalRecord::for_patient("123", "CH Versailles".to_string());
        assert_eq!(short.number, "DOS-123");
    }

    #[test]
    fn test_perform_files_act_once() {
        let mut record = MedicalRecord::for_patient("2980412756012", "CH Versailles".to_string());
        let mut act = MedicalAct::new(
            ActKind::Consultation,
            at(9),
            "2980412756012".to_string(),
            "CH Versailles".to_string(),
            vec![participant(StaffKind::Doctor)],
        );

        act.perform(&mut record).unwrap();
        assert!(act.performed);
        assert_eq!(record.history().len(), 1);
        assert!(record.history()[0].performed);

        assert_eq!(act.perform(&mut record), Err(HospitalError::ActAlreadyPerformed));
        assert_eq!(record.history().len(), 1);
    }

    #[test]
    fn test_perform_rejects_unqualified_team() {
        let mut record = MedicalRecord::for_patient("2980412756012", "CH Versailles".to_string());
        let mut act = MedicalAct::new(
            ActKind::Care,
            at(9),
            "2980412756012".to_string(),
            "CH Versailles".to_string(),
            vec![participant(StaffKind::Doctor)],
        );

        assert_eq!(
            act.perform(&mut record),
            Err(HospitalError::ActTeam(TeamError::SingleNurse))
        );
        assert!(record.acts.is_empty());
        assert!(!act.performed);
    }

    #[test]
    fn test_transfer_moves_reference_center() {
        let mut record = MedicalRecord::for_patient("2980412756012", "CH Versailles".to_string());
        record.record_transfer("CH Versailles".to_string(), "CH Mantes".to_string(), at(14));

        assert_eq!(record.reference_center, "CH Mantes");
        assert_eq!(record.transfers.len(), 1);
        assert_eq!(record.transfers[0].from_center, "CH Versailles");
    }
}
