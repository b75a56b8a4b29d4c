// Error types - input format errors vs domain rule violations

use thiserror::Error;

// ============================================================================
// TEAM COMPOSITION
// ============================================================================

/// Why a set of staff members cannot handle a given act kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TeamError {
    #[error("at least one medical staff member must be assigned")]
    Empty,

    #[error("a consultation requires exactly one doctor")]
    SingleDoctor,

    #[error("a care act requires exactly one nurse")]
    SingleNurse,

    #[error("a surgery may only involve surgeons and nurses")]
    SurgeryOutsiders,

    #[error("a surgery needs at least one surgeon and one nurse")]
    SurgeryIncomplete,
}

// ============================================================================
// DOMAIN ERRORS
// ============================================================================

/// Business rule violation raised by the hospital network model.
///
/// The `Display` text is what the user sees, unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HospitalError {
    #[error("{0} must not be empty.")]
    EmptyKey(&'static str),

    #[error("{what} '{key}' already exists.")]
    Duplicate { what: &'static str, key: String },

    #[error("Unknown {what}: {key}.")]
    Unknown { what: &'static str, key: String },

    #[error("The patient's city of residence must belong to their region.")]
    CityOutsideRegion,

    #[error("Transfer not needed: the patient is already in this center.")]
    AlreadyInCenter,

    #[error("Availability refused: the staff member is not attached to this center.")]
    AvailabilityRefused,

    #[error("Appointment refused: this center is not in the patient's region.")]
    CenterOutsideRegion,

    #[error("Staff member not attached to center {center}: {staff}.")]
    StaffNotAttached { center: String, staff: String },

    #[error("Staff member unavailable in center {center}: {staff}.")]
    StaffUnavailable { center: String, staff: String },

    #[error("Appointment refused: {0}.")]
    AppointmentTeam(TeamError),

    #[error("Act refused: {0}.")]
    ActTeam(TeamError),

    #[error("This medical act has already been performed.")]
    ActAlreadyPerformed,

    #[error("Scheduling conflict: the patient already has an appointment of another type in this slot.")]
    PatientConflict,

    #[error("Scheduling conflict: a medical staff member is already busy in this slot.")]
    StaffConflict,

    #[error("Operation impossible: the appointment is no longer scheduled.")]
    NotScheduled,

    #[error("Cancellation refused: the patient must cancel at least 24h before the appointment.")]
    LateCancellation,

    #[error("Cancellation refused: appointment '{appointment}' does not belong to patient {patient}.")]
    NotPatientsAppointment { appointment: String, patient: String },

    #[error("Cancellation refused: this staff member is not assigned to this appointment.")]
    StaffNotAssigned,
}

impl HospitalError {
    pub fn unknown(what: &'static str, key: impl Into<String>) -> Self {
        HospitalError::Unknown { what, key: key.into() }
    }

    pub fn duplicate(what: &'static str, key: impl Into<String>) -> Self {
        HospitalError::Duplicate { what, key: key.into() }
    }
}

pub type HospitalResult<T> = std::result::Result<T, HospitalError>;

// ============================================================================
// INPUT FORMAT ERRORS
// ============================================================================

/// Text typed into a form does not match the expected grammar.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("{field} is required.")]
    MissingField { field: &'static str },

    #[error("{field}: invalid date '{value}' (expected YYYY-MM-DD).")]
    InvalidDate { field: &'static str, value: String },

    #[error("{field}: invalid date-time '{value}' (expected YYYY-MM-DD HH:MM).")]
    InvalidDateTime { field: &'static str, value: String },

    #[error("{field}: malformed list ({reason}).")]
    InvalidList { field: &'static str, reason: String },

    #[error("{field}: unknown value '{value}' (expected one of {expected}).")]
    UnknownChoice {
        field: &'static str,
        value: String,
        expected: String,
    },
}

// ============================================================================
// SHELL ERRORS
// ============================================================================

/// Everything a form submission can fail with.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShellError {
    #[error(transparent)]
    Input(#[from] InputError),

    #[error(transparent)]
    Domain(#[from] HospitalError),
}

impl ShellError {
    pub fn is_input(&self) -> bool {
        matches!(self, ShellError::Input(_))
    }
}
