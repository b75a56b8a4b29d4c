// 🗂️ Form Shell - tabs, forms, and dispatch into the network
//
// Each form collects raw strings. Submitting a form:
//   1. validates/parses every field (InputError on failure, model untouched)
//   2. calls exactly one HospitalNetwork operation
//   3. returns an Outcome to display, or the model's error unchanged
//
// The shell owns no hospital state besides these string buffers.

use chrono::{NaiveDate, NaiveDateTime};
use tracing::{debug, warn};

use crate::config::AppConfig;
use crate::entities::{Appointment, NewAppointment, NewPatient, NewStaff};
use crate::error::{InputError, ShellError};
use crate::forms::{self, DATETIME_FORMAT, DATE_FORMAT};
use crate::network::HospitalNetwork;
use crate::views;

// ============================================================================
// TABS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Setup,
    Staff,
    Patients,
    Appointments,
    Records,
}

impl Tab {
    pub const ALL: [Tab; 5] = [Tab::Setup, Tab::Staff, Tab::Patients, Tab::Appointments, Tab::Records];

    pub fn next(&self) -> Self {
        match self {
            Tab::Setup => Tab::Staff,
            Tab::Staff => Tab::Patients,
            Tab::Patients => Tab::Appointments,
            Tab::Appointments => Tab::Records,
            Tab::Records => Tab::Setup,
        }
    }

    pub fn previous(&self) -> Self {
        match self {
            Tab::Setup => Tab::Records,
            Tab::Staff => Tab::Setup,
            Tab::Patients => Tab::Staff,
            Tab::Appointments => Tab::Patients,
            Tab::Records => Tab::Appointments,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            Tab::Setup => "Setup",
            Tab::Staff => "Staff",
            Tab::Patients => "Patients",
            Tab::Appointments => "Appointments",
            Tab::Records => "Records",
        }
    }

    pub fn forms(&self) -> &'static [FormKind] {
        match self {
            Tab::Setup => &[
                FormKind::AddRegion,
                FormKind::AddDepartment,
                FormKind::AddCity,
                FormKind::AddCenter,
            ],
            Tab::Staff => &[
                FormKind::AddStaff,
                FormKind::AttachStaff,
                FormKind::SetAvailability,
            ],
            Tab::Patients => &[FormKind::AddPatient, FormKind::TransferPatient],
            Tab::Appointments => &[
                FormKind::CreateAppointment,
                FormKind::RescheduleAppointment,
                FormKind::CancelByPatient,
                FormKind::CancelByStaff,
                FormKind::PerformAppointment,
                FormKind::ComputeCapacity,
            ],
            Tab::Records => &[FormKind::ShowRecord],
        }
    }
}

// ============================================================================
// FIELDS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldFormat {
    /// Free text
    Text,
    /// Key of an existing entity (center name, staff email, ...)
    Reference,
    Date,
    DateTime,
    /// Comma-separated list
    List,
    /// One of a fixed set of names
    Choice(&'static [&'static str]),
}

impl FieldFormat {
    /// Placeholder shown next to an empty field
    pub fn hint(&self) -> String {
        match self {
            FieldFormat::Text | FieldFormat::Reference => String::new(),
            FieldFormat::Date => "YYYY-MM-DD".to_string(),
            FieldFormat::DateTime => "YYYY-MM-DD HH:MM".to_string(),
            FieldFormat::List => "value1,value2,...".to_string(),
            FieldFormat::Choice(names) => names.join("|"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldDefault {
    Empty,
    Literal(&'static str),
    StaffBirthDate,
    PatientBirthDate,
    Today,
    Now,
}

#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub label: &'static str,
    pub format: FieldFormat,
    pub required: bool,
    pub default: FieldDefault,
    /// Keep the value after a successful submission
    pub keep: bool,
}

const STAFF_KINDS: &[&str] = &["Doctor", "Nurse", "Surgeon"];
const ACT_KINDS: &[&str] = &["Consultation", "Care", "Surgery"];

const fn field(label: &'static str, format: FieldFormat, required: bool) -> FieldSpec {
    let keep = !matches!(format, FieldFormat::Text | FieldFormat::List);
    FieldSpec {
        label,
        format,
        required,
        default: FieldDefault::Empty,
        keep,
    }
}

const fn with_default(spec: FieldSpec, default: FieldDefault) -> FieldSpec {
    FieldSpec { default, ..spec }
}

const fn kept(spec: FieldSpec) -> FieldSpec {
    FieldSpec { keep: true, ..spec }
}

use FieldFormat::{Choice, Date, DateTime, List, Reference, Text};

const ADD_REGION: &[FieldSpec] = &[field("Name", Text, true)];

const ADD_DEPARTMENT: &[FieldSpec] = &[field("Code", Text, true), field("Region", Reference, true)];

const ADD_CITY: &[FieldSpec] = &[
    field("City", Text, true),
    field("Postal code", Text, true),
    field("Department", Reference, true),
];

const ADD_CENTER: &[FieldSpec] = &[field("Center", Text, true), field("City", Reference, true)];

const ADD_STAFF: &[FieldSpec] = &[
    with_default(field("Type", Choice(STAFF_KINDS), true), FieldDefault::Literal("Doctor")),
    field("Last name", Text, false),
    field("First name", Text, false),
    with_default(field("Birth date", Date, true), FieldDefault::StaffBirthDate),
    field("Phone", Text, false),
    field("Email", Text, true),
    with_default(field("Start date", Date, true), FieldDefault::Today),
    kept(with_default(field("Contract", Text, false), FieldDefault::Literal("CDI"))),
    field("Centers", List, false),
    field("Active center", Reference, false),
];

const ATTACH_STAFF: &[FieldSpec] = &[field("Email", Reference, true), field("Centers", List, true)];

const SET_AVAILABILITY: &[FieldSpec] = &[field("Email", Reference, true), field("Center", Reference, false)];

const ADD_PATIENT: &[FieldSpec] = &[
    field("Last name", Text, false),
    field("First name", Text, false),
    with_default(field("Birth date", Date, true), FieldDefault::PatientBirthDate),
    field("Phone", Text, false),
    field("Email", Text, false),
    field("NSS", Text, true),
    field("Insurance", Text, false),
    field("Address", Text, false),
    field("City", Reference, true),
    field("Region", Reference, true),
    field("Center", Reference, true),
];

const TRANSFER_PATIENT: &[FieldSpec] = &[
    field("Patient NSS", Reference, true),
    field("Center", Reference, true),
    with_default(field("Date", DateTime, true), FieldDefault::Now),
];

const CREATE_APPOINTMENT: &[FieldSpec] = &[
    field("ID", Text, false),
    with_default(field("Date", DateTime, true), FieldDefault::Now),
    field("Patient NSS", Reference, true),
    field("Center", Reference, true),
    with_default(field("Type", Choice(ACT_KINDS), true), FieldDefault::Literal("Consultation")),
    field("Staff emails", List, true),
];

const RESCHEDULE_APPOINTMENT: &[FieldSpec] = &[
    field("ID", Reference, true),
    with_default(field("New date", DateTime, true), FieldDefault::Now),
];

const CANCEL_BY_PATIENT: &[FieldSpec] = &[
    field("ID", Reference, true),
    field("Patient NSS", Reference, true),
    with_default(field("Request date", DateTime, true), FieldDefault::Now),
];

const CANCEL_BY_STAFF: &[FieldSpec] = &[field("ID", Reference, true), field("Staff email", Reference, true)];

const PERFORM_APPOINTMENT: &[FieldSpec] = &[field("ID", Reference, true)];

const COMPUTE_CAPACITY: &[FieldSpec] = &[
    with_default(field("Date", DateTime, true), FieldDefault::Now),
    field("Center", Reference, true),
    with_default(field("Type", Choice(ACT_KINDS), true), FieldDefault::Literal("Consultation")),
];

const SHOW_RECORD: &[FieldSpec] = &[field("Patient NSS", Reference, true)];

// ============================================================================
// FORM KINDS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormKind {
    AddRegion,
    AddDepartment,
    AddCity,
    AddCenter,
    AddStaff,
    AttachStaff,
    SetAvailability,
    AddPatient,
    TransferPatient,
    CreateAppointment,
    RescheduleAppointment,
    CancelByPatient,
    CancelByStaff,
    PerformAppointment,
    ComputeCapacity,
    ShowRecord,
}

impl FormKind {
    pub fn title(&self) -> &'static str {
        match self {
            FormKind::AddRegion => "Add region",
            FormKind::AddDepartment => "Add department",
            FormKind::AddCity => "Add city",
            FormKind::AddCenter => "Add center",
            FormKind::AddStaff => "Add staff member",
            FormKind::AttachStaff => "Attach to centers",
            FormKind::SetAvailability => "Set availability",
            FormKind::AddPatient => "Add patient",
            FormKind::TransferPatient => "Transfer record",
            FormKind::CreateAppointment => "Create appointment",
            FormKind::RescheduleAppointment => "Change date",
            FormKind::CancelByPatient => "Cancel (patient)",
            FormKind::CancelByStaff => "Cancel (staff)",
            FormKind::PerformAppointment => "Mark performed",
            FormKind::ComputeCapacity => "Capacity",
            FormKind::ShowRecord => "Show record",
        }
    }

    pub fn fields(&self) -> &'static [FieldSpec] {
        match self {
            FormKind::AddRegion => ADD_REGION,
            FormKind::AddDepartment => ADD_DEPARTMENT,
            FormKind::AddCity => ADD_CITY,
            FormKind::AddCenter => ADD_CENTER,
            FormKind::AddStaff => ADD_STAFF,
            FormKind::AttachStaff => ATTACH_STAFF,
            FormKind::SetAvailability => SET_AVAILABILITY,
            FormKind::AddPatient => ADD_PATIENT,
            FormKind::TransferPatient => TRANSFER_PATIENT,
            FormKind::CreateAppointment => CREATE_APPOINTMENT,
            FormKind::RescheduleAppointment => RESCHEDULE_APPOINTMENT,
            FormKind::CancelByPatient => CANCEL_BY_PATIENT,
            FormKind::CancelByStaff => CANCEL_BY_STAFF,
            FormKind::PerformAppointment => PERFORM_APPOINTMENT,
            FormKind::ComputeCapacity => COMPUTE_CAPACITY,
            FormKind::ShowRecord => SHOW_RECORD,
        }
    }
}

// ============================================================================
// FORM DEFAULTS
// ============================================================================

/// Values used to pre-fill date fields
#[derive(Debug, Clone)]
pub struct FormDefaults {
    pub staff_birth_date: String,
    pub patient_birth_date: String,
    pub now: NaiveDateTime,
}

impl FormDefaults {
    /// Built-in configuration defaults
    pub fn new(now: NaiveDateTime) -> Self {
        AppConfig::default().form_defaults(now)
    }

    fn value(&self, default: FieldDefault) -> String {
        match default {
            FieldDefault::Empty => String::new(),
            FieldDefault::Literal(text) => text.to_string(),
            FieldDefault::StaffBirthDate => self.staff_birth_date.clone(),
            FieldDefault::PatientBirthDate => self.patient_birth_date.clone(),
            FieldDefault::Today => self.now.format(DATE_FORMAT).to_string(),
            FieldDefault::Now => self.now.format(DATETIME_FORMAT).to_string(),
        }
    }
}

// ============================================================================
// OUTCOME
// ============================================================================

/// What a successful submission shows the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub message: String,
    /// Extra lines for the output pane (record display)
    pub detail: Vec<String>,
}

impl Outcome {
    fn message(message: String) -> Self {
        Outcome {
            message,
            detail: Vec::new(),
        }
    }
}

// ============================================================================
// FORM
// ============================================================================

#[derive(Debug, Clone)]
pub struct Form {
    pub kind: FormKind,
    pub values: Vec<String>,
}

impl Form {
    pub fn new(kind: FormKind, defaults: &FormDefaults) -> Self {
        let values = kind.fields().iter().map(|f| defaults.value(f.default)).collect();
        Form { kind, values }
    }

    pub fn fields(&self) -> &'static [FieldSpec] {
        self.kind.fields()
    }

    fn index(&self, label: &str) -> Option<usize> {
        self.fields().iter().position(|f| f.label == label)
    }

    /// Builder used by scripted callers and tests
    pub fn with(mut self, label: &str, value: &str) -> Self {
        self.set(label, value);
        self
    }

    pub fn set(&mut self, label: &str, value: &str) {
        if let Some(i) = self.index(label) {
            self.values[i] = value.to_string();
        }
    }

    pub fn get(&self, label: &str) -> &str {
        self.index(label).map(|i| self.values[i].as_str()).unwrap_or("")
    }

    fn spec(&self, label: &'static str) -> FieldSpec {
        self.index(label)
            .map(|i| self.fields()[i])
            .unwrap_or_else(|| field(label, Text, false))
    }

    // ------------------------------------------------------------------------
    // typed accessors
    // ------------------------------------------------------------------------

    fn text(&self, label: &'static str) -> Result<String, InputError> {
        if self.spec(label).required {
            forms::require(label, self.get(label))
        } else {
            Ok(self.get(label).trim().to_string())
        }
    }

    fn optional(&self, label: &'static str) -> Option<String> {
        forms::optional(self.get(label))
    }

    fn date(&self, label: &'static str) -> Result<NaiveDate, InputError> {
        forms::require(label, self.get(label))?;
        forms::parse_date(label, self.get(label))
    }

    fn datetime(&self, label: &'static str) -> Result<NaiveDateTime, InputError> {
        forms::require(label, self.get(label))?;
        forms::parse_datetime(label, self.get(label))
    }

    fn list(&self, label: &'static str) -> Result<Vec<String>, InputError> {
        let values = forms::parse_list(label, self.get(label))?;
        if values.is_empty() && self.spec(label).required {
            return Err(InputError::MissingField { field: label });
        }
        Ok(values)
    }

    // ------------------------------------------------------------------------
    // submission
    // ------------------------------------------------------------------------

    /// Validate, run the operation, and clear the free-text fields on success.
    pub fn submit(&mut self, net: &mut HospitalNetwork) -> Result<Outcome, ShellError> {
        match self.execute(net) {
            Ok(outcome) => {
                for (value, spec) in self.values.iter_mut().zip(self.kind.fields()) {
                    if !spec.keep {
                        value.clear();
                    }
                }
                Ok(outcome)
            }
            Err(ShellError::Input(err)) => {
                debug!(form = self.kind.title(), error = %err, "input rejected");
                Err(err.into())
            }
            Err(ShellError::Domain(err)) => {
                warn!(form = self.kind.title(), error = %err, "operation refused");
                Err(err.into())
            }
        }
    }

    fn execute(&self, net: &mut HospitalNetwork) -> Result<Outcome, ShellError> {
        let outcome = match self.kind {
            FormKind::AddRegion => {
                let region = net.add_region(&self.text("Name")?)?;
                Outcome::message(format!("Region '{}' added.", region.name))
            }
            FormKind::AddDepartment => {
                let code = self.text("Code")?;
                let region = self.text("Region")?;
                net.add_department(&code, &region)?;
                Outcome::message(format!("Department {} added to {}.", code, region))
            }
            FormKind::AddCity => {
                let name = self.text("City")?;
                let postal_code = self.text("Postal code")?;
                let department = self.text("Department")?;
                let key = net.add_city(&name, &postal_code, &department)?;
                Outcome::message(format!("City {} added.", key))
            }
            FormKind::AddCenter => {
                let name = self.text("Center")?;
                let city = self.text("City")?;
                let center = net.add_center(&name, &city)?;
                Outcome::message(format!("Center {} added in {}.", center.name, center.city))
            }
            FormKind::AddStaff => {
                let details = NewStaff {
                    kind: forms::parse_staff_kind("Type", self.get("Type"))?,
                    last_name: self.text("Last name")?,
                    first_name: self.text("First name")?,
                    birth_date: self.date("Birth date")?,
                    start_date: self.date("Start date")?,
                    contract: self.text("Contract")?,
                    phone: self.text("Phone")?,
                    email: self.text("Email")?,
                };
                let centers = self.list("Centers")?;
                let active = self.optional("Active center");

                let staff = net.add_staff(details, &centers, active.as_deref())?;
                Outcome::message(format!(
                    "{} {} added ({} center(s), active: {}).",
                    staff.kind.as_str(),
                    staff.full_name(),
                    staff.centers.len(),
                    staff.available_at.as_deref().unwrap_or("-"),
                ))
            }
            FormKind::AttachStaff => {
                let email = self.text("Email")?;
                let centers = self.list("Centers")?;
                let staff = net.attach_staff(&email, &centers)?;
                Outcome::message(format!(
                    "{} attached to {}.",
                    staff.full_name(),
                    staff.centers.join(", ")
                ))
            }
            FormKind::SetAvailability => {
                let email = self.text("Email")?;
                let center = self.optional("Center");
                let staff = net.set_availability(&email, center.as_deref())?;
                match &staff.available_at {
                    Some(center) => {
                        Outcome::message(format!("{} is now active in {}.", staff.full_name(), center))
                    }
                    None => Outcome::message(format!(
                        "{} is no longer active in any center.",
                        staff.full_name()
                    )),
                }
            }
            FormKind::AddPatient => {
                let details = NewPatient {
                    last_name: self.text("Last name")?,
                    first_name: self.text("First name")?,
                    birth_date: self.date("Birth date")?,
                    nss: self.text("NSS")?,
                    insurance_number: self.optional("Insurance"),
                    address: self.text("Address")?,
                    phone: self.text("Phone")?,
                    email: self.text("Email")?,
                    city: self.text("City")?,
                    region: self.text("Region")?,
                    center: self.text("Center")?,
                };
                let patient = net.add_patient(details)?;
                Outcome::message(format!(
                    "Patient {} added (record {}).",
                    patient.full_name(),
                    patient.record.number
                ))
            }
            FormKind::TransferPatient => {
                let nss = self.text("Patient NSS")?;
                let center = self.text("Center")?;
                let at = self.datetime("Date")?;
                net.transfer_patient(&nss, &center, at)?;
                Outcome::message(format!("Record of patient {} transferred to {}.", nss, center))
            }
            FormKind::CreateAppointment => {
                let id = self.optional("ID").unwrap_or_else(Appointment::generate_id);
                let request = NewAppointment {
                    id,
                    scheduled_at: self.datetime("Date")?,
                    patient: self.text("Patient NSS")?,
                    center: self.text("Center")?,
                    kind: forms::parse_act_kind("Type", self.get("Type"))?,
                    staff: self.list("Staff emails")?,
                };
                let appointment = net.create_appointment(request)?;
                Outcome::message(format!(
                    "Appointment {} created: {} on {} at {}.",
                    appointment.id,
                    appointment.kind.as_str(),
                    appointment.scheduled_at.format(DATETIME_FORMAT),
                    appointment.center
                ))
            }
            FormKind::RescheduleAppointment => {
                let id = self.text("ID")?;
                let at = self.datetime("New date")?;
                net.reschedule_appointment(&id, at)?;
                Outcome::message(format!("Appointment {} moved to {}.", id, at.format(DATETIME_FORMAT)))
            }
            FormKind::CancelByPatient => {
                let id = self.text("ID")?;
                let nss = self.text("Patient NSS")?;
                let requested_at = self.datetime("Request date")?;
                net.cancel_by_patient(&id, &nss, requested_at)?;
                Outcome::message(format!("Appointment {} cancelled by the patient.", id))
            }
            FormKind::CancelByStaff => {
                let id = self.text("ID")?;
                let email = self.text("Staff email")?;
                net.cancel_by_staff(&id, &email)?;
                Outcome::message(format!("Appointment {} cancelled by {}.", id, email))
            }
            FormKind::PerformAppointment => {
                let id = self.text("ID")?;
                let act = net.perform_appointment(&id)?;
                let patient = net.patient(&act.patient)?;
                Outcome::message(format!(
                    "Act {} performed for {}.",
                    act.kind.as_str(),
                    patient.last_name
                ))
            }
            FormKind::ComputeCapacity => {
                let at = self.datetime("Date")?;
                let center = self.text("Center")?;
                let kind = forms::parse_act_kind("Type", self.get("Type"))?;
                let capacity = net.available_capacity(at, &center, kind)?;
                Outcome::message(format!(
                    "Capacity: {} ({} at {} on {}).",
                    capacity,
                    kind.as_str(),
                    center,
                    at.format(DATETIME_FORMAT)
                ))
            }
            FormKind::ShowRecord => {
                let nss = self.text("Patient NSS")?;
                let detail = views::record_report(net, &nss)?;
                let record = net.record(&nss)?;
                Outcome {
                    message: format!("Record {} loaded.", record.number),
                    detail,
                }
            }
        };

        Ok(outcome)
    }
}

// ============================================================================
// TESTS
// ============================================================================
