// 🏥 Hospital Network - the in-memory model and all of its business rules
//
// Owns every entity, keyed by natural key. The form shell calls these
// methods with already-parsed values and shows any `HospitalError` as is.

use std::collections::{BTreeMap, HashSet};

use chrono::NaiveDateTime;
use tracing::info;

use crate::entities::{
    city_key, ActKind, Appointment, Center, City, Department, MedicalAct, MedicalRecord,
    NewAppointment, NewPatient, NewStaff, Participant, Patient, Region, Staff, StaffKind,
};
use crate::error::{HospitalError, HospitalResult};

/// Trim a key and reject it when empty
fn require_key(what: &'static str, key: &str) -> HospitalResult<String> {
    let key = key.trim();
    if key.is_empty() {
        return Err(HospitalError::EmptyKey(what));
    }
    Ok(key.to_string())
}

#[derive(Debug, Default)]
pub struct HospitalNetwork {
    regions: BTreeMap<String, Region>,
    departments: BTreeMap<String, Department>,
    cities: BTreeMap<String, City>,
    centers: BTreeMap<String, Center>,
    staff: BTreeMap<String, Staff>,
    patients: BTreeMap<String, Patient>,
    appointments: BTreeMap<String, Appointment>,
}

impl HospitalNetwork {
    pub fn new() -> Self {
        Self::default()
    }

    // ========================================================================
    // SETUP: regions, departments, cities, centers
    // ========================================================================

    pub fn add_region(&mut self, name: &str) -> HospitalResult<&Region> {
        let name = require_key("Region name", name)?;
        if self.regions.contains_key(&name) {
            return Err(HospitalError::duplicate("Region", name));
        }

        info!(region = %name, "region added");
        Ok(self
            .regions
            .entry(name.clone())
            .or_insert_with(|| Region::new(name)))
    }

    pub fn add_department(&mut self, code: &str, region: &str) -> HospitalResult<&Department> {
        let code = require_key("Department code", code)?;
        if self.departments.contains_key(&code) {
            return Err(HospitalError::duplicate("Department", code));
        }
        let region = self
            .regions
            .get_mut(region.trim())
            .ok_or_else(|| HospitalError::unknown("region", region.trim()))?;

        region.add_department(&code);
        info!(department = %code, region = %region.name, "department added");
        Ok(self
            .departments
            .entry(code.clone())
            .or_insert_with(|| Department::new(code)))
    }

    /// Returns the new city's key
    pub fn add_city(&mut self, name: &str, postal_code: &str, department: &str) -> HospitalResult<String> {
        let name = require_key("City name", name)?;
        let postal_code = require_key("Postal code", postal_code)?;
        let key = city_key(&name, &postal_code);
        if self.cities.contains_key(&key) {
            return Err(HospitalError::duplicate("City", key));
        }
        let department = self
            .departments
            .get_mut(department.trim())
            .ok_or_else(|| HospitalError::unknown("department", department.trim()))?;

        department.add_city(&key);
        info!(city = %key, department = %department.code, "city added");
        self.cities.insert(key.clone(), City::new(name, postal_code));
        Ok(key)
    }

    pub fn add_center(&mut self, name: &str, city: &str) -> HospitalResult<&Center> {
        let name = require_key("Center name", name)?;
        if self.centers.contains_key(&name) {
            return Err(HospitalError::duplicate("Center", name));
        }
        let city = city.trim();
        if !self.cities.contains_key(city) {
            return Err(HospitalError::unknown("city", city));
        }

        info!(center = %name, city = %city, "center added");
        Ok(self
            .centers
            .entry(name.clone())
            .or_insert_with(|| Center::new(name, city.to_string())))
    }

    // ========================================================================
    // STAFF
    // ========================================================================

    /// Register a staff member, attach them to `centers` and put them on duty
    /// in `active` (or the first listed center when `active` is `None`).
    ///
    /// Nothing is stored unless every check passes.
    pub fn add_staff(
        &mut self,
        details: NewStaff,
        centers: &[String],
        active: Option<&str>,
    ) -> HospitalResult<&Staff> {
        let email = require_key("Staff email", &details.email)?;
        if self.staff.contains_key(&email) {
            return Err(HospitalError::duplicate("Staff member", email));
        }
        let centers = self.center_keys(centers)?;

        let active = match active.map(str::trim).filter(|c| !c.is_empty()) {
            Some(center) => {
                let center = self.center(center)?.name.clone();
                if !centers.contains(&center) {
                    return Err(HospitalError::AvailabilityRefused);
                }
                Some(center)
            }
            None => centers.first().cloned(),
        };

        let mut staff = Staff::new(NewStaff { email: email.clone(), ..details });
        for center in &centers {
            staff.attach(center);
        }
        if let Some(center) = &active {
            staff.set_available_at(center)?;
        }
        for center in &centers {
            self.center_mut(center)?.add_staff(&email);
        }

        info!(
            staff = %email,
            kind = staff.kind.as_str(),
            centers = centers.len(),
            "staff member added"
        );
        Ok(self.staff.entry(email).or_insert(staff))
    }

    /// Attach an existing staff member to more centers (idempotent)
    pub fn attach_staff(&mut self, email: &str, centers: &[String]) -> HospitalResult<&Staff> {
        let email = self.staff_member(email)?.email.clone();
        let centers = self.center_keys(centers)?;

        for center in &centers {
            self.center_mut(center)?.add_staff(&email);
        }
        let staff = self.staff_mut(&email)?;
        for center in &centers {
            staff.attach(center);
        }

        info!(staff = %email, centers = centers.len(), "staff attached");
        Ok(staff)
    }

    /// Put a staff member on duty in `center`, or take them off duty with `None`
    pub fn set_availability(&mut self, email: &str, center: Option<&str>) -> HospitalResult<&Staff> {
        let center = match center.map(str::trim).filter(|c| !c.is_empty()) {
            Some(center) => Some(self.center(center)?.name.clone()),
            None => None,
        };

        let staff = self.staff_mut(email)?;
        match &center {
            Some(center) => staff.set_available_at(center)?,
            None => staff.clear_availability(),
        }

        info!(staff = %staff.email, center = ?staff.available_at, "availability updated");
        Ok(staff)
    }

    /// Resolve center names to their stored keys, failing on the first unknown one
    fn center_keys(&self, centers: &[String]) -> HospitalResult<Vec<String>> {
        centers
            .iter()
            .map(|center| self.center(center).map(|c| c.name.clone()))
            .collect()
    }

    // ========================================================================
    // PATIENTS
    // ========================================================================

    pub fn add_patient(&mut self, details: NewPatient) -> HospitalResult<&Patient> {
        let nss = require_key("Social security number", &details.nss)?;
        if self.patients.contains_key(&nss) {
            return Err(HospitalError::duplicate("Patient", nss));
        }
        let city = details.city.trim().to_string();
        if !self.cities.contains_key(&city) {
            return Err(HospitalError::unknown("city", city));
        }
        let region = details.region.trim().to_string();
        if !self.regions.contains_key(&region) {
            return Err(HospitalError::unknown("region", region));
        }
        let center = self.center(&details.center)?.name.clone();
        if !self.region_contains_city(&region, &city) {
            return Err(HospitalError::CityOutsideRegion);
        }

        let patient = Patient::new(NewPatient {
            nss: nss.clone(),
            city,
            region,
            center,
            ..details
        });
        info!(patient = %nss, record = %patient.record.number, "patient added");
        Ok(self.patients.entry(nss).or_insert(patient))
    }

    pub fn transfer_patient(&mut self, nss: &str, center: &str, at: NaiveDateTime) -> HospitalResult<()> {
        let center = self.center(center)?.name.clone();
        let patient = self.patient_mut(nss)?;

        let previous = patient.current_center.clone();
        patient.transfer_record(&center, at)?;

        info!(patient = %patient.nss, from = %previous, to = %center, "record transferred");
        Ok(())
    }

    // ========================================================================
    // APPOINTMENTS
    // ========================================================================

    pub fn create_appointment(&mut self, request: NewAppointment) -> HospitalResult<&Appointment> {
        let id = require_key("Appointment id", &request.id)?;
        if self.appointments.contains_key(&id) {
            return Err(HospitalError::duplicate("Appointment", id));
        }

        let center = self.center(&request.center)?;
        let patient = self.patient(&request.patient)?;
        if !self.region_contains_city(&patient.region, &center.city) {
            return Err(HospitalError::CenterOutsideRegion);
        }

        let mut team = Vec::with_capacity(request.staff.len());
        let mut emails = Vec::with_capacity(request.staff.len());
        for email in &request.staff {
            let staff = self.staff_member(email)?;
            if !center.has_staff(&staff.email) {
                return Err(HospitalError::StaffNotAttached {
                    center: center.name.clone(),
                    staff: staff.full_name(),
                });
            }
            if !staff.is_available_in(&center.name) {
                return Err(HospitalError::StaffUnavailable {
                    center: center.name.clone(),
                    staff: staff.full_name(),
                });
            }
            team.push(staff.kind);
            emails.push(staff.email.clone());
        }
        request
            .kind
            .check_team(&team)
            .map_err(HospitalError::AppointmentTeam)?;

        let center = center.name.clone();
        let nss = patient.nss.clone();
        self.check_conflicts(&nss, request.kind, &emails, request.scheduled_at, None)?;

        let appointment = Appointment::new(NewAppointment {
            id: id.clone(),
            patient: nss,
            center,
            staff: emails,
            ..request
        });
        self.patient_mut(&appointment.patient)?
            .appointments
            .push(id.clone());

        info!(
            appointment = %id,
            kind = appointment.kind.as_str(),
            at = %appointment.scheduled_at,
            center = %appointment.center,
            "appointment created"
        );
        Ok(self.appointments.entry(id).or_insert(appointment))
    }

    pub fn reschedule_appointment(&mut self, id: &str, new_time: NaiveDateTime) -> HospitalResult<()> {
        let appointment = self.appointment(id)?;
        appointment.ensure_scheduled()?;
        self.check_conflicts(
            &appointment.patient,
            appointment.kind,
            &appointment.staff,
            new_time,
            Some(appointment.id.as_str()),
        )?;

        let appointment = self.appointment_mut(id)?;
        appointment.reschedule(new_time)?;
        info!(appointment = %appointment.id, at = %new_time, "appointment rescheduled");
        Ok(())
    }

    pub fn cancel_by_patient(&mut self, id: &str, nss: &str, requested_at: NaiveDateTime) -> HospitalResult<()> {
        let nss = self.patient(nss)?.nss.clone();
        let appointment = self.appointment_mut(id)?;
        if appointment.patient != nss {
            return Err(HospitalError::NotPatientsAppointment {
                appointment: appointment.id.clone(),
                patient: nss,
            });
        }

        appointment.cancel_by_patient(requested_at)?;
        info!(appointment = %appointment.id, patient = %nss, "appointment cancelled by patient");
        Ok(())
    }

    pub fn cancel_by_staff(&mut self, id: &str, email: &str) -> HospitalResult<()> {
        self.appointment(id)?;
        let email = self.staff_member(email)?.email.clone();

        let appointment = self.appointment_mut(id)?;
        appointment.cancel_by_staff(&email)?;
        info!(appointment = %appointment.id, staff = %email, "appointment cancelled by staff");
        Ok(())
    }

    /// Carry out a scheduled appointment: the act is filed into the
    /// patient's record and the appointment becomes Performed.
    pub fn perform_appointment(&mut self, id: &str) -> HospitalResult<MedicalAct> {
        let appointment = self.appointment(id)?;
        appointment.ensure_scheduled()?;

        let participants = appointment
            .staff
            .iter()
            .map(|email| self.staff_member(email).map(Participant::from))
            .collect::<HospitalResult<Vec<_>>>()?;
        let mut act = MedicalAct::new(
            appointment.kind,
            appointment.scheduled_at,
            appointment.patient.clone(),
            appointment.center.clone(),
            participants,
        );

        let patient = self.patient_mut(&act.patient)?;
        act.perform(&mut patient.record)?;
        self.appointment_mut(id)?.mark_performed()?;

        info!(appointment = %id, kind = act.kind.as_str(), patient = %act.patient, "act performed");
        Ok(act)
    }

    /// How many more appointments of `kind` the center can take at `at`.
    ///
    /// Candidates are roster members on duty in the center who are not
    /// booked on a scheduled appointment at that exact time. Surgery needs a
    /// surgeon and a nurse, so it is bounded by the scarcer of the two.
    pub fn available_capacity(&self, at: NaiveDateTime, center: &str, kind: ActKind) -> HospitalResult<usize> {
        let center = self.center(center)?;

        let busy: HashSet<&str> = self
            .appointments
            .values()
            .filter(|a| a.is_scheduled() && a.scheduled_at == at)
            .flat_map(|a| a.staff.iter().map(String::as_str))
            .collect();

        let free = |kind: StaffKind| {
            center
                .staff
                .iter()
                .filter_map(|email| self.staff.get(email))
                .filter(|s| s.kind == kind && s.is_available_in(&center.name))
                .filter(|s| !busy.contains(s.email.as_str()))
                .count()
        };

        Ok(match kind {
            ActKind::Consultation => free(StaffKind::Doctor),
            ActKind::Care => free(StaffKind::Nurse),
            ActKind::Surgery => free(StaffKind::Surgeon).min(free(StaffKind::Nurse)),
        })
    }

    pub fn available_acts(&self) -> &'static [ActKind] {
        &ActKind::ALL
    }

    /// Same patient with another act kind, or any shared staff member, in the
    /// same slot is a conflict. Only scheduled appointments count.
    fn check_conflicts(
        &self,
        patient: &str,
        kind: ActKind,
        staff: &[String],
        at: NaiveDateTime,
        exclude: Option<&str>,
    ) -> HospitalResult<()> {
        for other in self.appointments.values() {
            if exclude == Some(other.id.as_str()) {
                continue;
            }
            if !other.is_scheduled() || other.scheduled_at != at {
                continue;
            }
            if other.patient == patient && other.kind != kind {
                return Err(HospitalError::PatientConflict);
            }
            if staff.iter().any(|email| other.involves(email)) {
                return Err(HospitalError::StaffConflict);
            }
        }
        Ok(())
    }

    // ========================================================================
    // QUERIES
    // ========================================================================

    pub fn region_contains_city(&self, region: &str, city: &str) -> bool {
        self.regions.get(region).is_some_and(|r| {
            r.departments
                .iter()
                .filter_map(|code| self.departments.get(code))
                .any(|d| d.contains_city(city))
        })
    }

    /// Region a department was added under
    pub fn department_region(&self, code: &str) -> Option<&Region> {
        self.regions.values().find(|r| r.has_department(code))
    }

    pub fn center(&self, name: &str) -> HospitalResult<&Center> {
        self.centers
            .get(name.trim())
            .ok_or_else(|| HospitalError::unknown("center", name.trim()))
    }

    pub fn staff_member(&self, email: &str) -> HospitalResult<&Staff> {
        self.staff
            .get(email.trim())
            .ok_or_else(|| HospitalError::unknown("staff member", email.trim()))
    }

    pub fn patient(&self, nss: &str) -> HospitalResult<&Patient> {
        self.patients
            .get(nss.trim())
            .ok_or_else(|| HospitalError::unknown("patient", nss.trim()))
    }

    pub fn appointment(&self, id: &str) -> HospitalResult<&Appointment> {
        self.appointments
            .get(id.trim())
            .ok_or_else(|| HospitalError::unknown("appointment", id.trim()))
    }

    fn center_mut(&mut self, name: &str) -> HospitalResult<&mut Center> {
        self.centers
            .get_mut(name.trim())
            .ok_or_else(|| HospitalError::unknown("center", name.trim()))
    }

    fn staff_mut(&mut self, email: &str) -> HospitalResult<&mut Staff> {
        self.staff
            .get_mut(email.trim())
            .ok_or_else(|| HospitalError::unknown("staff member", email.trim()))
    }

    fn patient_mut(&mut self, nss: &str) -> HospitalResult<&mut Patient> {
        self.patients
            .get_mut(nss.trim())
            .ok_or_else(|| HospitalError::unknown("patient", nss.trim()))
    }

    fn appointment_mut(&mut self, id: &str) -> HospitalResult<&mut Appointment> {
        self.appointments
            .get_mut(id.trim())
            .ok_or_else(|| HospitalError::unknown("appointment", id.trim()))
    }

    pub fn record(&self, nss: &str) -> HospitalResult<&MedicalRecord> {
        self.patient(nss).map(|p| &p.record)
    }

    /// Staff attached to a center, in attachment order
    pub fn center_roster(&self, center: &str) -> HospitalResult<Vec<&Staff>> {
        let center = self.center(center)?;
        Ok(center
            .staff
            .iter()
            .filter_map(|email| self.staff.get(email))
            .collect())
    }

    pub fn regions(&self) -> impl Iterator<Item = &Region> {
        self.regions.values()
    }

    pub fn departments(&self) -> impl Iterator<Item = &Department> {
        self.departments.values()
    }

    pub fn cities(&self) -> impl Iterator<Item = &City> {
        self.cities.values()
    }

    pub fn centers(&self) -> impl Iterator<Item = &Center> {
        self.centers.values()
    }

    pub fn staff(&self) -> impl Iterator<Item = &Staff> {
        self.staff.values()
    }

    pub fn patients(&self) -> impl Iterator<Item = &Patient> {
        self.patients.values()
    }

    pub fn appointments(&self) -> impl Iterator<Item = &Appointment> {
        self.appointments.values()
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::AppointmentStatus;
    use crate::error::TeamError;
    use chrono::{Duration, NaiveDate};

    const NSS: &str = "2980412756012";

    fn slot(day: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 9, day)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    fn new_staff(kind: StaffKind, first: &str, email: &str) -> NewStaff {
        NewStaff {
            kind,
            last_name: "Test".to_string(),
            first_name: first.to_string(),
            birth_date: NaiveDate::from_ymd_opt(1980, 1, 1).unwrap(),
            start_date: NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
            contract: "CDI".to_string(),
            phone: "0600000000".to_string(),
            email: email.to_string(),
        }
    }

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    /// Ile-de-France (78: Versailles, Mantes) + Normandie (76: Rouen),
    /// doctor/surgeon in Versailles+Mantes, one nurse per 78 center, patient in Versailles.
    fn network() -> HospitalNetwork {
        let mut net = HospitalNetwork::new();
        net.add_region("Ile-de-France").unwrap();
        net.add_region("Normandie").unwrap();
        net.add_department("78", "Ile-de-France").unwrap();
        net.add_department("76", "Normandie").unwrap();
        let versailles = net.add_city("Versailles", "78000", "78").unwrap();
        let mantes = net.add_city("Mantes-la-Jolie", "78200", "78").unwrap();
        let rouen = net.add_city("Rouen", "76000", "76").unwrap();
        net.add_center("CH Versailles", &versailles).unwrap();
        net.add_center("CH Mantes", &mantes).unwrap();
        net.add_center("CH Rouen", &rouen).unwrap();

        let both = names(&["CH Versailles", "CH Mantes"]);
        net.add_staff(new_staff(StaffKind::Doctor, "Paul", "paul@h.fr"), &both, None)
            .unwrap();
        net.add_staff(new_staff(StaffKind::Surgeon, "Nora", "nora@h.fr"), &both, None)
            .unwrap();
        net.add_staff(new_staff(StaffKind::Nurse, "Lea", "lea@h.fr"), &names(&["CH Versailles"]), None)
            .unwrap();
        net.add_staff(new_staff(StaffKind::Nurse, "Iris", "iris@h.fr"), &names(&["CH Mantes"]), None)
            .unwrap();

        net.add_patient(NewPatient {
            last_name: "Durand".to_string(),
            first_name: "Alice".to_string(),
            birth_date: NaiveDate::from_ymd_opt(1998, 4, 12).unwrap(),
            nss: NSS.to_string(),
            insurance_number: None,
            address: "12 rue des Fleurs".to_string(),
            phone: "0601020304".to_string(),
            email: "alice@example.com".to_string(),
            city: versailles,
            region: "Ile-de-France".to_string(),
            center: "CH Versailles".to_string(),
        })
        .unwrap();
        net
    }

    fn booking(id: &str, at: NaiveDateTime, center: &str, kind: ActKind, staff: &[&str]) -> NewAppointment {
        NewAppointment {
            id: id.to_string(),
            scheduled_at: at,
            patient: NSS.to_string(),
            center: center.to_string(),
            kind,
            staff: names(staff),
        }
    }

    #[test]
    fn test_setup_rejects_duplicates_and_unknown_refs() {
        let mut net = network();

        assert_eq!(
            net.add_region("Normandie").unwrap_err(),
            HospitalError::duplicate("Region", "Normandie")
        );
        assert_eq!(
            net.add_department("91", "Bretagne").unwrap_err(),
            HospitalError::unknown("region", "Bretagne")
        );
        assert_eq!(
            net.add_city("Versailles", "78000", "78").unwrap_err(),
            HospitalError::duplicate("City", "Versailles (78000)")
        );
        assert_eq!(
            net.add_center("CH Evry", "Evry (91000)").unwrap_err(),
            HospitalError::unknown("city", "Evry (91000)")
        );
        assert_eq!(net.add_region("  ").unwrap_err(), HospitalError::EmptyKey("Region name"));
    }

    #[test]
    fn test_department_region_lookup() {
        let net = network();
        assert_eq!(net.department_region("76").unwrap().name, "Normandie");
        assert!(net.department_region("13").is_none());
        assert!(net.region_contains_city("Ile-de-France", "Mantes-la-Jolie (78200)"));
        assert!(!net.region_contains_city("Ile-de-France", "Rouen (76000)"));
    }

    #[test]
    fn test_staff_attached_via_list_appears_in_roster() {
        let net = network();
        let roster: Vec<&str> = net
            .center_roster("CH Mantes")
            .unwrap()
            .iter()
            .map(|s| s.email.as_str())
            .collect();
        assert_eq!(roster, vec!["paul@h.fr", "nora@h.fr", "iris@h.fr"]);

        // active center defaults to the first listed one
        assert!(net.staff_member("paul@h.fr").unwrap().is_available_in("CH Versailles"));
    }

    #[test]
    fn test_add_staff_is_all_or_nothing() {
        let mut net = network();
        let err = net
            .add_staff(
                new_staff(StaffKind::Nurse, "Zoe", "zoe@h.fr"),
                &names(&["CH Versailles", "CH Nowhere"]),
                None,
            )
            .unwrap_err();

        assert_eq!(err, HospitalError::unknown("center", "CH Nowhere"));
        assert!(net.staff_member("zoe@h.fr").is_err());
        assert!(!net.center("CH Versailles").unwrap().has_staff("zoe@h.fr"));
    }

    #[test]
    fn test_add_staff_active_center_must_be_listed() {
        let mut net = network();
        let err = net
            .add_staff(
                new_staff(StaffKind::Nurse, "Zoe", "zoe@h.fr"),
                &names(&["CH Versailles"]),
                Some("CH Mantes"),
            )
            .unwrap_err();
        assert_eq!(err, HospitalError::AvailabilityRefused);

        let staff = net
            .add_staff(
                new_staff(StaffKind::Nurse, "Zoe", "zoe@h.fr"),
                &names(&["CH Versailles", "CH Mantes"]),
                Some("CH Mantes"),
            )
            .unwrap();
        assert!(staff.is_available_in("CH Mantes"));
    }

    #[test]
    fn test_attach_and_toggle_availability() {
        let mut net = network();
        net.attach_staff("lea@h.fr", &names(&["CH Mantes", "CH Mantes"])).unwrap();
        assert_eq!(net.staff_member("lea@h.fr").unwrap().centers.len(), 2);
        assert!(net.center("CH Mantes").unwrap().has_staff("lea@h.fr"));

        net.set_availability("lea@h.fr", Some("CH Mantes")).unwrap();
        assert!(net.staff_member("lea@h.fr").unwrap().is_available_in("CH Mantes"));

        net.set_availability("lea@h.fr", None).unwrap();
        assert!(net.staff_member("lea@h.fr").unwrap().available_at.is_none());

        assert_eq!(
            net.set_availability("lea@h.fr", Some("CH Rouen")).unwrap_err(),
            HospitalError::AvailabilityRefused
        );
    }

    #[test]
    fn test_patient_city_must_be_in_region() {
        let mut net = network();
        let err = net
            .add_patient(NewPatient {
                last_name: "Roy".to_string(),
                first_name: "Marc".to_string(),
                birth_date: NaiveDate::from_ymd_opt(1970, 2, 2).unwrap(),
                nss: "1700202000111".to_string(),
                insurance_number: None,
                address: "1 quai".to_string(),
                phone: "0".to_string(),
                email: "marc@example.com".to_string(),
                city: "Rouen (76000)".to_string(),
                region: "Ile-de-France".to_string(),
                center: "CH Rouen".to_string(),
            })
            .unwrap_err();
        assert_eq!(err, HospitalError::CityOutsideRegion);
    }

    #[test]
    fn test_transfer_patient() {
        let mut net = network();
        net.transfer_patient(NSS, "CH Mantes", slot(5, 10)).unwrap();

        let patient = net.patient(NSS).unwrap();
        assert_eq!(patient.current_center, "CH Mantes");
        assert_eq!(patient.record.transfers.len(), 1);

        assert_eq!(
            net.transfer_patient(NSS, "CH Mantes", slot(6, 10)).unwrap_err(),
            HospitalError::AlreadyInCenter
        );
        assert_eq!(
            net.transfer_patient(NSS, "CH Lyon", slot(6, 10)).unwrap_err(),
            HospitalError::unknown("center", "CH Lyon")
        );
    }

    #[test]
    fn test_create_and_perform_consultation() {
        let mut net = network();
        net.create_appointment(booking("R1", slot(10, 9), "CH Versailles", ActKind::Consultation, &["paul@h.fr"]))
            .unwrap();
        assert_eq!(net.patient(NSS).unwrap().appointments, vec!["R1".to_string()]);

        let act = net.perform_appointment("R1").unwrap();
        assert_eq!(act.kind, ActKind::Consultation);
        assert!(act.performed);
        assert_eq!(net.appointment("R1").unwrap().status, AppointmentStatus::Performed);
        assert_eq!(net.record(NSS).unwrap().history().len(), 1);

        assert_eq!(net.perform_appointment("R1").unwrap_err(), HospitalError::NotScheduled);
    }

    #[test]
    fn test_create_rejects_center_outside_region() {
        let mut net = network();
        let err = net
            .create_appointment(booking("R1", slot(10, 9), "CH Rouen", ActKind::Consultation, &["paul@h.fr"]))
            .unwrap_err();
        assert_eq!(err, HospitalError::CenterOutsideRegion);
    }

    #[test]
    fn test_create_rejects_unattached_or_unavailable_staff() {
        let mut net = network();
        let err = net
            .create_appointment(booking("R1", slot(10, 9), "CH Mantes", ActKind::Care, &["lea@h.fr"]))
            .unwrap_err();
        assert_eq!(
            err,
            HospitalError::StaffNotAttached {
                center: "CH Mantes".to_string(),
                staff: "Lea Test".to_string(),
            }
        );

        // Paul is attached to Mantes but on duty in Versailles
        let err = net
            .create_appointment(booking("R1", slot(10, 9), "CH Mantes", ActKind::Consultation, &["paul@h.fr"]))
            .unwrap_err();
        assert_eq!(
            err,
            HospitalError::StaffUnavailable {
                center: "CH Mantes".to_string(),
                staff: "Paul Test".to_string(),
            }
        );
    }

    #[test]
    fn test_create_checks_team_and_duplicates() {
        let mut net = network();
        let err = net
            .create_appointment(booking("R1", slot(10, 9), "CH Versailles", ActKind::Surgery, &["nora@h.fr"]))
            .unwrap_err();
        assert_eq!(err, HospitalError::AppointmentTeam(TeamError::SurgeryIncomplete));

        let err = net
            .create_appointment(booking("R1", slot(10, 9), "CH Versailles", ActKind::Care, &[]))
            .unwrap_err();
        assert_eq!(err, HospitalError::AppointmentTeam(TeamError::Empty));

        net.create_appointment(booking("R1", slot(10, 9), "CH Versailles", ActKind::Care, &["lea@h.fr"]))
            .unwrap();
        let err = net
            .create_appointment(booking("R1", slot(11, 9), "CH Versailles", ActKind::Care, &["lea@h.fr"]))
            .unwrap_err();
        assert_eq!(err, HospitalError::duplicate("Appointment", "R1"));
    }

    #[test]
    fn test_conflicts_in_same_slot() {
        let mut net = network();
        net.create_appointment(booking("R1", slot(10, 9), "CH Versailles", ActKind::Consultation, &["paul@h.fr"]))
            .unwrap();

        // patient, other act kind, same slot
        let err = net
            .create_appointment(booking("R2", slot(10, 9), "CH Versailles", ActKind::Care, &["lea@h.fr"]))
            .unwrap_err();
        assert_eq!(err, HospitalError::PatientConflict);

        // same staff, same slot
        let err = net
            .create_appointment(booking("R3", slot(10, 9), "CH Versailles", ActKind::Consultation, &["paul@h.fr"]))
            .unwrap_err();
        assert_eq!(err, HospitalError::StaffConflict);

        // cancelled appointments free the slot
        net.cancel_by_staff("R1", "paul@h.fr").unwrap();
        net.create_appointment(booking("R2", slot(10, 9), "CH Versailles", ActKind::Care, &["lea@h.fr"]))
            .unwrap();
    }

    #[test]
    fn test_same_act_kind_in_same_slot_with_other_staff() {
        let mut net = network();
        net.add_staff(
            new_staff(StaffKind::Nurse, "Zoe", "zoe@h.fr"),
            &names(&["CH Versailles"]),
            None,
        )
        .unwrap();
        net.create_appointment(booking("R1", slot(10, 9), "CH Versailles", ActKind::Care, &["lea@h.fr"]))
            .unwrap();

        net.create_appointment(booking("R2", slot(10, 9), "CH Versailles", ActKind::Care, &["zoe@h.fr"]))
            .unwrap();
        assert_eq!(net.patient(NSS).unwrap().appointments, names(&["R1", "R2"]));
    }

    #[test]
    fn test_padded_keys_are_stored_trimmed() {
        let mut net = network();
        net.add_staff(
            new_staff(StaffKind::Nurse, "Zoe", " zoe@h.fr "),
            &names(&[" CH Versailles ", "CH Mantes  "]),
            Some(" CH Mantes"),
        )
        .unwrap();
        let zoe = net.staff_member("zoe@h.fr").unwrap();
        assert_eq!(zoe.centers, names(&["CH Versailles", "CH Mantes"]));
        assert_eq!(zoe.available_at.as_deref(), Some("CH Mantes"));
        assert!(net.center("CH Versailles").unwrap().has_staff("zoe@h.fr"));
        assert_eq!(net.center_roster("CH Mantes").unwrap().len(), 4);

        net.attach_staff(" lea@h.fr", &names(&[" CH Mantes "])).unwrap();
        assert!(net.center("CH Mantes").unwrap().has_staff("lea@h.fr"));
        net.set_availability("lea@h.fr ", Some(" CH Mantes ")).unwrap();
        assert_eq!(net.staff_member("lea@h.fr").unwrap().available_at.as_deref(), Some("CH Mantes"));

        let appointment = net
            .create_appointment(NewAppointment {
                id: " R1 ".to_string(),
                scheduled_at: slot(10, 9),
                patient: format!(" {NSS} "),
                center: " CH Mantes ".to_string(),
                kind: ActKind::Care,
                staff: names(&[" iris@h.fr "]),
            })
            .unwrap();
        assert_eq!(appointment.patient, NSS);
        assert_eq!(appointment.center, "CH Mantes");
        assert_eq!(appointment.staff, names(&["iris@h.fr"]));
        assert_eq!(net.patient(NSS).unwrap().appointments, names(&["R1"]));

        net.reschedule_appointment(" R1", slot(10, 9)).unwrap();
        net.cancel_by_patient("R1 ", &format!(" {NSS}"), slot(1, 9)).unwrap();
        assert_eq!(net.appointment("R1").unwrap().status, AppointmentStatus::Cancelled);

        net.transfer_patient(&format!("{NSS} "), " CH Mantes ", slot(11, 9)).unwrap();
        assert_eq!(net.patient(NSS).unwrap().current_center, "CH Mantes");
    }

    #[test]
    fn test_reschedule_rechecks_conflicts_excluding_itself() {
        let mut net = network();
        net.create_appointment(booking("R1", slot(10, 9), "CH Versailles", ActKind::Consultation, &["paul@h.fr"]))
            .unwrap();
        net.create_appointment(booking("R2", slot(10, 11), "CH Versailles", ActKind::Care, &["lea@h.fr"]))
            .unwrap();

        // same slot as itself is fine
        net.reschedule_appointment("R1", slot(10, 9)).unwrap();

        assert_eq!(
            net.reschedule_appointment("R1", slot(10, 11)).unwrap_err(),
            HospitalError::PatientConflict
        );

        net.reschedule_appointment("R1", slot(12, 9)).unwrap();
        assert_eq!(net.appointment("R1").unwrap().scheduled_at, slot(12, 9));
    }

    #[test]
    fn test_cancel_by_patient_rules() {
        let mut net = network();
        net.create_appointment(booking("R1", slot(10, 9), "CH Versailles", ActKind::Consultation, &["paul@h.fr"]))
            .unwrap();

        assert_eq!(
            net.cancel_by_patient("R1", "000", slot(1, 9)).unwrap_err(),
            HospitalError::unknown("patient", "000")
        );
        assert_eq!(
            net.cancel_by_patient("R9", NSS, slot(1, 9)).unwrap_err(),
            HospitalError::unknown("appointment", "R9")
        );
        assert_eq!(
            net.cancel_by_patient("R1", NSS, slot(10, 9) - Duration::hours(2)).unwrap_err(),
            HospitalError::LateCancellation
        );

        net.cancel_by_patient("R1", NSS, slot(1, 9)).unwrap();
        assert_eq!(net.appointment("R1").unwrap().status, AppointmentStatus::Cancelled);
    }

    #[test]
    fn test_cancel_by_patient_checks_ownership() {
        let mut net = network();
        net.add_patient(NewPatient {
            last_name: "Roy".to_string(),
            first_name: "Marc".to_string(),
            birth_date: NaiveDate::from_ymd_opt(1970, 2, 2).unwrap(),
            nss: "1700202000111".to_string(),
            insurance_number: None,
            address: "1 rue".to_string(),
            phone: "0".to_string(),
            email: "marc@example.com".to_string(),
            city: "Versailles (78000)".to_string(),
            region: "Ile-de-France".to_string(),
            center: "CH Versailles".to_string(),
        })
        .unwrap();
        net.create_appointment(booking("R1", slot(10, 9), "CH Versailles", ActKind::Consultation, &["paul@h.fr"]))
            .unwrap();

        let err = net.cancel_by_patient("R1", "1700202000111", slot(1, 9)).unwrap_err();
        assert_eq!(
            err,
            HospitalError::NotPatientsAppointment {
                appointment: "R1".to_string(),
                patient: "1700202000111".to_string(),
            }
        );
    }

    #[test]
    fn test_capacity() {
        let mut net = network();
        net.add_staff(
            new_staff(StaffKind::Nurse, "Zoe", "zoe@h.fr"),
            &names(&["CH Versailles"]),
            None,
        )
        .unwrap();

        let at = slot(10, 9);
        assert_eq!(net.available_capacity(at, "CH Versailles", ActKind::Consultation).unwrap(), 1);
        assert_eq!(net.available_capacity(at, "CH Versailles", ActKind::Care).unwrap(), 2);
        assert_eq!(net.available_capacity(at, "CH Versailles", ActKind::Surgery).unwrap(), 1);
        // nobody is on duty in Mantes except Iris
        assert_eq!(net.available_capacity(at, "CH Mantes", ActKind::Surgery).unwrap(), 0);

        net.create_appointment(booking("R1", at, "CH Versailles", ActKind::Surgery, &["nora@h.fr", "lea@h.fr"]))
            .unwrap();
        assert_eq!(net.available_capacity(at, "CH Versailles", ActKind::Care).unwrap(), 1);
        assert_eq!(net.available_capacity(at, "CH Versailles", ActKind::Surgery).unwrap(), 0);
        // other slots are unaffected
        assert_eq!(net.available_capacity(slot(10, 10), "CH Versailles", ActKind::Surgery).unwrap(), 1);

        assert_eq!(
            net.available_capacity(at, "CH Lyon", ActKind::Care).unwrap_err(),
            HospitalError::unknown("center", "CH Lyon")
        );
    }

    #[test]
    fn test_available_acts() {
        let net = HospitalNetwork::new();
        assert_eq!(net.available_acts().len(), 3);
    }
}
