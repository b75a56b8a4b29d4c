// 🎬 Demonstration - a small two-region network and a scripted walk through it
//
// `seed_network` is also what `--seed` pre-loads into the terminal UI.

use chrono::{Duration, NaiveDate, NaiveDateTime};
use tracing::info;

use crate::entities::{ActKind, NewAppointment, NewPatient, NewStaff, StaffKind};
use crate::error::HospitalResult;
use crate::network::HospitalNetwork;

pub const DEMO_PATIENT: &str = "2980412756012";

pub const DOCTOR: &str = "paul.martin@hopital.fr";
pub const SURGEON: &str = "nora.benali@hopital.fr";
pub const NURSE_VERSAILLES: &str = "lea.petit@hopital.fr";
pub const NURSE_MANTES: &str = "iris.moreau@hopital.fr";
pub const NURSE_ROUEN: &str = "hugo.leroy@hopital.fr";

const VERSAILLES: &str = "CH Versailles";
const MANTES: &str = "CH Mantes-la-Jolie";
const ROUEN: &str = "CHU Rouen";

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

fn staff(
    kind: StaffKind,
    first_name: &str,
    last_name: &str,
    email: &str,
    birth: NaiveDate,
    start: NaiveDate,
) -> NewStaff {
    NewStaff {
        kind,
        last_name: last_name.to_string(),
        first_name: first_name.to_string(),
        birth_date: birth,
        start_date: start,
        contract: "CDI".to_string(),
        phone: "0600000000".to_string(),
        email: email.to_string(),
    }
}

/// Build the sample network into `net`
pub fn seed_network(net: &mut HospitalNetwork) -> HospitalResult<()> {
    net.add_region("Ile-de-France")?;
    net.add_region("Normandie")?;
    net.add_department("78", "Ile-de-France")?;
    net.add_department("76", "Normandie")?;

    let versailles = net.add_city("Versailles", "78000", "78")?;
    let mantes = net.add_city("Mantes-la-Jolie", "78200", "78")?;
    let rouen = net.add_city("Rouen", "76000", "76")?;

    net.add_center(VERSAILLES, &versailles)?;
    net.add_center(MANTES, &mantes)?;
    net.add_center(ROUEN, &rouen)?;

    let both = [VERSAILLES.to_string(), MANTES.to_string()];
    let start = date(2015, 9, 1);
    net.add_staff(
        staff(StaffKind::Doctor, "Paul", "Martin", DOCTOR, date(1978, 5, 14), start),
        &both,
        Some(VERSAILLES),
    )?;
    net.add_staff(
        staff(StaffKind::Surgeon, "Nora", "Benali", SURGEON, date(1982, 11, 3), start),
        &both,
        Some(VERSAILLES),
    )?;
    net.add_staff(
        staff(StaffKind::Nurse, "Lea", "Petit", NURSE_VERSAILLES, date(1990, 2, 20), start),
        &[VERSAILLES.to_string()],
        None,
    )?;
    net.add_staff(
        staff(StaffKind::Nurse, "Iris", "Moreau", NURSE_MANTES, date(1988, 7, 9), start),
        &[MANTES.to_string()],
        None,
    )?;
    net.add_staff(
        staff(StaffKind::Nurse, "Hugo", "Leroy", NURSE_ROUEN, date(1993, 1, 30), start),
        &[ROUEN.to_string()],
        None,
    )?;

    net.add_patient(NewPatient {
        last_name: "Durand".to_string(),
        first_name: "Alice".to_string(),
        birth_date: date(1998, 4, 12),
        nss: DEMO_PATIENT.to_string(),
        insurance_number: Some("MUT-445566".to_string()),
        address: "12 rue des Fleurs".to_string(),
        phone: "0601020304".to_string(),
        email: "alice.durand@example.com".to_string(),
        city: versailles,
        region: "Ile-de-France".to_string(),
        center: VERSAILLES.to_string(),
    })?;

    info!("demonstration network seeded");
    Ok(())
}

fn booking(id: &str, at: NaiveDateTime, center: &str, kind: ActKind, staff: &[&str]) -> NewAppointment {
    NewAppointment {
        id: id.to_string(),
        scheduled_at: at,
        patient: DEMO_PATIENT.to_string(),
        center: center.to_string(),
        kind,
        staff: staff.iter().map(|s| s.to_string()).collect(),
    }
}

/// Log a step that must be refused; an acceptance is reported too
fn refused<T>(lines: &mut Vec<String>, step: &str, result: HospitalResult<T>) {
    match result {
        Ok(_) => lines.push(format!("{}: accepted", step)),
        Err(err) => lines.push(format!("{}: refused ({})", step, err)),
    }
}

/// Walk the seeded network through a typical patient journey and return a
/// line-per-step report. `now` anchors every scheduled time.
pub fn run_scenario(net: &mut HospitalNetwork, now: NaiveDateTime) -> HospitalResult<Vec<String>> {
    let mut lines = Vec::new();

    let first = now + Duration::days(3);
    net.create_appointment(booking("RDV-DEMO-1", first, VERSAILLES, ActKind::Consultation, &[DOCTOR]))?;
    let act = net.perform_appointment("RDV-DEMO-1")?;
    lines.push(format!(
        "Consultation performed in {} by {}",
        act.center,
        act.participant_names()
    ));

    refused(
        &mut lines,
        "Booking in Rouen",
        net.create_appointment(booking(
            "RDV-DEMO-2",
            now + Duration::days(4),
            ROUEN,
            ActKind::Care,
            &[NURSE_ROUEN],
        )),
    );

    net.transfer_patient(DEMO_PATIENT, MANTES, now + Duration::days(5))?;
    lines.push(format!("Record transferred to {}", MANTES));

    net.set_availability(DOCTOR, Some(MANTES))?;
    net.set_availability(SURGEON, Some(MANTES))?;
    lines.push(format!("Doctor and surgeon now on duty in {}", MANTES));

    refused(
        &mut lines,
        "Booking in Versailles",
        net.create_appointment(booking(
            "RDV-DEMO-3",
            now + Duration::days(7),
            VERSAILLES,
            ActKind::Consultation,
            &[DOCTOR],
        )),
    );

    net.create_appointment(booking(
        "RDV-DEMO-4",
        now + Duration::days(6),
        MANTES,
        ActKind::Surgery,
        &[SURGEON, NURSE_MANTES],
    ))?;
    let act = net.perform_appointment("RDV-DEMO-4")?;
    lines.push(format!(
        "Surgery performed in {} by {}",
        act.center,
        act.participant_names()
    ));

    let patient = net.patient(DEMO_PATIENT)?;
    lines.push(String::new());
    lines.push(format!("Patient: {}", patient.full_name()));
    lines.push(format!("Region: {}", patient.region));
    lines.push(format!("Current center: {}", patient.current_center));
    lines.push(format!("Transfers: {}", patient.record.transfers.len()));
    lines.push(format!("Acts: {}", patient.record.acts.len()));

    let capacity = net.available_capacity(now + Duration::days(8), MANTES, ActKind::Consultation)?;
    lines.push(format!("Consultation capacity in {}: {}", MANTES, capacity));

    Ok(lines)
}
