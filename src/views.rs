// 📄 State Views - text summaries of the network, one per tab
//
// Everything is sorted by key (the network stores BTreeMaps), one entity
// per line, so the UI can drop the lines straight into a Paragraph.

use crate::entities::ActKind;
use crate::error::HospitalResult;
use crate::forms::DATETIME_FORMAT;
use crate::network::HospitalNetwork;
use crate::shell::Tab;

pub fn tab_summary(net: &HospitalNetwork, tab: Tab) -> Vec<String> {
    match tab {
        Tab::Setup => setup_summary(net),
        Tab::Staff => staff_summary(net),
        Tab::Patients => patient_summary(net),
        Tab::Appointments => appointment_summary(net),
        Tab::Records => record_summary(net),
    }
}

/// Push `- item` lines, or `- none` when empty
fn section<I: IntoIterator<Item = String>>(lines: &mut Vec<String>, title: &str, items: I) {
    lines.push(format!("{}:", title));
    let start = lines.len();
    lines.extend(items.into_iter().map(|item| format!("- {}", item)));
    if lines.len() == start {
        lines.push("- none".to_string());
    }
}

pub fn setup_summary(net: &HospitalNetwork) -> Vec<String> {
    let mut lines = Vec::new();

    section(&mut lines, "Regions", net.regions().map(|r| r.name.clone()));
    lines.push(String::new());

    section(
        &mut lines,
        "Departments",
        net.departments().map(|d| {
            let region = net
                .department_region(&d.code)
                .map(|r| r.name.as_str())
                .unwrap_or("-");
            format!("{} (region={})", d.code, region)
        }),
    );
    lines.push(String::new());

    section(&mut lines, "Cities", net.cities().map(|c| c.key()));
    lines.push(String::new());

    section(
        &mut lines,
        "Centers",
        net.centers()
            .map(|c| format!("{} ({}) staff={}", c.name, c.city, c.staff.len())),
    );

    lines
}

pub fn staff_summary(net: &HospitalNetwork) -> Vec<String> {
    let lines: Vec<String> = net
        .staff()
        .map(|s| {
            let mut centers = s.centers.clone();
            centers.sort();
            let centers = if centers.is_empty() {
                "-".to_string()
            } else {
                centers.join(", ")
            };
            format!(
                "{} | {} | {} | centers=[{}] | active={}",
                s.kind.as_str(),
                s.full_name(),
                s.email,
                centers,
                s.available_at.as_deref().unwrap_or("-")
            )
        })
        .collect();

    if lines.is_empty() {
        return vec!["No staff.".to_string()];
    }
    lines
}

pub fn patient_summary(net: &HospitalNetwork) -> Vec<String> {
    let lines: Vec<String> = net
        .patients()
        .map(|p| {
            format!(
                "{} | nss={} | region={} | center={}",
                p.full_name(),
                p.nss,
                p.region,
                p.current_center
            )
        })
        .collect();

    if lines.is_empty() {
        return vec!["No patients.".to_string()];
    }
    lines
}

pub fn appointment_summary(net: &HospitalNetwork) -> Vec<String> {
    let acts: Vec<&str> = net.available_acts().iter().map(ActKind::as_str).collect();
    let mut lines = vec![format!("Available acts: {}", acts.join(", ")), String::new()];

    let before = lines.len();
    for a in net.appointments() {
        let staff: Vec<String> = a
            .staff
            .iter()
            .map(|email| {
                net.staff_member(email)
                    .map(|s| s.full_name())
                    .unwrap_or_else(|_| email.clone())
            })
            .collect();
        lines.push(format!(
            "{} | {} | {} | patient={} | center={} | status={} | staff=[{}]",
            a.id,
            a.scheduled_at.format(DATETIME_FORMAT),
            a.kind.as_str(),
            a.patient,
            a.center,
            a.status.as_str(),
            staff.join(", ")
        ));
    }
    if lines.len() == before {
        lines.push("No appointments.".to_string());
    }
    lines
}

pub fn record_summary(net: &HospitalNetwork) -> Vec<String> {
    let lines: Vec<String> = net
        .patients()
        .map(|p| {
            format!(
                "{} | {} | acts={} | transfers={}",
                p.record.number,
                p.full_name(),
                p.record.acts.len(),
                p.record.transfers.len()
            )
        })
        .collect();

    if lines.is_empty() {
        return vec!["No records.".to_string()];
    }
    lines
}

/// Read-only display of one patient's record: header, acts, transfers
pub fn record_report(net: &HospitalNetwork, nss: &str) -> HospitalResult<Vec<String>> {
    let patient = net.patient(nss)?;
    let record = &patient.record;

    let mut lines = vec![
        format!("Patient: {} ({})", patient.full_name(), patient.nss),
        format!("Record: {}", record.number),
        format!("Reference center: {}", record.reference_center),
        String::new(),
    ];

    section(
        &mut lines,
        "Acts",
        record.history().iter().map(|act| {
            format!(
                "{} | {} | center={} | staff={}",
                act.performed_at.format(DATETIME_FORMAT),
                act.kind.as_str(),
                act.center,
                act.participant_names()
            )
        }),
    );
    lines.push(String::new());

    section(
        &mut lines,
        "Transfers",
        record.transfers.iter().map(|t| {
            format!(
                "{} | {} -> {}",
                t.transferred_at.format(DATETIME_FORMAT),
                t.from_center,
                t.to_center
            )
        }),
    );

    Ok(lines)
}
