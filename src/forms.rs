// 📝 Form Input Parsing - text typed by the user → typed values
//
// Grammar accepted by the shell:
//   date       YYYY-MM-DD
//   date-time  YYYY-MM-DD HH:MM
//   list       value1,value2,value3   (no quoting, no escaping)
//
// Anything else is an InputError and never reaches the model.

use chrono::{NaiveDate, NaiveDateTime};

use crate::entities::{ActKind, StaffKind};
use crate::error::InputError;

pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M";

/// `#` stands for an ASCII digit, anything else must match literally
fn matches_shape(value: &str, shape: &str) -> bool {
    value.len() == shape.len()
        && value.bytes().zip(shape.bytes()).all(|(v, s)| match s {
            b'#' => v.is_ascii_digit(),
            _ => v == s,
        })
}

pub fn require(field: &'static str, raw: &str) -> Result<String, InputError> {
    let value = raw.trim();
    if value.is_empty() {
        return Err(InputError::MissingField { field });
    }
    Ok(value.to_string())
}

/// Empty input means "not given"
pub fn optional(raw: &str) -> Option<String> {
    let value = raw.trim();
    (!value.is_empty()).then(|| value.to_string())
}

pub fn parse_date(field: &'static str, raw: &str) -> Result<NaiveDate, InputError> {
    let value = raw.trim();
    let invalid = || InputError::InvalidDate {
        field,
        value: value.to_string(),
    };

    if !matches_shape(value, "####-##-##") {
        return Err(invalid());
    }
    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|_| invalid())
}

pub fn parse_datetime(field: &'static str, raw: &str) -> Result<NaiveDateTime, InputError> {
    let value = raw.trim();
    let invalid = || InputError::InvalidDateTime {
        field,
        value: value.to_string(),
    };

    if !matches_shape(value, "####-##-## ##:##") {
        return Err(invalid());
    }
    NaiveDateTime::parse_from_str(value, DATETIME_FORMAT).map_err(|_| invalid())
}

/// Split a comma-separated list. Tokens are trimmed, empty tokens dropped.
pub fn parse_list(field: &'static str, raw: &str) -> Result<Vec<String>, InputError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .quoting(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(raw.as_bytes());

    let mut values = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| InputError::InvalidList {
            field,
            reason: e.to_string(),
        })?;
        values.extend(record.iter().filter(|v| !v.is_empty()).map(str::to_string));
    }
    Ok(values)
}

pub fn parse_staff_kind(field: &'static str, raw: &str) -> Result<StaffKind, InputError> {
    let value = require(field, raw)?;
    StaffKind::from_name(&value).ok_or_else(|| InputError::UnknownChoice {
        field,
        value,
        expected: choices(StaffKind::ALL.iter().map(|k| k.as_str())),
    })
}

pub fn parse_act_kind(field: &'static str, raw: &str) -> Result<ActKind, InputError> {
    let value = require(field, raw)?;
    ActKind::from_name(&value).ok_or_else(|| InputError::UnknownChoice {
        field,
        value,
        expected: choices(ActKind::ALL.iter().map(|k| k.as_str())),
    })
}

fn choices<'a>(names: impl Iterator<Item = &'a str>) -> String {
    names.collect::<Vec<_>>().join(", ")
}
