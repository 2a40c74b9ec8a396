use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Deserializer};
use std::io::Read;

use crate::reporting::sales::domain::{Direction, RawLead};
use crate::reporting::sales::normalize_role;

pub(crate) fn parse_rows<R: Read>(reader: R) -> Result<Vec<RawLead>, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut rows = Vec::new();

    for record in csv_reader.deserialize::<LeadRow>() {
        rows.push(record?.into_raw_lead());
    }

    Ok(rows)
}

/// One row of the lead tracker export, with the tracker's Spanish column
/// headers. Every cell except the name may be blank.
#[derive(Debug, Deserialize)]
struct LeadRow {
    #[serde(rename = "nombre_lead")]
    name: String,
    #[serde(rename = "setter", default, deserialize_with = "empty_string_as_none")]
    setter: Option<String>,
    #[serde(rename = "closer", default, deserialize_with = "empty_string_as_none")]
    closer: Option<String>,
    #[serde(rename = "procedencia", default, deserialize_with = "empty_string_as_none")]
    channel: Option<String>,
    #[serde(rename = "inb_out", default, deserialize_with = "empty_string_as_none")]
    direction: Option<String>,
    #[serde(rename = "dia_agenda", default, deserialize_with = "empty_string_as_none")]
    scheduled: Option<String>,
    #[serde(rename = "dia_llamada", default, deserialize_with = "empty_string_as_none")]
    called: Option<String>,
    #[serde(rename = "estado_lead", default, deserialize_with = "empty_string_as_none")]
    status: Option<String>,
    #[serde(rename = "presentado", default, deserialize_with = "empty_string_as_none")]
    presented: Option<String>,
    #[serde(rename = "cierre", default, deserialize_with = "empty_string_as_none")]
    closed: Option<String>,
    #[serde(rename = "pago", default, deserialize_with = "empty_string_as_none")]
    payment: Option<String>,
    #[serde(rename = "telefono", default, deserialize_with = "empty_string_as_none")]
    phone: Option<String>,
    #[serde(rename = "perfil_ig", default, deserialize_with = "empty_string_as_none")]
    instagram: Option<String>,
    #[serde(rename = "project", default, deserialize_with = "empty_string_as_none")]
    project: Option<String>,
}

impl LeadRow {
    fn into_raw_lead(self) -> RawLead {
        RawLead {
            person_name: self.name,
            setter_name: self.setter,
            closer_name: self.closer,
            channel: self.channel,
            direction: self.direction.as_deref().and_then(parse_direction),
            scheduled_date: self.scheduled.as_deref().and_then(parse_date),
            call_date: self.called.as_deref().and_then(parse_date),
            status_text: self.status,
            presented_flag: parse_flag(self.presented.as_deref()),
            closed_flag: parse_flag(self.closed.as_deref()),
            payment_text: self.payment,
            project_tag: self.project,
            phone: self.phone,
            instagram: self.instagram,
        }
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

/// The export carries dates either as RFC 3339 timestamps or plain
/// calendar dates; anything else reads as missing.
fn parse_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.naive_utc().date());
    }

    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").ok()
}

/// Boolean cells are hand-edited; accept the spellings the team actually
/// uses ("sí" folds to "si" under role normalization). Unknown text reads
/// as false.
fn parse_flag(value: Option<&str>) -> bool {
    let Some(value) = value else {
        return false;
    };
    matches!(normalize_role(value).as_str(), "true" | "1" | "si" | "yes")
}

fn parse_direction(value: &str) -> Option<Direction> {
    match normalize_role(value).as_str() {
        "inbound" | "inb" | "in" => Some(Direction::Inbound),
        "outbound" | "out" => Some(Direction::Outbound),
        _ => None,
    }
}

#[cfg(test)]
pub(crate) fn parse_date_for_tests(value: &str) -> Option<NaiveDate> {
    parse_date(value)
}

#[cfg(test)]
pub(crate) fn parse_flag_for_tests(value: Option<&str>) -> bool {
    parse_flag(value)
}
