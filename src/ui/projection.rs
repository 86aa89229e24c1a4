//! Zone model → table rows.
//!
//! Rows are recomputed from scratch on every render. Their `id`s number all
//! records 1..=N across the fixed type order and are only meaningful for the
//! projection they came from.

use std::fmt;

use crate::models::{is_deletable, Record, RecordData, RecordType, Zone};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NameCell {
    Apex,
    Host(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValueCell {
    Plain(String),
    /// MX: preference badge followed by the exchange host.
    Preference { preference: u16, host: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TtlCell {
    Explicit(u32),
    ZoneDefault(u32),
    Unset,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub id: usize,
    pub record_type: RecordType,
    /// Index of the record within its type's sequence.
    pub position: usize,
    pub name: NameCell,
    pub value: ValueCell,
    pub ttl: TtlCell,
    pub deletable: bool,
}

pub fn project(zone: &Zone) -> Vec<Row> {
    let soa = zone.soa.as_ref();
    let mut rows = Vec::with_capacity(zone.len());

    for record_type in RecordType::ALL {
        for (position, record) in zone.records(record_type).iter().enumerate() {
            rows.push(Row {
                id: rows.len() + 1,
                record_type,
                position,
                name: name_cell(record),
                value: value_cell(&record.data),
                ttl: ttl_cell(record.ttl, zone.ttl),
                deletable: is_deletable(record, soa),
            });
        }
    }

    rows
}

/// The row carrying display id `id` of the given type, if any.
pub fn locate(zone: &Zone, record_type: RecordType, id: usize) -> Option<Row> {
    project(zone)
        .into_iter()
        .find(|row| row.id == id && row.record_type == record_type)
}

fn name_cell(record: &Record) -> NameCell {
    match &record.name {
        Some(name) if !record.is_apex() => NameCell::Host(name.clone()),
        _ => NameCell::Apex,
    }
}

fn value_cell(data: &RecordData) -> ValueCell {
    match data {
        RecordData::Ns { host } => ValueCell::Plain(host.clone()),
        RecordData::A { ip } | RecordData::Aaaa { ip } => ValueCell::Plain(ip.clone()),
        RecordData::Cname { alias } => ValueCell::Plain(alias.clone()),
        RecordData::Mx { preference, host } => ValueCell::Preference {
            preference: *preference,
            host: host.clone(),
        },
        RecordData::Txt { txt } => ValueCell::Plain(txt.clone()),
        RecordData::Srv { value } => ValueCell::Plain(value.clone()),
    }
}

fn ttl_cell(ttl: Option<u32>, zone_ttl: Option<u32>) -> TtlCell {
    match (ttl, zone_ttl) {
        (Some(ttl), _) => TtlCell::Explicit(ttl),
        (None, Some(default)) => TtlCell::ZoneDefault(default),
        (None, None) => TtlCell::Unset,
    }
}

impl fmt::Display for NameCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NameCell::Apex => f.write_str(crate::models::APEX),
            NameCell::Host(name) => f.write_str(name),
        }
    }
}

impl fmt::Display for ValueCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueCell::Plain(value) => f.write_str(value),
            ValueCell::Preference { preference, host } => write!(f, "[{}] {}", preference, host),
        }
    }
}

impl fmt::Display for TtlCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TtlCell::Explicit(ttl) => write!(f, "{}", ttl),
            TtlCell::ZoneDefault(ttl) => write!(f, "{} (default)", ttl),
            TtlCell::Unset => Ok(()),
        }
    }
}
