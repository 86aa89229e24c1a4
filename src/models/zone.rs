use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Owner name that stands for the zone apex.
pub const APEX: &str = "@";

/// Record types the editor manages. The declaration order is the display
/// order of the zone table and of serialized zone text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RecordType {
    NS,
    A,
    AAAA,
    CNAME,
    MX,
    TXT,
    SRV,
}

impl RecordType {
    pub const ALL: [RecordType; 7] = [
        RecordType::NS,
        RecordType::A,
        RecordType::AAAA,
        RecordType::CNAME,
        RecordType::MX,
        RecordType::TXT,
        RecordType::SRV,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RecordType::NS => "NS",
            RecordType::A => "A",
            RecordType::AAAA => "AAAA",
            RecordType::CNAME => "CNAME",
            RecordType::MX => "MX",
            RecordType::TXT => "TXT",
            RecordType::SRV => "SRV",
        }
    }

    /// The type following `self` in display order, wrapping around.
    pub fn next(&self) -> Self {
        let idx = Self::ALL.iter().position(|t| t == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    pub fn previous(&self) -> Self {
        let idx = Self::ALL.iter().position(|t| t == self).unwrap_or(0);
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

impl std::fmt::Display for RecordType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for RecordType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "NS" => Ok(RecordType::NS),
            "A" => Ok(RecordType::A),
            "AAAA" => Ok(RecordType::AAAA),
            "CNAME" => Ok(RecordType::CNAME),
            "MX" => Ok(RecordType::MX),
            "TXT" => Ok(RecordType::TXT),
            "SRV" => Ok(RecordType::SRV),
            _ => Err(format!("Unsupported record type: {}", s)),
        }
    }
}

/// Type-specific part of a resource record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecordData {
    Ns { host: String },
    A { ip: String },
    Aaaa { ip: String },
    Cname { alias: String },
    Mx { preference: u16, host: String },
    Txt { txt: String },
    /// Kept verbatim: priority, weight, port and target as written.
    Srv { value: String },
}

impl RecordData {
    pub fn record_type(&self) -> RecordType {
        match self {
            RecordData::Ns { .. } => RecordType::NS,
            RecordData::A { .. } => RecordType::A,
            RecordData::Aaaa { .. } => RecordType::AAAA,
            RecordData::Cname { .. } => RecordType::CNAME,
            RecordData::Mx { .. } => RecordType::MX,
            RecordData::Txt { .. } => RecordType::TXT,
            RecordData::Srv { .. } => RecordType::SRV,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Owner name relative to the apex. `None` is the apex and is written
    /// as `@`.
    pub name: Option<String>,
    /// Falls back to the zone's default TTL when absent.
    pub ttl: Option<u32>,
    pub data: RecordData,
}

impl Record {
    pub fn new(name: Option<String>, ttl: Option<u32>, data: RecordData) -> Self {
        Self { name, ttl, data }
    }

    pub fn record_type(&self) -> RecordType {
        self.data.record_type()
    }

    /// An absent owner is treated as the apex.
    pub fn is_apex(&self) -> bool {
        match self.name.as_deref() {
            None => true,
            Some(name) => name == APEX,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Soa {
    pub name: Option<String>,
    pub ttl: Option<u32>,
    pub mname: String,
    pub rname: String,
    pub serial: u32,
    pub refresh: u32,
    pub retry: u32,
    pub expire: u32,
    pub minimum: u32,
}

impl Soa {
    /// First label of the primary nameserver, e.g. `ns1` for `ns1.example.com.`
    pub fn primary_label(&self) -> &str {
        self.mname.split('.').next().unwrap_or_default()
    }

    /// Moves the serial to `now`, or one past the current serial when that
    /// is already at or beyond `now`.
    pub fn bump_serial(&mut self, now: u32) {
        self.serial = now.max(self.serial.saturating_add(1));
    }
}

/// In-memory model of one zone file.
///
/// Records are grouped by type; within a type, insertion order is kept and
/// is the only order that matters. A type never maps to an empty sequence,
/// so two zones holding the same records always compare equal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Zone {
    /// Absolute apex name, e.g. `example.com.`
    pub origin: Option<String>,
    /// TTL of records that carry none of their own.
    pub ttl: Option<u32>,
    pub soa: Option<Soa>,
    records: BTreeMap<RecordType, Vec<Record>>,
}

impl Zone {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self, record_type: RecordType) -> &[Record] {
        self.records
            .get(&record_type)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// All records in display order: by type, then by insertion.
    pub fn iter(&self) -> impl Iterator<Item = &Record> {
        RecordType::ALL
            .iter()
            .flat_map(move |record_type| self.records(*record_type).iter())
    }

    pub fn len(&self) -> usize {
        self.records.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Appends `record` to the end of its type's sequence.
    pub fn push(&mut self, record: Record) {
        self.records
            .entry(record.record_type())
            .or_default()
            .push(record);
    }

    /// Removes the record at `index` within its type's sequence.
    pub fn remove(&mut self, record_type: RecordType, index: usize) -> Option<Record> {
        let records = self.records.get_mut(&record_type)?;
        if index >= records.len() {
            return None;
        }
        let removed = records.remove(index);
        if records.is_empty() {
            self.records.remove(&record_type);
        }
        Some(removed)
    }
}

/// Fully qualified form of an owner name as typed into a form.
///
/// Empty input previews as nothing, `@` as the origin itself, a trailing dot
/// marks the name as already absolute.
pub fn qualified_name(name: &str, origin: &str) -> String {
    if name.is_empty() {
        String::new()
    } else if name == APEX {
        origin.to_string()
    } else if name.ends_with('.') {
        name.to_string()
    } else {
        format!("{}.{}", name, origin)
    }
}
