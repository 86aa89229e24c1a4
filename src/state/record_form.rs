use thiserror::Error;

use crate::models::{Record, RecordData, RecordType};
use crate::validation::{FieldId, FieldKind, Form, FormField};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DraftError {
    #[error("MX preference must be a number between 0 and 65535, got {0:?}")]
    InvalidPreference(String),

    #[error("TTL must be a whole number of seconds, got {0:?}")]
    InvalidTtl(String),
}

/// The add-record form for one record type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordForm {
    record_type: RecordType,
    form: Form,
}

fn layout(record_type: RecordType) -> Vec<FormField> {
    let value_fields: Vec<(FieldId, FieldKind)> = match record_type {
        RecordType::NS => vec![(FieldId::Host, FieldKind::Nameserver)],
        RecordType::A => vec![(FieldId::Ip, FieldKind::Ipv4)],
        RecordType::AAAA => vec![(FieldId::Ip, FieldKind::Ipv6)],
        RecordType::CNAME => vec![(FieldId::Alias, FieldKind::Hostname)],
        RecordType::MX => vec![
            (FieldId::Preference, FieldKind::Priority),
            (FieldId::Host, FieldKind::Hostname),
        ],
        RecordType::TXT => vec![(FieldId::Txt, FieldKind::Text)],
        RecordType::SRV => vec![(FieldId::Value, FieldKind::Text)],
    };

    std::iter::once((FieldId::Name, FieldKind::Hostname))
        .chain(value_fields)
        .chain(std::iter::once((FieldId::Ttl, FieldKind::Ttl)))
        .map(|(id, kind)| FormField::new(id, kind))
        .collect()
}

impl RecordForm {
    pub fn new(record_type: RecordType) -> Self {
        Self {
            record_type,
            form: Form::new(layout(record_type)),
        }
    }

    pub fn record_type(&self) -> RecordType {
        self.record_type
    }

    pub fn form(&self) -> &Form {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut Form {
        &mut self.form
    }

    /// Switches to another record type, carrying over name and TTL.
    pub fn switch_type(&mut self, record_type: RecordType) {
        if record_type == self.record_type {
            return;
        }
        let mut next = Self::new(record_type);
        for id in [FieldId::Name, FieldId::Ttl] {
            let value = self.form.value(id);
            if !value.is_empty() {
                next.form.set_value(id, value);
            }
        }
        *self = next;
    }

    /// Same record type and same text in every field; focus and highlighting
    /// are ignored.
    pub fn same_input(&self, other: &RecordForm) -> bool {
        self.record_type == other.record_type
            && self
                .form
                .fields()
                .iter()
                .map(|field| &field.value)
                .eq(other.form.fields().iter().map(|field| &field.value))
    }

    /// Builds the record the form describes. Only meaningful once the form
    /// gate is open; the MX preference is coerced to a number here.
    pub fn to_record(&self) -> Result<Record, DraftError> {
        let value = |id| self.form.value(id).to_string();

        let ttl_raw = self.form.value(FieldId::Ttl);
        let ttl = if ttl_raw.is_empty() {
            None
        } else {
            Some(
                ttl_raw
                    .parse()
                    .map_err(|_| DraftError::InvalidTtl(ttl_raw.to_string()))?,
            )
        };

        let data = match self.record_type {
            RecordType::NS => RecordData::Ns { host: value(FieldId::Host) },
            RecordType::A => RecordData::A { ip: value(FieldId::Ip) },
            RecordType::AAAA => RecordData::Aaaa { ip: value(FieldId::Ip) },
            RecordType::CNAME => RecordData::Cname { alias: value(FieldId::Alias) },
            RecordType::MX => {
                let preference = self.form.value(FieldId::Preference);
                RecordData::Mx {
                    preference: preference
                        .trim()
                        .parse()
                        .map_err(|_| DraftError::InvalidPreference(preference.to_string()))?,
                    host: value(FieldId::Host),
                }
            }
            RecordType::TXT => RecordData::Txt { txt: value(FieldId::Txt) },
            RecordType::SRV => RecordData::Srv {
                value: self
                    .form
                    .value(FieldId::Value)
                    .split_whitespace()
                    .collect::<Vec<_>>()
                    .join(" "),
            },
        };

        Ok(Record::new(Some(value(FieldId::Name)), ttl, data))
    }
}

impl Default for RecordForm {
    fn default() -> Self {
        Self::new(RecordType::A)
    }
}
