pub mod zonefile;

use thiserror::Error;

use crate::models::Zone;

pub use zonefile::ZoneFileCodec;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// Scanner error, prefixed with its line and column.
    #[error("{0}")]
    Syntax(String),

    #[error("unsupported record type {0}")]
    UnsupportedType(String),

    #[error("$INCLUDE {0} is not supported")]
    Include(String),

    #[error("the zone has more than one SOA record")]
    DuplicateSoa,

    #[error("{value:?} cannot be written to a zone file: {reason}")]
    Unrepresentable { value: String, reason: String },
}

/// Converts between zone-file text and the structured zone model.
pub trait ZoneCodec: Send + Sync {
    fn parse(&self, text: &str) -> Result<Zone, CodecError>;

    fn serialize(&self, zone: &Zone) -> Result<String, CodecError>;
}
