//! Zone edits: validate, copy, apply, persist, then commit or discard.
//!
//! All speculative work happens on a deep copy of the current zone. The copy
//! only becomes the current zone through [`AppState::commit`], after the
//! server accepted its text; on any failure it is dropped and the current
//! zone is left as it was.
//!
//! Two edits started back to back are not coordinated: each works from the
//! zone current at its start, and whichever commits last wins.
//!
//! The committed zone is the candidate as its own text reads back, so the
//! current zone always equals `parse(zone_text)`.
//!
//! [`AppState::commit`]: super::AppState::commit

use chrono::{DateTime, Utc};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::api::{PersistError, ZoneStore};
use crate::codec::{CodecError, ZoneCodec};
use crate::models::{Record, RecordType, Zone};
use crate::ui::projection::locate;
use crate::validation::evaluate;

use super::record_form::{DraftError, RecordForm};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Change {
    Add(Record),
    /// Remove the record shown under `display_id` in the current table.
    Remove {
        record_type: RecordType,
        display_id: usize,
    },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MutationError {
    #[error("The form has invalid fields")]
    InvalidForm,

    #[error(transparent)]
    Draft(#[from] DraftError),

    #[error("No {record_type} record #{display_id} in the current view")]
    UnknownRecord {
        record_type: RecordType,
        display_id: usize,
    },

    #[error("This {0} record is needed for the zone's own delegation")]
    Protected(RecordType),

    #[error(transparent)]
    Codec(#[from] CodecError),

    #[error(transparent)]
    Persist(#[from] PersistError),
}

impl MutationError {
    /// True when nothing was sent to the server.
    pub fn is_skipped(&self) -> bool {
        !matches!(self, MutationError::Persist(_))
    }
}

/// A candidate zone the server accepted, with the text it accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Commit {
    pub zone: Zone,
    pub zone_text: String,
}

/// Gate the add-record form and turn it into a change.
pub fn change_from_form(form: &mut RecordForm) -> Result<Change, MutationError> {
    if !evaluate(form.form_mut()) {
        form.form_mut().touch_all();
        debug!(record_type = %form.record_type(), "submit blocked by invalid fields");
        return Err(MutationError::InvalidForm);
    }
    Ok(Change::Add(form.to_record()?))
}

/// Build the candidate zone for `change` on a deep copy of `current`.
///
/// Any SOA serial is moved forward to `now` (Unix seconds), or past the
/// existing serial if that is already ahead.
pub fn prepare(current: &Zone, change: &Change, now: DateTime<Utc>) -> Result<Zone, MutationError> {
    let mut candidate = current.clone();

    match change {
        Change::Add(record) => candidate.push(record.clone()),
        Change::Remove {
            record_type,
            display_id,
        } => {
            let row = locate(current, *record_type, *display_id).ok_or(
                MutationError::UnknownRecord {
                    record_type: *record_type,
                    display_id: *display_id,
                },
            )?;
            if !row.deletable {
                return Err(MutationError::Protected(*record_type));
            }
            candidate.remove(*record_type, row.position);
        }
    }

    if let Some(soa) = candidate.soa.as_mut() {
        soa.bump_serial(unix_seconds(now));
    }

    Ok(candidate)
}

/// Serialize `candidate` and store it as the zone's full replacement.
///
/// The text is read back before it is sent; text that does not parse is
/// never sent, and the zone it reads back as is what gets committed.
pub async fn persist(
    candidate: &Zone,
    codec: &dyn ZoneCodec,
    store: &dyn ZoneStore,
) -> Result<Commit, MutationError> {
    let zone_text = codec.serialize(candidate)?;
    let zone = codec.parse(&zone_text)?;
    store.replace_zone(&zone_text).await?;
    Ok(Commit { zone, zone_text })
}

/// Run one edit against `current` up to, not including, the commit.
pub async fn propose(
    current: &Zone,
    change: &Change,
    codec: &dyn ZoneCodec,
    store: &dyn ZoneStore,
    now: DateTime<Utc>,
) -> Result<Commit, MutationError> {
    let candidate = match prepare(current, change, now) {
        Ok(candidate) => candidate,
        Err(e) => {
            info!(error = %e, "edit skipped");
            return Err(e);
        }
    };

    match persist(&candidate, codec, store).await {
        Ok(commit) => {
            info!(
                records = commit.zone.len(),
                serial = commit.zone.soa.as_ref().map(|s| s.serial),
                "zone replacement accepted"
            );
            Ok(commit)
        }
        Err(MutationError::Persist(e)) => {
            warn!(kind = e.kind(), "candidate discarded: {}", e.message());
            Err(e.into())
        }
        Err(e) => {
            warn!(error = %e, "candidate cannot be written, nothing sent");
            Err(e)
        }
    }
}

fn unix_seconds(now: DateTime<Utc>) -> u32 {
    u32::try_from(now.timestamp().max(0)).unwrap_or(u32::MAX)
}
