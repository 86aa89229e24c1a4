use chrono::{DateTime, Utc};
use thiserror::Error;
use uuid::Uuid;

use crate::models::{RecordType, Zone};

use super::mutation::{Commit, MutationError};

#[derive(Debug, Clone)]
pub struct AsyncOperation {
    pub id: Uuid,
    pub operation_type: OperationType,
    pub status: AsyncStatus,
    pub started_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OperationType {
    AddRecord(RecordType),
    DeleteRecord(RecordType),
    ResetZone,
    LoadZone,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AsyncStatus {
    InProgress,
    Completed,
    Failed(String),
}

#[derive(Debug, Clone)]
pub enum AsyncOperationResult {
    Committed(Commit),
    ZoneReset,
    ZoneLoaded { zone: Zone, zone_text: String },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OperationError {
    #[error(transparent)]
    Mutation(#[from] MutationError),

    #[error("Reset failed: {0}")]
    Reset(String),

    #[error("Failed to load the zone: {0}")]
    Load(String),
}

impl AsyncOperation {
    pub fn new(operation_type: OperationType) -> Self {
        Self {
            id: Uuid::new_v4(),
            operation_type,
            status: AsyncStatus::InProgress,
            started_at: Utc::now(),
        }
    }

    pub fn complete(&mut self) {
        self.status = AsyncStatus::Completed;
    }

    pub fn fail(&mut self, error: String) {
        self.status = AsyncStatus::Failed(error);
    }

    pub fn is_in_progress(&self) -> bool {
        matches!(self.status, AsyncStatus::InProgress)
    }

    pub fn is_mutation(&self) -> bool {
        matches!(
            self.operation_type,
            OperationType::AddRecord(_) | OperationType::DeleteRecord(_)
        )
    }
}
