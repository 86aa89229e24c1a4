use async_trait::async_trait;

use super::client::ApiResult;
use super::error::PersistError;

/// The server side of the editor: the authoritative copy of one zone.
#[async_trait]
pub trait ZoneStore: Send + Sync {
    /// Fetch the current zone text.
    async fn fetch_zone(&self) -> ApiResult<String>;

    /// Replace the whole zone with `zone_text`.
    async fn replace_zone(&self, zone_text: &str) -> Result<(), PersistError>;

    /// Discard all edits and restore the zone's baseline.
    async fn reset_zone(&self) -> ApiResult<()>;
}

#[cfg(test)]
pub mod test_support {
    use std::collections::VecDeque;
    use std::sync::Mutex;

    use super::*;
    use crate::api::ApiError;

    /// In-memory store that records replacements and answers with scripted
    /// outcomes (success once the script runs out).
    #[derive(Default)]
    pub struct MemoryStore {
        pub zone_text: Mutex<String>,
        pub replacements: Mutex<Vec<String>>,
        pub outcomes: Mutex<VecDeque<Result<(), PersistError>>>,
        pub reset_fails: bool,
    }

    impl MemoryStore {
        pub fn new(zone_text: &str) -> Self {
            Self {
                zone_text: Mutex::new(zone_text.to_string()),
                ..Default::default()
            }
        }

        pub fn failing_with(self, error: PersistError) -> Self {
            self.outcomes.lock().unwrap().push_back(Err(error));
            self
        }

        pub fn replacements(&self) -> Vec<String> {
            self.replacements.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ZoneStore for MemoryStore {
        async fn fetch_zone(&self) -> ApiResult<String> {
            Ok(self.zone_text.lock().unwrap().clone())
        }

        async fn replace_zone(&self, zone_text: &str) -> Result<(), PersistError> {
            self.replacements.lock().unwrap().push(zone_text.to_string());
            let outcome = self.outcomes.lock().unwrap().pop_front().unwrap_or(Ok(()));
            if outcome.is_ok() {
                *self.zone_text.lock().unwrap() = zone_text.to_string();
            }
            outcome
        }

        async fn reset_zone(&self) -> ApiResult<()> {
            if self.reset_fails {
                return Err(ApiError::ServerError {
                    status: 500,
                    message: "reset failed".to_string(),
                });
            }
            Ok(())
        }
    }
}
