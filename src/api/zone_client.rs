use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use serde::Deserialize;
use tracing::{debug, warn};

use super::client::{ApiClient, ApiResult};
use super::error::{ApiError, PersistError};
use super::store::ZoneStore;

/// HTTP client for the zone endpoints of the editor's server.
#[derive(Clone)]
pub struct ZoneClient {
    client: ApiClient,
}

// Error body sent with a rejected zone replacement.
#[derive(Debug, Deserialize)]
struct RejectionBody {
    detail: RejectionDetail,
}

#[derive(Debug, Deserialize)]
struct RejectionDetail {
    error: String,
    message: String,
}

impl ZoneClient {
    pub fn new(endpoint: &str) -> ApiResult<Self> {
        Ok(Self {
            client: ApiClient::new(endpoint)?,
        })
    }
}

#[async_trait]
impl ZoneStore for ZoneClient {
    async fn fetch_zone(&self) -> ApiResult<String> {
        let response = self.client.get("zone_file").send().await?;

        if !response.status().is_success() {
            return Err(ApiError::ServerError {
                status: response.status().as_u16(),
                message: response.text().await.unwrap_or_else(|_| "Unknown error".to_string()),
            });
        }

        response
            .text()
            .await
            .map_err(|e| ApiError::InvalidResponse(format!("Failed to read zone text: {}", e)))
    }

    async fn replace_zone(&self, zone_text: &str) -> Result<(), PersistError> {
        let response = self
            .client
            .put("zonefile")
            .header(CONTENT_TYPE, "text/plain")
            .body(zone_text.to_string())
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            debug!(status = status.as_u16(), "zone replacement accepted");
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        let error = classify_rejection(status.as_u16(), &body);
        warn!(status = status.as_u16(), kind = error.kind(), "zone replacement rejected");
        Err(error)
    }

    async fn reset_zone(&self) -> ApiResult<()> {
        let response = self.client.get("reset_zone").send().await?;

        if !response.status().is_success() {
            return Err(ApiError::ServerError {
                status: response.status().as_u16(),
                message: response.text().await.unwrap_or_else(|_| "Unknown error".to_string()),
            });
        }

        Ok(())
    }
}

/// Turns a non-success response into a displayable rejection.
///
/// The server reports `{"detail": {"error": ..., "message": ...}}`; its
/// messages carry literal `\n` sequences. Any other body is shown as-is
/// under the HTTP status.
pub fn classify_rejection(status: u16, body: &str) -> PersistError {
    match serde_json::from_str::<RejectionBody>(body) {
        Ok(rejection) => PersistError::Rejected {
            kind: rejection.detail.error,
            message: unescape_newlines(&rejection.detail.message),
        },
        Err(_) => {
            let message = body.trim();
            PersistError::Rejected {
                kind: format!("HTTP {}", status),
                message: if message.is_empty() {
                    "Unknown error".to_string()
                } else {
                    message.to_string()
                },
            }
        }
    }
}

fn unescape_newlines(message: &str) -> String {
    message.replace("\\n", "\n")
}
