use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("Server error: {status} - {message}")]
    ServerError { status: u16, message: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl From<ApiError> for String {
    fn from(error: ApiError) -> Self {
        error.to_string()
    }
}

/// Why a zone replacement was not accepted.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PersistError {
    /// No response was obtained at all.
    #[error("Network error: {message}")]
    Network { message: String },

    /// The server answered and refused the zone text.
    #[error("{kind}: {message}")]
    Rejected { kind: String, message: String },
}

impl PersistError {
    pub fn kind(&self) -> &str {
        match self {
            PersistError::Network { .. } => "Network error",
            PersistError::Rejected { kind, .. } => kind,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            PersistError::Network { message } | PersistError::Rejected { message, .. } => message,
        }
    }

    pub fn is_network(&self) -> bool {
        matches!(self, PersistError::Network { .. })
    }
}

impl From<reqwest::Error> for PersistError {
    fn from(error: reqwest::Error) -> Self {
        PersistError::Network {
            message: error.to_string(),
        }
    }
}
