use thiserror::Error;

/// Why a refresh cycle produced no data.
///
/// Every variant is terminal for its cycle and is carried inside a
/// `RefreshState::Failed`, so the type is `Clone` and holds no transport
/// handles.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FetchError {
    #[error("Network request failed: {0}")]
    Network(String),

    #[error("Network response was not ok")]
    Http { status: u16 },

    #[error("Malformed response: {0}")]
    Payload(String),

    #[error("Could not find all cryptocurrency data (missing: {})", .missing.join(", "))]
    IncompleteData { missing: Vec<String> },
}

impl FetchError {
    /// Transport failures and server-side errors may succeed on a second try.
    pub fn is_retryable(&self) -> bool {
        match self {
            FetchError::Network(_) => true,
            FetchError::Http { status } => *status >= 500,
            FetchError::Payload(_) | FetchError::IncompleteData { .. } => false,
        }
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            FetchError::Payload(err.to_string())
        } else if let Some(status) = err.status() {
            FetchError::Http {
                status: status.as_u16(),
            }
        } else {
            FetchError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(err: serde_json::Error) -> Self {
        FetchError::Payload(err.to_string())
    }
}
