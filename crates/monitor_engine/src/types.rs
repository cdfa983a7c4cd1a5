use monitor_core::ServerReading;
use serde::Deserialize;
use thiserror::Error;

/// Wire shape of the `/status` endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct StatusResponse {
    pub docs_in_indexing: u64,
    pub docs_left_to_index: u64,
}

impl From<StatusResponse> for ServerReading {
    fn from(response: StatusResponse) -> Self {
        ServerReading::new(response.docs_in_indexing, response.docs_left_to_index)
    }
}

/// A failed status fetch. The monitor treats every kind the same way; the
/// kind only feeds the log.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}: {message}")]
pub struct FetchError {
    pub kind: FailureKind,
    pub message: String,
}

impl FetchError {
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FailureKind {
    #[error("invalid url")]
    InvalidUrl,
    #[error("http status {0}")]
    HttpStatus(u16),
    #[error("timeout")]
    Timeout,
    #[error("response too large (max {max_bytes}, actual {actual})")]
    TooLarge { max_bytes: u64, actual: u64 },
    #[error("malformed status body")]
    Decode,
    #[error("network error")]
    Network,
}
