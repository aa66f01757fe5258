use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Where a fetch broke down. Kept for logs only: callers treat every kind the same.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    Transport,
    Status,
    Decode,
}

#[derive(Debug, Clone, Error)]
#[error("{kind:?}: {message}")]
pub struct TransientFetchFailure {
    pub kind: FailureKind,
    pub message: String,
}

impl TransientFetchFailure {
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self::new(FailureKind::Transport, message)
    }

    pub fn status(code: u16) -> Self {
        Self::new(FailureKind::Status, format!("remote answered with HTTP {code}"))
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self::new(FailureKind::Decode, message)
    }
}
