//! Error taxonomy surfaced by controller operations.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConsoleError {
    #[error("not signed in: no admin token found, please log in")]
    MissingCredential,
    #[error("unauthorized: your session has expired, please log in again")]
    Unauthorized,
    #[error("{message}")]
    Status { status: u16, message: String },
    #[error("network error: {0}")]
    Transport(String),
    #[error("unexpected response from server: {0}")]
    Decode(String),
    #[error("{0}")]
    Validation(String),
    #[error("export failed: {0}")]
    Export(String),
    #[error("view was closed before the operation completed")]
    Closed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Credential,
    Auth,
    Http,
    Transport,
    Validation,
    Export,
}

impl ConsoleError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Status error with the generic text used when the body carries no message.
    pub fn generic_status(status: u16) -> Self {
        Self::Status {
            status,
            message: format!("request failed with status {status}"),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            ConsoleError::MissingCredential => ErrorCategory::Credential,
            ConsoleError::Unauthorized => ErrorCategory::Auth,
            ConsoleError::Status { .. } | ConsoleError::Decode(_) => ErrorCategory::Http,
            ConsoleError::Transport(_) | ConsoleError::Closed => ErrorCategory::Transport,
            ConsoleError::Validation(_) => ErrorCategory::Validation,
            ConsoleError::Export(_) => ErrorCategory::Export,
        }
    }

    pub fn requires_reauth(&self) -> bool {
        matches!(
            self.category(),
            ErrorCategory::Credential | ErrorCategory::Auth
        )
    }

    /// Local failures never reached the network.
    pub fn is_local(&self) -> bool {
        matches!(
            self,
            ConsoleError::MissingCredential | ConsoleError::Validation(_) | ConsoleError::Closed
        )
    }
}

impl From<reqwest::Error> for ConsoleError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ConsoleError::Decode(err.to_string())
        } else {
            ConsoleError::Transport(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ConsoleError {
    fn from(err: serde_json::Error) -> Self {
        ConsoleError::Decode(err.to_string())
    }
}
