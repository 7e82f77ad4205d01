//! Error type shared by the API layer, transfers, stores and actions

use drive_transfer::TransferError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DriveError {
    /// Transport failure: connection refused, timeout, TLS, ...
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-2xx status
    #[error("server responded {status}: {body}")]
    Status { status: u16, body: String },

    #[error("invalid response: {0}")]
    Decode(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("database error: {0}")]
    Db(String),

    #[error("{0}")]
    InvalidInput(String),

    #[error("not found: {0}")]
    NotFound(String),

    /// The session is not authenticated (HTTP 401 on startup)
    #[error("authentication required")]
    Unauthorized,

    /// Authenticated, but membership was refused or could not be established
    #[error("not a member of this service")]
    NotMember,
}

impl DriveError {
    /// HTTP status carried by this error, if the server answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            DriveError::Status { status, .. } => Some(*status),
            DriveError::Http(e) => e.status().map(|s| s.as_u16()),
            DriveError::Unauthorized => Some(401),
            _ => None,
        }
    }

    /// Transport failures and 5xx responses are worth another attempt; everything else is final
    pub fn is_retryable(&self) -> bool {
        match self {
            DriveError::Http(e) => e.status().map_or(true, |s| s.is_server_error()),
            DriveError::Status { status, .. } => *status >= 500,
            _ => false,
        }
    }
}

impl From<TransferError> for DriveError {
    fn from(err: TransferError) -> Self {
        match err {
            TransferError::Http(e) => DriveError::Http(e),
            TransferError::Status { status, body } => DriveError::Status { status, body },
            TransferError::Io(e) => DriveError::Io(e),
        }
    }
}

pub type DriveResult<T> = Result<T, DriveError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_errors_expose_their_code() {
        let err = DriveError::Status {
            status: 403,
            body: String::new(),
        };
        assert_eq!(err.status(), Some(403));
        assert!(!err.is_retryable());
        assert_eq!(DriveError::Unauthorized.status(), Some(401));
        assert_eq!(DriveError::NotMember.status(), None);
    }

    #[test]
    fn only_server_errors_are_retryable() {
        let server = DriveError::Status {
            status: 503,
            body: "busy".to_string(),
        };
        assert!(server.is_retryable());
        assert!(!DriveError::InvalidInput("x".to_string()).is_retryable());
    }

    #[test]
    fn transfer_status_maps_onto_drive_status() {
        let err: DriveError = TransferError::Status {
            status: 500,
            body: "boom".to_string(),
        }
        .into();
        assert_eq!(err.status(), Some(500));
        assert_eq!(err.to_string(), "server responded 500: boom");
    }
}
