use reqwest::Response;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TransferError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("server responded {status}: {body}")]
    Status { status: u16, body: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl TransferError {
    /// HTTP status of a rejected response, if the server answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            TransferError::Status { status, .. } => Some(*status),
            TransferError::Http(e) => e.status().map(|s| s.as_u16()),
            TransferError::Io(_) => None,
        }
    }
}

pub type TransferResult<T> = Result<T, TransferError>;

/// Turn a non-2xx response into `TransferError::Status`, keeping the body text for diagnostics
pub(crate) async fn check_status(response: Response) -> TransferResult<Response> {
    if !response.status().is_success() {
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        return Err(TransferError::Status { status, body });
    }
    Ok(response)
}
