//! Backend error type.

/// Failure talking to the bookmark backend.
///
/// This is the only error kind the backend port surfaces; callers log it and
/// leave their in-memory state as it was before the attempt.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NetworkError {
    /// The backend answered with a non-2xx status.
    #[error("HTTP error! status: {status} ({url})")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Requested URL.
        url: String,
    },

    /// Connection, timeout or other transport failure.
    #[error("network error: {0}")]
    Transport(String),

    /// Body could not be decoded into the expected shape.
    #[error("response decode error: {0}")]
    Decode(String),

    /// The configured base URL or a derived endpoint is not a valid URL.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),
}

impl From<reqwest::Error> for NetworkError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            Self::Decode(e.to_string())
        } else if let Some(status) = e.status() {
            Self::Status {
                status: status.as_u16(),
                url: e.url().map(ToString::to_string).unwrap_or_default(),
            }
        } else {
            Self::Transport(e.to_string())
        }
    }
}
