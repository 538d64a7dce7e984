use thiserror::Error;

/// Failures a fetch can settle with.
///
/// Cancellation is not a failure: a cancelled request never
/// produces a value of this type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// The request never produced a response (DNS, connect, reset...).
    #[error("Request to '{url}' failed: {message}")]
    Transport { url: String, message: String },

    /// The server answered with a non-2xx status.
    #[error("Request to '{url}' returned error {status}")]
    Status {
        url: String,
        status: u16,
        body: String,
    },

    /// The body could not be decoded into the expected shape.
    #[error("Failed to decode response from '{url}': {message}")]
    Decode { url: String, message: String },
}

impl FetchError {
    /// HTTP status carried by the error, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            FetchError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Get error type string for logs and renderers
    pub fn error_type(&self) -> &'static str {
        match self {
            FetchError::Transport { .. } => "transport_error",
            FetchError::Status { .. } => "http_status",
            FetchError::Decode { .. } => "decode_error",
        }
    }
}
