/// Failure of a single backend call.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Backend returned {status}: {message}")]
    Status { status: u16, message: String },

    /// `success: false` in an otherwise valid response.
    #[error("{0}")]
    Rejected(String),

    #[error("Invalid response: {0}")]
    Decode(#[from] serde_json::Error),
}

pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    /// Message the backend itself supplied, if any.
    pub fn backend_message(&self) -> Option<&str> {
        match self {
            ApiError::Rejected(message) => Some(message),
            ApiError::Status { message, .. } if !message.is_empty() => Some(message),
            _ => None,
        }
    }
}
