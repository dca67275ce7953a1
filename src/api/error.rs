use thiserror::Error;

/// Errors from the portal API layer
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Cannot reach the portal at {0}")]
    Connection(String),

    #[error("Not logged in or session expired. Run 'rekrut login' first.")]
    Unauthorized,

    #[error("Not found")]
    NotFound,

    #[error("Too many requests, try again later")]
    RateLimited,

    #[error("Request rejected: {0}")]
    Rejected(String),

    #[error("Server error ({0}): {1}")]
    Server(u16, String),

    #[error("Unexpected response from the portal: {0}")]
    Decode(String),

    #[error("Request cancelled")]
    Cancelled,

    #[error("Failed to read document: {0}")]
    Io(#[from] std::io::Error),
}

impl ApiError {
    /// Errors that point at the portal or the local system rather than the user's input
    pub fn is_internal(&self) -> bool {
        matches!(self, ApiError::Server(..) | ApiError::Decode(_) | ApiError::Io(_))
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_internal_classification() {
        assert!(ApiError::Server(500, "boom".to_string()).is_internal());
        assert!(ApiError::Decode("bad json".to_string()).is_internal());
        assert!(!ApiError::Unauthorized.is_internal());
        assert!(!ApiError::NotFound.is_internal());
        assert!(!ApiError::Connection("http://x".to_string()).is_internal());
    }
}
