//! Error types for the mcmod-api service.

/// Top-level error type for the HTTP service.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The request was malformed (for example a blank `key`).
    #[error("{0}")]
    BadRequest(String),

    /// The search engine failed in a way the client cannot fix.
    #[error("search error: {0}")]
    Search(#[from] mcmod_search::SearchError),

    /// Configuration error.
    #[error("config error: {0}")]
    Config(String),

    /// Response serialisation error.
    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Server start-up or socket error.
    #[error("server error: {0}")]
    Server(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ApiError {
    /// HTTP status code this error maps to.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::BadRequest(_) => 400,
            _ => 500,
        }
    }
}

/// Convenience result type.
pub type Result<T> = std::result::Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bad_request_displays_message_verbatim() {
        let err = ApiError::BadRequest("Empty search key".into());
        assert_eq!(err.to_string(), "Empty search key");
        assert_eq!(err.status_code(), 400);
    }

    #[test]
    fn search_errors_are_internal() {
        let err = ApiError::from(mcmod_search::SearchError::Cancelled);
        assert_eq!(err.to_string(), "search error: search cancelled");
        assert_eq!(err.status_code(), 500);
    }

    #[test]
    fn config_errors_are_internal() {
        let err = ApiError::Config("port must be set".into());
        assert_eq!(err.status_code(), 500);
    }

    #[test]
    fn error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ApiError>();
    }
}
