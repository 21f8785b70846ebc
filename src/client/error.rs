use thiserror::Error;

/// Client-side error taxonomy. Every failed call maps onto exactly one of
/// these; page-level callers log the message and surface it as a banner.
#[derive(Debug, Error)]
pub enum ClientError {
    /// 401 from any endpoint. The session has already been cleared by the
    /// time this is returned.
    #[error("authentication failed: {0}")]
    Authentication(String),

    /// 404 - unknown id or unmounted route.
    #[error("{0}")]
    NotFound(String),

    /// 5xx responses.
    #[error("server error at {path}: {message}")]
    Server { path: String, message: String },

    /// Any other non-2xx, message extracted from the response body.
    #[error("{0}")]
    Validation(String),

    /// Fetch-level failure: DNS, refused connection, closed socket.
    #[error("network error: {0}")]
    Network(String),
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        ClientError::Network(err.to_string())
    }
}
