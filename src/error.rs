use thiserror::Error;

/// Comprehensive error type for the storefront admin engine
#[derive(Error, Debug)]
pub enum AdminError {
    #[error("Store error: {0}")]
    Store(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Async task error: {0}")]
    AsyncTask(#[from] tokio::task::JoinError),
}

/// Crate-wide result alias
pub type Result<T> = std::result::Result<T, AdminError>;

impl AdminError {
    /// Create a store error
    pub fn store<S: Into<String>>(msg: S) -> Self {
        Self::Store(msg.into())
    }

    /// Create a not-found error
    pub fn not_found<S: Into<String>>(what: S) -> Self {
        Self::NotFound(what.into())
    }

    /// Create an invalid parameter error
    pub fn invalid_parameter<S: Into<String>>(msg: S) -> Self {
        Self::InvalidParameter(msg.into())
    }

    /// HTTP-style status code the dispatcher should return for this error.
    ///
    /// Missing singular resources map to 404; everything else is an opaque
    /// 500. Validation failures never reach the caller as errors - the
    /// [`crate::query`] layer recovers them by substituting defaults - so
    /// `InvalidParameter` only surfaces from programmatic misuse and is
    /// treated as a server fault.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::NotFound(_) => 404,
            _ => 500,
        }
    }

    /// Caller-facing message.
    ///
    /// Store failures are deliberately opaque: internal detail stays in the
    /// logs and never leaks to the HTTP response body.
    pub fn user_message(&self) -> String {
        match self {
            Self::NotFound(what) => format!("{} not found", what),
            Self::Store(_) | Self::Io(_) | Self::AsyncTask(_) => {
                "An error occurred while processing your request".to_string()
            }
            other => other.to_string(),
        }
    }
}
