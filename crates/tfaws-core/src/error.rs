//! Error types for tfaws
//!
//! [`Error`] is what adapters hand back to the host. [`ApiError`] is what the
//! service clients in [`crate::api`] return for a rejected request.

use std::fmt;
use thiserror::Error;

/// Result type alias for adapter operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error returned by a remote control-plane API
///
/// Carries the service error code (e.g. `NoSuchAccessPoint`) and the
/// message exactly as the service sent them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    /// Service error code
    pub code: String,
    /// Service error message
    pub message: String,
}

impl ApiError {
    /// Create an API error from a code and message
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }

    /// Whether the error code equals `code`
    pub fn code_equals(&self, code: &str) -> bool {
        self.code == code
    }

    /// Whether the error code equals `code` and the message contains `fragment`
    ///
    /// An empty `fragment` matches any message.
    pub fn message_contains(&self, code: &str, fragment: &str) -> bool {
        self.code_equals(code) && self.message.contains(fragment)
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.message.is_empty() {
            write!(f, "{}", self.code)
        } else {
            write!(f, "{}: {}", self.code, self.message)
        }
    }
}

impl std::error::Error for ApiError {}

/// Core error type for adapter operations
#[derive(Error, Debug)]
pub enum Error {
    /// The remote API rejected a call
    #[error("error {action} {resource} ({id}): {source}")]
    RemoteRejected {
        /// What was being attempted (e.g. "creating", "reading policy of")
        action: String,
        /// Human readable resource kind
        resource: String,
        /// Identifier or name the call was made for
        id: String,
        /// The error as returned by the service
        #[source]
        source: ApiError,
    },

    /// The remote object does not exist
    #[error("{resource} ({id}) not found")]
    NotFound {
        /// Human readable resource kind
        resource: String,
        /// Identifier that was looked up
        id: String,
    },

    /// A stored identifier does not match any recognized format
    #[error("unexpected format of ID ({id}), expected {expected}")]
    MalformedIdentifier {
        /// The identifier as stored
        id: String,
        /// Description of the accepted format(s)
        expected: String,
    },

    /// A remote invariant (e.g. lookup uniqueness) does not hold
    #[error("{resource} ({id}): {message}")]
    ConsistencyViolation {
        /// Human readable resource kind
        resource: String,
        /// Identifier the lookup was made for
        id: String,
        /// What was violated
        message: String,
    },

    /// A remote value could not be written into the local representation
    #[error("error setting {field} for {resource}: {message}")]
    ShapeSetting {
        /// Resource type name
        resource: String,
        /// Attribute that was rejected
        field: String,
        /// Why it was rejected
        message: String,
    },

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Configuration values rejected by a schema
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error with context
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a remote rejection error
    pub fn remote(
        action: impl Into<String>,
        resource: impl Into<String>,
        id: impl Into<String>,
        source: ApiError,
    ) -> Self {
        Self::RemoteRejected {
            action: action.into(),
            resource: resource.into(),
            id: id.into(),
            source,
        }
    }

    /// Create a "not found" error
    pub fn not_found(resource: impl Into<String>, id: impl Into<String>) -> Self {
        Self::NotFound {
            resource: resource.into(),
            id: id.into(),
        }
    }

    /// Create a malformed identifier error
    pub fn malformed_id(id: impl Into<String>, expected: impl Into<String>) -> Self {
        Self::MalformedIdentifier {
            id: id.into(),
            expected: expected.into(),
        }
    }

    /// Create a consistency violation error
    pub fn consistency(
        resource: impl Into<String>,
        id: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::ConsistencyViolation {
            resource: resource.into(),
            id: id.into(),
            message: message.into(),
        }
    }

    /// Create a shape setting error
    pub fn shape_setting(
        resource: impl Into<String>,
        field: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::ShapeSetting {
            resource: resource.into(),
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// The service error behind a remote rejection, if any
    pub fn api_error(&self) -> Option<&ApiError> {
        match self {
            Error::RemoteRejected { source, .. } => Some(source),
            _ => None,
        }
    }

    /// Whether this error reports a missing remote object
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound { .. })
    }
}

/// Helper for converting anyhow::Error to our Error type
impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Self::Other(err.to_string())
    }
}
