//! Client error types

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, ClientError>;

/// Client errors
#[derive(Error, Debug)]
pub enum ClientError {
    /// HTTP transport error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON decoding error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Token missing or rejected (`error-auth`)
    #[error("authentication error ({code}): {status}")]
    Authentication { status: String, code: u16 },

    /// Content does not exist (`error-notFound`)
    #[error("content not found ({code}): {status}")]
    NotFound { status: String, code: u16 },

    /// Content is owned by another account (`error-owner`)
    #[error("not owner of content ({code}): {status}")]
    NotOwner { status: String, code: u16 },

    /// Operation requires a premium account (`error-notPremium`)
    #[error("premium account required ({code}): {status}")]
    NotPremium { status: String, code: u16 },

    /// Any other non-"ok" status or non-200 response
    #[error("API error ({code}): {status}")]
    Api { status: String, code: u16 },

    /// Server reported a content type other than file or folder
    #[error("invalid content type: {0:?}")]
    InvalidContentType(Option<String>),

    /// Option key not recognized in any namespace
    #[error("unknown option: {0}")]
    UnknownOption(String),

    /// Option value has the wrong type for its key
    #[error("option '{option}' requires types [{expected}] - got type {received}")]
    InvalidOptionValue {
        option: String,
        expected: String,
        received: &'static str,
    },

    /// No resolution path exists for the content in its current state
    #[error("unsupported operation: {0}")]
    UnsupportedOperation(String),

    /// Argument contract violated before any request was made
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Response was well-formed but missing required data
    #[error("invalid response: {0}")]
    InvalidResponse(String),

    /// Invalid configuration
    #[error("configuration error: {0}")]
    Config(String),
}

impl ClientError {
    /// Map a non-"ok" envelope status to its typed error
    pub fn from_status(status: impl Into<String>, code: u16) -> Self {
        let status = status.into();
        match status.as_str() {
            "error-auth" => Self::Authentication { status, code },
            "error-notFound" => Self::NotFound { status, code },
            "error-owner" => Self::NotOwner { status, code },
            "error-notPremium" => Self::NotPremium { status, code },
            _ => Self::Api { status, code },
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is an authentication error
    pub fn is_auth_error(&self) -> bool {
        matches!(self, Self::Authentication { .. })
    }

    /// Raw API status string, if the error came from the service
    pub fn api_status(&self) -> Option<&str> {
        match self {
            Self::Authentication { status, .. }
            | Self::NotFound { status, .. }
            | Self::NotOwner { status, .. }
            | Self::NotPremium { status, .. }
            | Self::Api { status, .. } => Some(status),
            _ => None,
        }
    }
}
