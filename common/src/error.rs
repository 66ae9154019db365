use std::collections::BTreeMap;

use thiserror::Error;

/// Rejections produced by [`crate::network::mac::normalize_mac`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MacError {
    #[error("invalid character '{0}' in MAC address")]
    InvalidCharacter(char),
    /// Fewer than six hex digits leave no manufacturer prefix to work with.
    #[error("MAC address has {0} hex digits, at least 6 are required")]
    TooShort(usize),
    #[error("MAC address has {0} hex digits, at most 12 are allowed")]
    TooLong(usize),
}

/// Failure kinds surfaced by every inventory backend.
#[derive(Debug, Clone, Error)]
pub enum InventoryError {
    /// Refused, reset or timed out. The only kind that is worth retrying.
    #[error("connection failed: {0}")]
    Connection(String),
    #[error("authentication failed: {0}")]
    Auth(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("{message}")]
    Validation {
        message: String,
        errors: BTreeMap<String, Vec<String>>,
    },
    #[error("inventory error: {0}")]
    Api(String),
}

impl InventoryError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
            errors: BTreeMap::new(),
        }
    }

    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Connection(_))
    }

    /// Auth and connectivity failures mean no further call can succeed.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Connection(_) | Self::Auth(_))
    }

    /// Operator-facing hint for the failures that stop a command early.
    pub fn remediation(&self) -> Option<&'static str> {
        match self {
            Self::Auth(_) => Some("Check your inventory credentials (API key or database user)."),
            Self::Connection(_) => Some("Check network connectivity and the inventory endpoint."),
            Self::NotFound(_) => Some("Check that the configured site or resource exists."),
            _ => None,
        }
    }
}

pub type InventoryResult<T> = Result<T, InventoryError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("invalid value '{value}' for {key}")]
    Invalid { key: String, value: String },
    #[error("missing required setting {0}")]
    Missing(&'static str),
}
