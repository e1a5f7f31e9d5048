//! Error types for fidelius
//!
//! This module defines every error that can occur while routing a command,
//! mutating the local configuration, prompting the user, or talking to a
//! storage backend. Variants are grouped by the layer that raises them.

use std::path::PathBuf;
use thiserror::Error;

use crate::routing::RouteResult;

/// Main application error type
///
/// Construction errors fail fast when a value is built, state errors are
/// raised where a precondition is violated, and uniqueness errors are the
/// recoverable class that route handlers catch to re-prompt the user.
#[derive(Error, Debug)]
pub enum AppError {
    // Construction and validation errors
    #[error("Invalid printable: {reason}")]
    InvalidPrintable {
        reason: String,
    },

    #[error("Invalid route '{name}': {reason}")]
    InvalidRoute {
        name: String,
        reason: String,
    },

    #[error("{field} must be set before the store is used")]
    MissingDependency {
        field: &'static str,
    },

    #[error("Unknown storage strategy: {name}")]
    UnknownStrategy {
        name: String,
    },

    #[error("Unknown printer: {name}")]
    UnknownPrinter {
        name: String,
    },

    #[error("Invalid {kind} key '{key}': {reason}")]
    InvalidKey {
        kind: &'static str,
        key: String,
        reason: String,
    },

    // Configuration state errors
    #[error("No current organization is selected")]
    NoCurrentOrg,

    #[error("No current user is selected for this organization")]
    NoCurrentUser,

    #[error("No organization defined for ID: {key}")]
    OrgNotFound {
        key: String,
    },

    #[error("A user at ID {key} is not defined for this organization.")]
    UserNotFound {
        key: String,
    },

    #[error("Cannot share with a non-existent friend: {key}")]
    FriendNotFound {
        key: String,
    },

    // Uniqueness and completeness errors
    #[error("The {name} organization already exists for the key {key}")]
    DuplicateOrg {
        name: String,
        key: String,
    },

    #[error("The user {name} already exists at ID {key} on this organization.")]
    DuplicateUser {
        name: String,
        key: String,
    },

    #[error("The friend {name} already exists at ID {key} on this organization.")]
    DuplicateFriend {
        name: String,
        key: String,
    },

    #[error("The user object is incomplete. Missing: {}", missing.join(", "))]
    IncompleteUser {
        missing: Vec<String>,
    },

    // Backend errors
    #[error("{message}")]
    Backend {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    // Interactive input errors
    #[error("Prompt failed: {message}")]
    Prompt {
        message: String,
    },

    #[error("Invalid answer for '{field}': {reason}")]
    InvalidAnswer {
        field: String,
        reason: String,
    },

    // Application configuration errors
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    // I/O and serialization errors
    #[error("File I/O error for '{path}': {operation}")]
    Io {
        path: PathBuf,
        operation: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("JSON error: {context}")]
    Json {
        context: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("TOML error: {context}")]
    Toml {
        context: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    // Control flow
    #[error("{}", result.text().unwrap_or("sub-command failed"))]
    Terminated {
        result: Box<RouteResult>,
    },

    #[error("{message}")]
    Other {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

/// Convenience type alias for Results using AppError
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// Create a new InvalidRoute error
    pub fn invalid_route(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidRoute {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Create a new Backend error
    pub fn backend(message: impl Into<String>) -> Self {
        Self::Backend {
            message: message.into(),
            source: None,
        }
    }

    /// Create a new Prompt error
    pub fn prompt(message: impl Into<String>) -> Self {
        Self::Prompt {
            message: message.into(),
        }
    }

    /// Create a new Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            source: None,
        }
    }

    /// Create a new Config error with source
    pub fn config_with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Config {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a new I/O error with source
    pub fn io_with_source(
        path: impl Into<PathBuf>,
        operation: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Io {
            path: path.into(),
            operation: operation.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a new catch-all error
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other {
            message: message.into(),
            source: None,
        }
    }

    /// Whether a route handler may print this error and ask the user again
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::DuplicateOrg { .. }
                | Self::DuplicateUser { .. }
                | Self::DuplicateFriend { .. }
                | Self::IncompleteUser { .. }
                | Self::InvalidKey { .. }
        )
    }

    /// Get the error category for logging
    pub fn category(&self) -> &'static str {
        match self {
            Self::InvalidPrintable { .. }
            | Self::InvalidRoute { .. }
            | Self::MissingDependency { .. }
            | Self::UnknownStrategy { .. }
            | Self::UnknownPrinter { .. }
            | Self::InvalidKey { .. } => "construction",
            Self::NoCurrentOrg
            | Self::NoCurrentUser
            | Self::OrgNotFound { .. }
            | Self::UserNotFound { .. }
            | Self::FriendNotFound { .. } => "state",
            Self::DuplicateOrg { .. }
            | Self::DuplicateUser { .. }
            | Self::DuplicateFriend { .. }
            | Self::IncompleteUser { .. } => "uniqueness",
            Self::Backend { .. } => "backend",
            Self::Prompt { .. } | Self::InvalidAnswer { .. } => "prompt",
            Self::Config { .. } => "config",
            Self::Io { .. } => "io",
            Self::Json { .. } | Self::Toml { .. } => "serialization",
            Self::Terminated { .. } => "terminated",
            Self::Other { .. } => "internal",
        }
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        let operation = match err.kind() {
            std::io::ErrorKind::NotFound => "file not found",
            std::io::ErrorKind::PermissionDenied => "permission denied",
            std::io::ErrorKind::UnexpectedEof => "unexpected end of input",
            _ => "I/O operation",
        }
        .to_string();

        Self::Io {
            path: PathBuf::from("unknown"),
            operation,
            source: Some(Box::new(err)),
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        let context = if err.is_syntax() {
            format!("syntax error at line {} column {}", err.line(), err.column())
        } else if err.is_eof() {
            "unexpected end of JSON input".to_string()
        } else if err.is_data() {
            "unexpected JSON data".to_string()
        } else {
            "serialization failed".to_string()
        };

        Self::Json {
            context,
            source: Some(Box::new(err)),
        }
    }
}

impl From<toml::de::Error> for AppError {
    fn from(err: toml::de::Error) -> Self {
        Self::Toml {
            context: err.to_string(),
            source: Some(Box::new(err)),
        }
    }
}

impl From<toml::ser::Error> for AppError {
    fn from(err: toml::ser::Error) -> Self {
        Self::Toml {
            context: err.to_string(),
            source: Some(Box::new(err)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_org_message() {
        let err = AppError::DuplicateOrg {
            name: "Acme".to_string(),
            key: "abc123".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "The Acme organization already exists for the key abc123"
        );
    }

    #[test]
    fn test_recoverable_errors() {
        let duplicate = AppError::DuplicateFriend {
            name: "Bob".to_string(),
            key: "k".to_string(),
        };
        assert!(duplicate.is_recoverable());
        assert!(!AppError::NoCurrentOrg.is_recoverable());
        assert!(!AppError::backend("offline").is_recoverable());
    }

    #[test]
    fn test_error_category() {
        assert_eq!(AppError::NoCurrentUser.category(), "state");
        assert_eq!(AppError::backend("x").category(), "backend");
        assert_eq!(
            AppError::MissingDependency { field: "db" }.category(),
            "construction"
        );
    }

    #[test]
    fn test_incomplete_user_lists_missing_fields() {
        let err = AppError::IncompleteUser {
            missing: vec!["api_secret".to_string(), "name".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "The user object is incomplete. Missing: api_secret, name"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        match AppError::from(io_err) {
            AppError::Io { operation, .. } => assert_eq!(operation, "file not found"),
            other => panic!("Wrong error type: {other:?}"),
        }
    }
}
