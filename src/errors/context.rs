//! Error context helpers
//!
//! Extension methods that turn foreign errors into `AppError`s while
//! recording the file the application was working on.

use std::path::PathBuf;

use super::types::AppError;

/// Extension trait for adding context to foreign error types
pub trait ErrorContextExt<T> {
    /// Record the file and the operation that failed on it
    fn in_file_operation(
        self,
        path: impl Into<PathBuf>,
        operation: impl Into<String>,
    ) -> Result<T, AppError>;
}

impl<T, E> ErrorContextExt<T> for Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn in_file_operation(
        self,
        path: impl Into<PathBuf>,
        operation: impl Into<String>,
    ) -> Result<T, AppError> {
        self.map_err(|e| AppError::io_with_source(path, operation, e))
    }
}
