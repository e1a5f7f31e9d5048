//! Centralized error handling module
//!
//! Every layer of fidelius reports failures through `AppError`. Only the
//! top-level dispatcher turns them into printable route results.

pub mod context;
pub mod types;

pub use context::ErrorContextExt;
pub use types::{AppError, AppResult};
