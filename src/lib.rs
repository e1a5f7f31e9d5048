//! fidelius
//!
//! Share secret messages with friends from the command line. Commands are
//! routes matched against the parsed invocation; they read and update a
//! hierarchy of organizations, users, and friends, talk to a storage
//! backend, and report through composable printers.

pub mod backend;
pub mod cli;
pub mod config;
pub mod configuration;
pub mod errors;
pub mod fields;
pub mod output;
pub mod prompt;
pub mod routes;
pub mod routing;
pub mod store;
pub mod strategies;

// Re-export commonly used types for convenience
pub use config::{AppConfig, ConfigManager};
pub use configuration::Configuration;
pub use errors::{AppError, AppResult};
pub use output::{Print, Printable, Printer};
pub use routing::{Route, RouteResult, Router};
pub use store::Store;
