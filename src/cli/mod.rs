//! CLI module providing the command-line driver
//!
//! Parses the invocation, prepares logging and the store, runs the router,
//! and prints the final result.

pub mod commands;
pub mod context;

use anyhow::Result;
use clap::Parser;
use tracing::debug;

pub use commands::Cli;
pub use context::CliContext;

use crate::routes;

/// Main CLI application
pub struct CliApp;

impl CliApp {
    /// Parse command line arguments and run the matching route
    ///
    /// Returns the exit code of the route's result.
    pub async fn run() -> Result<i32> {
        let cli = Cli::parse();
        if cli.no_color {
            colored::control::set_override(false);
        }

        let context = CliContext::new(cli.home.clone(), cli.verbose, cli.no_color)?;
        context.init_logging()?;

        let store = context.build_store(cli.parsed_args())?;
        let result = routes::router()?.run(&store).await;
        store.printer().print(result.printable());

        debug!("Exiting with code {}", result.exit_code());
        Ok(result.exit_code())
    }
}
