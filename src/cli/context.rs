//! CLI context for dependency injection and shared state
//!
//! The context owns the application configuration and knows how to turn it
//! into a ready `Store` for the parsed invocation.

use std::io::IsTerminal;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use tracing::debug;

use crate::config::ConfigManager;
use crate::configuration::{JsonFileStore, KeyValueStore, MemoryStore};
use crate::output;
use crate::prompt::TerminalPrompter;
use crate::routing::ParsedArgs;
use crate::store::Store;
use crate::strategies;

/// CLI execution context containing shared dependencies and configuration
#[derive(Clone)]
pub struct CliContext {
    pub home: PathBuf,
    pub verbose: bool,
    pub no_color: bool,
    pub config_manager: Arc<ConfigManager>,
}

impl CliContext {
    /// Create a context for the given home directory and output options
    pub fn new(home: Option<PathBuf>, verbose: bool, no_color: bool) -> Result<Self> {
        let config_manager = ConfigManager::new(home)?;
        Ok(Self {
            home: config_manager.home().to_path_buf(),
            verbose,
            no_color,
            config_manager: Arc::new(config_manager),
        })
    }

    /// Initialize logging to stderr based on verbosity and configuration
    ///
    /// `RUST_LOG` takes precedence over both.
    pub fn init_logging(&self) -> Result<()> {
        let log_level = if self.verbose {
            "debug"
        } else {
            self.config_manager.config().log_level.as_str()
        };

        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .or_else(|_| tracing_subscriber::EnvFilter::try_new(log_level))
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));

        // A subscriber may already be installed when embedded in tests.
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_ansi(self.log_ansi())
            .try_init();

        debug!("Home directory: {:?}", self.home);
        debug!("Configuration: {:?}", self.config_manager.config());
        Ok(())
    }

    /// Whether log lines may carry colour escapes
    fn log_ansi(&self) -> bool {
        !self.no_color && std::io::stderr().is_terminal()
    }

    /// Strategy named by `--store`, else the configured one
    pub fn strategy_name<'a>(&'a self, args: &'a ParsedArgs) -> &'a str {
        args.flags
            .store
            .as_deref()
            .unwrap_or(&self.config_manager.config().store)
    }

    /// Assemble the store for one invocation
    ///
    /// Persistent strategies keep their configuration in `state.json`; the
    /// others get a fresh in-memory document every run.
    pub fn build_store(&self, args: ParsedArgs) -> Result<Store> {
        let name = self.strategy_name(&args);
        let kv: Arc<dyn KeyValueStore> = if strategies::is_persistent(name) {
            Arc::new(JsonFileStore::open(self.config_manager.state_path())?)
        } else {
            debug!("Keeping {} configuration in memory", name);
            Arc::new(MemoryStore::new())
        };
        let strategy = strategies::init(name, kv, &self.config_manager.data_dir())?;
        let printer = output::printer_group(&self.config_manager.config().printers)?;

        Ok(Store::builder()
            .args(args)
            .strategy(strategy)
            .printer(Arc::new(printer))
            .prompter(Arc::new(TerminalPrompter::default()))
            .build()?)
    }
}
