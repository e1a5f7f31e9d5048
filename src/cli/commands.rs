//! Command line definition
//!
//! clap only tokenises the invocation. Help and version handling are turned
//! off here because the routes own both behaviours.

use clap::Parser;
use std::path::PathBuf;

use crate::routing::{Flags, ParsedArgs};

/// Main CLI structure
#[derive(Parser, Debug)]
#[command(name = "fidelius")]
#[command(about = "Share secret messages with friends from the command line")]
#[command(disable_help_flag = true, disable_version_flag = true)]
pub struct Cli {
    /// Command words, e.g. `add org`
    pub input: Vec<String>,

    /// Print help for the selected command
    #[arg(short, long)]
    pub help: bool,

    /// Print the version
    #[arg(short, long)]
    pub version: bool,

    /// Storage strategy for this invocation
    #[arg(long, value_name = "NAME")]
    pub store: Option<String>,

    /// Message key for `read`
    #[arg(long, value_name = "KEY")]
    pub key: Option<String>,

    /// Directory holding config.toml and state.json
    #[arg(long, env = "FIDELIUS_HOME", value_name = "DIR")]
    pub home: Option<PathBuf>,

    /// Enable verbose output
    #[arg(long)]
    pub verbose: bool,

    /// Print without colors
    #[arg(long)]
    pub no_color: bool,
}

impl Cli {
    /// The pre-parsed arguments routes work with
    pub fn parsed_args(&self) -> ParsedArgs {
        ParsedArgs::new(
            self.input.clone(),
            Flags {
                help: self.help,
                version: self.version,
                store: self.store.clone(),
                key: self.key.clone(),
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_words_and_flags() {
        let cli = Cli::try_parse_from([
            "fidelius", "read", "--key", "abc", "--store", "ephemeral", "-h",
        ])
        .unwrap();
        let args = cli.parsed_args();

        assert_eq!(args.input, vec!["read"]);
        assert!(args.flags.help);
        assert!(!args.flags.version);
        assert_eq!(args.flags.key.as_deref(), Some("abc"));
        assert_eq!(args.flags.store.as_deref(), Some("ephemeral"));
    }

    #[test]
    fn test_short_version_flag() {
        let cli = Cli::try_parse_from(["fidelius", "-v"]).unwrap();
        assert!(cli.input.is_empty());
        assert!(cli.parsed_args().flags.version);
    }
}
