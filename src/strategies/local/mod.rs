//! Local mailbox strategies
//!
//! `local` keeps mailboxes on disk next to the state file; `ephemeral`
//! keeps them in memory for the lifetime of one process.

pub mod connection;
pub mod fields;

pub use connection::LocalConnection;
pub use fields::LocalFields;

use crate::configuration::UserSchema;

const LOCAL_SCHEMA: UserSchema = UserSchema {
    required: &["key", "name", "api_secret"],
    fixed: &[("version", "1"), ("backend", "local")],
};

const EPHEMERAL_SCHEMA: UserSchema = UserSchema {
    required: &["key", "name", "api_secret"],
    fixed: &[("version", "1"), ("backend", "ephemeral")],
};

/// User schema for a mailbox strategy, stamping the strategy name on users
pub fn schema(strategy: &str) -> UserSchema {
    match strategy {
        "ephemeral" => EPHEMERAL_SCHEMA,
        _ => LOCAL_SCHEMA,
    }
}
