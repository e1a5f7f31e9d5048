//! Storage strategies
//!
//! A strategy bundles the three pieces that must agree with each other: the
//! configuration namespace and user schema, the questions used to fill it,
//! and the backend connection that understands the stored credentials.

pub mod local;

use std::path::Path;
use std::sync::Arc;

use tracing::debug;

use crate::backend::DbConnection;
use crate::configuration::{Configuration, KeyValueStore, Namespaced};
use crate::errors::{AppError, AppResult};
use crate::fields::ConfigFields;

/// Names accepted by `init`
pub const STRATEGIES: [&str; 2] = ["local", "ephemeral"];

/// Whether a strategy's state outlives the process
///
/// The configuration of a strategy that does not persist must not be written
/// to disk either, or it would point at backend accounts that no longer exist.
pub fn is_persistent(name: &str) -> bool {
    name != "ephemeral"
}

/// An initialised storage strategy
pub struct Strategy {
    pub conf: Arc<Configuration>,
    pub fields: Arc<dyn ConfigFields>,
    pub db: Arc<dyn DbConnection>,
}

/// Initialise a strategy by name on top of the shared key-value store
///
/// `data_dir` is where persistent strategies keep their backend files.
pub fn init(name: &str, kv: Arc<dyn KeyValueStore>, data_dir: &Path) -> AppResult<Strategy> {
    if !STRATEGIES.contains(&name) {
        return Err(AppError::UnknownStrategy {
            name: name.to_string(),
        });
    }

    let conf = Arc::new(Configuration::new(
        Namespaced::new(kv, name)?,
        local::schema(name),
    ));
    let db: Arc<dyn DbConnection> = match name {
        "ephemeral" => Arc::new(local::LocalConnection::in_memory(Arc::clone(&conf))),
        _ => Arc::new(local::LocalConnection::persistent(
            Arc::clone(&conf),
            data_dir.join("mailbox"),
        )),
    };
    debug!("Initialised {} storage strategy", name);

    Ok(Strategy {
        conf,
        fields: Arc::new(local::LocalFields),
        db,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::configuration::MemoryStore;

    #[test]
    fn test_unknown_strategy() {
        let kv: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        let err = init("e3db", kv, Path::new("/tmp")).err().unwrap();
        assert!(matches!(err, AppError::UnknownStrategy { name } if name == "e3db"));
    }

    #[test]
    fn test_only_ephemeral_is_transient() {
        assert!(is_persistent("local"));
        assert!(!is_persistent("ephemeral"));
    }

    #[test]
    fn test_strategies_use_their_own_namespace() {
        let kv: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        let local = init("local", Arc::clone(&kv), Path::new("/tmp")).unwrap();
        let ephemeral = init("ephemeral", Arc::clone(&kv), Path::new("/tmp")).unwrap();

        local.conf.add_org("acme", "Acme").unwrap();
        assert_eq!(local.conf.namespace(), "local");
        assert!(ephemeral.conf.list_orgs().unwrap().is_empty());
        assert_eq!(ephemeral.conf.schema().fixed[1], ("backend", "ephemeral"));
    }
}
