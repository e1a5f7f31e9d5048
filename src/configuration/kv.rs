//! Generic nested key-value storage
//!
//! Configuration state is a JSON document addressed by dotted paths
//! (`local.orgs.acme.users`). Storage strategies never see the document
//! directly; each one gets a `Namespaced` view so several strategies can
//! share one file without colliding.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

use serde_json::{Map, Value};
use tracing::debug;

use crate::errors::{AppError, AppResult, ErrorContextExt};

/// A hierarchical key-value store addressed by dotted paths
pub trait KeyValueStore: Send + Sync {
    /// Read the value at `path`, if any
    fn get(&self, path: &str) -> Option<Value>;

    /// Read the value at `path`, falling back to `default`
    fn get_or(&self, path: &str, default: Value) -> Value {
        self.get(path).unwrap_or(default)
    }

    /// Write `value` at `path`, creating intermediate objects
    fn set(&self, path: &str, value: Value) -> AppResult<()>;

    /// Remove whatever is stored at `path`; missing paths are not an error
    fn delete(&self, path: &str) -> AppResult<()>;
}

fn lookup<'a>(root: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.').try_fold(root, |node, segment| node.get(segment))
}

fn object_mut(node: &mut Value) -> &mut Map<String, Value> {
    if !node.is_object() {
        *node = Value::Object(Map::new());
    }
    match node {
        Value::Object(map) => map,
        _ => unreachable!("node was just replaced by an object"),
    }
}

fn insert(root: &mut Value, path: &str, value: Value) {
    let mut segments: Vec<&str> = path.split('.').collect();
    let last = segments.pop().unwrap_or_default();
    let mut node = root;
    for segment in segments {
        node = object_mut(node)
            .entry(segment.to_string())
            .or_insert_with(|| Value::Object(Map::new()));
    }
    object_mut(node).insert(last.to_string(), value);
}

fn remove(root: &mut Value, path: &str) -> bool {
    let (parent, last) = match path.rsplit_once('.') {
        Some((parent, last)) => (Some(parent), last),
        None => (None, path),
    };
    let mut node = root;
    if let Some(parent) = parent {
        for segment in parent.split('.') {
            match node.get_mut(segment) {
                Some(child) => node = child,
                None => return false,
            }
        }
    }
    node.as_object_mut()
        .map(|map| map.remove(last).is_some())
        .unwrap_or(false)
}

fn locked(document: &Mutex<Value>) -> MutexGuard<'_, Value> {
    document.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// A store that lives only as long as the process
#[derive(Debug, Default)]
pub struct MemoryStore {
    document: Mutex<Value>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            document: Mutex::new(Value::Object(Map::new())),
        }
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, path: &str) -> Option<Value> {
        lookup(&locked(&self.document), path).cloned()
    }

    fn set(&self, path: &str, value: Value) -> AppResult<()> {
        insert(&mut locked(&self.document), path, value);
        Ok(())
    }

    fn delete(&self, path: &str) -> AppResult<()> {
        remove(&mut locked(&self.document), path);
        Ok(())
    }
}

/// A store persisted as pretty-printed JSON, rewritten after every change
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    document: Mutex<Value>,
}

impl JsonFileStore {
    /// Open the store at `path`, starting empty if the file does not exist
    pub fn open(path: impl Into<PathBuf>) -> AppResult<Self> {
        let path = path.into();
        let document = if path.exists() {
            let content = fs::read_to_string(&path).in_file_operation(&path, "read state file")?;
            if content.trim().is_empty() {
                Value::Object(Map::new())
            } else {
                serde_json::from_str(&content).in_file_operation(&path, "parse state file")?
            }
        } else {
            Value::Object(Map::new())
        };
        debug!("Opened state file {}", path.display());

        Ok(Self {
            path,
            document: Mutex::new(document),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, document: &Value) -> AppResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).in_file_operation(parent, "create state directory")?;
        }
        let content = serde_json::to_string_pretty(document)?;
        fs::write(&self.path, content).in_file_operation(&self.path, "write state file")
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, path: &str) -> Option<Value> {
        lookup(&locked(&self.document), path).cloned()
    }

    fn set(&self, path: &str, value: Value) -> AppResult<()> {
        let mut document = locked(&self.document);
        insert(&mut document, path, value);
        self.persist(&document)
    }

    fn delete(&self, path: &str) -> AppResult<()> {
        let mut document = locked(&self.document);
        if remove(&mut document, path) {
            self.persist(&document)?;
        }
        Ok(())
    }
}

/// A view of another store with every path prefixed by a namespace
#[derive(Clone)]
pub struct Namespaced {
    inner: Arc<dyn KeyValueStore>,
    namespace: String,
}

impl Namespaced {
    pub fn new(inner: Arc<dyn KeyValueStore>, namespace: impl Into<String>) -> AppResult<Self> {
        let namespace = namespace.into();
        if namespace.is_empty() || namespace.contains('.') {
            return Err(AppError::config(format!(
                "namespace must be a non-empty string without dots, got '{namespace}'"
            )));
        }
        Ok(Self { inner, namespace })
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    fn scoped(&self, path: &str) -> String {
        format!("{}.{}", self.namespace, path)
    }
}

impl KeyValueStore for Namespaced {
    fn get(&self, path: &str) -> Option<Value> {
        self.inner.get(&self.scoped(path))
    }

    fn set(&self, path: &str, value: Value) -> AppResult<()> {
        self.inner.set(&self.scoped(path), value)
    }

    fn delete(&self, path: &str) -> AppResult<()> {
        self.inner.delete(&self.scoped(path))
    }
}
