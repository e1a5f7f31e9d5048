//! Local configuration state
//!
//! `kv` holds the generic dotted-path storage, `model` the records, and
//! `hierarchy` the organization/user/friend rules layered on top.

pub mod hierarchy;
pub mod kv;
pub mod model;

pub use hierarchy::Configuration;
pub use kv::{JsonFileStore, KeyValueStore, MemoryStore, Namespaced};
pub use model::{Friend, Organization, User, UserSchema};
