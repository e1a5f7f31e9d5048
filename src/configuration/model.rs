//! Records stored in the configuration hierarchy

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

/// A tenant grouping users and friends that share one backend registration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Organization {
    pub key: String,
    pub name: String,
    #[serde(rename = "currentUser", default)]
    pub current_user: Option<String>,
    #[serde(default)]
    pub users: BTreeMap<String, User>,
    #[serde(default)]
    pub friends: BTreeMap<String, Friend>,
}

impl Organization {
    pub fn new(key: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            name: name.into(),
            current_user: None,
            users: BTreeMap::new(),
            friends: BTreeMap::new(),
        }
    }
}

/// A local credential bundle for one registered identity
///
/// Everything except the key and nickname is backend specific and kept
/// verbatim in `credentials`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub key: String,
    pub name: String,
    #[serde(flatten)]
    pub credentials: BTreeMap<String, String>,
}

impl User {
    pub fn credential(&self, field: &str) -> Option<&str> {
        self.credentials.get(field).map(String::as_str)
    }
}

/// A counterpart identity messages can be shared with
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Friend {
    pub key: String,
    pub name: String,
    /// Local users that already opened a sharing channel to this friend
    #[serde(default)]
    pub shared: BTreeSet<String>,
}

impl Friend {
    pub fn new(key: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            name: name.into(),
            shared: BTreeSet::new(),
        }
    }
}

/// The credential fields a storage strategy requires of every user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UserSchema {
    /// Fields that must be supplied and non-empty; always includes `key` and `name`
    pub required: &'static [&'static str],
    /// Fields stamped onto every stored user
    pub fixed: &'static [(&'static str, &'static str)],
}
