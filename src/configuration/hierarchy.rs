//! The organization → user → friend state machine
//!
//! All state lives in a namespaced key-value store using this layout:
//!
//! ```text
//! currentOrg                         -> org key
//! orgs.<org>                         -> Organization
//! orgs.<org>.currentUser             -> user key
//! orgs.<org>.users.<user>            -> User
//! orgs.<org>.friends.<friend>        -> Friend
//! ```
//!
//! Every mutation re-reads the store, so listings always reflect the
//! preceding writes. Current pointers that name a missing record are
//! treated as unset.

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use super::kv::{KeyValueStore, Namespaced};
use super::model::{Friend, Organization, User, UserSchema};
use crate::errors::{AppError, AppResult};
use crate::prompt::Choice;

const CURRENT_ORG: &str = "currentOrg";

/// Hierarchical configuration for one storage strategy
#[derive(Clone)]
pub struct Configuration {
    store: Namespaced,
    schema: UserSchema,
}

impl Configuration {
    pub fn new(store: Namespaced, schema: UserSchema) -> Self {
        Self { store, schema }
    }

    pub fn namespace(&self) -> &str {
        self.store.namespace()
    }

    pub fn schema(&self) -> UserSchema {
        self.schema
    }

    fn check_key(kind: &'static str, key: &str) -> AppResult<()> {
        let reason = if key.trim().is_empty() {
            "keys cannot be empty"
        } else if key.contains('.') {
            "keys cannot contain '.'"
        } else {
            return Ok(());
        };
        Err(AppError::InvalidKey {
            kind,
            key: key.to_string(),
            reason: reason.to_string(),
        })
    }

    fn is_valid_key(key: &str) -> bool {
        !key.trim().is_empty() && !key.contains('.')
    }

    fn read<T: DeserializeOwned>(&self, path: &str) -> AppResult<Option<T>> {
        match self.store.get(path) {
            None | Some(Value::Null) => Ok(None),
            Some(value) => Ok(Some(serde_json::from_value(value)?)),
        }
    }

    fn write<T: Serialize>(&self, path: &str, value: &T) -> AppResult<()> {
        self.store.set(path, serde_json::to_value(value)?)
    }

    fn read_map<T: DeserializeOwned>(&self, path: &str) -> AppResult<BTreeMap<String, T>> {
        Ok(self.read(path)?.unwrap_or_default())
    }

    /// Path of the current organization, failing when none is selected
    fn org_path(&self) -> AppResult<String> {
        self.current_org_id()
            .map(|key| format!("orgs.{key}"))
            .ok_or(AppError::NoCurrentOrg)
    }

    // Organizations

    /// Add an organization with no users, friends, or current user
    pub fn add_org(&self, key: &str, name: &str) -> AppResult<Organization> {
        Self::check_key("organization", key)?;
        if let Some(existing) = self.read::<Organization>(&format!("orgs.{key}"))? {
            return Err(AppError::DuplicateOrg {
                name: existing.name,
                key: key.to_string(),
            });
        }
        let org = Organization::new(key, name);
        self.write(&format!("orgs.{key}"), &org)?;
        debug!("Added organization {} ({})", name, key);
        Ok(org)
    }

    /// Every known organization, keyed by registration key
    pub fn list_orgs(&self) -> AppResult<BTreeMap<String, Organization>> {
        self.read_map("orgs")
    }

    pub fn org_options(&self) -> AppResult<Vec<Choice>> {
        Ok(self
            .list_orgs()?
            .into_iter()
            .map(|(key, org)| Choice::new(org.name, key))
            .collect())
    }

    /// Display name of an organization, or the key itself when unknown
    pub fn org_name(&self, key: &str) -> String {
        self.list_orgs()
            .ok()
            .and_then(|mut orgs| orgs.remove(key))
            .map_or_else(|| key.to_string(), |org| org.name)
    }

    pub fn current_org_id(&self) -> Option<String> {
        let key = self.store.get(CURRENT_ORG)?.as_str()?.to_string();
        if !Self::is_valid_key(&key) {
            return None;
        }
        self.store.get(&format!("orgs.{key}")).map(|_| key)
    }

    pub fn current_org(&self) -> AppResult<Option<Organization>> {
        match self.current_org_id() {
            Some(key) => self.read(&format!("orgs.{key}")),
            None => Ok(None),
        }
    }

    /// Make an existing organization the current one
    pub fn set_current_org(&self, key: &str) -> AppResult<Organization> {
        let not_found = || AppError::OrgNotFound {
            key: key.to_string(),
        };
        if !Self::is_valid_key(key) {
            return Err(not_found());
        }
        let org = self
            .read::<Organization>(&format!("orgs.{key}"))?
            .ok_or_else(not_found)?;
        self.store.set(CURRENT_ORG, Value::String(key.to_string()))?;
        debug!("Current organization is now {}", key);
        Ok(org)
    }

    /// Remove an organization with all its users and friends
    ///
    /// Clears the current pointer first when it names this organization.
    /// Removing an unknown key succeeds.
    pub fn remove_org(&self, key: &str) -> AppResult<bool> {
        if !Self::is_valid_key(key) {
            return Ok(true);
        }
        if self.current_org_id().as_deref() == Some(key) {
            self.store.delete(CURRENT_ORG)?;
        }
        self.store.delete(&format!("orgs.{key}"))?;
        debug!("Removed organization {}", key);
        Ok(true)
    }

    // Users

    /// Add a user to the current organization
    ///
    /// Only the fields the storage strategy requires are kept, and every one
    /// of them must be non-empty. The strategy's fixed fields are stamped on
    /// afterwards.
    pub fn add_user(&self, fields: &BTreeMap<String, String>) -> AppResult<User> {
        let org_path = self.org_path()?;

        let mut kept: BTreeMap<String, String> = fields
            .iter()
            .filter(|(field, value)| {
                self.schema.required.contains(&field.as_str()) && !value.trim().is_empty()
            })
            .map(|(field, value)| (field.clone(), value.clone()))
            .collect();
        let missing: Vec<String> = self
            .schema
            .required
            .iter()
            .filter(|field| !kept.contains_key(**field))
            .map(|field| field.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(AppError::IncompleteUser { missing });
        }

        let key = kept.remove("key").unwrap_or_default();
        let name = kept.remove("name").unwrap_or_default();
        Self::check_key("user", &key)?;

        let path = format!("{org_path}.users.{key}");
        if let Some(existing) = self.read::<User>(&path)? {
            return Err(AppError::DuplicateUser {
                name: existing.name,
                key,
            });
        }

        for (field, value) in self.schema.fixed {
            kept.insert(field.to_string(), value.to_string());
        }
        let user = User {
            key,
            name,
            credentials: kept,
        };
        self.write(&path, &user)?;
        debug!("Added user {} ({}) under {}", user.name, user.key, org_path);
        Ok(user)
    }

    /// Users of the current organization; empty when no organization is selected
    pub fn list_users(&self) -> AppResult<BTreeMap<String, User>> {
        match self.org_path() {
            Ok(org_path) => self.read_map(&format!("{org_path}.users")),
            Err(_) => Ok(BTreeMap::new()),
        }
    }

    pub fn user_options(&self) -> AppResult<Vec<Choice>> {
        Ok(self
            .list_users()?
            .into_iter()
            .map(|(key, user)| Choice::new(user.name, key))
            .collect())
    }

    pub fn user_name(&self, key: &str) -> String {
        self.list_users()
            .ok()
            .and_then(|mut users| users.remove(key))
            .map_or_else(|| key.to_string(), |user| user.name)
    }

    pub fn current_user_id(&self) -> Option<String> {
        let org_path = self.org_path().ok()?;
        let key = self
            .store
            .get(&format!("{org_path}.currentUser"))?
            .as_str()?
            .to_string();
        if !Self::is_valid_key(&key) {
            return None;
        }
        self.store
            .get(&format!("{org_path}.users.{key}"))
            .map(|_| key)
    }

    pub fn current_user(&self) -> AppResult<Option<User>> {
        match (self.org_path(), self.current_user_id()) {
            (Ok(org_path), Some(key)) => self.read(&format!("{org_path}.users.{key}")),
            _ => Ok(None),
        }
    }

    /// Make an existing user of the current organization the current one
    pub fn set_current_user(&self, key: &str) -> AppResult<User> {
        let org_path = self.org_path()?;
        let not_found = || AppError::UserNotFound {
            key: key.to_string(),
        };
        if !Self::is_valid_key(key) {
            return Err(not_found());
        }
        let user = self
            .read::<User>(&format!("{org_path}.users.{key}"))?
            .ok_or_else(not_found)?;
        self.store
            .set(&format!("{org_path}.currentUser"), Value::String(key.to_string()))?;
        debug!("Current user is now {}", key);
        Ok(user)
    }

    /// Remove a user from the current organization, clearing the current
    /// pointer when it names that user
    pub fn remove_user(&self, key: &str) -> AppResult<bool> {
        let Ok(org_path) = self.org_path() else {
            return Ok(true);
        };
        if !Self::is_valid_key(key) {
            return Ok(true);
        }
        if self.current_user_id().as_deref() == Some(key) {
            self.store.delete(&format!("{org_path}.currentUser"))?;
        }
        self.store.delete(&format!("{org_path}.users.{key}"))?;
        debug!("Removed user {} from {}", key, org_path);
        Ok(true)
    }

    /// Human readable dump of the current user's credentials
    pub fn format_user(&self) -> AppResult<String> {
        let user = self.current_user()?.ok_or(AppError::NoCurrentUser)?;
        let mut text = format!("\nName: {}\nKey: {}\n", user.name, user.key);
        for (field, value) in &user.credentials {
            text.push_str(&format!("{}: {}\n", label(field), value));
        }
        Ok(text)
    }

    // Friends

    pub fn list_friends(&self) -> AppResult<BTreeMap<String, Friend>> {
        match self.org_path() {
            Ok(org_path) => self.read_map(&format!("{org_path}.friends")),
            Err(_) => Ok(BTreeMap::new()),
        }
    }

    pub fn friend_options(&self) -> AppResult<Vec<Choice>> {
        Ok(self
            .list_friends()?
            .into_iter()
            .map(|(key, friend)| Choice::new(friend.name, key))
            .collect())
    }

    pub fn friend_name(&self, key: &str) -> String {
        self.list_friends()
            .ok()
            .and_then(|mut friends| friends.remove(key))
            .map_or_else(|| key.to_string(), |friend| friend.name)
    }

    /// Add a friend to the current organization with an empty share set
    pub fn add_friend(&self, key: &str, name: &str) -> AppResult<Friend> {
        let org_path = self.org_path()?;
        Self::check_key("friend", key)?;
        let path = format!("{org_path}.friends.{key}");
        if let Some(existing) = self.read::<Friend>(&path)? {
            return Err(AppError::DuplicateFriend {
                name: existing.name,
                key: key.to_string(),
            });
        }
        let friend = Friend::new(key, name);
        self.write(&path, &friend)?;
        debug!("Added friend {} ({}) under {}", name, key, org_path);
        Ok(friend)
    }

    pub fn remove_friend(&self, key: &str) -> AppResult<bool> {
        let Ok(org_path) = self.org_path() else {
            return Ok(true);
        };
        if !Self::is_valid_key(key) {
            return Ok(true);
        }
        self.store.delete(&format!("{org_path}.friends.{key}"))?;
        debug!("Removed friend {} from {}", key, org_path);
        Ok(true)
    }

    /// Whether the current user already opened a sharing channel to a friend
    pub fn have_shared_with_friend(&self, key: &str) -> AppResult<bool> {
        let Some(user) = self.current_user_id() else {
            return Ok(false);
        };
        Ok(self
            .list_friends()?
            .get(key)
            .is_some_and(|friend| friend.shared.contains(&user)))
    }

    /// Record that the current user shared with a friend
    ///
    /// Idempotent: sharing again with the same friend changes nothing.
    pub fn share_with_friend(&self, key: &str) -> AppResult<bool> {
        let org_path = self.org_path()?;
        let user = self.current_user_id().ok_or(AppError::NoCurrentUser)?;
        let mut friend = self
            .list_friends()?
            .remove(key)
            .ok_or_else(|| AppError::FriendNotFound {
                key: key.to_string(),
            })?;
        if friend.shared.insert(user) {
            self.write(&format!("{org_path}.friends.{key}"), &friend)?;
            debug!("Recorded share lock for friend {}", key);
        }
        Ok(true)
    }
}

fn label(field: &str) -> String {
    field
        .split('_')
        .map(|word| match word {
            "api" | "id" | "url" => word.to_uppercase(),
            _ => {
                let mut chars = word.chars();
                chars
                    .next()
                    .map(|first| first.to_uppercase().chain(chars).collect::<String>())
                    .unwrap_or_default()
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}
