//! Backend connection contract
//!
//! Routes talk to message storage only through `DbConnection`. The core
//! never looks inside backend errors beyond their message.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::AppResult;

/// A stored secret message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub key: String,
    pub title: String,
    pub message: String,
    /// Client ID of the user that wrote the message
    pub author: String,
    /// Client ID of the friend the message was written for
    pub friend: String,
    pub created_at: DateTime<Utc>,
}

/// Operations a storage backend provides for the current user
#[async_trait]
pub trait DbConnection: Send + Sync {
    /// Register a new identity on the current organization
    ///
    /// Returns the full credential bundle to store with the user,
    /// including `key` and `name`.
    async fn register(&self, name: &str) -> AppResult<BTreeMap<String, String>>;

    /// Write a message for a friend, opening a sharing channel if needed
    async fn create_message(&self, text: &str, title: &str, friend: &str) -> AppResult<Message>;

    async fn read_message(&self, key: &str) -> AppResult<Message>;

    async fn delete_message(&self, key: &str) -> AppResult<bool>;

    /// Messages written by the current user
    async fn list_user_messages(&self) -> AppResult<Vec<Message>>;

    /// Messages other users shared with the current user
    async fn list_shared_messages(&self) -> AppResult<Vec<Message>>;
}
