//! Mailbox-backed implementation of the backend contract
//!
//! Each organization has one mailbox holding its registered clients, the
//! messages they wrote, and the read grants authors handed out. A mailbox
//! lives either in a JSON file per organization or in process memory.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::debug;
use uuid::Uuid;

use crate::backend::{DbConnection, Message};
use crate::configuration::{Configuration, User};
use crate::errors::{AppError, AppResult, ErrorContextExt};

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Client {
    name: String,
    api_secret: String,
}

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
struct Mailbox {
    #[serde(default)]
    clients: BTreeMap<String, Client>,
    #[serde(default)]
    messages: BTreeMap<String, Message>,
    /// Author client ID -> friends allowed to read that author's messages
    #[serde(default)]
    grants: BTreeMap<String, BTreeSet<String>>,
}

impl Mailbox {
    fn can_read(&self, reader: &str, message: &Message) -> bool {
        message.author == reader
            || (message.friend == reader
                && self
                    .grants
                    .get(&message.author)
                    .is_some_and(|readers| readers.contains(reader)))
    }

    fn message(&self, key: &str) -> AppResult<&Message> {
        self.messages
            .get(key)
            .ok_or_else(|| AppError::backend(format!("No message found with ID {key}")))
    }
}

enum Backing {
    Directory(PathBuf),
    Memory(HashMap<String, Mailbox>),
}

impl Backing {
    fn file(dir: &std::path::Path, org: &str) -> PathBuf {
        dir.join(format!("{org}.json"))
    }

    async fn load(&self, org: &str) -> AppResult<Mailbox> {
        match self {
            Backing::Memory(mailboxes) => Ok(mailboxes.get(org).cloned().unwrap_or_default()),
            Backing::Directory(dir) => {
                let path = Self::file(dir, org);
                if !tokio::fs::try_exists(&path).await.unwrap_or(false) {
                    return Ok(Mailbox::default());
                }
                let content = tokio::fs::read_to_string(&path)
                    .await
                    .in_file_operation(&path, "read mailbox")?;
                serde_json::from_str(&content).in_file_operation(&path, "parse mailbox")
            }
        }
    }

    async fn save(&mut self, org: &str, mailbox: &Mailbox) -> AppResult<()> {
        match self {
            Backing::Memory(mailboxes) => {
                mailboxes.insert(org.to_string(), mailbox.clone());
                Ok(())
            }
            Backing::Directory(dir) => {
                tokio::fs::create_dir_all(dir.as_path())
                    .await
                    .in_file_operation(dir.as_path(), "create mailbox directory")?;
                let path = Self::file(dir, org);
                let content = serde_json::to_string_pretty(mailbox)?;
                tokio::fs::write(&path, content)
                    .await
                    .in_file_operation(&path, "write mailbox")
            }
        }
    }
}

/// A backend connection keeping messages in a local mailbox
///
/// Every operation except `register` authenticates the configuration's
/// current user against the mailbox's client list. Read-modify-write cycles
/// on the mailbox are serialised, so concurrent calls are safe.
pub struct LocalConnection {
    conf: Arc<Configuration>,
    backing: Mutex<Backing>,
}

impl LocalConnection {
    /// Keep mailboxes as JSON files under `dir`
    pub fn persistent(conf: Arc<Configuration>, dir: impl Into<PathBuf>) -> Self {
        Self {
            conf,
            backing: Mutex::new(Backing::Directory(dir.into())),
        }
    }

    /// Keep mailboxes in memory until the process exits
    pub fn in_memory(conf: Arc<Configuration>) -> Self {
        Self {
            conf,
            backing: Mutex::new(Backing::Memory(HashMap::new())),
        }
    }

    fn current_org(&self) -> AppResult<String> {
        self.conf.current_org_id().ok_or(AppError::NoCurrentOrg)
    }

    fn current_user(&self) -> AppResult<User> {
        self.conf.current_user()?.ok_or(AppError::NoCurrentUser)
    }

    fn authenticate(mailbox: &Mailbox, user: &User) -> AppResult<()> {
        let secret = user.credential("api_secret").unwrap_or_default();
        match mailbox.clients.get(&user.key) {
            Some(client) if client.api_secret == secret => Ok(()),
            _ => Err(AppError::backend(format!(
                "Authentication failed for client {}",
                user.key
            ))),
        }
    }

    fn generate_secret() -> String {
        let bytes: [u8; 32] = rand::thread_rng().gen();
        bytes.iter().map(|b| format!("{b:02x}")).collect()
    }

    /// Load the current organization's mailbox and authenticate the current user
    async fn session(&self) -> AppResult<(String, User, Mailbox)> {
        let org = self.current_org()?;
        let user = self.current_user()?;
        let mailbox = self.backing.lock().await.load(&org).await?;
        Self::authenticate(&mailbox, &user)?;
        Ok((org, user, mailbox))
    }
}

#[async_trait]
impl DbConnection for LocalConnection {
    async fn register(&self, name: &str) -> AppResult<BTreeMap<String, String>> {
        let org = self
            .current_org()
            .map_err(|_| AppError::backend("An organization must be available to register a user."))?;

        let key = Uuid::new_v4().to_string();
        let api_secret = Self::generate_secret();

        let mut backing = self.backing.lock().await;
        let mut mailbox = backing.load(&org).await?;
        mailbox.clients.insert(
            key.clone(),
            Client {
                name: name.to_string(),
                api_secret: api_secret.clone(),
            },
        );
        backing.save(&org, &mailbox).await?;
        debug!("Registered client {} on {}", key, org);

        Ok(BTreeMap::from([
            ("key".to_string(), key),
            ("name".to_string(), name.to_string()),
            ("api_secret".to_string(), api_secret),
        ]))
    }

    async fn create_message(&self, text: &str, title: &str, friend: &str) -> AppResult<Message> {
        let org = self.current_org()?;
        let user = self.current_user()?;
        let first_share = !self.conf.have_shared_with_friend(friend)?;

        let message = {
            let mut backing = self.backing.lock().await;
            let mut mailbox = backing.load(&org).await?;
            Self::authenticate(&mailbox, &user)?;
            if !mailbox.clients.contains_key(friend) {
                return Err(AppError::backend(format!(
                    "No client is registered at ID {friend} on this organization."
                )));
            }

            let message = Message {
                key: Uuid::new_v4().to_string(),
                title: title.to_string(),
                message: text.to_string(),
                author: user.key.clone(),
                friend: friend.to_string(),
                created_at: Utc::now(),
            };
            mailbox.messages.insert(message.key.clone(), message.clone());
            if first_share {
                mailbox
                    .grants
                    .entry(user.key.clone())
                    .or_default()
                    .insert(friend.to_string());
            }
            backing.save(&org, &mailbox).await?;
            message
        };

        if first_share {
            self.conf.share_with_friend(friend)?;
            debug!("Opened sharing channel from {} to {}", user.key, friend);
        }
        debug!("Created message {} for {}", message.key, friend);
        Ok(message)
    }

    async fn read_message(&self, key: &str) -> AppResult<Message> {
        let (_, user, mailbox) = self.session().await?;
        let message = mailbox.message(key)?;
        if !mailbox.can_read(&user.key, message) {
            return Err(AppError::backend(format!(
                "You are not allowed to read message {key}"
            )));
        }
        Ok(message.clone())
    }

    async fn delete_message(&self, key: &str) -> AppResult<bool> {
        let org = self.current_org()?;
        let user = self.current_user()?;

        let mut backing = self.backing.lock().await;
        let mut mailbox = backing.load(&org).await?;
        Self::authenticate(&mailbox, &user)?;
        if mailbox.message(key)?.author != user.key {
            return Err(AppError::backend(format!(
                "Only the author may delete message {key}"
            )));
        }
        mailbox.messages.remove(key);
        backing.save(&org, &mailbox).await?;
        debug!("Deleted message {}", key);
        Ok(true)
    }

    async fn list_user_messages(&self) -> AppResult<Vec<Message>> {
        let (_, user, mailbox) = self.session().await?;
        let mut messages: Vec<Message> = mailbox
            .messages
            .into_values()
            .filter(|m| m.author == user.key)
            .collect();
        messages.sort_by_key(|m| m.created_at);
        Ok(messages)
    }

    async fn list_shared_messages(&self) -> AppResult<Vec<Message>> {
        let (_, user, mailbox) = self.session().await?;
        let mut messages: Vec<Message> = mailbox
            .messages
            .values()
            .filter(|m| m.author != user.key && mailbox.can_read(&user.key, m))
            .cloned()
            .collect();
        messages.sort_by_key(|m| m.created_at);
        Ok(messages)
    }
}
