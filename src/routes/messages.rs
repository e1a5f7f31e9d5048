//! `new`, `list`, and `read`

use std::collections::HashMap;

use async_trait::async_trait;
use futures::future::join_all;

use super::{batch_report, help, produced_key, Outcome};
use crate::backend::Message;
use crate::configuration::Configuration;
use crate::errors::AppResult;
use crate::prompt::{Choice, Question, Validator};
use crate::routing::{delegate, Route, RouteHandler, RouteResult};
use crate::store::Store;

const NEW_FRIEND: &str = "New Friend";

struct NewMessage;

#[async_trait]
impl RouteHandler for NewMessage {
    async fn run(&self, store: &Store) -> AppResult<RouteResult> {
        let mut options = vec![Choice::new(NEW_FRIEND, NEW_FRIEND)];
        options.extend(store.conf().friend_options()?);

        let answers = store
            .prompter()
            .ask(&[
                Question::input("title", "Message Title:"),
                Question::editor("message", "Message:")
                    .validate(Validator::non_empty("Please enter a message.")),
                Question::multi_select(
                    "friends",
                    "Who should this message be shared with?",
                    options,
                    1,
                ),
            ])
            .await?;
        let title = answers.text("title")?;
        let text = answers.text("message")?;
        let selected = answers.list("friends")?;

        let mut recipients: Vec<String> = Vec::new();
        for friend in selected.iter().filter(|friend| *friend != NEW_FRIEND) {
            if !recipients.contains(friend) {
                recipients.push(friend.clone());
            }
        }
        if selected.iter().any(|friend| friend == NEW_FRIEND) {
            let added = delegate(&super::friend::add()?, store).await?;
            recipients.push(produced_key(&added, "friend")?);
        }

        let conf = store.conf();
        let db = store.db();
        let outcomes = join_all(recipients.iter().map(|friend| async move {
            Outcome {
                key: friend.clone(),
                label: conf.friend_name(friend),
                result: db.create_message(text, title, friend).await.map(|_| ()),
            }
        }))
        .await;

        Ok(batch_report(
            outcomes,
            format!("The message {title} has been shared."),
        ))
    }
}

struct ListMessages;

#[async_trait]
impl RouteHandler for ListMessages {
    async fn run(&self, store: &Store) -> AppResult<RouteResult> {
        let conf = store.conf();
        let db = store.db();
        let messages = db.list_user_messages().await?;
        if messages.is_empty() {
            return Ok(RouteResult::confirm("You have no unread messages."));
        }

        let options = messages
            .iter()
            .map(|m| {
                Choice::new(
                    format!("{} shared with {}", m.title, conf.friend_name(&m.friend)),
                    m.key.clone(),
                )
            })
            .collect();
        let selected = store
            .prompter()
            .multi_select("Select messages to manage:", options)
            .await?;
        if selected.is_empty() {
            return Ok(RouteResult::confirm("No messages selected"));
        }

        let action = store
            .prompter()
            .select(
                "What would you like to do?",
                vec![
                    Choice::new("Expire Message", "expire"),
                    Choice::new("Cancel", "cancel"),
                ],
            )
            .await?;
        if action != "expire" {
            return Ok(RouteResult::confirm("Action cancelled."));
        }

        let titles: HashMap<&str, &str> = messages
            .iter()
            .map(|m| (m.key.as_str(), m.title.as_str()))
            .collect();
        let titles = &titles;
        let outcomes = join_all(selected.iter().map(|key| async move {
            Outcome {
                key: key.clone(),
                label: titles.get(key.as_str()).map_or_else(|| key.clone(), |t| t.to_string()),
                result: db.delete_message(key).await.map(|_| ()),
            }
        }))
        .await;

        Ok(batch_report(
            outcomes,
            "The selected messages have been expired and can no longer be read.",
        ))
    }
}

struct ReadMessage;

impl ReadMessage {
    fn format(message: &Message, conf: &Configuration) -> String {
        format!(
            "\nMessage ID: {}\nShared By: {}\nTitle: {}\n\n{}",
            message.key,
            conf.friend_name(&message.author),
            message.title,
            message.message
        )
    }
}

#[async_trait]
impl RouteHandler for ReadMessage {
    async fn run(&self, store: &Store) -> AppResult<RouteResult> {
        let conf = store.conf();
        let key = match &store.args().flags.key {
            Some(key) => key.clone(),
            None => {
                let messages = store.db().list_shared_messages().await?;
                if messages.is_empty() {
                    return Ok(RouteResult::warning("No messages have been shared with you."));
                }
                let options = messages
                    .iter()
                    .map(|m| {
                        Choice::new(
                            format!("{} shared by {}", m.title, conf.friend_name(&m.author)),
                            m.key.clone(),
                        )
                    })
                    .collect();
                store
                    .prompter()
                    .select("Select a message to read:", options)
                    .await?
            }
        };

        let message = store.db().read_message(&key).await?;
        Ok(RouteResult::raw(Self::format(&message, conf))
            .with_data(serde_json::to_value(&message)?))
    }
}

/// `fidelius new`
pub fn new() -> AppResult<Route> {
    Route::builder("new")
        .test(|args| args.starts_with(&["new"]))
        .run(NewMessage)
        .help(help::command("new", "Write a new secret message"))
        .build()
}

/// `fidelius list`
pub fn list() -> AppResult<Route> {
    Route::builder("list")
        .test(|args| args.starts_with(&["list"]))
        .run(ListMessages)
        .help(help::command("list", "List unread messages you have written"))
        .build()
}

/// `fidelius read [--key <KEY>]`
pub fn read() -> AppResult<Route> {
    Route::builder("read")
        .test(|args| args.starts_with(&["read"]))
        .run(ReadMessage)
        .help(help::command(
            "read [--key <KEY>]",
            "Read a shared secret message",
        ))
        .build()
}
