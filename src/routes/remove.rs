//! `remove org`, `remove user`, and `remove friend`
//!
//! The three commands share one flow: pick entries, show what is about to
//! be lost, and ask for a confirmation that defaults to no.

use async_trait::async_trait;
use serde_json::json;

use super::help;
use crate::configuration::Configuration;
use crate::errors::AppResult;
use crate::output::Printable;
use crate::prompt::Choice;
use crate::routing::{Route, RouteHandler, RouteResult};
use crate::store::Store;

struct Removal {
    /// Plural noun for messages, e.g. "organizations"
    plural: &'static str,
    /// What removing an entry destroys, appended to the warning
    consequence: &'static str,
    options: fn(&Configuration) -> AppResult<Vec<Choice>>,
    name: fn(&Configuration, &str) -> String,
    remove: fn(&Configuration, &str) -> AppResult<bool>,
}

#[async_trait]
impl RouteHandler for Removal {
    async fn run(&self, store: &Store) -> AppResult<RouteResult> {
        let conf = store.conf();
        let options = (self.options)(conf)?;
        if options.is_empty() {
            return Ok(RouteResult::warning(format!(
                "There are currently no {} defined. Nothing to remove.",
                self.plural
            ))
            .with_data(json!(false)));
        }

        let selected = store
            .prompter()
            .multi_select(&format!("Select the {} to remove:", self.plural), options)
            .await?;
        if selected.is_empty() {
            return Ok(RouteResult::confirm(format!(
                "No {} selected. Nothing was removed.",
                self.plural
            ))
            .with_data(json!(false)));
        }

        let names = selected
            .iter()
            .map(|key| (self.name)(conf, key))
            .collect::<Vec<_>>()
            .join(", ");
        store.printer().print(&Printable::warning(format!(
            "Removing {names} {}",
            self.consequence
        )));

        if !store
            .prompter()
            .confirm("Are you absolutely sure you want to continue?", false)
            .await?
        {
            return Ok(RouteResult::confirm(format!("OK, {names} was/were not removed."))
                .with_data(json!(false)));
        }

        for key in &selected {
            (self.remove)(conf, key)?;
        }
        Ok(RouteResult::success(format!(
            "{names} and all associated local data has/have been removed."
        ))
        .with_data(json!(true)))
    }
}

/// `fidelius remove org`
pub fn org() -> AppResult<Route> {
    Route::builder("remove-org")
        .test(|args| args.starts_with(&["remove", "org"]))
        .run(Removal {
            plural: "organizations",
            consequence: "will also remove all of its users and friends. They can not be recovered.",
            options: Configuration::org_options,
            name: Configuration::org_name,
            remove: Configuration::remove_org,
        })
        .help(help::command(
            "remove org",
            "Remove an organization and all users and friends",
        ))
        .build()
}

/// `fidelius remove user`
pub fn user() -> AppResult<Route> {
    Route::builder("remove-user")
        .test(|args| args.starts_with(&["remove", "user"]))
        .run(Removal {
            plural: "users",
            consequence: "will delete their local credentials. Without a backup they can not be recovered.",
            options: Configuration::user_options,
            name: Configuration::user_name,
            remove: Configuration::remove_user,
        })
        .help(help::command(
            "remove user",
            "Remove a user from the current organization configuration",
        ))
        .build()
}

/// `fidelius remove friend`
pub fn friend() -> AppResult<Route> {
    Route::builder("remove-friend")
        .test(|args| args.starts_with(&["remove", "friend"]))
        .run(Removal {
            plural: "friends",
            consequence: "will stop you from sharing new messages with them until they are added again.",
            options: Configuration::friend_options,
            name: Configuration::friend_name,
            remove: Configuration::remove_friend,
        })
        .help(help::command(
            "remove friend",
            "Remove a friend from the current organization configuration",
        ))
        .build()
}
