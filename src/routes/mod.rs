//! The fidelius command set
//!
//! Order matters: the router runs the first route whose predicate accepts
//! the input, so the bare `--version` check sits before `info`, and the
//! catch-all `no-route` is kept apart as the fallback.

pub mod friend;
pub mod help;
pub mod info;
pub mod messages;
pub mod no_route;
pub mod org;
pub mod remove;
pub mod user;
pub mod version;

use serde_json::json;
use tracing::debug;

use crate::errors::{AppError, AppResult};
use crate::output::Printable;
use crate::routing::{delegate, RouteResult, Router};
use crate::store::Store;

/// Build the router with every command in dispatch order
pub fn router() -> AppResult<Router> {
    Ok(Router::new(
        vec![
            version::route()?,
            info::route()?,
            org::add()?,
            org::change()?,
            remove::org()?,
            user::add()?,
            user::change()?,
            remove::user()?,
            friend::add()?,
            remove::friend()?,
            messages::new()?,
            messages::list()?,
            messages::read()?,
            user::export()?,
        ],
        no_route::route()?,
    ))
}

/// Make sure an organization is selected, running `change org` if not
pub(crate) async fn ensure_org(store: &Store) -> AppResult<String> {
    if let Some(key) = store.conf().current_org_id() {
        return Ok(key);
    }
    store.printer().print(&Printable::confirm(
        "No current organization. Setting a new current organization.",
    ));
    delegate(&org::change()?, store).await?;
    store.conf().current_org_id().ok_or(AppError::NoCurrentOrg)
}

/// The key a delegated route produced
pub(crate) fn produced_key(result: &RouteResult, what: &str) -> AppResult<String> {
    result
        .data()
        .key()
        .ok_or_else(|| AppError::other(format!("adding a {what} did not produce a key")))
}

/// Show a recoverable error and ask whether to try again
pub(crate) async fn offer_retry(store: &Store, err: &AppError) -> AppResult<bool> {
    debug!("Recoverable error: {}", err);
    store.printer().print(&Printable::error(err.to_string()));
    store.prompter().confirm("Try again?", true).await
}

/// Result of one item in a concurrent batch
pub(crate) struct Outcome {
    pub key: String,
    pub label: String,
    pub result: AppResult<()>,
}

/// Summarise a batch item by item
///
/// All items succeeded: a success result whose data lists their keys.
/// Otherwise an error result naming every failed item, with the keys of
/// the items that did go through under `succeeded`.
pub(crate) fn batch_report(outcomes: Vec<Outcome>, success: impl Into<String>) -> RouteResult {
    let total = outcomes.len();
    let (done, failed): (Vec<Outcome>, Vec<Outcome>) =
        outcomes.into_iter().partition(|outcome| outcome.result.is_ok());
    let succeeded: Vec<String> = done.into_iter().map(|outcome| outcome.key).collect();

    if failed.is_empty() {
        return RouteResult::success(success).with_data(json!(succeeded));
    }

    let details: Vec<String> = failed
        .iter()
        .filter_map(|outcome| {
            outcome
                .result
                .as_ref()
                .err()
                .map(|err| format!("{}: {}", outcome.label, err))
        })
        .collect();
    debug!("{} of {} batch operations failed", failed.len(), total);
    RouteResult::error(format!(
        "{} of {} failed. {}",
        failed.len(),
        total,
        details.join("; ")
    ))
    .with_data(json!({ "succeeded": succeeded }))
}
