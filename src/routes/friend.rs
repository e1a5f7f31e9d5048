//! `add friend`

use async_trait::async_trait;

use super::{ensure_org, help, offer_retry};
use crate::errors::AppResult;
use crate::routing::{Route, RouteHandler, RouteResult};
use crate::store::Store;

struct AddFriend;

#[async_trait]
impl RouteHandler for AddFriend {
    async fn run(&self, store: &Store) -> AppResult<RouteResult> {
        ensure_org(store).await?;
        loop {
            let answers = store.prompter().ask(&store.fields().friend_fields()).await?;
            match store
                .conf()
                .add_friend(answers.text("key")?, answers.text("name")?)
            {
                Ok(friend) => {
                    return Ok(RouteResult::success(format!("{} has been added.", friend.name))
                        .with_data(serde_json::to_value(&friend)?));
                }
                Err(err) if err.is_recoverable() => {
                    if !offer_retry(store, &err).await? {
                        return Ok(RouteResult::failure(err));
                    }
                }
                Err(err) => return Err(err),
            }
        }
    }
}

/// `fidelius add friend`
pub fn add() -> AppResult<Route> {
    Route::builder("add-friend")
        .test(|args| args.starts_with(&["add", "friend"]))
        .run(AddFriend)
        .help(help::command("add friend", "Add a friend to share to"))
        .build()
}
