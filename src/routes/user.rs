//! `add user`, `change user`, and `export user`

use std::collections::BTreeMap;

use async_trait::async_trait;
use serde_json::json;

use super::{ensure_org, help, offer_retry, produced_key};
use crate::errors::AppResult;
use crate::output::Printable;
use crate::prompt::Choice;
use crate::routing::{delegate, Route, RouteHandler, RouteResult};
use crate::store::Store;

struct AddUser;

impl AddUser {
    /// Credentials for a brand new client or for one registered elsewhere
    async fn credentials(store: &Store) -> AppResult<BTreeMap<String, String>> {
        let origin = store
            .prompter()
            .select(
                "Create a new user, or add an existing one?",
                vec![Choice::new("New", "new"), Choice::new("Existing", "existing")],
            )
            .await?;

        if origin == "existing" {
            let answers = store
                .prompter()
                .ask(&store.fields().existing_user_fields())
                .await?;
            return Ok(answers.texts());
        }

        let answers = store.prompter().ask(&store.fields().new_user_fields()).await?;
        store.db().register(answers.text("name")?).await
    }
}

#[async_trait]
impl RouteHandler for AddUser {
    async fn run(&self, store: &Store) -> AppResult<RouteResult> {
        ensure_org(store).await?;
        loop {
            let fields = Self::credentials(store).await?;
            match store.conf().add_user(&fields) {
                Ok(user) => {
                    return Ok(RouteResult::success(format!("{} has been added.", user.name))
                        .with_data(serde_json::to_value(&user)?));
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

struct ChangeUser;

#[async_trait]
impl RouteHandler for ChangeUser {
    async fn run(&self, store: &Store) -> AppResult<RouteResult> {
        ensure_org(store).await?;
        let options = store.conf().user_options()?;
        let key = if options.is_empty() {
            store
                .printer()
                .print(&Printable::confirm("No users found. Make a new one?"));
            let added = delegate(&add()?, store).await?;
            produced_key(&added, "user")?
        } else {
            store
                .prompter()
                .select("Select a user to make active:", options)
                .await?
        };

        let user = store.conf().set_current_user(&key)?;
        Ok(RouteResult::success(format!("{} is now the active user.", user.name))
            .with_data(json!(key)))
    }
}

struct ExportUser;

#[async_trait]
impl RouteHandler for ExportUser {
    async fn run(&self, store: &Store) -> AppResult<RouteResult> {
        Ok(RouteResult::raw(store.conf().format_user()?))
    }
}

/// `fidelius add user`
pub fn add() -> AppResult<Route> {
    Route::builder("add-user")
        .test(|args| args.starts_with(&["add", "user"]))
        .run(AddUser)
        .help(help::command(
            "add user",
            "Add a user to share with on the selected organization",
        ))
        .build()
}

/// `fidelius change user`
pub fn change() -> AppResult<Route> {
    Route::builder("change-user")
        .test(|args| args.starts_with(&["change", "user"]))
        .run(ChangeUser)
        .help(help::command(
            "change user",
            "Switch the active user on the current organization",
        ))
        .build()
}

/// `fidelius export user`
pub fn export() -> AppResult<Route> {
    Route::builder("export-user")
        .test(|args| args.starts_with(&["export", "user"]))
        .run(ExportUser)
        .help(help::command(
            "export user",
            "Print out the configuration for the current user.",
        ))
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::AppError;
    use crate::output::PrintKind;
    use crate::routing::ParsedArgs;
    use crate::store::tests::fixture;

    const CLIENT: &str = "0a1b2c3d-0000-4000-8000-00000000beef";
    const SECRET: &str = "0123456789abcdef0123456789abcdef0123456789abcdef0123456789abcdef";

    #[tokio::test]
    async fn test_add_new_user_registers_client() {
        let (store, _) = fixture(
            ParsedArgs::from_words("add user"),
            vec!["New".into(), "Alice".into()],
        );
        store.conf().add_org("acme", "Acme").unwrap();
        store.conf().set_current_org("acme").unwrap();

        let result = add().unwrap().run(&store).await.unwrap();
        assert_eq!(result.text(), Some("Alice has been added."));

        let key = result.data().key().unwrap();
        let users = store.conf().list_users().unwrap();
        assert_eq!(users[&key].name, "Alice");
        assert_eq!(users[&key].credential("api_secret").map(str::len), Some(64));
    }

    #[tokio::test]
    async fn test_add_existing_user() {
        let (store, _) = fixture(
            ParsedArgs::from_words("add user"),
            vec!["Existing".into(), CLIENT.into(), SECRET.into(), "Bob".into()],
        );
        store.conf().add_org("acme", "Acme").unwrap();
        store.conf().set_current_org("acme").unwrap();

        let result = add().unwrap().run(&store).await.unwrap();
        assert_eq!(result.data().key().as_deref(), Some(CLIENT));
        assert_eq!(store.conf().user_name(CLIENT), "Bob");
    }

    #[tokio::test]
    async fn test_add_user_sets_up_org_first() {
        let (store, log) = fixture(
            ParsedArgs::from_words("add user"),
            vec!["acme".into(), "Acme".into(), "New".into(), "Alice".into()],
        );

        let result = add().unwrap().run(&store).await.unwrap();
        assert_eq!(result.kind(), PrintKind::Success);
        assert_eq!(store.conf().current_org_id().as_deref(), Some("acme"));

        let log = log.lock().unwrap();
        assert_eq!(
            log[0],
            (
                PrintKind::Confirm,
                "No current organization. Setting a new current organization.".to_string()
            )
        );
    }

    #[tokio::test]
    async fn test_duplicate_existing_user_can_be_abandoned() {
        let (store, _) = fixture(
            ParsedArgs::from_words("add user"),
            vec![
                "Existing".into(),
                CLIENT.into(),
                SECRET.into(),
                "Bob again".into(),
                false.into(),
            ],
        );
        let conf = store.conf();
        conf.add_org("acme", "Acme").unwrap();
        conf.set_current_org("acme").unwrap();
        conf.add_user(&BTreeMap::from([
            ("key".to_string(), CLIENT.to_string()),
            ("name".to_string(), "Bob".to_string()),
            ("api_secret".to_string(), SECRET.to_string()),
        ]))
        .unwrap();

        let result = add().unwrap().run(&store).await.unwrap();
        assert!(matches!(result.data().error(), Some(AppError::DuplicateUser { .. })));
        assert_eq!(conf.user_name(CLIENT), "Bob");
    }

    #[tokio::test]
    async fn test_change_user_without_users_adds_one() {
        let (store, _) = fixture(
            ParsedArgs::from_words("change user"),
            vec!["New".into(), "Alice".into()],
        );
        store.conf().add_org("acme", "Acme").unwrap();
        store.conf().set_current_org("acme").unwrap();

        let result = change().unwrap().run(&store).await.unwrap();
        assert_eq!(result.text(), Some("Alice is now the active user."));
        assert_eq!(store.conf().current_user_id(), result.data().key());
    }

    #[tokio::test]
    async fn test_export_user() {
        let (store, _) = fixture(ParsedArgs::from_words("export user"), vec![]);
        let conf = store.conf();
        conf.add_org("acme", "Acme").unwrap();
        conf.set_current_org("acme").unwrap();
        let fields = store.db().register("Alice").await.unwrap();
        let user = conf.add_user(&fields).unwrap();
        conf.set_current_user(&user.key).unwrap();

        let result = export().unwrap().run(&store).await.unwrap();
        let text = result.text().unwrap();
        assert!(text.contains("Name: Alice"));
        assert!(text.contains(&format!("Key: {}", user.key)));
        assert!(text.contains("API Secret:"));
    }

    #[tokio::test]
    async fn test_export_without_user_fails() {
        let (store, _) = fixture(ParsedArgs::from_words("export user"), vec![]);
        let err = export().unwrap().run(&store).await.unwrap_err();
        assert!(matches!(err, AppError::NoCurrentUser));
    }
}
