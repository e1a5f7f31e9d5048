//! `add org` and `change org`

use async_trait::async_trait;
use serde_json::json;

use super::{help, offer_retry, produced_key};
use crate::errors::AppResult;
use crate::output::Printable;
use crate::routing::{delegate, Route, RouteHandler, RouteResult};
use crate::store::Store;

struct AddOrg;

#[async_trait]
impl RouteHandler for AddOrg {
    async fn run(&self, store: &Store) -> AppResult<RouteResult> {
        loop {
            let answers = store.prompter().ask(&store.fields().org_fields()).await?;
            match store.conf().add_org(answers.text("key")?, answers.text("name")?) {
                Ok(org) => {
                    return Ok(RouteResult::success(format!(
                        "The {} organization has been added",
                        org.name
                    ))
                    .with_data(serde_json::to_value(&org)?));
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

struct ChangeOrg;

#[async_trait]
impl RouteHandler for ChangeOrg {
    async fn run(&self, store: &Store) -> AppResult<RouteResult> {
        let options = store.conf().org_options()?;
        let key = if options.is_empty() {
            store
                .printer()
                .print(&Printable::confirm("No organizations found. Make a new one?"));
            let added = delegate(&add()?, store).await?;
            produced_key(&added, "organization")?
        } else {
            store
                .prompter()
                .select("Select an organization to make active:", options)
                .await?
        };

        let org = store.conf().set_current_org(&key)?;
        Ok(RouteResult::success(format!("{} is now the active organization.", org.name))
            .with_data(json!(key)))
    }
}

/// `fidelius add org`
pub fn add() -> AppResult<Route> {
    Route::builder("add-org")
        .test(|args| args.starts_with(&["add", "org"]))
        .run(AddOrg)
        .help(help::command("add org", "Add an organization for selection"))
        .build()
}

/// `fidelius change org`
pub fn change() -> AppResult<Route> {
    Route::builder("change-org")
        .test(|args| args.starts_with(&["change", "org"]))
        .run(ChangeOrg)
        .help(help::command(
            "change org",
            "Switch which organization fidelius is associated with",
        ))
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::AppError;
    use crate::output::PrintKind;
    use crate::prompt::Answer;
    use crate::routing::ParsedArgs;
    use crate::store::tests::fixture;

    #[tokio::test]
    async fn test_add_org() {
        let (store, _) = fixture(
            ParsedArgs::from_words("add org"),
            vec!["acme".into(), "Acme".into()],
        );
        let result = add().unwrap().run(&store).await.unwrap();

        assert_eq!(result.text(), Some("The Acme organization has been added"));
        assert_eq!(result.data().key().as_deref(), Some("acme"));
        assert_eq!(store.conf().org_name("acme"), "Acme");
    }

    #[tokio::test]
    async fn test_add_org_retries_after_duplicate() {
        let (store, log) = fixture(
            ParsedArgs::from_words("add org"),
            vec![
                "acme".into(),
                "Other".into(),
                true.into(),
                "globex".into(),
                "Globex".into(),
            ],
        );
        store.conf().add_org("acme", "Acme").unwrap();

        let result = add().unwrap().run(&store).await.unwrap();
        assert_eq!(result.kind(), PrintKind::Success);
        assert_eq!(result.data().key().as_deref(), Some("globex"));

        let log = log.lock().unwrap();
        assert_eq!(log.len(), 1);
        assert_eq!(log[0].0, PrintKind::Error);
        assert!(log[0].1.contains("already exists"));
        // The first organization is untouched.
        assert_eq!(store.conf().org_name("acme"), "Acme");
    }

    #[tokio::test]
    async fn test_declining_retry_fails_route() {
        let (store, _) = fixture(
            ParsedArgs::from_words("add org"),
            vec!["acme".into(), "Other".into(), false.into()],
        );
        store.conf().add_org("acme", "Acme").unwrap();

        let result = add().unwrap().run(&store).await.unwrap();
        assert!(result.is_error());
        assert_eq!(result.exit_code(), 1);
        assert!(matches!(result.data().error(), Some(AppError::DuplicateOrg { .. })));
    }

    #[tokio::test]
    async fn test_change_org_selects_existing() {
        let (store, _) = fixture(ParsedArgs::from_words("change org"), vec!["Globex".into()]);
        store.conf().add_org("acme", "Acme").unwrap();
        store.conf().add_org("globex", "Globex").unwrap();

        let result = change().unwrap().run(&store).await.unwrap();
        assert_eq!(result.text(), Some("Globex is now the active organization."));
        assert_eq!(store.conf().current_org_id().as_deref(), Some("globex"));
    }

    #[tokio::test]
    async fn test_change_org_without_orgs_adds_one() {
        let answers: Vec<Answer> = vec!["acme".into(), "Acme".into()];
        let (store, log) = fixture(ParsedArgs::from_words("change org"), answers);

        let result = change().unwrap().run(&store).await.unwrap();
        assert_eq!(result.data().key().as_deref(), Some("acme"));
        assert_eq!(store.conf().current_org_id().as_deref(), Some("acme"));

        let log = log.lock().unwrap();
        assert_eq!(
            *log,
            vec![
                (PrintKind::Confirm, "No organizations found. Make a new one?".to_string()),
                (PrintKind::Success, "The Acme organization has been added".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_change_org_stops_when_adding_fails() {
        let (store, _) = fixture(ParsedArgs::from_words("change org"), vec![]);
        let err = change().unwrap().run(&store).await.unwrap_err();
        assert!(matches!(err, AppError::Prompt { .. }));
    }
}
