//! `fidelius` with no command: the current organization and user

use async_trait::async_trait;
use colored::Colorize;

use super::{help, user};
use crate::errors::{AppError, AppResult};
use crate::output::Printable;
use crate::routing::{delegate, Route, RouteHandler, RouteResult};
use crate::store::Store;

const LOGO: &str = r"
   _____ _     _      _ _
  |  ___(_) __| | ___| (_)_   _ ___
  | |_  | |/ _` |/ _ \ | | | | / __|
  |  _| | | (_| |  __/ | | |_| \__ \
  |_|   |_|\__,_|\___|_|_|\__,_|___/
";

struct Info;

#[async_trait]
impl RouteHandler for Info {
    async fn run(&self, store: &Store) -> AppResult<RouteResult> {
        let conf = store.conf();
        let user_id = match conf.current_user_id() {
            Some(key) => key,
            None => {
                store
                    .printer()
                    .print(&Printable::confirm("No current user. Setting a user."));
                delegate(&user::change()?, store).await?;
                conf.current_user_id().ok_or(AppError::NoCurrentUser)?
            }
        };
        let org_id = conf.current_org_id().ok_or(AppError::NoCurrentOrg)?;
        let pkg = &store.args().pkg;

        Ok(RouteResult::group(vec![
            Printable::raw(LOGO.blue().to_string()),
            Printable::raw(format!("{:>30}", format!("v{}", pkg.version)).blue().to_string()),
            Printable::raw(format!("{}\n", pkg.description.as_str().blue())),
            Printable::raw(format!(
                "{} {} ({})",
                "Organization:".bold(),
                conf.org_name(&org_id),
                org_id
            )),
            Printable::raw(format!(
                "        {} {} ({})\n",
                "User:".bold(),
                conf.user_name(&user_id),
                user_id
            )),
        ]))
    }
}

/// `fidelius` with no command
pub fn route() -> AppResult<Route> {
    Route::builder("info")
        .test(|args| args.input.is_empty())
        .run(Info)
        .help(help::command(
            "",
            "Print out the current organization and user information.",
        ))
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::PrintKind;
    use crate::routing::ParsedArgs;
    use crate::store::tests::fixture;

    fn printed(store: &Store, result: &RouteResult) {
        store.printer().print(result.printable());
    }

    #[tokio::test]
    async fn test_shows_current_org_and_user() {
        let (store, log) = fixture(ParsedArgs::default(), vec![]);
        let conf = store.conf();
        conf.add_org("acme", "Acme").unwrap();
        conf.set_current_org("acme").unwrap();
        let fields = store.db().register("Alice").await.unwrap();
        let alice = conf.add_user(&fields).unwrap();
        conf.set_current_user(&alice.key).unwrap();

        let result = route().unwrap().run(&store).await.unwrap();
        assert_eq!(result.exit_code(), 0);
        printed(&store, &result);

        let log = log.lock().unwrap();
        assert!(log.iter().all(|(kind, _)| *kind == PrintKind::Raw));
        assert!(log.iter().any(|(_, text)| text.contains("Acme (acme)")));
        assert!(log
            .iter()
            .any(|(_, text)| text.contains(&format!("Alice ({})", alice.key))));
    }

    #[tokio::test]
    async fn test_first_run_walks_through_setup() {
        let (store, log) = fixture(
            ParsedArgs::default(),
            vec!["acme".into(), "Acme".into(), "New".into(), "Alice".into()],
        );

        let result = route().unwrap().run(&store).await.unwrap();
        assert_eq!(store.conf().current_org_id().as_deref(), Some("acme"));
        assert!(store.conf().current_user_id().is_some());

        let confirms: Vec<String> = log
            .lock()
            .unwrap()
            .iter()
            .filter(|(kind, _)| *kind == PrintKind::Confirm)
            .map(|(_, text)| text.clone())
            .collect();
        assert_eq!(
            confirms,
            vec![
                "No current user. Setting a user.",
                "No current organization. Setting a new current organization.",
                "No organizations found. Make a new one?",
                "No users found. Make a new one?",
            ]
        );

        printed(&store, &result);
        assert!(log
            .lock()
            .unwrap()
            .iter()
            .any(|(_, text)| text.contains("Alice (")));
    }
}
