//! Fallback for input no other route matches

use async_trait::async_trait;
use colored::Colorize;

use crate::errors::AppResult;
use crate::output::Printable;
use crate::routing::{Route, RouteHandler, RouteResult};
use crate::store::Store;

struct NoRoute;

#[async_trait]
impl RouteHandler for NoRoute {
    async fn run(&self, _store: &Store) -> AppResult<RouteResult> {
        Ok(RouteResult::group(vec![
            Printable::error("Command not found!"),
            Printable::raw(format!(
                "It's 'Levi-O-sa', not 'Levio-sA'. Try '{}' for help.\n",
                "fidelius -h".bold()
            )),
        ])
        .with_exit_code(1))
    }
}

/// Fallback for input no other route accepts
pub fn route() -> AppResult<Route> {
    Route::builder("no-route").test(|_| true).run(NoRoute).build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::PrintKind;
    use crate::routing::ParsedArgs;
    use crate::store::tests::fixture;

    #[tokio::test]
    async fn test_reports_unknown_command() {
        let (store, log) = fixture(ParsedArgs::from_words("levitate"), vec![]);
        let result = route().unwrap().run(&store).await.unwrap();
        assert_eq!(result.exit_code(), 1);

        store.printer().print(result.printable());
        let log = log.lock().unwrap();
        assert_eq!(log[0], (PrintKind::Error, "Command not found!".to_string()));
        assert_eq!(log[1].0, PrintKind::Raw);
        assert!(log[1].1.contains("Levi-O-sa"));
    }

    #[tokio::test]
    async fn test_help_flag_prints_general_help() {
        let mut args = ParsedArgs::from_words("levitate");
        args.flags.help = true;
        let (store, _) = fixture(args, vec![]);
        let result = route().unwrap().run(&store).await.unwrap();
        assert_eq!(result.exit_code(), 0);
        assert!(result.text().unwrap_or_default().contains("Available commands are:"));
    }
}
