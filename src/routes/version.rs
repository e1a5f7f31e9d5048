//! `fidelius -v` and `fidelius --version`

use async_trait::async_trait;

use super::help;
use crate::errors::AppResult;
use crate::routing::{Route, RouteHandler, RouteResult};
use crate::store::Store;

struct Version;

#[async_trait]
impl RouteHandler for Version {
    async fn run(&self, store: &Store) -> AppResult<RouteResult> {
        let pkg = &store.args().pkg;
        Ok(RouteResult::raw(format!("{} v{}", pkg.name, pkg.version)))
    }
}

/// `fidelius --version`
pub fn route() -> AppResult<Route> {
    Route::builder("version")
        .test(|args| args.input.is_empty() && args.flags.version)
        .run(Version)
        .help(help::command("--version", "Prints the version of Fidelius"))
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::PrintKind;
    use crate::routing::{Flags, ParsedArgs};
    use crate::store::tests::fixture;

    #[tokio::test]
    async fn test_prints_name_and_version() {
        let args = ParsedArgs::new(
            vec![],
            Flags {
                version: true,
                ..Flags::default()
            },
        );
        let route = route().unwrap();
        assert!(route.matches(&args));

        let (store, _) = fixture(args, vec![]);
        let result = route.run(&store).await.unwrap();
        assert_eq!(result.kind(), PrintKind::Raw);
        assert_eq!(
            result.text(),
            Some(format!("fidelius v{}", env!("CARGO_PKG_VERSION")).as_str())
        );
    }

    #[test]
    fn test_only_bare_version_flag() {
        let route = route().unwrap();
        let mut args = ParsedArgs::from_words("list");
        args.flags.version = true;
        assert!(!route.matches(&args));
        assert!(!route.matches(&ParsedArgs::default()));
    }
}
