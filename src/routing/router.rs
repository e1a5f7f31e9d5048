//! Selects and runs exactly one route per invocation

use tracing::debug;

use super::args::ParsedArgs;
use super::result::RouteResult;
use super::route::Route;
use crate::errors::{AppError, AppResult};
use crate::store::Store;

/// An ordered list of routes with a catch-all fallback
#[derive(Debug, Clone)]
pub struct Router {
    routes: Vec<Route>,
    fallback: Route,
}

impl Router {
    pub fn new(routes: Vec<Route>, fallback: Route) -> Self {
        Self { routes, fallback }
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// The first route whose predicate accepts `args`, else the fallback
    pub fn select(&self, args: &ParsedArgs) -> &Route {
        self.routes
            .iter()
            .find(|route| route.matches(args))
            .unwrap_or(&self.fallback)
    }

    /// Run the selected route, passing its errors through
    pub async fn dispatch(&self, store: &Store) -> AppResult<RouteResult> {
        let route = self.select(store.args());
        debug!("Selected route {} for input {:?}", route.name(), store.args().input);
        route.run(store).await
    }

    /// Run the selected route and turn any failure into an error result
    ///
    /// A sub-route that terminated the invocation yields its own result
    /// unchanged; any other error becomes an error result with exit code 1.
    pub async fn run(&self, store: &Store) -> RouteResult {
        match self.dispatch(store).await {
            Ok(result) => result,
            Err(AppError::Terminated { result }) => *result,
            Err(err) => {
                debug!("Route failed ({}): {}", err.category(), err);
                RouteResult::failure(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::PrintKind;
    use crate::routing::RouteHandler;
    use crate::store::tests::fixture;
    use async_trait::async_trait;

    struct Reply(&'static str);

    #[async_trait]
    impl RouteHandler for Reply {
        async fn run(&self, _store: &Store) -> AppResult<RouteResult> {
            Ok(RouteResult::success(self.0))
        }
    }

    struct Fail(fn() -> AppError);

    #[async_trait]
    impl RouteHandler for Fail {
        async fn run(&self, _store: &Store) -> AppResult<RouteResult> {
            Err((self.0)())
        }
    }

    fn route(name: &str, word: &'static str, handler: impl RouteHandler + 'static) -> Route {
        Route::builder(name)
            .test(move |args| args.starts_with(&[word]))
            .run(handler)
            .build()
            .unwrap()
    }

    fn fallback() -> Route {
        Route::builder("fallback")
            .test(|_| true)
            .run(Reply("fallback"))
            .build()
            .unwrap()
    }

    #[tokio::test]
    async fn test_first_matching_route_runs() {
        let router = Router::new(
            vec![route("a", "add", Reply("a")), route("b", "list", Reply("b"))],
            fallback(),
        );
        let (store, _) = fixture(ParsedArgs::from_words("list"), vec![]);

        assert_eq!(router.select(store.args()).name(), "b");
        assert_eq!(router.run(&store).await.text(), Some("b"));
    }

    #[tokio::test]
    async fn test_fallback_runs_when_nothing_matches() {
        let router = Router::new(vec![route("a", "add", Reply("a"))], fallback());
        let (store, _) = fixture(ParsedArgs::from_words("dance"), vec![]);
        assert_eq!(router.run(&store).await.text(), Some("fallback"));
    }

    #[tokio::test]
    async fn test_handler_error_becomes_error_result() {
        let router = Router::new(
            vec![route("boom", "boom", Fail(|| AppError::other("boom")))],
            fallback(),
        );
        let (store, _) = fixture(ParsedArgs::from_words("boom"), vec![]);

        let result = router.run(&store).await;
        assert_eq!(result.kind(), PrintKind::Error);
        assert_eq!(result.text(), Some("boom"));
        assert_eq!(result.exit_code(), 1);
        assert!(result.data().error().is_some());
    }

    #[tokio::test]
    async fn test_terminated_result_is_unwrapped() {
        let router = Router::new(
            vec![route(
                "nested",
                "nested",
                Fail(|| AppError::Terminated {
                    result: Box::new(RouteResult::error("sub-route gave up").with_exit_code(3)),
                }),
            )],
            fallback(),
        );
        let (store, _) = fixture(ParsedArgs::from_words("nested"), vec![]);

        let result = router.run(&store).await;
        assert_eq!(result.text(), Some("sub-route gave up"));
        assert_eq!(result.exit_code(), 3);
        assert!(result.data().error().is_none());
    }
}
