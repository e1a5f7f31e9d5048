//! A single CLI command: predicate, handler, and help text

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;

use super::args::ParsedArgs;
use super::result::RouteResult;
use crate::errors::{AppError, AppResult};
use crate::store::Store;

/// Decides whether a route handles the given input
pub type Predicate = Arc<dyn Fn(&ParsedArgs) -> bool + Send + Sync>;

/// The behaviour of a route once it has been selected
#[async_trait]
pub trait RouteHandler: Send + Sync {
    async fn run(&self, store: &Store) -> AppResult<RouteResult>;
}

/// An immutable, fully specified command
#[derive(Clone)]
pub struct Route {
    name: String,
    test: Predicate,
    handler: Arc<dyn RouteHandler>,
    help: String,
}

impl Route {
    pub fn builder(name: impl Into<String>) -> RouteBuilder {
        RouteBuilder {
            name: name.into(),
            test: None,
            handler: None,
            help: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn help(&self) -> &str {
        &self.help
    }

    /// Evaluate the route's predicate
    pub fn matches(&self, args: &ParsedArgs) -> bool {
        (self.test)(args)
    }

    /// Run the handler, or return the help text when `--help` was given
    ///
    /// The handler is never invoked when help is requested.
    pub async fn run(&self, store: &Store) -> AppResult<RouteResult> {
        if store.args().flags.help {
            return Ok(RouteResult::raw(self.help.clone()));
        }
        self.handler.run(store).await
    }
}

impl fmt::Debug for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Route").field("name", &self.name).finish_non_exhaustive()
    }
}

/// Collects the parts of a `Route`, failing on build if any are missing
pub struct RouteBuilder {
    name: String,
    test: Option<Predicate>,
    handler: Option<Arc<dyn RouteHandler>>,
    help: Option<String>,
}

impl RouteBuilder {
    pub fn test(mut self, test: impl Fn(&ParsedArgs) -> bool + Send + Sync + 'static) -> Self {
        self.test = Some(Arc::new(test));
        self
    }

    pub fn run(mut self, handler: impl RouteHandler + 'static) -> Self {
        self.handler = Some(Arc::new(handler));
        self
    }

    pub fn help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    /// Build the route; the help text defaults to the general help
    pub fn build(self) -> AppResult<Route> {
        let test = self
            .test
            .ok_or_else(|| AppError::invalid_route(&self.name, "a route must have a test function"))?;
        let handler = self
            .handler
            .ok_or_else(|| AppError::invalid_route(&self.name, "a route must have a run function"))?;
        Ok(Route {
            name: self.name,
            test,
            handler,
            help: self.help.unwrap_or_else(crate::routes::help::general),
        })
    }
}
