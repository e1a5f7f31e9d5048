//! Command routing
//!
//! A `Router` holds an ordered list of `Route`s and runs the first one whose
//! predicate accepts the parsed input. Handlers return a `RouteResult`; the
//! router is the only place that turns handler errors into error results.

pub mod args;
pub mod result;
pub mod route;
pub mod router;

pub use args::{Flags, PackageInfo, ParsedArgs};
pub use result::{RouteData, RouteResult};
pub use route::{Predicate, Route, RouteBuilder, RouteHandler};
pub use router::Router;

use crate::errors::{AppError, AppResult};
use crate::store::Store;

/// Run another route as a step of the current one
///
/// A successful result is printed and returned so the caller can continue
/// with its data. An error result ends the whole invocation: it comes back
/// as `AppError::Terminated`, which the router unwraps into the final result.
pub async fn delegate(route: &Route, store: &Store) -> AppResult<RouteResult> {
    let result = route.run(store).await?;
    if result.is_error() {
        return Err(AppError::Terminated {
            result: Box::new(result),
        });
    }
    store.printer().print(result.printable());
    Ok(result)
}
