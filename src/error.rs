use hyper::Method;
use thiserror::Error;

/// The error type returned while a router is being configured.
///
/// Every variant is a configuration mistake: it surfaces from
/// [`RouterBuilder::build`](./struct.RouterBuilder.html#method.build) and never
/// at request time.
#[derive(Debug, Error)]
pub enum Error {
    /// A route was registered without any handler.
    #[error("no handler supplied for {method} {path}")]
    EmptyChain { method: Method, path: String },

    /// A route was registered under an empty list of methods.
    #[error("no http method supplied for {path}")]
    NoMethods { path: String },

    /// A regex route whose generated matching key is not a valid regular expression.
    #[error("could not compile the matching regex for the route path {path:?}: {source}")]
    InvalidPattern {
        path: String,
        #[source]
        source: regex::Error,
    },

    /// A route was registered under a method the router keeps no table for.
    #[error("unsupported http method: {0}")]
    UnsupportedMethod(Method),
}

/// Boxed error raised by a route handler or middleware.
pub type RouteError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Why a request could not be served by a route.
///
/// Both kinds are answered with the same `404 Route not found` response; they
/// are kept apart so that logs can tell a miss from a failure.
#[derive(Debug, Error)]
pub(crate) enum MatchError {
    #[error("no route matched: {method} {path}")]
    NotFound { method: Method, path: String },

    #[error("route failed for {path}: {source}")]
    Failed { path: String, source: RouteError },
}
