use crate::constants::SUPPORTED_METHODS;
use crate::error::Error;
use crate::handler::{Chain, Handler};
use crate::route::{RouteKind, RouteTable};
use hyper::Method;
use std::collections::HashMap;
use std::fmt::{self, Debug, Formatter};

pub use self::builder::RouterBuilder;

mod builder;
mod dispatch;
mod mount;

/// Represents a modular, lightweight and mountable router type.
///
/// A router keeps one [`RouteTable`](./struct.RouteTable.html) per supported
/// method (`GET`, `POST`, `PUT`, `PATCH` and `DELETE`) plus a chain of global
/// middleware that runs before the handlers of every matched route.
///
/// A `Router` can only be created through [`Router::builder`](#method.builder)
/// and exposes no way to change its routes afterwards: it is configured once,
/// then shared read-only, usually as an `Arc<Router>`, by every in-flight request.
///
/// This `Router<T, E>` type accepts two type parameters: `T` and `E`.
///
/// * The `T` represents the request body type handed to the handlers, e.g.
///   [`hyper::body::Incoming`](https://docs.rs/hyper/1/hyper/body/struct.Incoming.html).
/// * The `E` represents any error type which will be used by route handlers and the middlewares.
///   This error type must convert into [`RouteError`](./type.RouteError.html).
///
/// # Examples
///
/// ```
/// use hyper::body::Incoming;
/// use partition_router::{Context, Flow, Router};
/// use std::convert::Infallible;
///
/// async fn home_handler(ctx: Context<Incoming, Infallible>) -> Result<Flow<Incoming, Infallible>, Infallible> {
///     Ok(ctx.send("home"))
/// }
///
/// # fn run() -> Router<Incoming, Infallible> {
/// let router = Router::builder()
///     .get("/", home_handler)
///     .build()
///     .unwrap();
/// # router
/// # }
/// # run();
/// ```
pub struct Router<T, E> {
    pub(crate) tables: HashMap<Method, RouteTable<T, E>>,
    pub(crate) middleware: Chain<T, E>,
}

impl<T: 'static, E: 'static> Router<T, E> {
    /// Return a [RouterBuilder](./struct.RouterBuilder.html) instance to build a `Router`.
    pub fn builder() -> RouterBuilder<T, E> {
        RouterBuilder::new()
    }
}

impl<T, E> Router<T, E> {
    pub(crate) fn new() -> Self {
        Router {
            tables: SUPPORTED_METHODS
                .iter()
                .map(|method| (method.clone(), RouteTable::new(method.clone())))
                .collect(),
            middleware: Vec::new(),
        }
    }

    pub(crate) fn register(&mut self, method: &Method, path: &str, chain: Chain<T, E>) -> crate::Result<()> {
        if chain.is_empty() {
            return Err(Error::EmptyChain {
                method: method.clone(),
                path: path.to_owned(),
            });
        }

        self.tables
            .get_mut(method)
            .ok_or_else(|| Error::UnsupportedMethod(method.clone()))?
            .register(path, chain)
    }

    pub(crate) fn push_middleware(&mut self, handler: Handler<T, E>) {
        self.middleware.push(handler);
    }

    /// Returns the route table kept for `method`, if the method is supported.
    pub fn table(&self, method: &Method) -> Option<&RouteTable<T, E>> {
        self.tables.get(method)
    }

    /// Number of global middleware handlers.
    pub fn middleware_len(&self) -> usize {
        self.middleware.len()
    }

    /// Lists every registered route as `(method, path, kind)`, methods in the order `all` registers them.
    pub fn routes(&self) -> Vec<(&Method, &str, RouteKind)> {
        SUPPORTED_METHODS
            .iter()
            .filter_map(|method| self.tables.get_key_value(method))
            .flat_map(|(method, table)| {
                table
                    .routes()
                    .into_iter()
                    .map(move |(path, kind)| (method, path, kind))
            })
            .collect()
    }
}

impl<T, E> Debug for Router<T, E> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Router")
            .field("tables", &self.tables)
            .field("middleware", &self.middleware.len())
            .finish()
    }
}
