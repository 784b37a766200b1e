use crate::constants::SUPPORTED_METHODS;
use crate::context::{Context, Flow};
use crate::error::Error;
use crate::handler::{self, Handler};
use crate::router::Router;
use hyper::Method;
use std::fmt::{self, Debug, Formatter};
use std::future::Future;

/// Builder for the [Router](./struct.Router.html) type.
///
/// This `RouterBuilder<T, E>` type accepts two type parameters: `T` and `E`.
///
/// * The `T` represents the request body type.
/// * The `E` represents any error type which will be used by route handlers and the middlewares.
///
/// Every method consumes the builder and returns it, so registrations chain.
/// The first configuration error is kept and returned by [`build`](#method.build);
/// the registrations after it are skipped.
///
/// # Examples
///
/// ```
/// use http_body_util::Empty;
/// use hyper::body::Bytes;
/// use partition_router::Router;
/// use std::convert::Infallible;
///
/// fn run() -> Router<Empty<Bytes>, Infallible> {
///     let users: Router<Empty<Bytes>, Infallible> = Router::builder()
///         .get("/", |ctx| async move { Ok(ctx.send("user list")) })
///         .get("/:id", |ctx| async move {
///             let id = ctx.param("id").unwrap_or_default().to_owned();
///             Ok(ctx.send(id))
///         })
///         .build()
///         .unwrap();
///
///     Router::builder()
///         .middleware(|ctx| async move { Ok(ctx.next()) })
///         .get("/", |ctx| async move { Ok(ctx.send("home")) })
///         .mount_at("/users", users)
///         .build()
///         .unwrap()
/// }
/// # run();
/// ```
pub struct RouterBuilder<T, E> {
    inner: crate::Result<Router<T, E>>,
}

impl<T: 'static, E: 'static> RouterBuilder<T, E> {
    /// Creates a new `RouterBuilder` instance with default options.
    pub fn new() -> RouterBuilder<T, E> {
        RouterBuilder::default()
    }

    /// Creates a new [Router](./struct.Router.html) instance from the added configuration.
    pub fn build(self) -> crate::Result<Router<T, E>> {
        self.inner
    }

    fn and_then<F>(self, func: F) -> Self
    where
        F: FnOnce(Router<T, E>) -> crate::Result<Router<T, E>>,
    {
        RouterBuilder {
            inner: self.inner.and_then(func),
        }
    }
}

impl<T: 'static, E: 'static> RouterBuilder<T, E> {
    /// Adds a new route with `GET` method and the handler at the specified path.
    ///
    /// Registering a second handler for the same static path appends it to the
    /// existing chain; it runs after the first one unless that one stops the chain.
    pub fn get<P, H, R>(self, path: P, handler: H) -> Self
    where
        P: Into<String>,
        H: Fn(Context<T, E>) -> R + Send + Sync + 'static,
        R: Future<Output = Result<Flow<T, E>, E>> + Send + 'static,
    {
        self.add(path, vec![Method::GET], vec![handler::handler(handler)])
    }

    /// Adds a new route with `POST` method and the handler at the specified path.
    pub fn post<P, H, R>(self, path: P, handler: H) -> Self
    where
        P: Into<String>,
        H: Fn(Context<T, E>) -> R + Send + Sync + 'static,
        R: Future<Output = Result<Flow<T, E>, E>> + Send + 'static,
    {
        self.add(path, vec![Method::POST], vec![handler::handler(handler)])
    }

    /// Adds a new route with `PUT` method and the handler at the specified path.
    pub fn put<P, H, R>(self, path: P, handler: H) -> Self
    where
        P: Into<String>,
        H: Fn(Context<T, E>) -> R + Send + Sync + 'static,
        R: Future<Output = Result<Flow<T, E>, E>> + Send + 'static,
    {
        self.add(path, vec![Method::PUT], vec![handler::handler(handler)])
    }

    /// Adds a new route with `PATCH` method and the handler at the specified path.
    pub fn patch<P, H, R>(self, path: P, handler: H) -> Self
    where
        P: Into<String>,
        H: Fn(Context<T, E>) -> R + Send + Sync + 'static,
        R: Future<Output = Result<Flow<T, E>, E>> + Send + 'static,
    {
        self.add(path, vec![Method::PATCH], vec![handler::handler(handler)])
    }

    /// Adds a new route with `DELETE` method and the handler at the specified path.
    pub fn delete<P, H, R>(self, path: P, handler: H) -> Self
    where
        P: Into<String>,
        H: Fn(Context<T, E>) -> R + Send + Sync + 'static,
        R: Future<Output = Result<Flow<T, E>, E>> + Send + 'static,
    {
        self.add(path, vec![Method::DELETE], vec![handler::handler(handler)])
    }

    /// Adds a new route with the handler under `GET`, `POST`, `PUT`, `PATCH` and `DELETE`.
    pub fn all<P, H, R>(self, path: P, handler: H) -> Self
    where
        P: Into<String>,
        H: Fn(Context<T, E>) -> R + Send + Sync + 'static,
        R: Future<Output = Result<Flow<T, E>, E>> + Send + 'static,
    {
        self.add(path, SUPPORTED_METHODS.to_vec(), vec![handler::handler(handler)])
    }

    /// Adds a handler chain at the specified path for each of the given methods.
    ///
    /// The handlers run in the given order. An empty chain, an empty list of
    /// methods, or a method other than the five supported verbs, makes
    /// [`build`](#method.build) fail.
    ///
    /// # Examples
    ///
    /// ```
    /// use http_body_util::Empty;
    /// use hyper::{body::Bytes, Method};
    /// use partition_router::Router;
    /// use std::convert::Infallible;
    ///
    /// let result = Router::<Empty<Bytes>, Infallible>::builder()
    ///     .add("/users", vec![Method::GET, Method::POST], vec![])
    ///     .build();
    /// assert!(result.is_err());
    /// ```
    pub fn add<P: Into<String>>(self, path: P, methods: Vec<Method>, chain: Vec<Handler<T, E>>) -> Self {
        let path = path.into();
        self.and_then(move |mut router| {
            let method = match methods.first() {
                Some(method) => method.clone(),
                None => return Err(Error::NoMethods { path }),
            };
            if chain.is_empty() {
                return Err(Error::EmptyChain { method, path });
            }
            for method in &methods {
                router.register(method, &path, chain.clone())?;
            }
            Ok(router)
        })
    }

    /// Adds a global middleware, run before the handlers of every matched route in registration order.
    pub fn middleware<H, R>(self, handler: H) -> Self
    where
        H: Fn(Context<T, E>) -> R + Send + Sync + 'static,
        R: Future<Output = Result<Flow<T, E>, E>> + Send + 'static,
    {
        let handler = handler::handler(handler);
        self.and_then(move |mut router| {
            router.push_middleware(handler);
            Ok(router)
        })
    }

    /// Adds a middleware for a single path, under every supported method.
    ///
    /// On a static path it joins that path's chain, so it runs ahead of the
    /// route handlers only when it is registered before them. On a named or
    /// regex path it is registered as a route entry of its own; the first
    /// matching entry wins, so the handlers of a later route with the same
    /// pattern never run. Register the whole chain with [`add`](#method.add) instead.
    pub fn middleware_at<P, H, R>(self, path: P, handler: H) -> Self
    where
        P: Into<String>,
        H: Fn(Context<T, E>) -> R + Send + Sync + 'static,
        R: Future<Output = Result<Flow<T, E>, E>> + Send + 'static,
    {
        self.all(path, handler)
    }

    /// Merges all routes and global middleware of `router` into this one.
    ///
    /// For a path present in both routers, the mounted router's handlers run
    /// after this router's. Its global middleware is appended to ours.
    pub fn mount(self, router: Router<T, E>) -> Self {
        self.and_then(move |mut parent| {
            parent.merge(router);
            Ok(parent)
        })
    }

    /// Mounts all routes of `router` under the path prefix `prefix`.
    ///
    /// Every path of `router` is rewritten as `prefix` joined with the path
    /// and registered again. The global middleware of `router` is scoped to its
    /// own routes: it runs at the head of each mounted chain.
    pub fn mount_at<P: Into<String>>(self, prefix: P, router: Router<T, E>) -> Self {
        let prefix = prefix.into();
        self.and_then(move |mut parent| {
            parent.merge_at(&prefix, router)?;
            Ok(parent)
        })
    }
}

impl<T, E> Default for RouterBuilder<T, E> {
    fn default() -> RouterBuilder<T, E> {
        RouterBuilder { inner: Ok(Router::new()) }
    }
}

impl<T, E> Debug for RouterBuilder<T, E> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match &self.inner {
            Ok(router) => f.debug_tuple("RouterBuilder").field(router).finish(),
            Err(err) => f.debug_tuple("RouterBuilder").field(err).finish(),
        }
    }
}
