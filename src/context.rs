use crate::router::Router;
use crate::types::{QueryParams, RouteParams};
use bytes::Bytes;
use http_body_util::Full;
use hyper::header::{HeaderName, HeaderValue};
use hyper::{Request, Response, StatusCode};
use std::fmt::{self, Debug, Formatter};
use std::sync::Arc;

/// The per-request execution context handed to every handler of a matched chain.
///
/// It owns the request, the response being built, the captured route
/// parameters and the parsed query string. Handlers take it by value and hand
/// it back inside a [`Flow`](./enum.Flow.html): [`next`](#method.next) passes
/// it on to the following handler, [`stop`](#method.stop) or [`send`](#method.send)
/// end the chain and the response is written out as it stands.
///
/// # Examples
///
/// ```
/// use http_body_util::Empty;
/// use hyper::body::Bytes;
/// use hyper::StatusCode;
/// use partition_router::Router;
/// use std::convert::Infallible;
///
/// let router: Router<Empty<Bytes>, Infallible> = Router::builder()
///     .get("/users/:id", |mut ctx| async move {
///         let body = format!("user {}", ctx.param("id").unwrap_or_default());
///         ctx.status(StatusCode::OK);
///         Ok(ctx.send(body))
///     })
///     .build()
///     .unwrap();
/// # drop(router);
/// ```
pub struct Context<T, E> {
    router: Arc<Router<T, E>>,
    req: Request<T>,
    res: Response<Full<Bytes>>,
    params: RouteParams,
    query: QueryParams,
}

/// What a handler wants to happen after it returns.
pub enum Flow<T, E> {
    /// Run the next handler of the chain.
    Next(Context<T, E>),
    /// Skip the remaining handlers and finalize the response.
    Stop(Context<T, E>),
}

impl<T, E> Context<T, E> {
    pub(crate) fn new(router: Arc<Router<T, E>>, req: Request<T>, params: RouteParams, query: QueryParams) -> Self {
        Context {
            router,
            req,
            res: Response::new(Full::new(Bytes::new())),
            params,
            query,
        }
    }

    /// The router this request is dispatched on.
    pub fn router(&self) -> &Router<T, E> {
        &self.router
    }

    pub fn req(&self) -> &Request<T> {
        &self.req
    }

    pub fn req_mut(&mut self) -> &mut Request<T> {
        &mut self.req
    }

    pub fn res(&self) -> &Response<Full<Bytes>> {
        &self.res
    }

    pub fn res_mut(&mut self) -> &mut Response<Full<Bytes>> {
        &mut self.res
    }

    /// Returns the value captured for the route parameter `name`.
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name)
    }

    pub fn params(&self) -> &RouteParams {
        &self.params
    }

    pub fn query(&self) -> &QueryParams {
        &self.query
    }

    /// Sets the response status code.
    pub fn status(&mut self, status: StatusCode) -> &mut Self {
        *self.res.status_mut() = status;
        self
    }

    /// Sets a response header, replacing any previous value.
    pub fn header(&mut self, name: HeaderName, value: HeaderValue) -> &mut Self {
        self.res.headers_mut().insert(name, value);
        self
    }

    /// Replaces the response body without ending the chain.
    pub fn body<B: Into<Bytes>>(&mut self, body: B) -> &mut Self {
        *self.res.body_mut() = Full::new(body.into());
        self
    }

    /// Continues with the next handler.
    pub fn next(self) -> Flow<T, E> {
        Flow::Next(self)
    }

    /// Ends the chain; the response is sent as it stands.
    pub fn stop(self) -> Flow<T, E> {
        Flow::Stop(self)
    }

    /// Sets the response body and ends the chain.
    pub fn send<B: Into<Bytes>>(mut self, body: B) -> Flow<T, E> {
        self.body(body);
        Flow::Stop(self)
    }

    pub(crate) fn into_response(self) -> Response<Full<Bytes>> {
        self.res
    }
}

impl<T, E> Debug for Context<T, E> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context")
            .field("method", self.req.method())
            .field("uri", self.req.uri())
            .field("params", &self.params)
            .field("query", &self.query)
            .field("status", &self.res.status())
            .finish()
    }
}

impl<T, E> Debug for Flow<T, E> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Flow::Next(ctx) => f.debug_tuple("Next").field(ctx).finish(),
            Flow::Stop(ctx) => f.debug_tuple("Stop").field(ctx).finish(),
        }
    }
}
