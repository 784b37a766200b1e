//! Extension traits for the request type.

use crate::types::{QueryParams, RequestMeta, RouteParams};
use hyper::Request;
use std::net::SocketAddr;

/// A extension trait which extends the [`hyper::Request`](https://docs.rs/hyper/1/hyper/struct.Request.html) type with
/// the data attached to it while it is dispatched.
///
/// The values are present once a route has matched; `remote_addr` also needs
/// the request to have come through a [`RequestService`](../struct.RequestService.html).
pub trait RequestExt {
    /// It returns the route parameters as [RouteParams](../struct.RouteParams.html) type with the name of the parameter specified in the path as their respective keys.
    ///
    /// # Examples
    ///
    /// ```
    /// use http_body_util::Empty;
    /// use hyper::body::Bytes;
    /// use partition_router::prelude::*;
    /// use partition_router::Router;
    /// use std::convert::Infallible;
    ///
    /// # fn run() -> Router<Empty<Bytes>, Infallible> {
    /// let router = Router::builder()
    ///     .get("/users/:userName/books/:bookName", |ctx| async move {
    ///         let params = ctx.req().params().cloned().unwrap_or_default();
    ///         let user_name = params.get("userName").unwrap_or_default();
    ///         let book_name = params.get("bookName").unwrap_or_default();
    ///         let body = format!("Username: {}, Book Name: {}", user_name, book_name);
    ///         Ok(ctx.send(body))
    ///     })
    ///     .build()
    ///     .unwrap();
    /// # router
    /// # }
    /// # run();
    /// ```
    fn params(&self) -> Option<&RouteParams>;

    /// Returns the route parameter value mapped with the specified key.
    fn param(&self, param_name: &str) -> Option<&str>;

    /// Returns the parsed query string.
    fn query_params(&self) -> Option<&QueryParams>;

    /// Returns the remote address of the incoming request.
    fn remote_addr(&self) -> Option<SocketAddr>;
}

impl<T> RequestExt for Request<T> {
    fn params(&self) -> Option<&RouteParams> {
        self.extensions().get::<RequestMeta>().and_then(RequestMeta::route_params)
    }

    fn param(&self, param_name: &str) -> Option<&str> {
        self.params().and_then(|params| params.get(param_name))
    }

    fn query_params(&self) -> Option<&QueryParams> {
        self.extensions().get::<RequestMeta>().and_then(RequestMeta::query_params)
    }

    fn remote_addr(&self) -> Option<SocketAddr> {
        self.extensions().get::<RequestMeta>().and_then(RequestMeta::remote_addr)
    }
}
