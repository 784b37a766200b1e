use crate::error::RouteError;
use crate::router::Router;
use crate::service::request_service::{RequestService, RequestServiceBuilder};
use hyper::body::Incoming;
use hyper::service::Service;
use std::convert::Infallible;
use std::future::{ready, Ready};
use tokio::net::TcpStream;

/// A [`Service`](https://docs.rs/hyper/1/hyper/service/trait.Service.html) turning accepted connections into
/// [`RequestService`](./struct.RequestService.html)s.
///
/// This `RouterService<E>` type accepts a single type parameter: `E`, the error type used by the route handlers
/// and the middlewares.
///
/// Each call reads the peer address of the connection, so handlers can reach it
/// through [`RequestExt::remote_addr`](./ext/trait.RequestExt.html#tymethod.remote_addr).
/// See the crate level docs for a complete accept loop.
///
/// # Examples
///
/// ```
/// use hyper::body::Incoming;
/// use partition_router::{Router, RouterService};
/// use std::convert::Infallible;
/// use std::sync::Arc;
///
/// let router: Router<Incoming, Infallible> = Router::builder()
///     .get("/", |ctx| async move { Ok(ctx.send("Home page")) })
///     .build()
///     .unwrap();
///
/// // Shared by every accepted connection.
/// let service = Arc::new(RouterService::new(router));
/// # drop(service);
/// ```
pub struct RouterService<E> {
    builder: RequestServiceBuilder<Incoming, E>,
}

impl<E: Into<RouteError> + Send + 'static> RouterService<E> {
    /// Creates a new service with the provided router, ready to be used with hyper's `serve_connection`.
    pub fn new(router: Router<Incoming, E>) -> RouterService<E> {
        RouterService {
            builder: RequestServiceBuilder::new(router),
        }
    }
}

impl<E> std::fmt::Debug for RouterService<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RouterService").field("builder", &self.builder).finish()
    }
}

impl<E: Into<RouteError> + Send + 'static> Service<&TcpStream> for RouterService<E> {
    type Response = RequestService<Incoming, E>;
    type Error = Infallible;
    type Future = Ready<Result<Self::Response, Self::Error>>;

    fn call(&self, conn: &TcpStream) -> Self::Future {
        let addr = conn
            .peer_addr()
            .unwrap_or_else(|_| std::net::SocketAddr::from(([0, 0, 0, 0], 0)));

        ready(Ok(self.builder.build(addr)))
    }
}
