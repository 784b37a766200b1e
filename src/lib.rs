//! `partition-router` is the dispatch layer for a [hyper](https://hyper.rs/) server: it maps
//! `(method, path pattern)` pairs to chains of async handlers, and at request time finds the chain
//! to run and extracts the path parameters.
//!
//! Its core features:
//!
//! - Static paths are found with a single hash lookup.
//! - Routes with `:name` parameters are partitioned by segment count and compared segment by
//!   segment, without running a regex.
//! - Patterns using regex syntax are supported and only evaluated against same-shaped paths.
//! - Global middleware and per-route handler chains, where any handler can end the chain.
//! - Routers can be mounted into each other, with or without a path prefix.
//!
//! ## Basic Example
//!
//! ```no_run
//! use hyper::body::Incoming;
//! use hyper::service::Service;
//! use hyper_util::rt::{TokioExecutor, TokioIo};
//! use hyper_util::server::conn::auto::Builder;
//! use partition_router::{Context, Flow, Router, RouterService};
//! use std::sync::Arc;
//! use std::{convert::Infallible, net::SocketAddr};
//! use tokio::net::TcpListener;
//!
//! // A handler for "/" page.
//! async fn home_handler(ctx: Context<Incoming, Infallible>) -> Result<Flow<Incoming, Infallible>, Infallible> {
//!     Ok(ctx.send("Home page"))
//! }
//!
//! // A handler for "/users/:userId" page.
//! async fn user_handler(ctx: Context<Incoming, Infallible>) -> Result<Flow<Incoming, Infallible>, Infallible> {
//!     let user_id = ctx.param("userId").unwrap_or_default().to_owned();
//!     Ok(ctx.send(format!("Hello {}", user_id)))
//! }
//!
//! // A middleware which logs an http request and lets the chain go on.
//! async fn logger(ctx: Context<Incoming, Infallible>) -> Result<Flow<Incoming, Infallible>, Infallible> {
//!     println!("{} {}", ctx.req().method(), ctx.req().uri().path());
//!     Ok(ctx.next())
//! }
//!
//! fn router() -> Router<Incoming, Infallible> {
//!     Router::builder()
//!         .middleware(logger)
//!         .get("/", home_handler)
//!         .get("/users/:userId", user_handler)
//!         .build()
//!         .unwrap()
//! }
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
//!     let router_service = Arc::new(RouterService::new(router()));
//!
//!     let addr = SocketAddr::from(([127, 0, 0, 1], 3001));
//!     let listener = TcpListener::bind(addr).await?;
//!     println!("App is running on: {}", addr);
//!
//!     loop {
//!         let (stream, _) = listener.accept().await?;
//!         let router_service = router_service.clone();
//!
//!         tokio::spawn(async move {
//!             let request_service = router_service.call(&stream).await.unwrap();
//!             let io = TokioIo::new(stream);
//!             let builder = Builder::new(TokioExecutor::new());
//!             if let Err(err) = builder.serve_connection(io, request_service).await {
//!                 eprintln!("Error serving connection: {:?}", err);
//!             }
//!         });
//!     }
//! }
//! ```
//!
//! ## Routing
//!
//! ### Route Paths
//!
//! A path is split on `/` into segments. How it is matched depends on the characters it uses:
//!
//! | Pattern | Kind | Matched by |
//! |---------|------|------------|
//! | `/about`, `/files/v1.0` | static | exact string lookup |
//! | `/users/:id`, `/a/:x/b` | named | segment-by-segment comparison |
//! | `/v(\d+)/users/:id` | regex | the generated regex, against the whole path |
//!
//! Static paths only use letters, digits, `~`, `_`, `.`, `-` and `/`. Named paths may add `:name`
//! segments, each capturing one or more of `[\w\-.~]`. Any other character makes the path a regex
//! route. A trailing slash is dropped, both when registering and when matching.
//!
//! A static path always wins over a dynamic one. Dynamic routes are only compared with requests
//! having the same number of segments; among those, the first registered route to match wins.
//!
//! ### Route Parameters
//!
//! ```
//! use http_body_util::Empty;
//! use hyper::body::Bytes;
//! use partition_router::Router;
//! use std::convert::Infallible;
//!
//! # fn run() -> Router<Empty<Bytes>, Infallible> {
//! let router = Router::builder()
//!     .get("/users/:userName/books/:bookName", |ctx| async move {
//!         let body = format!(
//!             "Username: {}, Book Name: {}",
//!             ctx.param("userName").unwrap_or_default(),
//!             ctx.param("bookName").unwrap_or_default()
//!         );
//!         Ok(ctx.send(body))
//!     })
//!     .build()
//!     .unwrap();
//! # router
//! # }
//! # run();
//! ```
//!
//! ### Handler Chains
//!
//! Handlers receive the [`Context`](./struct.Context.html) and return a [`Flow`](./enum.Flow.html):
//! `ctx.next()` hands over to the next handler, `ctx.stop()` and `ctx.send(body)` end the chain.
//! Global middleware registered with [`middleware`](./struct.RouterBuilder.html#method.middleware)
//! runs before the chain of every matched route.
//!
//! ```
//! use http_body_util::Empty;
//! use hyper::body::Bytes;
//! use hyper::header::{HeaderValue, CACHE_CONTROL};
//! use hyper::StatusCode;
//! use partition_router::Router;
//! use std::convert::Infallible;
//!
//! # fn run() -> Router<Empty<Bytes>, Infallible> {
//! let router = Router::builder()
//!     .middleware(|mut ctx| async move {
//!         ctx.header(CACHE_CONTROL, HeaderValue::from_static("no-store"));
//!         Ok(ctx.next())
//!     })
//!     .get("/admin", |mut ctx| async move {
//!         if ctx.req().headers().get("authorization").is_none() {
//!             ctx.status(StatusCode::UNAUTHORIZED);
//!             return Ok(ctx.stop());
//!         }
//!         Ok(ctx.next())
//!     })
//!     .get("/admin", |ctx| async move { Ok(ctx.send("admin area")) })
//!     .build()
//!     .unwrap();
//! # router
//! # }
//! # run();
//! ```
//!
//! ### Mounting
//!
//! [`mount`](./struct.RouterBuilder.html#method.mount) merges another router's routes and global
//! middleware as they are; [`mount_at`](./struct.RouterBuilder.html#method.mount_at) re-registers
//! them under a path prefix.
//!
//! ## Error Handling
//!
//! Configuration mistakes, like a route without handlers or a regex that does not compile, are
//! returned as [`Error`](./enum.Error.html) by [`build`](./struct.RouterBuilder.html#method.build).
//!
//! At request time nothing propagates past the router: an unsupported method gets
//! `501 Not Implemented`, and both a path no route matches and a handler returning an error get
//! `404 Route not found`. The cases are logged through [`tracing`](https://docs.rs/tracing).

pub use self::context::{Context, Flow};
pub use self::error::{Error, RouteError};
pub use self::handler::{handler, Handler, HandlerReturn};
pub use self::route::{RouteEntry, RouteKind, RouteTable};
pub use self::router::{Router, RouterBuilder};
#[doc(hidden)]
pub use self::service::RequestService;
pub use self::service::RequestServiceBuilder;
pub use self::service::RouterService;
pub use self::types::{QueryParams, RouteParams};

mod constants;
mod context;
mod error;
pub mod ext;
mod handler;
mod helpers;
pub mod prelude;
mod regex_generator;
mod route;
mod router;
mod service;
mod types;

/// A Result type often returned from methods that can have router configuration errors.
pub type Result<T> = std::result::Result<T, Error>;
