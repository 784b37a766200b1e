use crate::context::{Context, Flow};
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

/// The future returned by a boxed [`Handler`](./type.Handler.html).
pub type HandlerReturn<T, E> = Pin<Box<dyn Future<Output = Result<Flow<T, E>, E>> + Send + 'static>>;

/// A route handler or middleware, boxed so that chains of different closures can be stored together.
///
/// Handlers are reference counted: the same handler may sit in the chains of
/// several methods (see [`RouterBuilder::all`](./struct.RouterBuilder.html#method.all))
/// or of several mounted routes.
pub type Handler<T, E> = Arc<dyn Fn(Context<T, E>) -> HandlerReturn<T, E> + Send + Sync + 'static>;

pub(crate) type Chain<T, E> = Vec<Handler<T, E>>;

/// Boxes an async function or closure into a [`Handler`](./type.Handler.html).
///
/// Needed only when building a multi-handler chain for
/// [`RouterBuilder::add`](./struct.RouterBuilder.html#method.add); the
/// single-handler registration methods box their argument themselves.
///
/// # Examples
///
/// ```
/// use http_body_util::Empty;
/// use hyper::body::Bytes;
/// use partition_router::{handler, Router};
/// use hyper::Method;
/// use std::convert::Infallible;
///
/// let router: Router<Empty<Bytes>, Infallible> = Router::builder()
///     .add(
///         "/users/:id",
///         vec![Method::GET],
///         vec![
///             handler(|ctx| async move { Ok(ctx.next()) }),
///             handler(|ctx| async move { Ok(ctx.send("user")) }),
///         ],
///     )
///     .build()
///     .unwrap();
/// # drop(router);
/// ```
pub fn handler<T, E, H, R>(handler: H) -> Handler<T, E>
where
    T: 'static,
    E: 'static,
    H: Fn(Context<T, E>) -> R + Send + Sync + 'static,
    R: Future<Output = Result<Flow<T, E>, E>> + Send + 'static,
{
    Arc::new(move |ctx: Context<T, E>| -> HandlerReturn<T, E> { Box::pin(handler(ctx)) })
}
