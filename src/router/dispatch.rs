use crate::context::{Context, Flow};
use crate::error::{MatchError, RouteError};
use crate::handler::Handler;
use crate::helpers;
use crate::router::Router;
use crate::types::{QueryParams, RequestMeta, RouteParams};
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Request, Response};
use std::sync::Arc;

impl<T, E> Router<T, E>
where
    T: Send + 'static,
    E: Into<RouteError> + Send + 'static,
{
    /// Routes a request and runs the matched handler chain.
    ///
    /// * A method other than `GET`, `POST`, `PUT`, `PATCH` or `DELETE` is answered with `501 Not Implemented`.
    /// * The query string is parsed into [`QueryParams`](./struct.QueryParams.html) and a trailing
    ///   slash is dropped from the path before matching.
    /// * Global middleware runs first, then the route's chain, each in registration order.
    ///   A handler returning [`Flow::Stop`](./enum.Flow.html#variant.Stop) ends the chain.
    /// * A request no route matches, or whose handler fails, is answered with `404 Route not found`.
    ///
    /// # Examples
    ///
    /// ```
    /// use http_body_util::{BodyExt, Empty};
    /// use hyper::{body::Bytes, Request, StatusCode};
    /// use partition_router::Router;
    /// use std::convert::Infallible;
    /// use std::sync::Arc;
    ///
    /// # #[tokio::main(flavor = "current_thread")]
    /// # async fn main() {
    /// let router: Arc<Router<Empty<Bytes>, Infallible>> = Arc::new(
    ///     Router::builder()
    ///         .get("/users/:id", |ctx| async move {
    ///             let id = ctx.param("id").unwrap_or_default().to_owned();
    ///             Ok(ctx.send(id))
    ///         })
    ///         .build()
    ///         .unwrap(),
    /// );
    ///
    /// let req = Request::get("/users/42/?verbose=1").body(Empty::new()).unwrap();
    /// let res = router.dispatch(req).await;
    /// assert_eq!(res.status(), StatusCode::OK);
    /// assert_eq!(res.into_body().collect().await.unwrap().to_bytes(), "42");
    /// # }
    /// ```
    pub async fn dispatch(self: &Arc<Self>, req: Request<T>) -> Response<Full<Bytes>> {
        match self.try_dispatch(req).await {
            Ok(res) => res,
            Err(req) => {
                let err = MatchError::NotFound {
                    method: req.method().clone(),
                    path: req.uri().path().to_owned(),
                };
                tracing::warn!(error = %err, "No route matched");
                helpers::not_found_response()
            }
        }
    }

    /// Same as [`dispatch`](#method.dispatch), except that a request no route
    /// matches is handed back untouched instead of being answered with a 404,
    /// so the caller can fall back to something else.
    pub async fn try_dispatch(self: &Arc<Self>, mut req: Request<T>) -> Result<Response<Full<Bytes>>, Request<T>> {
        let table = match self.tables.get(req.method()) {
            Some(table) => table,
            None => {
                tracing::warn!(method = %req.method(), path = %req.uri().path(), "Unsupported http method");
                return Ok(helpers::not_implemented_response());
            }
        };

        let target_path = match helpers::percent_decode_request_path(req.uri().path()) {
            Ok(path) => helpers::normalize_path(&path),
            Err(e) => {
                let err = MatchError::Failed {
                    path: req.uri().path().to_owned(),
                    source: Box::new(e),
                };
                tracing::error!(error = %err, "Couldn't percent decode request path");
                return Ok(helpers::not_found_response());
            }
        };

        let query = req.uri().query().map(QueryParams::parse).unwrap_or_default();

        let mut params = RouteParams::new();
        let found = match table.find(&target_path, &mut params) {
            Some(found) => found,
            None => {
                tracing::debug!(method = %req.method(), path = %target_path, "no route in table");
                return Err(req);
            }
        };

        tracing::debug!(
            method = %req.method(),
            path = %target_path,
            kind = ?found.kind(),
            "route matched"
        );

        helpers::update_req_meta_in_extensions(
            req.extensions_mut(),
            RequestMeta::with_route_params(params.clone(), query.clone()),
        );
        let ctx = Context::new(Arc::clone(self), req, params, query);

        match run_chain(ctx, &self.middleware, found.chain()).await {
            Ok(res) => Ok(res),
            Err(source) => {
                let err = MatchError::Failed {
                    path: target_path,
                    source,
                };
                tracing::error!(error = %err, "Route handler failed");
                Ok(helpers::not_found_response())
            }
        }
    }
}

async fn run_chain<T, E>(
    mut ctx: Context<T, E>,
    middleware: &[Handler<T, E>],
    chain: &[Handler<T, E>],
) -> Result<Response<Full<Bytes>>, RouteError>
where
    E: Into<RouteError>,
{
    for handler in middleware.iter().chain(chain) {
        match handler(ctx).await.map_err(Into::<RouteError>::into)? {
            Flow::Next(next) => ctx = next,
            Flow::Stop(done) => return Ok(done.into_response()),
        }
    }
    Ok(ctx.into_response())
}
