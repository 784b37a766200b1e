use crate::error::RouteError;
use crate::helpers;
use crate::router::Router;
use crate::types::RequestMeta;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{service::Service, Request, Response};
use std::convert::Infallible;
use std::future::Future;
use std::net::SocketAddr;
use std::pin::Pin;
use std::sync::Arc;

/// A per-connection [`Service`](https://docs.rs/hyper/1/hyper/service/trait.Service.html) handing every request to
/// [`Router::dispatch`](./struct.Router.html#method.dispatch).
///
/// Routing never fails at this level: misses and handler errors are already
/// turned into responses, so the error type is `Infallible`.
pub struct RequestService<T, E> {
    pub(crate) router: Arc<Router<T, E>>,
    pub(crate) remote_addr: SocketAddr,
}

impl<T, E> Service<Request<T>> for RequestService<T, E>
where
    T: Send + 'static,
    E: Into<RouteError> + Send + 'static,
{
    type Response = Response<Full<Bytes>>;
    type Error = Infallible;
    #[allow(clippy::type_complexity)]
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send + 'static>>;

    fn call(&self, mut req: Request<T>) -> Self::Future {
        let router = Arc::clone(&self.router);
        let remote_addr = self.remote_addr;

        let fut = async move {
            helpers::update_req_meta_in_extensions(req.extensions_mut(), RequestMeta::with_remote_addr(remote_addr));
            Ok(router.dispatch(req).await)
        };

        Box::pin(fut)
    }
}

impl<T, E> std::fmt::Debug for RequestService<T, E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestService")
            .field("router", &self.router)
            .field("remote_addr", &self.remote_addr)
            .finish()
    }
}

/// Creates a [`RequestService`](./struct.RequestService.html) per accepted connection from one shared router.
pub struct RequestServiceBuilder<T, E> {
    router: Arc<Router<T, E>>,
}

impl<T, E> RequestServiceBuilder<T, E> {
    pub fn new(router: Router<T, E>) -> Self {
        Self {
            router: Arc::new(router),
        }
    }

    pub fn build(&self, remote_addr: SocketAddr) -> RequestService<T, E> {
        RequestService {
            router: Arc::clone(&self.router),
            remote_addr,
        }
    }
}

impl<T, E> std::fmt::Debug for RequestServiceBuilder<T, E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestServiceBuilder").field("router", &self.router).finish()
    }
}

#[cfg(test)]
mod tests {
    use crate::ext::RequestExt;
    use crate::{RequestServiceBuilder, Router};
    use http::Method;
    use http_body_util::{BodyExt, Empty};
    use hyper::service::Service;
    use hyper::{body::Bytes, Request, StatusCode};
    use std::convert::Infallible;
    use std::net::SocketAddr;
    use std::str::FromStr;

    #[tokio::test]
    async fn should_route_request() {
        const RESPONSE_TEXT: &str = "Hello world!";
        let remote_addr = SocketAddr::from_str("0.0.0.0:8080").unwrap();
        let router: Router<Empty<Bytes>, Infallible> = Router::builder()
            .get("/", |ctx| async move { Ok(ctx.send(RESPONSE_TEXT)) })
            .build()
            .unwrap();
        let req = Request::builder()
            .method(Method::GET)
            .uri("/")
            .body(Empty::<Bytes>::new())
            .unwrap();

        let builder = RequestServiceBuilder::new(router);
        let service = builder.build(remote_addr);

        let resp = service.call(req).await.unwrap();
        let body_bytes = resp.into_body().collect().await.unwrap().to_bytes();
        let body = String::from_utf8(body_bytes.to_vec()).unwrap();
        assert_eq!(RESPONSE_TEXT, body)
    }

    #[tokio::test]
    async fn should_expose_remote_addr_and_params_on_the_request() {
        let remote_addr = SocketAddr::from_str("10.1.2.3:4567").unwrap();
        let router: Router<Empty<Bytes>, Infallible> = Router::builder()
            .get("/users/:id", |ctx| async move {
                let req = ctx.req();
                let body = format!(
                    "{} {} {}",
                    req.remote_addr().map(|a| a.to_string()).unwrap_or_default(),
                    req.param("id").unwrap_or_default(),
                    req.query_params().and_then(|q| q.get("page")).unwrap_or_default(),
                );
                Ok(ctx.send(body))
            })
            .build()
            .unwrap();

        let service = RequestServiceBuilder::new(router).build(remote_addr);
        let req = Request::get("/users/9?page=2").body(Empty::<Bytes>::new()).unwrap();
        let resp = service.call(req).await.unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
        let body = resp.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(body, "10.1.2.3:4567 9 2");
    }
}
