use hyper::body::Incoming;
use hyper::service::Service;
use hyper::StatusCode;
use hyper_util::rt::{TokioExecutor, TokioIo};
use hyper_util::server::conn::auto::Builder;
use partition_router::{Context, Flow, Router, RouterService};
use std::net::SocketAddr;
use std::sync::Arc;
use std::{convert::Infallible, io};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

type Ctx = Context<Incoming, Infallible>;
type Handled = Result<Flow<Incoming, Infallible>, Infallible>;

const DEFAULT_ADDR: &str = "127.0.0.1:3000";

// A handler for "/" page.
async fn home_handler(ctx: Ctx) -> Handled {
    Ok(ctx.send("Home page"))
}

// A handler for "/users/:userId" page.
async fn user_handler(ctx: Ctx) -> Handled {
    let user_id = ctx.param("userId").unwrap_or_default().to_owned();
    Ok(ctx.send(format!("Hello {}", user_id)))
}

async fn user_book_handler(ctx: Ctx) -> Handled {
    let body = format!(
        "{} is reading {}",
        ctx.param("userId").unwrap_or_default(),
        ctx.param("bookId").unwrap_or_default()
    );
    Ok(ctx.send(body))
}

// A middleware which logs an http request.
async fn logger(ctx: Ctx) -> Handled {
    tracing::info!(method = %ctx.req().method(), path = %ctx.req().uri().path(), "request");
    Ok(ctx.next())
}

// Rejects requests without an api key; the handlers after it never run.
async fn require_api_key(mut ctx: Ctx) -> Handled {
    if ctx.req().headers().contains_key("x-api-key") {
        return Ok(ctx.next());
    }
    ctx.status(StatusCode::UNAUTHORIZED);
    Ok(ctx.send("Missing api key"))
}

fn api_router() -> partition_router::Result<Router<Incoming, Infallible>> {
    Router::builder()
        .middleware(require_api_key)
        .get("/users/:userId", user_handler)
        .get("/users/:userId/books/:bookId", user_book_handler)
        .build()
}

fn router() -> partition_router::Result<Router<Incoming, Infallible>> {
    Router::builder()
        .middleware(logger)
        .get("/", home_handler)
        .mount_at("/api", api_router()?)
        .build()
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let addr: SocketAddr = std::env::var("ROUTER_ADDR")
        .unwrap_or_else(|_| DEFAULT_ADDR.to_owned())
        .parse()
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;

    // Create a Service from the router above to handle incoming requests.
    let service = Arc::new(RouterService::new(router()?));

    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, "App is running");

    loop {
        match listener.accept().await {
            Ok((stream, _)) => {
                let service = Arc::clone(&service);

                tokio::task::spawn(async move {
                    let request_service = match service.call(&stream).await {
                        Ok(request_service) => request_service,
                        Err(never) => match never {},
                    };
                    let io = TokioIo::new(stream);
                    if let Err(err) = Builder::new(TokioExecutor::new())
                        .serve_connection(io, request_service)
                        .await
                    {
                        tracing::error!(error = %err, "Error serving connection");
                    }
                });
            }
            Err(e) => {
                tracing::error!(error = %e, "Error accepting connection");
            }
        }
    }
}
