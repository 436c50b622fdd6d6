//! HTTP server and graceful shutdown.
//!
//! On SIGTERM or Ctrl-C the server:
//! 1. Stops calling `listener.accept()`, so no new connections are made.
//! 2. Lets every in-flight connection task run to completion.
//! 3. Returns from [`Server::serve`], which lets `main` exit cleanly.

use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use bytes::Bytes;
use http_body_util::{BodyExt, Full, LengthLimitError, Limited};
use hyper::body::{Body, Incoming};
use hyper::service::service_fn;
use hyper_util::rt::{TokioExecutor, TokioIo};
use hyper_util::server::conn::auto::Builder as ConnBuilder;
use tokio::net::TcpListener;
use tracing::{error, info, warn};

use crate::error::Error;
use crate::method::Method;
use crate::request::Request;
use crate::response::Response;
use crate::router::Router;
use crate::status::Status;

/// Request bodies larger than this are answered with `413` unread.
pub const MAX_BODY_BYTES: usize = 64 * 1024;

/// The HTTP server.
pub struct Server {
    addr: SocketAddr,
}

impl Server {
    /// Configures the server to bind to `addr` when [`serve`](Server::serve)
    /// is called.
    pub fn bind(addr: SocketAddr) -> Self {
        Self { addr }
    }

    /// Starts accepting connections and dispatching them through `router`.
    ///
    /// Returns only after a full graceful shutdown (SIGTERM or Ctrl-C,
    /// followed by all in-flight requests completing).
    pub async fn serve<S>(self, router: Router<S>) -> Result<(), Error>
    where
        S: Clone + Send + Sync + 'static,
    {
        let listener = TcpListener::bind(self.addr).await?;
        let router = Arc::new(router);

        info!(addr = %self.addr, "brewhouse listening");

        // Tracks every connection task so shutdown can wait for them.
        let mut tasks = tokio::task::JoinSet::new();

        let shutdown = shutdown_signal();
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                // Shutdown is checked first so a SIGTERM stops accepting
                // immediately, even with connections queued.
                biased;

                () = &mut shutdown => {
                    info!(in_flight = tasks.len(), "shutdown signal received, draining connections");
                    break;
                }

                res = listener.accept() => {
                    let (stream, remote_addr) = match res {
                        Ok(v) => v,
                        Err(e) => {
                            error!("accept error: {e}");
                            continue;
                        }
                    };

                    let router = Arc::clone(&router);
                    let io = TokioIo::new(stream);

                    tasks.spawn(async move {
                        // Called once per request on the connection.
                        let svc = service_fn(move |req| {
                            let router = Arc::clone(&router);
                            async move { dispatch(router, req, remote_addr).await }
                        });

                        // HTTP/1.1 or HTTP/2, whatever the client negotiates.
                        if let Err(e) = ConnBuilder::new(TokioExecutor::new())
                            .serve_connection(io, svc)
                            .await
                        {
                            error!(peer = %remote_addr, "connection error: {e}");
                        }
                    });
                }

                // Reap finished connection tasks.
                Some(_) = tasks.join_next(), if !tasks.is_empty() => {}
            }
        }

        while tasks.join_next().await.is_some() {}

        info!("brewhouse stopped");
        Ok(())
    }
}

// ── Request dispatch ──────────────────────────────────────────────────────────

/// Reads one request off the wire, routes it and logs the outcome.
///
/// Infallible: every failure is already an HTTP response by the time it
/// reaches hyper.
async fn dispatch<S>(
    router: Arc<Router<S>>,
    req: hyper::Request<Incoming>,
    remote_addr: SocketAddr,
) -> Result<http::Response<Full<Bytes>>, Infallible>
where
    S: Clone + Send + Sync + 'static,
{
    let started = Instant::now();
    let (parts, body) = req.into_parts();
    let method = parts.method.clone();
    let path = parts.uri.path().to_owned();

    let response = match read_request(parts, body).await {
        Ok(request) => router.dispatch(request).await,
        Err(rejection) => rejection,
    };

    info!(
        peer = %remote_addr,
        method = %method,
        path = %path,
        status = response.status_code(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "request"
    );
    Ok(response.into_inner())
}

async fn read_request<B>(parts: http::request::Parts, body: B) -> Result<Request, Response>
where
    B: Body<Data = Bytes>,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    let method: Method = parts.method.as_str().parse().map_err(|e| {
        warn!("{e}");
        Response::builder()
            .status(Status::MethodNotAllowed)
            .text("Invalid request method")
    })?;

    let body = match Limited::new(body, MAX_BODY_BYTES).collect().await {
        Ok(collected) => collected.to_bytes(),
        Err(e) if e.is::<LengthLimitError>() => {
            warn!(limit = MAX_BODY_BYTES, "request body too large");
            return Err(Response::builder()
                .status(Status::PayloadTooLarge)
                .text("Request body too large"));
        }
        Err(e) => {
            warn!("failed to read request body: {e}");
            return Err(Response::builder()
                .status(Status::BadRequest)
                .text("Invalid request body"));
        }
    };

    let mut request = Request::new(method, parts.uri.path(), body);
    request.headers = parts.headers.iter()
        .filter_map(|(name, value)| {
            value.to_str().ok().map(|v| (name.as_str().to_owned(), v.to_owned()))
        })
        .collect();
    Ok(request)
}

// ── Shutdown signal ───────────────────────────────────────────────────────────

/// Resolves on the first shutdown signal the process receives.
///
/// On Unix this listens for both SIGTERM and SIGINT (Ctrl-C). On Windows
/// only Ctrl-C is available. A handler that cannot be installed is logged
/// and that arm never fires.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("failed to install Ctrl-C handler: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let sigterm = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!("failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let sigterm = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c   => {}
        () = sigterm  => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parts(method: &str, body: Vec<u8>) -> (http::request::Parts, Full<Bytes>) {
        let (parts, body) = http::Request::builder()
            .method(method)
            .uri("/coffee/create?x=1")
            .header("content-type", "application/json")
            .body(Full::new(Bytes::from(body)))
            .unwrap()
            .into_parts();
        (parts, body)
    }

    #[tokio::test]
    async fn reads_path_headers_and_body() {
        let (parts, body) = parts("POST", br#"{"Title":"Mocha"}"#.to_vec());
        let req = read_request(parts, body).await.unwrap();
        assert_eq!(req.method, Method::Post);
        assert_eq!(req.path, "/coffee/create");
        assert_eq!(req.header("Content-Type"), Some("application/json"));
        assert_eq!(&req.body[..], br#"{"Title":"Mocha"}"#);
    }

    #[tokio::test]
    async fn oversized_body_is_413() {
        let (parts, body) = parts("POST", vec![b' '; MAX_BODY_BYTES + 1]);
        let resp = read_request(parts, body).await.unwrap_err();
        assert_eq!(resp.status_code(), 413);
    }

    #[tokio::test]
    async fn body_at_the_limit_is_read() {
        let (parts, body) = parts("POST", vec![b' '; MAX_BODY_BYTES]);
        let req = read_request(parts, body).await.unwrap();
        assert_eq!(req.body.len(), MAX_BODY_BYTES);
    }

    #[tokio::test]
    async fn unknown_method_is_405() {
        let (parts, body) = parts("BREW", Vec::new());
        let resp = read_request(parts, body).await.unwrap_err();
        assert_eq!(resp.status_code(), 405);
    }
}
