//! Radix-tree request router.
//!
//! One tree keyed by path, O(path-length) lookup. Each matched path holds a
//! small table of handlers by method, so a known path hit with the wrong
//! method is answered with `405` instead of falling through to `404`.

use std::collections::{BTreeMap, HashMap};
use std::time::Duration;

use matchit::Router as MatchitRouter;
use tracing::{debug, error, warn};

use crate::handler::{BoxFuture, BoxedHandler, Handler};
use crate::method::Method;
use crate::request::Request;
use crate::response::Response;
use crate::status::Status;

/// Handlers registered on one path pattern, keyed by method.
type MethodTable<S> = BTreeMap<Method, BoxedHandler<S>>;

/// Result of matching a method + path pair against the route table.
pub(crate) enum Lookup<S> {
    Found(BoxedHandler<S>, HashMap<String, String>),
    MethodNotAllowed(Vec<Method>),
    NotFound,
}

/// The application router.
///
/// Owns the application state `S`; each request receives a clone of it.
/// Build it once at startup and pass it to [`Server::serve`](crate::Server::serve).
/// Each [`Router::on`] call returns `self` so registrations chain naturally.
pub struct Router<S> {
    tree: MatchitRouter<usize>,
    tables: Vec<MethodTable<S>>,
    patterns: HashMap<String, usize>,
    state: S,
    timeout: Option<Duration>,
}

impl<S> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    pub fn new(state: S) -> Self {
        Self {
            tree: MatchitRouter::new(),
            tables: Vec::new(),
            patterns: HashMap::new(),
            state,
            timeout: None,
        }
    }

    /// Register a handler for a method + path pair. Returns `self` for chaining.
    ///
    /// Path parameters use `{name}` syntax and `req.param("name")` retrieves
    /// them; `{*name}` captures the rest of the path, slashes included, but
    /// never an empty rest. Static segments win over parameters, so
    /// `/coffee/create` and `/coffee/{id}` can live side by side.
    ///
    /// # Panics
    ///
    /// Panics if `path` is not a valid route pattern or conflicts with an
    /// already registered one. Route tables are built at startup, so this is
    /// a programming error.
    pub fn on(mut self, method: Method, path: &str, handler: impl Handler<S>) -> Self {
        let index = match self.patterns.get(path) {
            Some(&index) => index,
            None => {
                let index = self.tables.len();
                self.tree
                    .insert(path, index)
                    .unwrap_or_else(|e| panic!("invalid route `{path}`: {e}"));
                self.tables.push(MethodTable::new());
                self.patterns.insert(path.to_owned(), index);
                index
            }
        };
        self.tables[index].insert(method, handler.into_boxed_handler());
        self
    }

    /// Per-request deadline. A handler still running when it expires is
    /// aborted and the client gets `504 Gateway Timeout`.
    pub fn timeout(mut self, limit: Duration) -> Self {
        self.timeout = Some(limit);
        self
    }

    pub(crate) fn lookup(&self, method: Method, path: &str) -> Lookup<S> {
        let Ok(matched) = self.tree.at(path) else {
            return Lookup::NotFound;
        };
        let table = &self.tables[*matched.value];
        match table.get(&method) {
            Some(handler) => {
                let params = matched.params.iter()
                    .map(|(k, v)| (k.to_owned(), v.to_owned()))
                    .collect();
                Lookup::Found(handler.clone(), params)
            }
            None => Lookup::MethodNotAllowed(table.keys().copied().collect()),
        }
    }

    /// Routes one request and produces one response.
    ///
    /// Never fails: unknown paths become `404`, wrong methods `405`, panics
    /// `500` and expired deadlines `504`.
    pub async fn dispatch(&self, mut req: Request) -> Response {
        match self.lookup(req.method, &req.path) {
            Lookup::Found(handler, params) => {
                req.params = params;
                self.run(handler.call(self.state.clone(), req)).await
            }
            Lookup::MethodNotAllowed(allowed) => {
                debug!(method = %req.method, path = %req.path, "method not allowed");
                let allow = allowed.iter()
                    .map(|m| m.as_str())
                    .collect::<Vec<_>>()
                    .join(", ");
                Response::builder()
                    .status(Status::MethodNotAllowed)
                    .header("allow", &allow)
                    .text("Invalid request method")
            }
            Lookup::NotFound => {
                debug!(path = %req.path, "no route");
                Response::builder()
                    .status(Status::NotFound)
                    .text("404 page not found")
            }
        }
    }

    /// Runs the handler future on its own task so a panic or an expired
    /// deadline only costs this request.
    async fn run(&self, fut: BoxFuture) -> Response {
        let mut task = tokio::spawn(fut);

        let joined = match self.timeout {
            Some(limit) => match tokio::time::timeout(limit, &mut task).await {
                Ok(joined) => joined,
                Err(_) => {
                    task.abort();
                    warn!(timeout_ms = limit.as_millis() as u64, "handler exceeded request deadline");
                    return Response::builder()
                        .status(Status::GatewayTimeout)
                        .text("Request timed out");
                }
            },
            None => task.await,
        };

        match joined {
            Ok(response) => response,
            Err(e) => {
                error!("handler task failed: {e}");
                Response::builder()
                    .status(Status::InternalServerError)
                    .text("Internal Server Error")
            }
        }
    }
}
