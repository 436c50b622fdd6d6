//! Handler trait and type erasure.
//!
//! # How async handlers are stored
//!
//! The router holds handlers of *different* types in one table, so each one
//! is hidden behind a trait object (`dyn ErasedHandler<S>`) that takes the
//! shared application state and the request.
//!
//! ```text
//! async fn get(state: AppState, req: Request) -> … { … }   ← user writes this
//!        ↓ router.on(Method::Get, "/coffee/{id}", get)
//! get.into_boxed_handler()                                ← Handler blanket impl
//!        ↓
//! Arc::new(FnHandler(get))                                ← stored as BoxedHandler<S>
//!        ↓
//! handler.call(state.clone(), req)  at request time       ← one vtable dispatch
//! ```
//!
//! The per-request cost is one `Arc` clone of the handler, one clone of the
//! state and one virtual call.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use crate::request::Request;
use crate::response::{IntoResponse, Response};

// ── Internal types ────────────────────────────────────────────────────────────

/// A heap-allocated, type-erased future that resolves to a [`Response`].
///
/// `Send + 'static` so the router can move it onto its own tokio task.
pub(crate) type BoxFuture = Pin<Box<dyn Future<Output = Response> + Send + 'static>>;

/// Internal dispatch interface.
///
/// `#[doc(hidden)] pub` rather than `pub(crate)` because it appears in the
/// return type of the public `Handler` trait's `into_boxed_handler` method.
#[doc(hidden)]
pub trait ErasedHandler<S> {
    fn call(&self, state: S, req: Request) -> BoxFuture;
}

/// A type-erased handler shared across concurrent requests.
#[doc(hidden)]
pub type BoxedHandler<S> = Arc<dyn ErasedHandler<S> + Send + Sync + 'static>;

// ── Public Handler trait ──────────────────────────────────────────────────────

/// Implemented for every valid route handler.
///
/// You never implement this yourself. It is satisfied by any `async fn` with
/// the signature:
///
/// ```text
/// async fn name(state: S, req: Request) -> impl IntoResponse
/// ```
///
/// where `S` is the router's state type. The trait is sealed: only the
/// blanket impl below can satisfy it.
pub trait Handler<S>: private::Sealed<S> + Send + Sync + 'static {
    #[doc(hidden)]
    fn into_boxed_handler(self) -> BoxedHandler<S>;
}

mod private {
    pub trait Sealed<S> {}
}

// ── Blanket implementations ───────────────────────────────────────────────────

impl<F, Fut, R, S> private::Sealed<S> for F
where
    F: Fn(S, Request) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoResponse + Send + 'static,
    S: Send + 'static,
{
}

impl<F, Fut, R, S> Handler<S> for F
where
    F: Fn(S, Request) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoResponse + Send + 'static,
    S: Send + 'static,
{
    fn into_boxed_handler(self) -> BoxedHandler<S> {
        Arc::new(FnHandler(self))
    }
}

// ── Concrete wrapper ──────────────────────────────────────────────────────────

/// Holds a concrete handler `F` and bridges it to [`ErasedHandler`].
struct FnHandler<F>(F);

impl<F, Fut, R, S> ErasedHandler<S> for FnHandler<F>
where
    F: Fn(S, Request) -> Fut + Send + Sync,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoResponse + Send + 'static,
{
    fn call(&self, state: S, req: Request) -> BoxFuture {
        let fut = (self.0)(state, req);
        Box::pin(async move { fut.await.into_response() })
    }
}
