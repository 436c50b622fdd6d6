//! The coffee-shop HTTP API: application state, route table and handlers.

pub mod coffee;
mod error;
pub mod health;
pub mod orders;

use std::sync::Arc;

pub use error::ApiError;

use crate::catalog::Catalog;
use crate::method::Method;
use crate::orders::OrderStore;
use crate::router::Router;

/// State shared by every handler. Cloning is two `Arc` bumps.
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<Catalog>,
    pub orders: Arc<dyn OrderStore>,
}

impl AppState {
    pub fn new(catalog: Catalog, orders: impl OrderStore + 'static) -> Self {
        Self { catalog: Arc::new(catalog), orders: Arc::new(orders) }
    }
}

/// The full route table.
///
/// Identifier routes take a catch-all so an empty or multi-segment id still
/// reaches the handler and is rejected as `400 Invalid … ID`. A catch-all
/// never matches an empty suffix, hence the bare `…/` patterns.
pub fn router(state: AppState) -> Router<AppState> {
    Router::new(state)
        .on(Method::Get,    "/coffees",                   coffee::list)
        .on(Method::Get,    "/coffee/",                   coffee::get)
        .on(Method::Get,    "/coffee/{*id}",              coffee::get)
        .on(Method::Post,   "/coffee/create",             coffee::create)
        .on(Method::Put,    "/coffee/update/",            coffee::update)
        .on(Method::Put,    "/coffee/update/{*id}",       coffee::update)
        .on(Method::Delete, "/coffee/delete/",            coffee::delete)
        .on(Method::Delete, "/coffee/delete/{*id}",       coffee::delete)
        .on(Method::Get,    "/orders/",                   orders::list)
        .on(Method::Get,    "/orders/{*user_id}",         orders::list)
        .on(Method::Post,   "/orders/create/",            orders::create)
        .on(Method::Post,   "/orders/create/{*user_id}",  orders::create)
        .on(Method::Get,    "/healthz",                   health::liveness)
        .on(Method::Get,    "/readyz",                    health::readiness)
}
