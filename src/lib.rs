//! # brewhouse
//!
//! A coffee catalog and order service on a minimal hyper-based router.
//!
//! ## Resources
//!
//! - **Catalog**: coffee products kept in process memory, seeded at start and
//!   lost on restart. See [`catalog::Catalog`].
//! - **Orders**: customer orders in PostgreSQL, reached through
//!   [`orders::OrderStore`].
//!
//! ## Routes
//!
//! | Method | Path | Response |
//! |---|---|---|
//! | GET | `/coffees` | JSON array of products |
//! | GET | `/coffee/{id}` | product, 400, 404 |
//! | POST | `/coffee/create` | product with assigned id, 400 |
//! | PUT | `/coffee/update/{id}` | updated product, 400, 404 |
//! | DELETE | `/coffee/delete/{id}` | 204, 400, 404 |
//! | GET | `/orders/{user_id}` | JSON array of orders, 400, 500 |
//! | POST | `/orders/create/{user_id}` | created order, 400, 500 |
//! | GET | `/healthz`, `/readyz` | probes |
//!
//! A known path hit with another method answers `405`.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use brewhouse::{Server, api, catalog::Catalog, orders::MemoryOrderStore};
//!
//! #[tokio::main]
//! async fn main() {
//!     let state = api::AppState::new(Catalog::seeded(), MemoryOrderStore::new());
//!     let app = api::router(state);
//!
//!     Server::bind("127.0.0.1:8080".parse().unwrap())
//!         .serve(app)
//!         .await
//!         .unwrap();
//! }
//! ```

mod error;
mod handler;
mod method;
mod request;
mod response;
mod router;
mod server;
mod status;

pub mod api;
pub mod catalog;
pub mod config;
pub mod orders;

pub use config::Config;
pub use error::{Error, Result};
pub use handler::Handler;
pub use method::{Method, UnknownMethod};
pub use request::Request;
pub use response::{IntoResponse, Json, Response, ResponseBuilder};
pub use router::Router;
pub use server::Server;
pub use status::Status;
