//! Unified infrastructure error type.

/// The error type returned by brewhouse's fallible start-up and serving
/// operations.
///
/// Request-level failures (400, 404, 500 for a failed query, …) are HTTP
/// [`Response`](crate::Response) values built from
/// [`ApiError`](crate::api::ApiError), not `Error`s. This type surfaces
/// infrastructure failures: bad configuration, an unreachable datastore,
/// binding to a port.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("io: {0}")]
    Io(#[from] std::io::Error),

    #[error("config: {0}")]
    Config(String),

    #[error("datastore: {0}")]
    Database(#[from] sqlx::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
