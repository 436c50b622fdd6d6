//! Handler error type and its HTTP mapping.

use tracing::{debug, error};

use crate::request::Request;
use crate::response::{IntoResponse, Response};
use crate::status::Status;

/// Everything a handler can fail with.
///
/// Client errors carry their message to the caller. Datastore failures only
/// expose `context`; the underlying cause is logged and kept server-side.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Invalid {0} ID")]
    InvalidId(&'static str),

    #[error("{0}")]
    InvalidBody(String),

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("{context}")]
    Datastore {
        context: &'static str,
        #[source]
        source: anyhow::Error,
    },
}

impl ApiError {
    pub fn status(&self) -> Status {
        match self {
            Self::InvalidId(_) | Self::InvalidBody(_) => Status::BadRequest,
            Self::NotFound(_)                         => Status::NotFound,
            Self::Datastore { .. }                    => Status::InternalServerError,
        }
    }

    pub fn datastore(context: &'static str) -> impl FnOnce(anyhow::Error) -> Self {
        move |source| Self::Datastore { context, source }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            Self::Datastore { context, source } => error!("{context}: {source:#}"),
            other => debug!(error = %other, "request rejected"),
        }
        Response::builder()
            .status(self.status())
            .text(self.to_string())
    }
}

/// Parses the named path parameter as a base-10 integer.
///
/// `what` names the resource in the error message (`Invalid coffee ID`). A
/// missing parameter (empty segment) or one spanning several segments is
/// rejected the same way as any other non-number.
pub fn path_id(req: &Request, name: &str, what: &'static str) -> Result<i64, ApiError> {
    req.param(name)
        .and_then(|raw| raw.parse().ok())
        .ok_or(ApiError::InvalidId(what))
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;

    #[test]
    fn datastore_errors_hide_the_cause() {
        let err = ApiError::datastore("Failed to query database")(anyhow!("password authentication failed"));
        let resp = err.into_response();
        assert_eq!(resp.status_code(), 500);
        assert_eq!(resp.body(), b"Failed to query database");
    }

    #[test]
    fn client_errors_map_to_4xx() {
        assert_eq!(ApiError::InvalidId("coffee").to_string(), "Invalid coffee ID");
        assert_eq!(ApiError::InvalidId("user").status(), Status::BadRequest);
        assert_eq!(ApiError::NotFound("Coffee").to_string(), "Coffee not found");
        assert_eq!(ApiError::NotFound("Coffee").status(), Status::NotFound);
    }

    #[test]
    fn path_id_rejects_empty_and_nested_segments() {
        use crate::method::Method;

        let mut req = Request::new(Method::Get, "/coffee/", "");
        assert!(matches!(path_id(&req, "id", "coffee"), Err(ApiError::InvalidId("coffee"))));

        req.params.insert("id".into(), "1/x".into());
        assert!(matches!(path_id(&req, "id", "coffee"), Err(ApiError::InvalidId("coffee"))));

        req.params.insert("id".into(), "17".into());
        assert_eq!(path_id(&req, "id", "coffee").unwrap(), 17);
    }
}
