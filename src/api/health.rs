//! Health-check handlers.
//!
//! | Probe | Path | Question |
//! |---|---|---|
//! | **Liveness** | `/healthz` | Is the process alive? Failure → restart. |
//! | **Readiness** | `/readyz` | Can the order datastore be reached? Failure → pulled from load-balancer. |

use tracing::warn;

use super::AppState;
use crate::request::Request;
use crate::response::Response;
use crate::status::Status;

/// Always `200 OK` with body `"ok"`. No dependencies.
pub async fn liveness(_state: AppState, _req: Request) -> Response {
    Response::text("ok")
}

/// `200 OK` with `"ready"` when the order store answers, `503` otherwise.
/// The catalog lives in memory and is always available.
pub async fn readiness(state: AppState, _req: Request) -> Response {
    match state.orders.ping().await {
        Ok(()) => Response::text("ready"),
        Err(e) => {
            warn!("readiness check failed: {e:#}");
            Response::builder()
                .status(Status::ServiceUnavailable)
                .text("datastore unavailable")
        }
    }
}
