//! Order handlers: thin translation between HTTP and the [`OrderStore`](crate::orders::OrderStore).

use chrono::{SubsecRound, Utc};
use tracing::info;

use super::AppState;
use super::error::{ApiError, path_id};
use crate::orders::{NewOrder, Order};
use crate::request::Request;
use crate::response::Json;

// GET /orders/{user_id}
pub async fn list(state: AppState, req: Request) -> Result<Json<Vec<Order>>, ApiError> {
    let user_id = path_id(&req, "user_id", "user")?;
    let orders = state.orders
        .list_by_user(user_id)
        .await
        .map_err(ApiError::datastore("Failed to query database"))?;
    Ok(Json(orders))
}

// POST /orders/create/{user_id}
pub async fn create(state: AppState, req: Request) -> Result<Json<Order>, ApiError> {
    let user_id = path_id(&req, "user_id", "user")?;
    let new: NewOrder = req
        .json()
        .map_err(|_| ApiError::InvalidBody("Invalid request body".into()))?;

    // Postgres keeps microseconds; trim so the response matches the row.
    let created_at = Utc::now().trunc_subsecs(6);
    let order_id = state.orders
        .insert(user_id, &new, created_at)
        .await
        .map_err(ApiError::datastore("Failed to insert order"))?;

    info!(user_id, order_id, "order created");
    Ok(Json(Order::from_new(order_id, user_id, new, created_at)))
}
