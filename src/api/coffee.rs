//! Catalog handlers.

use tracing::info;

use super::AppState;
use super::error::{ApiError, path_id};
use crate::catalog::{Product, ProductDraft};
use crate::request::Request;
use crate::response::Json;
use crate::status::Status;

// GET /coffees
pub async fn list(state: AppState, _req: Request) -> Json<Vec<Product>> {
    Json(state.catalog.list())
}

// GET /coffee/{id}
pub async fn get(state: AppState, req: Request) -> Result<Json<Product>, ApiError> {
    let id = path_id(&req, "id", "coffee")?;
    state.catalog
        .get(id)
        .map(Json)
        .ok_or(ApiError::NotFound("Coffee"))
}

// POST /coffee/create
pub async fn create(state: AppState, req: Request) -> Result<Json<Product>, ApiError> {
    let draft: ProductDraft = req
        .json()
        .map_err(|e| ApiError::InvalidBody(e.to_string()))?;
    info!(title = %draft.title, cost = %draft.cost, "received new coffee");
    Ok(Json(state.catalog.create(draft)))
}

// PUT /coffee/update/{id}
pub async fn update(state: AppState, req: Request) -> Result<Json<Product>, ApiError> {
    let id = path_id(&req, "id", "coffee")?;
    let draft: ProductDraft = req
        .json()
        .map_err(|e| ApiError::InvalidBody(e.to_string()))?;
    let updated = state.catalog
        .update(id, draft)
        .ok_or(ApiError::NotFound("Coffee"))?;
    info!(coffee_id = id, "coffee updated");
    Ok(Json(updated))
}

// DELETE /coffee/delete/{id} → 204 No Content
pub async fn delete(state: AppState, req: Request) -> Result<Status, ApiError> {
    let id = path_id(&req, "id", "coffee")?;
    if !state.catalog.delete(id) {
        return Err(ApiError::NotFound("Coffee"));
    }
    info!(coffee_id = id, "coffee deleted");
    Ok(Status::NoContent)
}
