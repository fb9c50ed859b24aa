//! REST-style protocol adapter, mounted at `/api/rest`.
//!
//! Resource-shaped routes over the same scoped handle as the RPC adapter.
//! Responses use the `{ id, type, attributes, links }` format from
//! `crate::api::format`; self links come from the configured base URL.

use axum::{
    extract::{Path, Query},
    routing::get,
    Extension, Json, Router,
};
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::api::format::{collection_to_api_value, resource_to_api_value};
use crate::config;
use crate::database::{scoped_db, QueryArgs};
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, RequestIdentity};

pub fn routes() -> Router {
    Router::new()
        .route("/:type", get(list).post(create))
        .route("/:type/:id", get(show).patch(update).delete(destroy))
}

#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub take: Option<i64>,
    pub skip: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct ResourceBody {
    pub attributes: Map<String, Value>,
}

fn base_url() -> &'static str {
    &config::config().server.rest_base_url
}

/// GET /api/rest/:type - list resources
async fn list(
    Path(resource_type): Path<String>,
    Query(query): Query<ListQuery>,
    Extension(identity): Extension<RequestIdentity>,
) -> ApiResult<Value> {
    let db = scoped_db(identity).await?;
    let args = QueryArgs { take: query.take, skip: query.skip, ..Default::default() };
    let rows = db.find_many(&resource_type, &args).await?;
    Ok(ApiResponse::success(collection_to_api_value(&rows, &resource_type, base_url())))
}

/// POST /api/rest/:type - create a resource
async fn create(
    Path(resource_type): Path<String>,
    Extension(identity): Extension<RequestIdentity>,
    Json(body): Json<Value>,
) -> ApiResult<Value> {
    let body: ResourceBody = serde_json::from_value(body)
        .map_err(|e| ApiError::invalid_json(format!("Invalid resource body: {}", e)))?;

    let db = scoped_db(identity).await?;
    let row = db.create(&resource_type, body.attributes).await?;
    Ok(ApiResponse::created(resource_to_api_value(&row, &resource_type, base_url())))
}

/// GET /api/rest/:type/:id - show a single resource
async fn show(
    Path((resource_type, id)): Path<(String, String)>,
    Extension(identity): Extension<RequestIdentity>,
) -> ApiResult<Value> {
    let db = scoped_db(identity).await?;
    match db.find_by_id(&resource_type, &id).await? {
        Some(row) => Ok(ApiResponse::success(resource_to_api_value(&row, &resource_type, base_url()))),
        None => Err(ApiError::not_found("Resource not found")),
    }
}

/// PATCH /api/rest/:type/:id - partial update
async fn update(
    Path((resource_type, id)): Path<(String, String)>,
    Extension(identity): Extension<RequestIdentity>,
    Json(body): Json<Value>,
) -> ApiResult<Value> {
    let body: ResourceBody = serde_json::from_value(body)
        .map_err(|e| ApiError::invalid_json(format!("Invalid resource body: {}", e)))?;

    let db = scoped_db(identity).await?;
    match db.update_by_id(&resource_type, &id, body.attributes).await? {
        Some(row) => Ok(ApiResponse::success(resource_to_api_value(&row, &resource_type, base_url()))),
        None => Err(ApiError::not_found("Resource not found")),
    }
}

/// DELETE /api/rest/:type/:id
async fn destroy(
    Path((resource_type, id)): Path<(String, String)>,
    Extension(identity): Extension<RequestIdentity>,
) -> ApiResult<()> {
    let db = scoped_db(identity).await?;
    match db.delete_by_id(&resource_type, &id).await? {
        true => Ok(ApiResponse::<()>::no_content()),
        false => Err(ApiError::not_found("Resource not found")),
    }
}
