//! RPC-style protocol adapter, mounted at `/api/rpc`.
//!
//! Operations are addressed as `/:table/:op` with Prisma-flavored names:
//! reads (`findMany`, `findFirst`, `findUnique`, `count`) go over GET with
//! an optional `q` query parameter holding JSON args; writes go over
//! POST (`create`), PUT (`update`, `updateMany`) and DELETE (`delete`,
//! `deleteMany`) with JSON bodies.

use axum::{
    extract::{Path, Query},
    routing::get,
    Extension, Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Map, Value};

use crate::database::scoped_db;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, RequestIdentity};

pub fn routes() -> Router {
    Router::new().route("/:table/:op", get(read).post(create).put(update).delete(delete))
}

#[derive(Debug, Default, Deserialize)]
pub struct RpcQuery {
    /// JSON-encoded operation arguments
    pub q: Option<String>,
}

/// Operation arguments, shared by the query-string and body forms.
#[derive(Debug, Default, Deserialize)]
pub struct RpcArgs {
    #[serde(rename = "where", default)]
    pub where_clause: Option<Map<String, Value>>,
    #[serde(rename = "orderBy", default)]
    pub order_by: Option<Map<String, Value>>,
    #[serde(default)]
    pub take: Option<i64>,
    #[serde(default)]
    pub skip: Option<i64>,
    #[serde(default)]
    pub data: Option<Map<String, Value>>,
}

impl RpcArgs {
    fn from_query(q: Option<&str>) -> Result<Self, ApiError> {
        match q {
            None => Ok(Self::default()),
            Some(raw) => serde_json::from_str(raw)
                .map_err(|e| ApiError::invalid_json(format!("Invalid q parameter: {}", e))),
        }
    }

    fn from_body(body: Value) -> Result<Self, ApiError> {
        serde_json::from_value(body)
            .map_err(|e| ApiError::invalid_json(format!("Invalid request body: {}", e)))
    }
}

/// GET /api/rpc/:table/:op
async fn read(
    Path((table, op)): Path<(String, String)>,
    Query(query): Query<RpcQuery>,
    Extension(identity): Extension<RequestIdentity>,
) -> ApiResult<Value> {
    // Validate the operation (and its args) before touching the database
    if !matches!(op.as_str(), "findMany" | "findFirst" | "findUnique" | "count") {
        return Err(ApiError::bad_request(format!("Unknown read operation: {}", op)));
    }
    let args = RpcArgs::from_query(query.q.as_deref())?;
    let db = scoped_db(identity).await?;

    match op.as_str() {
        "findMany" => {
            let query_args = crate::database::QueryArgs {
                where_clause: args.where_clause,
                order_by: args.order_by,
                take: args.take,
                skip: args.skip,
            };
            let rows = db.find_many(&table, &query_args).await?;
            Ok(ApiResponse::success(Value::Array(rows.into_iter().map(Value::Object).collect())))
        }
        "findFirst" | "findUnique" => {
            let row = db.find_one(&table, args.where_clause).await?;
            match row {
                Some(row) => Ok(ApiResponse::success(Value::Object(row))),
                None => Err(ApiError::not_found("Record not found")),
            }
        }
        "count" => {
            let count = db.count(&table, args.where_clause.as_ref()).await?;
            Ok(ApiResponse::success(json!({ "count": count })))
        }
        other => Err(ApiError::bad_request(format!("Unknown read operation: {}", other))),
    }
}

/// POST /api/rpc/:table/create
async fn create(
    Path((table, op)): Path<(String, String)>,
    Extension(identity): Extension<RequestIdentity>,
    Json(body): Json<Value>,
) -> ApiResult<Value> {
    if op != "create" {
        return Err(ApiError::bad_request(format!("Unknown create operation: {}", op)));
    }
    let args = RpcArgs::from_body(body)?;
    let data = args
        .data
        .ok_or_else(|| ApiError::bad_request("create requires a data object"))?;

    let db = scoped_db(identity).await?;
    let row = db.create(&table, data).await?;
    Ok(ApiResponse::created(Value::Object(row)))
}

/// PUT /api/rpc/:table/{update,updateMany}
async fn update(
    Path((table, op)): Path<(String, String)>,
    Extension(identity): Extension<RequestIdentity>,
    Json(body): Json<Value>,
) -> ApiResult<Value> {
    if op != "update" && op != "updateMany" {
        return Err(ApiError::bad_request(format!("Unknown update operation: {}", op)));
    }
    let args = RpcArgs::from_body(body)?;
    let where_clause = args
        .where_clause
        .ok_or_else(|| ApiError::bad_request("update requires a where object"))?;
    let data = args
        .data
        .ok_or_else(|| ApiError::bad_request("update requires a data object"))?;

    let db = scoped_db(identity).await?;
    let mut rows = db.update(&table, &where_clause, data).await?;

    if op == "updateMany" {
        return Ok(ApiResponse::success(json!({ "count": rows.len() })));
    }
    match rows.is_empty() {
        true => Err(ApiError::not_found("Record not found")),
        false => Ok(ApiResponse::success(Value::Object(rows.remove(0)))),
    }
}

/// DELETE /api/rpc/:table/{delete,deleteMany}
async fn delete(
    Path((table, op)): Path<(String, String)>,
    Extension(identity): Extension<RequestIdentity>,
    Json(body): Json<Value>,
) -> ApiResult<Value> {
    if op != "delete" && op != "deleteMany" {
        return Err(ApiError::bad_request(format!("Unknown delete operation: {}", op)));
    }
    let args = RpcArgs::from_body(body)?;
    let where_clause = args
        .where_clause
        .ok_or_else(|| ApiError::bad_request("delete requires a where object"))?;

    let db = scoped_db(identity).await?;
    let mut rows = db.delete(&table, &where_clause).await?;

    if op == "deleteMany" {
        return Ok(ApiResponse::success(json!({ "count": rows.len() })));
    }
    match rows.is_empty() {
        true => Err(ApiError::not_found("Record not found")),
        false => Ok(ApiResponse::success(Value::Object(rows.remove(0)))),
    }
}
