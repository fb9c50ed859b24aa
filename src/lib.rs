pub mod api;
pub mod config;
pub mod database;
pub mod error;
pub mod handlers;
pub mod identity;
pub mod middleware;

use axum::{routing::get, Extension, Router};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use middleware::{identity_middleware, ApiResponse, ApiResult, RequestIdentity};

/// Build the full application router. Separate from `main` so integration
/// tests can drive the router in-process.
pub fn app() -> Router {
    Router::new()
        // Public info
        .route("/", get(root))
        .route("/health", get(health))
        // Caller identity echo
        .route("/api/whoami", get(whoami))
        // Protocol adapters over the shared database
        .nest("/api/rpc", handlers::rpc::routes())
        .nest("/api/rest", handlers::rest::routes())
        // Global middleware
        .layer(axum::middleware::from_fn(identity_middleware))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

async fn root() -> ApiResult<Value> {
    let version = env!("CARGO_PKG_VERSION");

    Ok(ApiResponse::success(json!({
        "name": "Datagate",
        "version": version,
        "description": "RPC/REST API gateway over PostgreSQL with per-request identity scoping",
        "endpoints": {
            "home": "/ (public)",
            "health": "/health (public)",
            "whoami": "/api/whoami (echoes the caller identity)",
            "rpc": "/api/rpc/:table/:op (findMany, findFirst, findUnique, count, create, update, updateMany, delete, deleteMany)",
            "rest": "/api/rest/:type[/:id] (list, create, show, patch, delete)",
        }
    })))
}

async fn health() -> impl axum::response::IntoResponse {
    use axum::{http::StatusCode, response::Json};

    let now = chrono::Utc::now();

    match database::DatabaseManager::health_check().await {
        Ok(_) => (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "data": {
                    "status": "ok",
                    "timestamp": now,
                    "database": "ok"
                }
            })),
        ),
        Err(e) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({
                "success": false,
                "error": "database unavailable",
                "data": {
                    "status": "degraded",
                    "timestamp": now,
                    "database_error": e.to_string()
                }
            })),
        ),
    }
}

/// GET /api/whoami - echo the identity the middleware resolved for this
/// request; null for anonymous callers
async fn whoami(Extension(identity): Extension<RequestIdentity>) -> ApiResult<Value> {
    Ok(ApiResponse::success(json!({ "identity": identity.0 })))
}
