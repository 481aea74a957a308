//! Health check endpoint.

use actix_web::{HttpResponse, web};
use serde::Serialize;

use crate::observability::RequestId;
use crate::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    /// `postgres`, `memory`, or `unreachable` when the pool fails a ping.
    pub store: &'static str,
    pub timestamp: String,
    pub request_id: String,
}

/// GET /api/health
pub async fn health_check(state: web::Data<AppState>, request_id: RequestId) -> HttpResponse {
    let store = match &state.db {
        Some(db) => probe(db).await,
        None => "memory",
    };

    let response = HealthResponse {
        status: if store == "unreachable" { "degraded" } else { "ok" },
        version: env!("CARGO_PKG_VERSION"),
        store,
        timestamp: chrono::Utc::now().to_rfc3339(),
        request_id: request_id.as_str().to_string(),
    };

    HttpResponse::Ok().json(response)
}

#[cfg(feature = "postgres")]
async fn probe(db: &inkwell_infra::DatabaseConnections) -> &'static str {
    match db.ping().await {
        Ok(()) => "postgres",
        Err(e) => {
            tracing::warn!(error = %e, "Database ping failed");
            "unreachable"
        }
    }
}

#[cfg(not(feature = "postgres"))]
async fn probe(_db: &inkwell_infra::DatabaseConnections) -> &'static str {
    "memory"
}
