use actix_web::{HttpResponse, web};
use serde::Serialize;

use super::state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct HealthResponse {
    status: &'static str,
    timestamp: String,
    uptime: i64,
    link_backend: &'static str,
}

/// Liveness only; storage is not probed
pub async fn health(state: web::Data<AppState>) -> HttpResponse {
    let now = chrono::Utc::now();
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy",
        timestamp: now.to_rfc3339(),
        uptime: (now - state.started_at).num_seconds().max(0),
        link_backend: state.links.backend_name(),
    })
}
