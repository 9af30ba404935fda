//! Liveness probe for load balancers and smoke tests

use axum::{Json, Router, routing::get};
use serde::Serialize;

const SERVICE_NAME: &str = "users-api";

#[derive(Debug, Serialize)]
pub struct PingResponse {
    pub status: &'static str,
    pub service: &'static str,
    /// Server time, RFC 3339
    pub time: String,
}

async fn ping() -> Json<PingResponse> {
    Json(PingResponse {
        status: "ok",
        service: SERVICE_NAME,
        time: chrono::Utc::now().to_rfc3339(),
    })
}

/// Router serving `GET /ping`
pub fn router() -> Router {
    Router::new().route("/ping", get(ping))
}
