use axum::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Liveness response. The store is not probed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

/// Axum handler for `GET /api/health`.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        timestamp: Utc::now(),
    })
}
