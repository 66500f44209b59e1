//! Handler for health check endpoint.

use axum::{Json, extract::State, http::StatusCode};

use crate::api::dto::health::{CheckStatus, HealthChecks, HealthResponse};
use crate::state::AppState;

/// Returns service health status with component checks.
///
/// # Endpoint
///
/// `GET /health`
///
/// # Response Codes
///
/// - **200 OK**: All components healthy or intentionally disabled
/// - **503 Service Unavailable**: One or more components failing
///
/// # Components Checked
///
/// 1. **Database**: `SELECT 1`
/// 2. **Storage**: bucket reachability when S3 is configured
/// 3. **Feedback**: whether the review service is configured
/// 4. **Cache**: Redis PING
pub async fn health_handler(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, (StatusCode, Json<HealthResponse>)> {
    let database = check_database(&state).await;
    let storage = check_storage(&state).await;
    let feedback = check_feedback(&state);
    let cache = check_cache(&state).await;

    let all_healthy = database.is_healthy()
        && storage.is_healthy()
        && feedback.is_healthy()
        && cache.is_healthy();

    let response = HealthResponse {
        status: if all_healthy { "healthy" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks: HealthChecks {
            database,
            storage,
            feedback,
            cache,
        },
    };

    if all_healthy {
        Ok(Json(response))
    } else {
        Err((StatusCode::SERVICE_UNAVAILABLE, Json(response)))
    }
}

async fn check_database(state: &AppState) -> CheckStatus {
    match sqlx::query("SELECT 1").execute(&*state.pool).await {
        Ok(_) => CheckStatus::ok("Connected"),
        Err(e) => CheckStatus::error(format!("Database error: {}", e)),
    }
}

async fn check_storage(state: &AppState) -> CheckStatus {
    if !state.storage.is_enabled() {
        return CheckStatus::disabled("Object storage not configured, uploads rejected");
    }

    if state.storage.health_check().await {
        CheckStatus::ok("Bucket reachable")
    } else {
        CheckStatus::error("Bucket unreachable")
    }
}

fn check_feedback(state: &AppState) -> CheckStatus {
    if state.feedback.is_enabled() {
        CheckStatus::ok("Feedback service configured")
    } else {
        CheckStatus::disabled("Feedback service not configured")
    }
}

async fn check_cache(state: &AppState) -> CheckStatus {
    if state.cache.health_check().await {
        CheckStatus::ok("Cache available")
    } else {
        CheckStatus::error("Redis connection failed")
    }
}
