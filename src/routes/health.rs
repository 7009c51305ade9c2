use actix_web::{http::StatusCode, web, HttpResponse};
use serde::Serialize;

use crate::services::UsageGateService;

#[derive(Serialize)]
pub struct LivenessResponse {
    status: &'static str,
}

#[derive(Serialize)]
pub struct ReadinessResponse {
    status: &'static str,
    checks: ReadinessChecks,
}

#[derive(Serialize)]
pub struct ReadinessChecks {
    usage_storage: &'static str,
}

/// Liveness check - is the process running?
/// Returns 200 if the server is alive.
pub async fn liveness() -> HttpResponse {
    HttpResponse::Ok().json(LivenessResponse { status: "ok" })
}

/// Readiness check - is the service ready to handle requests?
/// Returns 200 if the usage storage is readable and writable, 503 otherwise.
pub async fn readiness(gate: web::Data<UsageGateService>) -> HttpResponse {
    let storage_healthy = gate.check().await.is_ok();

    let (status, storage_status, http_status) = if storage_healthy {
        ("ready", "ok", StatusCode::OK)
    } else {
        ("not_ready", "error", StatusCode::SERVICE_UNAVAILABLE)
    };

    let response = ReadinessResponse {
        status,
        checks: ReadinessChecks {
            usage_storage: storage_status,
        },
    };

    HttpResponse::build(http_status).json(response)
}
