use actix_web::{web, HttpResponse};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::AppResult;
use crate::models::USAGE_QUOTA;
use crate::services::{GateVerdict, UsageGateService};

/// Current gate verdict, surfaced to the frontend before it offers the
/// expensive generate action
#[derive(Serialize)]
pub struct UsageResponse {
    pub allowed: bool,
    pub usage_count: u32,
    pub quota: u32,
    pub resets_at: DateTime<Utc>,
}

impl From<GateVerdict> for UsageResponse {
    fn from(verdict: GateVerdict) -> Self {
        Self {
            allowed: verdict.allowed,
            usage_count: verdict.current_count,
            quota: USAGE_QUOTA,
            resets_at: verdict.resets_at,
        }
    }
}

/// GET /api/usage - Current usage count and whether a generation may run
pub async fn get_usage(gate: web::Data<UsageGateService>) -> AppResult<HttpResponse> {
    let verdict = gate.check().await?;
    Ok(HttpResponse::Ok().json(UsageResponse::from(verdict)))
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/api/usage", web::get().to(get_usage));
}
