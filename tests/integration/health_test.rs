//! Integration tests for the health endpoints

use std::sync::Arc;

use actix_web::{test, web, App};

use imaginarrate::routes;
use imaginarrate::services::UsageGateService;
use imaginarrate::storage::{FileUsageStore, MemoryUsageStore};

use crate::common::{t0, ManualClock};

macro_rules! health_app {
    ($store:expr) => {{
        let gate = web::Data::new(UsageGateService::new($store, ManualClock::new(t0())));
        test::init_service(
            App::new()
                .app_data(gate)
                .service(
                    web::scope("/health")
                        .route("", web::get().to(routes::health::liveness))
                        .route("/ready", web::get().to(routes::health::readiness)),
                )
                .route("/health", web::get().to(routes::health::liveness)),
        )
        .await
    }};
}

#[actix_web::test]
async fn test_liveness_always_ok() {
    let app = health_app!(Arc::new(MemoryUsageStore::new()));

    let req = test::TestRequest::get().uri("/health").to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["status"], "ok");
}

#[actix_web::test]
async fn test_readiness_ok_when_storage_writable() {
    let dir = tempfile::tempdir().unwrap();
    let app = health_app!(Arc::new(FileUsageStore::new(dir.path().join("usage.json"))));

    let req = test::TestRequest::get().uri("/health/ready").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status().as_u16(), 200);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "ready");
    assert_eq!(body["checks"]["usage_storage"], "ok");
}

#[actix_web::test]
async fn test_readiness_fails_when_storage_unwritable() {
    // Parent directory does not exist, so initializing the record fails
    let app = health_app!(Arc::new(FileUsageStore::new(
        "/nonexistent/imaginarrate/usage.json"
    )));

    let req = test::TestRequest::get().uri("/health/ready").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status().as_u16(), 503);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "not_ready");
    assert_eq!(body["checks"]["usage_storage"], "error");
}
