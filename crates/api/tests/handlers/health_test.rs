use axum::http::StatusCode;
use medsched_api::routes::health::{HealthResponse, VersionResponse};
use pretty_assertions::assert_eq;

use crate::test_utils::TestContext;

#[tokio::test]
async fn test_health_check() {
    let ctx = TestContext::new();

    let response = ctx.server.get("/health").await;

    response.assert_status(StatusCode::OK);
    assert_eq!(response.json::<HealthResponse>().status, "ok");
}

#[tokio::test]
async fn test_version_reports_package() {
    let ctx = TestContext::new();

    let body = ctx.server.get("/version").await.json::<VersionResponse>();

    assert_eq!(body.service, "medsched-api");
    assert!(!body.version.is_empty());
}
