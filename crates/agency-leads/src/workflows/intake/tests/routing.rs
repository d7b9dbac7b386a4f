use super::common::*;
use axum::body::Body;
use axum::extract::{Query, State};
use axum::http::{header, Request, StatusCode};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

use crate::workflows::intake::lead_router;
use crate::workflows::intake::router::{submit_handler, LocaleQuery};

fn post(uri: &str, body: impl Into<Body>) -> Request<Body> {
    Request::post(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(body.into())
        .unwrap()
}

fn json_body(payload: &Value) -> Vec<u8> {
    serde_json::to_vec(payload).unwrap()
}

#[tokio::test]
async fn submit_route_accepts_valid_leads() {
    let (orchestrator, messenger) = orchestrator(FakeMessenger::default());
    let router = lead_router(Arc::new(orchestrator));

    let response = router
        .oneshot(post("/api/v1/leads", json_body(&production_payload())))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::ACCEPTED);
    assert_eq!(read_json_body(response).await, json!({ "accepted": true }));
    assert_eq!(messenger.sent().len(), 2);
}

#[tokio::test]
async fn submit_route_returns_issues_for_invalid_leads() {
    let (orchestrator, messenger) = orchestrator(FakeMessenger::default());
    let router = lead_router(Arc::new(orchestrator));
    let payload = without(booking_payload(), "talentCategory");

    let response = router
        .oneshot(post("/api/v1/leads", json_body(&payload)))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = read_json_body(response).await;
    assert_eq!(body["reason"], json!("invalid"));
    assert_eq!(
        body["issues"],
        json!([{
            "path": "talentCategory",
            "code": "required",
            "message": "Talent category is required for this request",
        }])
    );
    assert!(messenger.sent().is_empty());
}

#[tokio::test]
async fn submit_route_rejects_unparseable_bodies() {
    let (orchestrator, _messenger) = orchestrator(FakeMessenger::default());
    let router = lead_router(Arc::new(orchestrator));

    let response = router
        .oneshot(post("/api/v1/leads", "{not json"))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = read_json_body(response).await;
    assert_eq!(body["issues"][0]["path"], json!(""));
    assert_eq!(body["issues"][0]["code"], json!("malformed_payload"));
}

#[tokio::test]
async fn submit_route_reports_internal_failure_without_issues() {
    let (orchestrator, _messenger) = orchestrator(FakeMessenger::misconfigured());
    let router = lead_router(Arc::new(orchestrator));

    let response = router
        .oneshot(post("/api/v1/leads", json_body(&production_payload())))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        read_json_body(response).await,
        json!({ "accepted": false, "reason": "internal" })
    );
}

#[tokio::test]
async fn locale_query_overrides_body_locale() {
    let (orchestrator, messenger) = orchestrator(FakeMessenger::default());

    let response = submit_handler::<FakeMessenger>(
        State(Arc::new(orchestrator)),
        Ok(Query(LocaleQuery {
            locale: Some("he-IL".to_string()),
        })),
        json_body(&production_payload()).into(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::ACCEPTED);
    let acknowledgement = messenger
        .sent()
        .into_iter()
        .find(|message| message.to == "ana@x.com")
        .expect("acknowledgement sent");
    assert!(acknowledgement.html_body.contains("dir=\"rtl\""));
}

#[tokio::test]
async fn unreadable_query_string_uses_the_shape_error_envelope() {
    let (orchestrator, messenger) = orchestrator(FakeMessenger::default());
    let router = lead_router(Arc::new(orchestrator));

    let response = router
        .oneshot(post(
            "/api/v1/leads?locale=en&locale=he",
            json_body(&production_payload()),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = read_json_body(response).await;
    assert_eq!(body["accepted"], json!(false));
    assert_eq!(body["reason"], json!("invalid"));
    assert_eq!(body["issues"][0]["path"], json!(""));
    assert_eq!(body["issues"][0]["code"], json!("malformed_payload"));
    assert!(messenger.sent().is_empty());
}
