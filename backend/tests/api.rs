mod support;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use chrono::Datelike;
use serde_json::Value;
use tower::ServiceExt;

use napje_backend::{app, utils::time::today_local};
use support::{national, test_state, ymd};

fn router() -> Router {
    let year = today_local(&chrono_tz::America::Sao_Paulo).year();
    app(test_state(vec![
        national(ymd(2025, 12, 25), "Christmas"),
        national(ymd(2026, 1, 1), "New Year"),
        national(ymd(2999, 12, 25), "Christmas"),
        national(ymd(year, 12, 25), "Christmas"),
    ]))
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

#[tokio::test]
async fn health_and_timezone() {
    let app = router();

    let (status, body) = send(&app, "GET", "/api/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");

    let (status, body) = send(&app, "GET", "/api/config/timezone", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["time_zone"], "America/Sao_Paulo");
}

#[tokio::test]
async fn holidays_are_listed_for_the_requested_year() {
    let (status, body) = send(&router(), "GET", "/api/holidays?year=2025", None).await;
    assert_eq!(status, StatusCode::OK);
    let holidays = body.as_array().unwrap();
    assert!(!holidays.is_empty());
    assert!(holidays.iter().all(|h| h["date"] == "2025-12-25"));
    assert_eq!(holidays[0]["label"], "Christmas");
}

#[tokio::test]
async fn suggestions_include_year_end_window() {
    let (status, body) = send(&router(), "GET", "/api/vacations/suggestions?year=2999", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["year"], 2999);
    assert_eq!(body["degraded"], false);

    let suggestions = body["suggestions"].as_array().unwrap();
    assert!(suggestions.len() <= 6);
    assert!(suggestions
        .iter()
        .any(|s| s["id"] == "year-end" && s["score"] == 90));
    assert!(suggestions.iter().all(|s| s["startDate"].is_string()));
}

#[tokio::test]
async fn out_of_range_year_is_rejected() {
    let (status, body) = send(&router(), "GET", "/api/vacations/suggestions?year=1800", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
    assert_eq!(body["details"]["errors"][0], "year: range");
}

#[tokio::test]
async fn week_plan_counts_holidays() {
    let (status, body) = send(&router(), "GET", "/api/planning/week?date=2025-12-24", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["weekStart"], "2025-12-22");
    assert_eq!(body["workingDays"], 4);
    assert_eq!(body["nextWeekHolidays"][0]["label"], "New Year");
}

#[tokio::test]
async fn week_plan_rejects_dates_outside_supported_years() {
    let (status, body) = send(&router(), "GET", "/api/planning/week?date=%2B262142-12-31", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "BAD_REQUEST");

    let (status, _) = send(&router(), "GET", "/api/planning/week?date=1899-12-31", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn reminder_settings_round_trip() {
    let app = router();

    let (status, body) = send(&app, "GET", "/api/notifications/settings", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["enabled"], true);

    let update = serde_json::json!({ "enabled": false, "disabledRules": ["weekly-review"] });
    let (status, _) = send(&app, "PUT", "/api/notifications/settings", Some(update)).await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = send(&app, "GET", "/api/notifications/settings", None).await;
    assert_eq!(body["enabled"], false);
    assert_eq!(body["disabledRules"][0], "weekly-review");

    let (status, body) = send(&app, "GET", "/api/notifications/weekly", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn dismissing_unknown_reminder_is_not_found() {
    let app = router();

    let (status, body) = send(&app, "POST", "/api/notifications/weekly/nope/dismiss", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");

    let (status, _) = send(
        &app,
        "POST",
        "/api/notifications/weekly/weekly-planning/dismiss",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn search_records_history() {
    let app = router();

    let (status, body) = send(&app, "GET", "/api/search?q=christmas&limit=5", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["hits"][0]["category"], "holiday");

    let (_, body) = send(&app, "GET", "/api/search/history", None).await;
    assert_eq!(body, serde_json::json!(["christmas"]));

    let (status, _) = send(&app, "DELETE", "/api/search/history", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (_, body) = send(&app, "GET", "/api/search/history", None).await;
    assert_eq!(body, serde_json::json!([]));
}

#[tokio::test]
async fn empty_search_query_is_rejected() {
    let (status, body) = send(&router(), "GET", "/api/search?q=", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn responses_carry_request_id() {
    let response = router()
        .oneshot(
            Request::builder()
                .uri("/api/health")
                .header("x-correlation-id", "corr-123")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.headers().get("x-request-id").unwrap(), "corr-123");
}
