#![cfg(feature = "server")]

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use funders_dashboard::server::{router, AppState};
use funders_dashboard::{Settings, NO_DATA};
use serde_json::{json, Value};
use tower::ServiceExt;
use wiremock::matchers::method;
use wiremock::{Mock, MockServer, ResponseTemplate};

fn membership(id: &str, slug: &str, received: f64) -> Value {
    json!({
        "id": id,
        "account": {
            "slug": slug,
            "name": format!("{} collective", slug),
            "imageUrl": format!("https://images.example/{}.png", slug),
            "stats": {
                "totalAmountReceivedPeriod": { "value": received, "currency": "USD" },
                "totalAmountReceivedPreviousPeriod": { "value": 100, "currency": "USD" },
                "totalAmountSpentPeriod": { "value": 100, "currency": "USD" },
                "totalAmountSpentPreviousPeriod": { "value": 150, "currency": "USD" },
                "balance": { "value": 2500, "currency": "USD" },
                "activeMonthlyRecurringContributions": { "value": 10, "currency": "USD" },
                "activeYearlyRecurringContributions": { "value": 120, "currency": "USD" }
            }
        },
        "totalDonations": { "value": 500, "currency": "USD" }
    })
}

async fn app_with(body: Value) -> (MockServer, axum::Router) {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(&server)
        .await;

    let settings = Settings {
        graphql_url: format!("{}/graphql", server.uri()),
        ..Settings::default()
    };
    let app = router(AppState::new(settings).unwrap());
    (server, app)
}

async fn get(app: axum::Router, uri: &str) -> (StatusCode, String) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

fn account(nodes: Option<Vec<Value>>) -> Value {
    let member_of = match nodes {
        Some(nodes) => json!({ "nodes": nodes }),
        None => Value::Null,
    };
    json!({
        "data": {
            "account": {
                "slug": "alice",
                "name": "Alice",
                "stats": { "totalAmountSpent": { "value": 1500, "currency": "USD" } },
                "memberOf": member_of
            }
        }
    })
}

#[tokio::test]
async fn test_rows_match_distinct_collectives() {
    let (_server, app) = app_with(account(Some(vec![
        membership("m1", "webpack", 150.0),
        membership("m2", "webpack", 999.0),
        membership("m3", "babel", 100.0),
    ])))
    .await;

    let (status, html) = get(app, "/funders-dashboard/alice?scale=month").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(html.matches("<tr class=\"membership\"").count(), 2);
    assert!(html.contains("data-id=\"m1\""));
    assert!(!html.contains("data-id=\"m2\""));
    assert!(html.contains("href=\"https://opencollective.com/webpack\""));
    assert!(html.contains("+50 %"));
    assert!(html.contains("-33 %"));
    assert!(html.contains("$20.00"));
    assert!(html.contains("To 2 Collectives"));
    assert!(!html.contains(NO_DATA));
}

#[tokio::test]
async fn test_no_data_when_memberships_empty() {
    let (_server, app) = app_with(account(Some(vec![]))).await;

    let (status, html) = get(app, "/funders-dashboard/alice").await;

    assert_eq!(status, StatusCode::OK);
    assert!(html.contains(NO_DATA));
    assert_eq!(html.matches("<tr class=\"membership\"").count(), 0);
}

#[tokio::test]
async fn test_no_data_when_memberships_absent() {
    let (_server, app) = app_with(account(None)).await;

    let (_, html) = get(app, "/funders-dashboard/alice?offset=abc&limit=-1").await;

    assert!(html.contains(NO_DATA));
}

#[tokio::test]
async fn test_edges_without_account_are_not_no_data() {
    let (_server, app) = app_with(account(Some(vec![json!({ "id": "m1", "account": null })]))).await;

    let (status, html) = get(app, "/funders-dashboard/alice").await;

    assert_eq!(status, StatusCode::OK);
    assert!(!html.contains(NO_DATA));
    assert_eq!(html.matches("<tr class=\"membership\"").count(), 0);
}

#[tokio::test]
async fn test_huge_received_amount_still_renders() {
    let mut node = membership("m1", "webpack", 0.0);
    node["account"]["stats"]["totalAmountReceivedPreviousPeriod"] =
        json!({ "value": 0.01, "currency": "USD" });
    node["account"]["stats"]["totalAmountReceivedPeriod"] =
        json!({ "value": 1e27, "currency": "USD" });
    let (_server, app) = app_with(account(Some(vec![node]))).await;

    let (status, html) = get(app, "/funders-dashboard/alice").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(html.matches("<tr class=\"membership\"").count(), 1);
}

#[tokio::test]
async fn test_missing_account_renders_not_found() {
    let (_server, app) = app_with(json!({ "data": { "account": null } })).await;

    let (status, html) = get(app, "/funders-dashboard/ghost").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(html.contains("Account not found: ghost"));
}

#[tokio::test]
async fn test_upstream_error_renders_bad_gateway() {
    let (_server, app) = app_with(json!({ "errors": [{ "message": "boom" }] })).await;

    let (status, html) = get(app, "/funders-dashboard/alice").await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(html.contains("boom"));
}

#[tokio::test]
async fn test_json_api() {
    let (_server, app) = app_with(account(Some(vec![
        membership("m1", "webpack", 150.0),
        membership("m2", "webpack", 150.0),
    ])))
    .await;

    let (status, body) = get(app, "/api/funders-dashboard/alice").await;
    let json: Value = serde_json::from_str(&body).unwrap();

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["success"], true);
    assert_eq!(json["data"]["slug"], "alice");
    assert_eq!(json["data"]["rows"].as_array().unwrap().len(), 1);
    assert_eq!(json["data"]["rows"][0]["account"]["slug"], "webpack");
}

#[tokio::test]
async fn test_json_api_error() {
    let (_server, app) = app_with(json!({ "data": { "account": null } })).await;

    let (status, body) = get(app, "/api/funders-dashboard/ghost").await;
    let json: Value = serde_json::from_str(&body).unwrap();

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["success"], false);
    assert!(json.get("data").is_none());
}

#[tokio::test]
async fn test_health_check() {
    let (_server, app) = app_with(json!({})).await;

    let (status, body) = get(app, "/api/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(serde_json::from_str::<Value>(&body).unwrap()["data"], "OK");
}
