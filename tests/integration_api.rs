//! Integration tests for the REST API feature.

#![cfg(feature = "api")]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use tower::util::ServiceExt;

use energy_zone::api::{AppState, router};
use energy_zone::config::DashboardConfig;
use energy_zone::recommend::Recommender;
use energy_zone::synth::ATLANTA_ZIPS;

fn build_api_state() -> Arc<AppState> {
    let state = AppState::new(DashboardConfig::operator(), Recommender::rule_based())
        .expect("dataset should score");
    Arc::new(state)
}

async fn get_json(uri: &str) -> (StatusCode, serde_json::Value) {
    let app = router(build_api_state());
    let req = Request::builder().uri(uri).body(Body::empty()).unwrap();
    let resp = app.oneshot(req).await.unwrap();
    let status = resp.status();
    let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&body).unwrap())
}

async fn post_json(uri: &str, body: serde_json::Value) -> (StatusCode, serde_json::Value) {
    let app = router(build_api_state());
    let req = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    let resp = app.oneshot(req).await.unwrap();
    let status = resp.status();
    let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&body).unwrap())
}

#[tokio::test]
async fn zones_cover_dataset() {
    let (status, json) = get_json("/zones").await;
    assert_eq!(status, StatusCode::OK);

    let zones = json["zones"].as_array().unwrap();
    assert_eq!(zones.len(), ATLANTA_ZIPS.len());
    for z in zones {
        let cii = z["cii"].as_f64().unwrap();
        assert!((0.0..=100.0).contains(&cii), "cii out of range: {cii}");
    }
}

#[tokio::test]
async fn zone_cii_matches_zones_listing() {
    let (_, listing) = get_json("/zones").await;
    let (status, zone) = get_json("/zone?zip=30314").await;
    assert_eq!(status, StatusCode::OK);

    let listed = listing["zones"]
        .as_array()
        .unwrap()
        .iter()
        .find(|z| z["zip"] == "30314")
        .map(|z| z["cii"].clone());
    assert_eq!(listed, Some(zone["cii"].clone()));
}

#[tokio::test]
async fn zone_is_deterministic_for_seed() {
    let (_, a) = get_json("/zone?zip=30318").await;
    let (_, b) = get_json("/zone?zip=30318").await;
    assert_eq!(a["hours"], b["hours"]);
    assert_eq!(a["cleaner_hours"], b["cleaner_hours"]);
}

#[tokio::test]
async fn cloud_recommendation_round_trip() {
    let body = serde_json::json!({
        "persona": "cloud",
        "controls": {"shift_pct": 30, "target_region": "us-west", "target_hours": "9pm-1am"},
        "companyName": "Acme"
    });
    let (status, json) = post_json("/recommendations", body).await;
    assert_eq!(status, StatusCode::OK);

    assert_eq!(json["source"], "rule-based");
    let pct = json["roi"]["savingsPct"].as_f64().unwrap();
    assert!((pct - 6.0).abs() < 1e-9);
    assert!(
        json["recommendations"]
            .as_str()
            .is_some_and(|t| t.contains("Regional Workload Shifting"))
    );
}

#[tokio::test]
async fn unknown_persona_returns_400() {
    let body = serde_json::json!({"persona": "regulator", "controls": {}});
    let (status, json) = post_json("/report", body).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json.get("error").is_some());
}

#[tokio::test]
async fn operator_report_has_before_and_after() {
    let body = serde_json::json!({
        "persona": "operator",
        "controls": {"cooling_setpoint_delta_f": 2, "containment_pct": 80, "batch_deferral_pct": 20}
    });
    let (status, json) = post_json("/report", body).await;
    assert_eq!(status, StatusCode::OK);

    assert_eq!(json["before"]["cii"], 58.0);
    let after_cii = json["after"]["cii"].as_f64().unwrap();
    assert!((after_cii - 66.7).abs() < 1e-9);
}

#[tokio::test]
async fn malformed_body_uses_error_shape() {
    let app = router(build_api_state());
    let req = Request::builder()
        .method("POST")
        .uri("/recommendations")
        .header("content-type", "application/json")
        .body(Body::from("not json"))
        .unwrap();
    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert!(json.get("error").is_some());
}
