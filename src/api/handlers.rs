//! Request handlers for the API endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Query, State};
use axum::http::StatusCode;

use super::AppState;
use super::types::{
    BaselineQuery, ErrorResponse, RecommendationRequest, RecommendationResponse, ReportRequest,
    ZoneQuery, ZoneResponse, ZonesResponse,
};
use crate::engine::cleaner_hours::select_cleaner_hours;
use crate::engine::roi::{BaselineFigures, ControlSettings, RoiResult, project_roi};
use crate::engine::summary::ImpactReport;
use crate::engine::types::Persona;
use crate::error::EngineError;
use crate::synth::{HourlyTrend, zone_seed, zone_snapshot};

type ApiError = (StatusCode, Json<ErrorResponse>);

/// Maps an engine rejection onto its HTTP status.
fn reject(err: EngineError) -> ApiError {
    let status = match err {
        EngineError::UnknownZone(_) => StatusCode::NOT_FOUND,
        EngineError::InvalidInput { .. } => StatusCode::BAD_REQUEST,
    };
    (
        status,
        Json(ErrorResponse {
            error: err.to_string(),
        }),
    )
}

/// Wraps a body that failed to parse in the shared error shape.
fn reject_body(rejection: JsonRejection) -> ApiError {
    (
        rejection.status(),
        Json(ErrorResponse {
            error: rejection.body_text(),
        }),
    )
}

/// Parses `persona` and `controls` and projects ROI against the configured baseline.
fn project(
    state: &AppState,
    persona: &str,
    controls: &serde_json::Value,
) -> Result<(Persona, ControlSettings, RoiResult), EngineError> {
    let persona: Persona = persona.parse()?;
    let controls = ControlSettings::from_json(persona, controls)?;
    let baseline = state.config.baseline.for_persona(persona);
    let roi = project_roi(persona, baseline, &controls)?;
    Ok((persona, controls, roi))
}

/// Returns the zone snapshot, its CII, the 24-hour trend, and cleaner hours.
///
/// `GET /zone` → configured default zone
/// `GET /zone?zip=30314` → 200 + `ZoneResponse` JSON
/// `GET /zone?zip=00000` → 404 + `ErrorResponse`
pub async fn get_zone(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ZoneQuery>,
) -> Result<Json<ZoneResponse>, ApiError> {
    let zip = query
        .zip
        .unwrap_or_else(|| state.config.dashboard.zip.clone());

    let zone = zone_snapshot(&zip).map_err(reject)?;
    let cii = state
        .scores
        .iter()
        .find(|s| s.zone.zip == zip)
        .map(|s| s.cii)
        .ok_or_else(|| reject(EngineError::UnknownZone(zip.clone())))?;

    let hours = HourlyTrend::new(zone_seed(state.config.dashboard.seed, &zip)).series();
    let cleaner_hours = select_cleaner_hours(&hours).map_err(reject)?;

    Ok(Json(ZoneResponse {
        zone,
        cii,
        hours,
        cleaner_hours,
    }))
}

/// Returns the CII of every zone in the dataset.
///
/// `GET /zones` → 200 + `ZonesResponse` JSON
pub async fn get_zones(State(state): State<Arc<AppState>>) -> Json<ZonesResponse> {
    Json(ZonesResponse {
        zones: state.scores.clone(),
    })
}

/// Returns the baseline figures for a persona.
///
/// `GET /baseline` → configured persona
/// `GET /baseline?persona=cloud` → 200 + `BaselineFigures` JSON
/// `GET /baseline?persona=x` → 400 + `ErrorResponse`
pub async fn get_baseline(
    State(state): State<Arc<AppState>>,
    Query(query): Query<BaselineQuery>,
) -> Result<Json<BaselineFigures>, ApiError> {
    let persona = match query.persona {
        Some(p) => p.parse::<Persona>().map_err(reject)?,
        None => state.config.dashboard.persona,
    };
    Ok(Json(state.config.baseline.for_persona(persona).clone()))
}

/// Projects ROI and generates recommendation text.
///
/// `POST /recommendations` → 200 + `RecommendationResponse` JSON
/// Invalid persona or levers → 400 + `ErrorResponse`
/// Malformed body → 4xx + `ErrorResponse`
pub async fn post_recommendations(
    State(state): State<Arc<AppState>>,
    body: Result<Json<RecommendationRequest>, JsonRejection>,
) -> Result<Json<RecommendationResponse>, ApiError> {
    let Json(req) = body.map_err(reject_body)?;
    let (persona, controls, roi) = project(&state, &req.persona, &req.controls).map_err(reject)?;
    let company_name = req
        .company_name
        .unwrap_or_else(|| state.config.dashboard.company_name.clone());

    let recommendation = state
        .recommender
        .recommend(&company_name, &roi, &controls)
        .await;
    tracing::info!(
        %persona,
        source = recommendation.source.as_str(),
        "recommendation served"
    );

    Ok(Json(RecommendationResponse::new(roi, recommendation)))
}

/// Builds the before/after impact report for a lever set.
///
/// `POST /report` → 200 + `ImpactReport` JSON
/// Invalid persona or levers → 400 + `ErrorResponse`
pub async fn post_report(
    State(state): State<Arc<AppState>>,
    body: Result<Json<ReportRequest>, JsonRejection>,
) -> Result<Json<ImpactReport>, ApiError> {
    let Json(req) = body.map_err(reject_body)?;
    let (persona, _, roi) = project(&state, &req.persona, &req.controls).map_err(reject)?;
    let baseline = state.config.baseline.for_persona(persona).clone();
    Ok(Json(ImpactReport::new(persona, baseline, roi)))
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::Request;
    use tower::util::ServiceExt;

    use super::*;
    use crate::api::router;
    use crate::config::DashboardConfig;
    use crate::recommend::Recommender;

    fn make_test_state() -> Arc<AppState> {
        Arc::new(
            AppState::new(DashboardConfig::operator(), Recommender::rule_based())
                .unwrap(),
        )
    }

    async fn body_json(resp: axum::response::Response) -> serde_json::Value {
        let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    fn post(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn zone_defaults_to_configured_zip() {
        let app = router(make_test_state());

        let req = Request::builder().uri("/zone").body(Body::empty()).unwrap();
        let resp = app.oneshot(req).await.unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
        let json = body_json(resp).await;
        assert_eq!(json["zip"], "30331");
        assert_eq!(json["hours"].as_array().map(Vec::len), Some(24));
        assert!(json.get("cleaner_hours").is_some());
    }

    #[tokio::test]
    async fn unknown_zone_returns_404() {
        let app = router(make_test_state());

        let req = Request::builder()
            .uri("/zone?zip=00000")
            .body(Body::empty())
            .unwrap();
        let resp = app.oneshot(req).await.unwrap();

        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let json = body_json(resp).await;
        assert!(json.get("error").is_some());
    }

    #[tokio::test]
    async fn baseline_for_cloud() {
        let app = router(make_test_state());

        let req = Request::builder()
            .uri("/baseline?persona=cloud")
            .body(Body::empty())
            .unwrap();
        let resp = app.oneshot(req).await.unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
        let json = body_json(resp).await;
        assert_eq!(json["cost_usd"], 120_000.0);
    }

    #[tokio::test]
    async fn baseline_unknown_persona_returns_400() {
        let app = router(make_test_state());

        let req = Request::builder()
            .uri("/baseline?persona=regulator")
            .body(Body::empty())
            .unwrap();
        let resp = app.oneshot(req).await.unwrap();

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn recommendations_for_operator() {
        let app = router(make_test_state());
        let body = r#"{"persona":"operator","controls":{"cooling_setpoint_delta_f":2,"containment_pct":80,"batch_deferral_pct":20},"companyName":"Acme"}"#;

        let resp = app.oneshot(post("/recommendations", body)).await.unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
        let json = body_json(resp).await;
        assert_eq!(json["source"], "rule-based");
        let saved = json["roi"]["costSavedUSD"].as_f64().unwrap();
        assert!((saved - 17_850.0).abs() < 1e-6);
        assert!(
            json["recommendations"]
                .as_str()
                .is_some_and(|t| t.contains("Cooling System Optimization"))
        );
    }

    #[tokio::test]
    async fn recommendations_reject_out_of_range_lever() {
        let app = router(make_test_state());
        let body = r#"{"persona":"cloud","controls":{"shift_pct":75,"target_region":"us-west","target_hours":"9pm-1am"}}"#;

        let resp = app.oneshot(post("/recommendations", body)).await.unwrap();

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let json = body_json(resp).await;
        assert!(
            json["error"]
                .as_str()
                .is_some_and(|e| e.contains("shift_pct"))
        );
    }

    #[tokio::test]
    async fn recommendations_reject_mismatched_levers() {
        let app = router(make_test_state());
        let body = r#"{"persona":"cloud","controls":{"cooling_setpoint_delta_f":2,"containment_pct":80,"batch_deferral_pct":20}}"#;

        let resp = app.oneshot(post("/recommendations", body)).await.unwrap();

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn malformed_body_returns_error_json() {
        let app = router(make_test_state());

        let resp = app
            .oneshot(post("/recommendations", r#"{"persona": "operator", "#))
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let json = body_json(resp).await;
        assert!(json["error"].as_str().is_some_and(|e| !e.is_empty()));
    }

    #[tokio::test]
    async fn report_body_missing_controls_returns_error_json() {
        let app = router(make_test_state());

        let resp = app
            .oneshot(post("/report", r#"{"persona": "operator"}"#))
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let json = body_json(resp).await;
        assert!(json.get("error").is_some());
    }

    #[tokio::test]
    async fn report_applies_deltas() {
        let app = router(make_test_state());
        let body = r#"{"persona":"cloud","controls":{"shift_pct":30,"target_region":"us-west","target_hours":"9pm-1am"}}"#;

        let resp = app.oneshot(post("/report", body)).await.unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
        let json = body_json(resp).await;
        assert_eq!(json["persona"], "cloud");
        assert_eq!(json["before"]["cost_usd"], 120_000.0);
        let after = json["after"]["cost_usd"].as_f64().unwrap();
        assert!((after - 112_800.0).abs() < 1e-6);
    }
}
