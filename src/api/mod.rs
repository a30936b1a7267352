//! REST API over the scoring and projection engine.
//!
//! Endpoints:
//! - `GET /zone?zip=`: zone snapshot with CII, 24-hour trend, and cleaner hours
//! - `GET /zones`: CII for every zone in the dataset
//! - `GET /baseline?persona=`: persona baseline figures
//! - `POST /recommendations`: ROI projection plus recommendation text
//! - `POST /report`: before/after impact report

mod handlers;
mod types;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};

use crate::config::DashboardConfig;
use crate::engine::cii::{ZoneScore, score_population};
use crate::error::EngineError;
use crate::recommend::Recommender;
use crate::synth::all_zones;

pub use types::{
    ErrorResponse, RecommendationRequest, RecommendationResponse, ReportRequest, ZoneResponse,
    ZonesResponse,
};

/// Application state shared across all request handlers.
///
/// Built once at startup and wrapped in `Arc`; handlers only read it.
pub struct AppState {
    /// Configuration supplying baselines, seed, and default zone.
    pub config: DashboardConfig,
    /// CII of every zone, scored once against the full dataset.
    pub scores: Vec<ZoneScore>,
    /// Recommendation text generator.
    pub recommender: Recommender,
}

impl AppState {
    /// Scores the zone dataset and bundles it with `config` and `recommender`.
    ///
    /// # Errors
    ///
    /// Returns an [`EngineError`] if the zone dataset cannot be scored.
    pub fn new(config: DashboardConfig, recommender: Recommender) -> Result<Self, EngineError> {
        let scores = score_population(&all_zones())?;
        Ok(Self {
            config,
            scores,
            recommender,
        })
    }
}

/// Builds the axum router with all API routes.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/zone", get(handlers::get_zone))
        .route("/zones", get(handlers::get_zones))
        .route("/baseline", get(handlers::get_baseline))
        .route("/recommendations", post(handlers::post_recommendations))
        .route("/report", post(handlers::post_report))
        .with_state(state)
}

/// Binds to the given address and serves the API.
///
/// # Errors
///
/// Returns an `io::Error` if the listener cannot bind or the server fails.
pub async fn serve(state: Arc<AppState>, addr: SocketAddr) -> std::io::Result<()> {
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "API server listening");
    axum::serve(listener, app).await
}
