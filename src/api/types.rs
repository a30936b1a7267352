//! API request, response, and query types.
//!
//! JSON bodies use camelCase field names to match the dashboard client.

use serde::{Deserialize, Serialize};

use crate::engine::cii::ZoneScore;
use crate::engine::roi::RoiResult;
use crate::engine::types::{CleanerHour, HourlyRecord};
use crate::recommend::{Recommendation, RecommendationSource};
use crate::synth::ZoneSnapshot;

/// Zone page payload.
#[derive(Debug, Serialize)]
pub struct ZoneResponse {
    /// Current readings for the zone.
    #[serde(flatten)]
    pub zone: ZoneSnapshot,
    /// Community Impact Index (0 to 100, higher is better).
    pub cii: f64,
    /// 24-hour carbon, price, and load trend.
    pub hours: Vec<HourlyRecord>,
    /// Hours favorable on both carbon and price.
    pub cleaner_hours: Vec<CleanerHour>,
}

/// `GET /zones` payload.
#[derive(Debug, Serialize)]
pub struct ZonesResponse {
    pub zones: Vec<ZoneScore>,
}

/// Query for `GET /zone`.
#[derive(Debug, Deserialize)]
pub struct ZoneQuery {
    pub zip: Option<String>,
}

/// Query for `GET /baseline`.
#[derive(Debug, Deserialize)]
pub struct BaselineQuery {
    pub persona: Option<String>,
}

/// Body of `POST /recommendations`.
///
/// `controls` stays untyped until the persona is known, so a lever set that
/// does not match the persona is reported as a 400 rather than a parse error.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationRequest {
    pub persona: String,
    pub controls: serde_json::Value,
    #[serde(default)]
    pub company_name: Option<String>,
}

/// Response of `POST /recommendations`.
#[derive(Debug, Serialize)]
pub struct RecommendationResponse {
    pub roi: RoiResult,
    pub recommendations: String,
    pub source: RecommendationSource,
}

impl RecommendationResponse {
    pub fn new(roi: RoiResult, recommendation: Recommendation) -> Self {
        Self {
            roi,
            recommendations: recommendation.text,
            source: recommendation.source,
        }
    }
}

/// Body of `POST /report`.
#[derive(Debug, Deserialize)]
pub struct ReportRequest {
    pub persona: String,
    pub controls: serde_json::Value,
}

/// Error response body for 4xx errors.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Human-readable error message.
    pub error: String,
}
