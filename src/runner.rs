//! End-to-end dashboard run: scoring, cleaner hours, ROI, recommendation.

use std::fmt;

use crate::config::DashboardConfig;
use crate::engine::cii::{ZoneScore, score_population};
use crate::engine::cleaner_hours::select_cleaner_hours;
use crate::engine::roi::{ControlSettings, RoiResult, project_roi};
use crate::engine::summary::ImpactReport;
use crate::engine::types::{CleanerHour, HourlyRecord};
use crate::error::EngineError;
use crate::recommend::{Recommendation, Recommender};
use crate::synth::{HourlyTrend, ZoneSnapshot, all_zones, zone_seed, zone_snapshot};

/// Everything one dashboard run produces.
#[derive(Debug, Clone)]
pub struct DashboardRun {
    /// Snapshot of the selected zone.
    pub zone: ZoneSnapshot,
    /// CII of every zone in the dataset.
    pub scores: Vec<ZoneScore>,
    /// CII of the selected zone.
    pub zone_cii: f64,
    /// 24-hour trend of the selected zone.
    pub hours: Vec<HourlyRecord>,
    /// Cleaner hours of that trend.
    pub cleaner_hours: Vec<CleanerHour>,
    /// Levers the projection was made with.
    pub controls: ControlSettings,
    /// Projected ROI.
    pub roi: RoiResult,
    /// Before/after summary for reporting.
    pub report: ImpactReport,
    /// Recommendation text and provenance.
    pub recommendation: Recommendation,
}

/// Runs the full pipeline for `cfg`.
///
/// # Errors
///
/// Returns an [`EngineError`] if the configured zone is unknown or the
/// configured levers are invalid.
pub async fn run_dashboard(
    cfg: &DashboardConfig,
    recommender: &Recommender,
) -> Result<DashboardRun, EngineError> {
    let d = &cfg.dashboard;
    let zone = zone_snapshot(&d.zip)?;
    let scores = score_population(&all_zones())?;
    let zone_cii = scores
        .iter()
        .find(|s| s.zone.zip == d.zip)
        .map(|s| s.cii)
        .ok_or_else(|| EngineError::UnknownZone(d.zip.clone()))?;

    let hours = HourlyTrend::new(zone_seed(d.seed, &d.zip)).series();
    let cleaner_hours = select_cleaner_hours(&hours)?;

    let controls = cfg.controls();
    let baseline = cfg.persona_baseline().clone();
    let roi = project_roi(d.persona, &baseline, &controls)?;
    let report = ImpactReport::new(d.persona, baseline, roi);

    let recommendation = recommender.recommend(&d.company_name, &roi, &controls).await;
    tracing::info!(
        zip = %d.zip,
        persona = %d.persona,
        cleaner_hours = cleaner_hours.len(),
        source = recommendation.source.as_str(),
        "dashboard run complete"
    );

    Ok(DashboardRun {
        zone,
        scores,
        zone_cii,
        hours,
        cleaner_hours,
        controls,
        roi,
        report,
        recommendation,
    })
}

impl fmt::Display for DashboardRun {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let z = &self.zone;
        writeln!(f, "--- Zone {} ---", z.record.zip)?;
        writeln!(f, "Carbon intensity:      {:.3} kg/kWh", z.record.carbon_intensity)?;
        writeln!(f, "AQI:                   {:.0}", z.record.aqi)?;
        writeln!(f, "Price:                 {:.2} c/kWh", z.price_cents_per_kwh)?;
        writeln!(f, "CII:                   {:.1}", self.zone_cii)?;
        let labels: Vec<&str> = self.cleaner_hours.iter().map(|c| c.label.as_str()).collect();
        writeln!(f, "Cleaner hours:         {}", labels.join(", "))?;
        writeln!(f)?;
        writeln!(f, "{}", self.roi)?;
        writeln!(f)?;
        writeln!(f, "{}", self.report)?;
        writeln!(f)?;
        writeln!(
            f,
            "--- Recommendation ({}) ---",
            self.recommendation.source.as_str()
        )?;
        write!(f, "{}", self.recommendation.text)
    }
}
