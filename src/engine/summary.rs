//! Before/after impact record handed to report and export collaborators.

use std::fmt;

use serde::Serialize;

use super::roi::{BaselineFigures, RoiResult};
use super::types::Persona;

/// Headline figures for one side of a before/after comparison.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ImpactSnapshot {
    /// Cost (USD).
    pub cost_usd: f64,
    /// Emissions (tons CO₂).
    pub co2_tons: f64,
    /// Community Impact Index.
    pub cii: f64,
}

/// ROI projection packaged with its persona and baseline for reporting.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImpactReport {
    /// Persona the projection was made for.
    pub persona: Persona,
    /// Baseline the projection is relative to.
    pub baseline: BaselineFigures,
    /// Projected deltas.
    pub roi: RoiResult,
    /// Baseline figures.
    pub before: ImpactSnapshot,
    /// Baseline figures with the projected deltas applied.
    pub after: ImpactSnapshot,
}

impl ImpactReport {
    /// Builds the report by applying `roi` to `baseline`.
    pub fn new(persona: Persona, baseline: BaselineFigures, roi: RoiResult) -> Self {
        let before = ImpactSnapshot {
            cost_usd: baseline.cost_usd,
            co2_tons: baseline.emissions_kg / 1000.0,
            cii: baseline.cii,
        };
        let after = ImpactSnapshot {
            cost_usd: before.cost_usd - roi.cost_saved_usd,
            co2_tons: before.co2_tons - roi.emissions_avoided_tons,
            cii: before.cii + roi.cii_delta,
        };
        Self {
            persona,
            baseline,
            roi,
            before,
            after,
        }
    }
}

impl fmt::Display for ImpactReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- Impact Summary ({}) ---", self.persona)?;
        writeln!(
            f,
            "Cost:                  {:.2} -> {:.2} USD",
            self.before.cost_usd, self.after.cost_usd
        )?;
        writeln!(
            f,
            "CO2:                   {:.2} -> {:.2} t",
            self.before.co2_tons, self.after.co2_tons
        )?;
        write!(
            f,
            "CII:                   {:.1} -> {:.1} pts",
            self.before.cii, self.after.cii
        )
    }
}
