//! ROI projection for operator and cloud control levers.
//!
//! The two personas report `savings_pct` differently: the operator branch
//! reports the total lever percentage, the cloud branch reports the
//! cost-only percentage. Both are kept as-is for compatibility with
//! existing dashboards and reports.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::types::Persona;
use crate::error::EngineError;

/// Cooling savings per degree of setpoint increase (%).
const COOLING_PCT_PER_DEGREE: f64 = 6.5;
/// Savings at full hot/cold aisle containment (%).
const CONTAINMENT_MAX_PCT: f64 = 5.0;
/// Cost reduction for fully deferred batch load (%).
const BATCH_DEFERRAL_MAX_PCT: f64 = 20.0;
/// Flat operator CII uplift as a fraction of baseline CII.
const OPERATOR_CII_UPLIFT: f64 = 0.15;

/// Carbon reduction when shifting to us-west (%).
const WEST_REGION_CARBON_PCT: f64 = 30.0;
/// Carbon reduction when shifting to any other region (%).
const OTHER_REGION_CARBON_PCT: f64 = 15.0;
/// Off-peak price reduction (%).
const TIME_SHIFT_COST_PCT: f64 = 20.0;
/// Off-peak carbon reduction (%).
const TIME_SHIFT_CARBON_PCT: f64 = 25.0;
/// CII uplift per unit of shifted fraction.
const CLOUD_CII_UPLIFT: f64 = 0.2;

/// Mass units per reported ton.
const KG_PER_TON: f64 = 1000.0;

/// Largest accepted cooling setpoint increase (°F).
pub const MAX_COOLING_DELTA_F: f64 = 10.0;
/// Largest accepted workload shift (%).
pub const MAX_SHIFT_PCT: f64 = 60.0;

/// Facility operator levers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OperatorControls {
    /// Cooling setpoint increase (whole °F, 0–10).
    pub cooling_setpoint_delta_f: f64,
    /// Hot/cold aisle containment (%, 0–100).
    pub containment_pct: f64,
    /// Batch load deferred from peak to off-peak (%, 0–100).
    pub batch_deferral_pct: f64,
}

impl Default for OperatorControls {
    fn default() -> Self {
        Self {
            cooling_setpoint_delta_f: 2.0,
            containment_pct: 80.0,
            batch_deferral_pct: 20.0,
        }
    }
}

/// Destination region for shifted cloud workloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TargetRegion {
    /// `us-east`
    #[serde(rename = "us-east")]
    UsEast,
    /// `us-west`
    #[serde(rename = "us-west")]
    UsWest,
    /// `us-central`
    #[serde(rename = "us-central")]
    UsCentral,
}

impl TargetRegion {
    /// Wire name of the region.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::UsEast => "us-east",
            Self::UsWest => "us-west",
            Self::UsCentral => "us-central",
        }
    }

    /// Grid carbon reduction gained by running in this region (%).
    fn carbon_reduction_pct(self) -> f64 {
        match self {
            Self::UsWest => WEST_REGION_CARBON_PCT,
            Self::UsEast | Self::UsCentral => OTHER_REGION_CARBON_PCT,
        }
    }
}

impl fmt::Display for TargetRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Cloud workload operator levers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CloudControls {
    /// Share of flexible workload shifted (%, 0–60).
    pub shift_pct: f64,
    /// Region the workload is shifted to.
    pub target_region: TargetRegion,
    /// Display label of the target hour window, e.g. `"9pm-1am"`.
    pub target_hours: String,
}

impl Default for CloudControls {
    fn default() -> Self {
        Self {
            shift_pct: 30.0,
            target_region: TargetRegion::UsWest,
            target_hours: "9pm-1am".to_string(),
        }
    }
}

/// Lever settings for exactly one persona.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ControlSettings {
    /// Facility operator levers.
    Operator(OperatorControls),
    /// Cloud workload levers.
    Cloud(CloudControls),
}

fn check_range(field: &str, value: f64, max: f64) -> Result<(), EngineError> {
    if !value.is_finite() || !(0.0..=max).contains(&value) {
        return Err(EngineError::invalid(
            field,
            format!("must be in [0, {max}], got {value}"),
        ));
    }
    Ok(())
}

fn check_whole(field: &str, value: f64) -> Result<(), EngineError> {
    if value.fract() != 0.0 {
        return Err(EngineError::invalid(
            field,
            format!("must be a whole number, got {value}"),
        ));
    }
    Ok(())
}

impl ControlSettings {
    /// Persona these settings belong to.
    pub fn persona(&self) -> Persona {
        match self {
            Self::Operator(_) => Persona::Operator,
            Self::Cloud(_) => Persona::Cloud,
        }
    }

    /// Decodes a controls object for `persona`.
    ///
    /// Missing levers take their defaults. Fields belonging to the other
    /// persona are rejected rather than ignored, and the decoded values are
    /// range-checked.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidInput`] for unknown, mistyped, or
    /// out-of-range fields.
    pub fn from_json(persona: Persona, value: &serde_json::Value) -> Result<Self, EngineError> {
        let settings = match persona {
            Persona::Operator => serde_json::from_value::<OperatorControls>(value.clone())
                .map(Self::Operator),
            Persona::Cloud => {
                serde_json::from_value::<CloudControls>(value.clone()).map(Self::Cloud)
            }
        }
        .map_err(|e| EngineError::invalid("controls", e.to_string()))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Checks every lever against its declared range.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidInput`] naming the first out-of-range field.
    /// The cooling setpoint delta moves in whole degrees.
    pub fn validate(&self) -> Result<(), EngineError> {
        match self {
            Self::Operator(c) => {
                check_range(
                    "controls.cooling_setpoint_delta_f",
                    c.cooling_setpoint_delta_f,
                    MAX_COOLING_DELTA_F,
                )?;
                check_whole("controls.cooling_setpoint_delta_f", c.cooling_setpoint_delta_f)?;
                check_range("controls.containment_pct", c.containment_pct, 100.0)?;
                check_range("controls.batch_deferral_pct", c.batch_deferral_pct, 100.0)
            }
            Self::Cloud(c) => check_range("controls.shift_pct", c.shift_pct, MAX_SHIFT_PCT),
        }
    }
}

/// Persona-scoped reference figures the projection is relative to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BaselineFigures {
    /// Baseline energy use (kWh).
    pub energy_kwh: f64,
    /// Baseline cost (USD).
    pub cost_usd: f64,
    /// Baseline emissions (kg CO₂).
    pub emissions_kg: f64,
    /// Baseline Community Impact Index (0–100).
    pub cii: f64,
}

impl BaselineFigures {
    /// Reference baseline for a facility operator.
    pub fn operator_default() -> Self {
        Self {
            energy_kwh: 850_000.0,
            cost_usd: 85_000.0,
            emissions_kg: 340_000.0,
            cii: 58.0,
        }
    }

    /// Reference baseline for a cloud workload operator.
    pub fn cloud_default() -> Self {
        Self {
            energy_kwh: 1_200_000.0,
            cost_usd: 120_000.0,
            emissions_kg: 480_000.0,
            cii: 62.0,
        }
    }

    fn validate(&self) -> Result<(), EngineError> {
        let fields = [
            ("baseline.energy_kwh", self.energy_kwh),
            ("baseline.cost_usd", self.cost_usd),
            ("baseline.emissions_kg", self.emissions_kg),
            ("baseline.cii", self.cii),
        ];
        for (field, value) in fields {
            if !value.is_finite() {
                return Err(EngineError::invalid(field, "must be finite"));
            }
        }
        Ok(())
    }
}

/// Projected savings relative to a baseline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoiResult {
    /// Cost saved (USD).
    #[serde(rename = "costSavedUSD")]
    pub cost_saved_usd: f64,
    /// Savings percentage; see the module docs for the per-persona meaning.
    pub savings_pct: f64,
    /// Emissions avoided (tons CO₂).
    pub emissions_avoided_tons: f64,
    /// CII improvement (points).
    pub cii_delta: f64,
}

impl fmt::Display for RoiResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- ROI Projection ---")?;
        writeln!(f, "Cost saved:            {:.2} USD", self.cost_saved_usd)?;
        writeln!(f, "Savings:               {:.2}%", self.savings_pct)?;
        writeln!(f, "Emissions avoided:     {:.3} t", self.emissions_avoided_tons)?;
        write!(f, "CII delta:             {:.2} pts", self.cii_delta)
    }
}

fn project_operator(baseline: &BaselineFigures, c: &OperatorControls) -> RoiResult {
    let cooling_pct = c.cooling_setpoint_delta_f * COOLING_PCT_PER_DEGREE;
    let containment_pct = (c.containment_pct / 100.0) * CONTAINMENT_MAX_PCT;
    let batch_pct = (c.batch_deferral_pct / 100.0) * BATCH_DEFERRAL_MAX_PCT;
    let total_pct = cooling_pct + containment_pct + batch_pct;

    RoiResult {
        cost_saved_usd: baseline.cost_usd * (total_pct / 100.0),
        savings_pct: total_pct,
        emissions_avoided_tons: baseline.emissions_kg * (total_pct / 100.0) / KG_PER_TON,
        cii_delta: baseline.cii * OPERATOR_CII_UPLIFT,
    }
}

fn project_cloud(baseline: &BaselineFigures, c: &CloudControls) -> RoiResult {
    let shift_fraction = c.shift_pct / 100.0;
    let cost_pct = shift_fraction * TIME_SHIFT_COST_PCT;
    let emissions_pct =
        shift_fraction * (c.target_region.carbon_reduction_pct() + TIME_SHIFT_CARBON_PCT) / 2.0;

    RoiResult {
        cost_saved_usd: baseline.cost_usd * (cost_pct / 100.0),
        savings_pct: cost_pct,
        emissions_avoided_tons: baseline.emissions_kg * (emissions_pct / 100.0) / KG_PER_TON,
        cii_delta: baseline.cii * (shift_fraction * CLOUD_CII_UPLIFT),
    }
}

/// Projects cost, emissions, and CII deltas of applying `controls`.
///
/// Savings percentages are not clamped.
///
/// # Errors
///
/// Returns [`EngineError::InvalidInput`] if `controls` belongs to a different
/// persona, a lever is out of range, or a baseline figure is not finite.
///
/// # Examples
///
/// ```
/// use energy_zone::engine::roi::{project_roi, BaselineFigures, ControlSettings, OperatorControls};
/// use energy_zone::engine::types::Persona;
///
/// let controls = ControlSettings::Operator(OperatorControls {
///     cooling_setpoint_delta_f: 2.0,
///     containment_pct: 80.0,
///     batch_deferral_pct: 20.0,
/// });
/// let roi = project_roi(Persona::Operator, &BaselineFigures::operator_default(), &controls).unwrap();
/// assert!((roi.savings_pct - 21.0).abs() < 1e-9);
/// assert!((roi.cost_saved_usd - 17_850.0).abs() < 1e-6);
/// ```
pub fn project_roi(
    persona: Persona,
    baseline: &BaselineFigures,
    controls: &ControlSettings,
) -> Result<RoiResult, EngineError> {
    if controls.persona() != persona {
        return Err(EngineError::invalid(
            "controls",
            format!(
                "{} controls supplied for persona \"{persona}\"",
                controls.persona()
            ),
        ));
    }
    controls.validate()?;
    baseline.validate()?;

    let roi = match controls {
        ControlSettings::Operator(c) => project_operator(baseline, c),
        ControlSettings::Cloud(c) => project_cloud(baseline, c),
    };
    tracing::debug!(
        %persona,
        cost_saved_usd = roi.cost_saved_usd,
        savings_pct = roi.savings_pct,
        "projected roi"
    );
    Ok(roi)
}
