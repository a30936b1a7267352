//! Core record types: zone metrics, hourly readings, and personas.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// Raw environmental and economic metrics for one zone.
///
/// All four metrics are "higher is worse" for the community.
///
/// # Examples
///
/// ```
/// use energy_zone::engine::types::ZoneRecord;
///
/// let zone = ZoneRecord::new("30331", 0.40, 64.0, 0.42, 3.6);
/// assert_eq!(zone.zip, "30331");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoneRecord {
    /// Zone key (postal code).
    pub zip: String,
    /// Carbon intensity (kg CO₂ per kWh).
    pub carbon_intensity: f64,
    /// Air-quality index.
    pub aqi: f64,
    /// Social-vulnerability index (0.0–1.0).
    pub svi: f64,
    /// Share of household income spent on energy (%).
    pub energy_burden_pct: f64,
}

impl ZoneRecord {
    /// Creates a zone record from its four raw metrics.
    pub fn new(
        zip: impl Into<String>,
        carbon_intensity: f64,
        aqi: f64,
        svi: f64,
        energy_burden_pct: f64,
    ) -> Self {
        Self {
            zip: zip.into(),
            carbon_intensity,
            aqi,
            svi,
            energy_burden_pct,
        }
    }
}

/// One hour of grid readings for a zone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourlyRecord {
    /// Hour of day (0–23).
    pub hour: u8,
    /// Carbon intensity (kg CO₂ per kWh).
    pub carbon_intensity: f64,
    /// Price (¢ per kWh).
    pub price: f64,
    /// Load (kWh).
    pub load: f64,
    /// Ambient temperature (°F), when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temp_f: Option<f64>,
}

impl HourlyRecord {
    /// Creates an hourly record without a temperature reading.
    pub fn new(hour: u8, carbon_intensity: f64, price: f64, load: f64) -> Self {
        Self {
            hour,
            carbon_intensity,
            price,
            load,
            temp_f: None,
        }
    }
}

/// An hour that is both low-carbon and low-cost.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CleanerHour {
    /// Hour of day (0–23).
    pub hour: u8,
    /// Display label, e.g. `"12AM"` or `"3PM"`.
    pub label: String,
}

/// Actor type the dashboard is projecting for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Persona {
    /// Facility operator: cooling, containment, batch scheduling.
    Operator,
    /// Cloud workload operator: regional and temporal shifting.
    Cloud,
}

impl Persona {
    /// Wire name of the persona.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Operator => "operator",
            Self::Cloud => "cloud",
        }
    }

    /// Long-form description used in generated text.
    pub fn description(self) -> &'static str {
        match self {
            Self::Operator => "Data Center Operator",
            Self::Cloud => "Cloud/Data-Using Company",
        }
    }
}

impl fmt::Display for Persona {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Persona {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "operator" => Ok(Self::Operator),
            "cloud" => Ok(Self::Cloud),
            other => Err(EngineError::invalid(
                "persona",
                format!("must be \"operator\" or \"cloud\", got \"{other}\""),
            )),
        }
    }
}
