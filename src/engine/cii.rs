//! Community Impact Index: weighted, inverted composite of four normalized metrics.

use serde::Serialize;

use super::normalize::normalize;
use super::types::ZoneRecord;
use crate::error::EngineError;

/// Weight of normalized carbon intensity.
pub const CARBON_WEIGHT: f64 = 0.35;
/// Weight of normalized air-quality index.
pub const AQI_WEIGHT: f64 = 0.25;
/// Weight of normalized social-vulnerability index.
pub const SVI_WEIGHT: f64 = 0.25;
/// Weight of normalized energy burden.
pub const ENERGY_BURDEN_WEIGHT: f64 = 0.15;

/// Four parallel metric collections the CII is scored against.
///
/// The score is relative to whatever population is supplied, so the same
/// zone scores differently against a different set of zones.
#[derive(Debug, Clone, PartialEq)]
pub struct CiiPopulation {
    carbon: Vec<f64>,
    aqi: Vec<f64>,
    svi: Vec<f64>,
    energy_burden: Vec<f64>,
}

impl CiiPopulation {
    /// Builds a population from four parallel collections.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidInput`] if any collection is empty or the
    /// four lengths differ.
    pub fn new(
        carbon: Vec<f64>,
        aqi: Vec<f64>,
        svi: Vec<f64>,
        energy_burden: Vec<f64>,
    ) -> Result<Self, EngineError> {
        let n = carbon.len();
        if n == 0 {
            return Err(EngineError::invalid("population", "must not be empty"));
        }
        if aqi.len() != n || svi.len() != n || energy_burden.len() != n {
            return Err(EngineError::invalid(
                "population",
                format!(
                    "collections must have equal length (carbon={n}, aqi={}, svi={}, energy_burden={})",
                    aqi.len(),
                    svi.len(),
                    energy_burden.len()
                ),
            ));
        }
        Ok(Self {
            carbon,
            aqi,
            svi,
            energy_burden,
        })
    }

    /// Builds a population from zone records.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidInput`] if `zones` is empty.
    pub fn from_zones(zones: &[ZoneRecord]) -> Result<Self, EngineError> {
        Self::new(
            zones.iter().map(|z| z.carbon_intensity).collect(),
            zones.iter().map(|z| z.aqi).collect(),
            zones.iter().map(|z| z.svi).collect(),
            zones.iter().map(|z| z.energy_burden_pct).collect(),
        )
    }

    /// Number of zones in the population.
    pub fn len(&self) -> usize {
        self.carbon.len()
    }

    /// Always `false`; construction rejects empty populations.
    pub fn is_empty(&self) -> bool {
        self.carbon.is_empty()
    }
}

/// Scores raw metrics against `population`; higher is better.
///
/// Each metric is normalized against its own collection, combined with the
/// fixed weights, and the weighted sum is subtracted from 100.
///
/// # Errors
///
/// Returns [`EngineError::InvalidInput`] if a metric or population value is
/// not finite.
///
/// # Examples
///
/// ```
/// use energy_zone::engine::cii::{score_cii, CiiPopulation};
///
/// let population = CiiPopulation::new(
///     vec![0.3, 0.5],
///     vec![40.0, 80.0],
///     vec![0.3, 0.7],
///     vec![3.0, 5.0],
/// )
/// .unwrap();
/// assert_eq!(score_cii(0.3, 40.0, 0.3, 3.0, &population).ok(), Some(100.0));
/// let worst = score_cii(0.5, 80.0, 0.7, 5.0, &population).unwrap();
/// assert!(worst.abs() < 1e-9);
/// ```
pub fn score_cii(
    carbon: f64,
    aqi: f64,
    svi: f64,
    energy_burden: f64,
    population: &CiiPopulation,
) -> Result<f64, EngineError> {
    let weighted = CARBON_WEIGHT * normalize(carbon, &population.carbon)?
        + AQI_WEIGHT * normalize(aqi, &population.aqi)?
        + SVI_WEIGHT * normalize(svi, &population.svi)?
        + ENERGY_BURDEN_WEIGHT * normalize(energy_burden, &population.energy_burden)?;
    Ok((100.0 - weighted).clamp(0.0, 100.0))
}

/// Scores a single zone record against `population`.
///
/// # Errors
///
/// See [`score_cii`].
pub fn score_zone(zone: &ZoneRecord, population: &CiiPopulation) -> Result<f64, EngineError> {
    score_cii(
        zone.carbon_intensity,
        zone.aqi,
        zone.svi,
        zone.energy_burden_pct,
        population,
    )
}

/// A zone paired with its CII.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ZoneScore {
    /// The scored zone.
    #[serde(flatten)]
    pub zone: ZoneRecord,
    /// Community Impact Index (0–100, higher is better).
    pub cii: f64,
}

/// Scores every zone against the population formed by all of them.
///
/// # Errors
///
/// Returns [`EngineError::InvalidInput`] if `zones` is empty or holds a
/// non-finite metric.
pub fn score_population(zones: &[ZoneRecord]) -> Result<Vec<ZoneScore>, EngineError> {
    let population = CiiPopulation::from_zones(zones)?;
    let scores = zones
        .iter()
        .map(|zone| {
            score_zone(zone, &population).map(|cii| ZoneScore {
                zone: zone.clone(),
                cii,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;
    tracing::debug!(zones = scores.len(), "scored zone population");
    Ok(scores)
}
