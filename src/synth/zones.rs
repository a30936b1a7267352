use serde::Serialize;

use crate::engine::types::ZoneRecord;
use crate::error::EngineError;

/// Zones available in the synthetic Atlanta metro dataset.
pub const ATLANTA_ZIPS: &[&str] = &[
    "30301", "30302", "30303", "30305", "30306", "30307", "30308", "30309", "30310", "30311",
    "30312", "30313", "30314", "30315", "30316", "30317", "30318", "30319", "30320", "30321",
    "30322", "30324", "30326", "30327", "30328", "30329", "30331",
];

/// Zone shown when the caller does not pick one.
pub const DEFAULT_ZIP: &str = "30331";

/// Current readings for one zone, as shown on the zone page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ZoneSnapshot {
    /// Metrics fed to the CII scorer.
    #[serde(flatten)]
    pub record: ZoneRecord,
    /// Current load (kWh).
    pub load_kwh: f64,
    /// Current price (¢ per kWh).
    pub price_cents_per_kwh: f64,
}

/// Returns deterministic readings for `zip`, derived from its last two digits.
///
/// # Errors
///
/// Returns [`EngineError::UnknownZone`] if `zip` is not in [`ATLANTA_ZIPS`].
pub fn zone_snapshot(zip: &str) -> Result<ZoneSnapshot, EngineError> {
    if !ATLANTA_ZIPS.contains(&zip) {
        return Err(EngineError::UnknownZone(zip.to_string()));
    }
    let seed = zip_seed(zip);

    Ok(ZoneSnapshot {
        record: ZoneRecord::new(
            zip,
            0.35 + (seed / 100.0) * 0.15,
            40.0 + seed * 0.8,
            0.3 + (seed / 100.0) * 0.4,
            3.0 + (seed / 100.0) * 2.0,
        ),
        load_kwh: 15_000.0 + seed * 200.0,
        price_cents_per_kwh: 8.5 + (seed / 100.0) * 2.0,
    })
}

/// Zone records for the whole dataset, in dataset order.
pub fn all_zones() -> Vec<ZoneRecord> {
    ATLANTA_ZIPS
        .iter()
        .filter_map(|zip| zone_snapshot(zip).ok())
        .map(|snapshot| snapshot.record)
        .collect()
}

/// Last two digits of a zone key as a number (0 if they are not digits).
pub(crate) fn zip_seed(zip: &str) -> f64 {
    let tail = zip.get(zip.len().saturating_sub(2)..).unwrap_or("");
    tail.parse::<u8>().map_or(0.0, f64::from)
}
