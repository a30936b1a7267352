//! Synthetic stand-in for the data-acquisition layer.
//!
//! Produces the zone and hourly records the engine consumes when no live
//! data source is wired in.

/// Seeded 24-hour carbon/price/load trend.
pub mod hourly;
/// Zone dataset with deterministic per-zone metrics.
pub mod zones;

pub use hourly::HourlyTrend;
pub use zones::{ATLANTA_ZIPS, DEFAULT_ZIP, ZoneSnapshot, all_zones, zone_snapshot};

/// Seed for a zone's hourly trend, mixing the run seed with the zone key.
pub fn zone_seed(seed: u64, zip: &str) -> u64 {
    zip.bytes()
        .fold(seed, |acc, b| acc.wrapping_mul(31).wrapping_add(u64::from(b)))
}
