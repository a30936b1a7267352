//! Shared test fixtures for integration tests.

#![allow(dead_code)]

use energy_zone::engine::roi::{CloudControls, ControlSettings, OperatorControls, TargetRegion};
use energy_zone::engine::types::{HourlyRecord, ZoneRecord};

/// Tolerance for comparing projected figures.
pub const EPS: f64 = 1e-6;

pub fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < EPS
}

/// Small zone population with a clear best (30301) and worst (30331) zone.
pub fn sample_zones() -> Vec<ZoneRecord> {
    vec![
        ZoneRecord::new("30301", 0.35, 40.0, 0.30, 3.0),
        ZoneRecord::new("30310", 0.42, 55.0, 0.55, 4.5),
        ZoneRecord::new("30318", 0.45, 65.0, 0.60, 5.0),
        ZoneRecord::new("30331", 0.50, 80.0, 0.70, 6.0),
    ]
}

/// 24 hours with carbon and price both ascending from midnight.
///
/// Carbon runs 0.30, 0.31, ... so the 30th-percentile threshold is 0.37.
pub fn aligned_day() -> Vec<HourlyRecord> {
    (0..24u8)
        .map(|h| {
            let step = f64::from(h);
            HourlyRecord::new(h, 0.30 + 0.01 * step, 6.0 + 0.25 * step, 15_000.0)
        })
        .collect()
}

/// Like [`aligned_day`], but hours 6 through 9 share the 30th-percentile
/// carbon (0.36) and price (7.5) values.
pub fn tied_day() -> Vec<HourlyRecord> {
    (0..24u8)
        .map(|h| {
            let step = if (6..=9).contains(&h) { 6.0 } else { f64::from(h) };
            HourlyRecord::new(h, 0.30 + 0.01 * step, 6.0 + 0.25 * step, 15_000.0)
        })
        .collect()
}

/// 24 identical hours.
pub fn flat_day() -> Vec<HourlyRecord> {
    (0..24u8)
        .map(|h| HourlyRecord::new(h, 0.40, 9.0, 15_000.0))
        .collect()
}

/// Reference operator levers: 2 °F, 80% containment, 20% deferral.
pub fn reference_operator() -> ControlSettings {
    ControlSettings::Operator(OperatorControls {
        cooling_setpoint_delta_f: 2.0,
        containment_pct: 80.0,
        batch_deferral_pct: 20.0,
    })
}

/// Cloud levers shifting `shift_pct` to `region`.
pub fn cloud_shift(shift_pct: f64, region: TargetRegion) -> ControlSettings {
    ControlSettings::Cloud(CloudControls {
        shift_pct,
        target_region: region,
        target_hours: "9pm-1am".to_string(),
    })
}
