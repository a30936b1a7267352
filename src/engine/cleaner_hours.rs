//! Selection of hours that are both low-carbon and low-cost.

use super::types::{CleanerHour, HourlyRecord};
use crate::error::EngineError;

/// Number of hourly records in a day.
pub const HOURS_PER_DAY: usize = 24;

/// Percentile (as a fraction) below which an hour counts as "cleaner".
pub const CLEANER_PERCENTILE: f64 = 0.3;

/// Formats an hour of day as a 12-hour clock label.
///
/// # Examples
///
/// ```
/// use energy_zone::engine::cleaner_hours::hour_label;
///
/// assert_eq!(hour_label(0), "12AM");
/// assert_eq!(hour_label(13), "1PM");
/// ```
pub fn hour_label(hour: u8) -> String {
    let period = if hour >= 12 { "PM" } else { "AM" };
    let display = match hour {
        0 => 12,
        h if h > 12 => h - 12,
        h => h,
    };
    format!("{display}{period}")
}

/// Nearest-rank percentile: sorts ascending and takes index `floor(p * n)`.
fn percentile(values: impl Iterator<Item = f64>, p: f64) -> Option<f64> {
    let mut sorted: Vec<f64> = values.collect();
    sorted.sort_by(f64::total_cmp);
    let idx = ((sorted.len() as f64) * p).floor() as usize;
    sorted.get(idx.min(sorted.len().saturating_sub(1))).copied()
}

fn validate_series(hours: &[HourlyRecord]) -> Result<(), EngineError> {
    if hours.len() != HOURS_PER_DAY {
        return Err(EngineError::invalid(
            "hours",
            format!(
                "series must contain exactly {HOURS_PER_DAY} records, got {}",
                hours.len()
            ),
        ));
    }
    let mut seen = [false; HOURS_PER_DAY];
    for record in hours {
        let slot = seen.get_mut(usize::from(record.hour)).ok_or_else(|| {
            EngineError::invalid(
                "hours.hour",
                format!("hour index {} is outside 0..=23", record.hour),
            )
        })?;
        if *slot {
            return Err(EngineError::invalid(
                "hours.hour",
                format!("duplicate hour index {}", record.hour),
            ));
        }
        *slot = true;
        if !record.carbon_intensity.is_finite() || !record.price.is_finite() {
            return Err(EngineError::invalid(
                "hours",
                format!("hour {} has a non-finite carbon intensity or price", record.hour),
            ));
        }
    }
    Ok(())
}

/// Returns the hours whose carbon intensity and price are both at or below
/// the day's 30th-percentile thresholds, in ascending hour order.
///
/// Thresholds are computed from the same series. Ties at a threshold
/// qualify, so a flat day returns all 24 hours.
///
/// # Errors
///
/// Returns [`EngineError::InvalidInput`] if the series does not hold exactly
/// 24 records, an hour index is above 23 or repeated, or a reading is not
/// finite.
pub fn select_cleaner_hours(hours: &[HourlyRecord]) -> Result<Vec<CleanerHour>, EngineError> {
    validate_series(hours)?;

    let carbon_threshold = percentile(hours.iter().map(|h| h.carbon_intensity), CLEANER_PERCENTILE)
        .ok_or_else(|| EngineError::invalid("hours", "series is empty"))?;
    let price_threshold = percentile(hours.iter().map(|h| h.price), CLEANER_PERCENTILE)
        .ok_or_else(|| EngineError::invalid("hours", "series is empty"))?;

    let mut selected: Vec<u8> = hours
        .iter()
        .filter(|h| h.carbon_intensity <= carbon_threshold && h.price <= price_threshold)
        .map(|h| h.hour)
        .collect();
    selected.sort_unstable();

    tracing::debug!(
        carbon_threshold,
        price_threshold,
        selected = selected.len(),
        "selected cleaner hours"
    );

    Ok(selected
        .into_iter()
        .map(|hour| CleanerHour {
            hour,
            label: hour_label(hour),
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(carbon: impl Fn(u8) -> f64, price: impl Fn(u8) -> f64) -> Vec<HourlyRecord> {
        (0..24u8)
            .map(|h| HourlyRecord::new(h, carbon(h), price(h), 15000.0))
            .collect()
    }

    #[test]
    fn labels_follow_twelve_hour_clock() {
        let labels: Vec<String> = [0, 1, 11, 12, 13, 23].into_iter().map(hour_label).collect();
        assert_eq!(labels, ["12AM", "1AM", "11AM", "12PM", "1PM", "11PM"]);
    }

    #[test]
    fn flat_day_selects_every_hour() {
        let hours = series(|_| 0.4, |_| 9.0);
        let selected = select_cleaner_hours(&hours).unwrap_or_default();
        assert_eq!(selected.len(), 24);
    }

    #[test]
    fn aligned_ascending_series_selects_eight_hours() {
        let hours = series(
            |h| 0.30 + 0.01 * f64::from(h),
            |h| 7.0 + 0.25 * f64::from(h),
        );
        let selected = select_cleaner_hours(&hours).unwrap_or_default();
        let idx: Vec<u8> = selected.iter().map(|c| c.hour).collect();
        assert_eq!(idx, (0..8).collect::<Vec<u8>>());
    }

    #[test]
    fn selection_requires_both_dimensions() {
        // Carbon ascends while price descends: no hour is low on both.
        let hours = series(|h| f64::from(h), |h| 24.0 - f64::from(h));
        let selected = select_cleaner_hours(&hours).unwrap_or_default();
        assert!(selected.is_empty());
    }

    #[test]
    fn output_is_sorted_regardless_of_input_order() {
        let mut hours = series(|h| f64::from(h % 6), |h| f64::from(h % 6));
        hours.reverse();
        let selected = select_cleaner_hours(&hours).unwrap_or_default();
        let idx: Vec<u8> = selected.iter().map(|c| c.hour).collect();
        let mut sorted = idx.clone();
        sorted.sort_unstable();
        assert_eq!(idx, sorted);
        assert!(!idx.is_empty());
    }

    #[test]
    fn selection_is_idempotent() {
        let hours = series(|h| ((f64::from(h) * 0.7).sin() + 2.0) / 5.0, |h| 9.0 + (f64::from(h) / 2.8).cos());
        let first = select_cleaner_hours(&hours).unwrap_or_default();
        let second = select_cleaner_hours(&hours).unwrap_or_default();
        assert_eq!(first, second);
    }

    #[test]
    fn wrong_length_is_rejected() {
        let mut hours = series(|_| 0.4, |_| 9.0);
        hours.pop();
        assert!(matches!(
            select_cleaner_hours(&hours),
            Err(EngineError::InvalidInput { .. })
        ));
        assert!(select_cleaner_hours(&[]).is_err());
    }

    #[test]
    fn hour_out_of_range_is_rejected() {
        let mut hours = series(|_| 0.4, |_| 9.0);
        hours[5].hour = 24;
        assert!(select_cleaner_hours(&hours).is_err());
    }

    #[test]
    fn duplicate_hour_is_rejected() {
        let mut hours = series(|h| 0.30 + 0.01 * f64::from(h), |_| 9.0);
        hours[23].hour = 0;
        let err = select_cleaner_hours(&hours);
        assert!(err.is_err_and(|e| e.to_string().contains("duplicate hour index 0")));
    }

    #[test]
    fn ties_at_threshold_all_qualify() {
        // Hours 6 through 9 share the 30th-percentile value on both series.
        let stepped = |base: f64, step: f64| {
            move |h: u8| {
                if (6..=9).contains(&h) {
                    base + 6.0 * step
                } else {
                    base + step * f64::from(h)
                }
            }
        };
        let hours = series(stepped(0.30, 0.01), stepped(7.0, 0.25));
        let selected = select_cleaner_hours(&hours).unwrap_or_default();
        let idx: Vec<u8> = selected.iter().map(|c| c.hour).collect();
        assert_eq!(idx, (0..=9).collect::<Vec<u8>>());
    }
}
