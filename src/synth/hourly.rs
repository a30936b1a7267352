use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::engine::cleaner_hours::HOURS_PER_DAY;
use crate::engine::types::HourlyRecord;

/// First hour of the afternoon peak (inclusive).
pub const PEAK_START: u8 = 12;
/// Last hour of the afternoon peak (inclusive).
pub const PEAK_END: u8 = 20;

/// Generator for a zone's 24-hour carbon, price, load, and temperature trend.
///
/// Peak hours carry higher carbon intensity, price, and load; every reading
/// gets uniform noise from a seeded RNG so a given seed always produces the
/// same day.
///
/// # Examples
///
/// ```
/// use energy_zone::synth::hourly::HourlyTrend;
///
/// let day = HourlyTrend::new(42).series();
/// assert_eq!(day.len(), 24);
/// assert_eq!(day, HourlyTrend::new(42).series());
/// ```
#[derive(Debug, Clone)]
pub struct HourlyTrend {
    /// Base carbon intensity (kg CO₂ per kWh).
    pub base_carbon: f64,
    /// Base price (¢ per kWh).
    pub base_price: f64,
    /// Base load (kWh).
    pub base_load: f64,
    /// Mean temperature (°F).
    pub base_temp_f: f64,

    rng: StdRng,
}

impl HourlyTrend {
    /// Creates a generator with the dashboard's reference parameters.
    pub fn new(seed: u64) -> Self {
        Self {
            base_carbon: 0.40,
            base_price: 9.0,
            base_load: 15_000.0,
            base_temp_f: 65.0,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Whether `hour` falls inside the afternoon peak.
    pub fn is_peak(hour: u8) -> bool {
        (PEAK_START..=PEAK_END).contains(&hour)
    }

    /// Uniform noise in `[-half_width, half_width)`.
    fn noise(&mut self, half_width: f64) -> f64 {
        self.rng.random_range(-half_width..half_width)
    }

    fn record(&mut self, hour: u8) -> HourlyRecord {
        let peak = Self::is_peak(hour);
        let (carbon_shift, price_shift, load_shift) = if peak {
            (0.10, 2.5, 5_000.0)
        } else {
            (-0.05, -1.5, -2_000.0)
        };
        let angle = (f64::from(hour) - 6.0) * std::f64::consts::PI / 12.0;

        HourlyRecord {
            hour,
            carbon_intensity: self.base_carbon + carbon_shift + self.noise(0.02),
            price: self.base_price + price_shift + self.noise(0.25),
            load: self.base_load + load_shift + self.noise(500.0),
            temp_f: Some(self.base_temp_f + angle.sin() * 10.0 + self.noise(1.5)),
        }
    }

    /// Produces one day of hourly records, hours 0 through 23.
    pub fn series(&mut self) -> Vec<HourlyRecord> {
        (0..HOURS_PER_DAY as u8).map(|h| self.record(h)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn series_has_one_record_per_hour() {
        let day = HourlyTrend::new(7).series();
        let hours: Vec<u8> = day.iter().map(|r| r.hour).collect();
        assert_eq!(hours, (0..24).collect::<Vec<u8>>());
    }

    #[test]
    fn peak_hours_are_dirtier_and_pricier() {
        let day = HourlyTrend::new(42).series();
        for r in &day {
            if HourlyTrend::is_peak(r.hour) {
                assert!(r.carbon_intensity > 0.47, "hour {}", r.hour);
                assert!(r.price > 11.0, "hour {}", r.hour);
            } else {
                assert!(r.carbon_intensity < 0.38, "hour {}", r.hour);
                assert!(r.price < 7.8, "hour {}", r.hour);
            }
        }
    }

    #[test]
    fn same_seed_reproduces_day() {
        assert_eq!(HourlyTrend::new(1).series(), HourlyTrend::new(1).series());
        assert_ne!(HourlyTrend::new(1).series(), HourlyTrend::new(2).series());
    }
}
