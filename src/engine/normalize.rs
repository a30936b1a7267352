//! Min-max normalization of a value against a population onto 0–100.

use crate::error::EngineError;

/// Score returned when the population has no variance.
pub const NEUTRAL_SCORE: f64 = 50.0;

/// Rescales `value` onto 0–100 relative to the min and max of `population`.
///
/// A population with `max == min` yields [`NEUTRAL_SCORE`]. Values outside
/// the population's range are clamped so the score always lies in [0, 100].
///
/// # Arguments
///
/// * `value` - Value to score
/// * `population` - Values the score is relative to (non-empty, finite)
///
/// # Errors
///
/// Returns [`EngineError::InvalidInput`] if `population` is empty or
/// contains a non-finite value, or if `value` is not finite.
///
/// # Examples
///
/// ```
/// use energy_zone::engine::normalize::normalize;
///
/// let population = [10.0, 20.0, 30.0];
/// assert_eq!(normalize(20.0, &population).ok(), Some(50.0));
/// assert_eq!(normalize(30.0, &population).ok(), Some(100.0));
/// ```
pub fn normalize(value: f64, population: &[f64]) -> Result<f64, EngineError> {
    let (min, max) = bounds(population)?;
    if !value.is_finite() {
        return Err(EngineError::invalid("value", "must be finite"));
    }
    if max == min {
        return Ok(NEUTRAL_SCORE);
    }
    Ok(((value - min) / (max - min) * 100.0).clamp(0.0, 100.0))
}

/// Returns `(min, max)` of a non-empty, finite population.
fn bounds(population: &[f64]) -> Result<(f64, f64), EngineError> {
    if population.is_empty() {
        return Err(EngineError::invalid("population", "must not be empty"));
    }
    if population.iter().any(|v| !v.is_finite()) {
        return Err(EngineError::invalid(
            "population",
            "must contain only finite values",
        ));
    }

    let min = population.iter().copied().fold(f64::INFINITY, f64::min);
    let max = population.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    Ok((min, max))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn min_maps_to_zero_and_max_to_hundred() {
        let population = [0.42, 0.35, 0.50, 0.38];
        assert_eq!(normalize(0.35, &population), Ok(0.0));
        assert_eq!(normalize(0.50, &population), Ok(100.0));
    }

    #[test]
    fn midpoint_is_linear() {
        let population = [40.0, 60.0, 80.0];
        let score = normalize(50.0, &population).unwrap_or(f64::NAN);
        assert!((score - 25.0).abs() < 1e-9);
    }

    #[test]
    fn zero_variance_yields_neutral() {
        let population = [3.0; 5];
        assert_eq!(normalize(3.0, &population), Ok(NEUTRAL_SCORE));
        assert_eq!(normalize(-100.0, &population), Ok(NEUTRAL_SCORE));
        assert_eq!(normalize(7.0, &[7.0]), Ok(NEUTRAL_SCORE));
    }

    #[test]
    fn out_of_range_values_are_clamped() {
        let population = [1.0, 2.0];
        assert_eq!(normalize(5.0, &population), Ok(100.0));
        assert_eq!(normalize(-5.0, &population), Ok(0.0));
    }

    #[test]
    fn empty_population_is_rejected() {
        let err = normalize(1.0, &[]);
        assert!(matches!(err, Err(EngineError::InvalidInput { .. })));
    }

    #[test]
    fn non_finite_input_is_rejected() {
        assert!(normalize(1.0, &[1.0, f64::NAN]).is_err());
        assert!(normalize(f64::INFINITY, &[1.0, 2.0]).is_err());
    }
}
