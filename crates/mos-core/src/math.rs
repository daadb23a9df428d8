//! Numeric helpers shared by the scorers

/// Bound `value` to `[min, max]`.
///
/// NaN maps to `min`, so a degenerate intermediate never survives into a
/// score. Infinities clamp to the matching bound.
#[inline]
pub fn clamp(value: f64, min: f64, max: f64) -> f64 {
    if value.is_nan() {
        return min;
    }
    value.max(min).min(max)
}

/// Round to two decimals, half away from zero.
#[inline]
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_bounds() {
        assert_eq!(clamp(3.0, 1.0, 5.0), 3.0);
        assert_eq!(clamp(-2.0, 1.0, 5.0), 1.0);
        assert_eq!(clamp(7.5, 1.0, 5.0), 5.0);
    }

    #[test]
    fn test_clamp_non_finite() {
        assert_eq!(clamp(f64::NAN, 1.0, 5.0), 1.0);
        assert_eq!(clamp(f64::INFINITY, 1.0, 5.0), 5.0);
        assert_eq!(clamp(f64::NEG_INFINITY, 0.0, 30.0), 0.0);
    }

    #[test]
    fn test_round2() {
        assert_eq!(round2(4.416), 4.42);
        assert_eq!(round2(4.414), 4.41);
        assert_eq!(round2(1.0), 1.0);
        assert_eq!(round2(2.125), 2.13);
    }
}
