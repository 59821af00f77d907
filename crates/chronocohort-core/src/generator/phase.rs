//! Circular clock arithmetic.

use crate::models::HOURS_PER_DAY;

const HALF_DAY: f64 = HOURS_PER_DAY / 2.0;

/// Shortest distance in hours between two clock times, in `[0, 12]`.
///
/// `|((a - b + 12) mod 24) - 12|` with a Euclidean modulo, so 23:00 and
/// 05:00 are 6 hours apart, not 18.
pub fn circular_distance(a: f64, b: f64) -> f64 {
    ((a - b + HALF_DAY).rem_euclid(HOURS_PER_DAY) - HALF_DAY).abs()
}

/// Linear falloff from 1 at distance 0 to 0 at `width` hours and beyond.
pub fn phase_proximity(distance: f64, width: f64) -> f64 {
    (1.0 - distance / width).max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wraps_at_midnight() {
        assert_eq!(circular_distance(23.0, 5.0), 6.0);
        assert_eq!(circular_distance(5.0, 23.0), 6.0);
        assert_eq!(circular_distance(0.5, 23.5), 1.0);
    }

    #[test]
    fn test_plain_distances() {
        assert_eq!(circular_distance(13.0, 13.0), 0.0);
        assert_eq!(circular_distance(14.0, 10.0), 4.0);
        assert_eq!(circular_distance(0.0, 12.0), 12.0);
        assert_eq!(circular_distance(18.0, 6.0), 12.0);
    }

    #[test]
    fn test_proximity() {
        assert_eq!(phase_proximity(0.0, 6.0), 1.0);
        assert_eq!(phase_proximity(3.0, 6.0), 0.5);
        assert_eq!(phase_proximity(6.0, 6.0), 0.0);
        assert_eq!(phase_proximity(9.0, 6.0), 0.0);
    }
}
