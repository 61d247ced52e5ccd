//! Standard deviation.
//!
//! Sample standard deviation (divides by N-1) over a window of values.
//! A constant window is exactly 0, whatever its binary representation.

/// True when every value equals the first; false for an empty window.
pub fn is_constant(window: &[f64]) -> bool {
    window
        .split_first()
        .is_some_and(|(first, rest)| rest.iter().all(|v| v == first))
}

pub fn sample_stddev(window: &[f64]) -> Option<f64> {
    let n = window.len();
    if n < 2 {
        return None;
    }
    if is_constant(window) {
        return Some(0.0);
    }

    let mean = window.iter().sum::<f64>() / n as f64;
    let variance = window
        .iter()
        .map(|v| {
            let diff = v - mean;
            diff * diff
        })
        .sum::<f64>()
        / (n - 1) as f64;

    Some(variance.sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn stddev_constant_values() {
        assert_eq!(sample_stddev(&[100.0; 20]).unwrap(), 0.0);
    }

    #[test]
    fn stddev_constant_inexact_values() {
        // 0.1 * 20 / 20 is not exactly 0.1, so the mean drifts by an ulp
        for price in [0.1, 0.7, 101.37, 33.33] {
            assert_eq!(sample_stddev(&[price; 20]).unwrap(), 0.0, "price {}", price);
        }
    }

    #[test]
    fn is_constant_cases() {
        assert!(is_constant(&[0.1, 0.1, 0.1]));
        assert!(is_constant(&[7.0]));
        assert!(!is_constant(&[]));
        assert!(!is_constant(&[0.1, 0.1, 0.1000001]));
    }

    #[test]
    fn stddev_known_values() {
        // population stddev of this set is 2.0; sample stddev is sqrt(32/7)
        let values = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        let expected = (32.0_f64 / 7.0).sqrt();
        assert_relative_eq!(sample_stddev(&values).unwrap(), expected, epsilon = 1e-12);
    }

    #[test]
    fn stddev_basic_calculation() {
        let values = [10.0, 20.0, 30.0];
        // mean 20, squared deviations 100+0+100, /2 = 100
        assert_relative_eq!(sample_stddev(&values).unwrap(), 10.0, epsilon = 1e-12);
    }

    #[test]
    fn stddev_needs_two_values() {
        assert!(sample_stddev(&[]).is_none());
        assert!(sample_stddev(&[1.0]).is_none());
    }
}
