//! Volume ratio: latest volume over the trailing-period mean volume.

use crate::domain::indicator::calculate_sma;

pub fn calculate_volume_ratio(volumes: &[f64], period: usize) -> Option<f64> {
    let mean = calculate_sma(volumes, period)?;
    if mean > 0.0 {
        volumes.last().map(|latest| latest / mean)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn volume_ratio_flat_is_one() {
        assert_relative_eq!(calculate_volume_ratio(&[1000.0; 20], 20).unwrap(), 1.0);
    }

    #[test]
    fn volume_ratio_spike() {
        let mut volumes = vec![1000.0; 19];
        volumes.push(3000.0);
        // mean = (19*1000 + 3000) / 20 = 1100
        assert_relative_eq!(
            calculate_volume_ratio(&volumes, 20).unwrap(),
            3000.0 / 1100.0
        );
    }

    #[test]
    fn volume_ratio_zero_mean_is_none() {
        assert!(calculate_volume_ratio(&[0.0; 25], 20).is_none());
    }

    #[test]
    fn volume_ratio_insufficient_history() {
        assert!(calculate_volume_ratio(&[1000.0; 19], 20).is_none());
    }
}
