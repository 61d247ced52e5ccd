//! Bollinger Bands.
//!
//! - Middle: SMA over the trailing n closes
//! - Upper: Middle + (multiplier × StdDev)
//! - Lower: Middle - (multiplier × StdDev)
//!
//! StdDev is the sample standard deviation (N-1). `percent_b` places a
//! price inside the band and is only defined for a band of non-zero width.

use crate::domain::indicator::stddev::{is_constant, sample_stddev};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BollingerValue {
    pub upper: f64,
    pub middle: f64,
    pub lower: f64,
}

impl BollingerValue {
    pub fn width(&self) -> f64 {
        self.upper - self.lower
    }

    /// (price - lower) / (upper - lower); `None` for a flat band.
    pub fn percent_b(&self, price: f64) -> Option<f64> {
        let width = self.width();
        if width > 0.0 {
            Some((price - self.lower) / width)
        } else {
            None
        }
    }
}

pub fn calculate_bollinger(
    closes: &[f64],
    period: usize,
    stddev_mult_x100: u32,
) -> Option<BollingerValue> {
    if period == 0 || closes.len() < period {
        return None;
    }

    let window = &closes[closes.len() - period..];
    let middle = if is_constant(window) {
        window[0]
    } else {
        window.iter().sum::<f64>() / period as f64
    };
    let stddev = sample_stddev(window)?;
    let mult = stddev_mult_x100 as f64 / 100.0;

    Some(BollingerValue {
        upper: middle + mult * stddev,
        middle,
        lower: middle - mult * stddev,
    })
}
