//! Technical indicator implementations.
//!
//! Every calculator takes a slice of closes (or volumes), oldest first, and
//! returns the value at the last element, or `None` when the trailing window
//! is not fully populated. Nothing here rounds; rounding to the published
//! precision happens once, in [`crate::domain::technicals`].

pub mod bollinger;
pub mod ema;
pub mod macd;
pub mod rsi;
pub mod sma;
pub mod stddev;
pub mod volume;

pub use bollinger::{calculate_bollinger, BollingerValue};
pub use ema::Ema;
pub use macd::{calculate_macd, MacdValue};
pub use rsi::calculate_rsi;
pub use sma::calculate_sma;
pub use stddev::sample_stddev;
pub use volume::calculate_volume_ratio;

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum IndicatorType {
    Sma(usize),
    Rsi(usize),
    Macd {
        fast: usize,
        slow: usize,
        signal: usize,
    },
    Bollinger {
        period: usize,
        stddev_mult_x100: u32,
    },
    VolumeRatio(usize),
}

impl IndicatorType {
    /// Bars of history needed before the indicator is reported.
    pub fn min_bars(&self) -> usize {
        match self {
            IndicatorType::Sma(period)
            | IndicatorType::Rsi(period)
            | IndicatorType::VolumeRatio(period) => *period,
            IndicatorType::Macd { slow, .. } => *slow,
            IndicatorType::Bollinger { period, .. } => *period,
        }
    }
}

impl fmt::Display for IndicatorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndicatorType::Sma(period) => write!(f, "SMA({})", period),
            IndicatorType::Rsi(period) => write!(f, "RSI({})", period),
            IndicatorType::Macd { fast, slow, signal } => {
                write!(f, "MACD({},{},{})", fast, slow, signal)
            }
            IndicatorType::Bollinger {
                period,
                stddev_mult_x100,
            } => {
                let mult = *stddev_mult_x100 as f64 / 100.0;
                write!(f, "BOLLINGER({},{})", period, mult)
            }
            IndicatorType::VolumeRatio(period) => write!(f, "VOLUME_RATIO({})", period),
        }
    }
}

/// Round to `dp` decimal places, correctly rounded on the exact binary value.
pub fn round_dp(value: f64, dp: usize) -> f64 {
    if !value.is_finite() {
        return value;
    }
    let rounded = format!("{:.*}", dp, value).parse::<f64>().unwrap_or(value);
    // collapse -0.0
    rounded + 0.0
}
