//! Technicals snapshot: the fixed indicator set computed over one bar series.
//!
//! Each field is gated independently on history length and is `None` when
//! the history is too short (or the value is undefined, e.g. RSI with no
//! losses). `None` means unknown, never zero. Published values are rounded
//! here, before the trend vote, so the vote sees exactly what is reported.

use serde::{Deserialize, Serialize};

use crate::domain::indicator::{
    calculate_bollinger, calculate_macd, calculate_rsi, calculate_sma, calculate_volume_ratio,
    macd, round_dp, IndicatorType,
};
use crate::domain::ohlcv::{closes, volumes, OhlcvBar};
use crate::domain::trend::{classify_trend, Trend};

pub const RSI_PERIOD: usize = 14;
pub const SMA_SHORT: usize = 20;
pub const SMA_LONG: usize = 50;
pub const BOLLINGER_PERIOD: usize = 20;
pub const BOLLINGER_MULT_X100: u32 = 200;
pub const VOLUME_PERIOD: usize = 20;

/// Below this many bars nothing is computed at all.
pub const MIN_BARS: usize = RSI_PERIOD;

const PRICE_DP: usize = 2;
const MACD_DP: usize = 4;
const PCT_B_DP: usize = 3;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TechnicalsSnapshot {
    pub rsi_14: Option<f64>,
    pub macd: Option<f64>,
    pub macd_signal: Option<f64>,
    pub macd_hist: Option<f64>,
    pub sma_20: Option<f64>,
    pub sma_50: Option<f64>,
    pub bb_upper: Option<f64>,
    pub bb_lower: Option<f64>,
    pub bb_pct: Option<f64>,
    pub volume_ratio: Option<f64>,
    pub trend: Option<Trend>,
    pub bars_used: usize,
}

impl TechnicalsSnapshot {
    pub fn empty(bars_used: usize) -> Self {
        Self {
            bars_used,
            ..Self::default()
        }
    }

    /// True when no indicator field is populated.
    pub fn is_empty(&self) -> bool {
        self.rsi_14.is_none()
            && self.macd.is_none()
            && self.macd_signal.is_none()
            && self.macd_hist.is_none()
            && self.sma_20.is_none()
            && self.sma_50.is_none()
            && self.bb_upper.is_none()
            && self.bb_lower.is_none()
            && self.bb_pct.is_none()
            && self.volume_ratio.is_none()
            && self.trend.is_none()
    }
}

/// The indicator set reported in every snapshot, in report order.
pub fn reported_indicators() -> Vec<IndicatorType> {
    vec![
        IndicatorType::Rsi(RSI_PERIOD),
        IndicatorType::Macd {
            fast: macd::DEFAULT_FAST,
            slow: macd::DEFAULT_SLOW,
            signal: macd::DEFAULT_SIGNAL,
        },
        IndicatorType::Sma(SMA_SHORT),
        IndicatorType::Sma(SMA_LONG),
        IndicatorType::Bollinger {
            period: BOLLINGER_PERIOD,
            stddev_mult_x100: BOLLINGER_MULT_X100,
        },
        IndicatorType::VolumeRatio(VOLUME_PERIOD),
    ]
}

fn published(value: Option<f64>, dp: usize) -> Option<f64> {
    value.map(|v| round_dp(v, dp)).filter(|v| v.is_finite())
}

pub fn compute_technicals(bars: &[OhlcvBar]) -> TechnicalsSnapshot {
    let mut tech = TechnicalsSnapshot::empty(bars.len());
    let Some(last_bar) = bars.last() else {
        return tech;
    };
    if bars.len() < MIN_BARS {
        return tech;
    }

    let closes = closes(bars);
    let volumes = volumes(bars);
    let price = last_bar.close;

    tech.rsi_14 = published(calculate_rsi(&closes, RSI_PERIOD), PRICE_DP);

    if let Some(m) = calculate_macd(
        &closes,
        macd::DEFAULT_FAST,
        macd::DEFAULT_SLOW,
        macd::DEFAULT_SIGNAL,
    ) {
        tech.macd = published(Some(m.line), MACD_DP);
        tech.macd_signal = published(Some(m.signal), MACD_DP);
        tech.macd_hist = published(Some(m.histogram), MACD_DP);
    }

    tech.sma_20 = published(calculate_sma(&closes, SMA_SHORT), PRICE_DP);
    tech.sma_50 = published(calculate_sma(&closes, SMA_LONG), PRICE_DP);

    if let Some(bands) = calculate_bollinger(&closes, BOLLINGER_PERIOD, BOLLINGER_MULT_X100) {
        tech.bb_upper = published(Some(bands.upper), PRICE_DP);
        tech.bb_lower = published(Some(bands.lower), PRICE_DP);
        // position uses the unrounded band
        tech.bb_pct = published(bands.percent_b(price), PCT_B_DP);
    }

    tech.volume_ratio = published(calculate_volume_ratio(&volumes, VOLUME_PERIOD), PRICE_DP);

    tech.trend = Some(classify_trend(&tech, price));
    tech
}
