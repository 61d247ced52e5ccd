//! MACD (Moving Average Convergence Divergence).
//!
//! MACD Line = EMA(fast) - EMA(slow)
//! Signal Line = EMA(signal) of MACD Line
//! Histogram = MACD Line - Signal Line
//!
//! All three EMAs are the unadjusted recursive form seeded with the first
//! value. Reported once at least `slow` closes are available.

use crate::domain::indicator::Ema;

pub const DEFAULT_FAST: usize = 12;
pub const DEFAULT_SLOW: usize = 26;
pub const DEFAULT_SIGNAL: usize = 9;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MacdValue {
    pub line: f64,
    pub signal: f64,
    pub histogram: f64,
}

pub fn calculate_macd(
    closes: &[f64],
    fast: usize,
    slow: usize,
    signal_period: usize,
) -> Option<MacdValue> {
    if fast == 0 || slow == 0 || signal_period == 0 || closes.len() < slow {
        return None;
    }

    let mut ema_fast = Ema::new(fast);
    let mut ema_slow = Ema::new(slow);
    let mut ema_signal = Ema::new(signal_period);

    let mut last = None;
    for &close in closes {
        let line = ema_fast.next(close) - ema_slow.next(close);
        let signal = ema_signal.next(line);
        last = Some(MacdValue {
            line,
            signal,
            histogram: line - signal,
        });
    }
    last
}
