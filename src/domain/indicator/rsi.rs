//! RSI (Relative Strength Index).
//!
//! Simple-mean variant, not Wilder smoothing:
//! - gain[i] = max(C[i] - C[i-1], 0), loss[i] = max(C[i-1] - C[i], 0)
//! - gain[0] = loss[0] = 0 (no prior close)
//! - avg_gain / avg_loss = mean of the trailing `period` entries
//!
//! RSI = 100 - 100 / (1 + avg_gain / avg_loss). A zero average loss yields
//! `None`, not 100.

pub fn calculate_rsi(closes: &[f64], period: usize) -> Option<f64> {
    if period == 0 || closes.len() < period {
        return None;
    }

    let mut gains = Vec::with_capacity(closes.len());
    let mut losses = Vec::with_capacity(closes.len());
    gains.push(0.0);
    losses.push(0.0);
    for pair in closes.windows(2) {
        let change = pair[1] - pair[0];
        gains.push(if change > 0.0 { change } else { 0.0 });
        losses.push(if change < 0.0 { -change } else { 0.0 });
    }

    let start = closes.len() - period;
    let avg_gain = gains[start..].iter().sum::<f64>() / period as f64;
    let avg_loss = losses[start..].iter().sum::<f64>() / period as f64;

    if avg_loss == 0.0 {
        return None;
    }

    let rs = avg_gain / avg_loss;
    Some(100.0 - 100.0 / (1.0 + rs))
}
