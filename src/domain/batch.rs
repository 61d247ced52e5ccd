//! Multi-symbol fan-out.
//!
//! Each symbol is an independent, pure computation, so the batch can run on
//! the rayon pool with no coordination. Output order always matches input
//! order.

use rayon::prelude::*;
use serde::Serialize;

use crate::domain::ohlcv::OhlcvBar;
use crate::domain::technicals::{compute_technicals, TechnicalsSnapshot};

#[derive(Debug, Clone)]
pub struct SymbolBars {
    pub symbol: String,
    pub bars: Vec<OhlcvBar>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SymbolTechnicals {
    pub symbol: String,
    pub snapshot: TechnicalsSnapshot,
    pub last_close: Option<f64>,
}

fn compute_one(input: &SymbolBars) -> SymbolTechnicals {
    SymbolTechnicals {
        symbol: input.symbol.clone(),
        snapshot: compute_technicals(&input.bars),
        last_close: input.bars.last().map(|b| b.close),
    }
}

pub fn compute_batch(inputs: &[SymbolBars], parallel: bool) -> Vec<SymbolTechnicals> {
    if parallel {
        inputs.par_iter().map(compute_one).collect()
    } else {
        inputs.iter().map(compute_one).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(symbol: &str, n: usize, start: f64) -> SymbolBars {
        let bars = (0..n)
            .map(|i| {
                let close = start + (i as f64 * 0.4).cos() * 3.0 + i as f64 * 0.1;
                OhlcvBar {
                    time: format!("2024-01-{:02}", i % 28 + 1),
                    open: close,
                    high: close + 1.0,
                    low: close - 1.0,
                    close,
                    volume: 1000.0 + i as f64,
                }
            })
            .collect();
        SymbolBars {
            symbol: symbol.to_string(),
            bars,
        }
    }

    #[test]
    fn batch_preserves_order() {
        let inputs = vec![series("AAPL", 60, 150.0), series("MSFT", 10, 300.0), series("TSLA", 30, 200.0)];
        let out = compute_batch(&inputs, true);
        let symbols: Vec<&str> = out.iter().map(|r| r.symbol.as_str()).collect();
        assert_eq!(symbols, vec!["AAPL", "MSFT", "TSLA"]);
        assert_eq!(out[1].snapshot.bars_used, 10);
        assert!(out[1].snapshot.is_empty());
    }

    #[test]
    fn parallel_matches_sequential() {
        let inputs: Vec<SymbolBars> = (0..16)
            .map(|i| series(&format!("S{}", i), 14 + i * 3, 50.0 + i as f64))
            .collect();
        assert_eq!(compute_batch(&inputs, true), compute_batch(&inputs, false));
    }

    #[test]
    fn last_close_reported() {
        let input = series("AAPL", 20, 100.0);
        let expected = input.bars.last().map(|b| b.close);
        let out = compute_batch(&[input], false);
        assert_eq!(out[0].last_close, expected);
    }

    #[test]
    fn empty_bars_have_no_last_close() {
        let out = compute_batch(
            &[SymbolBars {
                symbol: "X".into(),
                bars: vec![],
            }],
            true,
        );
        assert_eq!(out[0].last_close, None);
        assert_eq!(out[0].snapshot.bars_used, 0);
    }
}
