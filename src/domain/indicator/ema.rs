//! Exponential Moving Average.
//!
//! α = 2/(span+1), seeded with the first value, then
//! EMA[i] = α·X[i] + (1-α)·EMA[i-1]. No bias adjustment and no warmup:
//! every position has a value.

#[derive(Debug, Clone)]
pub struct Ema {
    alpha: f64,
    value: Option<f64>,
}

impl Ema {
    pub fn new(span: usize) -> Self {
        Self {
            alpha: 2.0 / (span as f64 + 1.0),
            value: None,
        }
    }

    pub fn next(&mut self, x: f64) -> f64 {
        let ema = match self.value {
            None => x,
            Some(prev) => self.alpha * x + (1.0 - self.alpha) * prev,
        };
        self.value = Some(ema);
        ema
    }
}
