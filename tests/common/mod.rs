#![allow(dead_code)]

pub use technicals::domain::ohlcv::OhlcvBar;
use technicals::domain::error::TechnicalsError;
use technicals::domain::render::NewsItem;
use technicals::ports::data_port::DataPort;
use technicals::ports::news_port::NewsPort;
use std::collections::HashMap;

pub struct MockDataPort {
    pub data: HashMap<String, Vec<OhlcvBar>>,
    pub errors: HashMap<String, String>,
}

impl MockDataPort {
    pub fn new() -> Self {
        Self {
            data: HashMap::new(),
            errors: HashMap::new(),
        }
    }

    pub fn with_bars(mut self, symbol: &str, bars: Vec<OhlcvBar>) -> Self {
        self.data.insert(symbol.to_string(), bars);
        self
    }

    pub fn with_error(mut self, symbol: &str, reason: &str) -> Self {
        self.errors.insert(symbol.to_string(), reason.to_string());
        self
    }
}

impl DataPort for MockDataPort {
    fn fetch_bars(
        &self,
        symbol: &str,
        limit: usize,
        timeframe: &str,
    ) -> Result<Vec<OhlcvBar>, TechnicalsError> {
        if let Some(reason) = self.errors.get(symbol) {
            return Err(TechnicalsError::Data {
                reason: reason.clone(),
            });
        }
        let bars = self
            .data
            .get(symbol)
            .ok_or_else(|| TechnicalsError::NoData {
                symbol: symbol.to_string(),
                timeframe: timeframe.to_string(),
            })?;
        let start = bars.len().saturating_sub(limit);
        Ok(bars[start..].to_vec())
    }

    fn list_symbols(&self, _timeframe: &str) -> Result<Vec<String>, TechnicalsError> {
        let mut symbols: Vec<String> = self.data.keys().cloned().collect();
        symbols.sort();
        Ok(symbols)
    }
}

pub struct MockNewsPort {
    pub items: HashMap<String, Vec<NewsItem>>,
    pub errors: HashMap<String, String>,
}

impl MockNewsPort {
    pub fn new() -> Self {
        Self {
            items: HashMap::new(),
            errors: HashMap::new(),
        }
    }

    pub fn with_items(mut self, symbol: &str, items: Vec<NewsItem>) -> Self {
        self.items.insert(symbol.to_string(), items);
        self
    }

    pub fn with_error(mut self, symbol: &str, reason: &str) -> Self {
        self.errors.insert(symbol.to_string(), reason.to_string());
        self
    }
}

impl NewsPort for MockNewsPort {
    fn fetch_news(&self, symbol: &str, limit: usize) -> Result<Vec<NewsItem>, TechnicalsError> {
        if let Some(reason) = self.errors.get(symbol) {
            return Err(TechnicalsError::Data {
                reason: reason.clone(),
            });
        }
        Ok(self
            .items
            .get(symbol)
            .map(|items| items.iter().take(limit).cloned().collect())
            .unwrap_or_default())
    }
}

pub fn make_bar(day: usize, close: f64, volume: f64) -> OhlcvBar {
    OhlcvBar {
        time: format!("2024-{:02}-{:02}", day / 28 + 1, day % 28 + 1),
        open: close,
        high: close + 1.0,
        low: close - 1.0,
        close,
        volume,
    }
}

pub fn bars_from_closes(closes: &[f64], volume: f64) -> Vec<OhlcvBar> {
    closes
        .iter()
        .enumerate()
        .map(|(i, &c)| make_bar(i, c, volume))
        .collect()
}

/// Oscillating closes with a slight drift, so every window has both gains
/// and losses and a non-zero spread.
pub fn wavy_bars(n: usize) -> Vec<OhlcvBar> {
    (0..n)
        .map(|i| {
            let x = i as f64;
            let close = 100.0 + 5.0 * (x * 0.7).sin() + x * 0.05;
            make_bar(i, close, 1_000.0 + 100.0 * (x * 0.3).cos())
        })
        .collect()
}

pub fn flat_bars(n: usize, close: f64, volume: f64) -> Vec<OhlcvBar> {
    bars_from_closes(&vec![close; n], volume)
}

pub fn bars_to_csv(bars: &[OhlcvBar]) -> String {
    let mut out = String::from("time,open,high,low,close,volume\n");
    for b in bars {
        out.push_str(&format!(
            "{},{},{},{},{},{}\n",
            b.time, b.open, b.high, b.low, b.close, b.volume
        ));
    }
    out
}
