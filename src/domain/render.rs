//! Plain-text rendering of technicals and news for prompt assembly.
//!
//! Lines come out in a fixed order and only for populated fields. Numbers
//! are printed at their published precision, so a computed zero reads
//! `0.0000` while an unknown value is simply left out.

use serde::{Deserialize, Serialize};

use crate::domain::technicals::TechnicalsSnapshot;

pub const NO_DATA_LINE: &str = "No historical data available.";
pub const NO_NEWS_LINE: &str = "No recent news found.";

const RSI_OVERBOUGHT: f64 = 70.0;
const RSI_OVERSOLD: f64 = 30.0;
const VOLUME_HIGH: f64 = 1.5;
const VOLUME_LOW: f64 = 0.5;
const SUMMARY_MAX_CHARS: usize = 300;

fn rsi_label(rsi: f64) -> &'static str {
    if rsi > RSI_OVERBOUGHT {
        "overbought"
    } else if rsi < RSI_OVERSOLD {
        "oversold"
    } else {
        "neutral"
    }
}

fn volume_label(ratio: f64) -> &'static str {
    if ratio > VOLUME_HIGH {
        "high"
    } else if ratio < VOLUME_LOW {
        "low"
    } else {
        "average"
    }
}

fn price_position(current_price: Option<f64>, level: f64) -> &'static str {
    // a missing price counts as 0
    if current_price.unwrap_or(0.0) > level {
        "above"
    } else {
        "below"
    }
}

fn fmt_opt(value: Option<f64>, dp: usize) -> String {
    match value {
        Some(v) => format!("{:.*}", dp, v),
        None => "N/A".to_string(),
    }
}

pub fn format_technicals(tech: &TechnicalsSnapshot, current_price: Option<f64>) -> String {
    if tech.bars_used == 0 {
        return NO_DATA_LINE.to_string();
    }

    let mut lines = vec![format!("Based on {} daily bars:", tech.bars_used)];

    if let Some(rsi) = tech.rsi_14 {
        lines.push(format!("- RSI(14): {:.2} [{}]", rsi, rsi_label(rsi)));
    }

    if let Some(macd) = tech.macd {
        let direction = match tech.macd_hist {
            Some(hist) if hist > 0.0 => "bullish crossover",
            _ => "bearish crossover",
        };
        lines.push(format!(
            "- MACD(12,26,9): {:.4} | Signal: {} | Hist: {} [{}]",
            macd,
            fmt_opt(tech.macd_signal, 4),
            fmt_opt(tech.macd_hist, 4),
            direction
        ));
    }

    if let Some(sma) = tech.sma_20 {
        lines.push(format!(
            "- SMA-20: {:.2} [price {} SMA-20]",
            sma,
            price_position(current_price, sma)
        ));
    }

    if let Some(sma) = tech.sma_50 {
        lines.push(format!(
            "- SMA-50: {:.2} [price {} SMA-50]",
            sma,
            price_position(current_price, sma)
        ));
    }

    if let Some(upper) = tech.bb_upper {
        let position = match tech.bb_pct {
            Some(pct) => format!("{:.1}%", pct * 100.0),
            None => "N/A".to_string(),
        };
        lines.push(format!(
            "- Bollinger Bands: Lower={} | Upper={:.2} | Position={}",
            fmt_opt(tech.bb_lower, 2),
            upper,
            position
        ));
    }

    if let Some(ratio) = tech.volume_ratio {
        lines.push(format!(
            "- Volume ratio (vs 20d avg): {:.2}x [{} volume]",
            ratio,
            volume_label(ratio)
        ));
    }

    if let Some(trend) = tech.trend {
        lines.push(format!(
            "- Overall trend signal: {}",
            trend.as_str().to_uppercase()
        ));
    }

    lines.join("\n")
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsItem {
    pub title: String,
    pub publisher: String,
    pub published: String,
    pub url: String,
    pub summary: String,
}

impl NewsItem {
    pub fn new(
        title: impl Into<String>,
        publisher: impl Into<String>,
        published: impl Into<String>,
        url: impl Into<String>,
        summary: &str,
    ) -> Self {
        Self {
            title: title.into(),
            publisher: publisher.into(),
            published: published.into(),
            url: url.into(),
            summary: summary.chars().take(SUMMARY_MAX_CHARS).collect(),
        }
    }
}

pub fn format_news(items: &[NewsItem]) -> String {
    if items.is_empty() {
        return NO_NEWS_LINE.to_string();
    }

    let mut lines = Vec::with_capacity(items.len() * 2);
    for (i, item) in items.iter().enumerate() {
        lines.push(format!(
            "{}. [{}] {} ({})",
            i + 1,
            item.publisher,
            item.title,
            item.published
        ));
        if !item.summary.is_empty() {
            lines.push(format!("   Summary: {}", item.summary));
        }
    }
    lines.join("\n")
}
