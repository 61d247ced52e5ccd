//! Overall trend classification by signal voting.
//!
//! Up to four votes, each skipped when its indicator is absent:
//! 1. RSI above 55 is bullish, below 45 bearish, otherwise no vote
//! 2. MACD histogram above 0 is bullish, otherwise bearish
//! 3. last close above SMA-20 is bullish, otherwise bearish
//! 4. last close above SMA-50 is bullish, otherwise bearish
//!
//! One side needs a margin of two votes to win; anything closer is neutral,
//! including the case where no votes were cast.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::technicals::TechnicalsSnapshot;

pub const RSI_BULLISH_ABOVE: f64 = 55.0;
pub const RSI_BEARISH_BELOW: f64 = 45.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Bullish,
    Bearish,
    Neutral,
}

impl Trend {
    pub fn as_str(&self) -> &'static str {
        match self {
            Trend::Bullish => "bullish",
            Trend::Bearish => "bearish",
            Trend::Neutral => "neutral",
        }
    }
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TrendVotes {
    pub bullish: u32,
    pub bearish: u32,
}

impl TrendVotes {
    fn cast(&mut self, bullish: bool) {
        if bullish {
            self.bullish += 1;
        } else {
            self.bearish += 1;
        }
    }

    pub fn classify(&self) -> Trend {
        if self.bullish > self.bearish + 1 {
            Trend::Bullish
        } else if self.bearish > self.bullish + 1 {
            Trend::Bearish
        } else {
            Trend::Neutral
        }
    }
}

pub fn tally_votes(tech: &TechnicalsSnapshot, last_close: f64) -> TrendVotes {
    let mut votes = TrendVotes::default();

    if let Some(rsi) = tech.rsi_14 {
        if rsi > RSI_BULLISH_ABOVE {
            votes.cast(true);
        } else if rsi < RSI_BEARISH_BELOW {
            votes.cast(false);
        }
    }
    if let Some(hist) = tech.macd_hist {
        votes.cast(hist > 0.0);
    }
    if let Some(sma) = tech.sma_20 {
        votes.cast(last_close > sma);
    }
    if let Some(sma) = tech.sma_50 {
        votes.cast(last_close > sma);
    }

    votes
}

pub fn classify_trend(tech: &TechnicalsSnapshot, last_close: f64) -> Trend {
    tally_votes(tech, last_close).classify()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot() -> TechnicalsSnapshot {
        TechnicalsSnapshot::empty(60)
    }

    #[test]
    fn no_votes_is_neutral() {
        let votes = tally_votes(&snapshot(), 100.0);
        assert_eq!(votes, TrendVotes::default());
        assert_eq!(votes.classify(), Trend::Neutral);
    }

    #[test]
    fn rsi_dead_band_casts_no_vote() {
        for rsi in [45.0, 50.0, 55.0] {
            let tech = TechnicalsSnapshot {
                rsi_14: Some(rsi),
                ..snapshot()
            };
            assert_eq!(tally_votes(&tech, 100.0), TrendVotes::default(), "rsi {}", rsi);
        }
    }

    #[test]
    fn rsi_votes() {
        let bull = TechnicalsSnapshot {
            rsi_14: Some(55.01),
            ..snapshot()
        };
        let bear = TechnicalsSnapshot {
            rsi_14: Some(44.99),
            ..snapshot()
        };
        assert_eq!(tally_votes(&bull, 100.0).bullish, 1);
        assert_eq!(tally_votes(&bear, 100.0).bearish, 1);
    }

    #[test]
    fn zero_histogram_votes_bearish() {
        let tech = TechnicalsSnapshot {
            macd_hist: Some(0.0),
            ..snapshot()
        };
        let votes = tally_votes(&tech, 100.0);
        assert_eq!(votes, TrendVotes { bullish: 0, bearish: 1 });
    }

    #[test]
    fn price_equal_to_sma_votes_bearish() {
        let tech = TechnicalsSnapshot {
            sma_20: Some(100.0),
            sma_50: Some(100.0),
            ..snapshot()
        };
        let votes = tally_votes(&tech, 100.0);
        assert_eq!(votes, TrendVotes { bullish: 0, bearish: 2 });
        assert_eq!(votes.classify(), Trend::Bearish);
    }

    #[test]
    fn margin_of_one_is_neutral() {
        let votes = TrendVotes { bullish: 2, bearish: 1 };
        assert_eq!(votes.classify(), Trend::Neutral);
        let votes = TrendVotes { bullish: 1, bearish: 2 };
        assert_eq!(votes.classify(), Trend::Neutral);
        let votes = TrendVotes { bullish: 1, bearish: 0 };
        assert_eq!(votes.classify(), Trend::Neutral);
    }

    #[test]
    fn margin_of_two_decides() {
        assert_eq!(TrendVotes { bullish: 2, bearish: 0 }.classify(), Trend::Bullish);
        assert_eq!(TrendVotes { bullish: 3, bearish: 1 }.classify(), Trend::Bullish);
        assert_eq!(TrendVotes { bullish: 0, bearish: 2 }.classify(), Trend::Bearish);
        assert_eq!(TrendVotes { bullish: 1, bearish: 3 }.classify(), Trend::Bearish);
    }

    #[test]
    fn all_four_bullish() {
        let tech = TechnicalsSnapshot {
            rsi_14: Some(65.0),
            macd_hist: Some(0.12),
            sma_20: Some(95.0),
            sma_50: Some(90.0),
            ..snapshot()
        };
        assert_eq!(classify_trend(&tech, 100.0), Trend::Bullish);
    }

    #[test]
    fn mixed_signals_are_neutral() {
        let tech = TechnicalsSnapshot {
            rsi_14: Some(65.0),
            macd_hist: Some(-0.12),
            sma_20: Some(95.0),
            sma_50: Some(105.0),
            ..snapshot()
        };
        assert_eq!(classify_trend(&tech, 100.0), Trend::Neutral);
    }

    #[test]
    fn trend_display_and_serde() {
        assert_eq!(Trend::Bullish.to_string(), "bullish");
        assert_eq!(serde_json::to_string(&Trend::Neutral).unwrap(), "\"neutral\"");
        let parsed: Trend = serde_json::from_str("\"bearish\"").unwrap();
        assert_eq!(parsed, Trend::Bearish);
    }
}
