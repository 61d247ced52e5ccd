//! Core domain types and logic.

pub mod ohlcv;
pub mod indicator;
pub mod technicals;
pub mod trend;
pub mod render;
pub mod batch;
pub mod config_validation;
pub mod error;
