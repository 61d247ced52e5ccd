//! Configuration validation.
//!
//! Checks the `[data]` and `[scan]` sections before any bars are loaded.

use crate::domain::error::TechnicalsError;
use crate::ports::config_port::ConfigPort;
use std::collections::HashSet;

pub const DEFAULT_TIMEFRAME: &str = "1D";
pub const DEFAULT_LIMIT: i64 = 60;
pub const DEFAULT_NEWS_LIMIT: i64 = 5;

pub fn validate_scan_config(config: &dyn ConfigPort) -> Result<(), TechnicalsError> {
    validate_bars_dir(config)?;
    validate_timeframe(config)?;
    validate_limit(config)?;
    validate_symbols(config)?;
    validate_news(config)?;
    Ok(())
}

fn invalid(section: &str, key: &str, reason: &str) -> TechnicalsError {
    TechnicalsError::ConfigInvalid {
        section: section.to_string(),
        key: key.to_string(),
        reason: reason.to_string(),
    }
}

fn validate_bars_dir(config: &dyn ConfigPort) -> Result<(), TechnicalsError> {
    match config.get_string("data", "bars_dir") {
        Some(s) if !s.trim().is_empty() => Ok(()),
        Some(_) => Err(invalid("data", "bars_dir", "bars_dir must not be empty")),
        None => Err(TechnicalsError::ConfigMissing {
            section: "data".to_string(),
            key: "bars_dir".to_string(),
        }),
    }
}

fn validate_timeframe(config: &dyn ConfigPort) -> Result<(), TechnicalsError> {
    match config.get_string("data", "timeframe") {
        Some(s) if s.trim().is_empty() => {
            Err(invalid("data", "timeframe", "timeframe must not be empty"))
        }
        Some(s) if s.contains(['/', '\\']) => Err(invalid(
            "data",
            "timeframe",
            "timeframe must not contain path separators",
        )),
        _ => Ok(()),
    }
}

fn validate_limit(config: &dyn ConfigPort) -> Result<(), TechnicalsError> {
    let limit = config.get_int("data", "limit", DEFAULT_LIMIT);
    if limit < 1 {
        return Err(invalid("data", "limit", "limit must be at least 1"));
    }
    Ok(())
}

fn validate_symbols(config: &dyn ConfigPort) -> Result<(), TechnicalsError> {
    let Some(symbols) = config.get_list("scan", "symbols") else {
        // no list means scan everything in bars_dir
        return Ok(());
    };

    let mut seen = HashSet::new();
    for symbol in symbols {
        if symbol.is_empty() {
            return Err(invalid("scan", "symbols", "empty entry in symbol list"));
        }
        let symbol = symbol.to_uppercase();
        if !seen.insert(symbol.clone()) {
            return Err(invalid(
                "scan",
                "symbols",
                &format!("duplicate symbol: {}", symbol),
            ));
        }
    }
    Ok(())
}

fn validate_news(config: &dyn ConfigPort) -> Result<(), TechnicalsError> {
    if let Some(dir) = config.get_string("news", "dir") {
        if dir.trim().is_empty() {
            return Err(invalid("news", "dir", "news dir must not be empty"));
        }
    }
    if config.get_int("news", "limit", DEFAULT_NEWS_LIMIT) < 1 {
        return Err(invalid("news", "limit", "limit must be at least 1"));
    }
    Ok(())
}
