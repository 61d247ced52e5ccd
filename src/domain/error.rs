//! Domain error types.
//!
//! Insufficient history is not an error: the engine reports it through
//! absent snapshot fields. Errors only arise at the boundary (malformed
//! input, missing data, bad configuration).

#[derive(Debug, thiserror::Error)]
pub enum TechnicalsError {
    #[error("invalid input at row {row}: {reason}")]
    InvalidInput { row: usize, reason: String },

    #[error("data error: {reason}")]
    Data { reason: String },

    #[error("no data for {symbol} ({timeframe})")]
    NoData { symbol: String, timeframe: String },

    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&TechnicalsError> for std::process::ExitCode {
    fn from(err: &TechnicalsError) -> Self {
        let code: u8 = match err {
            TechnicalsError::Io(_) => 1,
            TechnicalsError::ConfigParse { .. }
            | TechnicalsError::ConfigMissing { .. }
            | TechnicalsError::ConfigInvalid { .. } => 2,
            TechnicalsError::Data { .. } | TechnicalsError::NoData { .. } => 3,
            TechnicalsError::InvalidInput { .. } => 4,
        };
        std::process::ExitCode::from(code)
    }
}
