//! CSV file bar source.
//!
//! Files are named `<SYMBOL>_<TIMEFRAME>.csv` under a base directory, with a
//! `time,open,high,low,close,volume` header. Rows are taken in file order;
//! any malformed row rejects the whole file.

use crate::domain::error::TechnicalsError;
use crate::domain::ohlcv::OhlcvBar;
use crate::ports::data_port::DataPort;
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::debug;

pub struct CsvAdapter {
    base_path: PathBuf,
}

impl CsvAdapter {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    fn csv_path(&self, symbol: &str, timeframe: &str) -> PathBuf {
        self.base_path.join(format!("{}_{}.csv", symbol, timeframe))
    }
}

fn parse_field(
    record: &csv::StringRecord,
    index: usize,
    name: &str,
    row: usize,
) -> Result<f64, TechnicalsError> {
    let raw = record
        .get(index)
        .ok_or_else(|| TechnicalsError::InvalidInput {
            row,
            reason: format!("missing {} column", name),
        })?;
    raw.trim()
        .parse::<f64>()
        .map_err(|e| TechnicalsError::InvalidInput {
            row,
            reason: format!("invalid {} value {:?}: {}", name, raw, e),
        })
}

/// Parse bars from any CSV reader. Rows are numbered from 1, header excluded.
pub fn parse_bars<R: Read>(reader: R) -> Result<Vec<OhlcvBar>, TechnicalsError> {
    let mut rdr = csv::Reader::from_reader(reader);
    let mut bars = Vec::new();

    for (i, result) in rdr.records().enumerate() {
        let row = i + 1;
        let record = result.map_err(|e| TechnicalsError::InvalidInput {
            row,
            reason: format!("CSV parse error: {}", e),
        })?;

        let time = record
            .get(0)
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .ok_or_else(|| TechnicalsError::InvalidInput {
                row,
                reason: "missing time column".into(),
            })?;

        let bar = OhlcvBar {
            time,
            open: parse_field(&record, 1, "open", row)?,
            high: parse_field(&record, 2, "high", row)?,
            low: parse_field(&record, 3, "low", row)?,
            close: parse_field(&record, 4, "close", row)?,
            volume: parse_field(&record, 5, "volume", row)?,
        };
        bar.check()
            .map_err(|reason| TechnicalsError::InvalidInput { row, reason })?;
        bars.push(bar);
    }

    Ok(bars)
}

pub fn read_bars<P: AsRef<Path>>(path: P) -> Result<Vec<OhlcvBar>, TechnicalsError> {
    let path = path.as_ref();
    let file = fs::File::open(path).map_err(|e| TechnicalsError::Data {
        reason: format!("failed to read {}: {}", path.display(), e),
    })?;
    parse_bars(file)
}

impl DataPort for CsvAdapter {
    fn fetch_bars(
        &self,
        symbol: &str,
        limit: usize,
        timeframe: &str,
    ) -> Result<Vec<OhlcvBar>, TechnicalsError> {
        let path = self.csv_path(symbol, timeframe);
        if !path.exists() {
            return Err(TechnicalsError::NoData {
                symbol: symbol.to_string(),
                timeframe: timeframe.to_string(),
            });
        }

        let mut bars = read_bars(&path)?;
        if bars.len() > limit {
            let keep_from = bars.len() - limit;
            bars = bars.split_off(keep_from);
        }
        debug!(symbol = %symbol, timeframe = %timeframe, bars = bars.len(), "fetched bars");
        Ok(bars)
    }

    fn list_symbols(&self, timeframe: &str) -> Result<Vec<String>, TechnicalsError> {
        let entries = fs::read_dir(&self.base_path).map_err(|e| TechnicalsError::Data {
            reason: format!(
                "failed to read directory {}: {}",
                self.base_path.display(),
                e
            ),
        })?;

        let suffix = format!("_{}.csv", timeframe);
        let mut symbols = Vec::new();

        for entry in entries {
            let entry = entry.map_err(|e| TechnicalsError::Data {
                reason: format!("directory entry error: {}", e),
            })?;

            let name = entry.file_name();
            let name_str = name.to_string_lossy();

            if let Some(symbol) = name_str.strip_suffix(&suffix) {
                symbols.push(symbol.to_string());
            }
        }

        symbols.sort();
        Ok(symbols)
    }
}
