//! CLI definition and dispatch.

use clap::{Parser, Subcommand};
use serde::Serialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{info, warn};

use crate::adapters::csv_adapter::{read_bars, CsvAdapter};
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::json_news_adapter::JsonNewsAdapter;
use crate::domain::batch::{compute_batch, SymbolBars, SymbolTechnicals};
use crate::domain::config_validation::{
    validate_scan_config, DEFAULT_LIMIT, DEFAULT_NEWS_LIMIT, DEFAULT_TIMEFRAME,
};
use crate::domain::error::TechnicalsError;
use crate::domain::render::{format_news, format_technicals, NewsItem};
use crate::domain::technicals::{compute_technicals, reported_indicators, TechnicalsSnapshot};
use crate::ports::config_port::ConfigPort;
use crate::ports::data_port::DataPort;
use crate::ports::news_port::NewsPort;

#[derive(Parser, Debug)]
#[command(name = "technicals", about = "Technical indicator snapshots from OHLCV bars")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Compute technicals for a single CSV bar file
    Analyze {
        #[arg(short, long)]
        bars: PathBuf,
        /// Current price for SMA position labels (defaults to the last close)
        #[arg(short, long)]
        price: Option<f64>,
        #[arg(long)]
        json: bool,
    },
    /// Compute technicals for every configured symbol
    Scan {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(long)]
        symbol: Option<String>,
        #[arg(long)]
        json: bool,
    },
    /// Validate a scan configuration
    Validate {
        #[arg(short, long)]
        config: PathBuf,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScanConfig {
    pub bars_dir: PathBuf,
    pub timeframe: String,
    pub limit: usize,
    pub symbols: Vec<String>,
    pub parallel: bool,
    pub news_dir: Option<PathBuf>,
    pub news_limit: usize,
}

pub fn run(cli: Cli) -> ExitCode {
    match cli.command {
        Command::Analyze { bars, price, json } => run_analyze(&bars, price, json),
        Command::Scan {
            config,
            symbol,
            json,
        } => run_scan(&config, symbol.as_deref(), json),
        Command::Validate { config } => run_validate(&config),
    }
}

pub fn load_config(path: &Path) -> Result<FileConfigAdapter, ExitCode> {
    FileConfigAdapter::from_file(path).map_err(|err| {
        eprintln!("error: {err}");
        ExitCode::from(&err)
    })
}

fn fail(err: TechnicalsError) -> ExitCode {
    eprintln!("error: {err}");
    (&err).into()
}

pub fn build_scan_config(config: &dyn ConfigPort) -> Result<ScanConfig, TechnicalsError> {
    let bars_dir = config
        .get_string("data", "bars_dir")
        .ok_or_else(|| TechnicalsError::ConfigMissing {
            section: "data".into(),
            key: "bars_dir".into(),
        })?;

    let limit = config.get_int("data", "limit", DEFAULT_LIMIT);
    let limit = usize::try_from(limit)
        .ok()
        .filter(|l| *l >= 1)
        .ok_or_else(|| TechnicalsError::ConfigInvalid {
            section: "data".into(),
            key: "limit".into(),
            reason: "limit must be at least 1".into(),
        })?;

    let news_limit = config.get_int("news", "limit", DEFAULT_NEWS_LIMIT);
    let news_limit = usize::try_from(news_limit)
        .ok()
        .filter(|l| *l >= 1)
        .ok_or_else(|| TechnicalsError::ConfigInvalid {
            section: "news".into(),
            key: "limit".into(),
            reason: "limit must be at least 1".into(),
        })?;

    let symbols = config
        .get_list("scan", "symbols")
        .unwrap_or_default()
        .into_iter()
        .map(|s| s.to_uppercase())
        .filter(|s| !s.is_empty())
        .collect();

    Ok(ScanConfig {
        bars_dir: PathBuf::from(bars_dir.trim()),
        timeframe: config
            .get_string("data", "timeframe")
            .map(|t| t.trim().to_string())
            .unwrap_or_else(|| DEFAULT_TIMEFRAME.to_string()),
        limit,
        symbols,
        parallel: config.get_bool("scan", "parallel", true),
        news_dir: config
            .get_string("news", "dir")
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty())
            .map(PathBuf::from),
        news_limit,
    })
}

/// CLI override first, then the configured list, then everything the port has.
pub fn resolve_symbols(
    symbol_override: Option<&str>,
    scan: &ScanConfig,
    data_port: &dyn DataPort,
) -> Result<Vec<String>, TechnicalsError> {
    if let Some(symbol) = symbol_override {
        let symbol = symbol.trim();
        if symbol.is_empty() {
            return Err(TechnicalsError::ConfigInvalid {
                section: "scan".into(),
                key: "symbol".into(),
                reason: "symbol override must not be empty".into(),
            });
        }
        return Ok(vec![symbol.to_uppercase()]);
    }
    if !scan.symbols.is_empty() {
        return Ok(scan.symbols.clone());
    }
    data_port.list_symbols(&scan.timeframe)
}

/// Fetch bars per symbol; symbols whose fetch fails are logged and skipped.
pub fn collect_symbol_bars(
    data_port: &dyn DataPort,
    symbols: &[String],
    scan: &ScanConfig,
) -> Vec<SymbolBars> {
    let mut inputs = Vec::with_capacity(symbols.len());
    for symbol in symbols {
        match data_port.fetch_bars(symbol, scan.limit, &scan.timeframe) {
            Ok(bars) => {
                info!(symbol = %symbol, bars = bars.len(), "loaded bars");
                inputs.push(SymbolBars {
                    symbol: symbol.clone(),
                    bars,
                });
            }
            Err(e) => warn!(symbol = %symbol, error = %e, "skipping symbol"),
        }
    }
    inputs
}

/// Headlines per symbol; a failed fetch is logged and reads as no news.
pub fn collect_news(
    news_port: &dyn NewsPort,
    symbols: &[String],
    limit: usize,
) -> HashMap<String, Vec<NewsItem>> {
    symbols
        .iter()
        .map(|symbol| {
            let items = news_port.fetch_news(symbol, limit).unwrap_or_else(|e| {
                warn!(symbol = %symbol, error = %e, "failed to fetch news");
                Vec::new()
            });
            (symbol.clone(), items)
        })
        .collect()
}

#[derive(Serialize)]
struct SymbolReport<'a> {
    #[serde(flatten)]
    technicals: &'a SymbolTechnicals,
    #[serde(skip_serializing_if = "Option::is_none")]
    news: Option<&'a Vec<NewsItem>>,
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, TechnicalsError> {
    serde_json::to_string_pretty(value).map_err(|e| TechnicalsError::Data {
        reason: format!("failed to serialize output: {}", e),
    })
}

pub fn render_analysis(
    snapshot: &TechnicalsSnapshot,
    current_price: Option<f64>,
    json: bool,
) -> Result<String, TechnicalsError> {
    if json {
        to_json(snapshot)
    } else {
        Ok(format_technicals(snapshot, current_price))
    }
}

/// Symbols absent from `news` get no news section.
pub fn render_batch(
    results: &[SymbolTechnicals],
    news: &HashMap<String, Vec<NewsItem>>,
    json: bool,
) -> Result<String, TechnicalsError> {
    if json {
        let reports: Vec<SymbolReport> = results
            .iter()
            .map(|r| SymbolReport {
                technicals: r,
                news: news.get(&r.symbol),
            })
            .collect();
        return to_json(&reports);
    }
    let blocks: Vec<String> = results
        .iter()
        .map(|r| {
            let mut block = format!(
                "== {} ==\n{}",
                r.symbol,
                format_technicals(&r.snapshot, r.last_close)
            );
            if let Some(items) = news.get(&r.symbol) {
                block.push_str("\n\nRecent news:\n");
                block.push_str(&format_news(items));
            }
            block
        })
        .collect();
    Ok(blocks.join("\n\n"))
}

pub fn run_scan_pipeline(
    data_port: &dyn DataPort,
    news_port: Option<&dyn NewsPort>,
    scan: &ScanConfig,
    symbols: &[String],
    json: bool,
) -> Result<String, TechnicalsError> {
    let inputs = collect_symbol_bars(data_port, symbols, scan);
    if inputs.is_empty() {
        return Err(TechnicalsError::Data {
            reason: "no symbols with data to scan".into(),
        });
    }

    info!(
        symbols = inputs.len(),
        parallel = scan.parallel,
        "computing technicals"
    );
    let results = compute_batch(&inputs, scan.parallel);

    let news = match news_port {
        Some(port) => {
            let loaded: Vec<String> = results.iter().map(|r| r.symbol.clone()).collect();
            collect_news(port, &loaded, scan.news_limit)
        }
        None => HashMap::new(),
    };
    render_batch(&results, &news, json)
}

fn run_analyze(bars_path: &Path, price: Option<f64>, json: bool) -> ExitCode {
    info!(path = %bars_path.display(), "loading bars");
    let bars = match read_bars(bars_path) {
        Ok(b) => b,
        Err(e) => return fail(e),
    };

    let snapshot = compute_technicals(&bars);
    let current_price = price.or_else(|| bars.last().map(|b| b.close));

    match render_analysis(&snapshot, current_price, json) {
        Ok(out) => {
            println!("{}", out);
            ExitCode::SUCCESS
        }
        Err(e) => fail(e),
    }
}

fn run_scan(config_path: &Path, symbol: Option<&str>, json: bool) -> ExitCode {
    info!(path = %config_path.display(), "loading config");
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };

    if let Err(e) = validate_scan_config(&adapter) {
        return fail(e);
    }

    let scan = match build_scan_config(&adapter) {
        Ok(s) => s,
        Err(e) => return fail(e),
    };

    let data_port = CsvAdapter::new(scan.bars_dir.clone());
    let symbols = match resolve_symbols(symbol, &scan, &data_port) {
        Ok(s) if !s.is_empty() => s,
        Ok(_) => {
            return fail(TechnicalsError::Data {
                reason: format!("no symbols found for timeframe {}", scan.timeframe),
            });
        }
        Err(e) => return fail(e),
    };

    let news_adapter = scan.news_dir.clone().map(JsonNewsAdapter::new);
    let news_port = news_adapter.as_ref().map(|a| a as &dyn NewsPort);

    match run_scan_pipeline(&data_port, news_port, &scan, &symbols, json) {
        Ok(out) => {
            println!("{}", out);
            ExitCode::SUCCESS
        }
        Err(e) => fail(e),
    }
}

fn run_validate(config_path: &Path) -> ExitCode {
    eprintln!("Validating config: {}", config_path.display());
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };

    if let Err(e) = validate_scan_config(&adapter) {
        return fail(e);
    }
    let scan = match build_scan_config(&adapter) {
        Ok(s) => s,
        Err(e) => return fail(e),
    };

    eprintln!("  bars_dir:  {}", scan.bars_dir.display());
    eprintln!("  timeframe: {}", scan.timeframe);
    eprintln!("  limit:     {}", scan.limit);
    if scan.symbols.is_empty() {
        eprintln!("  symbols:   (all files in bars_dir)");
    } else {
        eprintln!("  symbols:   {}", scan.symbols.join(", "));
    }
    match &scan.news_dir {
        Some(dir) => eprintln!("  news:      {} (up to {})", dir.display(), scan.news_limit),
        None => eprintln!("  news:      (disabled)"),
    }

    eprintln!("\nIndicators:");
    for indicator in reported_indicators() {
        eprintln!("  {} (needs {} bars)", indicator, indicator.min_bars());
    }

    eprintln!("\nConfiguration is valid.");
    ExitCode::SUCCESS
}
