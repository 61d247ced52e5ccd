//! JSON file headline source.
//!
//! Files are named `<SYMBOL>_news.json` under a base directory and hold an
//! array of articles. Only `title` is required; untitled articles are
//! dropped and a missing publisher reads `Unknown`. A symbol without a file
//! simply has no news.

use crate::domain::error::TechnicalsError;
use crate::domain::render::NewsItem;
use crate::ports::news_port::NewsPort;
use serde::Deserialize;
use std::fs;
use std::io::Read;
use std::path::PathBuf;
use tracing::debug;

const UNKNOWN_PUBLISHER: &str = "Unknown";

#[derive(Debug, Deserialize)]
struct Article {
    #[serde(default)]
    title: String,
    publisher: Option<String>,
    #[serde(default)]
    published: String,
    #[serde(default)]
    url: String,
    #[serde(default)]
    summary: String,
}

pub struct JsonNewsAdapter {
    base_path: PathBuf,
}

impl JsonNewsAdapter {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    fn news_path(&self, symbol: &str) -> PathBuf {
        self.base_path.join(format!("{}_news.json", symbol))
    }
}

/// The first `limit` articles of the array, minus untitled ones.
pub fn parse_news<R: Read>(reader: R, limit: usize) -> Result<Vec<NewsItem>, TechnicalsError> {
    let articles: Vec<Article> =
        serde_json::from_reader(reader).map_err(|e| TechnicalsError::Data {
            reason: format!("invalid news JSON: {}", e),
        })?;

    Ok(articles
        .into_iter()
        .take(limit)
        .filter(|a| !a.title.trim().is_empty())
        .map(|a| {
            let publisher = a
                .publisher
                .filter(|p| !p.trim().is_empty())
                .unwrap_or_else(|| UNKNOWN_PUBLISHER.to_string());
            NewsItem::new(a.title, publisher, a.published, a.url, &a.summary)
        })
        .collect())
}

impl NewsPort for JsonNewsAdapter {
    fn fetch_news(&self, symbol: &str, limit: usize) -> Result<Vec<NewsItem>, TechnicalsError> {
        let path = self.news_path(symbol);
        if !path.exists() {
            return Ok(Vec::new());
        }
        let file = fs::File::open(&path).map_err(|e| TechnicalsError::Data {
            reason: format!("failed to read {}: {}", path.display(), e),
        })?;
        let items = parse_news(file, limit)?;
        debug!(symbol = %symbol, items = items.len(), "fetched news");
        Ok(items)
    }
}
