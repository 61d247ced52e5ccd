//! Headline source port trait.

use crate::domain::error::TechnicalsError;
use crate::domain::render::NewsItem;

pub trait NewsPort {
    /// Up to `limit` recent headlines for `symbol`, in source order.
    fn fetch_news(&self, symbol: &str, limit: usize) -> Result<Vec<NewsItem>, TechnicalsError>;
}
