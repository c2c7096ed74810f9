use super::dataset::{Dataset, DiaryEntry};
use crate::sentiment::SentimentLabel;
use serde::Serialize;

/// Detail-browser selection. An empty list selects everything for that control.
#[derive(Debug, Clone, Default)]
pub struct BrowseFilter {
    pub months: Vec<String>,
    pub sentiments: Vec<SentimentLabel>,
}

impl BrowseFilter {
    fn matches(&self, entry: &DiaryEntry) -> bool {
        (self.months.is_empty() || self.months.iter().any(|m| *m == entry.month))
            && (self.sentiments.is_empty()
                || self.sentiments.contains(&entry.record.sentiment_label))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BrowseRow {
    pub date: String,
    pub sentiment_label: SentimentLabel,
    pub raw_content: String,
}

/// Matching entries in chronological order.
pub fn browse(dataset: &Dataset, filter: &BrowseFilter) -> Vec<BrowseRow> {
    dataset
        .entries()
        .iter()
        .filter(|entry| filter.matches(entry))
        .map(|entry| BrowseRow {
            date: entry.date.format("%Y-%m-%d").to_string(),
            sentiment_label: entry.record.sentiment_label,
            raw_content: entry.record.raw_content.clone(),
        })
        .collect()
}
