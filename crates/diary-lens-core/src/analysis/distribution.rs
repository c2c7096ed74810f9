use crate::sentiment::SentimentLabel;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SentimentShare {
    pub label: SentimentLabel,
    pub count: usize,
    pub percent: f64,
}

/// Percentage of each sentiment category within one group.
///
/// Always carries all five categories in display order; categories absent
/// from the group are reported as 0%. Non-empty groups sum to 100.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SentimentDistribution {
    pub key: String,
    pub total: usize,
    pub shares: Vec<SentimentShare>,
}

impl SentimentDistribution {
    pub fn from_labels(key: impl Into<String>, labels: impl IntoIterator<Item = SentimentLabel>) -> Self {
        let mut counts = [0usize; 5];
        for label in labels {
            counts[label.index()] += 1;
        }
        let total: usize = counts.iter().sum();

        let shares = SentimentLabel::DISPLAY_ORDER
            .iter()
            .map(|&label| {
                let count = counts[label.index()];
                let percent = if total == 0 {
                    0.0
                } else {
                    count as f64 / total as f64 * 100.0
                };
                SentimentShare {
                    label,
                    count,
                    percent,
                }
            })
            .collect();

        Self {
            key: key.into(),
            total,
            shares,
        }
    }

    pub fn percent(&self, label: SentimentLabel) -> f64 {
        self.shares
            .iter()
            .find(|share| share.label == label)
            .map(|share| share.percent)
            .unwrap_or(0.0)
    }
}
