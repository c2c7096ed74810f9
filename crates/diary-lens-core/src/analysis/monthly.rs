use super::dataset::{Dataset, DiaryEntry};
use super::distribution::SentimentDistribution;
use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyStat {
    pub month: String,
    pub total_days: u32,
    pub diary_days: usize,
    pub completion_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyView {
    pub stats: Vec<MonthlyStat>,
    pub sentiment: Vec<SentimentDistribution>,
}

/// Number of calendar days in `month` of `year`.
pub fn days_in_month(year: i32, month: u32) -> Option<u32> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    u32::try_from(next.signed_duration_since(first).num_days()).ok()
}

/// Completion rate and sentiment mix for every month present, ascending.
pub fn monthly_view(dataset: &Dataset) -> MonthlyView {
    let mut by_month: BTreeMap<&str, Vec<&DiaryEntry>> = BTreeMap::new();
    for entry in dataset.entries() {
        by_month.entry(entry.month.as_str()).or_default().push(entry);
    }

    let mut stats = Vec::with_capacity(by_month.len());
    let mut sentiment = Vec::with_capacity(by_month.len());

    for (month, entries) in by_month {
        let first = entries[0].date;
        let total_days = days_in_month(first.year(), first.month()).unwrap_or(30);
        let diary_days = entries.len();

        stats.push(MonthlyStat {
            month: month.to_string(),
            total_days,
            diary_days,
            completion_rate: diary_days as f64 / total_days as f64 * 100.0,
        });
        sentiment.push(SentimentDistribution::from_labels(
            month,
            entries.iter().map(|e| e.record.sentiment_label),
        ));
    }

    MonthlyView { stats, sentiment }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_days_in_month() {
        assert_eq!(days_in_month(2024, 2), Some(29));
        assert_eq!(days_in_month(2023, 2), Some(28));
        assert_eq!(days_in_month(2024, 9), Some(30));
        assert_eq!(days_in_month(2024, 12), Some(31));
        assert_eq!(days_in_month(2024, 13), None);
    }
}
