use super::dataset::Dataset;
use super::distribution::SentimentDistribution;
use super::monthly::days_in_month;
use crate::config::DashboardConfig;
use chrono::{Datelike, NaiveDate};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryView {
    pub total_entries: usize,
    pub span_start: Option<NaiveDate>,
    pub span_end: Option<NaiveDate>,
    /// Days in the span that fall outside the excluded months.
    pub span_days: i64,
    /// Entries inside the span ÷ counted days in the span × 100.
    pub completion_rate: f64,
    pub sentiment: SentimentDistribution,
}

/// Overall totals. The span comes from `summary_start`/`summary_end` when
/// configured, otherwise from the whole calendar months covered by the data.
/// Days of excluded months never count toward the span.
pub fn summary_view(dataset: &Dataset, config: &DashboardConfig) -> SummaryView {
    let span_start = config
        .summary_start
        .or_else(|| dataset.first_date().and_then(|d| d.with_day(1)));
    let span_end = config.summary_end.or_else(|| {
        dataset
            .last_date()
            .and_then(|d| days_in_month(d.year(), d.month()).and_then(|n| d.with_day(n)))
    });

    let (span_days, in_span) = match (span_start, span_end) {
        (Some(start), Some(end)) if end >= start => {
            let days = counted_days(start, end, &config.excluded_months);
            let count = dataset
                .entries()
                .iter()
                .filter(|e| e.date >= start && e.date <= end)
                .count();
            (days, count)
        }
        _ => (0, 0),
    };

    let completion_rate = if span_days > 0 {
        in_span as f64 / span_days as f64 * 100.0
    } else {
        0.0
    };

    SummaryView {
        total_entries: dataset.len(),
        span_start,
        span_end,
        span_days,
        completion_rate,
        sentiment: SentimentDistribution::from_labels(
            "all",
            dataset.entries().iter().map(|e| e.record.sentiment_label),
        ),
    }
}

fn counted_days(start: NaiveDate, end: NaiveDate, excluded_months: &[u32]) -> i64 {
    start
        .iter_days()
        .take_while(|d| *d <= end)
        .filter(|d| !excluded_months.contains(&d.month()))
        .count() as i64
}
