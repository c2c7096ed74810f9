use super::dataset::{weekday_name, Dataset};
use super::distribution::SentimentDistribution;
use chrono::Weekday;
use serde::Serialize;

const WEEK: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// Weeks assumed per month when estimating how often each weekday occurred.
const WEEKS_PER_MONTH: usize = 4;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeekdayStat {
    pub weekday: String,
    pub diary_days: usize,
    /// Approximation: distinct months × 4.
    pub total_weeks: usize,
    pub completion_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeekdayView {
    pub stats: Vec<WeekdayStat>,
    pub sentiment: Vec<SentimentDistribution>,
}

/// Completion rate and sentiment mix per weekday, Monday first, only for
/// weekdays that appear in the data.
pub fn weekday_view(dataset: &Dataset) -> WeekdayView {
    let total_weeks = dataset.months().len() * WEEKS_PER_MONTH;

    let mut stats = Vec::new();
    let mut sentiment = Vec::new();

    for weekday in WEEK {
        let labels: Vec<_> = dataset
            .entries()
            .iter()
            .filter(|e| e.weekday == weekday)
            .map(|e| e.record.sentiment_label)
            .collect();
        if labels.is_empty() {
            continue;
        }

        let name = weekday_name(weekday);
        let completion_rate = if total_weeks == 0 {
            0.0
        } else {
            labels.len() as f64 / total_weeks as f64 * 100.0
        };

        stats.push(WeekdayStat {
            weekday: name.to_string(),
            diary_days: labels.len(),
            total_weeks,
            completion_rate,
        });
        sentiment.push(SentimentDistribution::from_labels(name, labels));
    }

    WeekdayView { stats, sentiment }
}
