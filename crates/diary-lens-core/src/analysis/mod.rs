//! Read-only dashboard analytics over the CSV snapshot.

pub mod browser;
pub mod dataset;
pub mod distribution;
pub mod monthly;
pub mod summary;
pub mod weekday;

pub use browser::{browse, BrowseFilter, BrowseRow};
pub use dataset::{Dataset, DiaryEntry, SnapshotCache};
pub use distribution::{SentimentDistribution, SentimentShare};
pub use monthly::{days_in_month, monthly_view, MonthlyStat, MonthlyView};
pub use summary::{summary_view, SummaryView};
pub use weekday::{weekday_view, WeekdayStat, WeekdayView};
