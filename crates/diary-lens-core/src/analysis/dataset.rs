use crate::error::Error;
use crate::storage::{read_snapshot, DiaryRecord};
use chrono::{Datelike, NaiveDate, Weekday};
use std::cell::OnceCell;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// A record with its parsed date and derived grouping keys.
#[derive(Debug, Clone, PartialEq)]
pub struct DiaryEntry {
    pub record: DiaryRecord,
    pub date: NaiveDate,
    /// `YYYY-MM`
    pub month: String,
    pub weekday: Weekday,
}

impl DiaryEntry {
    pub fn weekday_name(&self) -> &'static str {
        weekday_name(self.weekday)
    }
}

/// Entries that survive date parsing and the excluded-months filter,
/// in chronological order.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    entries: Vec<DiaryEntry>,
}

impl Dataset {
    pub fn from_records(records: Vec<DiaryRecord>, excluded_months: &[u32]) -> Self {
        let mut entries: Vec<DiaryEntry> = records
            .into_iter()
            .filter_map(|record| {
                let date = match NaiveDate::parse_from_str(record.ymd.trim(), "%Y-%m-%d") {
                    Ok(date) => date,
                    Err(e) => {
                        warn!(
                            "Dropping {}: date key '{}' is not a date ({})",
                            record.file_name, record.ymd, e
                        );
                        return None;
                    }
                };
                if excluded_months.contains(&date.month()) {
                    return None;
                }
                Some(DiaryEntry {
                    month: date.format("%Y-%m").to_string(),
                    weekday: date.weekday(),
                    date,
                    record,
                })
            })
            .collect();

        entries.sort_by(|a, b| {
            a.date
                .cmp(&b.date)
                .then_with(|| a.record.file_name.cmp(&b.record.file_name))
        });
        Self { entries }
    }

    pub fn load(csv_path: &Path, excluded_months: &[u32]) -> Result<Self, Error> {
        let records = read_snapshot(csv_path)?;
        let total = records.len();
        let dataset = Self::from_records(records, excluded_months);
        debug!(
            "Loaded {} of {} records from {}",
            dataset.len(),
            total,
            csv_path.display()
        );
        Ok(dataset)
    }

    pub fn entries(&self) -> &[DiaryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Distinct month keys, ascending.
    pub fn months(&self) -> Vec<String> {
        let mut months: Vec<String> = self.entries.iter().map(|e| e.month.clone()).collect();
        months.dedup();
        months
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.entries.first().map(|e| e.date)
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.entries.last().map(|e| e.date)
    }
}

/// Loads the snapshot on first use and serves the same dataset until dropped.
pub struct SnapshotCache {
    csv_path: PathBuf,
    excluded_months: Vec<u32>,
    dataset: OnceCell<Dataset>,
}

impl SnapshotCache {
    pub fn new(csv_path: impl Into<PathBuf>, excluded_months: Vec<u32>) -> Self {
        Self {
            csv_path: csv_path.into(),
            excluded_months,
            dataset: OnceCell::new(),
        }
    }

    pub fn dataset(&self) -> Result<&Dataset, Error> {
        if let Some(dataset) = self.dataset.get() {
            return Ok(dataset);
        }
        let loaded = Dataset::load(&self.csv_path, &self.excluded_months)?;
        Ok(self.dataset.get_or_init(|| loaded))
    }
}

pub fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}
