use chrono::NaiveDate;
use diary_lens_core::analysis::{
    browse, monthly_view, summary_view, weekday_view, BrowseFilter, Dataset, SnapshotCache,
};
use diary_lens_core::config::DashboardConfig;
use diary_lens_core::sentiment::SentimentLabel::{self, *};
use diary_lens_core::storage::{write_snapshot, DiaryRecord};
use tempfile::tempdir;

fn make_record(ymd: &str, label: SentimentLabel) -> DiaryRecord {
    DiaryRecord {
        file_name: format!("{}.md", ymd),
        ymd: ymd.to_string(),
        raw_content: format!("content of {}", ymd),
        gym_menu_list: Vec::new(),
        created_at: String::new(),
        sentiment_label: label,
        sentiment_score: 0.8,
    }
}

fn dataset(rows: &[(&str, SentimentLabel)]) -> Dataset {
    Dataset::from_records(
        rows.iter().map(|(ymd, label)| make_record(ymd, *label)).collect(),
        &DashboardConfig::default().excluded_months,
    )
}

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 0.05,
        "expected {expected}, got {actual}"
    );
}

#[test]
fn test_september_scenario() {
    let ds = dataset(&[
        ("2024-09-01", Positive),
        ("2024-09-02", Negative),
        ("2024-09-15", Positive),
    ]);

    let view = monthly_view(&ds);
    assert_eq!(view.stats.len(), 1);
    let sept = &view.stats[0];
    assert_eq!(sept.month, "2024-09");
    assert_eq!(sept.diary_days, 3);
    assert_eq!(sept.total_days, 30);
    assert_close(sept.completion_rate, 10.0);

    let mix = &view.sentiment[0];
    assert_eq!(mix.key, "2024-09");
    assert_close(mix.percent(Positive), 66.7);
    assert_close(mix.percent(Negative), 33.3);
    for label in [VeryPositive, Neutral, VeryNegative] {
        assert_eq!(mix.percent(label), 0.0);
    }
}

#[test]
fn test_leap_february_uses_29_days() {
    let ds = dataset(&[("2024-02-01", Neutral), ("2024-02-29", Neutral)]);
    let stat = &monthly_view(&ds).stats[0];
    assert_eq!(stat.total_days, 29);
    assert!((stat.completion_rate - 200.0 / 29.0).abs() < 1e-9);
}

#[test]
fn test_distributions_always_sum_to_100() {
    let ds = dataset(&[
        ("2024-09-01", VeryPositive),
        ("2024-09-08", Neutral),
        ("2024-09-09", VeryNegative),
        ("2024-10-01", Negative),
        ("2024-10-06", Positive),
        ("2024-10-07", Positive),
        ("2024-11-03", Neutral),
    ]);

    let monthly = monthly_view(&ds);
    let weekday = weekday_view(&ds);
    let summary = summary_view(&ds, &DashboardConfig::default());

    let groups = monthly
        .sentiment
        .iter()
        .chain(weekday.sentiment.iter())
        .chain(std::iter::once(&summary.sentiment));
    for dist in groups {
        assert_eq!(dist.shares.len(), 5, "group {}", dist.key);
        let sum: f64 = dist.shares.iter().map(|s| s.percent).sum();
        assert!((sum - 100.0).abs() < 1e-9, "group {} sums to {}", dist.key, sum);
    }
}

#[test]
fn test_excluded_months_never_aggregated() {
    let ds = dataset(&[
        ("2024-01-10", VeryNegative),
        ("2024-08-20", VeryNegative),
        ("2024-09-01", Positive),
    ]);

    assert_eq!(ds.len(), 1);
    let monthly = monthly_view(&ds);
    assert!(monthly.stats.iter().all(|s| s.month == "2024-09"));

    let summary = summary_view(&ds, &DashboardConfig::default());
    assert_eq!(summary.total_entries, 1);
    assert_eq!(summary.sentiment.percent(VeryNegative), 0.0);

    let filter = BrowseFilter {
        months: vec!["2024-01".to_string(), "2024-08".to_string()],
        sentiments: Vec::new(),
    };
    assert!(browse(&ds, &filter).is_empty());
    assert!(browse(&ds, &BrowseFilter::default())
        .iter()
        .all(|row| row.date == "2024-09-01"));
}

#[test]
fn test_weekday_view_uses_month_count_approximation() {
    // 2024-09-02 and 2024-09-09 are Mondays, 2024-10-06 is a Sunday
    let ds = dataset(&[
        ("2024-09-02", Positive),
        ("2024-09-09", Negative),
        ("2024-10-06", Neutral),
    ]);

    let view = weekday_view(&ds);
    let names: Vec<&str> = view.stats.iter().map(|s| s.weekday.as_str()).collect();
    assert_eq!(names, vec!["Monday", "Sunday"]);

    let monday = &view.stats[0];
    assert_eq!(monday.diary_days, 2);
    assert_eq!(monday.total_weeks, 8);
    assert_close(monday.completion_rate, 25.0);
    assert_close(view.sentiment[0].percent(Positive), 50.0);
}

#[test]
fn test_summary_span_from_data_and_config() {
    let ds = dataset(&[
        ("2024-09-05", Positive),
        ("2024-10-10", Positive),
        ("2024-12-31", Neutral),
    ]);

    let derived = summary_view(&ds, &DashboardConfig::default());
    assert_eq!(derived.span_start, NaiveDate::from_ymd_opt(2024, 9, 1));
    assert_eq!(derived.span_end, NaiveDate::from_ymd_opt(2024, 12, 31));
    assert_eq!(derived.span_days, 122);
    assert!((derived.completion_rate - 300.0 / 122.0).abs() < 1e-9);
    assert_close(derived.sentiment.percent(Positive), 66.7);
    assert_eq!(derived.sentiment.percent(VeryNegative), 0.0);

    let config = DashboardConfig {
        summary_start: NaiveDate::from_ymd_opt(2024, 10, 1),
        summary_end: NaiveDate::from_ymd_opt(2024, 10, 31),
        ..DashboardConfig::default()
    };
    let fixed = summary_view(&ds, &config);
    assert_eq!(fixed.span_days, 31);
    assert!((fixed.completion_rate - 100.0 / 31.0).abs() < 1e-9);
    assert_eq!(fixed.total_entries, 3);
}

#[test]
fn test_summary_span_skips_excluded_month_days() {
    // Every day from December through February, January excluded by default
    let start = NaiveDate::from_ymd_opt(2024, 12, 1).unwrap();
    let end = NaiveDate::from_ymd_opt(2025, 2, 28).unwrap();
    let records: Vec<DiaryRecord> = start
        .iter_days()
        .take_while(|d| *d <= end)
        .map(|d| make_record(&d.format("%Y-%m-%d").to_string(), Positive))
        .collect();
    let ds = Dataset::from_records(records, &DashboardConfig::default().excluded_months);

    let summary = summary_view(&ds, &DashboardConfig::default());
    assert_eq!(summary.total_entries, 59);
    assert_eq!(summary.span_start, Some(start));
    assert_eq!(summary.span_end, Some(end));
    assert_eq!(summary.span_days, 59);
    assert!((summary.completion_rate - 100.0).abs() < 1e-9);

    let config = DashboardConfig {
        excluded_months: Vec::new(),
        ..DashboardConfig::default()
    };
    let all_months = Dataset::from_records(
        ds.entries().iter().map(|e| e.record.clone()).collect(),
        &config.excluded_months,
    );
    assert_eq!(summary_view(&all_months, &config).span_days, 90);
}

#[test]
fn test_summary_of_empty_dataset() {
    let summary = summary_view(&Dataset::default(), &DashboardConfig::default());
    assert_eq!(summary.total_entries, 0);
    assert_eq!(summary.span_days, 0);
    assert_eq!(summary.completion_rate, 0.0);
    assert_eq!(summary.sentiment.shares.len(), 5);
}

#[test]
fn test_browse_filters_by_month_and_sentiment() {
    let ds = dataset(&[
        ("2024-10-02", Negative),
        ("2024-09-01", Positive),
        ("2024-09-02", Negative),
        ("2024-10-01", Positive),
    ]);

    let filter = BrowseFilter {
        months: vec!["2024-09".to_string(), "2024-10".to_string()],
        sentiments: vec![Negative],
    };
    let rows = browse(&ds, &filter);
    let dates: Vec<&str> = rows.iter().map(|r| r.date.as_str()).collect();
    assert_eq!(dates, vec!["2024-09-02", "2024-10-02"]);
    assert_eq!(rows[0].raw_content, "content of 2024-09-02");

    let filter = BrowseFilter {
        months: vec!["2024-10".to_string()],
        sentiments: Vec::new(),
    };
    assert_eq!(browse(&ds, &filter).len(), 2);
}

#[test]
fn test_snapshot_cache_loads_once() {
    let tmp = tempdir().unwrap();
    let path = tmp.path().join("raw_contents.csv");
    write_snapshot(&[make_record("2024-09-01", Positive)], &path).unwrap();

    let cache = SnapshotCache::new(&path, vec![1, 8]);
    assert_eq!(cache.dataset().unwrap().len(), 1);

    // Later changes to the file are not observed by the same cache
    write_snapshot(
        &[make_record("2024-09-01", Positive), make_record("2024-09-02", Neutral)],
        &path,
    )
    .unwrap();
    assert_eq!(cache.dataset().unwrap().len(), 1);
    assert_eq!(SnapshotCache::new(&path, vec![]).dataset().unwrap().len(), 2);
}

#[test]
fn test_missing_snapshot_is_an_error() {
    let tmp = tempdir().unwrap();
    let cache = SnapshotCache::new(tmp.path().join("missing.csv"), vec![]);
    assert!(cache.dataset().is_err());
}
