use colored::*;
use diary_lens_core::analysis::{
    BrowseRow, MonthlyView, SentimentDistribution, SummaryView, WeekdayView,
};
use diary_lens_core::sentiment::SentimentLabel;
use std::fmt::{self, Write};

const BAR_WIDTH: usize = 40;
const PREVIEW_CHARS: usize = 60;

fn label_color(label: SentimentLabel) -> (u8, u8, u8) {
    match label {
        SentimentLabel::VeryNegative => (0x1a, 0x23, 0x7e),
        SentimentLabel::Negative => (0x40, 0x51, 0xb5),
        SentimentLabel::Neutral => (0x9e, 0x9e, 0x9e),
        SentimentLabel::Positive => (0xe5, 0x39, 0x35),
        SentimentLabel::VeryPositive => (0xb7, 0x1c, 0x1c),
    }
}

fn colored_label(label: SentimentLabel) -> ColoredString {
    let (r, g, b) = label_color(label);
    label.as_str().truecolor(r, g, b)
}

/// Number of cells a percentage occupies in a bar of `width` cells.
fn cells(percent: f64, width: usize) -> usize {
    ((percent.clamp(0.0, 100.0) / 100.0) * width as f64).round() as usize
}

fn bar(percent: f64) -> String {
    let filled = cells(percent, BAR_WIDTH);
    format!(
        "{}{}",
        "█".repeat(filled).cyan(),
        "░".repeat(BAR_WIDTH - filled).dimmed()
    )
}

fn stacked_bar(dist: &SentimentDistribution) -> String {
    let mut out = String::new();
    for share in &dist.shares {
        let (r, g, b) = label_color(share.label);
        let segment = "█".repeat(cells(share.percent, BAR_WIDTH));
        out.push_str(&segment.truecolor(r, g, b).to_string());
    }
    out
}

fn legend() -> String {
    SentimentLabel::DISPLAY_ORDER
        .iter()
        .map(|&label| {
            let (r, g, b) = label_color(label);
            format!("{} {}", "■".truecolor(r, g, b), label)
        })
        .collect::<Vec<_>>()
        .join("  ")
}

fn share_breakdown(dist: &SentimentDistribution) -> String {
    dist.shares
        .iter()
        .filter(|s| s.count > 0)
        .map(|s| format!("{} {:.1}%", s.label, s.percent))
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn monthly(view: &MonthlyView) -> Result<String, fmt::Error> {
    let mut out = String::new();
    writeln!(out, "{}", "Monthly completion".bold())?;
    for stat in &view.stats {
        writeln!(
            out,
            "  {}  {} {:>5.1}% ({}/{})",
            stat.month,
            bar(stat.completion_rate),
            stat.completion_rate,
            stat.diary_days,
            stat.total_days
        )?;
    }
    writeln!(out)?;
    writeln!(out, "{}", "Monthly sentiment".bold())?;
    writeln!(out, "  {}", legend())?;
    for dist in &view.sentiment {
        writeln!(out, "  {}  {}  {}", dist.key, stacked_bar(dist), share_breakdown(dist))?;
    }
    Ok(out)
}

pub fn weekday(view: &WeekdayView) -> Result<String, fmt::Error> {
    let mut out = String::new();
    writeln!(out, "{}", "Weekday completion".bold())?;
    for stat in &view.stats {
        writeln!(
            out,
            "  {:<9}  {} {:>5.1}% ({}/{})",
            stat.weekday,
            bar(stat.completion_rate.min(100.0)),
            stat.completion_rate,
            stat.diary_days,
            stat.total_weeks
        )?;
    }
    writeln!(out)?;
    writeln!(out, "{}", "Weekday sentiment".bold())?;
    writeln!(out, "  {}", legend())?;
    for dist in &view.sentiment {
        writeln!(out, "  {:<9}  {}  {}", dist.key, stacked_bar(dist), share_breakdown(dist))?;
    }
    Ok(out)
}

pub fn summary(view: &SummaryView) -> Result<String, fmt::Error> {
    let mut out = String::new();
    writeln!(out, "{}", "Summary".bold())?;
    writeln!(out, "  Total entries:      {}", view.total_entries.to_string().green())?;
    let span = match (view.span_start, view.span_end) {
        (Some(start), Some(end)) => format!("{} .. {} ({} days)", start, end, view.span_days),
        _ => "n/a".to_string(),
    };
    writeln!(out, "  Span:               {}", span)?;
    writeln!(
        out,
        "  Overall completion: {}",
        format!("{:.1}%", view.completion_rate).green()
    )?;
    writeln!(out)?;
    writeln!(out, "{}", "Sentiment distribution".bold())?;
    writeln!(out, "  {}", stacked_bar(&view.sentiment))?;
    for share in &view.sentiment.shares {
        writeln!(
            out,
            "  {:<13} {:>5.1}%  ({})",
            colored_label(share.label),
            share.percent,
            share.count
        )?;
    }
    Ok(out)
}

pub fn entries(rows: &[BrowseRow], show_content: bool) -> Result<String, fmt::Error> {
    let mut out = String::new();
    writeln!(out, "{} ({})", "Diary entries".bold(), rows.len())?;
    for row in rows {
        writeln!(out, "  {} - {}", row.date, colored_label(row.sentiment_label))?;
        if show_content {
            for line in row.raw_content.trim().lines() {
                writeln!(out, "      {}", line)?;
            }
        } else {
            writeln!(out, "      {}", preview(&row.raw_content).dimmed())?;
        }
    }
    Ok(out)
}

fn preview(content: &str) -> String {
    let flat = content.split_whitespace().collect::<Vec<_>>().join(" ");
    if flat.chars().count() > PREVIEW_CHARS {
        let cut: String = flat.chars().take(PREVIEW_CHARS).collect();
        format!("{}…", cut)
    } else {
        flat
    }
}
