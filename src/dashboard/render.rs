//! Terminal rendering of dashboard views.
//!
//! Output is built as a `String` so it can be asserted on. Colors come from
//! `colored` and are disabled automatically when stdout is not a terminal.

use colored::*;
use std::fmt::Write;

use crate::dashboard::aggregate::{HourBucket, LevelBucket, StageBucket, StudyRow};
use crate::dashboard::session::{DashboardData, LoadFailure, ViewState};

const BAR_WIDTH: usize = 30;

/// Renders whatever the session currently shows.
pub fn render_state(state: &ViewState) -> String {
    match state {
        ViewState::Unauthenticated => format!("{}\n", "Not logged in.".yellow()),
        ViewState::Loading => format!("{}\n", "Loading dashboard...".cyan()),
        ViewState::Ready(data) => render_dashboard(data),
        ViewState::Error(failure) => render_failure(failure),
    }
}

pub fn render_failure(failure: &LoadFailure) -> String {
    match failure {
        LoadFailure::Unauthorized => format!(
            "{} {}\n",
            "✗".red(),
            "The API token was rejected. Log out and enter a valid token.".red()
        ),
        LoadFailure::Upstream(message) => format!(
            "{} {}\n  {}\n",
            "✗".red(),
            "Could not load the dashboard.".red(),
            message.dimmed()
        ),
    }
}

pub fn render_dashboard(data: &DashboardData) -> String {
    let mut out = String::new();
    let metrics = data.metrics();

    section(&mut out, "Statistics");
    let _ = writeln!(out, "  Kanji learned:       {}", metrics.kanji.to_string().green());
    let _ = writeln!(out, "  Vocabulary learned:  {}", metrics.vocabulary.to_string().green());
    let _ = writeln!(out, "  Lessons available:   {}", metrics.lessons.to_string().green());

    section(&mut out, "Upcoming reviews (24h)");
    out.push_str(&render_schedule(&data.review_schedule()));

    section(&mut out, "SRS stages");
    out.push_str(&render_stages(&data.stage_histogram()));

    section(&mut out, "Levels");
    out.push_str(&render_levels(&data.level_histogram()));

    section(&mut out, "Lessons");
    out.push_str(&render_rows(&data.lesson_rows(), "No lessons available."));

    section(&mut out, "Kanji");
    out.push_str(&render_rows(&data.kanji_rows(), "No kanji learned."));

    section(&mut out, "Vocabulary");
    out.push_str(&render_rows(&data.vocabulary_rows(), "No vocabulary learned."));

    out
}

/// An empty schedule renders a message, never an empty chart.
pub fn render_schedule(buckets: &[HourBucket]) -> String {
    if buckets.is_empty() {
        return format!("  {}\n", "No reviews scheduled in the next 24 hours.".dimmed());
    }

    let max = buckets.iter().map(|b| b.count).max().unwrap_or(0);
    buckets
        .iter()
        .map(|b| bar_line(&b.hour.format("%Y-%m-%d %H:00").to_string(), b.count, max))
        .collect()
}

pub fn render_stages(buckets: &[StageBucket]) -> String {
    let max = buckets.iter().map(|b| b.count).max().unwrap_or(0);
    buckets
        .iter()
        .map(|b| bar_line(b.label, b.count, max))
        .collect()
}

pub fn render_levels(buckets: &[LevelBucket]) -> String {
    if buckets.is_empty() {
        return format!("  {}\n", "No level data.".dimmed());
    }

    let max = buckets.iter().map(|b| b.count).max().unwrap_or(0);
    buckets
        .iter()
        .map(|b| bar_line(&format!("Level {}", b.level), b.count, max))
        .collect()
}

pub fn render_rows(rows: &[StudyRow], empty: &str) -> String {
    if rows.is_empty() {
        return format!("  {}\n", empty.dimmed());
    }

    let mut out = String::new();
    for row in rows {
        let _ = write!(out, "  {:<6} {}", row.characters.bold(), row.meaning);
        if let Some(link) = &row.link {
            let _ = write!(out, "  {}", link.blue().underline());
        }
        out.push('\n');
    }
    out
}

fn section(out: &mut String, title: &str) {
    let _ = writeln!(out, "\n{}", title.bold().magenta());
}

fn bar_line(label: &str, count: usize, max: usize) -> String {
    let width = if max == 0 { 0 } else { count * BAR_WIDTH / max };
    let width = if count > 0 { width.max(1) } else { 0 };
    format!("  {label:<16} {} {count}\n", "█".repeat(width).magenta())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn plain() {
        colored::control::set_override(false);
    }

    #[test]
    fn test_empty_schedule_is_distinct_from_not_loaded() {
        plain();
        let empty = render_schedule(&[]);
        let not_loaded = render_state(&ViewState::Unauthenticated);

        assert!(empty.contains("No reviews scheduled"));
        assert_ne!(empty, not_loaded);
    }

    #[test]
    fn test_schedule_lines_show_hour_and_count() {
        plain();
        let hour = Utc.with_ymd_and_hms(2025, 6, 1, 9, 0, 0).unwrap();
        let text = render_schedule(&[HourBucket { hour, count: 3 }]);

        assert!(text.contains("2025-06-01 09:00"));
        assert!(text.trim_end().ends_with('3'));
    }

    #[test]
    fn test_bar_scales_to_max() {
        plain();
        let full = bar_line("a", 10, 10);
        let half = bar_line("b", 5, 10);
        let none = bar_line("c", 0, 10);

        assert_eq!(full.matches('█').count(), BAR_WIDTH);
        assert_eq!(half.matches('█').count(), BAR_WIDTH / 2);
        assert_eq!(none.matches('█').count(), 0);
    }

    #[test]
    fn test_rows_include_link_when_present() {
        plain();
        let rows = vec![StudyRow {
            characters: "日".to_string(),
            meaning: "sun".to_string(),
            link: Some("https://www.wanikani.com/subject/1".to_string()),
        }];

        let text = render_rows(&rows, "none");

        assert!(text.contains("日"));
        assert!(text.contains("sun"));
        assert!(text.contains("https://www.wanikani.com/subject/1"));
        assert_eq!(render_rows(&[], "Nothing here."), "  Nothing here.\n");
    }

    #[test]
    fn test_unauthorized_message_differs_from_upstream() {
        plain();
        let unauthorized = render_failure(&LoadFailure::Unauthorized);
        let upstream = render_failure(&LoadFailure::Upstream("HTTP 500".to_string()));

        assert!(unauthorized.contains("rejected"));
        assert!(upstream.contains("HTTP 500"));
    }
}
