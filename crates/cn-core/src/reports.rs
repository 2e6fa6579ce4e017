//! Report row types and the calendar arithmetic behind them.
//!
//! The SQL side (in `cn-db`) produces raw per-client and per-month sums; this
//! module turns them into the response shapes, fills in empty months, and
//! converts minutes to hours. Nothing here touches the database.

use chrono::{Datelike, Months, NaiveDate};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::{ClientStatus, StatusFilter};

/// Characters of supervision content shown in report listings.
pub const PREVIEW_CHARS: usize = 100;

/// Inclusive date range a report covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct DateRange {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl DateRange {
    #[must_use]
    pub const fn new(start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            start_date,
            end_date,
        }
    }

    /// A range whose start is after its end contains no days.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.start_date > self.end_date
    }

    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start_date <= date && date <= self.end_date
    }
}

/// Per-client rollup of session and assessment time.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct ClientTimeRow {
    pub client_id: i64,
    pub client_name: String,
    pub client_status: ClientStatus,
    pub session_count: i64,
    pub assessment_count: i64,
    pub total_minutes: i64,
    pub total_hours: f64,
    pub paid_sessions: i64,
    pub unpaid_sessions: i64,
    pub paid_minutes: i64,
    pub unpaid_minutes: i64,
}

/// Supervision time in one calendar month.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct MonthBucket {
    /// `YYYY-MM`.
    pub month: String,
    pub month_start: NaiveDate,
    pub total_minutes: i64,
    pub total_hours: f64,
    pub session_count: i64,
}

/// One supervision note as listed in the supervision report.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct SupervisionPreview {
    pub id: i64,
    pub date: NaiveDate,
    pub client_id: Option<i64>,
    pub client_name: Option<String>,
    pub duration_minutes: i64,
    pub summary: Option<String>,
    pub content_preview: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct SupervisionTimeReport {
    #[serde(flatten)]
    pub range: DateRange,
    pub total_minutes: i64,
    pub total_hours: f64,
    pub total_sessions: i64,
    /// Distinct dates with at least one supervision note.
    pub total_days: i64,
    pub months: Vec<MonthBucket>,
    pub notes: Vec<SupervisionPreview>,
}

/// Duration and count for one category of notes.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct TimeTotal {
    pub minutes: i64,
    pub hours: f64,
    pub count: i64,
}

impl TimeTotal {
    #[must_use]
    pub fn from_minutes(minutes: i64, count: i64) -> Self {
        Self {
            minutes,
            hours: minutes_to_hours(minutes),
            count,
        }
    }
}

/// CPD hours are recorded directly rather than in minutes.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct CpdTotal {
    pub hours: f64,
    pub count: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct TotalsReport {
    #[serde(flatten)]
    pub range: DateRange,
    pub status: StatusFilter,
    /// Session and assessment notes together.
    pub session_total: TimeTotal,
    pub supervision_total: TimeTotal,
    pub cpd_total: CpdTotal,
}

/// Raw supervision sums for one month as returned by the grouping query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthSum {
    /// `YYYY-MM`.
    pub month: String,
    pub minutes: i64,
    pub count: i64,
}

#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn minutes_to_hours(minutes: i64) -> f64 {
    minutes as f64 / 60.0
}

/// `YYYY-MM` key used to group notes by calendar month.
#[must_use]
pub fn month_key(date: NaiveDate) -> String {
    format!("{:04}-{:02}", date.year(), date.month())
}

/// First day of every calendar month touched by the range, in order.
///
/// Walks from the first of the start month to the first of the end month
/// inclusive. Empty when the range is empty.
#[must_use]
pub fn month_starts(range: DateRange) -> Vec<NaiveDate> {
    if range.is_empty() {
        return Vec::new();
    }
    let (Some(mut cursor), Some(last)) = (
        range.start_date.with_day(1),
        range.end_date.with_day(1),
    ) else {
        return Vec::new();
    };

    let mut months = Vec::new();
    while cursor <= last {
        months.push(cursor);
        match cursor.checked_add_months(Months::new(1)) {
            Some(next) => cursor = next,
            None => break,
        }
    }
    months
}

/// One bucket per month in the range, zero-filled where `sums` has no entry.
#[must_use]
pub fn month_buckets(range: DateRange, sums: &[MonthSum]) -> Vec<MonthBucket> {
    month_starts(range)
        .into_iter()
        .map(|month_start| {
            let month = month_key(month_start);
            let (minutes, count) = sums
                .iter()
                .find(|sum| sum.month == month)
                .map_or((0, 0), |sum| (sum.minutes, sum.count));
            MonthBucket {
                month,
                month_start,
                total_minutes: minutes,
                total_hours: minutes_to_hours(minutes),
                session_count: count,
            }
        })
        .collect()
}

/// First `PREVIEW_CHARS` characters of `content`, with `"..."` when cut.
#[must_use]
pub fn content_preview(content: Option<&str>) -> String {
    let content = content.unwrap_or_default();
    let mut chars = content.char_indices();
    match chars.nth(PREVIEW_CHARS) {
        Some((cut, _)) => format!("{}...", &content[..cut]),
        None => content.to_string(),
    }
}
