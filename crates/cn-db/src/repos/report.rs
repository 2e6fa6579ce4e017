//! Report aggregation across clients and note tables.
//!
//! SQL does the grouping and summing; `cn_core::reports` fills in empty
//! months and converts minutes to hours. A range whose start is after its
//! end matches no rows, so every report comes back empty or zeroed.

use cn_core::enums::{ClientStatus, StatusFilter};
use cn_core::reports::{
    ClientTimeRow, CpdTotal, DateRange, MonthSum, SupervisionPreview, SupervisionTimeReport,
    TimeTotal, TotalsReport, content_preview, minutes_to_hours, month_buckets,
};

use crate::error::DatabaseError;
use crate::helpers::{date_value, get_opt_string, parse_date, parse_enum, text_or_null};
use crate::repos::fetch_all;
use crate::service::PracticeService;

/// Session and assessment notes in range as one relation.
///
/// `?1`/`?2` bind the range; `is_session` tells the two sources apart.
const BILLABLE_NOTES: &str = "SELECT client_id, duration_minutes, is_paid, 1 AS is_session \
       FROM session_notes WHERE session_date BETWEEN ?1 AND ?2 \
     UNION ALL \
     SELECT client_id, duration_minutes, is_paid, 0 AS is_session \
       FROM assessment_notes WHERE assessment_date BETWEEN ?1 AND ?2";

fn range_params(range: DateRange) -> Vec<libsql::Value> {
    vec![date_value(range.start_date), date_value(range.end_date)]
}

/// `?3`: the client status to keep, or NULL for every client.
fn status_param(status: StatusFilter) -> libsql::Value {
    text_or_null(status.status().map(ClientStatus::as_str))
}

fn row_to_client_time(row: &libsql::Row) -> Result<ClientTimeRow, DatabaseError> {
    let first_name: String = row.get(1)?;
    let last_name: String = row.get(2)?;
    let total_minutes: i64 = row.get(6)?;
    Ok(ClientTimeRow {
        client_id: row.get(0)?,
        client_name: format!("{first_name} {last_name}"),
        client_status: parse_enum(&row.get::<String>(3)?)?,
        session_count: row.get(4)?,
        assessment_count: row.get(5)?,
        total_minutes,
        total_hours: minutes_to_hours(total_minutes),
        paid_sessions: row.get(7)?,
        unpaid_sessions: row.get(8)?,
        paid_minutes: row.get(9)?,
        unpaid_minutes: row.get(10)?,
    })
}

fn row_to_month_sum(row: &libsql::Row) -> Result<MonthSum, DatabaseError> {
    Ok(MonthSum {
        month: row.get(0)?,
        minutes: row.get(1)?,
        count: row.get(2)?,
    })
}

fn row_to_preview(row: &libsql::Row) -> Result<SupervisionPreview, DatabaseError> {
    let client_name = match (get_opt_string(row, 6)?, get_opt_string(row, 7)?) {
        (Some(first), Some(last)) => Some(format!("{first} {last}")),
        _ => None,
    };
    Ok(SupervisionPreview {
        id: row.get(0)?,
        date: parse_date(&row.get::<String>(1)?)?,
        client_id: row.get::<Option<i64>>(2)?,
        client_name,
        duration_minutes: row.get(3)?,
        summary: get_opt_string(row, 4)?,
        content_preview: content_preview(get_opt_string(row, 5)?.as_deref()),
    })
}

fn row_to_time_total(row: &libsql::Row) -> Result<TimeTotal, DatabaseError> {
    Ok(TimeTotal::from_minutes(row.get(0)?, row.get(1)?))
}

fn row_to_cpd_total(row: &libsql::Row) -> Result<CpdTotal, DatabaseError> {
    Ok(CpdTotal {
        hours: row.get(0)?,
        count: row.get(1)?,
    })
}

impl PracticeService {
    /// Per-client session and assessment time in `range`.
    ///
    /// Only clients with at least one note in range appear, sorted by first
    /// then last name. `status` restricts which clients are considered.
    pub async fn client_time_report(
        &self,
        range: DateRange,
        status: StatusFilter,
    ) -> Result<Vec<ClientTimeRow>, DatabaseError> {
        let sql = format!(
            "WITH notes AS ({BILLABLE_NOTES}) \
             SELECT c.id, c.first_name, c.last_name, c.status, \
                    COALESCE(SUM(n.is_session), 0), \
                    COALESCE(SUM(1 - n.is_session), 0), \
                    COALESCE(SUM(n.duration_minutes), 0), \
                    COALESCE(SUM(CASE WHEN n.is_paid != 0 THEN 1 ELSE 0 END), 0), \
                    COALESCE(SUM(CASE WHEN n.is_paid = 0 THEN 1 ELSE 0 END), 0), \
                    COALESCE(SUM(CASE WHEN n.is_paid != 0 THEN n.duration_minutes ELSE 0 END), 0), \
                    COALESCE(SUM(CASE WHEN n.is_paid = 0 THEN n.duration_minutes ELSE 0 END), 0) \
             FROM notes n JOIN clients c ON c.id = n.client_id \
             WHERE ?3 IS NULL OR c.status = ?3 \
             GROUP BY c.id, c.first_name, c.last_name, c.status \
             ORDER BY c.first_name, c.last_name, c.id"
        );
        let mut params = range_params(range);
        params.push(status_param(status));

        let rows = fetch_all(self.db().conn(), &sql, params, row_to_client_time).await?;
        tracing::debug!(
            start = %range.start_date,
            end = %range.end_date,
            %status,
            clients = rows.len(),
            "client time report"
        );
        Ok(rows)
    }

    /// Supervision time in `range`, bucketed by calendar month.
    ///
    /// Every month touched by the range gets a bucket, including empty ones.
    /// Notes are listed oldest first with a content preview.
    pub async fn supervision_time_report(
        &self,
        range: DateRange,
    ) -> Result<SupervisionTimeReport, DatabaseError> {
        let conn = self.db().conn();

        let month_sums = fetch_all(
            conn,
            "SELECT substr(supervision_date, 1, 7) AS month, \
                    COALESCE(SUM(duration_minutes), 0), COUNT(*) \
             FROM supervision_notes WHERE supervision_date BETWEEN ?1 AND ?2 \
             GROUP BY month ORDER BY month",
            range_params(range),
            row_to_month_sum,
        )
        .await?;

        let total_days = fetch_all(
            conn,
            "SELECT COUNT(DISTINCT supervision_date) FROM supervision_notes \
             WHERE supervision_date BETWEEN ?1 AND ?2",
            range_params(range),
            |row| Ok(row.get::<i64>(0)?),
        )
        .await?
        .into_iter()
        .next()
        .unwrap_or(0);

        let notes = fetch_all(
            conn,
            "SELECT s.id, s.supervision_date, s.client_id, COALESCE(s.duration_minutes, 0), \
                    s.summary, s.content, c.first_name, c.last_name \
             FROM supervision_notes s LEFT JOIN clients c ON c.id = s.client_id \
             WHERE s.supervision_date BETWEEN ?1 AND ?2 \
             ORDER BY s.supervision_date ASC, s.id ASC",
            range_params(range),
            row_to_preview,
        )
        .await?;

        let total_minutes: i64 = month_sums.iter().map(|m| m.minutes).sum();
        let total_sessions: i64 = month_sums.iter().map(|m| m.count).sum();

        Ok(SupervisionTimeReport {
            range,
            total_minutes,
            total_hours: minutes_to_hours(total_minutes),
            total_sessions,
            total_days,
            months: month_buckets(range, &month_sums),
            notes,
        })
    }

    /// Headline totals for `range`.
    ///
    /// Session and supervision totals follow `status` through the note's
    /// client; supervision notes without a client count only for `All`.
    /// CPD is not client-bound and ignores `status`.
    pub async fn totals_report(
        &self,
        range: DateRange,
        status: StatusFilter,
    ) -> Result<TotalsReport, DatabaseError> {
        let conn = self.db().conn();
        let mut filtered = range_params(range);
        filtered.push(status_param(status));

        let session_total = fetch_all(
            conn,
            &format!(
                "WITH notes AS ({BILLABLE_NOTES}) \
                 SELECT COALESCE(SUM(n.duration_minutes), 0), COUNT(*) \
                 FROM notes n JOIN clients c ON c.id = n.client_id \
                 WHERE ?3 IS NULL OR c.status = ?3"
            ),
            filtered.clone(),
            row_to_time_total,
        )
        .await?
        .into_iter()
        .next()
        .unwrap_or_default();

        let supervision_total = fetch_all(
            conn,
            "SELECT COALESCE(SUM(s.duration_minutes), 0), COUNT(*) \
             FROM supervision_notes s LEFT JOIN clients c ON c.id = s.client_id \
             WHERE s.supervision_date BETWEEN ?1 AND ?2 AND (?3 IS NULL OR c.status = ?3)",
            filtered,
            row_to_time_total,
        )
        .await?
        .into_iter()
        .next()
        .unwrap_or_default();

        let cpd_total = fetch_all(
            conn,
            "SELECT CAST(COALESCE(SUM(duration_hours), 0) AS REAL), COUNT(*) \
             FROM cpd_notes WHERE cpd_date BETWEEN ?1 AND ?2",
            range_params(range),
            row_to_cpd_total,
        )
        .await?
        .into_iter()
        .next()
        .unwrap_or_default();

        Ok(TotalsReport {
            range,
            status,
            session_total,
            supervision_total,
            cpd_total,
        })
    }
}
