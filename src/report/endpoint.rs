//! Defines the endpoint for the daily report.

use axum::{Json, extract::State};
use rusqlite::Connection;
use time::OffsetDateTime;

use crate::{
    Error,
    report::{DailyCategoryReport, ReportState, get_daily_report},
    timezone::LocalTimezone,
};

/// A route handler for the report on today's transactions.
///
/// "Today" is the local day, in the configured timezone, that contains the
/// time the request is handled.
pub async fn get_daily_report_endpoint(
    State(state): State<ReportState>,
) -> Result<Json<DailyCategoryReport>, Error> {
    let connection = state.db_connection.lock().map_err(|error| {
        tracing::error!("could not acquire database lock: {error}");
        Error::DatabaseLockError
    })?;

    report_in_timezone(OffsetDateTime::now_utc(), state.local_timezone, &connection).map(Json)
}

/// The report for the day containing `as_of`, using the offset `timezone` has at `as_of`.
fn report_in_timezone(
    as_of: OffsetDateTime,
    timezone: LocalTimezone,
    connection: &Connection,
) -> Result<DailyCategoryReport, Error> {
    get_daily_report(as_of, timezone.offset_at(as_of), connection)
}
