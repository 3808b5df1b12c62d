//! Reports aggregated over the transactions of a local day.

mod daily;
mod db;
mod endpoint;
mod window;

use std::sync::{Arc, Mutex};

use axum::extract::FromRef;
use rusqlite::Connection;
use crate::{AppState, timezone::LocalTimezone};

pub use daily::{DailyCategoryReport, get_daily_report};
pub use endpoint::get_daily_report_endpoint;
pub use window::DayWindow;

/// The state needed for building reports.
#[derive(Debug, Clone)]
pub struct ReportState {
    /// The database connection for reading transactions.
    pub db_connection: Arc<Mutex<Connection>>,
    /// The timezone that defines "today".
    pub local_timezone: LocalTimezone,
}

impl FromRef<AppState> for ReportState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            local_timezone: state.local_timezone,
        }
    }
}
