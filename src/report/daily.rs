//! Builds the report on the transactions made during one local day.

use rusqlite::Connection;
use serde::{Deserialize, Serialize};
use time::{OffsetDateTime, UtcOffset};

use crate::{
    Error,
    report::{
        DayWindow,
        db::{count_transactions_in_window, sum_quantity_by_category},
    },
};

/// A summary of one local day of transactions.
///
/// A day without transactions is reported as zero transactions, an empty
/// category name and zero picks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyCategoryReport {
    /// The number of transactions created during the day.
    pub total_transaction: i64,
    /// The category picked the most times during the day, empty if none.
    ///
    /// Ties go to the category with the lowest ID.
    pub most_picked_category: String,
    /// How many times the most picked category was picked, zero if none.
    pub total_picked: i64,
}

/// Report on the local day in the timezone `offset` that contains `as_of`.
///
/// Both queries run inside one database transaction so that the count and the
/// most picked category describe the same set of transactions.
///
/// # Errors
/// This function will return a [Error::SqlError] if the database cannot be read.
pub fn get_daily_report(
    as_of: OffsetDateTime,
    offset: UtcOffset,
    connection: &Connection,
) -> Result<DailyCategoryReport, Error> {
    let window = DayWindow::containing(as_of, offset);

    let tx = connection.unchecked_transaction()?;
    let total_transaction = count_transactions_in_window(&window, &tx)?;
    let category_totals = sum_quantity_by_category(&window, &tx)?;
    tx.commit()?;

    let report = match category_totals.into_iter().next() {
        Some(most_picked) => DailyCategoryReport {
            total_transaction,
            most_picked_category: most_picked.category_name,
            total_picked: most_picked.total_picked,
        },
        None => DailyCategoryReport {
            total_transaction,
            ..Default::default()
        },
    };

    Ok(report)
}
