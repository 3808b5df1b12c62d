//! Database queries for the daily report.

use rusqlite::{Connection, Row};

use crate::{CategoryId, Error, report::DayWindow};

/// How many times a category was picked during a window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryTotal {
    pub category_id: CategoryId,
    /// The name captured on the most recent detail for the category in the window.
    pub category_name: String,
    pub total_picked: i64,
}

/// Count the transactions created during `window`.
pub fn count_transactions_in_window(
    window: &DayWindow,
    connection: &Connection,
) -> Result<i64, Error> {
    connection
        .prepare(
            "SELECT COUNT(id) FROM \"transaction\"
             WHERE created_at >= :start AND created_at < :end",
        )?
        .query_row(
            &[
                (":start", &window.start.unix_timestamp()),
                (":end", &window.end.unix_timestamp()),
            ],
            |row| row.get(0),
        )
        .map_err(|error| error.into())
}

/// Sum the picked quantity per category for the transactions created during `window`.
///
/// Rows are ordered by total descending, then by category ID ascending, so the
/// first row is the most picked category with ties going to the lowest ID.
pub fn sum_quantity_by_category(
    window: &DayWindow,
    connection: &Connection,
) -> Result<Vec<CategoryTotal>, Error> {
    connection
        .prepare(
            "SELECT totals.category_id, latest.category_name, totals.total_picked
             FROM (
                SELECT td.category_id,
                       SUM(td.quantity) AS total_picked,
                       MAX(td.id) AS latest_detail_id
                FROM transaction_detail td
                INNER JOIN \"transaction\" t ON td.transaction_id = t.id
                WHERE t.created_at >= :start AND t.created_at < :end
                GROUP BY td.category_id
             ) AS totals
             INNER JOIN transaction_detail latest ON latest.id = totals.latest_detail_id
             ORDER BY totals.total_picked DESC, totals.category_id ASC",
        )?
        .query_map(
            &[
                (":start", &window.start.unix_timestamp()),
                (":end", &window.end.unix_timestamp()),
            ],
            map_category_total_row,
        )?
        .map(|maybe_total| maybe_total.map_err(|error| error.into()))
        .collect()
}

fn map_category_total_row(row: &Row) -> Result<CategoryTotal, rusqlite::Error> {
    Ok(CategoryTotal {
        category_id: row.get(0)?,
        category_name: row.get(1)?,
        total_picked: row.get(2)?,
    })
}
