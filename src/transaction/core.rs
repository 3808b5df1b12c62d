//! Defines the core data models and database queries for transactions.

use rusqlite::{Connection, Row, types::Type};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::{CategoryId, DatabaseId, Error, TransactionId, category::Category};

// ============================================================================
// MODELS
// ============================================================================

/// A completed checkout: everything picked at the till in one go.
///
/// Transactions are created by [crate::create_transaction] and are never
/// modified afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// The ID of the transaction, assigned by the database.
    pub id: TransactionId,
    /// The sum of the quantities of every detail.
    pub total_amount: i64,
    /// When the transaction was stored, assigned by the database.
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    /// The line items of the transaction in the order they were checked out.
    pub details: Vec<TransactionDetail>,
}

/// One line item of a [Transaction].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionDetail {
    /// The ID of the detail, assigned by the database.
    pub id: DatabaseId,
    /// The transaction this detail belongs to.
    pub transaction_id: TransactionId,
    /// The category that was picked.
    pub category_id: CategoryId,
    /// The name of the category at the time of checkout.
    ///
    /// Stored alongside the ID so that renaming or deleting the category
    /// later does not rewrite history.
    pub category_name: String,
    /// How many times the category was picked. Always greater than zero.
    pub quantity: i64,
}

/// A category and how many times it was picked, as sent by the till.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutItem {
    /// The category that was picked.
    pub category_id: CategoryId,
    /// How many times the category was picked.
    pub quantity: i64,
}

/// The request body for a checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutRequest {
    /// The picked items.
    pub items: Vec<CheckoutItem>,
}

// ============================================================================
// DATABASE FUNCTIONS
// ============================================================================

/// Insert a transaction row and return the ID and creation time assigned by
/// the database.
///
/// The caller is responsible for inserting the details in the same database
/// transaction.
pub fn insert_transaction(
    total_amount: i64,
    connection: &Connection,
) -> Result<(TransactionId, OffsetDateTime), Error> {
    let (id, created_at) = connection
        .prepare("INSERT INTO \"transaction\" (total_amount) VALUES (?1) RETURNING id, created_at")?
        .query_row([total_amount], |row| {
            Ok((row.get(0)?, map_timestamp(row, 1)?))
        })?;

    Ok((id, created_at))
}

/// Insert a transaction detail for `category`, capturing its current name.
pub fn insert_transaction_detail(
    transaction_id: TransactionId,
    category: &Category,
    quantity: i64,
    connection: &Connection,
) -> Result<TransactionDetail, Error> {
    connection
        .prepare(
            "INSERT INTO transaction_detail (transaction_id, category_id, category_name, quantity)
             VALUES (?1, ?2, ?3, ?4)
             RETURNING id, transaction_id, category_id, category_name, quantity",
        )?
        .query_row(
            (
                transaction_id,
                category.id,
                category.name.as_ref(),
                quantity,
            ),
            map_transaction_detail_row,
        )
        .map_err(|error| error.into())
}

/// Retrieve a transaction and its details from the database by its `id`.
///
/// # Errors
/// This function will return a:
/// - [Error::NotFound] if `id` does not refer to a valid transaction,
/// - or [Error::SqlError] there is some other SQL error.
pub fn get_transaction(id: TransactionId, connection: &Connection) -> Result<Transaction, Error> {
    let (id, total_amount, created_at) = connection
        .prepare("SELECT id, total_amount, created_at FROM \"transaction\" WHERE id = :id")?
        .query_row(&[(":id", &id)], |row| {
            Ok((row.get(0)?, row.get(1)?, map_timestamp(row, 2)?))
        })?;

    let details = connection
        .prepare(
            "SELECT id, transaction_id, category_id, category_name, quantity
             FROM transaction_detail
             WHERE transaction_id = :transaction_id
             ORDER BY id ASC",
        )?
        .query_map(&[(":transaction_id", &id)], map_transaction_detail_row)?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Transaction {
        id,
        total_amount,
        created_at,
        details,
    })
}

/// Get the total number of transactions in the database.
///
/// # Errors
/// This function will return a [Error::SqlError] there is some SQL error.
#[cfg(test)]
pub fn count_transactions(connection: &Connection) -> Result<u32, Error> {
    connection
        .query_row("SELECT COUNT(id) FROM \"transaction\";", [], |row| {
            row.get(0)
        })
        .map_err(|error| error.into())
}

/// Get the total number of transaction details in the database.
#[cfg(test)]
pub fn count_transaction_details(connection: &Connection) -> Result<u32, Error> {
    connection
        .query_row("SELECT COUNT(id) FROM transaction_detail;", [], |row| {
            row.get(0)
        })
        .map_err(|error| error.into())
}

/// Create the transaction and transaction detail tables in the database.
///
/// `created_at` is stored as whole seconds since the Unix epoch in UTC.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub fn create_transaction_tables(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute_batch(
        "CREATE TABLE IF NOT EXISTS \"transaction\" (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            total_amount INTEGER NOT NULL,
            created_at INTEGER NOT NULL DEFAULT (unixepoch())
        );

        CREATE INDEX IF NOT EXISTS idx_transaction_created_at ON \"transaction\"(created_at);

        CREATE TABLE IF NOT EXISTS transaction_detail (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            transaction_id INTEGER NOT NULL,
            category_id INTEGER NOT NULL,
            category_name TEXT NOT NULL,
            quantity INTEGER NOT NULL CHECK (quantity > 0),
            FOREIGN KEY(transaction_id) REFERENCES \"transaction\"(id) ON UPDATE CASCADE ON DELETE CASCADE
        );

        CREATE INDEX IF NOT EXISTS idx_transaction_detail_transaction
            ON transaction_detail(transaction_id, category_id);",
    )?;

    Ok(())
}

/// Map a database row to a TransactionDetail.
pub fn map_transaction_detail_row(row: &Row) -> Result<TransactionDetail, rusqlite::Error> {
    let id = row.get(0)?;
    let transaction_id = row.get(1)?;
    let category_id = row.get(2)?;
    let category_name = row.get(3)?;
    let quantity = row.get(4)?;

    Ok(TransactionDetail {
        id,
        transaction_id,
        category_id,
        category_name,
        quantity,
    })
}

fn map_timestamp(row: &Row, index: usize) -> Result<OffsetDateTime, rusqlite::Error> {
    let seconds: i64 = row.get(index)?;

    OffsetDateTime::from_unix_timestamp(seconds).map_err(|error| {
        rusqlite::Error::FromSqlConversionFailure(index, Type::Integer, Box::new(error))
    })
}

// ============================================================================
// TESTS
// ============================================================================
