//! Sets up the application's database.

use rusqlite::{Connection, Transaction, TransactionBehavior};

use crate::{category::create_category_table, transaction::create_transaction_tables};

/// Create the tables for the domain models if they do not already exist.
///
/// Foreign key enforcement is turned on for `connection`, and the tables are
/// created in a single exclusive transaction.
///
/// # Errors
/// Returns an error if there is an SQL error.
pub fn initialize(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.pragma_update(None, "foreign_keys", true)?;

    let transaction = Transaction::new_unchecked(connection, TransactionBehavior::Exclusive)?;

    create_category_table(&transaction)?;
    create_transaction_tables(&transaction)?;

    transaction.commit()?;

    Ok(())
}
