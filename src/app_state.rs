//! Implements a struct that holds the state of the REST server.

use std::sync::{Arc, Mutex};

use rusqlite::Connection;

use crate::{Error, db::initialize, timezone::LocalTimezone};

/// The state of the REST server.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The timezone that decides where one day of transactions ends and the
    /// next begins.
    pub local_timezone: LocalTimezone,

    /// The database connection
    pub db_connection: Arc<Mutex<Connection>>,
}

impl AppState {
    /// Create a new [AppState] with a SQLite database connection.
    ///
    /// This function will initialize the database by adding the tables for the domain models.
    ///
    /// # Errors
    /// Returns an error if the database cannot be initialized.
    pub fn new(db_connection: Connection, local_timezone: LocalTimezone) -> Result<Self, Error> {
        initialize(&db_connection)?;

        Ok(Self {
            local_timezone,
            db_connection: Arc::new(Mutex::new(db_connection)),
        })
    }
}
