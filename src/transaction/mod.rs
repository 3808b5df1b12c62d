//! Checkout of picked categories as transactions.
//!
//! This module contains everything related to transactions:
//! - The `Transaction` and `TransactionDetail` models
//! - The checkout that stores a transaction and its details atomically
//! - Database functions for storing and reading transactions
//! - Route handlers for creating and reading transactions

mod checkout;
mod core;
mod create_transaction_endpoint;
mod get_transaction_endpoint;

use std::sync::{Arc, Mutex};

use axum::extract::FromRef;
use rusqlite::Connection;

use crate::AppState;

pub use checkout::create_transaction;
pub use self::core::{
    CheckoutItem, CheckoutRequest, Transaction, TransactionDetail, create_transaction_tables,
    get_transaction,
};
pub use create_transaction_endpoint::create_transaction_endpoint;
pub use get_transaction_endpoint::get_transaction_endpoint;

/// The state needed to create or read a transaction.
#[derive(Debug, Clone)]
pub struct TransactionState {
    /// The database connection for managing transactions.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for TransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}
