//! Defines the endpoint for reading a stored transaction.

use axum::{
    Json,
    extract::{Path, State, rejection::PathRejection},
};

use crate::{
    Error, TransactionId,
    transaction::{Transaction, TransactionState, get_transaction},
};

/// A route handler for getting a transaction and its details by ID.
pub async fn get_transaction_endpoint(
    State(state): State<TransactionState>,
    transaction_id: Result<Path<TransactionId>, PathRejection>,
) -> Result<Json<Transaction>, Error> {
    let Path(transaction_id) =
        transaction_id.map_err(|rejection| Error::InvalidRequest(rejection.body_text()))?;

    let connection = state.db_connection.lock().map_err(|error| {
        tracing::error!("could not acquire database lock: {error}");
        Error::DatabaseLockError
    })?;

    get_transaction(transaction_id, &connection).map(Json)
}
