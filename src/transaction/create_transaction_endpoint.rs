//! Defines the endpoint for checking out a new transaction.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header::LOCATION},
    response::{IntoResponse, Response},
};

use crate::{
    Error,
    endpoints::{self, format_endpoint},
    transaction::{CheckoutRequest, TransactionState, create_transaction},
};

/// A route handler for checking out a list of items.
///
/// Responds with `201 Created` and the stored transaction on success.
pub async fn create_transaction_endpoint(
    State(state): State<TransactionState>,
    payload: Result<Json<CheckoutRequest>, JsonRejection>,
) -> Result<Response, Error> {
    let Json(request) =
        payload.map_err(|rejection| Error::InvalidRequest(rejection.body_text()))?;

    let connection = state.db_connection.lock().map_err(|error| {
        tracing::error!("could not acquire database lock: {error}");
        Error::DatabaseLockError
    })?;

    let transaction = create_transaction(&request.items, &connection).inspect_err(|error| {
        tracing::info!("Checkout of {} items failed: {error}", request.items.len())
    })?;

    tracing::info!(
        "Created transaction {} with total amount {}",
        transaction.id,
        transaction.total_amount
    );

    let location = format_endpoint(endpoints::TRANSACTION, transaction.id);

    Ok((StatusCode::CREATED, [(LOCATION, location)], Json(transaction)).into_response())
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::{
        Json,
        extract::State,
        http::{StatusCode, header::LOCATION},
    };
    use rusqlite::Connection;

    use crate::{
        Error,
        category::{CategoryName, NewCategory, create_category},
        db::initialize,
        transaction::{
            CheckoutItem, CheckoutRequest, Transaction, TransactionState,
            create_transaction_endpoint, get_transaction,
        },
        test_utils::{get_header, parse_json_body},
    };

    fn get_test_state() -> TransactionState {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();

        for name in ["Duelist", "Controller"] {
            create_category(
                NewCategory {
                    name: CategoryName::new_unchecked(name),
                    description: String::new(),
                },
                &conn,
            )
            .unwrap();
        }

        TransactionState {
            db_connection: Arc::new(Mutex::new(conn)),
        }
    }

    fn checkout(items: &[(i64, i64)]) -> CheckoutRequest {
        CheckoutRequest {
            items: items
                .iter()
                .map(|&(category_id, quantity)| CheckoutItem {
                    category_id,
                    quantity,
                })
                .collect(),
        }
    }

    #[tokio::test]
    async fn can_create_transaction() {
        let state = get_test_state();

        let response =
            create_transaction_endpoint(State(state.clone()), Ok(Json(checkout(&[(1, 2), (2, 3)]))))
                .await
                .expect("Could not create transaction");

        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(get_header(&response, LOCATION.as_str()), "/transactions/1");

        let body: Transaction = serde_json::from_value(parse_json_body(response).await).unwrap();
        assert_eq!(body.total_amount, 5);
        assert_eq!(body.details.len(), 2);

        let connection = state.db_connection.lock().unwrap();
        assert_eq!(get_transaction(body.id, &connection), Ok(body));
    }

    #[tokio::test]
    async fn unknown_category_is_rejected() {
        let state = get_test_state();

        let result =
            create_transaction_endpoint(State(state), Ok(Json(checkout(&[(99, 1)])))).await;

        assert_eq!(result.err(), Some(Error::CategoryNotFound(99)));
    }

    #[tokio::test]
    async fn non_positive_quantity_is_rejected() {
        let state = get_test_state();

        let result =
            create_transaction_endpoint(State(state), Ok(Json(checkout(&[(1, 0)])))).await;

        assert_eq!(
            result.err(),
            Some(Error::InvalidQuantity {
                category_id: 1,
                quantity: 0
            })
        );
    }
}
