//! pos_rs is the backend for a point-of-sale till.
//!
//! This library provides a JSON REST API for managing the categories that can
//! be picked at the till, checking out a list of picked categories as a single
//! transaction, and reporting on the transactions made during the current day.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_server::Handle;
use serde_json::json;
use tokio::signal;

mod app_state;
mod category;
mod database_id;
mod db;
mod endpoints;
mod health;
mod logging;
mod not_found;
mod report;
mod routing;
mod timezone;
mod transaction;

#[cfg(test)]
mod test_utils;

pub use app_state::AppState;
pub use category::{Category, CategoryName, NewCategory, create_category};
pub use database_id::{CategoryId, DatabaseId, TransactionId};
pub use db::initialize as initialize_db;
pub use logging::{LOG_BODY_LENGTH_LIMIT, logging_middleware};
pub use report::{DailyCategoryReport, DayWindow, get_daily_report};
pub use routing::build_router;
pub use timezone::{LocalTimezone, parse_timezone};
pub use transaction::{CheckoutItem, Transaction, TransactionDetail, create_transaction};

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// A checkout item asked for zero or a negative number of picks.
    ///
    /// Checked before the database is touched.
    #[error("quantity {quantity} for category {category_id} must be greater than zero")]
    InvalidQuantity {
        /// The category the item refers to.
        category_id: CategoryId,
        /// The offending quantity.
        quantity: i64,
    },

    /// A checkout item referred to a category that does not exist.
    ///
    /// The whole checkout is rolled back.
    #[error("category {0} not found")]
    CategoryNotFound(CategoryId),

    /// The summed quantity of a checkout does not fit in the total amount.
    #[error("the total amount of the checkout is too large")]
    TotalOverflow,

    /// An empty string was used to create a category name.
    #[error("category name cannot be empty")]
    EmptyCategoryName,

    /// The request body or path could not be parsed.
    ///
    /// Callers should pass in the parser's message.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// The requested resource was not found.
    ///
    /// For HTTP request handlers, the client should check that the parameters
    /// (e.g., ID) are correct and that the resource has been created.
    ///
    /// Internally, this error may occur when a query returns no rows.
    #[error("the requested resource could not be found")]
    NotFound,

    /// Tried to update a category that does not exist
    #[error("tried to update a category that is not in the database")]
    UpdateMissingCategory,

    /// Tried to delete a category that does not exist
    #[error("tried to delete a category that is not in the database")]
    DeleteMissingCategory,

    /// The configured timezone is neither a UTC offset nor a canonical timezone name.
    #[error("invalid timezone {0}")]
    InvalidTimezone(String),

    /// An unhandled/unexpected SQL error.
    ///
    /// The error should only be logged on the server. Clients are told that an
    /// internal server error occurred.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// Could not acquire the database lock
    #[error("could not acquire the database lock")]
    DatabaseLockError,
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

impl Error {
    fn status_code(&self) -> StatusCode {
        match self {
            Error::InvalidQuantity { .. }
            | Error::CategoryNotFound(_)
            | Error::TotalOverflow
            | Error::EmptyCategoryName
            | Error::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            Error::NotFound | Error::UpdateMissingCategory | Error::DeleteMissingCategory => {
                StatusCode::NOT_FOUND
            }
            Error::InvalidTimezone(_) | Error::SqlError(_) | Error::DatabaseLockError => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status_code = self.status_code();

        let message = if status_code == StatusCode::INTERNAL_SERVER_ERROR {
            // Server-side errors are not intended to be shown to the client.
            tracing::error!("An unexpected error occurred: {}", self);
            "An unexpected error occurred, check the server logs for more details.".to_owned()
        } else {
            self.to_string()
        };

        (status_code, Json(json!({ "error": message }))).into_response()
    }
}
