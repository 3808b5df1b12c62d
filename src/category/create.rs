//! Category creation endpoint.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header::LOCATION},
    response::{IntoResponse, Response},
};

use crate::{
    Error,
    category::{CategoryState, NewCategory, create_category},
    endpoints::{self, format_endpoint},
};

/// Handle a request to create a category.
///
/// Responds with `201 Created`, the new category, and its location.
pub async fn create_category_endpoint(
    State(state): State<CategoryState>,
    payload: Result<Json<NewCategory>, JsonRejection>,
) -> Result<Response, Error> {
    let Json(new_category) =
        payload.map_err(|rejection| Error::InvalidRequest(rejection.body_text()))?;

    let connection = state.lock_connection()?;
    let category = create_category(new_category, &connection)?;

    tracing::info!("Created category {} ({})", category.id, category.name);

    let location = format_endpoint(endpoints::CATEGORY, category.id);

    Ok((StatusCode::CREATED, [(LOCATION, location)], Json(category)).into_response())
}
