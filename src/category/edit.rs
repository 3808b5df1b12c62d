//! Category update endpoint.

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection, rejection::PathRejection},
};

use crate::{
    CategoryId, Error,
    category::{Category, CategoryState, NewCategory, update_category},
};

/// Handle a request to replace a category's name and description.
pub async fn update_category_endpoint(
    State(state): State<CategoryState>,
    category_id: Result<Path<CategoryId>, PathRejection>,
    payload: Result<Json<NewCategory>, JsonRejection>,
) -> Result<Json<Category>, Error> {
    let Path(category_id) =
        category_id.map_err(|rejection| Error::InvalidRequest(rejection.body_text()))?;
    let Json(category) =
        payload.map_err(|rejection| Error::InvalidRequest(rejection.body_text()))?;

    let connection = state.lock_connection()?;

    let category = update_category(category_id, category, &connection)?;
    tracing::info!("Updated category {category_id}");

    Ok(Json(category))
}
