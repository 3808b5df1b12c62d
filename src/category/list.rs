//! Endpoints for reading categories.

use axum::{
    Json,
    extract::{Path, State, rejection::PathRejection},
};

use crate::{
    CategoryId, Error,
    category::{Category, CategoryState, get_all_categories, get_category},
};

/// Handle a request for every category.
pub async fn get_categories_endpoint(
    State(state): State<CategoryState>,
) -> Result<Json<Vec<Category>>, Error> {
    let connection = state.lock_connection()?;

    get_all_categories(&connection).map(Json)
}

/// Handle a request for a single category.
///
/// Non-numeric IDs are rejected with `400 Bad Request` and unknown IDs with
/// `404 Not Found`.
pub async fn get_category_endpoint(
    State(state): State<CategoryState>,
    category_id: Result<Path<CategoryId>, PathRejection>,
) -> Result<Json<Category>, Error> {
    let Path(category_id) =
        category_id.map_err(|rejection| Error::InvalidRequest(rejection.body_text()))?;

    let connection = state.lock_connection()?;

    get_category(category_id, &connection).map(Json)
}
