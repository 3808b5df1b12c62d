//! Category deletion endpoint.

use axum::{
    Json,
    extract::{Path, State, rejection::PathRejection},
};
use serde_json::{Value, json};

use crate::{
    CategoryId, Error,
    category::{CategoryState, delete_category},
};

/// Handle category deletion.
pub async fn delete_category_endpoint(
    State(state): State<CategoryState>,
    category_id: Result<Path<CategoryId>, PathRejection>,
) -> Result<Json<Value>, Error> {
    let Path(category_id) =
        category_id.map_err(|rejection| Error::InvalidRequest(rejection.body_text()))?;

    let connection = state.lock_connection()?;

    delete_category(category_id, &connection)?;
    tracing::info!("Deleted category {category_id}");

    Ok(Json(json!({ "message": "Deleted" })))
}
