//! Generic CRUD handlers, instantiated once per entity type.
//!
//! Each request runs validate -> (factory cross-check) -> mutate/read ->
//! commit-or-rollback -> respond. Handlers hold no state between requests;
//! every call goes through the store.

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde_json::Value;

use crate::common::ApiError;
use crate::kernel::{resource, store, Entity};
use crate::server::app::AppState;

/// Routes for one resource: list/create on the collection, get/update/
/// delete on the item. The collection is reachable with and without the
/// trailing slash.
pub fn resource_routes<E: Entity + 'static>(path: &str) -> Router {
    let collection = get(list_resources::<E>).post(create_resource::<E>);
    let item = get(get_resource::<E>)
        .put(update_resource::<E>)
        .delete(delete_resource::<E>);

    Router::new()
        .route(path, collection.clone())
        .route(&format!("{path}/"), collection)
        .route(&format!("{path}/:id"), item)
}

/// List all rows of the entity.
async fn list_resources<E: Entity>(
    Extension(state): Extension<AppState>,
) -> Result<Json<Vec<E>>, ApiError> {
    let rows = store::list::<E>(&state.db_pool)
        .await
        .map_err(|e| e.context(format!("Error retrieving {}", E::META.table)))?;
    Ok(Json(rows))
}

/// Create a new row from the submitted field mapping.
async fn create_resource<E: Entity>(
    Extension(state): Extension<AppState>,
    Json(body): Json<Value>,
) -> Result<(StatusCode, Json<E>), ApiError> {
    let values = resource::validate_create(&E::META, &body)?;
    let row = store::insert::<E>(&values, &state.db_pool)
        .await
        .map_err(|e| e.context(format!("Error creating {}", E::META.name.to_lowercase())))?;
    Ok((StatusCode::CREATED, Json(row)))
}

/// Fetch a specific row by id.
async fn get_resource<E: Entity>(
    Extension(state): Extension<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<E>, ApiError> {
    let row = store::get::<E>(id, &state.db_pool)
        .await
        .map_err(|e| e.context(format!("Error retrieving {}", E::META.name.to_lowercase())))?;
    Ok(Json(row))
}

/// Apply a partial update to an existing row.
async fn update_resource<E: Entity>(
    Extension(state): Extension<AppState>,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> Result<Json<E>, ApiError> {
    let values = resource::validate_update(&E::META, &body)?;
    let row = store::update::<E>(id, &values, &state.db_pool)
        .await
        .map_err(|e| e.context(format!("Error updating {}", E::META.name.to_lowercase())))?;
    Ok(Json(row))
}

/// Delete a row by id, cascading to dependents where the entity has any.
async fn delete_resource<E: Entity>(
    Extension(state): Extension<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    store::delete::<E>(id, &state.db_pool)
        .await
        .map_err(|e| e.context(format!("Error deleting {}", E::META.name.to_lowercase())))?;
    Ok(StatusCode::NO_CONTENT)
}
