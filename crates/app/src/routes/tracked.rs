//! Tracked product (local mirror) route handlers.
//!
//! These endpoints keep the original embedded-app wire contract: field names
//! `product_id`/`name_store`, POST for deletes, and Laravel-style field-level
//! validation errors.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use storekeeper_core::{RemoteProductId, TrackedProductId};

use crate::{
    db::{TrackedProduct, TrackedProductRepository},
    error::{ApiError, ValidationErrors},
    state::AppState,
};

/// Request to track a remote product.
#[derive(Debug, Deserialize)]
pub struct AddProductRequest {
    pub product_id: Option<String>,
    pub name_store: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// Request to overwrite a tracked product.
#[derive(Debug, Deserialize)]
pub struct UpdateProductRequest {
    pub id: Option<i32>,
    pub product_id: Option<String>,
    pub name_store: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// Request to untrack a remote product.
#[derive(Debug, Deserialize)]
pub struct DeleteProductRequest {
    pub product_id: Option<String>,
}

/// Response for delete operations.
#[derive(Debug, Serialize)]
pub struct DeleteProductResponse {
    pub success: bool,
}

/// Response for the theme-proxy description lookup.
#[derive(Debug, Serialize)]
pub struct DescriptionResponse {
    pub description: Option<String>,
}

/// Validate a required remote product id field.
fn require_product_id(
    value: Option<&str>,
    errors: &mut ValidationErrors,
) -> Option<RemoteProductId> {
    match value {
        None | Some("") => {
            errors.add("product_id", "product_id is required");
            None
        }
        Some(raw) => match RemoteProductId::parse(raw) {
            Ok(id) => Some(id),
            Err(e) => {
                errors.add("product_id", e.to_string());
                None
            }
        },
    }
}

/// Validate a required store name field.
fn require_name_store(value: Option<&str>, errors: &mut ValidationErrors) -> Option<String> {
    match value {
        None | Some("") => {
            errors.add("name_store", "name_store is required");
            None
        }
        Some(name) => Some(name.to_owned()),
    }
}

/// Track a remote product.
///
/// # Errors
///
/// Returns 422 on validation failure and 409 if the product is already
/// tracked.
#[instrument(skip(state, body))]
pub async fn add(
    State(state): State<AppState>,
    Json(body): Json<AddProductRequest>,
) -> Result<(StatusCode, Json<TrackedProduct>), ApiError> {
    let mut errors = ValidationErrors::new();
    let product_id = require_product_id(body.product_id.as_deref(), &mut errors);
    let name_store = require_name_store(body.name_store.as_deref(), &mut errors);
    errors.into_result()?;

    // Both are Some once validation passed
    let (Some(product_id), Some(name_store)) = (product_id, name_store) else {
        return Err(ApiError::Internal("validation invariant broken".to_string()));
    };

    let record = TrackedProductRepository::new(state.pool())
        .create(&product_id, &name_store, body.description.as_deref())
        .await?;

    tracing::info!(product_id = %record.product_id, "product tracked");
    Ok((StatusCode::CREATED, Json(record)))
}

/// Overwrite a tracked product.
///
/// # Errors
///
/// Returns 422 on validation failure, 404 if the local id does not exist,
/// and 409 if the new `product_id` collides with another record.
#[instrument(skip(state, body))]
pub async fn update(
    State(state): State<AppState>,
    Json(body): Json<UpdateProductRequest>,
) -> Result<Json<TrackedProduct>, ApiError> {
    let mut errors = ValidationErrors::new();
    if body.id.is_none() {
        errors.add("id", "id is required");
    }
    let product_id = require_product_id(body.product_id.as_deref(), &mut errors);
    let name_store = require_name_store(body.name_store.as_deref(), &mut errors);
    errors.into_result()?;

    let (Some(id), Some(product_id), Some(name_store)) = (body.id, product_id, name_store) else {
        return Err(ApiError::Internal("validation invariant broken".to_string()));
    };

    let record = TrackedProductRepository::new(state.pool())
        .update(
            TrackedProductId::new(id),
            &product_id,
            &name_store,
            body.description.as_deref(),
        )
        .await?;

    tracing::info!(id = %record.id, "tracked product updated");
    Ok(Json(record))
}

/// Untrack a remote product by its remote product id.
///
/// # Errors
///
/// Returns 422 on validation failure and 404 if the product is not tracked.
#[instrument(skip(state, body))]
pub async fn delete(
    State(state): State<AppState>,
    Json(body): Json<DeleteProductRequest>,
) -> Result<Json<DeleteProductResponse>, ApiError> {
    let mut errors = ValidationErrors::new();
    let product_id = require_product_id(body.product_id.as_deref(), &mut errors);
    errors.into_result()?;

    let Some(product_id) = product_id else {
        return Err(ApiError::Internal("validation invariant broken".to_string()));
    };

    TrackedProductRepository::new(state.pool())
        .delete_by_remote_id(&product_id)
        .await?;

    tracing::info!(product_id = %product_id, "product untracked");
    Ok(Json(DeleteProductResponse { success: true }))
}

/// List all tracked products.
///
/// # Errors
///
/// Returns 500 if the database query fails.
#[instrument(skip(state))]
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<TrackedProduct>>, ApiError> {
    let records = TrackedProductRepository::new(state.pool()).list().await?;

    Ok(Json(records))
}

/// Description lookup for the theme app proxy.
///
/// # Errors
///
/// Returns 404 if the product is not tracked.
#[instrument(skip(state))]
pub async fn description(
    State(state): State<AppState>,
    Path(product_id): Path<String>,
) -> Result<Json<DescriptionResponse>, ApiError> {
    let product_id = RemoteProductId::parse(&product_id)
        .map_err(|e| ApiError::BadRequest(e.to_string()))?;

    let record = TrackedProductRepository::new(state.pool())
        .get_by_remote_id(&product_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Product not found".to_string()))?;

    Ok(Json(DescriptionResponse {
        description: record.description,
    }))
}
