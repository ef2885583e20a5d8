//! Shop information route handler.

use axum::{Json, extract::State};
use tracing::instrument;

use crate::{error::ApiError, shopify::types::Shop, state::AppState};

/// Shop name, email, and domains for the embedded app home page.
///
/// # Errors
///
/// Returns 502 if the upstream request fails.
#[instrument(skip(state))]
pub async fn info(State(state): State<AppState>) -> Result<Json<Shop>, ApiError> {
    let shop = state.shopify().get_shop().await?;

    Ok(Json(shop))
}
