// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Tag color store endpoints.

use axum::{extract::State, Json};
use geosym_core::{is_hex_color, TagPalette};

use crate::{
    error::ApiError,
    types::{ColorUpdateRequest, ColorsResponse},
    AppState,
};

/// GET /api/v1/colors - Stored tag color overrides.
pub async fn list(State(state): State<AppState>) -> Result<Json<ColorsResponse>, ApiError> {
    let store = state.colors.clone();
    let colors = tokio::task::spawn_blocking(move || store.colors()).await??;
    Ok(Json(ColorsResponse { colors }))
}

/// PUT /api/v1/colors - Merge tag color overrides into the store.
///
/// Tags not named in the request keep their stored color.
pub async fn update(
    State(state): State<AppState>,
    Json(request): Json<ColorUpdateRequest>,
) -> Result<Json<ColorsResponse>, ApiError> {
    if let Some(bad) = request
        .colors
        .iter()
        .find(|c| c.tag.trim().is_empty() || !is_hex_color(&c.color))
    {
        return Err(ApiError::InvalidColor {
            tag: bad.tag.clone(),
            color: bad.color.clone(),
        });
    }

    let count = request.colors.len();
    let store = state.colors.clone();
    let colors = tokio::task::spawn_blocking(move || -> Result<_, ApiError> {
        TagPalette::new(store.clone()).persist(&request.colors)?;
        store.colors()
    })
    .await??;
    tracing::info!(count, "Updated tag colors");

    Ok(Json(ColorsResponse { colors }))
}
