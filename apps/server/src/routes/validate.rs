// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Upload validation endpoint.

use axum::{
    extract::{Multipart, State},
    Json,
};

use crate::{
    error::ApiError, routes::extract_upload, services::csv::load_dataset,
    types::ValidateResponse, AppState,
};

/// POST /api/v1/validate - Per-cell range check of an uploaded CSV.
pub async fn validate(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ValidateResponse>, ApiError> {
    let upload = extract_upload(&mut multipart).await?;
    let store = state.colors.clone();

    let response = tokio::task::spawn_blocking(move || -> Result<ValidateResponse, ApiError> {
        let ds = load_dataset(&upload.content, store)?;
        let grid = ds.validation_grid();
        let invalid_cells = grid
            .iter()
            .flatten()
            .filter(|verdict| **verdict == Some(false))
            .count();
        let rows_without_position = ds
            .rows()
            .iter()
            .filter(|row| ds.get_lat_lng_alt(row).is_none())
            .count();

        Ok(ValidateResponse {
            schema: ds.schema().name(),
            headers: ds.headers().to_vec(),
            row_count: ds.len(),
            invalid_cells,
            rows_without_position,
            grid,
            tags: ds.tag_colors().to_vec(),
        })
    })
    .await??;

    tracing::info!(
        rows = response.row_count,
        invalid_cells = response.invalid_cells,
        "Validated upload"
    );
    Ok(Json(response))
}

