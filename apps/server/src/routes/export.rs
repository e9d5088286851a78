// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! KML export endpoint.

use axum::{
    extract::{Multipart, State},
    http::{header, HeaderName, HeaderValue},
    response::{IntoResponse, Response},
};
use geosym_processing::{export_with_elevation, ExportOptions};

use crate::{error::ApiError, routes::extract_upload, services::csv::load_dataset, AppState};

pub const KML_CONTENT_TYPE: &str = "application/vnd.google-earth.kml+xml";

/// Outcome of the elevation lookup (`disabled`, `applied:N`, ...)
pub const ELEVATION_STATUS: HeaderName = HeaderName::from_static("x-elevation-status");
pub const PLACEMARK_COUNT: HeaderName = HeaderName::from_static("x-placemark-count");
pub const SKIPPED_ROWS: HeaderName = HeaderName::from_static("x-skipped-rows");

/// Attachment file name for a document name.
fn file_stem(document_name: &str) -> String {
    let stem: String = document_name
        .trim()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | ' ') {
                c
            } else {
                '_'
            }
        })
        .collect();
    if stem.is_empty() {
        "file".to_string()
    } else {
        stem
    }
}

/// POST /api/v1/export - Convert an uploaded CSV into a KML document.
///
/// Form fields: `file` (CSV, first row is the header) and an optional
/// `options` JSON object.
pub async fn export(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Response, ApiError> {
    let upload = extract_upload(&mut multipart).await?;
    let options = match upload.options.as_deref().map(str::trim) {
        Some(json) if !json.is_empty() => ExportOptions::from_json(json)?,
        _ => ExportOptions::default(),
    };

    let store = state.colors.clone();
    let content = upload.content;
    let mut ds = tokio::task::spawn_blocking(move || load_dataset(&content, store)).await??;

    let report = export_with_elevation(&mut ds, &options, state.elevation.as_deref()).await?;

    tracing::info!(
        rows = ds.len(),
        placemarks = report.placemarks,
        skipped = report.skipped,
        elevation = %report.elevation,
        "Exported upload"
    );

    let disposition = format!(
        "attachment; filename=\"{}.kml\"",
        file_stem(&options.document_name)
    );
    let disposition =
        HeaderValue::from_str(&disposition).map_err(|e| ApiError::Internal(e.to_string()))?;
    let elevation = HeaderValue::from_str(&report.elevation.to_string())
        .map_err(|e| ApiError::Internal(e.to_string()))?;

    let mut response = report.kml.into_response();
    let headers = response.headers_mut();
    headers.insert(header::CONTENT_TYPE, HeaderValue::from_static(KML_CONTENT_TYPE));
    headers.insert(header::CONTENT_DISPOSITION, disposition);
    headers.insert(ELEVATION_STATUS, elevation);
    headers.insert(PLACEMARK_COUNT, HeaderValue::from(report.placemarks));
    headers.insert(SKIPPED_ROWS, HeaderValue::from(report.skipped));

    Ok(response)
}
