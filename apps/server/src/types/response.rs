// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Response types.

use geosym_core::TagColor;
use serde::Serialize;

/// Validation result for one uploaded file.
#[derive(Debug, Serialize)]
pub struct ValidateResponse {
    /// Detected header layout.
    pub schema: &'static str,
    pub headers: Vec<String>,
    pub row_count: usize,
    /// Cells holding an out-of-range or non-numeric measurement.
    pub invalid_cells: usize,
    /// Rows that have neither a latitude/longitude pair nor a line.
    pub rows_without_position: usize,
    /// Per-cell verdict; `null` for columns without a range.
    pub grid: Vec<Vec<Option<bool>>>,
    /// Tag colors used by this file.
    pub tags: Vec<TagColor>,
}

/// Stored tag colors.
#[derive(Debug, Serialize)]
pub struct ColorsResponse {
    pub colors: Vec<TagColor>,
}
