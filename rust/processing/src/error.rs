// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use thiserror::Error;

/// Result type for export operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while exporting a dataset
#[derive(Error, Debug)]
pub enum Error {
    #[error("KML write failed: {0}")]
    Xml(String),

    #[error("Elevation lookup failed: {0}")]
    Elevation(String),

    #[error("Invalid export options: {0}")]
    Options(#[from] serde_json::Error),

    #[error("Dataset error: {0}")]
    Core(#[from] geosym_core::Error),

    #[error("Symbol geometry error: {0}")]
    Geometry(#[from] geosym_geometry::Error),
}
