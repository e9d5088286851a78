// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for dataset operations.

use thiserror::Error;

/// Result type for dataset operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while loading or querying a dataset
#[derive(Error, Debug)]
pub enum Error {
    /// Rows were supplied without a header row and no schema was set.
    #[error("no header schema set: call set_header first or load rows with a header row")]
    SchemaNotSet,

    /// A header row was requested but the row set was empty.
    #[error("row set is empty, expected a header row")]
    MissingHeaderRow,

    /// A LINESTRING cell carried the marker but a coordinate could not be read.
    #[error("malformed LINESTRING geometry: {0}")]
    MalformedLine(String),

    /// The persisted tag color blob could not be decoded or encoded.
    #[error("tag color store error: {0}")]
    ColorStore(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
