// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # GeoSym Core
//!
//! Tabular model for geological field observations.
//!
//! ## Overview
//!
//! - **Dataset**: rows of cell strings addressed by header name, with a
//!   column order that survives column removal
//! - **Schema adapters**: the spreadsheet export and the fixed legacy CSV
//!   layout, resolved to semantic [`Column`] roles
//! - **Tags**: presence-flag columns (`Tag:<name>`) classifying each row, with
//!   hash-derived colors and persisted user overrides
//! - **Orientation**: planar strike/dip and linear trend/plunge extraction,
//!   including the legacy dip-direction correction
//! - **Geometry cells**: `LINESTRING (...)` parsing with [nom](https://docs.rs/nom)
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use geosym_core::{Dataset, HeaderMode};
//!
//! let mut ds = Dataset::new();
//! ds.set_header(["Latitude", "Longitude", "Tag:Granite"]);
//! ds.set_data(vec![vec!["38.1".into(), "-78.4".into(), "X".into()]], HeaderMode::Preset)?;
//!
//! let row = ds.row(0).unwrap();
//! assert_eq!(ds.get_formation(row), "Granite");
//! ```

pub mod dataset;
pub mod error;
pub mod fast_parse;
pub mod orientation;
pub mod palette;
pub mod parser;
pub mod position;
pub mod schema;
pub mod undo;

pub use dataset::{Dataset, HeaderMode, Row};
pub use error::{Error, Result};
pub use fast_parse::{is_numeric, parse_number, parse_opt};
pub use orientation::{correct_strike, facing_correction, Orientation, OrientationKind, RowOrientation};
pub use palette::{
    hash_color, is_hex_color, ColorStore, MemoryColorStore, TagColor, TagPalette, COLOR_STORE_KEY,
    FALLBACK_COLOR,
};
pub use parser::{parse_linestring, LngLat, LINESTRING_MARKER};
pub use position::{LatLng, Position};
pub use schema::{
    detect_schema, tag_label, Column, LegacySchema, SchemaAdapter, SpreadsheetSchema,
    DEFAULT_TAG, TAG_MARKER, TAG_PREFIX,
};
pub use undo::{UndoStack, DEFAULT_UNDO_DEPTH};
