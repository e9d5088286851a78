// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! GeoSym export pipeline
//!
//! Shared by the HTTP server and library users:
//!
//! - [`ExportOptions`]: symbol size, grouping and altitude settings
//! - [`export`] / [`export_with_elevation`]: dataset → KML document
//! - [`ElevationService`]: injected batch elevation lookup

pub mod document;
pub mod elevation;
pub mod error;
pub mod kml;
pub mod options;
pub mod pipeline;
pub mod popup;
pub mod style;

pub use document::{Document, DocumentBuilder, Placemark};
pub use elevation::{
    augment_elevation, elevation_candidates, ElevationOutcome, ElevationService, MAX_ELEVATION_BATCH,
};
pub use error::{Error, Result};
pub use kml::KmlWriter;
pub use options::ExportOptions;
pub use pipeline::{export, export_with_elevation, ExportReport};
pub use popup::describe;
pub use style::{kml_color, write_styles};
