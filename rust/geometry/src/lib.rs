// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! GeoSym Symbol Geometry
//!
//! Converts strike/dip and trend/plunge measurements into 3D polylines placed
//! on a sphere, using nalgebra points for vertices.

pub mod error;
pub mod glyph;
pub mod router;
pub mod spherical;
pub mod symbols;

// Re-export nalgebra types for convenience
pub use nalgebra::Point3;

pub use error::{Error, Result};
pub use glyph::{format_degrees, vertex, AltitudeMode, Glyph, GlyphKind, Label, Polyline, Shape, Vertex};
pub use router::{SymbolBuilder, SymbolInput, SymbolRouter, SymbolSettings};
pub use spherical::{compute_distance, compute_heading, compute_offset, wrap_longitude, MEAN_EARTH_RADIUS};
pub use symbols::{
    HorizontalPlaneBuilder, LineationBuilder, StrikeDipBuilder, SymbolFrame, VerticalPlaneBuilder,
};
