// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Glyph data structures
//!
//! A glyph is the geometry of one observation: either a single point or a set
//! of polylines, plus an optional text label. Vertices are
//! `Point3 { x: lng, y: lat, z: altitude }`.

use std::fmt;

use geosym_core::LatLng;
use nalgebra::Point3;
use smallvec::SmallVec;

/// Symbol vertex: longitude, latitude (degrees) and altitude (meters)
pub type Vertex = Point3<f64>;

/// Build a vertex from a horizontal position and an altitude
#[inline]
pub fn vertex(at: LatLng, altitude: f64) -> Vertex {
    Vertex::new(at.lng, at.lat, altitude)
}

/// How altitudes of a glyph are interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AltitudeMode {
    /// Draped on the terrain; altitudes are ignored
    ClampToGround,
    /// Meters above the terrain
    RelativeToGround,
    /// Meters above sea level
    Absolute,
}

impl AltitudeMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            AltitudeMode::ClampToGround => "clampToGround",
            AltitudeMode::RelativeToGround => "relativeToGround",
            AltitudeMode::Absolute => "absolute",
        }
    }
}

/// Symbol family produced for a row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GlyphKind {
    /// Plain location marker
    Point,
    /// Recorded trace geometry
    Line,
    /// Plane dipping exactly 90°
    VerticalPlane,
    /// Plane dipping exactly 0°
    HorizontalPlane,
    /// Any other plane
    StrikeDip,
    /// Linear feature with trend and plunge
    Lineation,
}

impl fmt::Display for GlyphKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            GlyphKind::Point => "point",
            GlyphKind::Line => "line",
            GlyphKind::VerticalPlane => "vertical plane",
            GlyphKind::HorizontalPlane => "horizontal plane",
            GlyphKind::StrikeDip => "strike and dip",
            GlyphKind::Lineation => "lineation",
        };
        f.write_str(name)
    }
}

/// Ordered vertex list drawn as one connected line
#[derive(Debug, Clone, PartialEq)]
pub struct Polyline {
    pub vertices: SmallVec<[Vertex; 5]>,
}

impl Polyline {
    pub fn new<I: IntoIterator<Item = Vertex>>(vertices: I) -> Self {
        Self {
            vertices: vertices.into_iter().collect(),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }
}

/// Geometry of a glyph
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Point(Vertex),
    Polylines(Vec<Polyline>),
}

/// Text placed next to a symbol, e.g. the dip value
#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    pub text: String,
    pub position: Vertex,
}

/// One observation's symbol
#[derive(Debug, Clone, PartialEq)]
pub struct Glyph {
    pub kind: GlyphKind,
    pub shape: Shape,
    pub altitude_mode: AltitudeMode,
    pub label: Option<Label>,
}

impl Glyph {
    /// Polylines of the glyph; empty for point glyphs
    pub fn polylines(&self) -> &[Polyline] {
        match &self.shape {
            Shape::Polylines(lines) => lines,
            Shape::Point(_) => &[],
        }
    }

    /// Whether the glyph represents a measured orientation
    pub fn is_oriented(&self) -> bool {
        !matches!(self.kind, GlyphKind::Point | GlyphKind::Line)
    }
}

/// Format a measurement for a label: integral values print without decimals
pub fn format_degrees(value: f64) -> String {
    format!("{}", value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertex_axis_order() {
        let v = vertex(LatLng::new(10.0, 20.0), 50.0);
        assert_eq!(v.x, 20.0);
        assert_eq!(v.y, 10.0);
        assert_eq!(v.z, 50.0);
    }

    #[test]
    fn test_point_has_no_polylines() {
        let glyph = Glyph {
            kind: GlyphKind::Point,
            shape: Shape::Point(Vertex::origin()),
            altitude_mode: AltitudeMode::RelativeToGround,
            label: None,
        };
        assert!(glyph.polylines().is_empty());
        assert!(!glyph.is_oriented());
    }

    #[test]
    fn test_format_degrees() {
        assert_eq!(format_degrees(30.0), "30");
        assert_eq!(format_degrees(12.5), "12.5");
        assert_eq!(format_degrees(-0.25), "-0.25");
    }

    #[test]
    fn test_altitude_mode_names() {
        assert_eq!(AltitudeMode::ClampToGround.as_str(), "clampToGround");
        assert_eq!(AltitudeMode::Absolute.as_str(), "absolute");
    }
}
