// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Symbol Builders - orientation glyphs
//!
//! Each builder turns one orientation measured at a point into polylines.
//! Planar symbols extend `length / 2` from the center along strike with ticks
//! half that long; lineations use `length / 4`. Dip and plunge lower the
//! down-dip end of a tick by `sin(angle)` and shorten its horizontal reach by
//! `cos(angle)`, so the symbol reads as a small 3D plane or line.

use geosym_core::{LatLng, Orientation};

use crate::glyph::{format_degrees, vertex, AltitudeMode, Glyph, GlyphKind, Label, Polyline, Shape, Vertex};
use crate::router::SymbolBuilder;
use crate::spherical::compute_offset;

/// Placement of one symbol
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SymbolFrame {
    /// Observation position
    pub center: LatLng,
    /// Altitude of the symbol's horizontal plane
    pub base_altitude: f64,
    /// Overall symbol length in meters
    pub length: f64,
    /// Sphere radius for offsets
    pub earth_radius: f64,
    pub altitude_mode: AltitudeMode,
}

impl SymbolFrame {
    /// Horizontal point `distance` meters from the center along `heading`
    #[inline]
    pub fn offset(&self, distance: f64, heading: f64) -> LatLng {
        compute_offset(self.center, distance, heading, self.earth_radius)
    }

    /// Offset point lifted to `altitude`
    #[inline]
    fn at(&self, distance: f64, heading: f64, altitude: f64) -> Vertex {
        vertex(self.offset(distance, heading), altitude)
    }

    /// The center at `altitude`
    #[inline]
    fn center_at(&self, altitude: f64) -> Vertex {
        vertex(self.center, altitude)
    }

    fn glyph(&self, kind: GlyphKind, lines: Vec<Polyline>, label: Option<Label>) -> Glyph {
        Glyph {
            kind,
            shape: Shape::Polylines(lines),
            altitude_mode: self.altitude_mode,
            label,
        }
    }
}

/// Plane dipping 90°: strike line, perpendicular tick and a vertical tick
/// hanging below the center
#[derive(Debug, Default, Clone, Copy)]
pub struct VerticalPlaneBuilder;

impl SymbolBuilder for VerticalPlaneBuilder {
    fn kind(&self) -> GlyphKind {
        GlyphKind::VerticalPlane
    }

    fn build(&self, frame: &SymbolFrame, orientation: Orientation) -> Glyph {
        let unit = frame.length / 2.0;
        let h = frame.base_altitude;
        let strike = orientation.strike;

        let strike_line = Polyline::new([
            frame.at(unit, strike, h),
            frame.at(unit, strike + 180.0, h),
        ]);
        let tick = Polyline::new([
            frame.at(unit / 2.0, strike + 90.0, h),
            frame.at(unit / 2.0, strike + 270.0, h),
        ]);
        let plumb = Polyline::new([frame.center_at(h), frame.center_at(h - unit / 2.0)]);

        frame.glyph(self.kind(), vec![strike_line, tick, plumb], None)
    }
}

/// Bearing step of the horizontal-plane circle
const CIRCLE_STEP_DEGREES: usize = 10;

/// Plane dipping 0°: crossed circle at one altitude
#[derive(Debug, Default, Clone, Copy)]
pub struct HorizontalPlaneBuilder;

impl SymbolBuilder for HorizontalPlaneBuilder {
    fn kind(&self) -> GlyphKind {
        GlyphKind::HorizontalPlane
    }

    fn build(&self, frame: &SymbolFrame, orientation: Orientation) -> Glyph {
        let unit = frame.length / 2.0;
        let h = frame.base_altitude;
        let strike = orientation.strike;

        let strike_line = Polyline::new([
            frame.at(unit, strike, h),
            frame.at(unit, strike + 180.0, h),
        ]);
        let cross_line = Polyline::new([
            frame.at(unit, strike + 90.0, h),
            frame.at(unit, strike + 270.0, h),
        ]);
        // 0..=360 closes the ring: 37 vertices
        let circle = Polyline::new(
            (0..=360)
                .step_by(CIRCLE_STEP_DEGREES)
                .map(|step| frame.at(unit, strike + step as f64, h)),
        );

        frame.glyph(self.kind(), vec![strike_line, cross_line, circle], None)
    }
}

/// Inclined plane: strike line with a dip tick, labelled with the dip
#[derive(Debug, Default, Clone, Copy)]
pub struct StrikeDipBuilder;

impl SymbolBuilder for StrikeDipBuilder {
    fn kind(&self) -> GlyphKind {
        GlyphKind::StrikeDip
    }

    fn build(&self, frame: &SymbolFrame, orientation: Orientation) -> Glyph {
        let unit = frame.length / 2.0;
        let h = frame.base_altitude;
        let Orientation { strike, dip } = orientation;
        let (sin_dip, cos_dip) = dip.to_radians().sin_cos();

        let tick_altitude = h - unit / 2.0 * sin_dip;
        let tick = frame.at(unit / 2.0 * cos_dip, strike + 90.0, tick_altitude);

        let line = Polyline::new([
            frame.at(unit, strike, h),
            frame.center_at(h),
            tick,
            frame.center_at(h),
            frame.at(unit, strike + 180.0, h),
        ]);
        let label = Label {
            text: format_degrees(dip),
            position: tick,
        };

        frame.glyph(self.kind(), vec![line], Some(label))
    }
}

/// Share of the shaft at which the arrowhead barbs attach
const ARROW_POSITION: f64 = 0.7;

/// Half-width of the arrowhead relative to the shaft half-length
const ARROW_HALF_WIDTH: f64 = 0.1;

/// Linear feature: shaft along the trend with an arrowhead at the
/// down-plunge end, labelled with the plunge
#[derive(Debug, Default, Clone, Copy)]
pub struct LineationBuilder;

impl SymbolBuilder for LineationBuilder {
    fn kind(&self) -> GlyphKind {
        GlyphKind::Lineation
    }

    fn build(&self, frame: &SymbolFrame, orientation: Orientation) -> Glyph {
        let unit = frame.length / 4.0;
        let h = frame.base_altitude;
        let Orientation {
            strike: trend,
            dip: plunge,
        } = orientation;
        let (sin_plunge, cos_plunge) = plunge.to_radians().sin_cos();
        let reach = cos_plunge * unit;

        let down = frame.at(reach, trend, h - unit * sin_plunge);
        let up = frame.at(reach, trend + 180.0, h + unit * sin_plunge);

        let arrow_base = frame.offset(reach * ARROW_POSITION, trend);
        let barb_altitude = h - unit * ARROW_POSITION * sin_plunge;
        let barb = |heading: f64| {
            let at = compute_offset(arrow_base, reach * ARROW_HALF_WIDTH, heading, frame.earth_radius);
            vertex(at, barb_altitude)
        };

        let shaft = Polyline::new([down, up]);
        let arrow = Polyline::new([barb(trend - 90.0), down, barb(trend + 90.0)]);
        let label = Label {
            text: format_degrees(plunge),
            position: down,
        };

        frame.glyph(self.kind(), vec![shaft, arrow], Some(label))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spherical::{compute_distance, compute_heading, MEAN_EARTH_RADIUS};
    use approx::assert_relative_eq;

    fn frame() -> SymbolFrame {
        SymbolFrame {
            center: LatLng::new(10.0, 20.0),
            base_altitude: 50.0,
            length: 50.0,
            earth_radius: MEAN_EARTH_RADIUS,
            altitude_mode: AltitudeMode::RelativeToGround,
        }
    }

    fn horizontal_distance(a: &Vertex, b: &Vertex) -> f64 {
        compute_distance(LatLng::new(a.y, a.x), LatLng::new(b.y, b.x), MEAN_EARTH_RADIUS)
    }

    #[test]
    fn test_strike_dip_shape() {
        let glyph = StrikeDipBuilder.build(&frame(), Orientation::new(45.0, 30.0));
        let lines = glyph.polylines();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].len(), 5);

        let v = &lines[0].vertices;
        assert_eq!(v[1], Vertex::new(20.0, 10.0, 50.0));
        assert_eq!(v[1], v[3]);
        assert_relative_eq!(horizontal_distance(&v[0], &v[1]), 25.0, epsilon = 1e-6);
        assert_relative_eq!(horizontal_distance(&v[4], &v[1]), 25.0, epsilon = 1e-6);

        // Dip tick: 12.5 m foreshortened by cos(30°), lowered by 12.5·sin(30°)
        let reach = 12.5 * 30f64.to_radians().cos();
        assert_relative_eq!(horizontal_distance(&v[1], &v[2]), reach, epsilon = 1e-6);
        assert_relative_eq!(v[2].z, 50.0 - 6.25, epsilon = 1e-9);
        let center = LatLng::new(10.0, 20.0);
        assert_relative_eq!(
            compute_heading(center, LatLng::new(v[2].y, v[2].x)),
            135.0,
            epsilon = 1e-4
        );
    }

    #[test]
    fn test_strike_dip_label() {
        let glyph = StrikeDipBuilder.build(&frame(), Orientation::new(45.0, 30.0));
        let label = glyph.label.as_ref().expect("dip label");
        assert_eq!(label.text, "30");
        assert_eq!(label.position, glyph.polylines()[0].vertices[2]);
    }

    #[test]
    fn test_vertical_plane_shape() {
        let glyph = VerticalPlaneBuilder.build(&frame(), Orientation::new(10.0, 90.0));
        let lines = glyph.polylines();
        assert_eq!(lines.len(), 3);
        assert!(lines.iter().all(|l| l.len() == 2));
        assert_relative_eq!(
            horizontal_distance(&lines[1].vertices[0], &lines[1].vertices[1]),
            25.0,
            epsilon = 1e-6
        );
        assert_eq!(lines[2].vertices[0], Vertex::new(20.0, 10.0, 50.0));
        assert_eq!(lines[2].vertices[1], Vertex::new(20.0, 10.0, 37.5));
        assert!(glyph.label.is_none());
    }

    #[test]
    fn test_horizontal_plane_shape() {
        let glyph = HorizontalPlaneBuilder.build(&frame(), Orientation::new(10.0, 0.0));
        let lines = glyph.polylines();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0].len(), 2);
        assert_eq!(lines[1].len(), 2);
        assert_eq!(lines[2].len(), 37);
        assert!(lines.iter().flat_map(|l| l.vertices.iter()).all(|v| v.z == 50.0));

        let ring = &lines[2].vertices;
        assert_relative_eq!(ring[0].x, ring[36].x, epsilon = 1e-9);
        assert_relative_eq!(ring[0].y, ring[36].y, epsilon = 1e-9);
        let center = Vertex::new(20.0, 10.0, 50.0);
        for v in ring.iter() {
            assert_relative_eq!(horizontal_distance(&center, v), 25.0, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_lineation_shape() {
        let glyph = LineationBuilder.build(&frame(), Orientation::new(90.0, 30.0));
        let lines = glyph.polylines();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].len(), 2);
        assert_eq!(lines[1].len(), 3);

        let unit = 12.5;
        let sin = 30f64.to_radians().sin();
        let down = lines[0].vertices[0];
        let up = lines[0].vertices[1];
        assert_relative_eq!(down.z, 50.0 - unit * sin, epsilon = 1e-9);
        assert_relative_eq!(up.z, 50.0 + unit * sin, epsilon = 1e-9);
        assert!(down.x > up.x);

        // Arrow tip is the down-plunge end
        assert_eq!(lines[1].vertices[1], down);
        assert_relative_eq!(lines[1].vertices[0].z, 50.0 - unit * 0.7 * sin, epsilon = 1e-9);

        let label = glyph.label.expect("plunge label");
        assert_eq!(label.text, "30");
        assert_eq!(label.position, down);
    }

    #[test]
    fn test_vertical_lineation_collapses_horizontally() {
        let glyph = LineationBuilder.build(&frame(), Orientation::new(0.0, 90.0));
        let shaft = &glyph.polylines()[0].vertices;
        assert!(horizontal_distance(&shaft[0], &shaft[1]) < 1e-6);
        assert_relative_eq!(shaft[1].z - shaft[0].z, 25.0, epsilon = 1e-9);
    }

    #[test]
    fn test_out_of_range_angles_are_accepted() {
        let glyph = StrikeDipBuilder.build(&frame(), Orientation::new(400.0, 120.0));
        assert_eq!(glyph.polylines()[0].len(), 5);
        assert!(glyph
            .polylines()[0]
            .vertices
            .iter()
            .all(|v| v.x.is_finite() && v.y.is_finite() && v.z.is_finite()));
    }
}
