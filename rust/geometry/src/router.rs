// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Symbol Router - picks the glyph family for a row and dispatches to its builder
//!
//! Priority: no orientation and no line → point; line → the line itself;
//! planar → vertical (dip 90), horizontal (dip 0) or general strike-dip;
//! linear → lineation.

use std::sync::Arc;

use geosym_core::{LngLat, Orientation, Position, RowOrientation};
use rustc_hash::FxHashMap;

use crate::glyph::{vertex, AltitudeMode, Glyph, GlyphKind, Polyline, Shape, Vertex};
use crate::spherical::MEAN_EARTH_RADIUS;
use crate::symbols::{
    HorizontalPlaneBuilder, LineationBuilder, StrikeDipBuilder, SymbolFrame, VerticalPlaneBuilder,
};
use crate::{Error, Result};

/// Symbol builder trait
/// Each builder handles one oriented glyph family
pub trait SymbolBuilder: Send + Sync {
    /// Glyph family produced
    fn kind(&self) -> GlyphKind;

    /// Build the glyph for an orientation measured at the frame center
    fn build(&self, frame: &SymbolFrame, orientation: Orientation) -> Glyph;
}

/// Scale and altitude settings shared by every symbol of an export
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SymbolSettings {
    /// Symbol length in meters
    pub symbol_length: f64,
    /// Height of the symbol plane above the reference surface, in meters
    pub symbol_height: f64,
    /// Add the row altitude to symbol heights and write absolute altitudes
    pub use_altitude: bool,
    pub earth_radius: f64,
}

impl Default for SymbolSettings {
    fn default() -> Self {
        Self {
            symbol_length: 50.0,
            symbol_height: 50.0,
            use_altitude: false,
            earth_radius: MEAN_EARTH_RADIUS,
        }
    }
}

impl SymbolSettings {
    fn altitude_mode(&self) -> AltitudeMode {
        if self.use_altitude {
            AltitudeMode::Absolute
        } else {
            AltitudeMode::RelativeToGround
        }
    }

    /// Row elevation contributed to symbol altitudes
    fn elevation(&self, position: &Position) -> f64 {
        if self.use_altitude {
            position.altitude
        } else {
            0.0
        }
    }
}

/// Everything the router needs to know about one row
#[derive(Debug, Clone, Default)]
pub struct SymbolInput {
    pub position: Option<Position>,
    pub orientation: RowOrientation,
    pub line: Option<Vec<LngLat>>,
}

/// Symbol router - routes rows to glyph builders
pub struct SymbolRouter {
    settings: SymbolSettings,
    builders: FxHashMap<GlyphKind, Arc<dyn SymbolBuilder>>,
}

impl std::fmt::Debug for SymbolRouter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SymbolRouter")
            .field("settings", &self.settings)
            .field("builders", &self.builders.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl Default for SymbolRouter {
    fn default() -> Self {
        Self::new(SymbolSettings::default())
    }
}

impl SymbolRouter {
    /// Create new router with the default builders
    pub fn new(settings: SymbolSettings) -> Self {
        let mut router = Self {
            settings,
            builders: FxHashMap::default(),
        };
        router.register(Arc::new(VerticalPlaneBuilder));
        router.register(Arc::new(HorizontalPlaneBuilder));
        router.register(Arc::new(StrikeDipBuilder));
        router.register(Arc::new(LineationBuilder));
        router
    }

    /// Register a builder, replacing any builder of the same family
    pub fn register(&mut self, builder: Arc<dyn SymbolBuilder>) {
        self.builders.insert(builder.kind(), builder);
    }

    pub fn settings(&self) -> &SymbolSettings {
        &self.settings
    }

    /// Glyph family a row resolves to
    pub fn select(input: &SymbolInput) -> GlyphKind {
        if input.line.is_some() {
            return GlyphKind::Line;
        }
        match input.orientation {
            RowOrientation::None => GlyphKind::Point,
            RowOrientation::Planar(o) if o.dip == 90.0 => GlyphKind::VerticalPlane,
            RowOrientation::Planar(o) if o.dip == 0.0 => GlyphKind::HorizontalPlane,
            RowOrientation::Planar(_) => GlyphKind::StrikeDip,
            RowOrientation::Linear(_) => GlyphKind::Lineation,
        }
    }

    /// Build the glyph of one row
    pub fn route(&self, input: &SymbolInput) -> Result<Glyph> {
        let kind = Self::select(input);
        if kind == GlyphKind::Line {
            return self.line_glyph(input.line.as_deref().unwrap_or_default());
        }

        let position = input.position.ok_or(Error::MissingPosition(kind))?;
        let Some(orientation) = input.orientation.orientation() else {
            return Ok(self.point_glyph(&position));
        };

        let builder = self.builders.get(&kind).ok_or(Error::NoBuilder(kind))?;
        tracing::debug!(
            kind = %kind,
            strike = orientation.strike,
            dip = orientation.dip,
            "Building oriented symbol"
        );
        Ok(builder.build(&self.frame(&position), orientation))
    }

    fn frame(&self, position: &Position) -> SymbolFrame {
        SymbolFrame {
            center: position.lat_lng(),
            base_altitude: self.settings.symbol_height + self.settings.elevation(position),
            length: self.settings.symbol_length,
            earth_radius: self.settings.earth_radius,
            altitude_mode: self.settings.altitude_mode(),
        }
    }

    /// Plain marker raised by half the symbol length
    fn point_glyph(&self, position: &Position) -> Glyph {
        let altitude = self.settings.symbol_length / 2.0 + self.settings.elevation(position);
        Glyph {
            kind: GlyphKind::Point,
            shape: Shape::Point(vertex(position.lat_lng(), altitude)),
            altitude_mode: self.settings.altitude_mode(),
            label: None,
        }
    }

    /// Recorded trace draped on the ground
    fn line_glyph(&self, line: &[LngLat]) -> Result<Glyph> {
        if line.is_empty() {
            return Err(Error::EmptyLine);
        }
        let polyline = Polyline::new(line.iter().map(|&[lng, lat]| Vertex::new(lng, lat, 0.0)));
        Ok(Glyph {
            kind: GlyphKind::Line,
            shape: Shape::Polylines(vec![polyline]),
            altitude_mode: AltitudeMode::ClampToGround,
            label: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn planar(strike: f64, dip: f64) -> SymbolInput {
        SymbolInput {
            position: Some(Position::new(10.0, 20.0, 300.0)),
            orientation: RowOrientation::Planar(Orientation::new(strike, dip)),
            line: None,
        }
    }

    #[test]
    fn test_select_branches() {
        assert_eq!(SymbolRouter::select(&SymbolInput::default()), GlyphKind::Point);
        assert_eq!(SymbolRouter::select(&planar(10.0, 90.0)), GlyphKind::VerticalPlane);
        assert_eq!(SymbolRouter::select(&planar(10.0, 0.0)), GlyphKind::HorizontalPlane);
        assert_eq!(SymbolRouter::select(&planar(10.0, 45.0)), GlyphKind::StrikeDip);
        assert_eq!(SymbolRouter::select(&planar(10.0, 89.999)), GlyphKind::StrikeDip);

        let linear = SymbolInput {
            orientation: RowOrientation::Linear(Orientation::new(10.0, 0.0)),
            ..planar(0.0, 0.0)
        };
        assert_eq!(SymbolRouter::select(&linear), GlyphKind::Lineation);

        let with_line = SymbolInput {
            line: Some(vec![[1.0, 2.0]]),
            ..planar(10.0, 45.0)
        };
        assert_eq!(SymbolRouter::select(&with_line), GlyphKind::Line);
    }

    #[test]
    fn test_point_altitude() {
        let router = SymbolRouter::default();
        let input = SymbolInput {
            position: Some(Position::new(10.0, 20.0, 300.0)),
            ..Default::default()
        };
        let glyph = router.route(&input).unwrap();
        assert_eq!(glyph.shape, Shape::Point(Vertex::new(20.0, 10.0, 25.0)));
        assert_eq!(glyph.altitude_mode, AltitudeMode::RelativeToGround);

        let router = SymbolRouter::new(SymbolSettings {
            use_altitude: true,
            ..Default::default()
        });
        let glyph = router.route(&input).unwrap();
        assert_eq!(glyph.shape, Shape::Point(Vertex::new(20.0, 10.0, 325.0)));
        assert_eq!(glyph.altitude_mode, AltitudeMode::Absolute);
    }

    #[test]
    fn test_altitude_aware_base() {
        let router = SymbolRouter::new(SymbolSettings {
            use_altitude: true,
            ..Default::default()
        });
        let glyph = router.route(&planar(45.0, 30.0)).unwrap();
        assert_eq!(glyph.polylines()[0].vertices[1], Vertex::new(20.0, 10.0, 350.0));
    }

    #[test]
    fn test_line_is_clamped() {
        let router = SymbolRouter::default();
        let input = SymbolInput {
            position: None,
            orientation: RowOrientation::None,
            line: Some(vec![[1.0, 2.0], [3.0, 4.0]]),
        };
        let glyph = router.route(&input).unwrap();
        assert_eq!(glyph.kind, GlyphKind::Line);
        assert_eq!(glyph.altitude_mode, AltitudeMode::ClampToGround);
        assert_eq!(glyph.polylines()[0].vertices[1], Vertex::new(3.0, 4.0, 0.0));

        let empty = SymbolInput {
            line: Some(Vec::new()),
            ..input
        };
        assert!(matches!(router.route(&empty), Err(Error::EmptyLine)));
    }

    #[test]
    fn test_missing_position() {
        let router = SymbolRouter::default();
        let input = SymbolInput {
            position: None,
            ..planar(45.0, 30.0)
        };
        assert!(matches!(
            router.route(&input),
            Err(Error::MissingPosition(GlyphKind::StrikeDip))
        ));
        assert!(router.route(&SymbolInput::default()).is_err());
    }

    #[test]
    fn test_register_replaces_builder() {
        struct Stub;
        impl SymbolBuilder for Stub {
            fn kind(&self) -> GlyphKind {
                GlyphKind::StrikeDip
            }
            fn build(&self, frame: &SymbolFrame, _: Orientation) -> Glyph {
                Glyph {
                    kind: GlyphKind::StrikeDip,
                    shape: Shape::Point(vertex(frame.center, 0.0)),
                    altitude_mode: frame.altitude_mode,
                    label: None,
                }
            }
        }

        let mut router = SymbolRouter::default();
        router.register(Arc::new(Stub));
        let glyph = router.route(&planar(45.0, 30.0)).unwrap();
        assert!(glyph.polylines().is_empty());
    }
}
