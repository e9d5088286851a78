// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Orientation measurements
//!
//! Planar features are recorded as strike/dip and linear features as
//! trend/plunge. Both share one shape: a compass bearing and a downward angle.

use std::ops::{Bound, RangeBounds};

/// A bearing plus a downward angle, both in degrees
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Orientation {
    /// Strike (planar) or trend (linear), degrees clockwise from north
    pub strike: f64,
    /// Dip (planar) or plunge (linear), degrees below horizontal
    pub dip: f64,
}

impl Orientation {
    #[inline]
    pub fn new(strike: f64, dip: f64) -> Self {
        Self { strike, dip }
    }
}

/// Which kind of feature an orientation describes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OrientationKind {
    /// Strike and dip of a plane
    Planar,
    /// Trend and plunge of a line
    Linear,
}

/// Classified orientation of a row
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum RowOrientation {
    Planar(Orientation),
    Linear(Orientation),
    #[default]
    None,
}

impl RowOrientation {
    /// Kind of the orientation, if any
    pub fn kind(&self) -> Option<OrientationKind> {
        match self {
            RowOrientation::Planar(_) => Some(OrientationKind::Planar),
            RowOrientation::Linear(_) => Some(OrientationKind::Linear),
            RowOrientation::None => None,
        }
    }

    /// The measurement itself, if any
    pub fn orientation(&self) -> Option<Orientation> {
        match self {
            RowOrientation::Planar(o) | RowOrientation::Linear(o) => Some(*o),
            RowOrientation::None => None,
        }
    }

    #[inline]
    pub fn is_none(&self) -> bool {
        matches!(self, RowOrientation::None)
    }
}

/// One row of the dip-direction correction table
struct QuadrantRule {
    lower: Bound<f64>,
    upper: Bound<f64>,
    /// Recorded dip directions that contradict the right-hand rule for strikes
    /// in this range
    conflicting: &'static [&'static str],
}

impl RangeBounds<f64> for QuadrantRule {
    fn start_bound(&self) -> Bound<&f64> {
        bound_ref(&self.lower)
    }

    fn end_bound(&self) -> Bound<&f64> {
        bound_ref(&self.upper)
    }
}

fn bound_ref(bound: &Bound<f64>) -> Bound<&f64> {
    match bound {
        Bound::Included(v) => Bound::Included(v),
        Bound::Excluded(v) => Bound::Excluded(v),
        Bound::Unbounded => Bound::Unbounded,
    }
}

/// Surveying convention for strikes recorded against their dip direction.
///
/// Boundaries are asymmetric on purpose: 90° and 180° both belong to the
/// second quadrant, 270° to the fourth.
const FACING_CORRECTIONS: [QuadrantRule; 4] = [
    QuadrantRule {
        lower: Bound::Included(0.0),
        upper: Bound::Excluded(90.0),
        conflicting: &["N", "W", "NW"],
    },
    QuadrantRule {
        lower: Bound::Included(90.0),
        upper: Bound::Included(180.0),
        conflicting: &["N", "E", "NE"],
    },
    QuadrantRule {
        lower: Bound::Excluded(180.0),
        upper: Bound::Excluded(270.0),
        conflicting: &["S", "E", "SE"],
    },
    QuadrantRule {
        lower: Bound::Included(270.0),
        upper: Bound::Excluded(360.0),
        conflicting: &["S", "W", "SW"],
    },
];

/// Degrees to add to a raw strike given its recorded dip direction
///
/// Returns 180 when the dip direction falls in a quadrant that contradicts
/// the strike, 0 otherwise (including unknown direction codes).
pub fn facing_correction(strike: f64, dip_direction: &str) -> f64 {
    let direction = dip_direction.trim().to_ascii_uppercase();
    let conflicts = FACING_CORRECTIONS
        .iter()
        .any(|rule| rule.contains(&strike) && rule.conflicting.contains(&direction.as_str()));
    if conflicts {
        180.0
    } else {
        0.0
    }
}

/// Apply [`facing_correction`] and wrap the result into `[0, 360)`
pub fn correct_strike(strike: f64, dip_direction: &str) -> f64 {
    let correction = facing_correction(strike, dip_direction);
    if correction == 0.0 {
        strike
    } else {
        (strike + correction).rem_euclid(360.0)
    }
}
