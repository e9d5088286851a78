// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Elevation augmentation
//!
//! Oriented rows without a recorded altitude can be completed from a batch
//! elevation service before export. One request is made per export; large
//! batches are skipped rather than split.

use std::fmt;
use std::future::Future;

use geosym_core::{Column, Dataset, LatLng, OrientationKind};

use crate::Result;

/// Largest batch sent in a single request (exclusive)
pub const MAX_ELEVATION_BATCH: usize = 500;

/// Batch elevation lookup
///
/// Returns one elevation in meters per input point, in input order.
pub trait ElevationService: Send + Sync {
    fn elevations(&self, points: &[LatLng]) -> impl Future<Output = Result<Vec<f64>>> + Send;
}

/// What happened to the altitudes during an export
#[derive(Debug, Clone, PartialEq)]
pub enum ElevationOutcome {
    /// Altitude mode off or no service configured
    Disabled,
    /// Every oriented row already has an altitude
    NothingToLookUp,
    /// Elevations were written for this many rows
    Applied { points: usize },
    /// The batch was too large to request
    Skipped { points: usize },
    /// The lookup failed; existing altitudes were used
    Failed { reason: String },
}

impl fmt::Display for ElevationOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ElevationOutcome::Disabled => f.write_str("disabled"),
            ElevationOutcome::NothingToLookUp => f.write_str("none-needed"),
            ElevationOutcome::Applied { points } => write!(f, "applied:{points}"),
            ElevationOutcome::Skipped { points } => write!(f, "skipped:{points}"),
            ElevationOutcome::Failed { .. } => f.write_str("failed"),
        }
    }
}

/// Rows that need an elevation, with their positions
pub fn elevation_candidates(ds: &Dataset) -> Vec<(usize, LatLng)> {
    ds.rows()
        .iter()
        .enumerate()
        .filter(|(_, row)| !ds.orientation(row, OrientationKind::Planar).is_none())
        .filter(|(_, row)| ds.altitude(row).is_none())
        .filter_map(|(i, row)| ds.get_lat_lng_alt(row).map(|p| (i, p.lat_lng())))
        .collect()
}

/// Fill missing altitudes of oriented rows from `service`
///
/// The altitude column is added to the schema when it is missing.
pub async fn augment_elevation<S>(ds: &mut Dataset, service: &S) -> ElevationOutcome
where
    S: ElevationService,
{
    let candidates = elevation_candidates(ds);
    if candidates.is_empty() {
        return ElevationOutcome::NothingToLookUp;
    }
    if candidates.len() >= MAX_ELEVATION_BATCH {
        tracing::info!(
            points = candidates.len(),
            limit = MAX_ELEVATION_BATCH,
            "Elevation batch too large, keeping recorded altitudes"
        );
        return ElevationOutcome::Skipped {
            points: candidates.len(),
        };
    }

    let points: Vec<LatLng> = candidates.iter().map(|(_, p)| *p).collect();
    let elevations = match service.elevations(&points).await {
        Ok(elevations) => elevations,
        Err(e) => {
            tracing::warn!(error = %e, points = points.len(), "Elevation lookup failed");
            return ElevationOutcome::Failed {
                reason: e.to_string(),
            };
        }
    };

    if elevations.len() != points.len() {
        let reason = format!(
            "expected {} elevations, service returned {}",
            points.len(),
            elevations.len()
        );
        tracing::warn!(%reason, "Elevation lookup returned a mismatched batch");
        return ElevationOutcome::Failed { reason };
    }

    for ((row_index, _), elevation) in candidates.iter().zip(elevations) {
        ds.set_column(*row_index, Column::Altitude, elevation.to_string());
    }

    tracing::debug!(points = points.len(), "Elevations applied");
    ElevationOutcome::Applied {
        points: points.len(),
    }
}
