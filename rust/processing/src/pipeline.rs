// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Export pipeline: optional elevation lookup, then document assembly

use geosym_core::Dataset;

use crate::document::DocumentBuilder;
use crate::elevation::{augment_elevation, ElevationOutcome, ElevationService};
use crate::options::ExportOptions;
use crate::Result;

/// Result of one export
#[derive(Debug, Clone)]
pub struct ExportReport {
    /// The KML document
    pub kml: String,
    pub placemarks: usize,
    pub skipped: usize,
    pub elevation: ElevationOutcome,
}

/// Export a dataset to KML without elevation lookup
pub fn export(ds: &Dataset, options: &ExportOptions) -> Result<ExportReport> {
    let document = DocumentBuilder::new(ds, options).build()?;

    tracing::info!(
        name = %options.document_name,
        rows = ds.len(),
        placemarks = document.placemarks,
        skipped = document.skipped,
        "KML export complete"
    );

    Ok(ExportReport {
        kml: document.kml,
        placemarks: document.placemarks,
        skipped: document.skipped,
        elevation: ElevationOutcome::Disabled,
    })
}

/// Export a dataset, first completing missing altitudes when altitude mode
/// is on and a service is given
///
/// A failed lookup does not fail the export; it is reported in
/// [`ExportReport::elevation`].
pub async fn export_with_elevation<S>(
    ds: &mut Dataset,
    options: &ExportOptions,
    service: Option<&S>,
) -> Result<ExportReport>
where
    S: ElevationService,
{
    let elevation = match service {
        Some(service) if options.use_altitude => augment_elevation(ds, service).await,
        _ => ElevationOutcome::Disabled,
    };

    let mut report = export(ds, options)?;
    report.elevation = elevation;
    Ok(report)
}
