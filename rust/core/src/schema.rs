// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Column Schema Adapters
//!
//! Field data arrives in more than one header layout. The dynamic spreadsheet
//! export names every column after the form field it came from, while the
//! older fixed-column CSV uses ten short names and records a dip direction.
//! Both are resolved through [`SchemaAdapter`] so the rest of the pipeline asks
//! for a semantic [`Column`] instead of a literal header string.

use std::fmt;

/// Reserved prefix marking a tag (presence flag) column
pub const TAG_PREFIX: &str = "Tag:";

/// Cell value marking a tag as present for a row
pub const TAG_MARKER: &str = "X";

/// Tag attributed to rows without any marked tag column
pub const DEFAULT_TAG: &str = "Undesignated";

/// Semantic role of a column, independent of its header text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    Name,
    Date,
    Notes,
    /// WKT-style `LINESTRING (...)` geometry
    RealWorldCoordinates,
    Latitude,
    Longitude,
    Altitude,
    PlanarStrike,
    PlanarDip,
    PlanarFeatureType,
    PlanarQuality,
    PlanarFacing,
    PlanarLabel,
    LinearTrend,
    LinearPlunge,
    LinearFeatureType,
    TraceQuality,
    TraceType,
    TraceNotes,
    /// Recorded dip direction (legacy layout only)
    DipDirection,
    /// Free-form color column (legacy layout only)
    Color,
}

impl Column {
    /// All roles, in the order the spreadsheet export lists them
    pub const ALL: [Column; 21] = [
        Column::Name,
        Column::Date,
        Column::Notes,
        Column::RealWorldCoordinates,
        Column::Latitude,
        Column::Longitude,
        Column::Altitude,
        Column::PlanarStrike,
        Column::PlanarDip,
        Column::PlanarFeatureType,
        Column::PlanarQuality,
        Column::PlanarFacing,
        Column::PlanarLabel,
        Column::LinearTrend,
        Column::LinearPlunge,
        Column::LinearFeatureType,
        Column::TraceQuality,
        Column::TraceType,
        Column::TraceNotes,
        Column::DipDirection,
        Column::Color,
    ];

    /// Short human-readable role name
    pub fn as_str(&self) -> &'static str {
        match self {
            Column::Name => "name",
            Column::Date => "date",
            Column::Notes => "notes",
            Column::RealWorldCoordinates => "line",
            Column::Latitude => "latitude",
            Column::Longitude => "longitude",
            Column::Altitude => "altitude",
            Column::PlanarStrike => "strike",
            Column::PlanarDip => "dip",
            Column::PlanarFeatureType => "planar feature type",
            Column::PlanarQuality => "measurement quality",
            Column::PlanarFacing => "facing",
            Column::PlanarLabel => "planar label",
            Column::LinearTrend => "trend",
            Column::LinearPlunge => "plunge",
            Column::LinearFeatureType => "linear feature type",
            Column::TraceQuality => "trace quality",
            Column::TraceType => "trace type",
            Column::TraceNotes => "trace notes",
            Column::DipDirection => "dip direction",
            Column::Color => "color",
        }
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Maps semantic column roles onto the header names of one input layout
pub trait SchemaAdapter: fmt::Debug + Send + Sync {
    /// Layout name used in logs
    fn name(&self) -> &'static str;

    /// Header text carrying `column`, if this layout has one
    fn header_name(&self, column: Column) -> Option<&'static str>;

    /// Whether planar strikes are corrected from a recorded dip direction
    fn applies_facing_correction(&self) -> bool {
        false
    }

    /// Role of a header, if it is one this layout knows
    fn column_of(&self, header: &str) -> Option<Column> {
        Column::ALL
            .iter()
            .copied()
            .find(|c| self.header_name(*c) == Some(header))
    }
}

/// Dynamic spreadsheet export with descriptive headers and tag columns
#[derive(Debug, Clone, Copy, Default)]
pub struct SpreadsheetSchema;

impl SchemaAdapter for SpreadsheetSchema {
    fn name(&self) -> &'static str {
        "spreadsheet"
    }

    fn header_name(&self, column: Column) -> Option<&'static str> {
        let name = match column {
            Column::Name => "Name",
            Column::Date => "Date",
            Column::Notes => "Notes",
            Column::RealWorldCoordinates => "Real World Coordinates",
            Column::Latitude => "Latitude",
            Column::Longitude => "Longitude",
            Column::Altitude => "Altitude(m)",
            Column::PlanarStrike => "Planar Orientation Strike",
            Column::PlanarDip => "Planar Orientation Dip",
            Column::PlanarFeatureType => "Planar Orientation Planar Feature Type",
            Column::PlanarQuality => "Planar Orientation Quality",
            Column::PlanarFacing => "Planar Orientation Facing",
            Column::PlanarLabel => "Planar Orientation Label",
            Column::LinearTrend => "Linear Orientation Trend",
            Column::LinearPlunge => "Linear Orientation Plunge",
            Column::LinearFeatureType => "Linear Orientation Linear Feature Type",
            Column::TraceQuality => "Trace Trace Quality",
            Column::TraceType => "Trace Trace Type",
            // Misspelling is part of the exported header
            Column::TraceNotes => "Trace Tace Notes",
            Column::DipDirection | Column::Color => return None,
        };
        Some(name)
    }
}

/// Fixed ten-column CSV layout with a recorded dip direction
#[derive(Debug, Clone, Copy, Default)]
pub struct LegacySchema;

impl LegacySchema {
    /// Header row of the fixed layout, in column order
    pub const HEADERS: [&'static str; 10] = [
        "Name",
        "Latitude",
        "Longitude",
        "Altitude",
        "Strike",
        "Dip",
        "Dip Direction",
        "Color",
        "Date",
        "Notes",
    ];
}

impl SchemaAdapter for LegacySchema {
    fn name(&self) -> &'static str {
        "legacy"
    }

    fn header_name(&self, column: Column) -> Option<&'static str> {
        let name = match column {
            Column::Name => "Name",
            Column::Latitude => "Latitude",
            Column::Longitude => "Longitude",
            Column::Altitude => "Altitude",
            Column::PlanarStrike => "Strike",
            Column::PlanarDip => "Dip",
            Column::DipDirection => "Dip Direction",
            Column::Color => "Color",
            Column::Date => "Date",
            Column::Notes => "Notes",
            _ => return None,
        };
        Some(name)
    }

    fn applies_facing_correction(&self) -> bool {
        true
    }
}

/// Pick the layout matching a header row
///
/// The legacy layout is recognised by its bare `Strike`/`Dip` pair or its
/// `Dip Direction` column; everything else is treated as a spreadsheet export.
pub fn detect_schema<S: AsRef<str>>(headers: &[S]) -> &'static dyn SchemaAdapter {
    let has = |name: &str| headers.iter().any(|h| h.as_ref().trim() == name);
    if has("Dip Direction") || (has("Strike") && has("Dip")) {
        &LegacySchema
    } else {
        &SpreadsheetSchema
    }
}

/// Tag label of a header, if it is a tag column
#[inline]
pub fn tag_label(header: &str) -> Option<&str> {
    header.strip_prefix(TAG_PREFIX).map(str::trim)
}
