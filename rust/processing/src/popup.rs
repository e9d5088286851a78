// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Placemark description (popup) text

use geosym_core::{Column, Dataset};
use geosym_geometry::format_degrees;

const LINE_BREAK: &str = "<br>";
const RULE: &str = "<hr>";

/// Popup fields in display order
#[derive(Debug, Default)]
struct Popup {
    entries: Vec<String>,
}

impl Popup {
    fn field(&mut self, entry: Option<String>) {
        if let Some(entry) = entry {
            self.entries.push(entry);
        }
    }

    /// Field preceded by a horizontal rule unless it is the first one
    fn section(&mut self, entry: Option<String>) {
        if let Some(entry) = entry {
            if self.entries.is_empty() {
                self.entries.push(entry);
            } else {
                self.entries.push(format!("{RULE}{entry}"));
            }
        }
    }

    fn finish(self) -> String {
        self.entries.join(LINE_BREAK)
    }
}

/// HTML description of a row
///
/// Only fields with a value are listed. Rules separate the planar block, the
/// linear block, the date and the notes from whatever precedes them.
pub fn describe(ds: &Dataset, row: &[String]) -> String {
    let planar = ds.get_planar_orientation(row);
    let linear = ds.get_linear_orientation(row);
    let text = |column: Column| ds.text(row, column);

    let mut popup = Popup::default();
    popup.field(ds.tag_of(row).map(|tag| format!("Unit: {tag}")));

    popup.section(text(Column::PlanarFeatureType).map(|t| format!("Planar Feature: {}", t.to_uppercase())));
    popup.field(planar.map(|o| format!("Strike: {}&deg;", format_degrees(o.strike))));
    popup.field(planar.map(|o| format!("Dip: {}&deg;", format_degrees(o.dip))));
    popup.field(text(Column::PlanarQuality).map(|q| format!("Measurement Quality: {q}")));
    popup.field(text(Column::PlanarFacing).map(|f| format!("Facing: {f}")));

    popup.section(text(Column::LinearFeatureType).map(|t| format!("Linear Feature: {}", t.to_uppercase())));
    popup.field(linear.map(|o| format!("Trend: {}&deg;", format_degrees(o.strike))));
    popup.field(linear.map(|o| format!("Plunge: {}&deg;", format_degrees(o.dip))));

    popup.section(text(Column::Date).map(|d| format!("Date UTC: {d}")));
    popup.section(text(Column::Notes).map(|n| format!("Notes: {n}")));

    popup.finish()
}
