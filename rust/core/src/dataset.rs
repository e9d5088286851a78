// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Tabular dataset with name-addressed columns
//!
//! A [`Dataset`] binds a header schema to raw rows. Columns are looked up by
//! header name, never by a fixed index, because the layout differs between
//! input sources and columns may be removed while editing. Two mappings make
//! that work:
//!
//! - header name → logical index (position in the header row)
//! - physical cell position → logical index (the column order)
//!
//! Removing a column drops its physical position from every row and from the
//! column order; the logical indices of the remaining headers stay valid.

use std::sync::Arc;

use rustc_hash::FxHashMap;

use crate::error::{Error, Result};
use crate::fast_parse::{parse_number, parse_opt};
use crate::orientation::{correct_strike, Orientation, OrientationKind, RowOrientation};
use crate::palette::{ColorStore, TagColor, TagPalette, FALLBACK_COLOR};
use crate::parser::{parse_linestring, LngLat};
use crate::position::Position;
use crate::schema::{detect_schema, tag_label, Column, SchemaAdapter, DEFAULT_TAG, TAG_MARKER};
use crate::undo::UndoStack;

/// One row of cell strings
pub type Row = Vec<String>;

/// Where the header schema of a row set comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderMode {
    /// The first row is the header row (legacy CSV files)
    FirstRow,
    /// The schema was already set with [`Dataset::set_header`]
    Preset,
}

/// Rows plus column order, captured before a structural edit
#[derive(Debug, Clone)]
struct Snapshot {
    column_order: Vec<usize>,
    rows: Vec<Row>,
}

/// Field observation table
pub struct Dataset {
    headers: Vec<String>,
    /// Header name -> logical index (first occurrence wins)
    header_index: FxHashMap<String, usize>,
    /// Physical cell position -> logical index
    column_order: Vec<usize>,
    rows: Vec<Row>,
    tag_colors: Vec<TagColor>,
    /// Layout chosen by the caller; overrides detection
    fixed_schema: Option<Arc<dyn SchemaAdapter>>,
    /// Layout detected from the current header row
    detected_schema: &'static dyn SchemaAdapter,
    palette: TagPalette,
    history: UndoStack<Snapshot>,
}

impl std::fmt::Debug for Dataset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dataset")
            .field("headers", &self.headers)
            .field("column_order", &self.column_order)
            .field("rows", &self.rows.len())
            .field("schema", &self.schema().name())
            .finish()
    }
}

impl Default for Dataset {
    fn default() -> Self {
        Self::new()
    }
}

impl Dataset {
    /// Create an empty dataset without color persistence
    pub fn new() -> Self {
        Self::with_palette(TagPalette::detached())
    }

    /// Create an empty dataset whose tag colors honour persisted overrides
    pub fn with_color_store(store: Arc<dyn ColorStore>) -> Self {
        Self::with_palette(TagPalette::new(store))
    }

    fn with_palette(palette: TagPalette) -> Self {
        Self {
            headers: Vec::new(),
            header_index: FxHashMap::default(),
            column_order: Vec::new(),
            rows: Vec::new(),
            tag_colors: Vec::new(),
            fixed_schema: None,
            detected_schema: detect_schema::<&str>(&[]),
            palette,
            history: UndoStack::default(),
        }
    }

    /// Pin the column layout instead of detecting it from the header row
    pub fn with_schema(mut self, schema: Arc<dyn SchemaAdapter>) -> Self {
        self.fixed_schema = Some(schema);
        self
    }

    /// Active column layout
    pub fn schema(&self) -> &dyn SchemaAdapter {
        match &self.fixed_schema {
            Some(schema) => schema.as_ref(),
            None => self.detected_schema,
        }
    }

    // ---------------------------------------------------------------------
    // Loading
    // ---------------------------------------------------------------------

    /// Replace the header schema
    ///
    /// Resets the column order to one cell per header and re-derives the tag
    /// color table.
    pub fn set_header<I, S>(&mut self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.headers = names.into_iter().map(Into::into).collect();
        self.header_index = FxHashMap::default();
        for (i, name) in self.headers.iter().enumerate() {
            self.header_index.entry(name.clone()).or_insert(i);
        }
        self.column_order = (0..self.headers.len()).collect();
        self.detected_schema = detect_schema(&self.headers);
        self.history.clear();
        self.init_tag_colors();

        tracing::debug!(
            columns = self.headers.len(),
            schema = self.schema().name(),
            tags = self.tag_colors.len() - 1,
            "Header schema set"
        );
    }

    /// Replace the data rows
    ///
    /// With [`HeaderMode::FirstRow`] the first row becomes the schema and is
    /// not kept as data. With [`HeaderMode::Preset`] a schema must already be
    /// set. Cells past the last mapped column are dropped.
    pub fn set_data(&mut self, mut rows: Vec<Row>, mode: HeaderMode) -> Result<()> {
        match mode {
            HeaderMode::FirstRow => {
                if rows.is_empty() {
                    return Err(Error::MissingHeaderRow);
                }
                let header = rows.remove(0);
                let width = header.len();
                self.set_header(header);
                self.column_order.truncate(width);
            }
            HeaderMode::Preset => {
                if self.headers.is_empty() {
                    return Err(Error::SchemaNotSet);
                }
            }
        }
        let width = self.column_order.len();
        let mut trimmed = 0usize;
        for row in &mut rows {
            if row.len() > width {
                row.truncate(width);
                trimmed += 1;
            }
        }
        if trimmed > 0 {
            tracing::debug!(rows = trimmed, width, "Dropped cells without a header");
        }

        self.rows = rows;
        self.history.clear();
        Ok(())
    }

    fn init_tag_colors(&mut self) {
        let mut colors: Vec<TagColor> = Vec::new();
        for label in self.headers.iter().filter_map(|h| tag_label(h)) {
            if label == DEFAULT_TAG || colors.iter().any(|c| c.tag == label) {
                continue;
            }
            colors.push(TagColor::new(label, self.palette.color_for(label)));
        }
        colors.push(TagColor::new(DEFAULT_TAG, self.palette.color_for(DEFAULT_TAG)));
        self.tag_colors = colors;
    }

    // ---------------------------------------------------------------------
    // Accessors
    // ---------------------------------------------------------------------

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Physical cell position -> logical header index
    pub fn column_order(&self) -> &[usize] {
        &self.column_order
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn row(&self, index: usize) -> Option<&Row> {
        self.rows.get(index)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Logical index of a header
    #[inline]
    pub fn logical_index(&self, header_name: &str) -> Option<usize> {
        self.header_index.get(header_name).copied()
    }

    /// Physical cell position of a logical column
    #[inline]
    pub fn physical_index(&self, logical: usize) -> Option<usize> {
        self.column_order.iter().position(|&l| l == logical)
    }

    /// Header shown at a physical cell position
    pub fn header_at(&self, column_index: usize) -> Option<&str> {
        self.column_order
            .get(column_index)
            .and_then(|&logical| self.headers.get(logical))
            .map(String::as_str)
    }

    /// Cell of `row` under `header_name`
    ///
    /// `None` when the header is not part of the schema, has been removed from
    /// the column order, or the row is too short.
    pub fn get_column<'r>(&self, row: &'r [String], header_name: &str) -> Option<&'r str> {
        let logical = self.logical_index(header_name)?;
        let physical = self.physical_index(logical)?;
        row.get(physical).map(String::as_str)
    }

    /// Cell of `row` holding the semantic `column`
    pub fn column<'r>(&self, row: &'r [String], column: Column) -> Option<&'r str> {
        let header = self.schema().header_name(column)?;
        self.get_column(row, header)
    }

    /// Cell holding `column`, ignoring blank values
    pub fn text<'r>(&self, row: &'r [String], column: Column) -> Option<&'r str> {
        self.column(row, column)
            .map(str::trim)
            .filter(|v| !v.is_empty())
    }

    /// Whether the schema currently maps `column` to a cell position
    pub fn has_column(&self, column: Column) -> bool {
        self.schema()
            .header_name(column)
            .and_then(|h| self.logical_index(h))
            .and_then(|l| self.physical_index(l))
            .is_some()
    }

    // ---------------------------------------------------------------------
    // Validation
    // ---------------------------------------------------------------------

    /// Check a value against the domain of the column shown at `column_index`
    ///
    /// `None` means the column has no validation rule.
    pub fn validate_cell(&self, value: &str, column_index: usize) -> Option<bool> {
        let header = self.header_at(column_index)?;
        let column = self.schema().column_of(header)?;
        let (min, max, max_inclusive) = match column {
            Column::Longitude => (-180.0, 180.0, true),
            Column::Latitude => (-90.0, 90.0, true),
            Column::PlanarStrike | Column::LinearTrend => (0.0, 360.0, false),
            Column::PlanarDip | Column::LinearPlunge => (0.0, 90.0, true),
            _ => return None,
        };
        let verdict = match parse_number(value) {
            Some(v) if max_inclusive => v >= min && v <= max,
            Some(v) => v >= min && v < max,
            None => false,
        };
        Some(verdict)
    }

    /// Validation verdict for every cell, row by row
    pub fn validation_grid(&self) -> Vec<Vec<Option<bool>>> {
        self.rows
            .iter()
            .map(|row| {
                row.iter()
                    .enumerate()
                    .map(|(i, cell)| self.validate_cell(cell, i))
                    .collect()
            })
            .collect()
    }

    // ---------------------------------------------------------------------
    // Tags
    // ---------------------------------------------------------------------

    /// Label of the first marked tag column, in header order
    pub fn tag_of(&self, row: &[String]) -> Option<&str> {
        self.headers.iter().enumerate().find_map(|(logical, header)| {
            let label = tag_label(header)?;
            let physical = self.physical_index(logical)?;
            let cell = row.get(physical)?;
            (cell.trim() == TAG_MARKER).then_some(label)
        })
    }

    /// Tag attributed to a row, the default tag when none is marked
    pub fn get_formation(&self, row: &[String]) -> &str {
        self.tag_of(row).unwrap_or(DEFAULT_TAG)
    }

    /// Color of the row's tag
    pub fn get_row_color(&self, row: &[String]) -> &str {
        self.color_of(self.get_formation(row))
    }

    /// Color assigned to a tag
    pub fn color_of(&self, tag: &str) -> &str {
        self.tag_colors
            .iter()
            .find(|c| c.tag == tag)
            .map(|c| c.color.as_str())
            .unwrap_or(FALLBACK_COLOR)
    }

    /// Distinct tags in header order, default tag last
    pub fn get_unique_formations(&self) -> Vec<String> {
        self.tag_colors.iter().map(|c| c.tag.clone()).collect()
    }

    pub fn tag_colors(&self) -> &[TagColor] {
        &self.tag_colors
    }

    /// Change the color of a known tag and persist the table
    ///
    /// Returns `Ok(false)` when the tag is not part of the schema.
    pub fn set_tag_color(&mut self, tag: &str, color: &str) -> Result<bool> {
        let Some(entry) = self.tag_colors.iter_mut().find(|c| c.tag == tag) else {
            return Ok(false);
        };
        entry.color = color.to_string();
        self.palette.persist(&self.tag_colors)?;
        Ok(true)
    }

    // ---------------------------------------------------------------------
    // Orientation and geometry
    // ---------------------------------------------------------------------

    /// Strike and dip, when both cells are numeric
    ///
    /// Layouts that record a dip direction get the quadrant facing correction
    /// applied to the strike.
    pub fn get_planar_orientation(&self, row: &[String]) -> Option<Orientation> {
        let strike = parse_opt(self.column(row, Column::PlanarStrike))?;
        let dip = parse_opt(self.column(row, Column::PlanarDip))?;

        let strike = if self.schema().applies_facing_correction() {
            match self.column(row, Column::DipDirection) {
                Some(direction) => correct_strike(strike, direction),
                None => strike,
            }
        } else {
            strike
        };

        Some(Orientation::new(strike, dip))
    }

    /// Trend and plunge, when both cells are numeric
    pub fn get_linear_orientation(&self, row: &[String]) -> Option<Orientation> {
        let trend = parse_opt(self.column(row, Column::LinearTrend))?;
        let plunge = parse_opt(self.column(row, Column::LinearPlunge))?;
        Some(Orientation::new(trend, plunge))
    }

    /// The one orientation used for a row
    ///
    /// `prefer` decides which kind wins when both are present.
    pub fn orientation(&self, row: &[String], prefer: OrientationKind) -> RowOrientation {
        let planar = self.get_planar_orientation(row).map(RowOrientation::Planar);
        let linear = self.get_linear_orientation(row).map(RowOrientation::Linear);
        let picked = match prefer {
            OrientationKind::Planar => planar.or(linear),
            OrientationKind::Linear => linear.or(planar),
        };
        picked.unwrap_or(RowOrientation::None)
    }

    /// Vertices of the row's line geometry
    pub fn get_line(&self, row: &[String]) -> Result<Option<Vec<LngLat>>> {
        match self.column(row, Column::RealWorldCoordinates) {
            Some(value) => parse_linestring(value),
            None => Ok(None),
        }
    }

    /// Recorded altitude, when numeric
    pub fn altitude(&self, row: &[String]) -> Option<f64> {
        parse_opt(self.column(row, Column::Altitude))
    }

    /// Position of a row
    ///
    /// Latitude/longitude cells win; otherwise the first vertex of the line
    /// geometry is used. Altitude defaults to 0.
    pub fn get_lat_lng_alt(&self, row: &[String]) -> Option<Position> {
        let altitude = self.altitude(row).unwrap_or(0.0);

        let lat = parse_opt(self.column(row, Column::Latitude));
        let lng = parse_opt(self.column(row, Column::Longitude));
        if let (Some(lat), Some(lng)) = (lat, lng) {
            return Some(Position::new(lat, lng, altitude));
        }

        match self.get_line(row) {
            Ok(Some(line)) => line
                .first()
                .map(|&[lng, lat]| Position::new(lat, lng, altitude)),
            Ok(None) => None,
            Err(e) => {
                tracing::debug!(error = %e, "No position: unreadable line geometry");
                None
            }
        }
    }

    // ---------------------------------------------------------------------
    // Editing
    // ---------------------------------------------------------------------

    fn snapshot(&mut self) {
        self.history.push(Snapshot {
            column_order: self.column_order.clone(),
            rows: self.rows.clone(),
        });
    }

    /// Write a cell, adding the column's header when the schema lacks it
    ///
    /// Returns `false` when the row does not exist or the layout has no
    /// header for `column`.
    pub fn set_column(&mut self, row_index: usize, column: Column, value: impl Into<String>) -> bool {
        if row_index >= self.rows.len() {
            return false;
        }
        let Some(header) = self.schema().header_name(column) else {
            return false;
        };

        let physical = match self.logical_index(header).and_then(|l| self.physical_index(l)) {
            Some(p) => p,
            None => {
                let logical = match self.logical_index(header) {
                    Some(l) => l,
                    None => {
                        self.headers.push(header.to_string());
                        self.header_index
                            .insert(header.to_string(), self.headers.len() - 1);
                        self.headers.len() - 1
                    }
                };
                self.column_order.push(logical);
                let physical = self.column_order.len() - 1;
                // Unmapped cells at the new position must not leak into it
                for row in &mut self.rows {
                    row.truncate(physical);
                }
                physical
            }
        };

        let row = &mut self.rows[row_index];
        if row.len() <= physical {
            row.resize(physical + 1, String::new());
        }
        row[physical] = value.into();
        true
    }

    /// Remove a row
    pub fn delete_row(&mut self, index: usize) -> bool {
        if index >= self.rows.len() {
            return false;
        }
        self.snapshot();
        self.rows.remove(index);
        true
    }

    /// Remove the column shown at physical position `index`
    ///
    /// The cell is dropped from every row that has it and the position is
    /// removed from the column order. Header names and the logical indices of
    /// other columns are untouched.
    pub fn delete_column(&mut self, index: usize) -> bool {
        if index >= self.column_order.len() {
            return false;
        }
        self.snapshot();
        for row in &mut self.rows {
            if index < row.len() {
                row.remove(index);
            }
        }
        self.column_order.remove(index);
        true
    }

    /// Drop rows without a usable latitude/longitude
    ///
    /// Missing, non-numeric and exactly-zero coordinates count as unusable.
    /// Returns the number of removed rows.
    pub fn remove_rows_without_position(&mut self) -> usize {
        let keep: Vec<bool> = self
            .rows
            .iter()
            .map(|row| {
                let lat = parse_opt(self.column(row, Column::Latitude));
                let lng = parse_opt(self.column(row, Column::Longitude));
                matches!((lat, lng), (Some(lat), Some(lng)) if lat != 0.0 && lng != 0.0)
            })
            .collect();

        let removed = keep.iter().filter(|k| !**k).count();
        if removed == 0 {
            return 0;
        }

        self.snapshot();
        let mut flags = keep.into_iter();
        self.rows.retain(|_| flags.next().unwrap_or(true));
        removed
    }

    /// Revert the last structural edit
    pub fn undo(&mut self) -> bool {
        match self.history.pop() {
            Some(snapshot) => {
                self.column_order = snapshot.column_order;
                self.rows = snapshot.rows;
                true
            }
            None => false,
        }
    }

    /// Number of edits that can be undone
    pub fn undo_depth(&self) -> usize {
        self.history.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::{hash_color, MemoryColorStore};
    use crate::schema::LegacySchema;

    fn row(cells: &[&str]) -> Row {
        cells.iter().map(|c| c.to_string()).collect()
    }

    fn spreadsheet() -> Dataset {
        let mut ds = Dataset::new();
        ds.set_header([
            "Name",
            "Latitude",
            "Longitude",
            "Planar Orientation Strike",
            "Planar Orientation Dip",
            "Tag:Granite",
            "Tag:Schist",
        ]);
        ds.set_data(
            vec![
                row(&["a", "10", "20", "45", "30", "X", ""]),
                row(&["b", "11", "21", "", "", "", "X"]),
                row(&["c", "12", "22", "x", "30", "X", "X"]),
                row(&["d", "0", "22", "", "", "", ""]),
            ],
            HeaderMode::Preset,
        )
        .unwrap();
        ds
    }

    #[test]
    fn test_get_column_by_name() {
        let ds = spreadsheet();
        let r = ds.row(0).unwrap();
        assert_eq!(ds.get_column(r, "Latitude"), Some("10"));
        assert_eq!(ds.get_column(r, "Notes"), None);
        assert_eq!(ds.column(r, Column::Longitude), Some("20"));
    }

    #[test]
    fn test_short_row_is_not_present() {
        let ds = spreadsheet();
        let short = row(&["a", "10"]);
        assert_eq!(ds.get_column(&short, "Longitude"), None);
        assert_eq!(ds.get_column(&short, "Latitude"), Some("10"));
    }

    #[test]
    fn test_empty_cell_is_present() {
        let ds = spreadsheet();
        let r = ds.row(1).unwrap();
        assert_eq!(ds.column(r, Column::PlanarStrike), Some(""));
        assert_eq!(ds.text(r, Column::PlanarStrike), None);
    }

    #[test]
    fn test_set_data_requires_schema() {
        let mut ds = Dataset::new();
        let err = ds.set_data(vec![row(&["1"])], HeaderMode::Preset);
        assert!(matches!(err, Err(Error::SchemaNotSet)));
        let err = ds.set_data(Vec::new(), HeaderMode::FirstRow);
        assert!(matches!(err, Err(Error::MissingHeaderRow)));
    }

    #[test]
    fn test_header_row_mode() {
        let mut ds = Dataset::new();
        ds.set_data(
            vec![
                row(&["Latitude", "Longitude"]),
                row(&["1", "2"]),
                row(&["3", "4"]),
            ],
            HeaderMode::FirstRow,
        )
        .unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.column_order(), &[0, 1]);
        assert_eq!(ds.get_column(ds.row(1).unwrap(), "Longitude"), Some("4"));
    }

    #[test]
    fn test_formation_first_match_wins() {
        let ds = spreadsheet();
        assert_eq!(ds.get_formation(ds.row(0).unwrap()), "Granite");
        assert_eq!(ds.get_formation(ds.row(1).unwrap()), "Schist");
        assert_eq!(ds.get_formation(ds.row(2).unwrap()), "Granite");
        assert_eq!(ds.get_formation(ds.row(3).unwrap()), DEFAULT_TAG);
        assert_eq!(ds.tag_of(ds.row(3).unwrap()), None);
    }

    #[test]
    fn test_marker_is_trimmed() {
        let ds = spreadsheet();
        let r = row(&["e", "1", "1", "", "", " X ", ""]);
        assert_eq!(ds.get_formation(&r), "Granite");
        let r = row(&["e", "1", "1", "", "", "x", ""]);
        assert_eq!(ds.get_formation(&r), DEFAULT_TAG);
    }

    #[test]
    fn test_unique_formations_and_colors() {
        let ds = spreadsheet();
        assert_eq!(
            ds.get_unique_formations(),
            vec!["Granite".to_string(), "Schist".to_string(), DEFAULT_TAG.to_string()]
        );
        assert_eq!(ds.tag_colors().len(), 3);
        assert_eq!(ds.color_of("Granite"), hash_color("Granite"));
        assert_eq!(ds.get_row_color(ds.row(1).unwrap()), hash_color("Schist"));
        assert_eq!(ds.color_of("Unknown"), FALLBACK_COLOR);
    }

    #[test]
    fn test_duplicate_tag_headers_collapse() {
        let mut ds = Dataset::new();
        ds.set_header(["Tag:A", "Tag:B", "Tag:A"]);
        assert_eq!(
            ds.get_unique_formations(),
            vec!["A".to_string(), "B".to_string(), DEFAULT_TAG.to_string()]
        );
    }

    #[test]
    fn test_persisted_colors_override_hash() {
        let store: Arc<dyn ColorStore> = Arc::new(MemoryColorStore::new());

        let mut first = Dataset::with_color_store(store.clone());
        first.set_header(["Latitude", "Tag:Granite"]);
        assert!(first.set_tag_color("Granite", "#00ff00").unwrap());
        assert!(!first.set_tag_color("Basalt", "#00ff00").unwrap());

        let mut second = Dataset::with_color_store(store);
        second.set_header(["Tag:Schist", "Tag:Granite"]);
        assert_eq!(second.color_of("Granite"), "#00ff00");
        assert_eq!(second.color_of("Schist"), hash_color("Schist"));
    }

    #[test]
    fn test_validate_longitude() {
        let ds = spreadsheet();
        // Longitude shown at physical position 2
        assert_eq!(ds.validate_cell("20", 2), Some(true));
        assert_eq!(ds.validate_cell("-180", 2), Some(true));
        assert_eq!(ds.validate_cell("180", 2), Some(true));
        assert_eq!(ds.validate_cell("180.5", 2), Some(false));
        assert_eq!(ds.validate_cell("east", 2), Some(false));
        assert_eq!(ds.validate_cell("anything", 0), None);
        assert_eq!(ds.validate_cell("1", 99), None);
    }

    #[test]
    fn test_validate_other_domains() {
        let ds = spreadsheet();
        assert_eq!(ds.validate_cell("90", 1), Some(true));
        assert_eq!(ds.validate_cell("-91", 1), Some(false));
        assert_eq!(ds.validate_cell("0", 3), Some(true));
        assert_eq!(ds.validate_cell("360", 3), Some(false));
        assert_eq!(ds.validate_cell("90", 4), Some(true));
        assert_eq!(ds.validate_cell("90.1", 4), Some(false));
        assert_eq!(ds.validate_cell("X", 5), None);
    }

    #[test]
    fn test_validation_grid_shape() {
        let ds = spreadsheet();
        let grid = ds.validation_grid();
        assert_eq!(grid.len(), 4);
        assert_eq!(grid[0][0], None);
        assert_eq!(grid[0][1], Some(true));
        assert_eq!(grid[2][3], Some(false));
    }

    #[test]
    fn test_delete_column_keeps_lookups() {
        let mut ds = spreadsheet();
        assert!(ds.delete_column(1));
        let r = ds.row(0).unwrap();
        assert_eq!(ds.get_column(r, "Latitude"), None);
        assert_eq!(ds.get_column(r, "Longitude"), Some("20"));
        assert_eq!(ds.get_column(r, "Name"), Some("a"));
        assert_eq!(ds.column_order(), &[0, 2, 3, 4, 5, 6]);
        assert_eq!(ds.validate_cell("200", 1), Some(false));
        assert_eq!(ds.get_formation(ds.row(1).unwrap()), "Schist");
    }

    #[test]
    fn test_delete_out_of_range_is_noop() {
        let mut ds = Dataset::new();
        assert!(!ds.delete_column(0));
        assert!(!ds.delete_row(0));
        assert_eq!(ds.undo_depth(), 0);
    }

    #[test]
    fn test_undo_restores_edits() {
        let mut ds = spreadsheet();
        ds.delete_row(0);
        ds.delete_column(0);
        assert_eq!(ds.len(), 3);
        assert!(ds.undo());
        assert_eq!(ds.column_order().len(), 7);
        assert!(ds.undo());
        assert_eq!(ds.len(), 4);
        assert_eq!(ds.get_column(ds.row(0).unwrap(), "Name"), Some("a"));
        assert!(!ds.undo());
    }

    #[test]
    fn test_remove_rows_without_position() {
        let mut ds = spreadsheet();
        assert_eq!(ds.remove_rows_without_position(), 1);
        assert_eq!(ds.len(), 3);
        assert_eq!(ds.remove_rows_without_position(), 0);
        assert!(ds.undo());
        assert_eq!(ds.len(), 4);
    }

    #[test]
    fn test_planar_orientation() {
        let ds = spreadsheet();
        assert_eq!(
            ds.get_planar_orientation(ds.row(0).unwrap()),
            Some(Orientation::new(45.0, 30.0))
        );
        assert_eq!(ds.get_planar_orientation(ds.row(1).unwrap()), None);
        assert_eq!(ds.get_planar_orientation(ds.row(2).unwrap()), None);
        assert_eq!(ds.get_linear_orientation(ds.row(0).unwrap()), None);
    }

    #[test]
    fn test_orientation_preference() {
        let mut ds = Dataset::new();
        ds.set_header([
            "Planar Orientation Strike",
            "Planar Orientation Dip",
            "Linear Orientation Trend",
            "Linear Orientation Plunge",
        ]);
        let both = row(&["10", "20", "30", "40"]);
        assert_eq!(
            ds.orientation(&both, OrientationKind::Planar),
            RowOrientation::Planar(Orientation::new(10.0, 20.0))
        );
        assert_eq!(
            ds.orientation(&both, OrientationKind::Linear),
            RowOrientation::Linear(Orientation::new(30.0, 40.0))
        );
        let linear_only = row(&["", "", "30", "40"]);
        assert_eq!(
            ds.orientation(&linear_only, OrientationKind::Planar),
            RowOrientation::Linear(Orientation::new(30.0, 40.0))
        );
        let none = row(&["", "", "", ""]);
        assert!(ds.orientation(&none, OrientationKind::Planar).is_none());
    }

    #[test]
    fn test_legacy_facing_correction() {
        let mut ds = Dataset::new();
        let mut rows: Vec<Row> = vec![LegacySchema::HEADERS.iter().map(|h| h.to_string()).collect()];
        rows.push(row(&["s1", "38", "-78", "", "45", "30", "NW", "red", "", ""]));
        rows.push(row(&["s2", "38", "-78", "", "45", "30", "SE", "red", "", ""]));
        ds.set_data(rows, HeaderMode::FirstRow).unwrap();

        assert_eq!(ds.schema().name(), "legacy");
        assert_eq!(
            ds.get_planar_orientation(ds.row(0).unwrap()),
            Some(Orientation::new(225.0, 30.0))
        );
        assert_eq!(
            ds.get_planar_orientation(ds.row(1).unwrap()),
            Some(Orientation::new(45.0, 30.0))
        );
    }

    #[test]
    fn test_spreadsheet_has_no_facing_correction() {
        let mut ds = Dataset::new();
        ds.set_header([
            "Planar Orientation Strike",
            "Planar Orientation Dip",
            "Planar Orientation Facing",
        ]);
        let r = row(&["45", "30", "NW"]);
        assert_eq!(ds.get_planar_orientation(&r), Some(Orientation::new(45.0, 30.0)));
    }

    #[test]
    fn test_position_from_columns_and_line() {
        let mut ds = Dataset::new();
        ds.set_header(["Latitude", "Longitude", "Altitude(m)", "Real World Coordinates"]);

        let direct = row(&["10", "20", "150", "LINESTRING (1 2, 3 4)"]);
        assert_eq!(ds.get_lat_lng_alt(&direct), Some(Position::new(10.0, 20.0, 150.0)));

        let from_line = row(&["", "", "", "LINESTRING (1 2, 3 4)"]);
        assert_eq!(ds.get_lat_lng_alt(&from_line), Some(Position::new(2.0, 1.0, 0.0)));

        let nothing = row(&["", "", "", ""]);
        assert_eq!(ds.get_lat_lng_alt(&nothing), None);

        let broken = row(&["", "", "", "LINESTRING (1 x)"]);
        assert_eq!(ds.get_lat_lng_alt(&broken), None);
        assert!(ds.get_line(&broken).is_err());
    }

    #[test]
    fn test_set_column_appends_missing_header() {
        let mut ds = Dataset::new();
        ds.set_header(["Latitude", "Longitude"]);
        ds.set_data(vec![row(&["1", "2"]), row(&["3"])], HeaderMode::Preset)
            .unwrap();

        assert!(ds.set_column(1, Column::Altitude, "812"));
        assert!(ds.has_column(Column::Altitude));
        assert_eq!(ds.altitude(ds.row(1).unwrap()), Some(812.0));
        assert_eq!(ds.altitude(ds.row(0).unwrap()), None);
        assert_eq!(ds.row(1).unwrap().len(), 3);
        assert!(!ds.set_column(5, Column::Altitude, "1"));
    }

    #[test]
    fn test_cells_past_header_do_not_become_altitude() {
        let mut ds = Dataset::new();
        ds.set_data(
            vec![
                row(&["Latitude", "Longitude", "Planar Orientation Strike", "Planar Orientation Dip"]),
                row(&["10", "20", "45", "30"]),
                row(&["11", "21", "", "", "777"]),
            ],
            HeaderMode::FirstRow,
        )
        .unwrap();
        assert_eq!(ds.row(1).unwrap().len(), 4);

        assert!(ds.set_column(0, Column::Altitude, "1000"));
        assert_eq!(ds.altitude(ds.row(0).unwrap()), Some(1000.0));
        assert_eq!(ds.altitude(ds.row(1).unwrap()), None);
    }

    #[test]
    fn test_new_column_ignores_unmapped_cells() {
        let mut ds = Dataset::new();
        ds.set_header(["Latitude", "Longitude"]);
        ds.set_data(vec![row(&["1", "2"]), row(&["3", "4"])], HeaderMode::Preset)
            .unwrap();
        // A narrower schema leaves the old cells past the mapping
        ds.set_header(["Latitude"]);

        assert!(ds.set_column(0, Column::Altitude, "5"));
        assert_eq!(ds.altitude(ds.row(0).unwrap()), Some(5.0));
        assert_eq!(ds.altitude(ds.row(1).unwrap()), None);
    }
}
