// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! CSV upload decoding into a [`Dataset`].

use csv::{ReaderBuilder, Trim};
use geosym_core::{ColorStore, Dataset, HeaderMode, Row};
use std::sync::Arc;

use crate::error::ApiError;

/// Split CSV text into rows of cells.
///
/// Records may have differing lengths; the header row stays a row here so
/// the dataset can detect its layout.
pub fn parse_rows(content: &str) -> Result<Vec<Row>, ApiError> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);

    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(content.as_bytes());

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        if record.iter().all(str::is_empty) {
            continue;
        }
        rows.push(record.iter().map(str::to_string).collect());
    }
    Ok(rows)
}

/// Load an uploaded CSV, first row as header.
pub fn load_dataset(content: &str, store: Arc<dyn ColorStore>) -> Result<Dataset, ApiError> {
    let rows = parse_rows(content)?;
    let mut ds = Dataset::with_color_store(store);
    ds.set_data(rows, HeaderMode::FirstRow)?;

    tracing::debug!(
        rows = ds.len(),
        columns = ds.headers().len(),
        schema = ds.schema().name(),
        "Loaded CSV upload"
    );
    Ok(ds)
}

#[cfg(test)]
mod tests {
    use super::*;
    use geosym_core::MemoryColorStore;

    #[test]
    fn test_parse_rows_trims_and_skips_blank_lines() {
        let rows = parse_rows("\u{feff}Name, Latitude ,Longitude\n\ns1, 38.5,-78\n,,\ns2,1\n").unwrap();
        assert_eq!(
            rows,
            vec![
                vec!["Name", "Latitude", "Longitude"],
                vec!["s1", "38.5", "-78"],
                vec!["s2", "1"],
            ]
        );
    }

    #[test]
    fn test_quoted_linestring_cell() {
        let rows = parse_rows("Real World Coordinates\n\"LINESTRING (1 2, 3 4)\"\n").unwrap();
        assert_eq!(rows[1][0], "LINESTRING (1 2, 3 4)");
    }

    #[test]
    fn test_load_dataset_uses_first_row_as_header() {
        let ds = load_dataset(
            "Latitude,Longitude,Tag:Shale\n10,20,X\n",
            Arc::new(MemoryColorStore::new()),
        )
        .unwrap();
        assert_eq!(ds.headers(), ["Latitude", "Longitude", "Tag:Shale"]);
        assert_eq!(ds.len(), 1);
        assert_eq!(ds.get_formation(ds.row(0).unwrap()), "Shale");
    }

    #[test]
    fn test_empty_upload_is_rejected() {
        let err = load_dataset("", Arc::new(MemoryColorStore::new())).unwrap_err();
        assert!(matches!(err, ApiError::InvalidCsv(_)));
    }
}
