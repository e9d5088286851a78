// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Export options

use geosym_geometry::{SymbolSettings, MEAN_EARTH_RADIUS};
use serde::{Deserialize, Serialize};

use crate::Result;

/// Knobs controlling symbol size, grouping and altitude handling
///
/// Every field has a default, so a partial JSON object (or `{}`) is valid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportOptions {
    /// Symbol length in meters
    pub symbol_length: f64,
    /// Symbol height above ground in meters
    pub symbol_height: f64,
    /// Line width in pixels
    pub line_width: f64,
    /// Wrap placemarks in one folder per tag
    pub group_by_tag: bool,
    /// Wrap each placemark and its label in its own folder
    pub group_geometry: bool,
    /// Name of the KML document
    pub document_name: String,
    /// Place symbols relative to row altitudes (absolute altitude mode)
    pub use_altitude: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            symbol_length: 50.0,
            symbol_height: 50.0,
            line_width: 6.0,
            group_by_tag: false,
            group_geometry: false,
            document_name: "file".to_string(),
            use_altitude: false,
        }
    }
}

impl ExportOptions {
    /// Parse options from JSON, filling missing fields with defaults
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Symbol settings for the geometry router
    pub fn symbol_settings(&self) -> SymbolSettings {
        SymbolSettings {
            symbol_length: self.symbol_length,
            symbol_height: self.symbol_height,
            use_altitude: self.use_altitude,
            earth_radius: MEAN_EARTH_RADIUS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = ExportOptions::default();
        assert_eq!(options.symbol_length, 50.0);
        assert_eq!(options.symbol_height, 50.0);
        assert_eq!(options.line_width, 6.0);
        assert!(!options.group_by_tag);
        assert!(!options.group_geometry);
        assert_eq!(options.document_name, "file");
        assert!(!options.use_altitude);
    }

    #[test]
    fn test_partial_json() {
        let options = ExportOptions::from_json(r#"{"group_by_tag": true, "symbol_length": 80}"#).unwrap();
        assert!(options.group_by_tag);
        assert_eq!(options.symbol_length, 80.0);
        assert_eq!(options.symbol_height, 50.0);
        assert_eq!(ExportOptions::from_json("{}").unwrap(), ExportOptions::default());
        assert!(ExportOptions::from_json("[").is_err());
    }

    #[test]
    fn test_symbol_settings() {
        let options = ExportOptions {
            symbol_height: 10.0,
            use_altitude: true,
            ..Default::default()
        };
        let settings = options.symbol_settings();
        assert_eq!(settings.symbol_height, 10.0);
        assert!(settings.use_altitude);
    }
}
