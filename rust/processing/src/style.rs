// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! KML styles derived from tag colors
//!
//! Every tag color yields two shared styles: a line style for oriented symbols
//! and a shaded-dot icon style for plain points. Style ids are derived from
//! the hex digits of the color, so tags with the same color share styles.

use geosym_core::TagColor;
use rustc_hash::FxHashSet;

use crate::kml::KmlWriter;
use crate::Result;

/// Style of dip/plunge label placemarks: no icon, label only
pub const NO_ICON_STYLE_ID: &str = "sn_no_icon";

/// Folder style collapsing a per-placemark folder to one list line
pub const LIST_STYLE_ID: &str = "sn_single_line_list";

const DOT_ICON_HREF: &str = "http://maps.google.com/mapfiles/kml/shapes/shaded_dot.png";

/// Convert `#rrggbb` into KML's `aabbggrr` with full opacity
///
/// Input that is not six hex digits yields opaque black.
pub fn kml_color(color: &str) -> String {
    let hex = color.trim_start_matches('#');
    if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        tracing::warn!(color, "Not a #rrggbb color, using black");
        return "ff000000".to_string();
    }
    let hex = hex.to_ascii_lowercase();
    format!("ff{}{}{}", &hex[4..6], &hex[2..4], &hex[0..2])
}

fn color_key(color: &str) -> String {
    color.trim_start_matches('#').to_ascii_lowercase()
}

/// Id of the line style for a color
pub fn line_style_id(color: &str) -> String {
    format!("_{}", color_key(color))
}

/// Id of the dot icon style for a color
pub fn dot_style_id(color: &str) -> String {
    format!("_dot_{}", color_key(color))
}

/// Write every shared style of the document
///
/// Order: label style, then line and dot style per distinct tag color in tag
/// table order, then the list folder style.
pub fn write_styles(w: &mut KmlWriter, colors: &[TagColor], line_width: f64) -> Result<()> {
    write_no_icon_style(w)?;

    let mut seen = FxHashSet::default();
    for tag in colors {
        if !seen.insert(color_key(&tag.color)) {
            continue;
        }
        write_line_style(w, &tag.color, line_width)?;
        write_dot_style(w, &tag.color)?;
    }

    write_list_style(w)
}

fn write_no_icon_style(w: &mut KmlWriter) -> Result<()> {
    w.start_with_id("Style", NO_ICON_STYLE_ID)?;
    w.start("IconStyle")?;
    w.empty("Icon")?;
    w.end("IconStyle")?;
    w.start("LabelStyle")?;
    w.text_element("scale", "1.0")?;
    w.end("LabelStyle")?;
    w.end("Style")
}

fn write_line_style(w: &mut KmlWriter, color: &str, line_width: f64) -> Result<()> {
    w.start_with_id("Style", &line_style_id(color))?;
    w.start("LineStyle")?;
    w.text_element("color", &kml_color(color))?;
    w.text_element("width", &line_width.to_string())?;
    w.end("LineStyle")?;
    w.end("Style")
}

fn write_dot_style(w: &mut KmlWriter, color: &str) -> Result<()> {
    w.start_with_id("Style", &dot_style_id(color))?;
    w.start("IconStyle")?;
    w.text_element("scale", "1.2")?;
    w.text_element("color", &kml_color(color))?;
    w.start("Icon")?;
    w.text_element("href", DOT_ICON_HREF)?;
    w.end("Icon")?;
    w.end("IconStyle")?;
    w.start("LabelStyle")?;
    w.text_element("color", "00ffffff")?;
    w.end("LabelStyle")?;
    w.end("Style")
}

fn write_list_style(w: &mut KmlWriter) -> Result<()> {
    w.start_with_id("Style", LIST_STYLE_ID)?;
    w.start("ListStyle")?;
    w.text_element("listItemType", "checkHideChildren")?;
    w.text_element("maxSnippetLines", "1")?;
    w.end("ListStyle")?;
    w.end("Style")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kml_color_reorders_channels() {
        assert_eq!(kml_color("#112233"), "ff332211");
        assert_eq!(kml_color("#FF0000"), "ff0000ff");
        assert_eq!(kml_color("abcdef"), "ffefcdab");
        assert_eq!(kml_color("#123"), "ff000000");
    }

    #[test]
    fn test_style_ids() {
        assert_eq!(line_style_id("#A1b2C3"), "_a1b2c3");
        assert_eq!(dot_style_id("#a1b2c3"), "_dot_a1b2c3");
    }

    #[test]
    fn test_styles_are_deduplicated_by_color() {
        let colors = vec![
            TagColor::new("A", "#112233"),
            TagColor::new("B", "#112233"),
            TagColor::new("Undesignated", "#445566"),
        ];
        let mut w = KmlWriter::new();
        write_styles(&mut w, &colors, 6.0).unwrap();
        let out = w.finish().unwrap();

        assert_eq!(out.matches(r#"<Style id="_112233">"#).count(), 1);
        assert_eq!(out.matches(r#"<Style id="_dot_112233">"#).count(), 1);
        assert!(out.contains(r#"<Style id="_445566">"#));
        assert!(out.contains("<width>6</width>"));

        let no_icon = out.find(NO_ICON_STYLE_ID).unwrap();
        let first_line = out.find("_112233").unwrap();
        let list = out.find(LIST_STYLE_ID).unwrap();
        assert!(no_icon < first_line && first_line < list);
    }
}
