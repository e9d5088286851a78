// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Document assembly
//!
//! Turns dataset rows into placemarks and writes the complete KML document:
//! declaration, root, shared styles, then placemarks, optionally grouped into
//! one folder per tag and/or one folder per placemark.

use geosym_core::{Column, Dataset, OrientationKind};
use geosym_geometry::{Glyph, Shape, SymbolInput, SymbolRouter};

use crate::kml::KmlWriter;
use crate::options::ExportOptions;
use crate::popup::describe;
use crate::style::{dot_style_id, line_style_id, write_styles, LIST_STYLE_ID, NO_ICON_STYLE_ID};
use crate::Result;

/// One exported feature, before serialization
#[derive(Debug, Clone)]
pub struct Placemark {
    /// Index of the source row in the dataset
    pub row_index: usize,
    pub name: String,
    /// HTML popup text
    pub description: String,
    /// `#`-prefixed style reference
    pub style_url: String,
    pub glyph: Glyph,
}

/// Written document plus counts
#[derive(Debug, Clone)]
pub struct Document {
    pub kml: String,
    pub placemarks: usize,
    /// Rows left out because no symbol could be built
    pub skipped: usize,
}

/// Builds placemarks and the KML document for one dataset
pub struct DocumentBuilder<'a> {
    ds: &'a Dataset,
    options: &'a ExportOptions,
    router: SymbolRouter,
}

impl<'a> DocumentBuilder<'a> {
    pub fn new(ds: &'a Dataset, options: &'a ExportOptions) -> Self {
        Self {
            ds,
            options,
            router: SymbolRouter::new(options.symbol_settings()),
        }
    }

    /// Name column, else `<tag>-<row index>`
    fn placemark_name(&self, row_index: usize, row: &[String]) -> String {
        match self.ds.text(row, Column::Name) {
            Some(name) => name.to_string(),
            None => format!("{}-{}", self.ds.get_formation(row), row_index),
        }
    }

    /// Build the placemark of one row
    pub fn placemark(&self, row_index: usize, row: &[String]) -> Result<Placemark> {
        let orientation = self.ds.orientation(row, OrientationKind::Planar);
        let input = SymbolInput {
            position: self.ds.get_lat_lng_alt(row),
            orientation,
            line: self.ds.get_line(row)?,
        };
        let glyph = self.router.route(&input)?;

        let color = self.ds.get_row_color(row);
        let style = if orientation.is_none() {
            dot_style_id(color)
        } else {
            line_style_id(color)
        };

        Ok(Placemark {
            row_index,
            name: self.placemark_name(row_index, row),
            description: describe(self.ds, row),
            style_url: format!("#{style}"),
            glyph,
        })
    }

    /// Placemarks for the given rows; rows without a buildable symbol are
    /// skipped with a warning
    fn placemarks<I>(&self, rows: I, skipped: &mut usize) -> Vec<Placemark>
    where
        I: IntoIterator<Item = usize>,
    {
        rows.into_iter()
            .filter_map(|i| {
                let row = &self.ds.rows()[i];
                match self.placemark(i, row) {
                    Ok(p) => Some(p),
                    Err(e) => {
                        tracing::warn!(row = i, error = %e, "Skipping row");
                        *skipped += 1;
                        None
                    }
                }
            })
            .collect()
    }

    /// Write the complete document
    pub fn build(&self) -> Result<Document> {
        let mut w = KmlWriter::new();
        let mut written = 0;
        let mut skipped = 0;

        w.declaration()?;
        w.open_root()?;
        w.start("Document")?;
        w.text_element("name", &self.options.document_name)?;
        w.text_element("open", "1")?;
        write_styles(&mut w, self.ds.tag_colors(), self.options.line_width)?;

        if self.options.group_by_tag {
            for tag in self.ds.get_unique_formations() {
                let rows = (0..self.ds.len()).filter(|&i| self.ds.get_formation(&self.ds.rows()[i]) == tag);
                let placemarks = self.placemarks(rows, &mut skipped);

                w.start("Folder")?;
                w.text_element("name", &tag)?;
                w.text_element("open", "0")?;
                for p in &placemarks {
                    self.write_placemark(&mut w, p)?;
                }
                w.end("Folder")?;
                written += placemarks.len();
            }
        } else {
            let placemarks = self.placemarks(0..self.ds.len(), &mut skipped);
            for p in &placemarks {
                self.write_placemark(&mut w, p)?;
            }
            written += placemarks.len();
        }

        w.end("Document")?;
        w.end("kml")?;

        Ok(Document {
            kml: w.finish()?,
            placemarks: written,
            skipped,
        })
    }

    fn write_placemark(&self, w: &mut KmlWriter, p: &Placemark) -> Result<()> {
        if self.options.group_geometry {
            w.start("Folder")?;
            w.text_element("name", &p.name)?;
            w.text_element_with("Snippet", &[("maxLines", "1")], &p.description)?;
            w.text_element("styleUrl", &format!("#{LIST_STYLE_ID}"))?;
        }

        w.start("Placemark")?;
        w.text_element("name", &p.name)?;
        w.cdata_element("description", &p.description)?;
        w.text_element("styleUrl", &p.style_url)?;
        write_geometry(w, &p.glyph)?;
        w.end("Placemark")?;

        if let Some(label) = &p.glyph.label {
            w.start("Placemark")?;
            w.text_element("name", &label.text)?;
            w.text_element("styleUrl", &format!("#{NO_ICON_STYLE_ID}"))?;
            w.point(&label.position, p.glyph.altitude_mode)?;
            w.end("Placemark")?;
        }

        if self.options.group_geometry {
            w.end("Folder")?;
        }
        Ok(())
    }
}

fn write_geometry(w: &mut KmlWriter, glyph: &Glyph) -> Result<()> {
    match &glyph.shape {
        Shape::Point(at) => w.point(at, glyph.altitude_mode),
        Shape::Polylines(lines) => {
            w.start("MultiGeometry")?;
            for line in lines {
                w.line_string(line, glyph.altitude_mode)?;
            }
            w.end("MultiGeometry")
        }
    }
}
