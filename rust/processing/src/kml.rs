// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! KML element writer
//!
//! Thin layer over `quick_xml::Writer` that knows the handful of KML elements
//! the exporter emits. Text and attribute values are escaped by quick-xml;
//! descriptions go into CDATA sections.

use geosym_geometry::{AltitudeMode, Polyline, Vertex};
use quick_xml::events::{BytesCData, BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use crate::{Error, Result};

pub const KML_NS: &str = "http://www.opengis.net/kml/2.2";
pub const GX_NS: &str = "http://www.google.com/kml/ext/2.2";
pub const ATOM_NS: &str = "http://www.w3.org/2005/Atom";

/// `lng,lat,alt` tuples separated by spaces
pub fn format_coordinates<'a, I>(vertices: I) -> String
where
    I: IntoIterator<Item = &'a Vertex>,
{
    vertices
        .into_iter()
        .map(|v| format!("{},{},{}", v.x, v.y, v.z))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Streaming KML writer into an in-memory buffer
pub struct KmlWriter {
    xml: Writer<Vec<u8>>,
}

impl Default for KmlWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl KmlWriter {
    pub fn new() -> Self {
        Self {
            xml: Writer::new_with_indent(Vec::new(), b' ', 2),
        }
    }

    fn emit(&mut self, event: Event<'_>) -> Result<()> {
        self.xml
            .write_event(event)
            .map_err(|e| Error::Xml(e.to_string()))
    }

    /// XML declaration
    pub fn declaration(&mut self) -> Result<()> {
        self.emit(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
    }

    /// `<kml>` root with the KML, gx and atom namespaces
    pub fn open_root(&mut self) -> Result<()> {
        let mut root = BytesStart::new("kml");
        root.push_attribute(("xmlns", KML_NS));
        root.push_attribute(("xmlns:gx", GX_NS));
        root.push_attribute(("xmlns:kml", KML_NS));
        root.push_attribute(("xmlns:atom", ATOM_NS));
        self.emit(Event::Start(root))
    }

    pub fn start(&mut self, name: &str) -> Result<()> {
        self.emit(Event::Start(BytesStart::new(name)))
    }

    pub fn start_with_id(&mut self, name: &str, id: &str) -> Result<()> {
        let mut element = BytesStart::new(name);
        element.push_attribute(("id", id));
        self.emit(Event::Start(element))
    }

    pub fn end(&mut self, name: &str) -> Result<()> {
        self.emit(Event::End(BytesEnd::new(name)))
    }

    /// `<name>text</name>`
    pub fn text_element(&mut self, name: &str, text: &str) -> Result<()> {
        self.start(name)?;
        self.emit(Event::Text(BytesText::new(text)))?;
        self.end(name)
    }

    /// Element with attributes and escaped text content
    pub fn text_element_with(&mut self, name: &str, attributes: &[(&str, &str)], text: &str) -> Result<()> {
        let mut element = BytesStart::new(name);
        for attribute in attributes {
            element.push_attribute(*attribute);
        }
        self.emit(Event::Start(element))?;
        self.emit(Event::Text(BytesText::new(text)))?;
        self.end(name)
    }

    /// `<name><![CDATA[text]]></name>`
    ///
    /// A `]]>` inside `text` is split across two CDATA sections.
    pub fn cdata_element(&mut self, name: &str, text: &str) -> Result<()> {
        self.start(name)?;
        let parts: Vec<&str> = text.split("]]>").collect();
        let last = parts.len() - 1;
        for (i, part) in parts.iter().enumerate() {
            let mut chunk = String::with_capacity(part.len() + 3);
            if i > 0 {
                chunk.push('>');
            }
            chunk.push_str(part);
            if i < last {
                chunk.push_str("]]");
            }
            self.emit(Event::CData(BytesCData::new(chunk)))?;
        }
        self.end(name)
    }

    /// Empty element, e.g. `<Icon/>`
    pub fn empty(&mut self, name: &str) -> Result<()> {
        self.emit(Event::Empty(BytesStart::new(name)))
    }

    /// `<Point>` with altitude mode and one coordinate
    pub fn point(&mut self, at: &Vertex, mode: AltitudeMode) -> Result<()> {
        self.start("Point")?;
        self.text_element("altitudeMode", mode.as_str())?;
        self.text_element("coordinates", &format_coordinates([at]))?;
        self.end("Point")
    }

    /// `<LineString>` with tessellation, altitude mode and coordinates
    pub fn line_string(&mut self, line: &Polyline, mode: AltitudeMode) -> Result<()> {
        self.start("LineString")?;
        self.text_element("tessellate", "1")?;
        self.text_element("altitudeMode", mode.as_str())?;
        self.text_element("coordinates", &format_coordinates(line.vertices.iter()))?;
        self.end("LineString")
    }

    /// Finish and return the document text
    pub fn finish(self) -> Result<String> {
        String::from_utf8(self.xml.into_inner()).map_err(|e| Error::Xml(e.to_string()))
    }
}
