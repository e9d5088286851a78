// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! LINESTRING parser using nom
//!
//! Trace observations carry their geometry as WKT-style text:
//! `LINESTRING (lng1 lat1, lng2 lat2, ...)`. An optional third ordinate per
//! vertex is accepted and dropped.

use nom::{
    bytes::complete::tag,
    character::complete::{char, multispace0, multispace1},
    combinator::{all_consuming, map, opt},
    multi::separated_list1,
    number::complete::double,
    sequence::{delimited, preceded, terminated, tuple},
    IResult,
};

use crate::error::{Error, Result};

/// Marker token identifying a line geometry cell
pub const LINESTRING_MARKER: &str = "LINESTRING";

/// One `[lng, lat]` vertex
pub type LngLat = [f64; 2];

/// Parse one vertex: `x y` or `x y z`
fn vertex(input: &str) -> IResult<&str, LngLat> {
    map(
        tuple((
            preceded(multispace0, double),
            preceded(multispace1, double),
            opt(preceded(multispace1, double)),
        )),
        |(lng, lat, _)| [lng, lat],
    )(input)
}

/// Parse `LINESTRING ( vertex, vertex, ... )`
fn linestring(input: &str) -> IResult<&str, Vec<LngLat>> {
    preceded(
        tuple((multispace0, tag(LINESTRING_MARKER), multispace0)),
        delimited(
            char('('),
            separated_list1(char(','), terminated(vertex, multispace0)),
            char(')'),
        ),
    )(input)
}

/// Parse a line geometry cell
///
/// Returns `Ok(None)` when the cell does not contain the `LINESTRING` marker
/// and an error when the marker is present but the vertex list is malformed
/// or holds non-finite ordinates.
pub fn parse_linestring(value: &str) -> Result<Option<Vec<LngLat>>> {
    let Some(start) = value.find(LINESTRING_MARKER) else {
        return Ok(None);
    };

    let (_, vertices) = all_consuming(terminated(linestring, multispace0))(&value[start..])
        .map_err(|e| Error::MalformedLine(format!("{}: {}", value.trim(), e)))?;

    if vertices
        .iter()
        .any(|v| !v[0].is_finite() || !v[1].is_finite())
    {
        return Err(Error::MalformedLine(format!(
            "{}: non-finite coordinate",
            value.trim()
        )));
    }

    Ok(Some(vertices))
}
