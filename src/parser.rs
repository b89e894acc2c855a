use quick_xml::errors::IllFormedError;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::error::{KmlTrackError, Result};
use crate::kml_types::*;

/// Parse a KML XML string into KmlData.
///
/// Placemarks are collected wherever they appear (`Document`, nested
/// `Folder`s, or directly under `<kml>`).
pub fn parse_kml(xml: &str) -> Result<KmlData> {
    let mut reader = Reader::from_str(xml);
    let mut data = KmlData::default();
    // Containers (kml, Document, Folder) still open around the cursor.
    let mut open: Vec<Vec<u8>> = Vec::new();

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                if e.local_name().as_ref() == b"Placemark" {
                    data.placemarks.push(parse_placemark(&mut reader)?);
                } else {
                    open.push(e.name().0.to_vec());
                }
            }
            Ok(Event::End(_)) => {
                open.pop();
            }
            Ok(Event::Eof) => match open.last() {
                Some(name) => return Err(truncated(name)),
                None => break,
            },
            Err(e) => return Err(KmlTrackError::XmlParse(e)),
            _ => {}
        }
    }

    Ok(data)
}

/// Parse a <Placemark> element.
/// Called after receiving Event::Start for the placemark.
fn parse_placemark<'a>(reader: &mut Reader<&'a [u8]>) -> Result<Placemark> {
    let mut placemark = Placemark::default();

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => match e.local_name().as_ref() {
                b"name" => placemark.name = Some(read_text(reader, &e)?),
                b"description" => {
                    placemark.description = Some(read_text(reader, &e)?);
                }
                b"Point" => {
                    if let Some(coord) = parse_point(reader)? {
                        placemark.geometries.push(KmlGeometry::Point(coord));
                    }
                }
                b"LineString" => push_line(&mut placemark.geometries, parse_line_string(reader)?),
                b"Track" => push_line(&mut placemark.geometries, parse_gx_track(reader)?),
                b"MultiGeometry" => {
                    parse_multi_geometry(reader, b"MultiGeometry", &mut placemark.geometries)?;
                }
                b"MultiTrack" => {
                    parse_multi_geometry(reader, b"MultiTrack", &mut placemark.geometries)?;
                }
                _ => {
                    // Style, ExtendedData, Polygon, TimeStamp, ...
                    reader
                        .read_to_end(e.name())
                        .map_err(KmlTrackError::XmlParse)?;
                }
            },
            Ok(Event::End(e)) if e.local_name().as_ref() == b"Placemark" => break,
            Ok(Event::Eof) => return Err(truncated(b"Placemark")),
            Err(e) => return Err(KmlTrackError::XmlParse(e)),
            _ => {}
        }
    }

    Ok(placemark)
}

/// Parse the children of a <MultiGeometry> or <gx:MultiTrack>, flattening
/// nested collections into `out`.
fn parse_multi_geometry<'a>(
    reader: &mut Reader<&'a [u8]>,
    end_local_name: &[u8],
    out: &mut Vec<KmlGeometry>,
) -> Result<()> {
    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => match e.local_name().as_ref() {
                b"Point" => {
                    if let Some(coord) = parse_point(reader)? {
                        out.push(KmlGeometry::Point(coord));
                    }
                }
                b"LineString" => push_line(out, parse_line_string(reader)?),
                b"Track" => push_line(out, parse_gx_track(reader)?),
                b"MultiGeometry" => parse_multi_geometry(reader, b"MultiGeometry", out)?,
                _ => {
                    reader
                        .read_to_end(e.name())
                        .map_err(KmlTrackError::XmlParse)?;
                }
            },
            Ok(Event::End(e)) if e.local_name().as_ref() == end_local_name => break,
            Ok(Event::Eof) => return Err(truncated(end_local_name)),
            Err(e) => return Err(KmlTrackError::XmlParse(e)),
            _ => {}
        }
    }

    Ok(())
}

fn push_line(out: &mut Vec<KmlGeometry>, coords: Vec<KmlCoord>) {
    if !coords.is_empty() {
        out.push(KmlGeometry::LineString(coords));
    }
}

/// Parse a <Point>. Returns `None` when it carries no coordinates.
fn parse_point<'a>(reader: &mut Reader<&'a [u8]>) -> Result<Option<KmlCoord>> {
    let mut coord = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => match e.local_name().as_ref() {
                b"coordinates" => {
                    let text = read_text(reader, &e)?;
                    coord = parse_coordinates(&text)?.into_iter().next();
                }
                _ => {
                    reader
                        .read_to_end(e.name())
                        .map_err(KmlTrackError::XmlParse)?;
                }
            },
            Ok(Event::End(e)) if e.local_name().as_ref() == b"Point" => break,
            Ok(Event::Eof) => return Err(truncated(b"Point")),
            Err(e) => return Err(KmlTrackError::XmlParse(e)),
            _ => {}
        }
    }

    Ok(coord)
}

/// Parse a <LineString>.
fn parse_line_string<'a>(reader: &mut Reader<&'a [u8]>) -> Result<Vec<KmlCoord>> {
    let mut coords = Vec::new();

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => match e.local_name().as_ref() {
                b"coordinates" => {
                    let text = read_text(reader, &e)?;
                    coords.extend(parse_coordinates(&text)?);
                }
                _ => {
                    // extrude, tessellate, altitudeMode
                    reader
                        .read_to_end(e.name())
                        .map_err(KmlTrackError::XmlParse)?;
                }
            },
            Ok(Event::End(e)) if e.local_name().as_ref() == b"LineString" => break,
            Ok(Event::Eof) => return Err(truncated(b"LineString")),
            Err(e) => return Err(KmlTrackError::XmlParse(e)),
            _ => {}
        }
    }

    Ok(coords)
}

/// Parse a <gx:Track>. Each <gx:coord> holds `lon lat [alt]` separated by
/// spaces; <when> timestamps are ignored.
fn parse_gx_track<'a>(reader: &mut Reader<&'a [u8]>) -> Result<Vec<KmlCoord>> {
    let mut coords = Vec::new();

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => match e.local_name().as_ref() {
                b"coord" => {
                    let raw = read_text(reader, &e)?;
                    if !raw.is_empty() {
                        coords.push(parse_tuple(&raw, raw.split_whitespace())?);
                    }
                }
                _ => {
                    reader
                        .read_to_end(e.name())
                        .map_err(KmlTrackError::XmlParse)?;
                }
            },
            Ok(Event::End(e)) if e.local_name().as_ref() == b"Track" => break,
            Ok(Event::Eof) => return Err(truncated(b"Track")),
            Err(e) => return Err(KmlTrackError::XmlParse(e)),
            _ => {}
        }
    }

    Ok(coords)
}

/// Parse the body of a <coordinates> element: whitespace-separated
/// `lon,lat[,alt]` tuples.
pub fn parse_coordinates(text: &str) -> Result<Vec<KmlCoord>> {
    text.split_whitespace()
        .map(|tuple| parse_tuple(tuple, tuple.split(',')))
        .collect()
}

fn parse_tuple<'s>(raw: &str, mut parts: impl Iterator<Item = &'s str>) -> Result<KmlCoord> {
    let invalid = || KmlTrackError::InvalidCoordinate {
        value: raw.to_string(),
    };
    let number = |part: &str| part.trim().parse::<f64>().ok().filter(|v| v.is_finite());

    let lon = parts.next().and_then(number).ok_or_else(invalid)?;
    let lat = parts.next().and_then(number).ok_or_else(invalid)?;
    let alt = match parts.next() {
        Some(part) if !part.trim().is_empty() => Some(number(part).ok_or_else(invalid)?),
        _ => None,
    };

    Ok(KmlCoord { lon, lat, alt })
}

/// End of input inside an element that was never closed.
fn truncated(name: &[u8]) -> KmlTrackError {
    KmlTrackError::XmlParse(quick_xml::Error::IllFormed(IllFormedError::MissingEndTag(
        String::from_utf8_lossy(name).into_owned(),
    )))
}

/// Read the text content of an element, trimmed of surrounding whitespace.
/// Text, CDATA sections (HTML descriptions) and entity references are joined
/// in document order.
fn read_text<'a>(reader: &mut Reader<&'a [u8]>, start: &BytesStart<'_>) -> Result<String> {
    let end_name = start.name().0.to_vec();
    let mut text = String::new();

    loop {
        match reader.read_event() {
            Ok(Event::Text(e)) => text.push_str(std::str::from_utf8(e.as_ref()).unwrap_or_default()),
            Ok(Event::CData(e)) => text.push_str(std::str::from_utf8(e.as_ref()).unwrap_or_default()),
            Ok(Event::GeneralRef(e)) => {
                // &#261; and &#x105; style references
                if let Ok(Some(ch)) = e.resolve_char_ref() {
                    text.push(ch);
                    continue;
                }
                let ch = match &*e {
                    b"amp" => '&',
                    b"lt" => '<',
                    b"gt" => '>',
                    b"quot" => '"',
                    b"apos" => '\'',
                    // No DTD, so nothing else can be declared
                    _ => continue,
                };
                text.push(ch);
            }
            Ok(Event::End(e)) if e.name().0 == end_name.as_slice() => break,
            Ok(Event::Eof) => return Err(truncated(&end_name)),
            Err(e) => return Err(KmlTrackError::XmlParse(e)),
            _ => {}
        }
    }

    Ok(text.trim().to_string())
}
