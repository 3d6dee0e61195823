//! Best-effort extraction of congestion fields from a citydata response.
//!
//! The body is scanned for literal tag delimiters rather than parsed as XML.
//! Anything missing or malformed drops the place.

use log::debug;

use crate::{CongestionLevel, CrowdReading, GpsPoint};

/// Marker whose presence means the response carries live congestion data.
const CONGESTION_MARKER: &str = "AREA_CONGEST_LVL";
const LEVEL_OPEN: &str = "<AREA_CONGEST_LVL>";
const LEVEL_CLOSE: &str = "</AREA_CONGEST_LVL>";
const LAT_OPEN: &str = "<LAT>";
const LAT_CLOSE: &str = "</LAT>";
const LNG_OPEN: &str = "<LNG>";
const LNG_CLOSE: &str = "</LNG>";

/// Text between the first `start` tag and the first `end` tag, trimmed.
///
/// Returns `None` when `start` is absent, when `end` is absent, or when the
/// first `end` occurs before the value begins.
pub fn text_between<'a>(content: &'a str, start: &str, end: &str) -> Option<&'a str> {
    let value_start = content.find(start)? + start.len();
    let value_end = content.find(end)?;
    if value_end < value_start {
        return None;
    }
    Some(content[value_start..value_end].trim())
}

/// Build a reading for `place` from a raw citydata response body.
///
/// Returns `None` if the body has no congestion block, if either coordinate
/// is missing, empty or non-numeric, or if the coordinates are out of range.
/// An unrecognised or missing level label still yields a reading with score 0.
pub fn parse_citydata(place: &str, body: &str) -> Option<CrowdReading> {
    if !body.contains(CONGESTION_MARKER) {
        debug!("[citydata] {}: no congestion block in response", place);
        return None;
    }

    let label = text_between(body, LEVEL_OPEN, LEVEL_CLOSE).unwrap_or_default();

    let lat = parse_coordinate(place, "LAT", text_between(body, LAT_OPEN, LAT_CLOSE))?;
    let lng = parse_coordinate(place, "LNG", text_between(body, LNG_OPEN, LNG_CLOSE))?;

    let point = GpsPoint::new(lat, lng);
    if !point.is_valid() {
        debug!("[citydata] {}: coordinates out of range ({}, {})", place, lat, lng);
        return None;
    }

    Some(CrowdReading::new(place, point, CongestionLevel::from_label(label)))
}

fn parse_coordinate(place: &str, field: &str, raw: Option<&str>) -> Option<f64> {
    match raw {
        None | Some("") => {
            debug!("[citydata] {}: missing {}", place, field);
            None
        }
        Some(text) => match text.parse::<f64>() {
            Ok(value) => Some(value),
            Err(e) => {
                debug!("[citydata] {}: bad {} {:?}: {}", place, field, text, e);
                None
            }
        },
    }
}
