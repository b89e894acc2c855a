use geojson::{Feature, FeatureCollection, Value};

use crate::classify::classify_waypoint;
use crate::converter::to_feature_collection;
use crate::coords::Coordinate;
use crate::error::{KmlTrackError, Result};
use crate::options::LoaderOptions;
use crate::parser::parse_kml;
use crate::source::{DocumentFetcher, TrackSource};
use crate::synth::synthesize_waypoints;
use crate::track::{LoadedTrack, Waypoint};

const UNNAMED_POINT: &str = "Punkt";

/// Fetch, parse and extract a track. Never fails: any fetch or parse error is
/// logged and replaced by [`LoadedTrack::fallback`].
pub async fn load_track<F: DocumentFetcher>(
    fetcher: &F,
    source: &TrackSource,
    opts: &LoaderOptions,
) -> LoadedTrack {
    let loaded = match source.resolve(fetcher).await {
        Ok(text) => load_str(&text, opts),
        Err(e) => Err(e),
    };
    or_fallback(loaded)
}

/// Parse a KML document and extract its track and waypoints.
pub fn load_str(kml: &str, opts: &LoaderOptions) -> Result<LoadedTrack> {
    let data = parse_kml(kml)?;
    let fc = to_feature_collection(&data, opts);
    extract_track(&fc, opts)
}

/// Unwrap a load result, substituting the fallback route on error.
pub fn or_fallback(loaded: Result<LoadedTrack>) -> LoadedTrack {
    match loaded {
        Ok(track) => track,
        Err(e) => {
            log::warn!("Failed to load KML track, showing fallback route: {e}");
            LoadedTrack::fallback()
        }
    }
}

/// Extract the track polyline and its waypoints from converted features.
///
/// Line geometries are collected in document order and reduced with the
/// configured [`LinePolicy`](crate::options::LinePolicy). Point geometries
/// become classified waypoints. When a document has no points at all, the
/// waypoints are synthesized from the track instead.
pub fn extract_track(fc: &FeatureCollection, opts: &LoaderOptions) -> Result<LoadedTrack> {
    let mut lines = Vec::new();
    let mut waypoints = Vec::new();

    for feature in &fc.features {
        if let Some(geometry) = &feature.geometry {
            collect_geometry(&geometry.value, feature, &mut lines, &mut waypoints)?;
        }
    }

    let line_count = lines.len();
    let track = opts.line_policy.select(lines);
    if track.is_empty() {
        return Err(KmlTrackError::NoTrack);
    }

    let synthesized = waypoints.is_empty() && opts.synthesize_waypoints;
    if synthesized {
        waypoints = synthesize_waypoints(&track, opts.station_count);
    }

    log::debug!(
        "Loaded track: {} points from {line_count} line(s), {} waypoints{}",
        track.len(),
        waypoints.len(),
        if synthesized { " (synthesized)" } else { "" }
    );

    Ok(LoadedTrack::new(track, waypoints))
}

fn collect_geometry(
    value: &Value,
    feature: &Feature,
    lines: &mut Vec<Vec<Coordinate>>,
    waypoints: &mut Vec<Waypoint>,
) -> Result<()> {
    match value {
        Value::LineString(positions) => lines.push(normalize_line(positions)?),
        Value::MultiLineString(parts) => {
            for positions in parts {
                lines.push(normalize_line(positions)?);
            }
        }
        Value::Point(position) => waypoints.push(feature_waypoint(feature, position)?),
        Value::MultiPoint(positions) => {
            for position in positions {
                waypoints.push(feature_waypoint(feature, position)?);
            }
        }
        Value::GeometryCollection(members) => {
            for member in members {
                collect_geometry(&member.value, feature, lines, waypoints)?;
            }
        }
        _ => {}
    }
    Ok(())
}

fn normalize_line(positions: &[Vec<f64>]) -> Result<Vec<Coordinate>> {
    positions
        .iter()
        .map(|p| Coordinate::from_position(p))
        .collect()
}

fn feature_waypoint(feature: &Feature, position: &[f64]) -> Result<Waypoint> {
    let text = |key: &str| feature.property(key).and_then(|v| v.as_str());
    let raw_name = text("name").unwrap_or_default();
    let name = if raw_name.is_empty() { UNNAMED_POINT } else { raw_name };

    Ok(Waypoint::new(
        Coordinate::from_position(position)?,
        name,
        text("description").unwrap_or_default(),
        classify_waypoint(raw_name),
    ))
}
