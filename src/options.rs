use serde::Deserialize;

use crate::coords::Coordinate;
use crate::synth::DEFAULT_STATION_COUNT;

/// Options for loading a KML track.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoaderOptions {
    /// Which line geometry becomes the track when a document has several
    /// (default: first)
    #[serde(default)]
    pub line_policy: LinePolicy,

    /// Number of interior stations to synthesize (default: 14)
    #[serde(default = "default_station_count")]
    pub station_count: usize,

    /// Derive start/station/end markers when the document has no points
    /// (default: true)
    #[serde(default = "default_true")]
    pub synthesize_waypoints: bool,

    /// Keep altitude as the 3rd GeoJSON coordinate value (default: false)
    #[serde(default)]
    pub include_altitude: bool,
}

impl Default for LoaderOptions {
    fn default() -> Self {
        Self {
            line_policy: LinePolicy::default(),
            station_count: DEFAULT_STATION_COUNT,
            synthesize_waypoints: true,
            include_altitude: false,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinePolicy {
    /// Keep the first line part in document order.
    #[default]
    First,
    /// Keep the last line part in document order.
    Last,
    /// Join every line part, in document order, into one track.
    Concatenate,
}

impl LinePolicy {
    pub fn select(self, mut lines: Vec<Vec<Coordinate>>) -> Vec<Coordinate> {
        match self {
            Self::First => lines.into_iter().next().unwrap_or_default(),
            Self::Last => lines.pop().unwrap_or_default(),
            Self::Concatenate => lines.concat(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_station_count() -> usize {
    DEFAULT_STATION_COUNT
}
