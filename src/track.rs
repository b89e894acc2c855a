use serde::Serialize;

use crate::coords::{Bounds, Coordinate};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum WaypointKind {
    Start,
    End,
    Station,
}

impl WaypointKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::End => "end",
            Self::Station => "station",
        }
    }
}

/// A named point of interest along a track.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Waypoint {
    pub position: Coordinate,
    pub name: String,
    pub description: String,
    pub kind: WaypointKind,
}

impl Waypoint {
    pub fn new(
        position: Coordinate,
        name: impl Into<String>,
        description: impl Into<String>,
        kind: WaypointKind,
    ) -> Self {
        Self {
            position,
            name: name.into(),
            description: description.into(),
            kind,
        }
    }
}

/// The polyline and markers handed to the map renderer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadedTrack {
    pub track: Vec<Coordinate>,
    pub waypoints: Vec<Waypoint>,
    pub bounds: Option<Bounds>,
    pub is_fallback: bool,
}

impl LoadedTrack {
    pub fn new(track: Vec<Coordinate>, waypoints: Vec<Waypoint>) -> Self {
        let bounds = Bounds::of(&track);
        Self {
            track,
            waypoints,
            bounds,
            is_fallback: false,
        }
    }

    /// Fixed route around Andrychów shown whenever a track cannot be loaded,
    /// so the map never ends up empty.
    pub fn fallback() -> Self {
        let track = vec![
            Coordinate::new(49.8546, 19.3438),
            Coordinate::new(49.8776, 19.3092),
            Coordinate::new(49.8658, 19.6753),
        ];
        let waypoints = vec![
            Waypoint::new(track[0], "Start", "Punkt początkowy", WaypointKind::Start),
            Waypoint::new(track[1], "Stacja 7", "Stacja drogi krzyżowej", WaypointKind::Station),
            Waypoint::new(track[2], "Koniec", "Punkt końcowy", WaypointKind::End),
        ];
        Self {
            is_fallback: true,
            ..Self::new(track, waypoints)
        }
    }
}
