use crate::coords::Coordinate;
use crate::track::{Waypoint, WaypointKind};

/// Stations of the Cross.
pub const DEFAULT_STATION_COUNT: usize = 14;

/// Derive waypoints for a track that has no placemark points: a start, up to
/// `station_count` evenly spaced interior stations, and an end.
///
/// Interior stations never reuse the first or last coordinate, so a track of
/// `n` points gets at most `n - 2` of them. A single-point track yields start
/// and end on the same coordinate; an empty track yields nothing.
pub fn synthesize_waypoints(track: &[Coordinate], station_count: usize) -> Vec<Waypoint> {
    let (Some(&first), Some(&last)) = (track.first(), track.last()) else {
        return Vec::new();
    };

    let last_index = track.len() - 1;
    let count = station_count.min(track.len().saturating_sub(2));
    let mut waypoints = Vec::with_capacity(count + 2);

    waypoints.push(Waypoint::new(
        first,
        "Start",
        "Punkt początkowy drogi",
        WaypointKind::Start,
    ));

    for n in 1..=count {
        waypoints.push(Waypoint::new(
            track[station_index(n, count, last_index)],
            format!("Stacja {n}"),
            "Stacja drogi krzyżowej",
            WaypointKind::Station,
        ));
    }

    waypoints.push(Waypoint::new(
        last,
        "Koniec",
        "Punkt końcowy drogi",
        WaypointKind::End,
    ));

    waypoints
}

/// Index of station `n` (1-based) out of `count`, i.e. `n * last / (count + 1)`
/// rounded to nearest. Strictly increasing in `n` and within `1..last` as long
/// as `count < last`.
fn station_index(n: usize, count: usize, last_index: usize) -> usize {
    let (n, parts, last) = (n as u128, count as u128 + 1, last_index as u128);
    // The result never exceeds `last_index`, so it fits back into usize.
    ((2 * n * last + parts) / (2 * parts)) as usize
}
