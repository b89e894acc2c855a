use crate::track::WaypointKind;

const START_MARKERS: [&str; 2] = ["start", "początek"];
const END_MARKERS: [&str; 2] = ["koniec", "meta"];

/// Label a named placemark as start, end or station from its name.
///
/// Case-insensitive substring heuristic; start markers win over end markers.
/// A station literally named "Start ..." will be misclassified, which is
/// acceptable for the known set of route files.
pub fn classify_waypoint(name: &str) -> WaypointKind {
    let lower = name.to_lowercase();
    if START_MARKERS.iter().any(|m| lower.contains(m)) {
        WaypointKind::Start
    } else if END_MARKERS.iter().any(|m| lower.contains(m)) {
        WaypointKind::End
    } else {
        WaypointKind::Station
    }
}
