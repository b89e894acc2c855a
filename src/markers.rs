use serde::Serialize;

use crate::coords::Coordinate;
use crate::track::WaypointKind;

const SHADOW_URL: &str = "https://unpkg.com/leaflet@1.9.4/dist/images/marker-shadow.png";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum MarkerKind {
    Start,
    End,
    Station,
    UserLocation,
}

impl From<WaypointKind> for MarkerKind {
    fn from(kind: WaypointKind) -> Self {
        match kind {
            WaypointKind::Start => Self::Start,
            WaypointKind::End => Self::End,
            WaypointKind::Station => Self::Station,
        }
    }
}

impl MarkerKind {
    pub fn parse(kind: &str) -> Option<Self> {
        match kind {
            "start" => Some(Self::Start),
            "end" => Some(Self::End),
            "station" => Some(Self::Station),
            "userLocation" => Some(Self::UserLocation),
            _ => None,
        }
    }

    pub fn style(self) -> &'static MarkerStyle {
        match self {
            Self::Start => &START,
            Self::End => &END,
            Self::Station => &STATION,
            Self::UserLocation => &USER_LOCATION,
        }
    }
}

/// Leaflet icon options for one marker kind. Sizes and anchors in pixels.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkerStyle {
    pub icon_url: &'static str,
    pub shadow_url: &'static str,
    pub icon_size: [u32; 2],
    pub icon_anchor: [i32; 2],
    pub popup_anchor: [i32; 2],
}

const fn pin(icon_url: &'static str) -> MarkerStyle {
    MarkerStyle {
        icon_url,
        shadow_url: SHADOW_URL,
        icon_size: [25, 41],
        icon_anchor: [12, 41],
        popup_anchor: [1, -34],
    }
}

static START: MarkerStyle = pin(
    "https://raw.githubusercontent.com/pointhi/leaflet-color-markers/master/img/marker-icon-2x-blue.png",
);
static END: MarkerStyle = pin(
    "https://raw.githubusercontent.com/pointhi/leaflet-color-markers/master/img/marker-icon-2x-red.png",
);
static STATION: MarkerStyle = pin(
    "https://raw.githubusercontent.com/pointhi/leaflet-color-markers/master/img/marker-icon-2x-gold.png",
);
static USER_LOCATION: MarkerStyle = pin(
    "https://raw.githubusercontent.com/pointhi/leaflet-color-markers/master/img/marker-icon-2x-green.png",
);

/// A geolocation sample plotted alongside the track.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserLocation {
    pub position: Coordinate,
    /// Radius in meters.
    pub accuracy: f64,
    /// Popup text, e.g. "Dokładność: 12 m".
    pub popup: String,
    pub style: &'static MarkerStyle,
}

impl UserLocation {
    pub fn new(lat: f64, lon: f64, accuracy: f64) -> Self {
        let accuracy = accuracy.max(0.0);
        Self {
            position: Coordinate::new(lat, lon),
            accuracy,
            popup: format!("Dokładność: {} m", accuracy.round()),
            style: MarkerKind::UserLocation.style(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_each_waypoint_kind_has_distinct_icon() {
        let urls: Vec<_> = [WaypointKind::Start, WaypointKind::End, WaypointKind::Station]
            .into_iter()
            .map(|k| MarkerKind::from(k).style().icon_url)
            .collect();
        assert!(urls[0].ends_with("blue.png"));
        assert!(urls[1].ends_with("red.png"));
        assert!(urls[2].ends_with("gold.png"));
    }

    #[test]
    fn test_parse_kind() {
        assert_eq!(MarkerKind::parse("station"), Some(MarkerKind::Station));
        assert_eq!(MarkerKind::parse("userLocation"), Some(MarkerKind::UserLocation));
        assert_eq!(MarkerKind::parse("other"), None);
    }

    #[test]
    fn test_style_serialization() {
        let json = serde_json::to_value(MarkerKind::Start.style()).unwrap();
        assert_eq!(json["iconSize"], serde_json::json!([25, 41]));
        assert_eq!(json["popupAnchor"], serde_json::json!([1, -34]));
    }

    #[test]
    fn test_user_location() {
        let loc = UserLocation::new(49.85, 19.34, 12.4);
        assert_eq!(loc.popup, "Dokładność: 12 m");
        assert!(loc.style.icon_url.ends_with("green.png"));
        assert_eq!(UserLocation::new(0.0, 0.0, -5.0).accuracy, 0.0);
    }

    #[test]
    fn test_user_location_serialization() {
        let json = serde_json::to_value(UserLocation::new(49.85, 19.34, 7.6)).unwrap();
        assert_eq!(json["position"], serde_json::json!([49.85, 19.34]));
        assert_eq!(json["popup"], "Dokładność: 8 m");
        assert_eq!(json["style"]["iconSize"], serde_json::json!([25, 41]));
    }
}
