use serde::Serialize;

use crate::error::{KmlTrackError, Result};

/// A geographic position in decimal degrees, always `(lat, lon)`.
///
/// Serialized as a `[lat, lon]` pair, the order Leaflet expects.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(into = "[f64; 2]")]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinate {
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Swap a GeoJSON/KML `(x=lon, y=lat)` pair into `(lat, lon)`.
    pub const fn from_lon_lat(lon: f64, lat: f64) -> Self {
        Self { lat, lon }
    }

    /// Normalize a GeoJSON position (`[lon, lat, alt?]`). Altitude is dropped.
    pub fn from_position(position: &[f64]) -> Result<Self> {
        match position {
            [lon, lat, ..] => Ok(Self::from_lon_lat(*lon, *lat)),
            _ => Err(KmlTrackError::InvalidCoordinate {
                value: format!("{position:?}"),
            }),
        }
    }
}

impl From<Coordinate> for [f64; 2] {
    fn from(c: Coordinate) -> Self {
        [c.lat, c.lon]
    }
}

/// Bounding box of a track, for fitting the map view.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Bounds {
    pub south_west: Coordinate,
    pub north_east: Coordinate,
}

impl Bounds {
    /// Returns `None` for an empty slice.
    pub fn of(coords: &[Coordinate]) -> Option<Self> {
        let first = *coords.first()?;
        let init = Self {
            south_west: first,
            north_east: first,
        };
        Some(coords.iter().fold(init, |b, c| Self {
            south_west: Coordinate::new(b.south_west.lat.min(c.lat), b.south_west.lon.min(c.lon)),
            north_east: Coordinate::new(b.north_east.lat.max(c.lat), b.north_east.lon.max(c.lon)),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_lon_lat_swaps() {
        let c = Coordinate::from_lon_lat(19.3438, 49.8546);
        assert_eq!(c.lat, 49.8546);
        assert_eq!(c.lon, 19.3438);
    }

    #[test]
    fn test_from_position_drops_altitude() {
        let c = Coordinate::from_position(&[19.0, 49.0, 300.0]).unwrap();
        assert_eq!(c, Coordinate::new(49.0, 19.0));
    }

    #[test]
    fn test_from_position_too_short() {
        assert!(Coordinate::from_position(&[19.0]).is_err());
        assert!(Coordinate::from_position(&[]).is_err());
    }

    #[test]
    fn test_serializes_as_lat_lon_pair() {
        let json = serde_json::to_string(&Coordinate::new(49.8546, 19.3438)).unwrap();
        assert_eq!(json, "[49.8546,19.3438]");
    }

    #[test]
    fn test_bounds() {
        let track = [
            Coordinate::new(49.8546, 19.3438),
            Coordinate::new(49.8776, 19.3092),
            Coordinate::new(49.8658, 19.6753),
        ];
        let b = Bounds::of(&track).unwrap();
        assert_eq!(b.south_west, Coordinate::new(49.8546, 19.3092));
        assert_eq!(b.north_east, Coordinate::new(49.8776, 19.6753));
    }

    #[test]
    fn test_bounds_empty() {
        assert!(Bounds::of(&[]).is_none());
    }
}
