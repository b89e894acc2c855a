/// Parsed KML document: every placemark found, in document order.
#[derive(Debug, Default)]
pub struct KmlData {
    pub placemarks: Vec<Placemark>,
}

/// A KML `<Placemark>` with its flattened geometries.
#[derive(Debug, Clone, Default)]
pub struct Placemark {
    pub name: Option<String>,
    pub description: Option<String>,
    pub geometries: Vec<KmlGeometry>,
}

/// A single coordinate tuple as written in KML: `lon,lat[,alt]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KmlCoord {
    pub lon: f64,
    pub lat: f64,
    pub alt: Option<f64>,
}

impl KmlCoord {
    pub fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat, alt: None }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum KmlGeometry {
    Point(KmlCoord),
    /// `<LineString>` or `<gx:Track>`.
    LineString(Vec<KmlCoord>),
}

impl KmlGeometry {
    pub fn is_line(&self) -> bool {
        matches!(self, Self::LineString(_))
    }
}
