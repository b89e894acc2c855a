use geojson::{Feature, FeatureCollection, Geometry, Value};
use serde_json::{Map, Value as JsonValue};

use crate::kml_types::*;
use crate::options::LoaderOptions;

/// Convert parsed KML placemarks to a GeoJSON FeatureCollection.
///
/// One Feature per placemark that has geometry. A placemark with several
/// line geometries becomes a MultiLineString; any other mix becomes a
/// GeometryCollection.
pub fn to_feature_collection(data: &KmlData, opts: &LoaderOptions) -> FeatureCollection {
    let features = data
        .placemarks
        .iter()
        .filter_map(|pm| placemark_to_feature(pm, opts))
        .collect();

    FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    }
}

fn placemark_to_feature(pm: &Placemark, opts: &LoaderOptions) -> Option<Feature> {
    let value = placemark_geometry(&pm.geometries, opts.include_altitude)?;

    let mut props = Map::new();
    insert_optional(&mut props, "name", &pm.name);
    insert_optional(&mut props, "description", &pm.description);

    Some(Feature {
        bbox: None,
        geometry: Some(Geometry::new(value)),
        id: None,
        properties: Some(props),
        foreign_members: None,
    })
}

fn placemark_geometry(geometries: &[KmlGeometry], include_altitude: bool) -> Option<Value> {
    match geometries {
        [] => None,
        [single] => Some(geometry_value(single, include_altitude)),
        many if many.iter().all(KmlGeometry::is_line) => Some(Value::MultiLineString(
            many.iter()
                .filter_map(|g| match g {
                    KmlGeometry::LineString(coords) => Some(line_coords(coords, include_altitude)),
                    KmlGeometry::Point(_) => None,
                })
                .collect(),
        )),
        many => Some(Value::GeometryCollection(
            many.iter()
                .map(|g| Geometry::new(geometry_value(g, include_altitude)))
                .collect(),
        )),
    }
}

fn geometry_value(geometry: &KmlGeometry, include_altitude: bool) -> Value {
    match geometry {
        KmlGeometry::Point(c) => Value::Point(point_coords(c, include_altitude)),
        KmlGeometry::LineString(coords) => Value::LineString(line_coords(coords, include_altitude)),
    }
}

fn line_coords(coords: &[KmlCoord], include_altitude: bool) -> Vec<Vec<f64>> {
    coords
        .iter()
        .map(|c| point_coords(c, include_altitude))
        .collect()
}

/// Build [lon, lat] or [lon, lat, alt] coordinate array.
fn point_coords(c: &KmlCoord, include_altitude: bool) -> Vec<f64> {
    match (include_altitude, c.alt) {
        (true, Some(alt)) => vec![c.lon, c.lat, alt],
        _ => vec![c.lon, c.lat],
    }
}

fn insert_optional(props: &mut Map<String, JsonValue>, key: &str, value: &Option<String>) {
    if let Some(v) = value {
        props.insert(key.to_string(), JsonValue::String(v.clone()));
    }
}
