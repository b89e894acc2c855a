pub mod catalog;
pub mod classify;
pub mod converter;
pub mod coords;
pub mod error;
pub mod kml_types;
pub mod loader;
pub mod logging;
pub mod markers;
pub mod options;
pub mod parser;
pub mod session;
pub mod source;
pub mod storage;
pub mod synth;
pub mod track;

use std::rc::Rc;

use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::markers::{MarkerKind, UserLocation};
use crate::options::LoaderOptions;
use crate::session::TrackPreview as Preview;
use crate::source::BrowserFetcher;
use crate::storage::LocalStorageStore;
use crate::track::LoadedTrack;

/// Load a KML string into a track and waypoints, returned as a JS object.
/// Malformed input yields the fallback route (`isFallback: true`).
#[wasm_bindgen(js_name = kmlToTrack)]
pub fn kml_to_track(kml_string: &str, options: JsValue) -> Result<JsValue, JsValue> {
    logging::init();

    let opts = parse_options(options)?;
    let loaded = loader::or_fallback(loader::load_str(kml_string, &opts));
    to_js(&loaded)
}

/// Convert a KML string to GeoJSON, returned as a JS object.
#[wasm_bindgen(js_name = kmlToGeoJson)]
pub fn kml_to_geojson(kml_string: &str, options: JsValue) -> Result<JsValue, JsValue> {
    logging::init();

    let opts = parse_options(options)?;
    let data = parser::parse_kml(kml_string)?;
    let fc = converter::to_feature_collection(&data, &opts);
    to_js(&fc)
}

/// Convert a KML string to GeoJSON, returned as a JSON string.
#[wasm_bindgen(js_name = kmlToGeoJsonString)]
pub fn kml_to_geojson_string(kml_string: &str, options: JsValue) -> Result<String, JsValue> {
    logging::init();

    let opts = parse_options(options)?;
    let data = parser::parse_kml(kml_string)?;
    let fc = converter::to_feature_collection(&data, &opts);
    serde_json::to_string(&fc).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// `"start"`, `"end"` or `"station"` for a placemark name.
#[wasm_bindgen(js_name = classifyWaypoint)]
pub fn classify_waypoint(name: &str) -> String {
    classify::classify_waypoint(name).as_str().to_string()
}

/// Leaflet icon options for `"start" | "end" | "station" | "userLocation"`.
#[wasm_bindgen(js_name = markerStyle)]
pub fn marker_style(kind: &str) -> Result<JsValue, JsValue> {
    let kind = MarkerKind::parse(kind)
        .ok_or_else(|| JsValue::from_str(&format!("Unknown marker kind '{kind}'")))?;
    to_js(kind.style())
}

#[wasm_bindgen(js_name = userLocationMarker)]
pub fn user_location_marker(lat: f64, lon: f64, accuracy: f64) -> Result<JsValue, JsValue> {
    to_js(&UserLocation::new(lat, lon, accuracy))
}

#[wasm_bindgen]
pub fn roads() -> Result<JsValue, JsValue> {
    to_js(catalog::roads())
}

#[wasm_bindgen(js_name = fallbackTrack)]
pub fn fallback_track() -> Result<JsValue, JsValue> {
    to_js(&LoadedTrack::fallback())
}

/// Map preview state for one page. Wraps the session in an `Rc` so pending
/// loads can outlive the call that started them.
#[wasm_bindgen]
pub struct TrackPreview {
    inner: Rc<Preview<BrowserFetcher, LocalStorageStore>>,
}

#[wasm_bindgen]
impl TrackPreview {
    #[wasm_bindgen(constructor)]
    pub fn new(options: JsValue) -> Result<TrackPreview, JsValue> {
        logging::init();

        let opts = parse_options(options)?;
        Ok(Self {
            inner: Rc::new(Preview::new(BrowserFetcher, LocalStorageStore, opts)),
        })
    }

    /// Resolves to the loaded track, or `null` if a newer selection
    /// superseded this one.
    pub fn select(&self, road_id: u32) -> js_sys::Promise {
        let inner = Rc::clone(&self.inner);
        wasm_bindgen_futures::future_to_promise(async move {
            match inner.select(road_id).await {
                Some(loaded) => to_js(&loaded),
                None => Ok(JsValue::NULL),
            }
        })
    }

    pub fn clear(&self) {
        self.inner.clear();
    }

    /// Id of the road selected on a previous visit, if still listed.
    #[wasm_bindgen(js_name = restoreSelection)]
    pub fn restore_selection(&self) -> Option<u32> {
        self.inner.restore_selection().map(|road| road.id)
    }

    pub fn current(&self) -> Result<JsValue, JsValue> {
        match self.inner.current() {
            Some(selection) => to_js(&selection.loaded),
            None => Ok(JsValue::NULL),
        }
    }

    #[wasm_bindgen(js_name = isLoading)]
    pub fn is_loading(&self) -> bool {
        self.inner.is_loading()
    }
}

fn parse_options(options: JsValue) -> Result<LoaderOptions, JsValue> {
    if options.is_undefined() || options.is_null() {
        Ok(LoaderOptions::default())
    } else {
        serde_wasm_bindgen::from_value(options).map_err(|e| JsValue::from_str(&e.to_string()))
    }
}

fn to_js<T: Serialize + ?Sized>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(|e| JsValue::from_str(&e.to_string()))
}
