use std::cell::Cell;
use std::collections::HashMap;

use kml2track_wasm::error::KmlTrackError;
use kml2track_wasm::loader::load_track;
use kml2track_wasm::options::LoaderOptions;
use kml2track_wasm::session::TrackPreview;
use kml2track_wasm::source::{DocumentFetcher, TrackSource};
use kml2track_wasm::storage::MemoryStore;
use kml2track_wasm::track::LoadedTrack;

/// Serves fixture files by URL and counts requests.
#[derive(Default)]
struct FixtureFetcher {
    docs: HashMap<String, String>,
    calls: Cell<usize>,
}

impl FixtureFetcher {
    fn with(mut self, url: &str, fixture: &str) -> Self {
        let text = std::fs::read_to_string(format!("tests/fixtures/{fixture}")).unwrap();
        self.docs.insert(url.to_string(), text);
        self
    }
}

impl DocumentFetcher for FixtureFetcher {
    async fn fetch_text(&self, url: &str) -> Result<String, KmlTrackError> {
        self.calls.set(self.calls.get() + 1);
        self.docs.get(url).cloned().ok_or_else(|| KmlTrackError::HttpStatus {
            url: url.to_string(),
            status: 404,
        })
    }
}

fn preview(fetcher: FixtureFetcher) -> TrackPreview<FixtureFetcher, MemoryStore> {
    TrackPreview::new(fetcher, MemoryStore::default(), LoaderOptions::default())
}

#[test]
fn test_load_track_from_url() {
    let fetcher = FixtureFetcher::default().with("roads/2.kml", "basic/02_named_stations.kml");
    let source = TrackSource::Url("roads/2.kml".to_string());
    let loaded = pollster::block_on(load_track(&fetcher, &source, &LoaderOptions::default()));
    assert!(!loaded.is_fallback);
    assert_eq!(loaded.waypoints.len(), 4);
}

#[test]
fn test_load_track_unreachable_falls_back() {
    let fetcher = FixtureFetcher::default();
    let source = TrackSource::Url("roads/missing.kml".to_string());
    let loaded = pollster::block_on(load_track(&fetcher, &source, &LoaderOptions::default()));
    assert_eq!(loaded, LoadedTrack::fallback());
}

#[test]
fn test_select_applies_and_persists() {
    let preview = preview(FixtureFetcher::default().with("roads/3.kml", "basic/03_short_route.kml"));

    let loaded = pollster::block_on(preview.select(3)).unwrap();
    assert!(!loaded.is_fallback);
    assert_eq!(loaded.track.len(), 4);
    assert!(!preview.is_loading());

    let current = preview.current().unwrap();
    assert_eq!(current.road_id, 3);
    assert_eq!(current.loaded, loaded);
    assert_eq!(preview.restore_selection().map(|r| r.id), Some(3));
}

#[test]
fn test_select_refetches_every_time() {
    let fetcher = FixtureFetcher::default().with("roads/3.kml", "basic/03_short_route.kml");
    let preview = TrackPreview::new(&fetcher, MemoryStore::default(), LoaderOptions::default());
    let a = pollster::block_on(preview.select(3)).unwrap();
    let b = pollster::block_on(preview.select(3)).unwrap();
    assert_eq!(a, b);
    assert_eq!(fetcher.calls.get(), 2);
}

#[test]
fn test_road_without_track_falls_back() {
    let preview = preview(FixtureFetcher::default());
    let loaded = pollster::block_on(preview.select(14)).unwrap();
    assert!(loaded.is_fallback);
}

#[test]
fn test_unknown_road_falls_back() {
    let preview = preview(FixtureFetcher::default());
    let loaded = pollster::block_on(preview.select(404)).unwrap();
    assert!(loaded.is_fallback);
}

#[test]
fn test_stale_completion_discarded() {
    let preview = preview(FixtureFetcher::default());

    // Slow first request, fast second one.
    let slow = preview.begin(1);
    let fast = preview.begin(2);

    let mut second = LoadedTrack::fallback();
    second.is_fallback = false;
    assert!(preview.complete(fast, 2, second.clone()).is_some());
    assert!(preview.complete(slow, 1, LoadedTrack::fallback()).is_none());

    let current = preview.current().unwrap();
    assert_eq!(current.road_id, 2);
    assert_eq!(current.loaded, second);
}

#[test]
fn test_selecting_other_road_hides_previous_track() {
    let preview = preview(FixtureFetcher::default().with("roads/3.kml", "basic/03_short_route.kml"));
    pollster::block_on(preview.select(3)).unwrap();

    let _pending = preview.begin(5);
    assert!(preview.is_loading());
    assert!(preview.current().is_none());
}

#[test]
fn test_reselecting_same_road_keeps_track_while_loading() {
    let preview = preview(FixtureFetcher::default().with("roads/3.kml", "basic/03_short_route.kml"));
    let loaded = pollster::block_on(preview.select(3)).unwrap();

    let _pending = preview.begin(3);
    assert!(preview.is_loading());
    assert_eq!(preview.current().map(|s| s.loaded), Some(loaded));
}

#[test]
fn test_clear_drops_state_and_in_flight_result() {
    let preview = preview(FixtureFetcher::default().with("roads/3.kml", "basic/03_short_route.kml"));
    pollster::block_on(preview.select(3)).unwrap();

    let pending = preview.begin(5);
    assert!(preview.is_loading());
    preview.clear();
    assert!(!preview.is_loading());
    assert!(preview.current().is_none());
    assert!(preview.complete(pending, 5, LoadedTrack::fallback()).is_none());
    assert!(preview.current().is_none());
}

#[test]
fn test_restore_selection() {
    let preview = preview_with_store(MemoryStore::with_value(7));
    assert_eq!(preview.restore_selection().map(|r| r.name), Some("Św. Józefa"));

    let empty = preview_with_store(MemoryStore::default());
    assert!(empty.restore_selection().is_none());

    let stale = preview_with_store(MemoryStore::with_value(99));
    assert!(stale.restore_selection().is_none());
}

fn preview_with_store(store: MemoryStore) -> TrackPreview<FixtureFetcher, MemoryStore> {
    TrackPreview::new(FixtureFetcher::default(), store, LoaderOptions::default())
}
