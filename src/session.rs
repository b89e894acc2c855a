use std::cell::{Cell, RefCell};

use crate::catalog::{find_road, Road};
use crate::error::{KmlTrackError, Result};
use crate::loader::{load_track, or_fallback};
use crate::options::LoaderOptions;
use crate::source::{DocumentFetcher, TrackSource};
use crate::storage::SelectionStore;
use crate::track::LoadedTrack;

/// Identifies one load request. Only the most recently issued ticket may
/// publish its result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestTicket(u64);

#[derive(Debug, Default)]
pub struct RequestTracker {
    latest: Cell<u64>,
}

impl RequestTracker {
    pub fn begin(&self) -> RequestTicket {
        let next = self.latest.get() + 1;
        self.latest.set(next);
        RequestTicket(next)
    }

    /// Invalidate every ticket issued so far.
    pub fn invalidate(&self) {
        self.begin();
    }

    pub fn is_current(&self, ticket: RequestTicket) -> bool {
        self.latest.get() == ticket.0
    }
}

/// The road currently shown and its loaded track.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    pub road_id: u32,
    pub loaded: LoadedTrack,
}

/// State behind one map preview: which road is selected, whether a load is
/// in flight, and the last applied result.
///
/// Every selection fetches and parses again; nothing is cached across
/// selections.
pub struct TrackPreview<F, S> {
    fetcher: F,
    store: S,
    options: LoaderOptions,
    requests: RequestTracker,
    loading: Cell<bool>,
    current: RefCell<Option<Selection>>,
}

impl<F: DocumentFetcher, S: SelectionStore> TrackPreview<F, S> {
    pub fn new(fetcher: F, store: S, options: LoaderOptions) -> Self {
        Self {
            fetcher,
            store,
            options,
            requests: RequestTracker::default(),
            loading: Cell::new(false),
            current: RefCell::new(None),
        }
    }

    /// Select a road and load its track.
    ///
    /// Returns `None` when another selection (or [`clear`](Self::clear))
    /// happened while this one was loading; the late result is dropped.
    pub async fn select(&self, road_id: u32) -> Option<LoadedTrack> {
        let ticket = self.begin(road_id);
        let loaded = self.load_road(road_id).await;
        self.complete(ticket, road_id, loaded)
    }

    /// Start a request for `road_id`: persist the choice, mark loading and
    /// drop the track of any other road still on screen.
    pub fn begin(&self, road_id: u32) -> RequestTicket {
        self.store.save(road_id);
        self.loading.set(true);
        let mut current = self.current.borrow_mut();
        if current.as_ref().is_some_and(|s| s.road_id != road_id) {
            current.take();
        }
        self.requests.begin()
    }

    /// Publish a finished load if `ticket` is still the latest request.
    pub fn complete(
        &self,
        ticket: RequestTicket,
        road_id: u32,
        loaded: LoadedTrack,
    ) -> Option<LoadedTrack> {
        if !self.requests.is_current(ticket) {
            log::debug!("Discarding stale track for road {road_id}");
            return None;
        }
        self.loading.set(false);
        *self.current.borrow_mut() = Some(Selection {
            road_id,
            loaded: loaded.clone(),
        });
        Some(loaded)
    }

    /// Back to the road list: forget the shown track and ignore any load
    /// still in flight.
    pub fn clear(&self) {
        self.requests.invalidate();
        self.loading.set(false);
        self.current.borrow_mut().take();
    }

    /// The road remembered from a previous visit, if it still exists.
    pub fn restore_selection(&self) -> Option<&'static Road> {
        let road_id = self.store.load()?;
        let road = find_road(road_id);
        if road.is_none() {
            log::info!("Ignoring stored selection of unknown road {road_id}");
        }
        road
    }

    pub fn current(&self) -> Option<Selection> {
        self.current.borrow().clone()
    }

    pub fn is_loading(&self) -> bool {
        self.loading.get()
    }

    async fn load_road(&self, road_id: u32) -> LoadedTrack {
        match road_source(road_id) {
            Ok(source) => load_track(&self.fetcher, &source, &self.options).await,
            Err(e) => or_fallback(Err(e)),
        }
    }
}

fn road_source(road_id: u32) -> Result<TrackSource> {
    let road = find_road(road_id).ok_or(KmlTrackError::UnknownRoad(road_id))?;
    log::info!("Loading track for road {} ({})", road.id, road.name);
    road.track_source()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tracker_latest_wins() {
        let tracker = RequestTracker::default();
        let first = tracker.begin();
        let second = tracker.begin();
        assert!(!tracker.is_current(first));
        assert!(tracker.is_current(second));
        tracker.invalidate();
        assert!(!tracker.is_current(second));
    }
}
