use std::cell::Cell;

/// `localStorage` key holding the last selected road id.
pub const SELECTED_ROUTE_KEY: &str = "selectedRouteId";

/// Best-effort persistence of the last selected road.
pub trait SelectionStore {
    /// `None` when nothing was stored or the value is unreadable.
    fn load(&self) -> Option<u32>;
    fn save(&self, road_id: u32);
}

/// Browser `localStorage` backed store. Silently does nothing when storage
/// is unavailable (private mode, no window).
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorageStore;

impl LocalStorageStore {
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok()?
    }
}

impl SelectionStore for LocalStorageStore {
    fn load(&self) -> Option<u32> {
        let value = Self::storage()?.get_item(SELECTED_ROUTE_KEY).ok()??;
        parse_road_id(&value)
    }

    fn save(&self, road_id: u32) {
        let Some(storage) = Self::storage() else { return };
        if storage
            .set_item(SELECTED_ROUTE_KEY, &road_id.to_string())
            .is_err()
        {
            log::warn!("Could not persist selected road {road_id}");
        }
    }
}

/// In-memory store, for hosts without `localStorage`.
#[derive(Debug, Default)]
pub struct MemoryStore {
    value: Cell<Option<u32>>,
}

impl MemoryStore {
    pub fn with_value(road_id: u32) -> Self {
        Self {
            value: Cell::new(Some(road_id)),
        }
    }
}

impl SelectionStore for MemoryStore {
    fn load(&self) -> Option<u32> {
        self.value.get()
    }

    fn save(&self, road_id: u32) {
        self.value.set(Some(road_id));
    }
}

fn parse_road_id(value: &str) -> Option<u32> {
    value.trim().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_road_id() {
        assert_eq!(parse_road_id("7"), Some(7));
        assert_eq!(parse_road_id(" 12 "), Some(12));
        assert_eq!(parse_road_id(""), None);
        assert_eq!(parse_road_id("null"), None);
        assert_eq!(parse_road_id("-3"), None);
    }

    #[test]
    fn test_memory_store() {
        let store = MemoryStore::default();
        assert_eq!(store.load(), None);
        store.save(5);
        store.save(9);
        assert_eq!(store.load(), Some(9));
    }
}
