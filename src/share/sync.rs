//! Keeps the location in step with the selection

use std::sync::Arc;

use parking_lot::Mutex;

use super::location::{HistoryMode, Location};
use super::query::encode;
use crate::picker::Selection;
use crate::session::SelectionObserver;

/// Location shared between the session, its observers and the UI
pub type SharedLocation = Arc<Mutex<Location>>;

pub fn shared_location(location: Location) -> SharedLocation {
    Arc::new(Mutex::new(location))
}

/// Writes every committed selection into the location's query string
pub struct UrlSync {
    location: SharedLocation,
    mode: HistoryMode,
}

impl UrlSync {
    pub fn new(location: SharedLocation, mode: HistoryMode) -> Self {
        Self { location, mode }
    }

    pub fn mode(&self) -> HistoryMode {
        self.mode
    }
}

impl SelectionObserver for UrlSync {
    fn selection_changed(&mut self, selection: &Selection) {
        let query = encode(selection);
        let mut location = self.location.lock();
        // Unchanged query would only add a duplicate history entry
        if location.query() == query {
            return;
        }
        location.apply(self.mode, query);
        log::debug!("Updated location: {}", location.href());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{CatalogItem, CharacterClass};

    #[test]
    fn test_writes_encoded_selection() {
        let location = shared_location(Location::parse("/planner"));
        let mut sync = UrlSync::new(location.clone(), HistoryMode::Replace);

        let mut selection = Selection::new();
        selection.toggle_skill(&CatalogItem::new("Cut Throat", "", CharacterClass::Rogue));
        sync.selection_changed(&selection);

        assert_eq!(location.lock().href(), "/planner?skills=Cut%20Throat&perks=");
        assert_eq!(location.lock().history_len(), 1);
    }

    #[test]
    fn test_push_mode_skips_duplicates() {
        let location = shared_location(Location::new());
        let mut sync = UrlSync::new(location.clone(), HistoryMode::Push);
        assert_eq!(sync.mode(), HistoryMode::Push);

        let mut selection = Selection::new();
        selection.toggle_perk(&CatalogItem::new("Ambush", "", CharacterClass::Rogue));
        sync.selection_changed(&selection);
        sync.selection_changed(&selection);

        assert_eq!(location.lock().history_len(), 2);
        assert_eq!(location.lock().query(), "skills=&perks=Ambush");
    }
}
