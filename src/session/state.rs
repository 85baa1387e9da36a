//! Picker session state
//!
//! Owns the catalog, the selection and the browse filters. The catalog
//! arrives asynchronously; until it does, every mutation is a no-op and the
//! browse list is empty. Once it arrives the selection is restored from the
//! location exactly once, and from then on every committed selection change
//! is pushed to the subscribed observers.

use crate::catalog::{Catalog, CatalogItem, CharacterClass, ItemKind};
use crate::picker::{visible_items, ClassFilter, FilterState, Selection, ToggleOutcome, TypeFilter};
use crate::share::{decode, SharedLocation};

/// Notified after each committed selection change
pub trait SelectionObserver {
    fn selection_changed(&mut self, selection: &Selection);
}

/// The single picker session
pub struct Session {
    /// Loaded catalog (empty until `catalog_ready`)
    catalog: Catalog,
    /// Gate: nothing reads the catalog before this is set
    loaded: bool,
    selection: Selection,
    filters: FilterState,
    /// Where the selection is imported from on load
    location: SharedLocation,
    observers: Vec<Box<dyn SelectionObserver>>,
}

impl Session {
    pub fn new(location: SharedLocation, filters: FilterState) -> Self {
        Self {
            catalog: Catalog::default(),
            loaded: false,
            selection: Selection::new(),
            filters,
            location,
            observers: Vec::new(),
        }
    }

    pub fn subscribe(&mut self, observer: Box<dyn SelectionObserver>) {
        self.observers.push(observer);
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Install the loaded catalog and restore the selection from the location.
    ///
    /// Only the first call has any effect; returns whether it was applied.
    pub fn catalog_ready(&mut self, catalog: Catalog) -> bool {
        if self.loaded {
            log::warn!("Catalog delivered twice, ignoring the second copy");
            return false;
        }

        self.catalog = catalog;
        self.loaded = true;

        let query = self.location.lock().query().to_string();
        self.selection = decode(&query, &self.catalog);
        log::info!(
            "Restored {} skills and {} perks from location",
            self.selection.len(ItemKind::Skill),
            self.selection.len(ItemKind::Perk)
        );

        self.commit();
        true
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    pub fn location(&self) -> &SharedLocation {
        &self.location
    }

    /// Toggle a catalog entry by name. Returns `None` if the catalog is not
    /// loaded yet or has no such entry.
    pub fn toggle(&mut self, kind: ItemKind, name: &str) -> Option<ToggleOutcome> {
        if !self.loaded {
            return None;
        }
        let item = self.catalog.find(kind, name)?;
        let outcome = self.selection.toggle(kind, item);

        match outcome {
            ToggleOutcome::Full => {
                log::debug!("{} slots full, ignoring {}", kind.name(), name);
            }
            _ => self.commit(),
        }
        Some(outcome)
    }

    pub fn toggle_skill(&mut self, name: &str) -> Option<ToggleOutcome> {
        self.toggle(ItemKind::Skill, name)
    }

    pub fn toggle_perk(&mut self, name: &str) -> Option<ToggleOutcome> {
        self.toggle(ItemKind::Perk, name)
    }

    /// Remove a selected entry. Returns whether anything changed.
    pub fn remove(&mut self, kind: ItemKind, name: &str) -> bool {
        if !self.loaded || !self.selection.remove(kind, name) {
            return false;
        }
        self.commit();
        true
    }

    pub fn remove_skill(&mut self, name: &str) -> bool {
        self.remove(ItemKind::Skill, name)
    }

    pub fn remove_perk(&mut self, name: &str) -> bool {
        self.remove(ItemKind::Perk, name)
    }

    pub fn is_selected(&self, kind: ItemKind, name: &str) -> bool {
        self.selection.is_selected(kind, name)
    }

    /// Add or remove a class from the multi-select class filter
    pub fn toggle_class(&mut self, class: CharacterClass) {
        self.filters.class.toggle(class);
    }

    pub fn set_class_filter(&mut self, class: ClassFilter) {
        self.filters.class = class;
    }

    pub fn clear_class_filter(&mut self) {
        self.filters.class.clear();
    }

    pub fn set_type_filter(&mut self, kind: TypeFilter) {
        self.filters.kind = kind;
    }

    pub fn cycle_type_filter(&mut self) {
        self.filters.kind = self.filters.kind.cycle();
    }

    /// Entries shown in the browse list
    pub fn visible_items(&self) -> Vec<(ItemKind, &CatalogItem)> {
        if !self.loaded {
            return Vec::new();
        }
        visible_items(&self.catalog, &self.filters)
    }

    fn commit(&mut self) {
        for observer in &mut self.observers {
            observer.selection_changed(&self.selection);
        }
    }
}
