//! Selected skills and perks
//!
//! At most two skills and four perks can be chosen at once. Selection order
//! is insertion order and is what the "Selected" panel shows.

use serde::{Deserialize, Serialize};

use crate::catalog::{CatalogItem, ItemKind};

/// What a toggle did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// Item was appended to the selection
    Added,
    /// Item was already selected and has been removed
    Removed,
    /// Capacity reached, nothing changed
    Full,
}

impl ToggleOutcome {
    /// Whether the selection changed
    pub fn changed(&self) -> bool {
        !matches!(self, ToggleOutcome::Full)
    }
}

/// The player's current loadout
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    skills: Vec<CatalogItem>,
    perks: Vec<CatalogItem>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Selected entries of one kind, in the order they were picked
    pub fn items(&self, kind: ItemKind) -> &[CatalogItem] {
        match kind {
            ItemKind::Skill => &self.skills,
            ItemKind::Perk => &self.perks,
        }
    }

    pub fn skills(&self) -> &[CatalogItem] {
        &self.skills
    }

    pub fn perks(&self) -> &[CatalogItem] {
        &self.perks
    }

    fn items_mut(&mut self, kind: ItemKind) -> &mut Vec<CatalogItem> {
        match kind {
            ItemKind::Skill => &mut self.skills,
            ItemKind::Perk => &mut self.perks,
        }
    }

    pub fn len(&self, kind: ItemKind) -> usize {
        self.items(kind).len()
    }

    pub fn is_empty(&self) -> bool {
        self.skills.is_empty() && self.perks.is_empty()
    }

    pub fn is_full(&self, kind: ItemKind) -> bool {
        self.len(kind) >= kind.capacity()
    }

    /// Check if an entry is selected (by name)
    pub fn is_selected(&self, kind: ItemKind, name: &str) -> bool {
        self.items(kind).iter().any(|item| item.name == name)
    }

    /// Select the item, or deselect it if it was already selected.
    ///
    /// Selecting past capacity is silently ignored.
    pub fn toggle(&mut self, kind: ItemKind, item: &CatalogItem) -> ToggleOutcome {
        if self.remove(kind, &item.name) {
            ToggleOutcome::Removed
        } else if self.is_full(kind) {
            ToggleOutcome::Full
        } else {
            self.items_mut(kind).push(item.clone());
            ToggleOutcome::Added
        }
    }

    pub fn toggle_skill(&mut self, item: &CatalogItem) -> ToggleOutcome {
        self.toggle(ItemKind::Skill, item)
    }

    pub fn toggle_perk(&mut self, item: &CatalogItem) -> ToggleOutcome {
        self.toggle(ItemKind::Perk, item)
    }

    /// Remove an entry if present. Returns whether anything was removed.
    pub fn remove(&mut self, kind: ItemKind, name: &str) -> bool {
        let items = self.items_mut(kind);
        let before = items.len();
        items.retain(|item| item.name != name);
        items.len() != before
    }

    pub fn remove_skill(&mut self, name: &str) -> bool {
        self.remove(ItemKind::Skill, name)
    }

    pub fn remove_perk(&mut self, name: &str) -> bool {
        self.remove(ItemKind::Perk, name)
    }

    pub fn clear(&mut self) {
        self.skills.clear();
        self.perks.clear();
    }
}
