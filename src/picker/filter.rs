//! Browse-list filtering
//!
//! Filters only narrow what the browse list shows. They never touch the
//! selection. An empty class filter shows every class, and whether an
//! entry counts as a skill or a perk is decided by the collection it came
//! from.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::catalog::{Catalog, CatalogItem, CharacterClass, ItemKind};

/// Multi-select class filter. Empty means "all classes".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassFilter {
    classes: BTreeSet<CharacterClass>,
}

impl ClassFilter {
    /// Filter that shows every class
    pub fn all() -> Self {
        Self::default()
    }

    /// Filter that shows a single class
    pub fn only(class: CharacterClass) -> Self {
        let mut filter = Self::default();
        filter.classes.insert(class);
        filter
    }

    pub fn is_all(&self) -> bool {
        self.classes.is_empty()
    }

    /// Add the class if missing, otherwise remove it
    pub fn toggle(&mut self, class: CharacterClass) {
        if !self.classes.remove(&class) {
            self.classes.insert(class);
        }
    }

    pub fn clear(&mut self) {
        self.classes.clear();
    }

    /// Whether the class is explicitly part of the filter
    pub fn contains(&self, class: CharacterClass) -> bool {
        self.classes.contains(&class)
    }

    pub fn admits(&self, class: CharacterClass) -> bool {
        self.is_all() || self.classes.contains(&class)
    }

    pub fn classes(&self) -> impl Iterator<Item = CharacterClass> + '_ {
        self.classes.iter().copied()
    }
}

impl FromIterator<CharacterClass> for ClassFilter {
    fn from_iter<I: IntoIterator<Item = CharacterClass>>(iter: I) -> Self {
        Self {
            classes: iter.into_iter().collect(),
        }
    }
}

/// Which collections the browse list shows
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TypeFilter {
    #[default]
    Both,
    Skills,
    Perks,
}

impl TypeFilter {
    pub fn name(&self) -> &'static str {
        match self {
            TypeFilter::Both => "Both Skills & Perks",
            TypeFilter::Skills => "Only Skills",
            TypeFilter::Perks => "Only Perks",
        }
    }

    /// Next option in the dropdown order
    pub fn cycle(&self) -> Self {
        match self {
            TypeFilter::Both => TypeFilter::Skills,
            TypeFilter::Skills => TypeFilter::Perks,
            TypeFilter::Perks => TypeFilter::Both,
        }
    }

    pub fn admits(&self, kind: ItemKind) -> bool {
        match self {
            TypeFilter::Both => true,
            TypeFilter::Skills => kind == ItemKind::Skill,
            TypeFilter::Perks => kind == ItemKind::Perk,
        }
    }
}

/// Current browse-list filters
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterState {
    pub class: ClassFilter,
    pub kind: TypeFilter,
}

impl FilterState {
    pub fn new(class: ClassFilter, kind: TypeFilter) -> Self {
        Self { class, kind }
    }

    /// Class rule first, then type rule
    pub fn admits(&self, kind: ItemKind, item: &CatalogItem) -> bool {
        self.class.admits(item.class) && self.kind.admits(kind)
    }
}

/// Entries of one collection that pass the filters, in source order
pub fn visible_in<'a>(
    items: &'a [CatalogItem],
    kind: ItemKind,
    filters: &FilterState,
) -> Vec<&'a CatalogItem> {
    items
        .iter()
        .filter(|item| filters.admits(kind, item))
        .collect()
}

/// Everything the browse list shows: skills first, then perks
pub fn visible_items<'a>(catalog: &'a Catalog, filters: &FilterState) -> Vec<(ItemKind, &'a CatalogItem)> {
    [ItemKind::Skill, ItemKind::Perk]
        .into_iter()
        .flat_map(|kind| {
            visible_in(catalog.items(kind), kind, filters)
                .into_iter()
                .map(move |item| (kind, item))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_catalog() -> Catalog {
        Catalog::new(
            vec![
                CatalogItem::new("Quick Fire", "", CharacterClass::Ranger).with_cooldown("30s"),
                CatalogItem::new("Hide", "", CharacterClass::Rogue).with_cooldown("40s"),
                CatalogItem::new("Multishot", "", CharacterClass::Ranger).with_cooldown("24s"),
                // Skill without a cooldown is still a skill
                CatalogItem::new("Spell Memory", "", CharacterClass::Wizard),
            ],
            vec![
                CatalogItem::new("Tracking", "", CharacterClass::Ranger),
                CatalogItem::new("Ambush", "", CharacterClass::Rogue),
                // Perk with a cooldown is still a perk
                CatalogItem::new("Sage", "", CharacterClass::Wizard).with_cooldown("10s"),
            ],
        )
    }

    fn names(visible: &[(ItemKind, &CatalogItem)]) -> Vec<String> {
        visible.iter().map(|(_, item)| item.name.clone()).collect()
    }

    #[test]
    fn test_empty_filter_shows_everything_in_order() {
        let catalog = sample_catalog();
        let visible = visible_items(&catalog, &FilterState::default());

        let expected: Vec<String> = catalog
            .skills
            .iter()
            .chain(catalog.perks.iter())
            .map(|i| i.name.clone())
            .collect();
        assert_eq!(names(&visible), expected);
        assert_eq!(visible[0].0, ItemKind::Skill);
        assert_eq!(visible.last().map(|(k, _)| *k), Some(ItemKind::Perk));
    }

    #[test]
    fn test_class_and_type_compose() {
        let catalog = sample_catalog();
        let filters = FilterState::new(ClassFilter::only(CharacterClass::Ranger), TypeFilter::Skills);

        let visible = visible_items(&catalog, &filters);
        assert_eq!(names(&visible), vec!["Quick Fire", "Multishot"]);
        assert!(visible
            .iter()
            .all(|(kind, item)| *kind == ItemKind::Skill && item.class == CharacterClass::Ranger));
    }

    #[test]
    fn test_classification_ignores_cooldown() {
        let catalog = sample_catalog();
        let wizard = ClassFilter::only(CharacterClass::Wizard);

        let skills = visible_items(&catalog, &FilterState::new(wizard.clone(), TypeFilter::Skills));
        assert_eq!(names(&skills), vec!["Spell Memory"]);

        let perks = visible_items(&catalog, &FilterState::new(wizard, TypeFilter::Perks));
        assert_eq!(names(&perks), vec!["Sage"]);
    }

    #[test]
    fn test_multi_select_classes() {
        let catalog = sample_catalog();
        let mut class = ClassFilter::all();
        class.toggle(CharacterClass::Rogue);
        class.toggle(CharacterClass::Wizard);

        let visible = visible_items(&catalog, &FilterState::new(class.clone(), TypeFilter::Both));
        assert_eq!(names(&visible), vec!["Hide", "Spell Memory", "Ambush", "Sage"]);

        // Toggling every class back off returns to "all"
        class.toggle(CharacterClass::Rogue);
        class.toggle(CharacterClass::Wizard);
        assert!(class.is_all());
    }

    #[test]
    fn test_filter_with_no_matches() {
        let catalog = sample_catalog();
        let filters = FilterState::new(ClassFilter::only(CharacterClass::Bard), TypeFilter::Both);
        assert!(visible_items(&catalog, &filters).is_empty());
        assert!(visible_items(&Catalog::default(), &FilterState::default()).is_empty());
    }

    #[test]
    fn test_type_filter_cycle() {
        let mut kind = TypeFilter::default();
        kind = kind.cycle();
        assert_eq!(kind, TypeFilter::Skills);
        kind = kind.cycle();
        assert_eq!(kind, TypeFilter::Perks);
        assert_eq!(kind.cycle(), TypeFilter::Both);
    }
}
