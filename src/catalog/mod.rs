//! Skill and perk catalog
//!
//! The catalog is loaded once at start-up and never changes afterwards.

pub mod item;
pub mod loader;

pub use item::{CatalogItem, CharacterClass, ItemKind, UnknownClass};
pub use loader::{
    Catalog, CatalogError, CatalogSource, PendingCatalog,
    load_catalog, try_load_catalog, bundled_catalog,
    export_bundled_catalog, spawn_catalog_load,
};
