//! Loadout - A terminal skill and perk picker
//!
//! Browse the skill and perk catalog, filter it by class and type, pick up
//! to two skills and four perks, and share the result as a link.

pub mod catalog;
pub mod picker;
pub mod share;
pub mod session;
pub mod config;
pub mod ui;

// Re-export commonly used types
pub use catalog::{Catalog, CatalogItem, CharacterClass, ItemKind};
pub use picker::{Selection, FilterState, ClassFilter, TypeFilter};
pub use session::Session;
pub use share::Location;
