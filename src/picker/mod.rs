//! Loadout picking: selection rules and browse filters

pub mod selection;
pub mod filter;

pub use selection::{Selection, ToggleOutcome};
pub use filter::{ClassFilter, TypeFilter, FilterState, visible_items, visible_in};
