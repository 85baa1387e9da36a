//! Shareable loadout links
//!
//! All reads and writes of the location's query string go through here.

pub mod query;
pub mod location;
pub mod sync;

pub use query::{encode, decode, encode_name, decode_name};
pub use location::{Location, HistoryMode};
pub use sync::{SharedLocation, UrlSync, shared_location};
