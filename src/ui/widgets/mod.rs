//! UI widgets

pub mod item_list;

pub use item_list::{ItemListWidget, class_color, kind_color, render_key_help};
