//! Configuration

pub mod settings;

pub use settings::{
    Settings, SettingsError,
    load_settings, load_settings_from, save_settings, save_settings_to, settings_path,
};
