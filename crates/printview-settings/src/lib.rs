//! PrintView Settings Crate
//!
//! Handles the preview configuration file and its conversion into
//! parser, scene, and fetch options.

pub mod config;
pub mod error;

pub use config::{
    default_config_path, Config, FetchSettings, GeometrySettings, ParseSettings,
    CONFIG_FILE_NAME,
};
pub use error::{SettingsError, SettingsResult};
