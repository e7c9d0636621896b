//! Configuration for PrintView
//!
//! Provides configuration file handling and validation.
//! Supports JSON and TOML file formats, chosen by file extension.
//!
//! Configuration is organized into logical sections:
//! - Parse settings (layer window, length filter, segment cap)
//! - Geometry settings (ribbon width, Z lift and bias, hidden features)
//! - Fetch settings (byte ceiling, range chunk size)
//! - Camera and grid framing

use printview_core::constants::{
    DEFAULT_WIDTH_MM, MAX_BYTES, MAX_SEGMENTS, MIN_SEG_LEN, RANGE_CHUNK, Z_LIFT_PER_LAYER,
};
use printview_core::FeatureType;
use printview_visualizer::{
    CameraSettings, FetchLimits, GridSettings, ParseOptions, SceneOptions, ZBiasTable,
};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::{SettingsError, SettingsResult};

/// File name looked up in the platform config directory
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Which moves become segments
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParseSettings {
    /// Most recent N layers to keep; zero or negative keeps all
    pub last: f64,
    /// Minimum planar extrusion length in mm
    pub min_seg_len: f64,
    /// Cap on accepted segments
    pub max_segments: usize,
}

impl Default for ParseSettings {
    fn default() -> Self {
        Self {
            last: 0.0,
            min_seg_len: MIN_SEG_LEN,
            max_segments: MAX_SEGMENTS,
        }
    }
}

/// Ribbon geometry settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeometrySettings {
    /// Ribbon width in mm
    pub width_mm: f32,
    /// Z offset added per layer index
    pub z_lift_per_layer: f32,
    /// Per-feature Z bias overrides, keyed by feature name
    pub z_bias: BTreeMap<String, f32>,
    /// Features left out of the preview
    pub hidden: BTreeSet<FeatureType>,
}

impl Default for GeometrySettings {
    fn default() -> Self {
        Self {
            width_mm: DEFAULT_WIDTH_MM,
            z_lift_per_layer: Z_LIFT_PER_LAYER,
            z_bias: BTreeMap::new(),
            hidden: BTreeSet::new(),
        }
    }
}

impl GeometrySettings {
    /// Default bias table with the configured overrides applied
    pub fn z_bias_table(&self) -> SettingsResult<ZBiasTable> {
        let mut table = ZBiasTable::default();
        for (name, bias) in &self.z_bias {
            let feature: FeatureType = name.parse().map_err(|e| {
                SettingsError::invalid(format!("geometry.z_bias.{name}"), format!("{e}"))
            })?;
            table.set(feature, *bias);
        }
        Ok(table)
    }
}

/// Input limits
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchSettings {
    /// Largest input accepted, in bytes
    pub max_bytes: usize,
    /// Size of each range request, in bytes
    pub range_chunk: usize,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            max_bytes: MAX_BYTES,
            range_chunk: RANGE_CHUNK,
        }
    }
}

/// Complete preview configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Parse settings
    pub parse: ParseSettings,
    /// Geometry settings
    pub geometry: GeometrySettings,
    /// Input limits
    pub fetch: FetchSettings,
    /// Camera framing
    pub camera: CameraSettings,
    /// Ground grid
    pub grid: GridSettings,
}

impl Config {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from file
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            SettingsError::LoadError(format!("{}: {}", path.display(), e))
        })?;

        let config: Self = match ConfigFormat::from_path(path)? {
            ConfigFormat::Json => serde_json::from_str(&content)?,
            ConfigFormat::Toml => toml::from_str(&content)?,
        };

        config.validate()?;
        debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Load `path` if given, else the default config file if it exists,
    /// else the defaults
    pub fn load_or_default(path: Option<&Path>) -> SettingsResult<Self> {
        if let Some(path) = path {
            return Self::load_from_file(path);
        }

        match default_config_path() {
            Ok(path) if path.is_file() => Self::load_from_file(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Save configuration to file
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match ConfigFormat::from_path(path)? {
            ConfigFormat::Json => serde_json::to_string_pretty(self)?,
            ConfigFormat::Toml => toml::to_string_pretty(self)?,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)
            .map_err(|e| SettingsError::SaveError(format!("{}: {}", path.display(), e)))?;

        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> SettingsResult<()> {
        // Parse settings
        if self.parse.last.is_nan() {
            return Err(SettingsError::invalid("parse.last", "must be a number"));
        }

        if !(self.parse.min_seg_len.is_finite() && self.parse.min_seg_len >= 0.0) {
            return Err(SettingsError::invalid("parse.min_seg_len", "must be >= 0"));
        }

        if self.parse.max_segments == 0 {
            return Err(SettingsError::invalid("parse.max_segments", "must be > 0"));
        }

        // Geometry settings
        if !(self.geometry.width_mm.is_finite() && self.geometry.width_mm > 0.0) {
            return Err(SettingsError::invalid("geometry.width_mm", "must be > 0"));
        }

        if !self.geometry.z_lift_per_layer.is_finite() {
            return Err(SettingsError::invalid(
                "geometry.z_lift_per_layer",
                "must be finite",
            ));
        }

        if let Some((name, _)) = self.geometry.z_bias.iter().find(|(_, b)| !b.is_finite()) {
            return Err(SettingsError::invalid(
                format!("geometry.z_bias.{name}"),
                "must be finite",
            ));
        }
        self.geometry.z_bias_table()?;

        // Fetch settings
        if self.fetch.max_bytes == 0 {
            return Err(SettingsError::invalid("fetch.max_bytes", "must be > 0"));
        }

        if self.fetch.range_chunk == 0 {
            return Err(SettingsError::invalid("fetch.range_chunk", "must be > 0"));
        }

        // Camera and grid
        if !(self.camera.fov_deg > 0.0 && self.camera.fov_deg < 180.0) {
            return Err(SettingsError::invalid(
                "camera.fov_deg",
                "must be between 0 and 180",
            ));
        }

        if !(self.camera.fit_factor.is_finite() && self.camera.fit_factor > 0.0) {
            return Err(SettingsError::invalid("camera.fit_factor", "must be > 0"));
        }

        if !(self.grid.padding.is_finite() && self.grid.padding >= 0.0) {
            return Err(SettingsError::invalid("grid.padding", "must be >= 0"));
        }

        if !(self.grid.min_size.is_finite() && self.grid.min_size >= 0.0) {
            return Err(SettingsError::invalid("grid.min_size", "must be >= 0"));
        }

        Ok(())
    }

    /// Parser options for this configuration
    pub fn parse_options(&self) -> ParseOptions {
        ParseOptions::default()
            .with_last(self.parse.last)
            .with_min_seg_len(self.parse.min_seg_len)
            .with_max_segments(self.parse.max_segments)
            .with_max_bytes(self.fetch.max_bytes)
    }

    /// Scene options for this configuration
    pub fn scene_options(&self) -> SettingsResult<SceneOptions> {
        Ok(SceneOptions {
            width_mm: self.geometry.width_mm,
            z_lift_per_layer: self.geometry.z_lift_per_layer,
            z_bias: self.geometry.z_bias_table()?,
            hidden: self.geometry.hidden.clone(),
        })
    }

    /// Input limits for this configuration
    pub fn fetch_limits(&self) -> FetchLimits {
        FetchLimits {
            max_bytes: self.fetch.max_bytes,
            range_chunk: self.fetch.range_chunk,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ConfigFormat {
    Json,
    Toml,
}

impl ConfigFormat {
    fn from_path(path: &Path) -> SettingsResult<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Ok(Self::Json),
            Some(ext) if ext.eq_ignore_ascii_case("toml") => Ok(Self::Toml),
            other => Err(SettingsError::UnsupportedFormat(
                other.unwrap_or("<none>").to_string(),
            )),
        }
    }
}

/// Default configuration file location
pub fn default_config_path() -> SettingsResult<PathBuf> {
    let mut path = dirs::config_dir()
        .or_else(dirs::home_dir)
        .ok_or_else(|| SettingsError::ConfigDirectory("no config or home directory".to_string()))?;
    path.push("printview");
    path.push(CONFIG_FILE_NAME);
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.parse_options(), ParseOptions::default());
        assert_eq!(config.fetch_limits(), FetchLimits::default());
        assert_eq!(config.scene_options().unwrap(), SceneOptions::default());
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let mut config = Config::default();
        config.geometry.width_mm = 0.0;
        assert!(matches!(
            config.validate(),
            Err(SettingsError::InvalidSetting { ref key, .. }) if key == "geometry.width_mm"
        ));

        let mut config = Config::default();
        config.parse.max_segments = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.fetch.range_chunk = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.camera.fov_deg = 180.0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.geometry.z_bias.insert("walls".to_string(), 0.1);
        assert!(matches!(
            config.validate(),
            Err(SettingsError::InvalidSetting { ref key, .. }) if key == "geometry.z_bias.walls"
        ));
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: Config = toml::from_str(
            r#"
            [parse]
            last = 3

            [geometry]
            hidden = ["travel", "skirt"]

            [geometry.z_bias]
            top_solid = 0.01
            "#,
        )
        .unwrap();

        assert_eq!(config.parse.last, 3.0);
        assert_eq!(config.parse.max_segments, MAX_SEGMENTS);
        assert_eq!(config.fetch, FetchSettings::default());

        let options = config.parse_options();
        assert_eq!(options.layer_window, Some(3));

        let scene = config.scene_options().unwrap();
        assert!(!scene.is_visible(FeatureType::Travel));
        assert!(!scene.is_visible(FeatureType::Skirt));
        assert_eq!(scene.z_bias.get(FeatureType::TopSolid), 0.01);
        assert_eq!(scene.z_bias.get(FeatureType::External), 0.002);
    }

    #[test]
    fn test_non_positive_last_keeps_all_layers() {
        let mut config = Config::default();
        config.parse.last = -2.0;
        assert_eq!(config.parse_options().layer_window, None);
        config.parse.last = f64::INFINITY;
        assert!(config.validate().is_ok());
        assert_eq!(config.parse_options().layer_window, None);
    }

    #[test]
    fn test_unsupported_extension() {
        let err = Config::default()
            .save_to_file(Path::new("config.yaml"))
            .unwrap_err();
        assert!(matches!(err, SettingsError::UnsupportedFormat(ref ext) if ext == "yaml"));
    }

    #[test]
    fn test_default_config_path_file_name() {
        if let Ok(path) = default_config_path() {
            assert!(path.ends_with("printview/config.toml"));
        }
    }
}
