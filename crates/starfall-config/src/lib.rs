//! Configuration file support for starfall.
//!
//! The file lives at `<config dir>/starfall/config.toml` unless
//! `STARFALL_CONFIG` points elsewhere. Every field is optional.

use std::path::{Path, PathBuf};

use color_eyre::eyre::{Result, WrapErr};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use starfall_core::Variant;

/// Environment variable overriding the config file path.
pub const CONFIG_ENV: &str = "STARFALL_CONFIG";

const MIN_FPS: u32 = 1;
const MAX_FPS: u32 = 240;
/// Smallest accepted cell size; below it a terminal maps to a sub-unit surface.
const MIN_CELL_SIZE: f32 = 0.5;

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub starfield: StarfieldConfig,
    pub page: PageConfig,
}

/// Background animation settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StarfieldConfig {
    /// Mount the starfield at all.
    pub enabled: bool,
    /// Star generation policy.
    pub variant: Variant,
    /// Target frames per second.
    pub fps: u32,
    /// Fixed random seed; a time-based seed is used when absent.
    pub seed: Option<u64>,
    /// Logical width of one terminal cell. Cells are twice as tall.
    pub cell_size: f32,
    /// Force the reduced motion preference on or off.
    pub reduced_motion: Option<bool>,
    /// Force 24-bit color support on or off instead of detecting it.
    pub truecolor: Option<bool>,
}

impl Default for StarfieldConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            variant: Variant::Flat,
            fps: 60,
            seed: None,
            cell_size: 8.0,
            reduced_motion: None,
            truecolor: None,
        }
    }
}

impl StarfieldConfig {
    /// Frame rate clamped to a usable range.
    pub fn frame_rate(&self) -> u32 {
        self.fps.clamp(MIN_FPS, MAX_FPS)
    }

    /// Cell size, falling back to the default when not positive and raised
    /// to at least half a unit.
    pub fn cell_size(&self) -> f32 {
        if self.cell_size.is_finite() && self.cell_size > 0.0 {
            self.cell_size.max(MIN_CELL_SIZE)
        } else {
            StarfieldConfig::default().cell_size
        }
    }
}

/// Page content drawn over the starfield.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    /// Headline on the card.
    pub title: String,
    /// Phrases cycled by the typewriter under the headline.
    pub phrases: Vec<String>,
    /// Sections revealed while scrolling.
    pub sections: Vec<Section>,
}

/// A titled list on the page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub title: String,
    #[serde(default)]
    pub items: Vec<String>,
}

impl Section {
    fn new(title: &str, items: &[&str]) -> Self {
        Self {
            title: title.to_string(),
            items: items.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            title: "Hello, I'm a developer".to_string(),
            phrases: vec![
                "Full-Stack Developer".to_string(),
                "Hybrid AI Engineer".to_string(),
                "Passionate Developer".to_string(),
            ],
            sections: vec![
                Section::new("Languages", &["Rust", "TypeScript", "Python", "SQL"]),
                Section::new("Frontend", &["HTML & CSS", "Canvas animation", "Accessibility"]),
                Section::new("Backend", &["Async services", "REST & WebSockets", "PostgreSQL"]),
                Section::new("Tooling", &["Git", "Docker", "CI pipelines", "Terminal UIs"]),
            ],
        }
    }
}

impl Config {
    /// Parse configuration from TOML text.
    pub fn from_toml(text: &str) -> Result<Self> {
        toml::from_str(text).wrap_err("invalid configuration")
    }

    /// Default config file location, honoring [`CONFIG_ENV`].
    pub fn path() -> Option<PathBuf> {
        if let Some(path) = std::env::var_os(CONFIG_ENV) {
            return Some(PathBuf::from(path));
        }
        ProjectDirs::from("", "", "starfall").map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Directory for runtime files such as the log.
    pub fn data_dir() -> Option<PathBuf> {
        ProjectDirs::from("", "", "starfall").map(|dirs| dirs.data_local_dir().to_path_buf())
    }

    /// Load from the default location. A missing file yields defaults.
    pub fn load() -> Result<Self> {
        match Self::path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Load from a specific file.
    pub fn load_from(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .wrap_err_with(|| format!("failed to read config {}", path.display()))?;
        Self::from_toml(&text).wrap_err_with(|| format!("in config {}", path.display()))
    }
}
