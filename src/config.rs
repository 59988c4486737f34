use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::io::path::expand_tilde;
use crate::state::SelectionMode;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file i/o: {0}")]
    Io(#[from] io::Error),
    #[error("invalid config file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("could not serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Application configuration
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct Config {
    pub ui: UiConfig,
    pub listing: ListingConfig,
    pub bookmarks: Vec<Bookmark>,
}

/// UI behavior configuration
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct UiConfig {
    /// Show hidden files by default
    pub show_hidden: bool,
    /// "single" or "multiple"
    pub selection_mode: String,
    /// Directory to open on start; home when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_path: Option<String>,
}

/// Directory listing behaviour
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct ListingConfig {
    /// Enumerate directories on a background thread
    pub background: bool,
    /// Re-list the current directory when it changes on disk
    pub watch: bool,
}

/// A named shortcut shown in the side bar. `~` is expanded.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Bookmark {
    pub name: String,
    pub path: String,
}

impl Bookmark {
    pub fn new(name: &str, path: &str) -> Self {
        Self {
            name: name.to_string(),
            path: path.to_string(),
        }
    }

    pub fn resolved(&self, home: Option<&Path>) -> Option<PathBuf> {
        expand_tilde(Path::new(&self.path), home)
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            ui: UiConfig::default(),
            listing: ListingConfig::default(),
            bookmarks: vec![
                Bookmark::new("/", "/"),
                Bookmark::new("Applications", "/Applications"),
                Bookmark::new("Downloads", "~/Downloads"),
            ],
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        UiConfig {
            show_hidden: false,
            selection_mode: "single".to_string(),
            start_path: None,
        }
    }
}

impl Default for ListingConfig {
    fn default() -> Self {
        ListingConfig {
            background: false,
            watch: true,
        }
    }
}

impl Config {
    /// Get the path to the config file
    pub fn config_path() -> Option<PathBuf> {
        // Use directories crate to find config directory
        if let Some(proj_dirs) = directories::ProjectDirs::from("", "", "fmshell") {
            let config_dir = proj_dirs.config_dir();
            return Some(config_dir.join("config.toml"));
        }
        None
    }

    /// Load configuration from file, or return defaults if it is missing or broken.
    /// On first run the defaults are written out so they can be edited.
    pub fn load() -> Self {
        let Some(path) = Self::config_path() else {
            return Config::default();
        };
        match Self::load_or_create(&path) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!(path = %path.display(), "{}; using default configuration", e);
                Config::default()
            }
        }
    }

    /// Like [`Config::load_from`], but a missing file is created with the defaults.
    pub fn load_or_create(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            return Self::load_from(path);
        }
        let config = Config::default();
        config.save_to(path)?;
        tracing::info!(path = %path.display(), "wrote default configuration");
        Ok(config)
    }

    /// A missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Config::default());
        }
        let contents = fs::read_to_string(path)?;
        Ok(toml::from_str::<Config>(&contents)?)
    }

    /// Save configuration to file
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        // Create config directory if it doesn't exist
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let contents = toml::to_string_pretty(self)?;
        fs::write(path, contents)?;
        Ok(())
    }

    /// Falls back to `Single` for an unrecognised value.
    pub fn selection_mode(&self) -> SelectionMode {
        match self.ui.selection_mode.parse() {
            Ok(mode) => mode,
            Err(e) => {
                tracing::warn!("{}; using single selection", e);
                SelectionMode::Single
            }
        }
    }
}

/// Bookmark names match case-insensitively.
pub fn find_bookmark<'a>(bookmarks: &'a [Bookmark], name: &str) -> Option<&'a Bookmark> {
    bookmarks.iter().find(|b| b.name.eq_ignore_ascii_case(name))
}
