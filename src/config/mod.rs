//! Configuration management for chat2html

mod io;
mod types;

pub use types::*;

use anyhow::Result;
use std::path::PathBuf;

impl Config {
    /// Get the config file path (~/.config/chat2html/config.toml)
    pub fn config_path() -> Result<PathBuf> {
        io::config_path()
    }

    /// Get the config directory path (~/.config/chat2html)
    pub fn config_dir() -> Result<PathBuf> {
        io::config_dir()
    }

    /// Load configuration from file, or return defaults if not found
    pub fn load() -> Result<Self> {
        io::load()
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        io::save(self)
    }

    /// Expand ~ in the configured stylesheet path
    pub fn stylesheet_path(&self) -> Option<PathBuf> {
        let raw = self.render.stylesheet.as_ref()?;
        if let Some(stripped) = raw.strip_prefix("~/") {
            if let Some(home) = dirs::home_dir() {
                return Some(home.join(stripped));
            }
        }
        Some(PathBuf::from(raw))
    }
}
