use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::{Deserialize, Serialize};

pub const THEME_NAMES: [&str; 2] = ["light", "dark"];

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    /// `None` until the player toggles the theme once; the terminal's
    /// preference decides until then.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,
    #[serde(default = "default_sound")]
    pub sound: bool,
    #[serde(default = "default_images_dir")]
    pub images_dir: String,
}

fn default_sound() -> bool {
    true
}
fn default_images_dir() -> String {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("potyah")
        .join("images")
        .to_string_lossy()
        .to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: None,
            sound: default_sound(),
            images_dir: default_images_dir(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = fs::read_to_string(path)?;
            let mut config: Config = toml::from_str(&content)?;
            config.normalize_theme();
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("potyah")
            .join("config.toml")
    }

    /// Only "light" and "dark" are stored; anything else counts as unset.
    pub fn normalize_theme(&mut self) {
        if let Some(theme) = &self.theme {
            let theme = theme.trim().to_lowercase();
            self.theme = THEME_NAMES.contains(&theme.as_str()).then_some(theme);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_serde_defaults_from_empty() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.theme, None);
        assert!(config.sound);
        assert!(config.images_dir.contains("potyah"));
    }

    #[test]
    fn test_unknown_theme_is_dropped() {
        let mut config: Config = toml::from_str("theme = \"sepia\"").unwrap();
        config.normalize_theme();
        assert_eq!(config.theme, None);

        let mut config: Config = toml::from_str("theme = \" Dark \"").unwrap();
        config.normalize_theme();
        assert_eq!(config.theme.as_deref(), Some("dark"));
    }

    #[test]
    fn test_config_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.theme = Some("dark".to_string());
        config.sound = false;
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.theme.as_deref(), Some("dark"));
        assert!(!loaded.sound);
        assert_eq!(loaded.images_dir, config.images_dir);
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = Config::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(loaded.theme, None);
        assert!(loaded.sound);
    }
}
