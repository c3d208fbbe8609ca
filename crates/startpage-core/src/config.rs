use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration structure
///
/// Loaded from a TOML file in the user config directory; every field has
/// a sensible default so a missing file just means defaults.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub autosave: AutosaveConfig,
    pub quote: QuoteConfig,
    pub ui: UiConfig,
    pub storage: StorageConfig,
}

impl Config {
    /// Load config from the default location, or defaults if absent
    pub fn load() -> crate::Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path)?;
            let config: Config = toml::from_str(&contents)
                .map_err(|e| crate::Error::ConfigError(format!("Failed to parse config: {}", e)))?;
            Ok(config)
        } else {
            // No config file? Use defaults
            Ok(Self::default())
        }
    }

    /// Save config to disk
    pub fn save(&self) -> crate::Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| crate::Error::ConfigError(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(&config_path, contents)?;
        Ok(())
    }

    /// Get the config file path
    /// Uses XDG on Linux/macOS, AppData on Windows
    fn config_path() -> crate::Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| crate::Error::ConfigError("Could not find config directory".into()))?
            .join("startpage");

        Ok(config_dir.join("config.toml"))
    }

    /// Where the key/value store lives, honoring the data_dir override
    pub fn db_path(&self) -> crate::Result<PathBuf> {
        let data_dir = match &self.storage.data_dir {
            Some(dir) => dir.clone(),
            None => dirs::data_dir()
                .ok_or_else(|| crate::Error::ConfigError("Could not find data directory".into()))?
                .join("startpage"),
        };

        Ok(data_dir.join("startpage.db"))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AutosaveConfig {
    /// Quiet period in milliseconds before the note editor saves
    #[serde(default = "default_quiet_ms")]
    pub quiet_ms: u64,
}

fn default_quiet_ms() -> u64 {
    800 // long enough to coalesce a typing burst, short enough to feel safe
}

impl Default for AutosaveConfig {
    fn default() -> Self {
        Self {
            quiet_ms: default_quiet_ms(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuoteConfig {
    /// Random-quote endpoint; expects a JSON body with content and author
    #[serde(default = "default_quote_url")]
    pub api_url: String,

    /// Skip the network call entirely and show the fallback
    #[serde(default = "default_quote_enabled")]
    pub enabled: bool,
}

fn default_quote_url() -> String {
    "https://api.quotable.io/random".to_string()
}

fn default_quote_enabled() -> bool {
    true
}

impl Default for QuoteConfig {
    fn default() -> Self {
        Self {
            api_url: default_quote_url(),
            enabled: default_quote_enabled(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Name used in the greeting ("Good morning, Ada")
    pub display_name: Option<String>,

    /// Enable mouse support in the TUI
    #[serde(default = "default_mouse")]
    pub mouse_enabled: bool,
}

fn default_mouse() -> bool {
    true
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            display_name: None,
            mouse_enabled: default_mouse(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StorageConfig {
    /// Override for the data directory (default: platform data dir)
    pub data_dir: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.autosave.quiet_ms, 800);
        assert_eq!(config.quote.api_url, "https://api.quotable.io/random");
        assert!(config.quote.enabled);
        assert!(config.ui.display_name.is_none());
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let toml = toml::to_string(&config).unwrap();
        assert!(toml.contains("quiet_ms"));
        assert!(toml.contains("api_url"));
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let config: Config = toml::from_str("[ui]\ndisplay_name = \"Ada\"\n").unwrap();
        assert_eq!(config.ui.display_name.as_deref(), Some("Ada"));
        assert_eq!(config.autosave.quiet_ms, 800);
        assert!(config.quote.enabled);
    }

    #[test]
    fn test_db_path_honors_override() {
        let config = Config {
            storage: StorageConfig {
                data_dir: Some(PathBuf::from("/tmp/sp-test")),
            },
            ..Config::default()
        };
        assert_eq!(config.db_path().unwrap(), PathBuf::from("/tmp/sp-test/startpage.db"));
    }
}
