// On-disk settings: the model/API configuration in config.toml and the
// remembered window placement in window_state.toml. Both parse leniently,
// a broken or missing file falls back to defaults instead of blocking
// startup.

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    env, fs,
    io::{self, ErrorKind},
    path::{Path, PathBuf},
};

pub const QUALIFIER: &str = "ai";
pub const ORGANIZATION: &str = "BanglaLekhak";
pub const APPLICATION: &str = "lekhak";

const CONFIG_FILE_NAME: &str = "config.toml";
const WINDOW_STATE_FILE_NAME: &str = "window_state.toml";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// API key for the generation endpoint. The GEMINI_API_KEY or API_KEY
    /// environment variables take precedence over this field.
    pub api_key: Option<String>,
    pub model: String,
    pub endpoint: String,
    pub timeout_secs: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            api_key: None,
            model: "gemini-3-pro-preview".to_string(),
            endpoint: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            timeout_secs: 120,
        }
    }
}

impl AppConfig {
    pub fn config_file_path() -> Option<PathBuf> {
        ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION)
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    /// Load the configuration from the default location, falling back to
    /// defaults when the file is missing or unparseable.
    pub fn load() -> Self {
        match Self::config_file_path() {
            Some(path) => Self::load_from(&path),
            None => AppConfig::default(),
        }
    }

    pub fn load_from(path: &Path) -> Self {
        let Ok(contents) = fs::read_to_string(path) else {
            return AppConfig::default();
        };
        match toml::from_str::<AppConfig>(&contents) {
            Ok(config) => config,
            Err(err) => {
                eprintln!("Failed to parse config file {}: {err}", path.display());
                AppConfig::default()
            }
        }
    }

    /// Resolve the API key, preferring the environment over the file.
    pub fn resolve_api_key(&self) -> Option<String> {
        env::var("GEMINI_API_KEY")
            .or_else(|_| env::var("API_KEY"))
            .ok()
            .filter(|key| !key.trim().is_empty())
            .or_else(|| self.api_key.clone())
            .filter(|key| !key.trim().is_empty())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowState {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
    pub text_size: i32,
}

impl Default for WindowState {
    fn default() -> Self {
        WindowState {
            x: 100,
            y: 100,
            width: 1100,
            height: 720,
            text_size: 18,
        }
    }
}

impl WindowState {
    pub fn state_file_path() -> Option<PathBuf> {
        ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION)
            .map(|dirs| dirs.data_local_dir().join(WINDOW_STATE_FILE_NAME))
    }

    pub fn load(path: &Path) -> Option<WindowState> {
        let contents = fs::read_to_string(path).ok()?;
        match toml::from_str::<WindowState>(&contents) {
            Ok(state) => Some(state),
            Err(err) => {
                eprintln!(
                    "Failed to parse window state file {}: {err}",
                    path.display()
                );
                None
            }
        }
    }

    pub fn save(&self, path: &Path) -> io::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let toml = toml::to_string_pretty(self).map_err(|err| {
            io::Error::new(ErrorKind::Other, format!("toml serialization error: {err}"))
        })?;

        fs::write(path, toml)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.model, "gemini-3-pro-preview");
        assert!(config.endpoint.ends_with("/v1beta"));
        assert_eq!(config.timeout_secs, 120);
        assert_eq!(config.api_key, None);
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let config: AppConfig = toml::from_str("api_key = \"abc\"").unwrap();
        assert_eq!(config.api_key.as_deref(), Some("abc"));
        assert_eq!(config.model, "gemini-3-pro-preview");
        assert_eq!(config.timeout_secs, 120);
    }

    #[test]
    fn test_full_config_roundtrip() {
        let mut config = AppConfig::default();
        config.api_key = Some("k".to_string());
        config.model = "gemini-other".to_string();

        let text = toml::to_string_pretty(&config).unwrap();
        let parsed: AppConfig = toml::from_str(&text).unwrap();
        assert_eq!(parsed.api_key.as_deref(), Some("k"));
        assert_eq!(parsed.model, "gemini-other");
    }

    #[test]
    fn test_window_state_defaults_on_partial_file() {
        let state: WindowState = toml::from_str("width = 800\nheight = 600").unwrap();
        assert_eq!(state.width, 800);
        assert_eq!(state.height, 600);
        assert_eq!(state.text_size, 18);
    }

    #[test]
    fn test_load_from_missing_file_gives_defaults() {
        let config = AppConfig::load_from(Path::new("/nonexistent/lekhak-config.toml"));
        assert_eq!(config.model, AppConfig::default().model);
    }
}
