// Application settings
// Loaded from ~/.config/pastegrid/settings.json

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Which host clipboard the editor talks to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClipboardBackend {
    /// Process-local clipboard (headless, default)
    #[default]
    Memory,
    /// Desktop clipboard (needs the system-clipboard build feature)
    System,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // Clipboard
    #[serde(rename = "clipboard.backend")]
    pub clipboard_backend: ClipboardBackend,

    /// Delay before focus returns to the pointed cell after a copy
    #[serde(rename = "clipboard.refocusDelayMs")]
    pub refocus_delay_ms: u64,

    // Grid extents (opaque to the engine, passed through to the renderer)
    #[serde(rename = "grid.defaultRowHeight")]
    pub default_row_height: String,

    #[serde(rename = "grid.defaultColumnWidth")]
    pub default_column_width: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            clipboard_backend: ClipboardBackend::default(),
            refocus_delay_ms: 100,
            default_row_height: "24px".to_string(),
            default_column_width: "150px".to_string(),
        }
    }
}

const DEFAULT_CONFIG: &str = r#"{
    // Clipboard: "memory" (process-local) or "system" (desktop clipboard)
    "clipboard.backend": "memory",

    // Milliseconds before focus returns to the cell after a copy
    "clipboard.refocusDelayMs": 100,

    // Default extents for grids loaded without explicit sizes
    "grid.defaultRowHeight": "24px",
    "grid.defaultColumnWidth": "150px"
}
"#;

impl Settings {
    /// Get the settings file path
    pub fn config_path() -> PathBuf {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("pastegrid");
        config_dir.join("settings.json")
    }

    /// Load settings from the default location, creating it on first run
    pub fn load() -> Self {
        let path = Self::config_path();

        if !path.exists() {
            Self::create_default_file(&path);
            return Self::default();
        }

        Self::load_from(&path)
    }

    /// Load settings from a file, falling back to defaults on any error
    pub fn load_from(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(contents) => Self::parse(&contents).unwrap_or_else(|e| {
                log::warn!("Error parsing {}: {}; using default settings", path.display(), e);
                Self::default()
            }),
            Err(e) => {
                log::warn!("Error reading {}: {}; using default settings", path.display(), e);
                Self::default()
            }
        }
    }

    /// Parse settings JSON. Lines starting with // are comments.
    pub fn parse(contents: &str) -> Result<Self, serde_json::Error> {
        let cleaned: String = contents
            .lines()
            .filter(|line| !line.trim().starts_with("//"))
            .collect::<Vec<_>>()
            .join("\n");

        serde_json::from_str(&cleaned)
    }

    /// Save current settings to the default location
    pub fn save(&self) -> Result<(), String> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<(), String> {
        // Ensure directory exists
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| e.to_string())?;
        }

        let json = serde_json::to_string_pretty(self)
            .map_err(|e| e.to_string())?;

        fs::write(path, json).map_err(|e| e.to_string())
    }

    pub fn refocus_delay(&self) -> Duration {
        Duration::from_millis(self.refocus_delay_ms)
    }

    /// Create default settings file with comments
    fn create_default_file(path: &Path) {
        if let Some(parent) = path.parent() {
            if let Err(e) = fs::create_dir_all(parent) {
                log::warn!("Error creating config directory: {}", e);
                return;
            }
        }

        if let Err(e) = fs::write(path, DEFAULT_CONFIG) {
            log::warn!("Error writing default settings.json: {}", e);
        }
    }

    /// Get the config file path for display
    pub fn config_path_display() -> String {
        Self::config_path().to_string_lossy().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_file_parses_to_defaults() {
        assert_eq!(Settings::parse(DEFAULT_CONFIG).unwrap(), Settings::default());
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let settings = Settings::parse(r#"{ "clipboard.refocusDelayMs": 5 }"#).unwrap();
        assert_eq!(settings.refocus_delay(), Duration::from_millis(5));
        assert_eq!(settings.clipboard_backend, ClipboardBackend::Memory);
        assert_eq!(settings.default_column_width, "150px");
    }

    #[test]
    fn test_backend_names() {
        let settings = Settings::parse(r#"{ "clipboard.backend": "system" }"#).unwrap();
        assert_eq!(settings.clipboard_backend, ClipboardBackend::System);
        assert!(Settings::parse(r#"{ "clipboard.backend": "x11" }"#).is_err());
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("settings.json");
        let settings = Settings {
            clipboard_backend: ClipboardBackend::System,
            refocus_delay_ms: 250,
            default_row_height: "20px".to_string(),
            default_column_width: "96px".to_string(),
        };
        settings.save_to(&path).unwrap();
        assert_eq!(Settings::load_from(&path), settings);
    }

    #[test]
    fn test_load_invalid_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, "{ not json").unwrap();
        assert_eq!(Settings::load_from(&path), Settings::default());
        assert_eq!(Settings::load_from(&dir.path().join("missing.json")), Settings::default());
    }
}
