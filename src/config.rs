use crate::keybindings::{Keybindings, KeybindingsConfig};
use crate::tui::terminal_compat::ColorMode;
use crate::tui::theme::ThemeName;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub ui: UiConfig,

    #[serde(default)]
    pub terminal: TerminalConfig,

    /// How remote documents are fetched
    #[serde(default)]
    pub source: SourceConfig,

    #[serde(default)]
    pub keybindings: KeybindingsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_theme")]
    pub theme: String,

    #[serde(default = "default_outline_width")]
    pub outline_width: u16,

    /// Prefix outline rows with `#` markers for their heading level
    #[serde(default)]
    pub show_levels: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TerminalConfig {
    /// "auto", "rgb" or "256"
    #[serde(default = "default_color_mode")]
    pub color_mode: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceConfig {
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            theme: default_theme(),
            outline_width: default_outline_width(),
            show_levels: false,
        }
    }
}

impl Default for TerminalConfig {
    fn default() -> Self {
        Self {
            color_mode: default_color_mode(),
        }
    }
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

fn default_theme() -> String {
    "OceanDark".to_string()
}

fn default_outline_width() -> u16 {
    30
}

fn default_color_mode() -> String {
    "auto".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_user_agent() -> String {
    format!("headnav/{}", env!("CARGO_PKG_VERSION"))
}

impl Config {
    /// Get the platform-specific config file path
    /// - macOS: ~/Library/Application Support/headnav/config.toml
    /// - Linux: ~/.config/headnav/config.toml
    /// - Windows: %APPDATA%/headnav/config.toml
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("headnav").join("config.toml"))
    }

    /// Load config from file, or return default if the file is missing or invalid
    pub fn load() -> Self {
        Self::config_path()
            .and_then(|path| {
                fs::read_to_string(&path)
                    .ok()
                    .and_then(|contents| Self::from_toml(&contents))
            })
            .unwrap_or_default()
    }

    fn from_toml(contents: &str) -> Option<Self> {
        match toml::from_str(contents) {
            Ok(config) => Some(config),
            Err(e) => {
                tracing::warn!(error = %e, "ignoring invalid config file");
                None
            }
        }
    }

    /// Save config to file
    pub fn save(&self) -> Result<(), Box<dyn std::error::Error>> {
        let path = Self::config_path().ok_or("Could not determine config directory")?;

        // Create parent directory if it doesn't exist
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        fs::write(&path, contents)?;

        Ok(())
    }

    /// Parse theme name from string
    pub fn theme_name(&self) -> ThemeName {
        self.ui.theme.parse().unwrap_or_default()
    }

    /// Color mode from config, `None` meaning auto-detect
    pub fn color_mode(&self) -> Option<ColorMode> {
        match self.terminal.color_mode.as_str() {
            "rgb" => Some(ColorMode::Rgb),
            "256" => Some(ColorMode::Indexed256),
            _ => None,
        }
    }

    /// Update outline width and save config
    pub fn set_outline_width(&mut self, width: u16) -> Result<(), Box<dyn std::error::Error>> {
        self.ui.outline_width = width;
        self.save()
    }

    /// Get keybindings with user customizations applied
    pub fn keybindings(&self) -> Keybindings {
        self.keybindings.to_keybindings()
    }
}
