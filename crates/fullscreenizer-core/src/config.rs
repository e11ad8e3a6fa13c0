//! Configuration loading and persistence.
//!
//! Loaded from `~/.config/fullscreenizer/config.toml`. Missing
//! sections fall back to defaults thanks to `#[serde(default)]`. The
//! daemon writes the same shape back on shutdown so UI-driven changes
//! (tracked classes, hotkey, geometry) survive restarts.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::chord::Modifiers;
use crate::log::LogConfig;
use crate::transform::{GeometryOverrides, TransformOptions};

/// Top-level configuration for Fullscreenizer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Window classes to track.
    pub classes: Vec<String>,
    /// Minimize the application to the tray instead of the taskbar.
    /// Consumed by the (out-of-scope) UI shell; persisted here.
    pub minimize_to_tray: bool,
    /// Global hotkey settings.
    pub hotkey: HotkeyConfig,
    /// Fullscreenize geometry settings.
    pub transform: TransformConfig,
    /// File logging settings.
    pub logging: LogConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            classes: Vec::new(),
            minimize_to_tray: true,
            hotkey: HotkeyConfig::default(),
            transform: TransformConfig::default(),
            logging: LogConfig::default(),
        }
    }
}

/// Keyboard modifier keys a chord may require.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Modifier {
    Ctrl,
    Shift,
    Alt,
}

/// Global hotkey configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HotkeyConfig {
    /// Whether the global hotkey is active.
    pub enabled: bool,
    /// Required modifiers (e.g. ["ctrl"]). An empty list is invalid
    /// and disables the hotkey.
    pub modifiers: Vec<Modifier>,
    /// Trigger key name (e.g. "Home", "F11", "B").
    pub key: String,
}

impl Default for HotkeyConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            modifiers: vec![Modifier::Ctrl],
            key: "Home".into(),
        }
    }
}

impl HotkeyConfig {
    /// Folds the modifier list into the detector's requirement set.
    pub fn required_modifiers(&self) -> Modifiers {
        let mut set = Modifiers::NONE;
        for m in &self.modifiers {
            match m {
                Modifier::Ctrl => set.ctrl = true,
                Modifier::Shift => set.shift = true,
                Modifier::Alt => set.alt = true,
            }
        }
        set
    }
}

/// Fullscreenize transform configuration.
///
/// Geometry values of `0` mean "use the monitor's own value".
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TransformConfig {
    /// Resize the window when fullscreenizing.
    pub scale_window: bool,
    /// Move the window when fullscreenizing.
    pub move_window: bool,
    /// Target width in pixels.
    pub width: u32,
    /// Target height in pixels.
    pub height: u32,
    /// Scale percentage applied to configured values.
    pub scale: u32,
    /// Target X position.
    pub move_x: u32,
    /// Target Y position.
    pub move_y: u32,
}

impl Default for TransformConfig {
    fn default() -> Self {
        Self {
            scale_window: true,
            move_window: true,
            width: 1920,
            height: 1080,
            scale: 100,
            move_x: 0,
            move_y: 0,
        }
    }
}

impl TransformConfig {
    pub fn options(&self) -> TransformOptions {
        TransformOptions {
            scale_window: self.scale_window,
            move_window: self.move_window,
            geometry: GeometryOverrides {
                width: self.width,
                height: self.height,
                scale: self.scale,
                move_x: self.move_x,
                move_y: self.move_y,
            },
        }
    }
}

impl Config {
    /// Clamps values to safe ranges.
    ///
    /// A scale of zero would divide by zero downstream; an empty
    /// modifier set cannot form a valid chord, so it disables the
    /// hotkey instead of arming a trigger-only one.
    pub fn validate(&mut self) {
        if self.transform.scale == 0 {
            self.transform.scale = 100;
        }
        if self.hotkey.modifiers.is_empty() || self.hotkey.key.trim().is_empty() {
            self.hotkey.enabled = false;
        }
        self.classes.retain(|c| !c.trim().is_empty());
        let mut seen = Vec::new();
        self.classes.retain(|c| {
            if seen.contains(c) {
                false
            } else {
                seen.push(c.clone());
                true
            }
        });
    }
}

/// Returns the config directory: `~/.config/fullscreenizer/`.
pub fn config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".config").join("fullscreenizer"))
}

/// Returns the config file path: `~/.config/fullscreenizer/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|d| d.join("config.toml"))
}

/// Loads the configuration from disk, falling back to defaults when
/// the file does not exist.
///
/// A file that exists but fails to parse is an error: silently
/// discarding it would lose the user's tracked classes on the next
/// save.
pub fn load() -> Result<Config, String> {
    let path = config_path().ok_or("could not determine config path")?;
    load_from(&path)
}

/// Missing-file detection goes through `io::ErrorKind`, never the
/// formatted message: the OS localizes error text.
fn load_from(path: &Path) -> Result<Config, String> {
    match std::fs::read_to_string(path) {
        Ok(content) => parse(path, &content),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Config::default()),
        Err(e) => Err(format!("{}: {e}", path.display())),
    }
}

fn parse(path: &Path, content: &str) -> Result<Config, String> {
    let mut config: Config =
        toml::from_str(content).map_err(|e| format!("{}: {e}", path.display()))?;
    config.validate();
    Ok(config)
}

/// Persists the configuration, creating the directory if needed.
pub fn save(config: &Config) -> Result<(), String> {
    let path = config_path().ok_or("could not determine config path")?;
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir).map_err(|e| format!("{}: {e}", dir.display()))?;
    }
    let content =
        toml::to_string_pretty(config).map_err(|e| format!("{}: {e}", path.display()))?;
    std::fs::write(&path, content).map_err(|e| format!("{}: {e}", path.display()))
}

/// Generates the commented default `config.toml`.
pub fn template() -> String {
    r##"# Fullscreenizer configuration

# Window classes to track. Use `fullscreenizer list` to see the class
# names of all visible windows, then add the ones you care about here
# (or with `fullscreenizer class add <name>`).
classes = []

# Minimize the application to the tray instead of the taskbar.
minimize_to_tray = true

[hotkey]
# Whether the global hotkey is active.
enabled = false
# Required modifiers: any combination of "ctrl", "shift", "alt".
# At least one is required; an empty list disables the hotkey.
modifiers = ["ctrl"]
# Trigger key: a letter, digit, F1-F12, or one of
# Insert, Delete, Home, End, PageUp, PageDown.
key = "Home"

[transform]
# Resize the window when fullscreenizing.
scale_window = true
# Move the window when fullscreenizing.
move_window = true
# Target geometry. 0 means "use the monitor's own value".
# Non-zero values are divided by (scale / 100).
width = 1920
height = 1080
scale = 100
move_x = 0
move_y = 0

[logging]
# Write logs to ~/.config/fullscreenizer/logs/fullscreenizer.log
enabled = false
# Minimum level: "debug", "info", "warn", or "error".
level = "info"
# Rotate the log file once it exceeds this many megabytes.
max_file_mb = 10
"##
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_reset_values() {
        // Act
        let config = Config::default();

        // Assert
        assert!(!config.hotkey.enabled);
        assert_eq!(config.hotkey.modifiers, vec![Modifier::Ctrl]);
        assert_eq!(config.hotkey.key, "Home");
        assert!(config.transform.scale_window);
        assert!(config.transform.move_window);
        assert_eq!(config.transform.width, 1920);
        assert_eq!(config.transform.height, 1080);
        assert_eq!(config.transform.scale, 100);
        assert!(config.minimize_to_tray);
        assert!(config.classes.is_empty());
    }

    #[test]
    fn partial_toml_uses_defaults_for_missing_sections() {
        // Arrange
        let toml_str = "[transform]\nscale = 50\n";

        // Act
        let config: Config = toml::from_str(toml_str).unwrap();

        // Assert
        assert_eq!(config.transform.scale, 50);
        assert_eq!(config.transform.width, 1920);
        assert_eq!(config.hotkey.key, "Home");
    }

    #[test]
    fn validate_replaces_zero_scale() {
        // Arrange
        let mut config = Config::default();
        config.transform.scale = 0;

        // Act
        config.validate();

        // Assert
        assert_eq!(config.transform.scale, 100);
    }

    #[test]
    fn empty_modifier_set_disables_the_hotkey() {
        // Arrange
        let mut config = Config::default();
        config.hotkey.enabled = true;
        config.hotkey.modifiers.clear();

        // Act
        config.validate();

        // Assert
        assert!(!config.hotkey.enabled);
    }

    #[test]
    fn validate_drops_blank_and_duplicate_classes() {
        // Arrange
        let mut config = Config::default();
        config.classes = vec![
            "Notepad".into(),
            "  ".into(),
            "Notepad".into(),
            "SDL_app".into(),
        ];

        // Act
        config.validate();

        // Assert
        assert_eq!(config.classes, vec!["Notepad", "SDL_app"]);
    }

    #[test]
    fn required_modifiers_folds_the_list() {
        // Arrange
        let hotkey = HotkeyConfig {
            modifiers: vec![Modifier::Ctrl, Modifier::Shift],
            ..HotkeyConfig::default()
        };

        // Act
        let set = hotkey.required_modifiers();

        // Assert
        assert!(set.ctrl);
        assert!(set.shift);
        assert!(!set.alt);
    }

    #[test]
    fn template_parses_to_defaults() {
        // Act
        let config: Config = toml::from_str(&template()).unwrap();

        // Assert
        assert!(!config.hotkey.enabled);
        assert_eq!(config.transform.width, 1920);
        assert!(config.minimize_to_tray);
        assert!(!config.logging.enabled);
    }

    #[test]
    fn missing_config_file_falls_back_to_defaults() {
        // Arrange: a path that does not exist, whatever the OS locale.
        let path = std::env::temp_dir().join("fullscreenizer-missing-config-test.toml");
        let _ = std::fs::remove_file(&path);

        // Act
        let config = load_from(&path).unwrap();

        // Assert
        assert!(!config.hotkey.enabled);
        assert!(config.classes.is_empty());
    }

    #[test]
    fn malformed_config_file_is_an_error() {
        // Arrange
        let path = std::env::temp_dir().join("fullscreenizer-malformed-config-test.toml");
        std::fs::write(&path, "classes = not-a-toml-value").unwrap();

        // Act
        let result = load_from(&path);

        // Assert: surfaced, not silently replaced with defaults.
        assert!(result.is_err());
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn config_round_trips_through_toml() {
        // Arrange
        let mut config = Config::default();
        config.classes = vec!["Notepad".into()];
        config.hotkey.enabled = true;
        config.transform.move_x = 160;

        // Act
        let serialized = toml::to_string_pretty(&config).unwrap();
        let parsed: Config = toml::from_str(&serialized).unwrap();

        // Assert
        assert_eq!(parsed.classes, vec!["Notepad"]);
        assert!(parsed.hotkey.enabled);
        assert_eq!(parsed.transform.move_x, 160);
    }
}
