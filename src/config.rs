//! Configuration for the joystick and its plugins
//!
//! Settings are plain serde structs so hosts can build them in code or load
//! them from TOML. Every section falls back to its defaults when omitted:
//!
//! ```toml
//! [joystick]
//! bounding_model = "inner"
//! throttle_events_by = 50
//!
//! [gamepad]
//! deadzone_percent = 0.08
//! polling_model = { interval = 16 }
//!
//! [keyboard]
//! up = "ArrowUp"
//! down = "ArrowDown"
//! left = "ArrowLeft"
//! right = "ArrowRight"
//! ```

use crate::geometry::{effective_radius, BoundingModel, Layout};
use crate::plugins::gamepad::{GamepadOptions, PollingModel};
use crate::plugins::keyboard::KeyboardOptions;
use crate::plugins::pointer_lock::PointerLockOptions;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

const APP_DIR: &str = "touchstick";
const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Behaviour of the joystick shell
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct JoystickSettings {
    /// How the handle's size takes part in the travel radius
    pub bounding_model: BoundingModel,
    /// Pixels added to the radius, negative shrinks
    pub boundary_modifier: f64,
    /// Ignore all input
    pub disabled: bool,
    pub disable_x: bool,
    pub disable_y: bool,
    /// Keep the handle where it was released
    pub disable_reset: bool,
    /// Suppress the transition flag on return-to-center
    pub disable_reset_animation: bool,
    /// Animation handed to the renderer for return-to-center, e.g. ".2s ease"
    pub reset_animation: String,
    /// Minimum milliseconds between move events, 0 disables throttling
    pub throttle_events_by: u64,
}

impl Default for JoystickSettings {
    fn default() -> Self {
        Self {
            bounding_model: BoundingModel::Center,
            boundary_modifier: 0.0,
            disabled: false,
            disable_x: false,
            disable_y: false,
            disable_reset: false,
            disable_reset_animation: false,
            reset_animation: ".2s ease".to_string(),
            throttle_events_by: 0,
        }
    }
}

/// Settings for the background runner
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct RunnerSettings {
    /// Period of the frame heartbeat in milliseconds
    pub frame_interval_ms: u64,
    /// Capacity of the command channel
    pub command_buffer: usize,
}

impl Default for RunnerSettings {
    fn default() -> Self {
        Self {
            frame_interval_ms: 16,
            command_buffer: 100,
        }
    }
}

/// Everything a host can configure, one TOML table per section
#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub joystick: JoystickSettings,
    pub gamepad: GamepadOptions,
    pub keyboard: KeyboardOptions,
    pub pointer_lock: PointerLockOptions,
    /// Sizes used by hosts without a layout pass of their own
    pub layout: Layout,
    pub runner: RunnerSettings,
}

impl AppConfig {
    pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = toml::from_str(input)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        debug!("Loading config from {}", path.display());
        let input = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&input)?;
        info!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let output = self.to_toml_string()?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| ConfigError::Write {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        fs::write(path, output).map_err(|source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        })?;
        info!("Saved config to {}", path.display());
        Ok(())
    }

    /// `<config_dir>/touchstick/config.toml`, if the platform has a config dir
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
    }

    /// Loads the default config file, or the built-in defaults if it does not exist.
    pub fn load_or_default() -> Result<Self, ConfigError> {
        match Self::default_path() {
            Some(path) if path.exists() => Self::load(&path),
            Some(path) => {
                info!("No config at {}, using defaults", path.display());
                Ok(Self::default())
            }
            None => {
                info!("No config directory available, using defaults");
                Ok(Self::default())
            }
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let deadzone = self.gamepad.deadzone_percent;
        if !(0.0..1.0).contains(&deadzone) {
            return Err(ConfigError::Invalid(format!(
                "gamepad.deadzone_percent must be within [0, 1), got {}",
                deadzone
            )));
        }

        if let PollingModel::Interval(0) = self.gamepad.polling_model {
            return Err(ConfigError::Invalid(
                "gamepad.polling_model interval must be greater than 0".to_string(),
            ));
        }

        let keys = [
            &self.keyboard.up,
            &self.keyboard.down,
            &self.keyboard.left,
            &self.keyboard.right,
        ];
        if keys.iter().any(|key| key.as_str().is_empty()) {
            return Err(ConfigError::Invalid(
                "keyboard key codes cannot be empty".to_string(),
            ));
        }
        let distinct: HashSet<&str> = keys.iter().map(|key| key.as_str()).collect();
        if distinct.len() != keys.len() {
            return Err(ConfigError::Invalid(
                "keyboard key codes must be distinct".to_string(),
            ));
        }

        let sizes = [
            self.layout.base.width,
            self.layout.base.height,
            self.layout.handle.width,
            self.layout.handle.height,
        ];
        if sizes.iter().any(|size| !size.is_finite() || *size < 0.0) {
            return Err(ConfigError::Invalid(
                "layout sizes must be finite and non-negative".to_string(),
            ));
        }

        let radius = effective_radius(
            &self.layout,
            self.joystick.bounding_model,
            self.joystick.boundary_modifier,
        );
        if radius <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "layout leaves no travel under the {} bounding model",
                self.joystick.bounding_model
            )));
        }

        if self.runner.frame_interval_ms == 0 {
            return Err(ConfigError::Invalid(
                "runner.frame_interval_ms must be greater than 0".to_string(),
            ));
        }
        if self.runner.command_buffer == 0 {
            return Err(ConfigError::Invalid(
                "runner.command_buffer must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}
