//! Configuration – reads/writes `~/.gaitlink/config.toml`.

use gaitlink_core::GaitError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Persisted configuration stored in `~/.gaitlink/config.toml`.
///
/// Every field has a default, so a partial file (or none at all) works.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Action namespace; the monitor derives `{ns}/goal`, `{ns}/feedback`
    /// and `{ns}/result` from it.
    #[serde(default = "default_action_namespace")]
    pub action_namespace: String,

    /// Goal topic the preview panel follows.
    #[serde(default = "default_goal_topic")]
    pub goal_topic: String,

    /// Robot-state topic seeding the preview's initial stance.
    #[serde(default = "default_robot_state_topic")]
    pub robot_state_topic: String,

    /// WebSocket port for the relay ingest endpoint.
    #[serde(default = "default_ingest_port")]
    pub ingest_port: u16,

    /// HTTP port for the cockpit web UI.
    #[serde(default = "default_cockpit_port")]
    pub cockpit_port: u16,

    /// Preview sampling rate in Hz.
    #[serde(default = "default_preview_rate")]
    pub preview_rate: f64,

    /// Start playback automatically when a goal arrives.
    #[serde(default = "default_auto_play")]
    pub auto_play: bool,

    /// Initial playback speed factor.
    #[serde(default = "default_playback_speed")]
    pub playback_speed: f64,
}

fn default_action_namespace() -> String {
    "/free_gait/execute_steps".to_string()
}
fn default_goal_topic() -> String {
    "/free_gait/execute_steps/goal".to_string()
}
fn default_robot_state_topic() -> String {
    "/robot_state".to_string()
}
fn default_ingest_port() -> u16 {
    9090
}
fn default_cockpit_port() -> u16 {
    8080
}
fn default_preview_rate() -> f64 {
    1000.0
}
fn default_auto_play() -> bool {
    true
}
fn default_playback_speed() -> f64 {
    1.0
}

impl Default for Config {
    fn default() -> Self {
        Self {
            action_namespace: default_action_namespace(),
            goal_topic: default_goal_topic(),
            robot_state_topic: default_robot_state_topic(),
            ingest_port: default_ingest_port(),
            cockpit_port: default_cockpit_port(),
            preview_rate: default_preview_rate(),
            auto_play: default_auto_play(),
            playback_speed: default_playback_speed(),
        }
    }
}

/// Return the path to `~/.gaitlink/config.toml`.
pub fn config_path() -> PathBuf {
    config_path_for_home(
        &std::env::var("HOME")
            .or_else(|_| std::env::var("USERPROFILE"))
            .unwrap_or_else(|_| ".".to_string()),
    )
}

/// Build the config path relative to the given home directory.
/// Extracted for testability without mutating environment variables.
pub(crate) fn config_path_for_home(home: &str) -> PathBuf {
    PathBuf::from(home).join(".gaitlink").join("config.toml")
}

/// Load the config from disk.  Returns `None` if the file does not exist.
pub fn load() -> Result<Option<Config>, GaitError> {
    load_from(&config_path())
}

/// Load the config from a specific path.
pub(crate) fn load_from(path: &PathBuf) -> Result<Option<Config>, GaitError> {
    if !path.exists() {
        return Ok(None);
    }
    let raw = fs::read_to_string(path).map_err(|e| {
        GaitError::Config(format!("failed to read {}: {}", path.display(), e))
    })?;
    let mut cfg: Config = toml::from_str(&raw)
        .map_err(|e| GaitError::Config(format!("failed to parse {}: {}", path.display(), e)))?;
    apply_env_overrides(&mut cfg);
    Ok(Some(cfg))
}

/// Apply `GAITLINK_*` environment variable overrides to `cfg`.
///
/// Supported variables:
///
/// | Variable | Config field |
/// |---|---|
/// | `GAITLINK_ACTION_NAMESPACE` | `action_namespace` |
/// | `GAITLINK_GOAL_TOPIC` | `goal_topic` |
/// | `GAITLINK_ROBOT_STATE_TOPIC` | `robot_state_topic` |
/// | `GAITLINK_INGEST_PORT` | `ingest_port` |
/// | `GAITLINK_COCKPIT_PORT` | `cockpit_port` |
pub fn apply_env_overrides(cfg: &mut Config) {
    if let Ok(v) = std::env::var("GAITLINK_ACTION_NAMESPACE") {
        cfg.action_namespace = v;
    }
    if let Ok(v) = std::env::var("GAITLINK_GOAL_TOPIC") {
        cfg.goal_topic = v;
    }
    if let Ok(v) = std::env::var("GAITLINK_ROBOT_STATE_TOPIC") {
        cfg.robot_state_topic = v;
    }
    if let Ok(v) = std::env::var("GAITLINK_INGEST_PORT")
        && let Ok(port) = v.parse::<u16>() {
            cfg.ingest_port = port;
        }
    if let Ok(v) = std::env::var("GAITLINK_COCKPIT_PORT")
        && let Ok(port) = v.parse::<u16>() {
            cfg.cockpit_port = port;
        }
}

/// Save the config to disk, creating `~/.gaitlink/` if necessary.
pub fn save(cfg: &Config) -> Result<(), GaitError> {
    save_to(cfg, &config_path())
}

/// Save the config to a specific path.
pub(crate) fn save_to(cfg: &Config, path: &PathBuf) -> Result<(), GaitError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            GaitError::Config(format!("failed to create config directory: {}", e))
        })?;
    }
    let raw = toml::to_string_pretty(cfg)
        .map_err(|e| GaitError::Config(format!("failed to serialize config: {}", e)))?;
    fs::write(path, raw)
        .map_err(|e| GaitError::Config(format!("failed to write {}: {}", path.display(), e)))?;
    Ok(())
}
