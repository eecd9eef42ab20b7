//! User control commands, as they travel over the bus.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Playback controls exposed by the preview panel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "action", content = "payload", rename_all = "snake_case")]
pub enum PlaybackCommand {
    Play,
    Pause,
    /// Jump the time cursor, seconds. Clamped to the batch bounds.
    Seek(f64),
    /// Playback speed factor, `1.0` is real time.
    SetSpeed(f64),
    /// Whether a freshly received goal starts playing on its own.
    SetAutoPlay(bool),
}

/// History-browsing controls exposed by the monitoring dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "action", content = "payload", rename_all = "snake_case")]
pub enum NavCommand {
    /// Jump to the oldest entry.
    Top,
    /// One entry older.
    Up,
    /// One entry newer.
    Down,
    /// Jump to the latest entry and resume following it.
    Bottom,
    /// Raw wheel delta in eighths of a degree, as mice report it.
    Scroll { delta: i32 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn playback_command_roundtrip() {
        let command = PlaybackCommand::Seek(2.75);
        let json = serde_json::to_string(&command).unwrap();
        assert!(json.contains(r#""action":"seek""#));
        let back: PlaybackCommand = serde_json::from_str(&json).unwrap();
        assert_eq!(back, command);
    }

    #[test]
    fn nav_command_roundtrip() {
        let command = NavCommand::Scroll { delta: -240 };
        let json = serde_json::to_string(&command).unwrap();
        let back: NavCommand = serde_json::from_str(&json).unwrap();
        assert_eq!(back, command);
    }

    #[test]
    fn unit_variants_parse_from_bare_tags() {
        let back: NavCommand = serde_json::from_str(r#"{"action":"bottom"}"#).unwrap();
        assert_eq!(back, NavCommand::Bottom);
        let back: PlaybackCommand = serde_json::from_str(r#"{"action":"play"}"#).unwrap();
        assert_eq!(back, PlaybackCommand::Play);
    }
}
