//! Game settings and tuning
//!
//! Loaded from `pong_settings.json` in the working directory. Every field is
//! optional in the file; missing fields take the classic arcade defaults.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Settings file looked up in the working directory
pub const SETTINGS_FILE: &str = "pong_settings.json";

/// Where the active settings came from (reported once logging is up)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingsSource {
    /// No settings file present
    Defaults,
    /// Parsed from the settings file
    File,
    /// Settings file present but unreadable or malformed
    Invalid(String),
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Field ===
    pub field_width: i32,
    pub field_height: i32,
    /// Target frame rate of the game loop
    pub fps: u32,

    // === Paddles ===
    pub paddle_width: i32,
    pub paddle_height: i32,
    /// Gap between a paddle and its side wall
    pub paddle_margin: i32,
    /// Per-frame paddle speed while a key is held
    pub paddle_speed: i32,

    // === Ball ===
    pub ball_size: i32,
    /// Horizontal serve speed and maximum paddle deflection
    pub ball_speed: f32,
    /// Serve angle range, as a fraction of `ball_speed`
    pub serve_angle: f32,

    // === Rules ===
    pub winning_score: u32,
    /// How long the winner banner stays up before a fresh match starts
    pub win_reset_delay_ms: u64,
    /// AI ignores ball offsets within this many units of the paddle center
    pub ai_dead_zone: i32,

    // === Storage ===
    pub scores_file: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            field_width: FIELD_WIDTH,
            field_height: FIELD_HEIGHT,
            fps: FPS,

            paddle_width: PADDLE_WIDTH,
            paddle_height: PADDLE_HEIGHT,
            paddle_margin: PADDLE_MARGIN,
            paddle_speed: PADDLE_SPEED,

            ball_size: BALL_SIZE,
            ball_speed: BALL_SPEED,
            serve_angle: SERVE_ANGLE,

            winning_score: WINNING_SCORE,
            win_reset_delay_ms: WIN_RESET_DELAY_MS,
            ai_dead_zone: AI_DEAD_ZONE,

            scores_file: SCORES_FILE.to_string(),
        }
    }
}

impl Settings {
    /// Load settings from the working directory, falling back to defaults
    pub fn load() -> (Self, SettingsSource) {
        Self::load_from(SETTINGS_FILE)
    }

    /// Load settings from an explicit path, falling back to defaults
    pub fn load_from(path: impl AsRef<Path>) -> (Self, SettingsSource) {
        match fs::read_to_string(path.as_ref()) {
            Ok(json) => match serde_json::from_str::<Settings>(&json) {
                Ok(settings) => (settings.sanitized(), SettingsSource::File),
                Err(e) => (Self::default(), SettingsSource::Invalid(e.to_string())),
            },
            Err(e) if e.kind() == ErrorKind::NotFound => (Self::default(), SettingsSource::Defaults),
            Err(e) => (Self::default(), SettingsSource::Invalid(e.to_string())),
        }
    }

    /// Replace values the simulation cannot work with by their defaults
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();

        if self.field_width <= 0 || self.field_height <= 0 {
            self.field_width = defaults.field_width;
            self.field_height = defaults.field_height;
        }
        if self.fps == 0 {
            self.fps = defaults.fps;
        }
        if !self.paddles_fit() {
            self.paddle_width = defaults.paddle_width.min(self.field_width / 4).max(1);
            self.paddle_height = defaults.paddle_height.min(self.field_height).max(1);
            self.paddle_margin = defaults.paddle_margin.min(self.field_width / 8);
            if !self.paddles_fit() {
                // Field too narrow for two paddles
                self.field_width = defaults.field_width;
                self.field_height = defaults.field_height;
                self.paddle_width = defaults.paddle_width;
                self.paddle_height = defaults.paddle_height;
                self.paddle_margin = defaults.paddle_margin;
            }
        }
        if self.paddle_speed <= 0 {
            self.paddle_speed = defaults.paddle_speed;
        }
        if self.ball_size <= 0 || self.ball_size >= self.field_height {
            self.ball_size = defaults.ball_size.min(self.field_height / 2).max(1);
        }
        if !(self.ball_speed.is_finite() && self.ball_speed >= 1.0) {
            self.ball_speed = defaults.ball_speed;
        }
        if !(self.serve_angle.is_finite() && (0.0..=1.0).contains(&self.serve_angle)) {
            self.serve_angle = defaults.serve_angle;
        }
        if self.winning_score == 0 {
            self.winning_score = defaults.winning_score;
        }
        if self.ai_dead_zone < 0 {
            self.ai_dead_zone = defaults.ai_dead_zone;
        }
        if self.scores_file.trim().is_empty() {
            self.scores_file = defaults.scores_file;
        }
        self
    }

    /// Both paddles fit side by side with room between them
    fn paddles_fit(&self) -> bool {
        let span = self
            .paddle_margin
            .checked_add(self.paddle_width)
            .and_then(|n| n.checked_mul(2));
        self.paddle_width > 0
            && self.paddle_height > 0
            && self.paddle_height <= self.field_height
            && self.paddle_margin >= 0
            && span.is_some_and(|n| n < self.field_width)
    }

    /// Frame duration for the rate limiter
    pub fn frame_duration(&self) -> std::time::Duration {
        std::time::Duration::from_secs(1) / self.fps
    }

    /// Y coordinate that centers a paddle vertically
    pub fn paddle_center_y(&self) -> i32 {
        self.field_height / 2 - self.paddle_height / 2
    }

    /// Speed the AI moves its paddle (one unit slower than a human)
    pub fn ai_speed(&self) -> i32 {
        (self.paddle_speed - 1).max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("pong-arcade-settings-{}-{}", std::process::id(), name))
    }

    #[test]
    fn test_defaults_match_arcade_constants() {
        let s = Settings::default();
        assert_eq!((s.field_width, s.field_height), (900, 500));
        assert_eq!((s.paddle_width, s.paddle_height), (10, 100));
        assert_eq!(s.paddle_speed, 6);
        assert_eq!(s.ball_size, 16);
        assert_eq!(s.winning_score, 5);
        assert_eq!(s.win_reset_delay_ms, 3000);
        assert_eq!(s.ai_speed(), 5);
        assert_eq!(s.paddle_center_y(), 200);
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let (settings, source) = Settings::load_from(temp_path("missing.json"));
        assert_eq!(source, SettingsSource::Defaults);
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let path = temp_path("partial.json");
        fs::write(&path, r#"{ "winning_score": 3, "fps": 30 }"#).unwrap();
        let (settings, source) = Settings::load_from(&path);
        fs::remove_file(&path).ok();

        assert_eq!(source, SettingsSource::File);
        assert_eq!(settings.winning_score, 3);
        assert_eq!(settings.fps, 30);
        assert_eq!(settings.field_width, FIELD_WIDTH);
    }

    #[test]
    fn test_malformed_file_is_not_fatal() {
        let path = temp_path("broken.json");
        fs::write(&path, "{ not json").unwrap();
        let (settings, source) = Settings::load_from(&path);
        fs::remove_file(&path).ok();

        assert!(matches!(source, SettingsSource::Invalid(_)));
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_sanitize_rejects_nonsense() {
        let settings = Settings {
            fps: 0,
            paddle_height: 10_000,
            winning_score: 0,
            serve_angle: f32::NAN,
            ..Default::default()
        }
        .sanitized();

        assert_eq!(settings.fps, FPS);
        assert!(settings.paddle_height <= settings.field_height);
        assert_eq!(settings.winning_score, WINNING_SCORE);
        assert_eq!(settings.serve_angle, SERVE_ANGLE);
    }

    #[test]
    fn test_sanitize_huge_paddle_values_without_overflow() {
        let settings = Settings {
            paddle_margin: i32::MAX,
            paddle_width: i32::MAX,
            ..Default::default()
        }
        .sanitized();

        assert_eq!(settings.paddle_margin, PADDLE_MARGIN);
        assert_eq!(settings.paddle_width, PADDLE_WIDTH);
    }

    #[test]
    fn test_sanitize_too_narrow_field() {
        let settings = Settings {
            field_width: 1,
            ..Default::default()
        }
        .sanitized();

        let span = 2 * (settings.paddle_margin + settings.paddle_width);
        assert!(span < settings.field_width);
        assert_eq!(settings.field_width, FIELD_WIDTH);
    }
}
