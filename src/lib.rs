//! Pong Arcade - a classic two-player paddle game for the terminal
//!
//! Core modules:
//! - `sim`: Fixed-step match simulation (paddles, ball, AI, scoring)
//! - `renderer`: Draw sink abstraction and terminal rasterizer
//! - `platform`: Terminal input, clocks and frame pacing
//! - `persistence`: Match history storage
//! - `ui`: Menu widgets and screens
//! - `session`: Menu → name entry → match → score review flow

pub mod persistence;
pub mod platform;
pub mod renderer;
pub mod scores;
pub mod session;
pub mod settings;
pub mod sim;
pub mod ui;

pub use persistence::{JsonScoreStore, MemoryScoreStore, ScoreStore, StoreError};
pub use scores::MatchRecord;
pub use settings::Settings;

/// Game configuration constants (defaults for `Settings`)
pub mod consts {
    /// Frame rate of the game loop; one simulation step per frame
    pub const FPS: u32 = 60;

    /// Field dimensions
    pub const FIELD_WIDTH: i32 = 900;
    pub const FIELD_HEIGHT: i32 = 500;

    /// Paddle defaults
    pub const PADDLE_WIDTH: i32 = 10;
    pub const PADDLE_HEIGHT: i32 = 100;
    pub const PADDLE_MARGIN: i32 = 20;
    pub const PADDLE_SPEED: i32 = 6;

    /// Ball defaults
    pub const BALL_SIZE: i32 = 16;
    pub const BALL_SPEED: f32 = 6.0;
    /// Serve angle is drawn from [-SERVE_ANGLE, SERVE_ANGLE] × BALL_SPEED
    pub const SERVE_ANGLE: f32 = 0.7;

    /// Match rules
    pub const WINNING_SCORE: u32 = 5;
    pub const WIN_RESET_DELAY_MS: u64 = 3000;
    pub const AI_DEAD_ZONE: i32 = 10;

    /// Files in the working directory
    pub const SCORES_FILE: &str = "pong_scores.json";
    pub const LOG_FILE: &str = "pong.log";

    /// Longest accepted player name
    pub const MAX_NAME_LEN: usize = 15;
    /// Number of records shown on the score review screen
    pub const RECENT_SCORES: usize = 10;
}
