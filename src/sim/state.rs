//! Match state and core simulation entities
//!
//! All state a running match needs lives in `MatchState`; the frame loop owns it
//! and is the only writer.

use glam::{IVec2, Vec2};
use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::ai::AiController;
use super::collision::{Contacts, deflect_off_paddle, touches_wall};
use super::rect::Rect;
use crate::persistence::ScoreStore;
use crate::scores::MatchRecord;
use crate::settings::Settings;

/// One of the two players
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn opponent(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }

    /// Horizontal direction of the serve that follows a goal by `self`.
    ///
    /// The ball is served back toward the side that just conceded: a right
    /// goal (ball out on the left) serves with +1, a left goal with -1.
    pub fn serve_direction_after_goal(self) -> i32 {
        match self {
            Side::Right => 1,
            Side::Left => -1,
        }
    }
}

/// Externally visible phase of a match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchPhase {
    /// Ball in play (a fresh serve counts as playing)
    Playing,
    /// Simulation frozen; input and rendering continue
    Paused,
    /// A player reached the winning score; banner shown until auto-reset
    WinAnnounced,
}

/// A vertical paddle clamped to the field
#[derive(Debug, Clone)]
pub struct Paddle {
    pub rect: Rect,
    /// Per-frame delta applied by `update`
    pub velocity: i32,
    /// Largest allowed `rect.y`
    max_y: i32,
    /// Centered `rect.y`, restored on reset
    home_y: i32,
}

impl Paddle {
    pub fn new(side: Side, settings: &Settings) -> Self {
        let x = match side {
            Side::Left => settings.paddle_margin,
            Side::Right => settings.field_width - settings.paddle_margin - settings.paddle_width,
        };
        Self {
            rect: Rect::new(
                x,
                settings.paddle_center_y(),
                settings.paddle_width,
                settings.paddle_height,
            ),
            velocity: 0,
            max_y: (settings.field_height - settings.paddle_height).max(0),
            home_y: settings.paddle_center_y(),
        }
    }

    /// Shift vertically, then clamp into the field
    pub fn move_by(&mut self, dy: i32) {
        self.rect.y = self.rect.y.saturating_add(dy).clamp(0, self.max_y);
    }

    pub fn set_velocity(&mut self, velocity: i32) {
        self.velocity = velocity;
    }

    /// Apply one frame of the held velocity
    pub fn update(&mut self) {
        self.move_by(self.velocity);
    }

    /// Move back to the vertical center (velocity is left as held)
    pub fn recenter(&mut self) {
        self.rect.y = self.home_y;
    }

    pub fn max_y(&self) -> i32 {
        self.max_y
    }
}

/// The ball, with its own seeded RNG for serves
#[derive(Debug, Clone)]
pub struct Ball {
    pub rect: Rect,
    pub vel: Vec2,
    /// Horizontal serve speed and maximum deflection speed
    pub speed: f32,
    serve_angle: f32,
    field: IVec2,
    rng: Pcg32,
}

impl Ball {
    /// Create a ball and serve it in a random direction
    pub fn new(settings: &Settings, rng: Pcg32) -> Self {
        let mut ball = Self {
            rect: Rect::new(0, 0, settings.ball_size, settings.ball_size),
            vel: Vec2::ZERO,
            speed: settings.ball_speed,
            serve_angle: settings.serve_angle,
            field: IVec2::new(settings.field_width, settings.field_height),
            rng,
        };
        ball.reset(None);
        ball
    }

    /// Serve from the field center. `direction` is ±1; `None` picks at random.
    pub fn reset(&mut self, direction: Option<i32>) {
        self.rect.set_center(self.field / 2);
        let dir_x = match direction {
            Some(d) => d.signum() as f32,
            None => {
                if self.rng.random_bool(0.5) {
                    1.0
                } else {
                    -1.0
                }
            }
        };
        let angle = self.rng.random_range(-self.serve_angle..=self.serve_angle);
        self.vel = Vec2::new(self.speed * dir_x, self.speed * angle);
    }

    /// Advance one frame and resolve wall and paddle contacts
    pub fn update(&mut self, left: &Paddle, right: &Paddle) -> Contacts {
        // Truncate toward zero: sub-unit velocities stall instead of rounding up
        self.rect.x += self.vel.x as i32;
        self.rect.y += self.vel.y as i32;

        let mut contacts = Contacts::default();
        if touches_wall(&self.rect, self.field.y) {
            self.vel.y = -self.vel.y;
            contacts.wall = true;
        }

        // Right is resolved last so it wins an (unreachable) double overlap
        for (paddle, side) in [(left, Side::Left), (right, Side::Right)] {
            if deflect_off_paddle(&mut self.rect, &mut self.vel, &paddle.rect, side, self.speed) {
                contacts.paddle = Some(side);
            }
        }
        contacts
    }

    /// Which side conceded, if the ball has fully left the field
    pub fn exited(&self) -> Option<Side> {
        if self.rect.right() < 0 {
            Some(Side::Left)
        } else if self.rect.left() > self.field.x {
            Some(Side::Right)
        } else {
            None
        }
    }
}

/// Complete state of one match
#[derive(Debug, Clone)]
pub struct MatchState {
    pub settings: Settings,
    pub left: Paddle,
    pub right: Paddle,
    pub ball: Ball,
    pub score_left: u32,
    pub score_right: u32,
    pub winner: Option<Side>,
    pub paused: bool,
    /// AI drives the right paddle
    pub ai_enabled: bool,
    /// Clock reading (ms) when the winner was decided
    pub winner_timer_ms: u64,
    /// Display names, left then right
    pub player_names: [String; 2],
    pub(crate) ai: AiController,
    /// The current scores were already written to the history
    recorded: bool,
}

impl MatchState {
    pub fn new(settings: &Settings, player_names: [String; 2], rng: Pcg32) -> Self {
        Self {
            settings: settings.clone(),
            left: Paddle::new(Side::Left, settings),
            right: Paddle::new(Side::Right, settings),
            ball: Ball::new(settings, rng),
            score_left: 0,
            score_right: 0,
            winner: None,
            paused: false,
            ai_enabled: false,
            winner_timer_ms: 0,
            player_names,
            ai: AiController::from_settings(settings),
            recorded: false,
        }
    }

    pub fn phase(&self) -> MatchPhase {
        if self.paused {
            MatchPhase::Paused
        } else if self.winner.is_some() {
            MatchPhase::WinAnnounced
        } else {
            MatchPhase::Playing
        }
    }

    /// Start a fresh match: scores, winner, timer and pause cleared, paddles
    /// centered, ball re-served. The AI toggle survives.
    pub fn reset(&mut self) {
        self.score_left = 0;
        self.score_right = 0;
        self.winner = None;
        self.winner_timer_ms = 0;
        self.paused = false;
        self.recorded = false;
        self.left.recenter();
        self.right.recenter();
        self.ball.reset(None);
    }

    pub fn score(&self, side: Side) -> u32 {
        match side {
            Side::Left => self.score_left,
            Side::Right => self.score_right,
        }
    }

    pub fn name(&self, side: Side) -> &str {
        match side {
            Side::Left => &self.player_names[0],
            Side::Right => &self.player_names[1],
        }
    }

    pub fn paddle_mut(&mut self, side: Side) -> &mut Paddle {
        match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        }
    }

    pub fn winner_name(&self) -> Option<&str> {
        self.winner.map(|side| self.name(side))
    }

    /// Either player has scored
    pub fn has_score(&self) -> bool {
        self.score_left > 0 || self.score_right > 0
    }

    /// The current result as a history record
    pub fn record(&self, date: u64) -> MatchRecord {
        MatchRecord::new(
            &self.player_names[0],
            &self.player_names[1],
            self.score_left,
            self.score_right,
            date,
        )
    }

    /// Credit a goal; serves the ball and announces a winner when due
    pub(crate) fn award_goal(&mut self, scorer: Side, now_ms: u64, store: &mut dyn ScoreStore) {
        match scorer {
            Side::Left => self.score_left += 1,
            Side::Right => self.score_right += 1,
        }
        log::debug!(
            "Goal for {} ({} - {})",
            self.name(scorer),
            self.score_left,
            self.score_right
        );
        self.ball.reset(Some(scorer.serve_direction_after_goal()));

        if self.winner.is_none() && self.score(scorer) >= self.settings.winning_score {
            self.winner = Some(scorer);
            self.winner_timer_ms = now_ms;
            log::info!(
                "{} wins {} - {}",
                self.name(scorer),
                self.score_left,
                self.score_right
            );
            self.save_record(now_ms, store);
        }
    }

    /// Record an unfinished match on exit, unless nothing was scored or the
    /// result is already saved
    pub(crate) fn save_abandoned(&mut self, now_ms: u64, store: &mut dyn ScoreStore) {
        if self.has_score() && !self.recorded {
            log::info!(
                "Match abandoned at {} - {}",
                self.score_left,
                self.score_right
            );
            self.save_record(now_ms, store);
        }
    }

    fn save_record(&mut self, now_ms: u64, store: &mut dyn ScoreStore) {
        match store.append_record(self.record(now_ms)) {
            Ok(()) => self.recorded = true,
            Err(e) => log::warn!("Failed to save match record: {e}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn ball(seed: u64) -> Ball {
        Ball::new(&Settings::default(), Pcg32::seed_from_u64(seed))
    }

    #[test]
    fn test_paddle_starts_centered() {
        let settings = Settings::default();
        let left = Paddle::new(Side::Left, &settings);
        let right = Paddle::new(Side::Right, &settings);
        assert_eq!(left.rect, Rect::new(20, 200, 10, 100));
        assert_eq!(right.rect, Rect::new(870, 200, 10, 100));
        assert_eq!(left.max_y(), 400);
    }

    #[test]
    fn test_paddle_move_clamps() {
        let mut paddle = Paddle::new(Side::Left, &Settings::default());
        paddle.move_by(-1000);
        assert_eq!(paddle.rect.y, 0);
        paddle.move_by(i32::MAX);
        assert_eq!(paddle.rect.y, 400);
        paddle.move_by(-6);
        assert_eq!(paddle.rect.y, 394);
    }

    #[test]
    fn test_right_paddle_wins_double_overlap() {
        let settings = Settings::default();
        let left = Paddle::new(Side::Left, &settings);
        let right = Paddle::new(Side::Right, &settings);
        let mut ball = ball(5);
        // A ball wide enough to span both paddles after moving
        ball.rect = Rect::new(19, 240, 850, 16);
        ball.vel = Vec2::new(6.0, 0.0);

        let contacts = ball.update(&left, &right);
        assert_eq!(contacts.paddle, Some(Side::Right));
        assert!(ball.vel.x < 0.0);
        assert_eq!(ball.rect.right(), right.rect.left());
    }

    #[test]
    fn test_paddle_velocity_persists_until_cleared() {
        let mut paddle = Paddle::new(Side::Left, &Settings::default());
        paddle.set_velocity(-6);
        paddle.update();
        paddle.update();
        assert_eq!(paddle.rect.y, 188);
        paddle.set_velocity(0);
        paddle.update();
        assert_eq!(paddle.rect.y, 188);
    }

    #[test]
    fn test_serve_is_centered_with_constant_horizontal_speed() {
        for seed in 0..50 {
            let ball = ball(seed);
            assert_eq!(ball.rect.center(), IVec2::new(450, 250));
            assert_eq!(ball.vel.x.abs(), 6.0);
            assert!(ball.vel.y.abs() <= 6.0 * 0.7 + f32::EPSILON);
        }
    }

    #[test]
    fn test_serve_direction_honored() {
        let mut ball = ball(7);
        ball.reset(Some(1));
        assert_eq!(ball.vel.x, 6.0);
        ball.reset(Some(-1));
        assert_eq!(ball.vel.x, -6.0);
    }

    #[test]
    fn test_serve_is_deterministic_per_seed() {
        let a = ball(42);
        let b = ball(42);
        assert_eq!(a.vel, b.vel);
    }

    #[test]
    fn test_goal_serve_mapping() {
        assert_eq!(Side::Right.serve_direction_after_goal(), 1);
        assert_eq!(Side::Left.serve_direction_after_goal(), -1);
    }

    #[test]
    fn test_truncated_integration() {
        let settings = Settings::default();
        let left = Paddle::new(Side::Left, &settings);
        let right = Paddle::new(Side::Right, &settings);
        let mut ball = ball(1);
        let start = ball.rect;
        ball.vel = Vec2::new(0.9, -0.9);
        ball.update(&left, &right);
        assert_eq!(ball.rect, start);

        ball.vel = Vec2::new(-2.7, 1.5);
        ball.update(&left, &right);
        assert_eq!((ball.rect.x, ball.rect.y), (start.x - 2, start.y + 1));
    }

    #[test]
    fn test_exit_detection_requires_full_exit() {
        let mut ball = ball(3);
        ball.rect.x = -16;
        assert_eq!(ball.exited(), None);
        ball.rect.x = -17;
        assert_eq!(ball.exited(), Some(Side::Left));
        ball.rect.x = 900;
        assert_eq!(ball.exited(), None);
        ball.rect.x = 901;
        assert_eq!(ball.exited(), Some(Side::Right));
    }
}
