//! Simple paddle AI
//!
//! Chases the ball's current height with a dead zone and moves one unit slower
//! than a human can, so it can be beaten. Stateless.

use super::state::{Ball, Paddle};
use crate::settings::Settings;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AiController {
    /// Units moved per frame when chasing
    pub speed: i32,
    /// Ball offsets within this distance of the paddle center are ignored
    pub dead_zone: i32,
}

impl AiController {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            speed: settings.ai_speed(),
            dead_zone: settings.ai_dead_zone,
        }
    }

    /// Vertical step the AI wants this frame
    pub fn decide(&self, paddle: &Paddle, ball: &Ball) -> i32 {
        let target = ball.rect.center_y();
        let center = paddle.rect.center_y();
        if target < center - self.dead_zone {
            -self.speed
        } else if target > center + self.dead_zone {
            self.speed
        } else {
            0
        }
    }

    /// Move the paddle one frame toward the ball
    pub fn drive(&self, paddle: &mut Paddle, ball: &Ball) {
        paddle.move_by(self.decide(paddle, ball));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::Side;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn setup() -> (AiController, Paddle, Ball) {
        let settings = Settings::default();
        (
            AiController::from_settings(&settings),
            Paddle::new(Side::Right, &settings),
            Ball::new(&settings, Pcg32::seed_from_u64(5)),
        )
    }

    #[test]
    fn test_chases_above_and_below() {
        let (ai, mut paddle, mut ball) = setup();
        // Paddle center 250
        ball.rect.y = 100;
        assert_eq!(ai.decide(&paddle, &ball), -5);
        ball.rect.y = 400;
        assert_eq!(ai.decide(&paddle, &ball), 5);

        ai.drive(&mut paddle, &ball);
        assert_eq!(paddle.rect.y, 205);
    }

    #[test]
    fn test_dead_zone_holds() {
        let (ai, paddle, mut ball) = setup();
        // Ball center = 250 ± 10 is within the dead zone
        ball.rect.y = 232;
        assert_eq!(ai.decide(&paddle, &ball), 0);
        ball.rect.y = 252;
        assert_eq!(ai.decide(&paddle, &ball), 0);
        ball.rect.y = 253;
        assert_eq!(ai.decide(&paddle, &ball), 5);
        ball.rect.y = 231;
        assert_eq!(ai.decide(&paddle, &ball), -5);
    }

    #[test]
    fn test_ai_respects_clamp() {
        let (ai, mut paddle, mut ball) = setup();
        ball.rect.y = 0;
        for _ in 0..200 {
            ai.drive(&mut paddle, &ball);
        }
        assert_eq!(paddle.rect.y, 0);
    }
}
