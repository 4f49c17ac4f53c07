//! Collision detection and response for the ball
//!
//! Walls reflect the vertical velocity without loss. Paddles send the ball
//! back toward the opponent and set its vertical speed from where it struck:
//! dead center goes straight, the paddle's ends deflect at full ball speed.

use glam::Vec2;

use super::rect::Rect;
use super::state::Side;

/// Surfaces the ball touched during one update
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Contacts {
    /// Top or bottom wall
    pub wall: bool,
    /// Last paddle hit this frame
    pub paddle: Option<Side>,
}

/// Ball top at or above the top wall, or bottom at or below the floor
#[inline]
pub fn touches_wall(ball: &Rect, field_height: i32) -> bool {
    ball.top() <= 0 || ball.bottom() >= field_height
}

/// Normalized distance of the ball center from the paddle center.
///
/// -1 at the paddle's top edge, 0 at its center, +1 at its bottom edge.
pub fn deflection_offset(ball: &Rect, paddle: &Rect) -> f32 {
    (ball.center_y() - paddle.center_y()) as f32 / (paddle.height as f32 / 2.0)
}

/// Bounce the ball off `paddle` if they overlap.
///
/// Forces the horizontal velocity away from the paddle's side, recomputes the
/// vertical velocity from the deflection offset, and snaps the ball flush
/// against the paddle face so it cannot re-collide on the next frame.
/// Returns whether a hit occurred.
pub fn deflect_off_paddle(
    ball: &mut Rect,
    vel: &mut Vec2,
    paddle: &Rect,
    side: Side,
    base_speed: f32,
) -> bool {
    if !ball.overlaps(paddle) {
        return false;
    }

    let offset = deflection_offset(ball, paddle);
    vel.y = base_speed * offset;
    match side {
        Side::Left => {
            vel.x = vel.x.abs();
            ball.set_left(paddle.right());
        }
        Side::Right => {
            vel.x = -vel.x.abs();
            ball.set_right(paddle.left());
        }
    }
    true
}
