//! Fixed-step match simulation
//!
//! One call to `tick` is one frame: drain the frame's input events in order,
//! then advance paddles, AI and ball unless the match is paused or a winner is
//! on screen.

use serde::{Deserialize, Serialize};

use super::state::MatchState;
use crate::persistence::ScoreStore;

/// Keys the match reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MatchKey {
    LeftUp,
    LeftDown,
    RightUp,
    RightDown,
    Pause,
    ToggleAi,
    Reset,
    Escape,
}

/// A discrete input edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputEvent {
    KeyDown(MatchKey),
    KeyUp(MatchKey),
    Quit,
}

/// Why a match stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitReason {
    /// Back to the menu
    Escape,
    /// Close the program
    Quit,
}

/// Result of a single tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Continue,
    Exit(ExitReason),
}

/// Advance the match by one frame.
///
/// `now_ms` is the frame's clock reading; it stamps records and drives the
/// winner banner timeout. Records are appended to `store` when a match is won
/// and when a match with a nonzero score is exited.
pub fn tick(
    state: &mut MatchState,
    events: &[InputEvent],
    now_ms: u64,
    store: &mut dyn ScoreStore,
) -> TickOutcome {
    for &event in events {
        if let Some(reason) = apply_input(state, event) {
            state.save_abandoned(now_ms, store);
            return TickOutcome::Exit(reason);
        }
    }

    if state.paused {
        return TickOutcome::Continue;
    }

    if state.winner.is_some() {
        if now_ms.saturating_sub(state.winner_timer_ms) > state.settings.win_reset_delay_ms {
            log::info!("Starting a new match");
            state.reset();
        }
        return TickOutcome::Continue;
    }

    advance(state, now_ms, store);
    TickOutcome::Continue
}

/// Apply one input edge. Returns an exit reason when the match should end.
pub fn apply_input(state: &mut MatchState, event: InputEvent) -> Option<ExitReason> {
    let speed = state.settings.paddle_speed;
    match event {
        InputEvent::Quit => return Some(ExitReason::Quit),
        InputEvent::KeyDown(key) => match key {
            MatchKey::Escape => return Some(ExitReason::Escape),
            MatchKey::LeftUp => state.left.set_velocity(-speed),
            MatchKey::LeftDown => state.left.set_velocity(speed),
            MatchKey::RightUp => state.right.set_velocity(-speed),
            MatchKey::RightDown => state.right.set_velocity(speed),
            MatchKey::Pause => {
                state.paused = !state.paused;
                log::debug!("Paused: {}", state.paused);
            }
            MatchKey::ToggleAi => {
                state.ai_enabled = !state.ai_enabled;
                log::debug!("AI enabled: {}", state.ai_enabled);
            }
            MatchKey::Reset => {
                log::info!("Match reset");
                state.reset();
            }
        },
        InputEvent::KeyUp(key) => match key {
            MatchKey::LeftUp | MatchKey::LeftDown => state.left.set_velocity(0),
            MatchKey::RightUp | MatchKey::RightDown => state.right.set_velocity(0),
            _ => {}
        },
    }
    None
}

/// One frame of physics while the ball is in play
fn advance(state: &mut MatchState, now_ms: u64, store: &mut dyn ScoreStore) {
    state.left.update();
    if state.ai_enabled {
        state.ai.drive(&mut state.right, &state.ball);
    } else {
        state.right.update();
    }

    let contacts = state.ball.update(&state.left, &state.right);
    if let Some(side) = contacts.paddle {
        log::trace!("Paddle hit: {side:?}");
    }

    // Ball out on one side is a goal for the other
    if let Some(conceded) = state.ball.exited() {
        state.award_goal(conceded.opponent(), now_ms, store);
    }
}
