//! Deterministic match simulation
//!
//! All gameplay logic lives here. This module must stay pure and deterministic:
//! - One fixed step per frame
//! - Seeded RNG only (injected into the ball)
//! - Clock readings passed in, never read
//! - No rendering or terminal dependencies

pub mod ai;
pub mod collision;
pub mod rect;
pub mod state;
pub mod tick;

pub use ai::AiController;
pub use collision::{Contacts, deflect_off_paddle, deflection_offset, touches_wall};
pub use rect::Rect;
pub use state::{Ball, MatchPhase, MatchState, Paddle, Side};
pub use tick::{ExitReason, InputEvent, MatchKey, TickOutcome, apply_input, tick};
