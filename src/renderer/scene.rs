//! Match scene: net, paddles, ball, scoreboard and banners

use glam::IVec2;

use super::{Align, Color, RenderSink, TextSize};
use crate::sim::{MatchPhase, MatchState, Rect, Side};

const NET_DASH: i32 = 12;
const NET_STEP: i32 = 20;
const NET_WIDTH: i32 = 4;

pub const CONTROLS_HINT: &str =
    "Controls: W/S (Left), Arrows (Right), SPACE (Pause), I (AI), R (Reset), ESC (Menu)";

/// Draw one frame of a match. Reads state only.
pub fn draw_match(sink: &mut dyn RenderSink, state: &MatchState) {
    let width = state.settings.field_width;
    let height = state.settings.field_height;

    sink.clear(Color::Black);
    draw_net(sink, width, height);
    sink.fill_rect(state.left.rect, Color::White);
    sink.fill_rect(state.right.rect, Color::White);
    sink.fill_ellipse(state.ball.rect, Color::White);
    draw_scoreboard(sink, state);

    sink.text(
        CONTROLS_HINT,
        IVec2::new(width / 2, height - 30),
        Align::Center,
        TextSize::Small,
        Color::Gray,
    );

    if state.phase() == MatchPhase::Paused {
        sink.text(
            "PAUSED",
            IVec2::new(width / 2, height / 2 - 60),
            Align::Center,
            TextSize::Normal,
            Color::LightBlue,
        );
    }

    if let Some(name) = state.winner_name() {
        sink.text(
            &format!("WINNER: {name}"),
            IVec2::new(width / 2, height / 2 - 10),
            Align::Center,
            TextSize::Normal,
            Color::White,
        );
        sink.text(
            "Restarting match...",
            IVec2::new(width / 2, height / 2 + 30),
            Align::Center,
            TextSize::Small,
            Color::White,
        );
    }
}

/// Dashed center line
fn draw_net(sink: &mut dyn RenderSink, width: i32, height: i32) {
    let mut y = 0;
    while y < height {
        if (y / NET_STEP) % 2 == 0 {
            sink.fill_rect(
                Rect::new(width / 2 - NET_WIDTH / 2, y, NET_WIDTH, NET_DASH),
                Color::White,
            );
        }
        y += NET_STEP;
    }
}

fn draw_scoreboard(sink: &mut dyn RenderSink, state: &MatchState) {
    let width = state.settings.field_width;
    for side in [Side::Left, Side::Right] {
        let x = match side {
            Side::Left => width / 4,
            Side::Right => 3 * width / 4,
        };
        sink.text(
            state.name(side),
            IVec2::new(x, 10),
            Align::Center,
            TextSize::Small,
            Color::White,
        );
        sink.text(
            &state.score(side).to_string(),
            IVec2::new(x, 40),
            Align::Center,
            TextSize::Normal,
            Color::White,
        );
    }
    if state.ai_enabled {
        sink.text(
            "[AI]",
            IVec2::new(3 * width / 4, 70),
            Align::Center,
            TextSize::Small,
            Color::Gray,
        );
    }
}
