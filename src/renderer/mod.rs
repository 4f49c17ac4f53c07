//! Rendering
//!
//! Screens describe what to draw through the `RenderSink` trait in field
//! units; a backend decides how. `DrawList` records the calls (used by tests),
//! `terminal::TerminalCanvas` rasterizes them into a ratatui buffer.

pub mod scene;
pub mod terminal;

use glam::IVec2;

use crate::sim::Rect;

pub use scene::draw_match;
pub use terminal::{TerminalCanvas, Viewport};

/// Palette
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    White,
    Black,
    Gray,
    DarkGray,
    LightBlue,
}

/// Horizontal anchoring of a text run relative to its position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextSize {
    Title,
    Normal,
    Small,
}

/// Where screens send their geometry and text
pub trait RenderSink {
    fn clear(&mut self, color: Color);
    fn fill_rect(&mut self, rect: Rect, color: Color);
    fn outline_rect(&mut self, rect: Rect, color: Color);
    /// Filled ellipse inscribed in `rect`
    fn fill_ellipse(&mut self, rect: Rect, color: Color);
    fn text(&mut self, text: &str, pos: IVec2, align: Align, size: TextSize, color: Color);
}

/// A recorded draw call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear(Color),
    FillRect(Rect, Color),
    OutlineRect(Rect, Color),
    FillEllipse(Rect, Color),
    Text {
        text: String,
        pos: IVec2,
        align: Align,
        size: TextSize,
        color: Color,
    },
}

/// Sink that records every call in order
#[derive(Debug, Clone, Default)]
pub struct DrawList {
    pub commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    /// All text drawn, in call order
    pub fn texts(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn contains_text(&self, needle: &str) -> bool {
        self.texts().iter().any(|t| t.contains(needle))
    }
}

impl RenderSink for DrawList {
    fn clear(&mut self, color: Color) {
        self.commands.push(DrawCommand::Clear(color));
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.commands.push(DrawCommand::FillRect(rect, color));
    }

    fn outline_rect(&mut self, rect: Rect, color: Color) {
        self.commands.push(DrawCommand::OutlineRect(rect, color));
    }

    fn fill_ellipse(&mut self, rect: Rect, color: Color) {
        self.commands.push(DrawCommand::FillEllipse(rect, color));
    }

    fn text(&mut self, text: &str, pos: IVec2, align: Align, size: TextSize, color: Color) {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            pos,
            align,
            size,
            color,
        });
    }
}
