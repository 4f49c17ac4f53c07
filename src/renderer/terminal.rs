//! Terminal rasterizer
//!
//! Maps field units onto the character cells of a ratatui buffer. Filled
//! shapes paint cell backgrounds so text drawn on top keeps the fill color.

use glam::{IVec2, Vec2};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect as CellRect;
use ratatui::style::{Color as TermColor, Modifier, Style};

use super::{Align, Color, RenderSink, TextSize};
use crate::sim::Rect;

/// Mapping between field units and terminal cells
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub area: CellRect,
    pub field: IVec2,
}

impl Viewport {
    pub fn new(area: CellRect, field_width: i32, field_height: i32) -> Self {
        Self {
            area,
            field: IVec2::new(field_width.max(1), field_height.max(1)),
        }
    }

    /// Column holding field `x` (may lie outside the area)
    pub fn col(&self, x: i32) -> i32 {
        let scaled = (x as i64 * self.area.width as i64).div_euclid(self.field.x as i64);
        self.area.x as i32 + scaled as i32
    }

    /// Row holding field `y` (may lie outside the area)
    pub fn row(&self, y: i32) -> i32 {
        let scaled = (y as i64 * self.area.height as i64).div_euclid(self.field.y as i64);
        self.area.y as i32 + scaled as i32
    }

    /// Field coordinates of a cell's center, if the cell is inside the area
    pub fn to_field(&self, column: u16, row: u16) -> Option<IVec2> {
        if !self.contains_cell(column as i32, row as i32) {
            return None;
        }
        let cell = Vec2::new(
            (column - self.area.x) as f32 + 0.5,
            (row - self.area.y) as f32 + 0.5,
        );
        let scale = self.field.as_vec2() / Vec2::new(self.area.width as f32, self.area.height as f32);
        Some((cell * scale).as_ivec2())
    }

    fn contains_cell(&self, col: i32, row: i32) -> bool {
        let a = self.area;
        col >= a.x as i32
            && col < (a.x + a.width) as i32
            && row >= a.y as i32
            && row < (a.y + a.height) as i32
    }

    /// Cell span covered by a field rectangle, at least one cell, unclipped
    fn cells(&self, rect: Rect) -> (i32, i32, i32, i32) {
        let c0 = self.col(rect.left());
        let r0 = self.row(rect.top());
        let c1 = self.col(rect.right() - 1).max(c0);
        let r1 = self.row(rect.bottom() - 1).max(r0);
        (c0, r0, c1, r1)
    }
}

fn term_color(color: Color) -> TermColor {
    match color {
        Color::White => TermColor::White,
        Color::Black => TermColor::Black,
        Color::Gray => TermColor::Gray,
        Color::DarkGray => TermColor::DarkGray,
        Color::LightBlue => TermColor::Rgb(100, 150, 255),
    }
}

/// `RenderSink` that draws straight into a ratatui buffer
pub struct TerminalCanvas<'a> {
    buf: &'a mut Buffer,
    viewport: Viewport,
}

impl<'a> TerminalCanvas<'a> {
    pub fn new(buf: &'a mut Buffer, viewport: Viewport) -> Self {
        Self { buf, viewport }
    }

    fn paint(&mut self, col: i32, row: i32, symbol: Option<&str>, style: Style) {
        if !self.viewport.contains_cell(col, row) {
            return;
        }
        if let Some(cell) = self.buf.cell_mut((col as u16, row as u16)) {
            if let Some(symbol) = symbol {
                cell.set_symbol(symbol);
            }
            cell.set_style(style);
        }
    }
}

impl RenderSink for TerminalCanvas<'_> {
    fn clear(&mut self, color: Color) {
        let style = Style::default().fg(TermColor::White).bg(term_color(color));
        let a = self.viewport.area;
        for row in a.y..a.y + a.height {
            for col in a.x..a.x + a.width {
                self.paint(col as i32, row as i32, Some(" "), style);
            }
        }
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        let style = Style::default().bg(term_color(color));
        let (c0, r0, c1, r1) = self.viewport.cells(rect);
        for row in r0..=r1 {
            for col in c0..=c1 {
                self.paint(col, row, Some(" "), style);
            }
        }
    }

    fn outline_rect(&mut self, rect: Rect, color: Color) {
        let style = Style::default().fg(term_color(color));
        let (c0, r0, c1, r1) = self.viewport.cells(rect);
        for col in c0..=c1 {
            self.paint(col, r0, Some("─"), style);
            self.paint(col, r1, Some("─"), style);
        }
        if r1 > r0 {
            for row in r0..=r1 {
                self.paint(c0, row, Some("│"), style);
                self.paint(c1, row, Some("│"), style);
            }
            self.paint(c0, r0, Some("┌"), style);
            self.paint(c1, r0, Some("┐"), style);
            self.paint(c0, r1, Some("└"), style);
            self.paint(c1, r1, Some("┘"), style);
        }
    }

    fn fill_ellipse(&mut self, rect: Rect, color: Color) {
        let style = Style::default().bg(term_color(color));
        let (c0, r0, c1, r1) = self.viewport.cells(rect);
        let center = Vec2::new(
            rect.x as f32 + rect.width as f32 / 2.0,
            rect.y as f32 + rect.height as f32 / 2.0,
        );
        let radii = Vec2::new(rect.width as f32 / 2.0, rect.height as f32 / 2.0).max(Vec2::ONE);
        let cell_size = Vec2::new(
            self.viewport.field.x as f32 / self.viewport.area.width.max(1) as f32,
            self.viewport.field.y as f32 / self.viewport.area.height.max(1) as f32,
        );

        let mut painted = false;
        for row in r0..=r1 {
            for col in c0..=c1 {
                let cell_center = Vec2::new(
                    (col - self.viewport.area.x as i32) as f32 + 0.5,
                    (row - self.viewport.area.y as i32) as f32 + 0.5,
                ) * cell_size;
                let d = (cell_center - center) / radii;
                if d.length_squared() <= 1.0 {
                    self.paint(col, row, Some(" "), style);
                    painted = true;
                }
            }
        }
        // Smaller than a cell: still show it
        if !painted {
            let c = rect.center();
            self.paint(self.viewport.col(c.x), self.viewport.row(c.y), Some(" "), style);
        }
    }

    fn text(&mut self, text: &str, pos: IVec2, align: Align, size: TextSize, color: Color) {
        let mut style = Style::default().fg(term_color(color));
        if matches!(size, TextSize::Title | TextSize::Normal) {
            style = style.add_modifier(Modifier::BOLD);
        }
        let len = text.chars().count() as i32;
        let row = self.viewport.row(pos.y);
        let mut col = self.viewport.col(pos.x);
        if align == Align::Center {
            col -= len / 2;
        }

        let mut buf = [0u8; 4];
        for (i, ch) in text.chars().enumerate() {
            let symbol: &str = ch.encode_utf8(&mut buf);
            self.paint(col + i as i32, row, Some(symbol), style);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewport() -> Viewport {
        Viewport::new(CellRect::new(0, 0, 90, 50), 900, 500)
    }

    fn symbol(buf: &Buffer, col: u16, row: u16) -> String {
        buf.cell((col, row)).map(|c| c.symbol().to_string()).unwrap_or_default()
    }

    #[test]
    fn test_viewport_mapping() {
        let v = viewport();
        assert_eq!(v.col(450), 45);
        assert_eq!(v.row(250), 25);
        assert_eq!(v.col(-5), -1);
        assert_eq!(v.to_field(45, 25), Some(IVec2::new(455, 255)));
        assert_eq!(v.to_field(90, 0), None);
    }

    #[test]
    fn test_fill_rect_paints_background() {
        let v = viewport();
        let mut buf = Buffer::empty(v.area);
        let mut canvas = TerminalCanvas::new(&mut buf, v);
        canvas.fill_rect(Rect::new(20, 200, 10, 100), Color::White);

        let cell = buf.cell((2, 20)).unwrap();
        assert_eq!(cell.bg, TermColor::White);
        assert_eq!(buf.cell((2, 29)).unwrap().bg, TermColor::White);
        assert_ne!(buf.cell((2, 30)).unwrap().bg, TermColor::White);
        assert_ne!(buf.cell((3, 20)).unwrap().bg, TermColor::White);
    }

    #[test]
    fn test_centered_text() {
        let v = viewport();
        let mut buf = Buffer::empty(v.area);
        let mut canvas = TerminalCanvas::new(&mut buf, v);
        canvas.text("PONG", IVec2::new(450, 100), Align::Center, TextSize::Title, Color::White);
        assert_eq!(symbol(&buf, 43, 10), "P");
        assert_eq!(symbol(&buf, 46, 10), "G");
    }

    #[test]
    fn test_text_clipped_at_edges() {
        let v = viewport();
        let mut buf = Buffer::empty(v.area);
        let mut canvas = TerminalCanvas::new(&mut buf, v);
        canvas.text("abcdef", IVec2::new(0, 0), Align::Center, TextSize::Small, Color::White);
        assert_eq!(symbol(&buf, 0, 0), "d");
    }

    #[test]
    fn test_tiny_ellipse_still_visible() {
        let v = Viewport::new(CellRect::new(0, 0, 10, 5), 900, 500);
        let mut buf = Buffer::empty(v.area);
        let mut canvas = TerminalCanvas::new(&mut buf, v);
        canvas.fill_ellipse(Rect::new(442, 242, 16, 16), Color::White);
        assert_eq!(buf.cell((5, 2)).unwrap().bg, TermColor::White);
    }
}
