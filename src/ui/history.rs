//! Score review screen

use glam::IVec2;

use super::{Button, Form, Widget, draw_title};
use crate::consts::RECENT_SCORES;
use crate::platform::{Key, PlatformEvent};
use crate::renderer::{Align, Color, RenderSink, TextSize};
use crate::scores::{MatchRecord, recent};
use crate::settings::Settings;
use crate::sim::Rect;

const FIRST_ROW_Y: i32 = 120;
const ROW_HEIGHT: i32 = 30;

#[derive(Debug, Clone)]
pub struct ScoreReviewScreen {
    records: Vec<MatchRecord>,
    form: Form,
    field: IVec2,
}

impl ScoreReviewScreen {
    pub fn new(settings: &Settings, records: &[MatchRecord]) -> Self {
        let (w, h) = (settings.field_width, settings.field_height);
        Self {
            records: recent(records, RECENT_SCORES).to_vec(),
            form: Form::new(vec![Widget::Button(Button::new(
                Rect::new(w / 2 - 100, h - 80, 200, 50),
                "Back",
            ))]),
            field: IVec2::new(w, h),
        }
    }

    pub fn records(&self) -> &[MatchRecord] {
        &self.records
    }

    /// True when the player wants to go back to the menu
    pub fn handle(&mut self, event: &PlatformEvent) -> bool {
        matches!(event, PlatformEvent::KeyDown(Key::Esc)) || self.form.handle(event).is_some()
    }

    pub fn draw(&self, sink: &mut dyn RenderSink) {
        let (w, h) = (self.field.x, self.field.y);
        sink.clear(Color::Black);
        draw_title(sink, "SCORES", w, 50);

        if self.records.is_empty() {
            sink.text(
                "No scores saved yet",
                IVec2::new(w / 2, h / 2),
                Align::Center,
                TextSize::Normal,
                Color::White,
            );
        } else {
            let mut y = FIRST_ROW_Y;
            for record in &self.records {
                sink.text(
                    &record.summary(),
                    IVec2::new(w / 2, y),
                    Align::Center,
                    TextSize::Small,
                    Color::White,
                );
                y += ROW_HEIGHT;
                if y > h - 100 {
                    break;
                }
            }
        }
        self.form.draw(sink);
    }
}
