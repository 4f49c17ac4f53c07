//! Player name entry

use glam::IVec2;

use super::{Button, Form, InputBox, Widget, draw_title};
use crate::platform::{Key, PlatformEvent};
use crate::renderer::{Align, Color, RenderSink, TextSize};
use crate::settings::Settings;
use crate::sim::Rect;

pub const DEFAULT_NAMES: [&str; 2] = ["Player 1", "Player 2"];

const START_BUTTON: usize = 2;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NameEntryOutcome {
    Start([String; 2]),
    Back,
}

#[derive(Debug, Clone)]
pub struct NameEntryScreen {
    form: Form,
    field: IVec2,
}

impl NameEntryScreen {
    pub fn new(settings: &Settings) -> Self {
        let (w, h) = (settings.field_width, settings.field_height);
        let form = Form::new(vec![
            Widget::InputBox(InputBox::new(Rect::new(w / 2 - 100, h / 2 - 60, 200, 40), "Type here...")),
            Widget::InputBox(InputBox::new(Rect::new(w / 2 - 100, h / 2 + 10, 200, 40), "Type here...")),
            Widget::Button(Button::new(Rect::new(w / 2 - 100, h / 2 + 80, 200, 50), "Start")),
        ]);
        Self {
            form,
            field: IVec2::new(w, h),
        }
    }

    /// Entered names, with defaults for blank boxes
    pub fn names(&self) -> [String; 2] {
        [0, 1].map(|i| {
            let text = self.form.widgets[i].text().trim();
            if text.is_empty() {
                DEFAULT_NAMES[i].to_string()
            } else {
                text.to_string()
            }
        })
    }

    pub fn handle(&mut self, event: &PlatformEvent) -> Option<NameEntryOutcome> {
        if matches!(event, PlatformEvent::KeyDown(Key::Esc)) {
            return Some(NameEntryOutcome::Back);
        }
        match self.form.handle(event)? {
            START_BUTTON => Some(NameEntryOutcome::Start(self.names())),
            // Enter in a name box moves on to the next field
            _ => {
                self.form.focus_next();
                None
            }
        }
    }

    pub fn draw(&self, sink: &mut dyn RenderSink) {
        let (w, h) = (self.field.x, self.field.y);
        sink.clear(Color::Black);
        draw_title(sink, "PLAYER NAMES", w, 100);
        for (label, y) in [("Player 1:", h / 2 - 45), ("Player 2:", h / 2 + 25)] {
            sink.text(label, IVec2::new(w / 3 - 150, y), Align::Left, TextSize::Normal, Color::White);
        }
        self.form.draw(sink);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn type_text(screen: &mut NameEntryScreen, text: &str) {
        for c in text.chars() {
            assert_eq!(screen.handle(&PlatformEvent::KeyDown(Key::Char(c))), None);
        }
    }

    #[test]
    fn test_enter_walks_through_fields() {
        let mut screen = NameEntryScreen::new(&Settings::default());
        type_text(&mut screen, "Ann");
        assert_eq!(screen.handle(&PlatformEvent::KeyDown(Key::Enter)), None);
        type_text(&mut screen, "Ben");
        assert_eq!(screen.handle(&PlatformEvent::KeyDown(Key::Enter)), None);
        assert_eq!(
            screen.handle(&PlatformEvent::KeyDown(Key::Enter)),
            Some(NameEntryOutcome::Start(["Ann".to_string(), "Ben".to_string()]))
        );
    }

    #[test]
    fn test_blank_names_default() {
        let mut screen = NameEntryScreen::new(&Settings::default());
        type_text(&mut screen, "   ");
        // Click Start: (350, 330)..(550, 380)
        let outcome = screen.handle(&PlatformEvent::MouseDown(IVec2::new(450, 350)));
        assert_eq!(
            outcome,
            Some(NameEntryOutcome::Start([
                "Player 1".to_string(),
                "Player 2".to_string()
            ]))
        );
    }

    #[test]
    fn test_escape_goes_back() {
        let mut screen = NameEntryScreen::new(&Settings::default());
        type_text(&mut screen, "Ann");
        assert_eq!(
            screen.handle(&PlatformEvent::KeyDown(Key::Esc)),
            Some(NameEntryOutcome::Back)
        );
    }
}
