//! Main menu

use glam::IVec2;

use super::{Button, Form, Widget, draw_title};
use crate::platform::{Key, PlatformEvent};
use crate::renderer::{Color, RenderSink};
use crate::settings::Settings;
use crate::sim::Rect;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Start,
    Scores,
    Quit,
}

const CHOICES: [(MenuChoice, &str); 3] = [
    (MenuChoice::Start, "Start Game"),
    (MenuChoice::Scores, "Scores"),
    (MenuChoice::Quit, "Quit"),
];

#[derive(Debug, Clone)]
pub struct MenuScreen {
    form: Form,
    field: IVec2,
}

impl MenuScreen {
    pub fn new(settings: &Settings) -> Self {
        let (w, h) = (settings.field_width, settings.field_height);
        let widgets = CHOICES
            .iter()
            .zip([-50, 20, 90])
            .map(|((_, label), dy)| {
                Widget::Button(Button::new(Rect::new(w / 2 - 100, h / 2 + dy, 200, 50), label))
            })
            .collect();
        Self {
            form: Form::new(widgets),
            field: IVec2::new(w, h),
        }
    }

    pub fn handle(&mut self, event: &PlatformEvent) -> Option<MenuChoice> {
        match event {
            PlatformEvent::KeyDown(Key::Esc | Key::Char('q' | 'Q')) | PlatformEvent::Quit => {
                Some(MenuChoice::Quit)
            }
            _ => self.form.handle(event).map(|i| CHOICES[i].0),
        }
    }

    pub fn draw(&self, sink: &mut dyn RenderSink) {
        sink.clear(Color::Black);
        draw_title(sink, "PONG", self.field.x, 100);
        self.form.draw(sink);
    }
}
