//! Menu widgets and screens
//!
//! Widgets are a closed set (`Button`, `InputBox`) behind one `Widget` enum
//! with uniform `draw` and `handle_input`. A `Form` owns a screen's widgets
//! and keyboard focus.

pub mod history;
pub mod menu;
pub mod names;

use glam::IVec2;

use crate::consts::MAX_NAME_LEN;
use crate::platform::{Key, PlatformEvent};
use crate::renderer::{Align, Color, RenderSink, TextSize};
use crate::sim::Rect;

pub use history::ScoreReviewScreen;
pub use menu::{MenuChoice, MenuScreen};
pub use names::{NameEntryOutcome, NameEntryScreen};

/// What a widget did with an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Response {
    Ignored,
    Consumed,
    /// Button pressed, or Enter in a text box
    Activated,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Button {
    pub rect: Rect,
    pub label: String,
    hovered: bool,
    focused: bool,
}

impl Button {
    pub fn new(rect: Rect, label: &str) -> Self {
        Self {
            rect,
            label: label.to_string(),
            hovered: false,
            focused: false,
        }
    }

    pub fn is_highlighted(&self) -> bool {
        self.hovered || self.focused
    }

    fn draw(&self, sink: &mut dyn RenderSink) {
        let fill = if self.is_highlighted() {
            Color::White
        } else {
            Color::LightBlue
        };
        sink.fill_rect(self.rect, fill);
        sink.outline_rect(self.rect, Color::White);
        sink.text(
            &self.label,
            IVec2::new(self.rect.center_x(), self.rect.center_y()),
            Align::Center,
            TextSize::Normal,
            Color::Black,
        );
    }

    fn handle_input(&mut self, event: &PlatformEvent) -> Response {
        match *event {
            PlatformEvent::MouseMove(p) => {
                self.hovered = self.rect.contains_point(p);
                Response::Ignored
            }
            PlatformEvent::MouseDown(p) if self.rect.contains_point(p) => Response::Activated,
            PlatformEvent::KeyDown(Key::Enter) if self.focused => Response::Activated,
            _ => Response::Ignored,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct InputBox {
    pub rect: Rect,
    pub text: String,
    pub placeholder: String,
    active: bool,
}

impl InputBox {
    pub fn new(rect: Rect, placeholder: &str) -> Self {
        Self {
            rect,
            text: String::new(),
            placeholder: placeholder.to_string(),
            active: false,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    fn draw(&self, sink: &mut dyn RenderSink) {
        sink.fill_rect(self.rect, Color::DarkGray);
        let border = if self.active { Color::White } else { Color::Gray };
        sink.outline_rect(self.rect, border);

        let pos = IVec2::new(self.rect.x + 10, self.rect.center_y());
        if self.text.is_empty() && !self.active {
            sink.text(&self.placeholder, pos, Align::Left, TextSize::Small, Color::Gray);
        } else if self.active {
            sink.text(&format!("{}_", self.text), pos, Align::Left, TextSize::Small, Color::White);
        } else {
            sink.text(&self.text, pos, Align::Left, TextSize::Small, Color::White);
        }
    }

    fn handle_input(&mut self, event: &PlatformEvent) -> Response {
        match *event {
            PlatformEvent::MouseDown(p) => {
                self.active = self.rect.contains_point(p);
                if self.active {
                    Response::Consumed
                } else {
                    Response::Ignored
                }
            }
            PlatformEvent::KeyDown(Key::Enter) if self.active => Response::Activated,
            PlatformEvent::KeyDown(key) | PlatformEvent::KeyRepeat(key) if self.active => match key {
                Key::Backspace => {
                    self.text.pop();
                    Response::Consumed
                }
                Key::Char(c) if !c.is_control() => {
                    if self.text.chars().count() < MAX_NAME_LEN {
                        self.text.push(c);
                    }
                    Response::Consumed
                }
                _ => Response::Ignored,
            },
            _ => Response::Ignored,
        }
    }
}

/// The closed set of on-screen widgets
#[derive(Debug, Clone, PartialEq)]
pub enum Widget {
    Button(Button),
    InputBox(InputBox),
}

impl Widget {
    pub fn rect(&self) -> Rect {
        match self {
            Widget::Button(b) => b.rect,
            Widget::InputBox(i) => i.rect,
        }
    }

    pub fn draw(&self, sink: &mut dyn RenderSink) {
        match self {
            Widget::Button(b) => b.draw(sink),
            Widget::InputBox(i) => i.draw(sink),
        }
    }

    pub fn handle_input(&mut self, event: &PlatformEvent) -> Response {
        match self {
            Widget::Button(b) => b.handle_input(event),
            Widget::InputBox(i) => i.handle_input(event),
        }
    }

    pub fn set_focused(&mut self, focused: bool) {
        match self {
            Widget::Button(b) => b.focused = focused,
            Widget::InputBox(i) => i.active = focused,
        }
    }

    /// Text of an input box; empty for buttons
    pub fn text(&self) -> &str {
        match self {
            Widget::Button(_) => "",
            Widget::InputBox(i) => &i.text,
        }
    }
}

/// A screen's widgets plus keyboard focus (Tab / arrows cycle, mouse clicks
/// focus what they hit)
#[derive(Debug, Clone)]
pub struct Form {
    pub widgets: Vec<Widget>,
    focus: usize,
}

impl Form {
    pub fn new(widgets: Vec<Widget>) -> Self {
        let mut form = Self { widgets, focus: 0 };
        form.set_focus(0);
        form
    }

    pub fn focus(&self) -> usize {
        self.focus
    }

    pub fn set_focus(&mut self, index: usize) {
        if self.widgets.is_empty() {
            return;
        }
        self.focus = index % self.widgets.len();
        for (i, widget) in self.widgets.iter_mut().enumerate() {
            widget.set_focused(i == self.focus);
        }
    }

    pub fn focus_next(&mut self) {
        self.set_focus(self.focus + 1);
    }

    pub fn focus_prev(&mut self) {
        let len = self.widgets.len().max(1);
        self.set_focus(self.focus + len - 1);
    }

    /// Route an event; returns the index of an activated widget
    pub fn handle(&mut self, event: &PlatformEvent) -> Option<usize> {
        match *event {
            PlatformEvent::KeyDown(Key::Tab | Key::Down) => {
                self.focus_next();
                return None;
            }
            PlatformEvent::KeyDown(Key::BackTab | Key::Up) => {
                self.focus_prev();
                return None;
            }
            PlatformEvent::MouseDown(p) => {
                if let Some(i) = self.widgets.iter().position(|w| w.rect().contains_point(p)) {
                    self.set_focus(i);
                }
            }
            _ => {}
        }

        let mut activated = None;
        for (i, widget) in self.widgets.iter_mut().enumerate() {
            if widget.handle_input(event) == Response::Activated && activated.is_none() {
                activated = Some(i);
            }
        }
        activated
    }

    pub fn draw(&self, sink: &mut dyn RenderSink) {
        for widget in &self.widgets {
            widget.draw(sink);
        }
    }
}

/// Centered screen title
pub(crate) fn draw_title(sink: &mut dyn RenderSink, title: &str, field_width: i32, y: i32) {
    sink.text(
        title,
        IVec2::new(field_width / 2, y),
        Align::Center,
        TextSize::Title,
        Color::White,
    );
}
