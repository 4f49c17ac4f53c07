//! Screen flow for one program run
//!
//! Menu → name entry → match → menu, with the score review reachable from the
//! menu. The session owns the score store and hands it to the match tick so
//! results are written as they happen.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::persistence::ScoreStore;
use crate::platform::{PlatformEvent, match_input};
use crate::renderer::{RenderSink, draw_match};
use crate::settings::Settings;
use crate::sim::{ExitReason, InputEvent, MatchState, TickOutcome, tick};
use crate::ui::{MenuChoice, MenuScreen, NameEntryOutcome, NameEntryScreen, ScoreReviewScreen};

/// The screen currently shown
#[derive(Debug, Clone)]
pub enum Screen {
    Menu(MenuScreen),
    NameEntry(NameEntryScreen),
    Match(Box<MatchState>),
    ScoreReview(ScoreReviewScreen),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    Running,
    Exit,
}

enum Transition {
    Menu,
    NameEntry,
    Match([String; 2]),
    ScoreReview,
    Exit,
}

pub struct Session<S: ScoreStore> {
    settings: Settings,
    store: S,
    rng: Pcg32,
    screen: Screen,
    /// AI toggle, carried from one match to the next
    ai_enabled: bool,
    match_events: Vec<InputEvent>,
}

impl<S: ScoreStore> Session<S> {
    pub fn new(settings: Settings, store: S, seed: u64) -> Self {
        let screen = Screen::Menu(MenuScreen::new(&settings));
        Self {
            settings,
            store,
            rng: Pcg32::seed_from_u64(seed),
            screen,
            ai_enabled: false,
            match_events: Vec::new(),
        }
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// The running match, if one is on screen
    pub fn current_match(&self) -> Option<&MatchState> {
        match &self.screen {
            Screen::Match(state) => Some(&**state),
            _ => None,
        }
    }

    pub fn current_match_mut(&mut self) -> Option<&mut MatchState> {
        match &mut self.screen {
            Screen::Match(state) => Some(&mut **state),
            _ => None,
        }
    }

    /// Process one frame of input and advance the current screen
    pub fn frame(&mut self, events: &[PlatformEvent], now_ms: u64) -> SessionStatus {
        match self.step(events, now_ms) {
            Some(transition) => self.enter(transition),
            None => SessionStatus::Running,
        }
    }

    fn step(&mut self, events: &[PlatformEvent], now_ms: u64) -> Option<Transition> {
        match &mut self.screen {
            Screen::Menu(menu) => events.iter().find_map(|e| {
                menu.handle(e).map(|choice| match choice {
                    MenuChoice::Start => Transition::NameEntry,
                    MenuChoice::Scores => Transition::ScoreReview,
                    MenuChoice::Quit => Transition::Exit,
                })
            }),
            Screen::NameEntry(entry) => events.iter().find_map(|e| {
                if *e == PlatformEvent::Quit {
                    return Some(Transition::Exit);
                }
                entry.handle(e).map(|outcome| match outcome {
                    NameEntryOutcome::Start(names) => Transition::Match(names),
                    NameEntryOutcome::Back => Transition::Menu,
                })
            }),
            Screen::ScoreReview(review) => events.iter().find_map(|e| {
                if *e == PlatformEvent::Quit {
                    Some(Transition::Exit)
                } else if review.handle(e) {
                    Some(Transition::Menu)
                } else {
                    None
                }
            }),
            Screen::Match(state) => {
                self.match_events.clear();
                self.match_events.extend(events.iter().filter_map(match_input));
                let outcome = tick(state, &self.match_events, now_ms, &mut self.store);
                self.ai_enabled = state.ai_enabled;
                match outcome {
                    TickOutcome::Continue => None,
                    TickOutcome::Exit(ExitReason::Escape) => Some(Transition::Menu),
                    TickOutcome::Exit(ExitReason::Quit) => Some(Transition::Exit),
                }
            }
        }
    }

    fn enter(&mut self, transition: Transition) -> SessionStatus {
        self.screen = match transition {
            Transition::Exit => {
                log::info!("Leaving session");
                return SessionStatus::Exit;
            }
            Transition::Menu => Screen::Menu(MenuScreen::new(&self.settings)),
            Transition::NameEntry => Screen::NameEntry(NameEntryScreen::new(&self.settings)),
            Transition::ScoreReview => {
                let records = self.store.load_records();
                log::debug!("Showing {} saved records", records.len());
                Screen::ScoreReview(ScoreReviewScreen::new(&self.settings, &records))
            }
            Transition::Match(names) => {
                log::info!("Match start: {} vs {}", names[0], names[1]);
                let rng = Pcg32::seed_from_u64(self.rng.random());
                let mut state = MatchState::new(&self.settings, names, rng);
                state.ai_enabled = self.ai_enabled;
                Screen::Match(Box::new(state))
            }
        };
        SessionStatus::Running
    }

    pub fn draw(&self, sink: &mut dyn RenderSink) {
        match &self.screen {
            Screen::Menu(menu) => menu.draw(sink),
            Screen::NameEntry(entry) => entry.draw(sink),
            Screen::Match(state) => draw_match(sink, state),
            Screen::ScoreReview(review) => review.draw(sink),
        }
    }
}
