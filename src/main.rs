//! Pong Arcade entry point
//!
//! Sets up logging and the terminal, then runs the fixed-rate frame loop.

use std::fs::File;
use std::io;

use ratatui::DefaultTerminal;
use ratatui::layout::Rect as CellRect;

use pong_arcade::consts::LOG_FILE;
use pong_arcade::platform::{FrameLimiter, SessionClock, TerminalGuard, TerminalInput};
use pong_arcade::renderer::{TerminalCanvas, Viewport};
use pong_arcade::session::{Session, SessionStatus};
use pong_arcade::settings::{SETTINGS_FILE, SettingsSource};
use pong_arcade::{JsonScoreStore, Settings};

/// Log to a file; the terminal belongs to the game
fn init_logging() {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    match File::create(LOG_FILE) {
        Ok(file) => {
            builder.target(env_logger::Target::Pipe(Box::new(file)));
        }
        Err(_) => {
            builder.filter_level(log::LevelFilter::Off);
        }
    }
    builder.init();
}

fn main() -> io::Result<()> {
    let (settings, source) = Settings::load();
    init_logging();
    log::info!("Pong Arcade starting...");
    match source {
        SettingsSource::Defaults => log::info!("No {SETTINGS_FILE}, using defaults"),
        SettingsSource::File => log::info!("Loaded settings from {SETTINGS_FILE}"),
        SettingsSource::Invalid(e) => log::warn!("Ignoring {SETTINGS_FILE}: {e}"),
    }

    let store = JsonScoreStore::new(&settings.scores_file);
    let mut session = Session::new(settings.clone(), store, rand::random());

    let mut terminal = ratatui::init();
    let result = run(&mut terminal, &mut session, &settings);
    ratatui::restore();

    match &result {
        Ok(()) => log::info!("Goodbye"),
        Err(e) => log::error!("Game ended with error: {e}"),
    }
    result
}

fn run(
    terminal: &mut DefaultTerminal,
    session: &mut Session<JsonScoreStore>,
    settings: &Settings,
) -> io::Result<()> {
    let guard = TerminalGuard::enter()?;
    let mut input = TerminalInput::new(guard.releases_reported());
    let clock = SessionClock::start();
    let mut limiter = FrameLimiter::new(settings.frame_duration());

    let (width, height) = (settings.field_width, settings.field_height);
    let size = terminal.size()?;
    let mut viewport = Viewport::new(CellRect::new(0, 0, size.width, size.height), width, height);

    loop {
        let events = input.drain(&viewport)?;
        if session.frame(&events, clock.now_ms()) == SessionStatus::Exit {
            break;
        }

        terminal.draw(|frame| {
            viewport = Viewport::new(frame.area(), width, height);
            let mut canvas = TerminalCanvas::new(frame.buffer_mut(), viewport);
            session.draw(&mut canvas);
        })?;

        limiter.wait();
    }
    Ok(())
}
