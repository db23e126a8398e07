mod app;
mod config;
mod error;
mod event;
mod games;
mod input;
mod random;
mod scheduler;
mod scores;
mod scoring;
mod session;
mod ui;

use std::fs::File;
use std::io;
use std::path::PathBuf;

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use app::App;
use config::Settings;
use error::ArcadeError;
use event::{Event, EventHandler};

const LOG_FILE: &str = "minicade.log";

/// Log to a file beside the executable; stderr would tear the UI.
fn init_logging() {
    let path = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.join(LOG_FILE)))
        .unwrap_or_else(|| PathBuf::from(LOG_FILE));
    let Ok(file) = File::create(&path) else {
        return;
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
}

type Tui = Terminal<CrosstermBackend<io::Stdout>>;

fn run(terminal: &mut Tui, app: &mut App, events: &EventHandler) -> Result<(), ArcadeError> {
    loop {
        terminal.draw(|frame| ui::render(frame, app))?;

        match events.next()? {
            Event::Tick => app.on_tick(),
            Event::Key(key) => app.on_key(key),
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn main() -> Result<(), ArcadeError> {
    init_logging();
    let settings = Settings::load();
    let requested = std::env::args().nth(1);
    let events = EventHandler::new(settings.frame_interval());
    let mut app = App::new(settings, requested.as_deref())?;

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;
    terminal.clear()?;

    let result = run(&mut terminal, &mut app, &events);
    app.shutdown();

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(e) = &result {
        log::error!("arcade stopped: {}", e);
    }
    result
}
