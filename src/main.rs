mod app;
mod event;
mod scores;
mod ui;

use std::env;
use std::fs::File;
use std::io;

use anyhow::Context;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use miniarcade::Config;

use app::App;
use event::{Event, EventHandler};

const LOG_FILE_ENV: &str = "MINIARCADE_LOG_FILE";
const DEFAULT_LOG_FILE: &str = "miniarcade.log";

// The terminal is ours while the UI runs, so logs go to a file and only when
// RUST_LOG asks for them.
fn init_logging() -> anyhow::Result<()> {
    if env::var_os("RUST_LOG").is_none() {
        return Ok(());
    }
    let path = env::var(LOG_FILE_ENV).unwrap_or_else(|_| DEFAULT_LOG_FILE.to_string());
    let file = File::create(&path).with_context(|| format!("creating log file {}", path))?;
    env_logger::Builder::from_default_env()
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

fn run(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> io::Result<()> {
    let event_handler = EventHandler::new(16); // ~60 FPS

    loop {
        terminal.draw(|frame| ui::render(frame, app))?;

        match event_handler.next()? {
            Event::Frame(now) => app.on_frame(now),
            Event::Key(key) => app.on_key(key),
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn main() -> anyhow::Result<()> {
    init_logging()?;
    let config = Config::load().context("loading configuration")?;
    log::info!("miniarcade {} starting", env!("CARGO_PKG_VERSION"));

    // Setup terminal
    enable_raw_mode().context("enabling raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
        .context("entering the alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("creating the terminal")?;
    terminal.clear()?;

    let mut app = App::new(config);
    let result = run(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result.context("running the UI loop")?;
    log::info!("miniarcade exiting");
    Ok(())
}
