//! Romaji SRS - spaced repetition quiz over Japanese example sentences.

mod app;
mod config;
mod logging;
mod merge;
mod models;
mod scheduler;
mod session;
mod store;
mod ui;

use app::App;
use config::Config;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;

fn main() -> anyhow::Result<()> {
    let config = Config::load();
    let log_guard = logging::init_tracing(&config.logging);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run app
    let result = run_app(&mut terminal, &config);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = result {
        tracing::error!(error = %err, "quiz terminated");
        // exit() skips destructors; the guard must flush the file writer first.
        drop(log_guard);
        eprintln!("Error: {:#}", err);
        std::process::exit(1);
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(terminal: &mut Terminal<B>, config: &Config) -> anyhow::Result<()> {
    let mut app = App::new(config)?;

    loop {
        terminal.draw(|f| ui::draw(f, &app))?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            if key.code == KeyCode::Char('q') && key.modifiers.is_empty() && !app.show_help {
                break;
            }
            if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
                break;
            }
            app.handle_key(key)?;
        }
    }

    tracing::info!(session = %app.session.id, "session ended");
    Ok(())
}
