//! Terminal front-end (Ratatui + Crossterm)
//! - Mounts the initial route against local storage
//! - Sets up the terminal and runs the event loop

use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, DisableMouseCapture, EnableMouseCapture, Event};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::info;

use crate::config::AppConfig;
use crate::database::db::LocalStorage;
use crate::latency::Latency;

pub mod input;
pub mod state;
pub mod ui;

pub async fn run(config: &AppConfig, storage: LocalStorage, initial_route: &str) -> Result<()> {
    let mut app = state::App::start(storage, Latency::new(config.latency_scale), initial_route).await;

    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    crossterm::execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = event_loop(&mut terminal, &mut app).await;

    disable_raw_mode()?;
    crossterm::execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;
    app.storage.close().await;
    info!(path = %app.nav.path(), "terminal closed");
    result
}

async fn event_loop(terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>, app: &mut state::App) -> Result<()> {
    let tick_rate = Duration::from_millis(200);
    let mut last_tick = Instant::now();

    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                app.handle_key(key).await?;
            }
        }

        if last_tick.elapsed() >= tick_rate {
            app.tick().await;
            last_tick = Instant::now();
        }

        if app.quit {
            return Ok(());
        }
    }
}
