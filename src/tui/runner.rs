//! TUI Runner
//!
//! Main event loop and terminal setup for the TUI.

use super::app::App;
use super::events::EventHandler;
use super::render;
use anyhow::Result;
use crossterm::{
    event::{DisableBracketedPaste, EnableBracketedPaste},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    backend::{Backend, CrosstermBackend},
};
use std::io;
use std::time::Duration;

/// Redraw interval while idle, drives the loading spinner
const TICK_RATE: Duration = Duration::from_millis(100);

/// Run the TUI application
pub async fn run(mut app: App) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Start terminal event listener
    let listener = EventHandler::start_terminal_listener(app.event_sender());

    // Run main loop
    let result = run_loop(&mut terminal, &mut app).await;
    listener.abort();

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableBracketedPaste
    )?;
    terminal.show_cursor()?;

    tracing::info!(
        "Session ended with {} generated article(s)",
        app.controller.history().len()
    );
    result
}

/// Main event loop
async fn run_loop<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()>
where
    B::Error: Send + Sync + 'static,
{
    loop {
        terminal.draw(|f| render::render(f, app))?;

        if app.should_quit {
            break;
        }

        // Wait for at least one event (with timeout for animation refresh)
        match tokio::time::timeout(TICK_RATE, app.next_event()).await {
            Ok(Some(event)) => {
                app.handle_event(event);
                // Drain everything already queued before re-rendering
                while let Some(event) = app.try_next_event() {
                    app.handle_event(event);
                }
            }
            Ok(None) => break,
            Err(_) => app.tick(),
        }
    }

    Ok(())
}
