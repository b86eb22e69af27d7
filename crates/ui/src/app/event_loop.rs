use std::io::Result;
use std::{panic, time::Duration};

use crossterm;
use ratatui::{Terminal, backend::CrosstermBackend};

use super::App;
use crate::event_handler::EventHandler;

/// Run the TUI event loop until the user quits.
///
/// Sets up raw mode and the alternate screen, installs a panic hook that
/// restores the terminal, and multiplexes terminal input with resolved
/// exchange outcomes.
pub async fn run(app: &mut App) -> Result<()> {
    crossterm::terminal::enable_raw_mode()?;
    crossterm::execute!(std::io::stdout(), crossterm::terminal::EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(std::io::stdout());
    let mut terminal = Terminal::new(backend)?;

    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let backend = CrosstermBackend::new(std::io::stdout());
        if let Ok(mut terminal) = Terminal::new(backend) {
            let _ = terminal.show_cursor();
        }
        let _ = crossterm::terminal::disable_raw_mode();
        let _ = crossterm::execute!(std::io::stdout(), crossterm::terminal::LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    terminal.clear()?;
    terminal.draw(|frame| app.draw(frame))?;

    while !app.should_exit() {
        let tui_poll = async {
            tokio::time::sleep(Duration::from_millis(100)).await;
            EventHandler::read()
        };

        tokio::select! {
            maybe_event = tui_poll => {
                if let Some(event) = maybe_event {
                    app.handle_event(&event);
                    terminal.draw(|frame| app.draw(frame))?;
                }
            }
            maybe_outcome = app.recv_outcome() => {
                if let Some(outcome) = maybe_outcome {
                    app.handle_outcome(outcome);
                    terminal.draw(|frame| app.draw(frame))?;
                }
            }
        }
    }

    terminal.show_cursor()?;
    crossterm::terminal::disable_raw_mode()?;
    crossterm::execute!(std::io::stdout(), crossterm::terminal::LeaveAlternateScreen)?;

    Ok(())
}
