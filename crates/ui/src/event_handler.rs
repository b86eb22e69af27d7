use std::path::PathBuf;

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::state::AppState;

/// Actions produced by the event handler for the app to execute
#[derive(Debug, Clone, PartialEq)]
pub enum KeyAction {
    SendMessage { message: String },
    Upload { path: PathBuf },
    ToggleSources,
    ScrollUp,
    ScrollDown,
    ScrollToBottom,
    Notice { body: String },
    Exit,
}

/// Event handler for the TUI application
pub struct EventHandler;

impl EventHandler {
    /// Read a single event from the terminal.
    ///
    /// Returns `Some(event)` if one is available, `None` on timeout or
    /// error. Terminal errors are logged but not propagated; they are
    /// typically fatal and the application exits on the next iteration.
    pub fn read() -> Option<Event> {
        match crossterm::event::poll(std::time::Duration::from_millis(100)) {
            Ok(true) => match crossterm::event::read() {
                Ok(event) => Some(event),
                Err(e) => {
                    tracing::error!("terminal read error: {}", e);
                    None
                }
            },
            Ok(false) => None,
            Err(e) => {
                tracing::error!("event poll error: {}", e);
                None
            }
        }
    }

    pub fn handle_event(event: &Event, state: &mut AppState) -> Option<KeyAction> {
        match event {
            Event::Key(key_event) => Self::handle_key_event(*key_event, state),
            _ => None,
        }
    }

    /// Handle a keyboard event, mutating composer state and returning an
    /// action when one is triggered
    pub fn handle_key_event(event: KeyEvent, state: &mut AppState) -> Option<KeyAction> {
        if event.kind != KeyEventKind::Press {
            return None;
        }

        match event.code {
            // Shift+Enter inserts a literal newline and never sends.
            // Alt+Enter too, for terminals that swallow the shift modifier.
            KeyCode::Enter
                if event.modifiers.contains(KeyModifiers::SHIFT)
                    || event.modifiers.contains(KeyModifiers::ALT) =>
            {
                state.input.insert_newline();
                None
            }
            KeyCode::Enter => Self::submit(state),

            KeyCode::Char('c') if event.modifiers.contains(KeyModifiers::CONTROL) => Some(KeyAction::Exit),
            KeyCode::Char('s') if event.modifiers.contains(KeyModifiers::CONTROL) => Some(KeyAction::ToggleSources),
            // Unbound Ctrl/Alt chords must not leak their character into
            // the composer
            KeyCode::Char(c)
                if !event.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                state.input.insert_char(c);
                None
            }

            KeyCode::Backspace => {
                state.input.backspace();
                None
            }
            KeyCode::Delete => {
                state.input.delete();
                None
            }
            KeyCode::Left => {
                state.input.move_left();
                None
            }
            KeyCode::Right => {
                state.input.move_right();
                None
            }
            KeyCode::Home => {
                state.input.move_home();
                None
            }
            KeyCode::End if event.modifiers.contains(KeyModifiers::CONTROL) => Some(KeyAction::ScrollToBottom),
            KeyCode::End => {
                state.input.move_end();
                None
            }

            KeyCode::PageUp => Some(KeyAction::ScrollUp),
            KeyCode::PageDown => Some(KeyAction::ScrollDown),
            KeyCode::Esc => Some(KeyAction::Exit),

            _ => None,
        }
    }

    /// Plain Enter: empty input is a silent no-op (buffer untouched), and
    /// so is a send while a chat exchange is outstanding (single-flight,
    /// the drafted text stays put). Slash commands are never gated.
    fn submit(state: &mut AppState) -> Option<KeyAction> {
        if !state.input.is_sendable() {
            return None;
        }

        let is_command = state.input.buffer().trim_start().starts_with('/');
        if !is_command && state.is_busy() {
            return None;
        }

        let message = state.input.take().trim().to_string();

        if let Some(command) = message.strip_prefix('/') {
            return parse_slash_command(command);
        }

        Some(KeyAction::SendMessage { message })
    }
}

/// Parse a slash command into an action
pub fn parse_slash_command(cmd: &str) -> Option<KeyAction> {
    let parts: Vec<&str> = cmd.split_whitespace().collect();
    if parts.is_empty() {
        return None;
    }

    match parts[0] {
        "upload" => {
            if parts.len() > 1 {
                Some(KeyAction::Upload { path: PathBuf::from(parts[1..].join(" ")) })
            } else {
                Some(KeyAction::Notice { body: "usage: /upload <path>".to_string() })
            }
        }
        "sources" => Some(KeyAction::ToggleSources),
        "quit" | "exit" => Some(KeyAction::Exit),
        other => Some(KeyAction::Notice { body: format!("unknown command: /{}", other) }),
    }
}
