use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::{state::AppState, theme::Theme};

/// Footer component: the message composer plus a shortcut hint line.
///
/// The composer border turns green when the buffer is sendable and shows a
/// waiting title while a chat exchange is in flight.
pub struct Footer<'a> {
    state: &'a AppState,
}

impl<'a> Footer<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    pub fn render(&self, frame: &mut Frame<'_>, area: Rect) {
        if area.height < 2 {
            return;
        }

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(3), Constraint::Length(1)])
            .split(area);

        self.render_composer(frame, rows[0]);
        self.render_hints(frame, rows[1]);
    }

    fn render_composer(&self, frame: &mut Frame<'_>, area: Rect) {
        let border_style = if self.state.is_busy() {
            Style::default().fg(Theme::YELLOW)
        } else if self.state.input.is_sendable() {
            Style::default().fg(Theme::GREEN)
        } else {
            Style::default().fg(Theme::BORDER)
        };

        let title = if self.state.is_busy() {
            format!(" {} (waiting) ", self.state.backend_label)
        } else {
            format!(" {} ", self.state.backend_label)
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(Span::styled(title, Style::default().fg(Theme::MUTED)));

        let paragraph =
            Paragraph::new(self.state.input.buffer().to_string()).style(Theme::base()).block(block);
        frame.render_widget(paragraph, area);

        let (row, col) = self.state.input.cursor_position();
        let cursor_x = area.x.saturating_add(1).saturating_add(col);
        let cursor_y = area.y.saturating_add(1).saturating_add(row);
        if cursor_x < area.x + area.width.saturating_sub(1) && cursor_y < area.y + area.height.saturating_sub(1) {
            frame.set_cursor_position((cursor_x, cursor_y));
        }
    }

    fn render_hints(&self, frame: &mut Frame<'_>, area: Rect) {
        let hint = |key: &'static str, label: &'static str| {
            [
                Span::styled(key, Style::default().fg(Theme::BLUE)),
                Span::styled(label, Style::default().fg(Theme::MUTED)),
            ]
        };

        let spans: Vec<Span<'_>> = [
            hint("[Enter]", " send  "),
            hint("[Shift+Enter]", " newline  "),
            hint("[PgUp/PgDn]", " scroll  "),
            hint("[Ctrl+S]", " sources  "),
            hint("[Esc]", " quit"),
        ]
        .into_iter()
        .flatten()
        .collect();

        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }
}
