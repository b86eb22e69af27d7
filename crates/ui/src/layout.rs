use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Calculated layout for the TUI
#[derive(Debug, Clone)]
pub struct TuiLayout {
    /// Main transcript area
    pub transcript: Rect,
    /// Composer card plus hint line
    pub footer: Rect,
}

impl TuiLayout {
    /// Split the terminal into transcript and footer. The footer grows with
    /// the composer: `input_rows` text rows, two border rows, one hint row.
    pub fn calculate(area: Rect, input_rows: u16) -> Self {
        let footer_height = input_rows + 3;

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(1), Constraint::Length(footer_height)])
            .split(area);

        Self { transcript: chunks[0], footer: chunks[1] }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_row_composer() {
        let layout = TuiLayout::calculate(Rect::new(0, 0, 80, 24), 1);
        assert_eq!(layout.footer.height, 4);
        assert_eq!(layout.transcript.height, 20);
        assert_eq!(layout.transcript.y, 0);
        assert_eq!(layout.footer.y, 20);
    }

    #[test]
    fn test_composer_growth_shrinks_transcript() {
        let layout = TuiLayout::calculate(Rect::new(0, 0, 80, 24), 4);
        assert_eq!(layout.footer.height, 7);
        assert_eq!(layout.transcript.height, 17);
    }

    #[test]
    fn test_tiny_terminal_keeps_transcript_line() {
        let layout = TuiLayout::calculate(Rect::new(0, 0, 80, 5), 6);
        assert!(layout.transcript.height >= 1);
    }
}
