use ratatui::style::{Color, Style};

/// Iceberg-ish color palette for the Parley TUI
#[derive(Debug, Clone, Copy)]
pub struct Theme;

impl Theme {
    /// Foreground: light blue-gray (primary text)
    pub const FG: Color = Color::Rgb(198, 200, 209);

    /// Primary accent: blue (model messages)
    pub const BLUE: Color = Color::Rgb(132, 160, 198);

    /// Secondary accent: cyan (sources disclosure, inline code)
    pub const CYAN: Color = Color::Rgb(137, 184, 194);

    /// User messages, success
    pub const GREEN: Color = Color::Rgb(180, 190, 130);

    /// Busy/pending indicators
    pub const YELLOW: Color = Color::Rgb(226, 164, 120);

    /// Errors
    pub const RED: Color = Color::Rgb(226, 120, 120);

    /// Muted text: dimmed foreground
    pub const MUTED: Color = Color::Rgb(107, 112, 137);

    /// Border color
    pub const BORDER: Color = Color::Rgb(60, 65, 90);

    pub fn base() -> Style {
        Style::default().fg(Self::FG)
    }

    pub fn muted() -> Style {
        Style::default().fg(Self::MUTED)
    }

    pub fn error() -> Style {
        Style::default().fg(Self::RED)
    }

    pub fn code() -> Style {
        Style::default().fg(Self::CYAN)
    }
}
