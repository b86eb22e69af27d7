use unicode_width::UnicodeWidthStr;

/// Minimum visual height of the composer, in rows
pub const MIN_ROWS: u16 = 1;
/// The composer stops growing past this many rows
pub const MAX_ROWS: u16 = 6;

/// State for the input composer.
///
/// Multi-line buffer with a byte-offset cursor kept on char boundaries.
/// The send affordance is driven by [`InputState::is_sendable`]: enabled
/// iff the trimmed buffer is non-empty.
#[derive(Debug, Clone, Default)]
pub struct InputState {
    buffer: String,
    cursor: usize,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn insert_char(&mut self, c: char) {
        self.buffer.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    /// Shift+Enter path: a literal newline, no send
    pub fn insert_newline(&mut self) {
        self.insert_char('\n');
    }

    pub fn backspace(&mut self) {
        if let Some(prev) = self.prev_boundary() {
            self.buffer.remove(prev);
            self.cursor = prev;
        }
    }

    pub fn delete(&mut self) {
        if self.cursor < self.buffer.len() {
            self.buffer.remove(self.cursor);
        }
    }

    pub fn move_left(&mut self) {
        if let Some(prev) = self.prev_boundary() {
            self.cursor = prev;
        }
    }

    pub fn move_right(&mut self) {
        if let Some(c) = self.buffer[self.cursor..].chars().next() {
            self.cursor += c.len_utf8();
        }
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.buffer.len();
    }

    /// True iff the trimmed buffer is non-empty; an empty or
    /// whitespace-only send is a silent no-op upstream
    pub fn is_sendable(&self) -> bool {
        !self.buffer.trim().is_empty()
    }

    /// Auto-grow height, reset-then-measure: computed from content alone,
    /// so it returns to the minimum as soon as the buffer is cleared.
    pub fn visual_height(&self) -> u16 {
        let rows = self.buffer.split('\n').count() as u16;
        rows.clamp(MIN_ROWS, MAX_ROWS)
    }

    /// Clear the buffer after a send is initiated, regardless of outcome
    pub fn take(&mut self) -> String {
        self.cursor = 0;
        std::mem::take(&mut self.buffer)
    }

    /// Cursor position as (row, column). The column is in display cells,
    /// not chars, so wide characters place the terminal cursor correctly.
    pub fn cursor_position(&self) -> (u16, u16) {
        let before = &self.buffer[..self.cursor];
        let row = before.matches('\n').count() as u16;
        let col = before.rsplit('\n').next().unwrap_or("").width() as u16;
        (row, col)
    }

    fn prev_boundary(&self) -> Option<usize> {
        let c = self.buffer[..self.cursor].chars().next_back()?;
        Some(self.cursor - c.len_utf8())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_backspace() {
        let mut input = InputState::new();

        input.insert_char('H');
        input.insert_char('i');
        assert_eq!(input.buffer(), "Hi");
        assert_eq!(input.cursor(), 2);

        input.backspace();
        assert_eq!(input.buffer(), "H");
        assert_eq!(input.cursor(), 1);
    }

    #[test]
    fn test_multibyte_editing() {
        let mut input = InputState::new();
        input.insert_char('é');
        input.insert_char('x');
        assert_eq!(input.buffer(), "éx");

        input.move_left();
        input.move_left();
        assert_eq!(input.cursor(), 0);
        input.move_right();
        assert_eq!(input.cursor(), 'é'.len_utf8());

        input.backspace();
        assert_eq!(input.buffer(), "x");
    }

    #[test]
    fn test_delete_at_cursor() {
        let mut input = InputState::new();
        for c in "abc".chars() {
            input.insert_char(c);
        }
        input.move_home();
        input.delete();
        assert_eq!(input.buffer(), "bc");
    }

    #[test]
    fn test_sendable_requires_non_whitespace() {
        let mut input = InputState::new();
        assert!(!input.is_sendable());

        input.insert_char(' ');
        input.insert_newline();
        input.insert_char('\t');
        assert!(!input.is_sendable());

        input.insert_char('x');
        assert!(input.is_sendable());
    }

    #[test]
    fn test_visual_height_grows_and_resets() {
        let mut input = InputState::new();
        assert_eq!(input.visual_height(), MIN_ROWS);

        input.insert_char('a');
        input.insert_newline();
        input.insert_char('b');
        assert_eq!(input.visual_height(), 2);

        for _ in 0..10 {
            input.insert_newline();
        }
        assert_eq!(input.visual_height(), MAX_ROWS);

        input.take();
        assert_eq!(input.visual_height(), MIN_ROWS);
    }

    #[test]
    fn test_take_clears_buffer_and_cursor() {
        let mut input = InputState::new();
        for c in "hello".chars() {
            input.insert_char(c);
        }

        let taken = input.take();
        assert_eq!(taken, "hello");
        assert_eq!(input.buffer(), "");
        assert_eq!(input.cursor(), 0);
    }

    #[test]
    fn test_cursor_position_counts_display_cells() {
        let mut input = InputState::new();
        input.insert_char('漢');
        input.insert_char('字');
        assert_eq!(input.cursor_position(), (0, 4));

        input.move_left();
        assert_eq!(input.cursor_position(), (0, 2));
    }

    #[test]
    fn test_cursor_position_multiline() {
        let mut input = InputState::new();
        for c in "ab".chars() {
            input.insert_char(c);
        }
        input.insert_newline();
        input.insert_char('c');

        assert_eq!(input.cursor_position(), (1, 1));

        input.move_home();
        assert_eq!(input.cursor_position(), (0, 0));
    }
}
