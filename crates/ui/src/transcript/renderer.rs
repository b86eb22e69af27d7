use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph},
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use super::entry::TranscriptEntry;
use super::state::TranscriptView;
use crate::markdown::render_markdown;
use crate::theme::Theme;

const USER_GLYPH: &str = "❯ You";
const MODEL_GLYPH: &str = "✳ Bot";

/// Renders the transcript view to a frame.
///
/// The entry-to-lines transform is pure and tested on its own; only
/// [`TranscriptRenderer::render`] touches the terminal.
pub struct TranscriptRenderer<'a> {
    view: &'a mut TranscriptView,
}

impl<'a> TranscriptRenderer<'a> {
    pub fn new(view: &'a mut TranscriptView) -> Self {
        Self { view }
    }

    /// Every line is pre-wrapped to the content width, so line count equals
    /// display row count and the scroll offset is exact.
    pub fn render(&mut self, frame: &mut Frame<'_>, area: Rect) {
        let content_width = area.width.saturating_sub(4) as usize;
        let lines = render_transcript_lines(self.view, content_width);

        let viewport = area.height.saturating_sub(2) as usize;
        let offset = self.view.resolve_scroll(lines.len(), viewport);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Theme::BORDER))
            .title(Span::styled("Parley", Style::default().fg(Theme::BLUE)));

        let paragraph = Paragraph::new(Text::from(lines)).block(block).scroll((offset as u16, 0));

        frame.render_widget(paragraph, area);
    }
}

/// Render every entry, separated by blank lines
pub fn render_transcript_lines(view: &TranscriptView, width: usize) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    for entry in view.entries() {
        if !lines.is_empty() {
            lines.push(Line::default());
        }
        render_entry_lines(entry, width, &mut lines);
    }
    lines
}

/// Pure transform: one display message into styled lines
pub fn render_entry_lines(entry: &TranscriptEntry, width: usize, lines: &mut Vec<Line<'static>>) {
    match entry {
        TranscriptEntry::UserMessage { body } => {
            lines.push(avatar_line(USER_GLYPH, Theme::GREEN));
            wrap_text(body, Theme::base(), width, lines);
        }
        TranscriptEntry::ModelReply { body, sources, sources_expanded } => {
            lines.push(avatar_line(MODEL_GLYPH, Theme::BLUE));
            for line in render_markdown(body) {
                wrap_line(line, width, lines);
            }
            render_sources(sources, *sources_expanded, width, lines);
        }
        TranscriptEntry::Pending { label, .. } => {
            lines.push(avatar_line(MODEL_GLYPH, Theme::BLUE));
            wrap_text(
                label,
                Theme::muted().add_modifier(Modifier::ITALIC),
                width,
                lines,
            );
        }
        TranscriptEntry::ErrorMessage { body } => {
            lines.push(avatar_line(MODEL_GLYPH, Theme::BLUE));
            wrap_text(body, Theme::error(), width, lines);
        }
        TranscriptEntry::Notice { body } => {
            let line = Line::from(vec![
                Span::styled("[parley] ", Theme::muted()),
                Span::styled(body.clone(), Theme::muted()),
            ]);
            wrap_line(line, width, lines);
        }
    }
}

fn avatar_line(glyph: &'static str, color: ratatui::style::Color) -> Line<'static> {
    Line::from(Span::styled(glyph, Style::default().fg(color).add_modifier(Modifier::BOLD)))
}

/// Collapsed/expandable disclosure labeled with the source count.
///
/// Zero sources renders nothing at all.
fn render_sources(sources: &[String], expanded: bool, width: usize, lines: &mut Vec<Line<'static>>) {
    if sources.is_empty() {
        return;
    }

    let caret = if expanded { "▾" } else { "▸" };
    let label = Line::from(Span::styled(
        format!("{} View {} Sources", caret, sources.len()),
        Style::default().fg(Theme::CYAN),
    ));
    wrap_line(label, width, lines);

    if expanded {
        for source in sources {
            let line = Line::from(Span::styled(format!("  • {}", source), Theme::muted()));
            wrap_line(line, width, lines);
        }
    }
}

/// Wrap plain text at word boundaries with Unicode-aware widths
fn wrap_text(text: &str, style: Style, max_width: usize, lines: &mut Vec<Line<'static>>) {
    if max_width == 0 {
        return;
    }

    for source_line in text.lines() {
        if source_line.trim().is_empty() {
            lines.push(Line::default());
            continue;
        }

        let mut current = String::new();
        let mut current_width = 0;

        for word in source_line.split_whitespace() {
            let word_width = word.width();
            let space_width = if current.is_empty() { 0 } else { 1 };

            if current_width + space_width + word_width > max_width {
                if !current.is_empty() {
                    lines.push(Line::from(Span::styled(std::mem::take(&mut current), style)));
                    current_width = 0;
                }

                if word_width > max_width {
                    let mut chunk = String::new();
                    let mut chunk_width = 0;
                    for ch in word.chars() {
                        let ch_width = ch.width().unwrap_or(0);
                        if chunk_width + ch_width > max_width {
                            lines.push(Line::from(Span::styled(std::mem::take(&mut chunk), style)));
                            chunk_width = 0;
                        }
                        chunk.push(ch);
                        chunk_width += ch_width;
                    }
                    if !chunk.is_empty() {
                        lines.push(Line::from(Span::styled(chunk, style)));
                    }
                    continue;
                }
            }

            if !current.is_empty() {
                current.push(' ');
                current_width += 1;
            }
            current.push_str(word);
            current_width += word_width;
        }

        if !current.is_empty() {
            lines.push(Line::from(Span::styled(current, style)));
        }
    }
}

/// Wrap a styled line at word boundaries, splitting spans as needed.
///
/// Styles survive the split. Leading whitespace is kept on the first row
/// (code block indentation); continuation rows start at a word.
fn wrap_line(line: Line<'static>, max_width: usize, out: &mut Vec<Line<'static>>) {
    if max_width == 0 {
        return;
    }
    if line.width() <= max_width {
        out.push(line);
        return;
    }

    let mut current: Vec<Span<'static>> = Vec::new();
    let mut current_width = 0;
    let mut first_row = true;

    for span in line.spans {
        let style = span.style;
        for token in tokenize(&span.content) {
            let token_width = token.width();

            if token.chars().all(char::is_whitespace) {
                let keep = !current.is_empty() || first_row;
                if keep && current_width + token_width <= max_width {
                    current.push(Span::styled(token.to_string(), style));
                    current_width += token_width;
                }
                continue;
            }

            if current_width + token_width > max_width {
                if !current.is_empty() {
                    out.push(Line::from(std::mem::take(&mut current)));
                    current_width = 0;
                    first_row = false;
                }

                if token_width > max_width {
                    // A single oversized word breaks at cell boundaries
                    let mut chunk = String::new();
                    let mut chunk_width = 0;
                    for ch in token.chars() {
                        let ch_width = ch.width().unwrap_or(0);
                        if chunk_width + ch_width > max_width {
                            out.push(Line::from(Span::styled(std::mem::take(&mut chunk), style)));
                            chunk_width = 0;
                            first_row = false;
                        }
                        chunk.push(ch);
                        chunk_width += ch_width;
                    }
                    if !chunk.is_empty() {
                        current.push(Span::styled(chunk, style));
                        current_width = chunk_width;
                    }
                    continue;
                }
            }

            current.push(Span::styled(token.to_string(), style));
            current_width += token_width;
        }
    }

    if !current.is_empty() {
        out.push(Line::from(current));
    }
}

/// Split into alternating whitespace and word runs, lossless
fn tokenize(text: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut start = 0;
    let mut prev_ws: Option<bool> = None;

    for (i, c) in text.char_indices() {
        let ws = c.is_whitespace();
        if let Some(prev) = prev_ws
            && prev != ws
        {
            tokens.push(&text[start..i]);
            start = i;
        }
        prev_ws = Some(ws);
    }
    if start < text.len() {
        tokens.push(&text[start..]);
    }
    tokens
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transcript::entry::THINKING_LABEL;

    fn texts(lines: &[Line<'_>]) -> Vec<String> {
        lines.iter().map(|l| l.to_string()).collect()
    }

    #[test]
    fn test_user_message_has_avatar() {
        let mut lines = Vec::new();
        render_entry_lines(&TranscriptEntry::user_message("Hello"), 40, &mut lines);

        let texts = texts(&lines);
        assert_eq!(texts[0], USER_GLYPH);
        assert!(texts.contains(&"Hello".to_string()));
    }

    #[test]
    fn test_model_reply_renders_markdown() {
        let mut lines = Vec::new();
        let entry = TranscriptEntry::model_reply("Hi **there**", vec![]);
        render_entry_lines(&entry, 40, &mut lines);

        assert_eq!(lines[0].to_string(), MODEL_GLYPH);
        let body = &lines[1];
        assert_eq!(body.to_string(), "Hi there");
        let bold = body.spans.iter().find(|s| s.content == "there").unwrap();
        assert!(bold.style.add_modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn test_sources_disclosure_collapsed() {
        let mut lines = Vec::new();
        let entry = TranscriptEntry::model_reply("hi", vec!["doc1".to_string(), "doc2".to_string()]);
        render_entry_lines(&entry, 40, &mut lines);

        let texts = texts(&lines);
        assert!(texts.contains(&"▸ View 2 Sources".to_string()));
        assert!(!texts.iter().any(|t| t.contains("doc1")));
    }

    #[test]
    fn test_sources_disclosure_expanded_lists_each_source() {
        let mut lines = Vec::new();
        let entry = TranscriptEntry::ModelReply {
            body: "hi".to_string(),
            sources: vec!["doc1".to_string(), "doc2".to_string(), "doc3".to_string()],
            sources_expanded: true,
        };
        render_entry_lines(&entry, 40, &mut lines);

        let texts = texts(&lines);
        assert!(texts.contains(&"▾ View 3 Sources".to_string()));
        assert!(texts.contains(&"  • doc1".to_string()));
        assert!(texts.contains(&"  • doc2".to_string()));
        assert!(texts.contains(&"  • doc3".to_string()));
    }

    #[test]
    fn test_no_disclosure_without_sources() {
        let mut lines = Vec::new();
        render_entry_lines(&TranscriptEntry::model_reply("hi", vec![]), 40, &mut lines);
        assert!(!texts(&lines).iter().any(|t| t.contains("Sources")));
    }

    #[test]
    fn test_pending_renders_thinking_label() {
        let mut lines = Vec::new();
        render_entry_lines(&TranscriptEntry::pending(), 40, &mut lines);

        let texts = texts(&lines);
        assert_eq!(texts[0], MODEL_GLYPH);
        assert!(texts.contains(&THINKING_LABEL.to_string()));
    }

    #[test]
    fn test_error_message_styled_red() {
        let mut lines = Vec::new();
        render_entry_lines(&TranscriptEntry::error_message("Upload failed."), 40, &mut lines);

        let body = &lines[1];
        assert_eq!(body.to_string(), "Upload failed.");
        assert_eq!(body.spans[0].style.fg, Some(Theme::RED));
    }

    #[test]
    fn test_wrap_text_long_line() {
        let mut lines = Vec::new();
        wrap_text("This is a long line that should wrap", Theme::base(), 20, &mut lines);
        assert!(lines.len() > 1);
    }

    #[test]
    fn test_wrap_text_long_word_is_broken() {
        let mut lines = Vec::new();
        wrap_text("supercalifragilisticexpialidocious", Theme::base(), 10, &mut lines);
        assert!(lines.len() > 1);
    }

    #[test]
    fn test_wrap_text_zero_width() {
        let mut lines = Vec::new();
        wrap_text("Hello", Theme::base(), 0, &mut lines);
        assert!(lines.is_empty());
    }

    #[test]
    fn test_wrap_line_preserves_span_styles() {
        let line = Line::from(vec![
            Span::styled("aaaa bbbb ".to_string(), Theme::base()),
            Span::styled("cccc dddd".to_string(), Style::default().add_modifier(Modifier::BOLD)),
        ]);
        let mut out = Vec::new();
        wrap_line(line, 12, &mut out);

        assert!(out.len() >= 2);
        assert!(out.iter().all(|l| l.width() <= 12));
        let bold: Vec<_> = out
            .iter()
            .flat_map(|l| l.spans.iter())
            .filter(|s| s.style.add_modifier.contains(Modifier::BOLD))
            .collect();
        assert!(bold.iter().any(|s| s.content.contains("cccc")));
        assert!(bold.iter().any(|s| s.content.contains("dddd")));
    }

    #[test]
    fn test_wrap_line_short_line_untouched() {
        let mut out = Vec::new();
        wrap_line(Line::from("short"), 40, &mut out);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].to_string(), "short");
    }

    #[test]
    fn test_model_reply_lines_fit_render_width() {
        let mut lines = Vec::new();
        let body = "one two three four five six seven eight nine ten eleven twelve";
        let entry = TranscriptEntry::model_reply(body, vec!["a/very/long/path/to/some/document.pdf".to_string()]);
        render_entry_lines(&entry, 20, &mut lines);

        assert!(lines.len() > 2);
        assert!(lines.iter().all(|l| l.width() <= 20), "every row fits the content width");
    }

    #[test]
    fn test_follow_bottom_shows_newest_entry_after_wrapped_reply() {
        let mut view = TranscriptView::new();
        view.push(TranscriptEntry::model_reply("alpha ".repeat(60), vec![]));
        view.push(TranscriptEntry::model_reply("BOTTOM", vec![]));

        let backend = ratatui::backend::TestBackend::new(40, 12);
        let mut terminal = ratatui::Terminal::new(backend).unwrap();
        terminal
            .draw(|frame| TranscriptRenderer::new(&mut view).render(frame, frame.area()))
            .unwrap();

        let buffer = terminal.backend().buffer();
        let mut screen = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                screen.push_str(buffer.cell((x, y)).unwrap().symbol());
            }
            screen.push('\n');
        }

        assert!(screen.contains("BOTTOM"), "newest entry must be visible when following the bottom:\n{}", screen);
    }

    #[test]
    fn test_scroll_down_reaches_wrapped_bottom() {
        let mut view = TranscriptView::new();
        view.push(TranscriptEntry::model_reply("alpha ".repeat(60), vec![]));
        view.push(TranscriptEntry::model_reply("BOTTOM", vec![]));
        view.scroll_up(3);

        let lines = render_transcript_lines(&view, 36);
        let total = lines.len();
        for _ in 0..total {
            view.scroll_down(1);
        }
        let offset = view.resolve_scroll(total, 10);
        assert_eq!(offset, total - 10, "scrolling down re-reaches the true bottom");
    }

    #[test]
    fn test_transcript_lines_separate_entries() {
        let mut view = TranscriptView::new();
        view.push(TranscriptEntry::user_message("one"));
        view.push(TranscriptEntry::model_reply("two", vec![]));

        let lines = render_transcript_lines(&view, 40);
        let texts = texts(&lines);
        assert!(texts.iter().any(|t| t.is_empty()));
        assert!(texts.contains(&"one".to_string()));
        assert!(texts.contains(&"two".to_string()));
    }
}
