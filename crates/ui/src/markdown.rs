//! Pure Markdown-to-lines transform.
//!
//! Walks pulldown-cmark events and produces styled ratatui lines, so the
//! transform can be unit-tested without a terminal. Covers paragraphs,
//! emphasis, inline code, code blocks, lists, links, headings, and rules;
//! anything else degrades to plain text.

use pulldown_cmark::{Event, Options, Parser, Tag, TagEnd};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};

use crate::theme::Theme;

/// Convert Markdown source into renderable lines
pub fn render_markdown(text: &str) -> Vec<Line<'static>> {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_STRIKETHROUGH);

    let mut writer = LineWriter::default();
    for event in Parser::new_ext(text, options) {
        writer.handle(event);
    }
    writer.finish()
}

#[derive(Default)]
struct LineWriter {
    lines: Vec<Line<'static>>,
    spans: Vec<Span<'static>>,
    styles: Vec<Style>,
    /// Item counter per open list level; None for unordered lists
    list_stack: Vec<Option<u64>>,
    in_code_block: bool,
    link_dest: Option<String>,
}

impl LineWriter {
    fn handle(&mut self, event: Event<'_>) {
        match event {
            Event::Start(Tag::Paragraph) => self.begin_block(),
            Event::End(TagEnd::Paragraph) => self.flush_line(),

            Event::Start(Tag::Heading { level, .. }) => {
                self.begin_block();
                let marker = "#".repeat(level as usize);
                self.spans.push(Span::styled(format!("{} ", marker), Theme::muted()));
                self.styles
                    .push(Style::default().fg(Theme::BLUE).add_modifier(Modifier::BOLD));
            }
            Event::End(TagEnd::Heading(_)) => {
                self.styles.pop();
                self.flush_line();
            }

            Event::Start(Tag::CodeBlock(_)) => {
                self.begin_block();
                self.in_code_block = true;
            }
            Event::End(TagEnd::CodeBlock) => {
                self.flush_line();
                self.in_code_block = false;
            }

            Event::Start(Tag::List(start)) => {
                if self.list_stack.is_empty() {
                    self.begin_block();
                } else {
                    // A nested list ends the parent item's text line
                    self.flush_line();
                }
                self.list_stack.push(start);
            }
            Event::End(TagEnd::List(_)) => {
                self.list_stack.pop();
            }
            Event::Start(Tag::Item) => {
                let depth = self.list_stack.len().saturating_sub(1);
                let indent = "  ".repeat(depth);
                let marker = match self.list_stack.last_mut() {
                    Some(Some(n)) => {
                        let marker = format!("{}{}. ", indent, n);
                        *n += 1;
                        marker
                    }
                    _ => format!("{}• ", indent),
                };
                self.spans.push(Span::styled(marker, Theme::muted()));
            }
            Event::End(TagEnd::Item) => self.flush_line(),

            Event::Start(Tag::Emphasis) => self.push_modifier(Modifier::ITALIC),
            Event::End(TagEnd::Emphasis) => {
                self.styles.pop();
            }
            Event::Start(Tag::Strong) => self.push_modifier(Modifier::BOLD),
            Event::End(TagEnd::Strong) => {
                self.styles.pop();
            }
            Event::Start(Tag::Strikethrough) => self.push_modifier(Modifier::CROSSED_OUT),
            Event::End(TagEnd::Strikethrough) => {
                self.styles.pop();
            }

            Event::Start(Tag::Link { dest_url, .. }) => {
                self.link_dest = Some(dest_url.to_string());
                self.styles
                    .push(Style::default().fg(Theme::BLUE).add_modifier(Modifier::UNDERLINED));
            }
            Event::End(TagEnd::Link) => {
                self.styles.pop();
                if let Some(url) = self.link_dest.take() {
                    self.spans.push(Span::styled(format!(" ({})", url), Theme::muted()));
                }
            }

            Event::Text(text) => {
                if self.in_code_block {
                    self.append_code_lines(&text);
                } else {
                    self.spans.push(Span::styled(text.into_string(), self.current_style()));
                }
            }
            Event::Code(code) => {
                self.spans.push(Span::styled(code.into_string(), Theme::code()));
            }

            Event::SoftBreak => self.spans.push(Span::raw(" ")),
            Event::HardBreak => self.flush_line(),
            Event::Rule => {
                self.begin_block();
                self.lines.push(Line::from(Span::styled("─".repeat(24), Theme::muted())));
            }

            // Tables, footnotes, html blocks etc. degrade to their text events
            _ => {}
        }
    }

    fn finish(mut self) -> Vec<Line<'static>> {
        self.flush_line();
        self.lines
    }

    fn current_style(&self) -> Style {
        self.styles.iter().fold(Theme::base(), |acc, s| acc.patch(*s))
    }

    fn push_modifier(&mut self, modifier: Modifier) {
        self.styles.push(Style::default().add_modifier(modifier));
    }

    /// Flush pending inline spans; separate blocks with one blank line
    fn begin_block(&mut self) {
        self.flush_line();
        if !self.lines.is_empty() {
            self.lines.push(Line::default());
        }
    }

    fn flush_line(&mut self) {
        if !self.spans.is_empty() {
            self.lines.push(Line::from(std::mem::take(&mut self.spans)));
        }
    }

    /// Code block text arrives in chunks that may span several lines
    fn append_code_lines(&mut self, text: &str) {
        for (i, line) in text.lines().enumerate() {
            if i > 0 {
                self.flush_line();
            }
            self.spans.push(Span::styled(line.to_string(), Theme::code()));
        }
        if text.ends_with('\n') {
            self.flush_line();
        }
    }
}
