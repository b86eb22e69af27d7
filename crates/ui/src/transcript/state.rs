use uuid::Uuid;

use super::entry::TranscriptEntry;

/// Scrollable view over the conversation's display messages.
///
/// Unlike the session transcript this is a UI projection: the pending
/// placeholder can be removed, and nothing here is ever sent to the backend.
/// Appending snaps the view to the bottom so the newest message is visible;
/// scrolling up detaches, scrolling back past the end re-attaches.
#[derive(Debug, Clone, Default)]
pub struct TranscriptView {
    entries: Vec<TranscriptEntry>,
    scroll_offset: usize,
    follow_bottom: bool,
}

impl TranscriptView {
    pub fn new() -> Self {
        Self { entries: Vec::new(), scroll_offset: 0, follow_bottom: true }
    }

    pub fn entries(&self) -> &[TranscriptEntry] {
        &self.entries
    }

    /// Append an entry and snap scroll to the bottom
    pub fn push(&mut self, entry: TranscriptEntry) {
        self.entries.push(entry);
        self.scroll_to_bottom();
    }

    /// Append a pending placeholder and return its id for later removal
    pub fn push_pending(&mut self) -> Uuid {
        let entry = TranscriptEntry::pending();
        let id = match entry {
            TranscriptEntry::Pending { id, .. } => id,
            _ => unreachable!(),
        };
        self.push(entry);
        id
    }

    /// Remove exactly the placeholder with the given id, wherever it sits.
    ///
    /// Overlapping exchanges resolve in arrival order, so the placeholder is
    /// not necessarily the last entry.
    pub fn remove_pending(&mut self, id: Uuid) -> bool {
        let before = self.entries.len();
        self.entries
            .retain(|e| !matches!(e, TranscriptEntry::Pending { id: pid, .. } if *pid == id));
        self.entries.len() != before
    }

    /// Flip the sources disclosure on the most recent entry that has sources
    pub fn toggle_last_sources(&mut self) -> bool {
        for entry in self.entries.iter_mut().rev() {
            if let TranscriptEntry::ModelReply { sources, sources_expanded, .. } = entry
                && !sources.is_empty()
            {
                *sources_expanded = !*sources_expanded;
                return true;
            }
        }
        false
    }

    pub fn scroll_up(&mut self, lines: usize) {
        self.follow_bottom = false;
        self.scroll_offset = self.scroll_offset.saturating_sub(lines);
    }

    pub fn scroll_down(&mut self, lines: usize) {
        self.scroll_offset = self.scroll_offset.saturating_add(lines);
    }

    pub fn scroll_to_bottom(&mut self) {
        self.follow_bottom = true;
    }

    /// Resolve the effective scroll offset for a rendered height.
    ///
    /// Re-attaches follow-bottom when the user has scrolled to (or past)
    /// the end.
    pub fn resolve_scroll(&mut self, total_lines: usize, viewport_height: usize) -> usize {
        let max_offset = total_lines.saturating_sub(viewport_height);
        if self.follow_bottom {
            self.scroll_offset = max_offset;
        } else if self.scroll_offset >= max_offset {
            self.scroll_offset = max_offset;
            self.follow_bottom = true;
        }
        self.scroll_offset
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn user_message_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| matches!(e, TranscriptEntry::UserMessage { .. }))
            .count()
    }

    pub fn pending_count(&self) -> usize {
        self.entries.iter().filter(|e| e.is_pending()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_and_order() {
        let mut view = TranscriptView::new();
        view.push(TranscriptEntry::user_message("first"));
        view.push(TranscriptEntry::model_reply("second", vec![]));

        assert_eq!(view.len(), 2);
        assert!(matches!(&view.entries()[0], TranscriptEntry::UserMessage { body } if body == "first"));
    }

    #[test]
    fn test_remove_pending_by_id() {
        let mut view = TranscriptView::new();
        view.push(TranscriptEntry::user_message("hello"));
        let id = view.push_pending();
        assert_eq!(view.pending_count(), 1);

        assert!(view.remove_pending(id));
        assert_eq!(view.pending_count(), 0);
        assert_eq!(view.len(), 1);

        // Second removal is a no-op
        assert!(!view.remove_pending(id));
    }

    #[test]
    fn test_remove_pending_only_matching_id() {
        let mut view = TranscriptView::new();
        let first = view.push_pending();
        let second = view.push_pending();

        assert!(view.remove_pending(first));
        assert_eq!(view.pending_count(), 1);
        assert!(matches!(&view.entries()[0], TranscriptEntry::Pending { id, .. } if *id == second));
    }

    #[test]
    fn test_toggle_last_sources() {
        let mut view = TranscriptView::new();
        view.push(TranscriptEntry::model_reply("no sources", vec![]));
        assert!(!view.toggle_last_sources());

        view.push(TranscriptEntry::model_reply("with sources", vec!["doc1".to_string()]));
        assert!(view.toggle_last_sources());
        assert!(matches!(
            view.entries().last(),
            Some(TranscriptEntry::ModelReply { sources_expanded: true, .. })
        ));

        assert!(view.toggle_last_sources());
        assert!(matches!(
            view.entries().last(),
            Some(TranscriptEntry::ModelReply { sources_expanded: false, .. })
        ));
    }

    #[test]
    fn test_follow_bottom_scroll() {
        let mut view = TranscriptView::new();
        view.push(TranscriptEntry::user_message("x"));

        // Following: offset pinned to the end
        assert_eq!(view.resolve_scroll(100, 20), 80);

        // Scrolling up detaches
        view.scroll_up(10);
        assert_eq!(view.resolve_scroll(100, 20), 70);

        // Scrolling down past the end re-attaches
        view.scroll_down(50);
        assert_eq!(view.resolve_scroll(100, 20), 80);
        assert_eq!(view.resolve_scroll(120, 20), 100);
    }

    #[test]
    fn test_push_snaps_to_bottom() {
        let mut view = TranscriptView::new();
        view.push(TranscriptEntry::user_message("x"));
        view.scroll_up(5);
        view.push(TranscriptEntry::model_reply("y", vec![]));
        assert_eq!(view.resolve_scroll(50, 10), 40);
    }

    #[test]
    fn test_resolve_scroll_small_content() {
        let mut view = TranscriptView::new();
        assert_eq!(view.resolve_scroll(5, 20), 0);
    }
}
