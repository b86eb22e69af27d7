use uuid::Uuid;

/// Fixed body of the placeholder shown while an exchange is outstanding
pub const THINKING_LABEL: &str = "Thinking...";

/// Fixed fallback shown when a chat exchange fails for any reason
pub const CHAT_FALLBACK: &str = "Sorry, something went wrong. Is the backend running?";

/// Fixed fallback shown when an upload fails
pub const UPLOAD_FALLBACK: &str = "Upload failed.";

/// One message in the transcript view.
///
/// These are ephemeral UI projections: removable (the pending placeholder)
/// without ever affecting the session transcript that gets replayed to the
/// backend as context.
#[derive(Debug, Clone, PartialEq)]
pub enum TranscriptEntry {
    /// A message the user sent (or an upload announcement)
    UserMessage { body: String },
    /// A backend reply with optional source citations
    ModelReply { body: String, sources: Vec<String>, sources_expanded: bool },
    /// Transient placeholder, removed when its exchange resolves
    Pending { id: Uuid, label: String },
    /// Fixed fallback for a failed exchange
    ErrorMessage { body: String },
    /// Client-side status line (slash command feedback)
    Notice { body: String },
}

impl TranscriptEntry {
    pub fn user_message(body: impl Into<String>) -> Self {
        Self::UserMessage { body: body.into() }
    }

    pub fn model_reply(body: impl Into<String>, sources: Vec<String>) -> Self {
        Self::ModelReply { body: body.into(), sources, sources_expanded: false }
    }

    /// A fresh placeholder with the fixed "Thinking..." label
    pub fn pending() -> Self {
        Self::Pending { id: Uuid::new_v4(), label: THINKING_LABEL.to_string() }
    }

    pub fn error_message(body: impl Into<String>) -> Self {
        Self::ErrorMessage { body: body.into() }
    }

    pub fn notice(body: impl Into<String>) -> Self {
        Self::Notice { body: body.into() }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending { .. })
    }

    pub fn has_sources(&self) -> bool {
        matches!(self, Self::ModelReply { sources, .. } if !sources.is_empty())
    }
}
