use serde::{Deserialize, Serialize};

/// The role of a conversation turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Model,
}

/// One role-attributed utterance in the conversation log.
///
/// Immutable once created. The wire shape matches what the backend expects
/// as replayed history: `{"role":"user","parts":["..."]}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub role: Role,
    pub parts: Vec<String>,
}

impl Turn {
    pub fn user(text: impl Into<String>) -> Self {
        Self { role: Role::User, parts: vec![text.into()] }
    }

    pub fn model(text: impl Into<String>) -> Self {
        Self { role: Role::Model, parts: vec![text.into()] }
    }

    /// Full text of the turn (parts joined)
    pub fn text(&self) -> String {
        self.parts.join("")
    }
}

/// Append-only, ordered log of conversation turns for the active session.
///
/// Scoped to the process lifetime and unbounded: no eviction, no dedup, no
/// reordering. Ordering is chronological and semantically required, since the
/// whole log is replayed to the backend as conversation context.
///
/// Policy: a completed exchange appends exactly two turns (user, then model)
/// and only after a successful response. A failed exchange appends nothing,
/// so the failed message stays visible on screen but never enters future
/// context and a retry re-sends cleanly.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Transcript {
    turns: Vec<Turn>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a turn to the end of the log
    pub fn append(&mut self, turn: Turn) {
        self.turns.push(turn);
    }

    /// Record one successful exchange: user turn, then model turn
    pub fn record_exchange(&mut self, user_text: impl Into<String>, model_text: impl Into<String>) {
        self.append(Turn::user(user_text));
        self.append(Turn::model(model_text));
    }

    /// The full ordered sequence, for transmission as request context
    pub fn snapshot(&self) -> &[Turn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }
}
