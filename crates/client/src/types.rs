use parley_core::Turn;
use serde::{Deserialize, Serialize};

/// Request body for `POST /chat`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    /// Full ordered conversation context (a transcript snapshot)
    #[serde(default)]
    pub history: Vec<Turn>,
}

impl ChatRequest {
    pub fn new(message: impl Into<String>, history: &[Turn]) -> Self {
        Self { message: message.into(), history: history.to_vec() }
    }
}

/// Response body from `POST /chat`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatReply {
    pub response: String,
    /// Cited source documents; absent on the wire means none
    #[serde(default)]
    pub sources: Vec<String>,
}

impl ChatReply {
    pub fn new(response: impl Into<String>, sources: Vec<String>) -> Self {
        Self { response: response.into(), sources }
    }

    pub fn has_sources(&self) -> bool {
        !self.sources.is_empty()
    }
}

/// Response body from `POST /upload`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadReply {
    #[serde(default)]
    pub filename: Option<String>,
    /// Server-provided status line, displayed verbatim
    pub status: String,
}
