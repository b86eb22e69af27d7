use std::sync::{Arc, Mutex};

use crate::backend::Backend;
use crate::types::{ChatReply, UploadReply};
use parley_core::{Error, Result, Turn};

/// One scripted reply for the mock backend
#[derive(Debug, Clone)]
pub enum MockReply {
    Chat(ChatReply),
    Upload(UploadReply),
    Error(String),
}

/// A call the mock backend observed, recorded for assertions
#[derive(Debug, Clone)]
pub enum RecordedCall {
    Chat { message: String, history_len: usize },
    Upload { filename: String, size: usize },
}

/// Deterministic backend for tests: replies are consumed from a script in
/// order, every call is recorded.
#[derive(Clone, Default)]
pub struct MockBackend {
    script: Arc<Mutex<Vec<MockReply>>>,
    calls: Arc<Mutex<Vec<RecordedCall>>>,
}

impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a chat reply
    pub fn push_chat(&self, response: impl Into<String>, sources: Vec<&str>) {
        let sources = sources.into_iter().map(String::from).collect();
        self.push(MockReply::Chat(ChatReply::new(response, sources)));
    }

    /// Queue an upload reply
    pub fn push_upload(&self, status: impl Into<String>) {
        self.push(MockReply::Upload(UploadReply { filename: None, status: status.into() }));
    }

    /// Queue a failure
    pub fn push_error(&self, message: impl Into<String>) {
        self.push(MockReply::Error(message.into()));
    }

    fn push(&self, reply: MockReply) {
        self.script.lock().unwrap().push(reply);
    }

    fn next_reply(&self) -> MockReply {
        let mut script = self.script.lock().unwrap();
        if script.is_empty() {
            MockReply::Error("mock script exhausted".to_string())
        } else {
            script.remove(0)
        }
    }

    /// All calls observed so far
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait::async_trait]
impl Backend for MockBackend {
    async fn chat(&self, message: &str, history: &[Turn]) -> Result<ChatReply> {
        self.calls
            .lock()
            .unwrap()
            .push(RecordedCall::Chat { message: message.to_string(), history_len: history.len() });

        match self.next_reply() {
            MockReply::Chat(reply) => Ok(reply),
            MockReply::Upload(_) => Err(Error::Other("mock script: expected chat reply".to_string())),
            MockReply::Error(message) => Err(Error::Backend(message)),
        }
    }

    async fn upload(&self, filename: &str, bytes: Vec<u8>) -> Result<UploadReply> {
        self.calls
            .lock()
            .unwrap()
            .push(RecordedCall::Upload { filename: filename.to_string(), size: bytes.len() });

        match self.next_reply() {
            MockReply::Upload(reply) => Ok(reply),
            MockReply::Chat(_) => Err(Error::Other("mock script: expected upload reply".to_string())),
            MockReply::Error(message) => Err(Error::Backend(message)),
        }
    }
}
