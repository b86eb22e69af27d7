pub mod backend;
pub mod health;
pub mod mock;
pub mod types;

pub use backend::{Backend, HttpBackend};
pub use health::{HealthReport, check_health};
pub use mock::{MockBackend, MockReply, RecordedCall};
pub use types::{ChatReply, ChatRequest, UploadReply};

pub use parley_core::{Error, Result};

#[cfg(test)]
mod tests {
    use super::*;
    use parley_core::Turn;

    #[test]
    fn test_chat_request_serialization() {
        let request = ChatRequest::new("Hello", &[Turn::user("earlier")]);
        let json = serde_json::to_string(&request).unwrap();
        assert!(json.contains("\"message\":\"Hello\""));
        assert!(json.contains("\"history\""));
        assert!(json.contains("\"role\":\"user\""));
    }

    #[test]
    fn test_chat_request_empty_history() {
        let request = ChatRequest::new("Hello", &[]);
        let json = serde_json::to_string(&request).unwrap();
        assert!(json.contains("\"history\":[]"));
    }

    #[test]
    fn test_chat_reply_deserialization() {
        let reply: ChatReply =
            serde_json::from_str(r#"{"response":"Hi","sources":["a","b"]}"#).unwrap();
        assert_eq!(reply.response, "Hi");
        assert_eq!(reply.sources.len(), 2);
    }
}
