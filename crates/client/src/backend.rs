use reqwest::Client as HttpClient;
use reqwest::multipart;

use crate::types::{ChatRequest, ChatReply, UploadReply};
use parley_core::{Error, Result, Turn};

/// Client seam to the chat backend.
///
/// One implementation talks HTTP ([`HttpBackend`]); tests script exchanges
/// through [`crate::MockBackend`] instead of a live server.
#[async_trait::async_trait]
pub trait Backend: Send + Sync {
    /// Send the current user message plus the replayed conversation history.
    async fn chat(&self, message: &str, history: &[Turn]) -> Result<ChatReply>;

    /// Upload a file as multipart form data (field name `file`).
    async fn upload(&self, filename: &str, bytes: Vec<u8>) -> Result<UploadReply>;
}

/// HTTP backend speaking the `/chat` + `/upload` JSON protocol.
///
/// Deliberately carries no timeout and no retry: a failed exchange is
/// terminal and the user simply sends again. A hung request hangs.
pub struct HttpBackend {
    client: HttpClient,
    base_url: String,
}

impl HttpBackend {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self { client: HttpClient::new(), base_url: base_url.trim_end_matches('/').to_string() }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait::async_trait]
impl Backend for HttpBackend {
    async fn chat(&self, message: &str, history: &[Turn]) -> Result<ChatReply> {
        let url = format!("{}/chat", self.base_url);
        let request = ChatRequest::new(message, history);
        tracing::debug!(url = %url, history_len = history.len(), "sending chat request");

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::Backend(format!("chat request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Backend(format!("chat request failed: {} - {}", status, body)));
        }

        // A 2xx with a non-JSON body counts as a failed exchange too.
        response
            .json::<ChatReply>()
            .await
            .map_err(|e| Error::Parse(format!("malformed chat response: {}", e)))
    }

    async fn upload(&self, filename: &str, bytes: Vec<u8>) -> Result<UploadReply> {
        let url = format!("{}/upload", self.base_url);
        tracing::debug!(url = %url, filename = %filename, size = bytes.len(), "uploading file");

        let part = multipart::Part::bytes(bytes)
            .file_name(filename.to_string())
            .mime_str("application/octet-stream")
            .map_err(|e| Error::Other(format!("invalid upload part: {}", e)))?;
        let form = multipart::Form::new().part("file", part);

        let response = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| Error::Backend(format!("upload request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Backend(format!("upload request failed: {} - {}", status, body)));
        }

        response
            .json::<UploadReply>()
            .await
            .map_err(|e| Error::Parse(format!("malformed upload response: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_backend_strips_trailing_slash() {
        let backend = HttpBackend::new("http://localhost:8000/");
        assert_eq!(backend.base_url(), "http://localhost:8000");

        let backend = HttpBackend::new("http://localhost:8000");
        assert_eq!(backend.base_url(), "http://localhost:8000");
    }

    #[tokio::test]
    async fn test_chat_against_unreachable_host_is_backend_error() {
        // Port 1 on localhost refuses connections in any sane environment.
        let backend = HttpBackend::new("http://127.0.0.1:1");
        let err = backend.chat("Hello", &[]).await.unwrap_err();
        assert!(err.to_string().contains("chat request failed"));
    }

    #[tokio::test]
    async fn test_upload_against_unreachable_host_is_backend_error() {
        let backend = HttpBackend::new("http://127.0.0.1:1");
        let err = backend.upload("report.pdf", b"content".to_vec()).await.unwrap_err();
        assert!(err.to_string().contains("upload request failed"));
    }
}
