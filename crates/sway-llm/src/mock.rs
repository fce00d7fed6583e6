//! Mock chat provider for testing
//!
//! Returns a scripted sequence of replies and records every request it sees,
//! so scenario tests can assert call order and prompt contents without any
//! network access.

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Instant;

use crate::provider::{ChatError, ChatProvider, ChatRequest, ChatResponse};

/// A mock chat provider with canned replies
#[derive(Debug)]
pub struct MockProvider {
    /// Name of this mock
    pub name: String,
    /// Scripted replies, consumed in order (cycles when exhausted)
    replies: Vec<String>,
    /// Next reply index
    index: AtomicUsize,
    /// Every request received, in order
    requests: Mutex<Vec<ChatRequest>>,
    /// Return an empty reply on this 1-based call number
    empty_at: Option<usize>,
}

impl MockProvider {
    /// Create a mock that plays back the given replies in order. An empty
    /// script always replies with empty content.
    pub fn scripted(replies: Vec<&str>) -> Self {
        Self {
            name: "mock".to_string(),
            replies: replies.into_iter().map(String::from).collect(),
            index: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
            empty_at: None,
        }
    }

    /// Create a mock that always returns the same reply
    pub fn constant(reply: &str) -> Self {
        Self::scripted(vec![reply])
    }

    /// Return an empty reply on the given 1-based call number
    pub fn with_empty_reply_at(mut self, call: usize) -> Self {
        self.empty_at = Some(call);
        self
    }

    /// Number of completions served so far
    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    /// Snapshot of every request received, in order
    pub fn requests(&self) -> Vec<ChatRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChatProvider for MockProvider {
    fn name(&self) -> &str {
        &self.name
    }

    async fn is_available(&self) -> bool {
        true
    }

    async fn complete(&self, request: ChatRequest) -> Result<ChatResponse, ChatError> {
        let start = Instant::now();

        let call = {
            let mut requests = self.requests.lock().unwrap();
            requests.push(request.clone());
            requests.len()
        };

        let content = if Some(call) == self.empty_at || self.replies.is_empty() {
            String::new()
        } else {
            let idx = self.index.fetch_add(1, Ordering::Relaxed);
            self.replies[idx % self.replies.len()].clone()
        };

        Ok(ChatResponse {
            content,
            model: request.model,
            tokens_used: None,
            latency_ms: start.elapsed().as_millis() as u64,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::ChatMessage;

    #[tokio::test]
    async fn test_scripted_replies_in_order() {
        let mock = MockProvider::scripted(vec!["first", "second"]);

        let r1 = mock
            .complete(ChatRequest::new("m", vec![ChatMessage::user("a")]))
            .await
            .unwrap();
        let r2 = mock
            .complete(ChatRequest::new("m", vec![ChatMessage::user("b")]))
            .await
            .unwrap();

        assert_eq!(r1.content, "first");
        assert_eq!(r2.content, "second");
        assert_eq!(mock.call_count(), 2);
    }

    #[tokio::test]
    async fn test_empty_reply_at_call() {
        let mock = MockProvider::constant("ok").with_empty_reply_at(2);

        let r1 = mock
            .complete(ChatRequest::new("m", vec![ChatMessage::user("a")]))
            .await
            .unwrap();
        let r2 = mock
            .complete(ChatRequest::new("m", vec![ChatMessage::user("b")]))
            .await
            .unwrap();

        assert_eq!(r1.content, "ok");
        assert!(r2.content.is_empty());
    }

    #[tokio::test]
    async fn test_empty_script_replies_empty() {
        let mock = MockProvider::scripted(vec![]);

        let response = mock
            .complete(ChatRequest::new("m", vec![ChatMessage::user("a")]))
            .await
            .unwrap();

        assert!(response.content.is_empty());
        assert_eq!(mock.call_count(), 1);
    }

    #[tokio::test]
    async fn test_records_requests() {
        let mock = MockProvider::constant("ok");
        let _ = mock
            .complete(ChatRequest::new("m", vec![ChatMessage::user("hello")]))
            .await;

        let requests = mock.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].messages[0].content, "hello");
    }
}
