//! Conversational session over one model identity
//!
//! A session owns its transcript exclusively. Every `submit` replays the full
//! history; nothing is ever edited, truncated, or dropped, so the context on
//! turn N is the complete record of turns 1..N-1.

use std::sync::Arc;

use sway_llm::{ChatError, ChatMessage, ChatProvider, ChatRequest};

/// One scripted conversation with a single model
#[derive(Debug)]
pub struct ChatSession {
    /// Model identifier sent on every request
    model: String,
    /// Append-only message history
    transcript: Vec<ChatMessage>,
    /// Remote completion capability
    provider: Arc<dyn ChatProvider>,
}

impl ChatSession {
    /// Create a session with an empty transcript
    pub fn new(provider: Arc<dyn ChatProvider>, model: &str) -> Self {
        Self {
            model: model.to_string(),
            transcript: Vec::new(),
            provider,
        }
    }

    /// Create a session seeded with a leading system instruction
    pub fn with_system(provider: Arc<dyn ChatProvider>, model: &str, system: &str) -> Self {
        let mut session = Self::new(provider, model);
        session.transcript.push(ChatMessage::system(system));
        session
    }

    /// Model identifier this session speaks as
    pub fn model(&self) -> &str {
        &self.model
    }

    /// The transcript so far
    pub fn transcript(&self) -> &[ChatMessage] {
        &self.transcript
    }

    /// Append a user message, complete against the full transcript, append
    /// and return the assistant reply.
    ///
    /// Fails with [`ChatError::EmptyReply`] when the endpoint returns no
    /// textual content; the user message stays on the transcript in that
    /// case, the way an unanswered question would.
    pub async fn submit(&mut self, text: &str) -> Result<String, ChatError> {
        self.transcript.push(ChatMessage::user(text));

        let request = ChatRequest::new(&self.model, self.transcript.clone());
        let response = self.provider.complete(request).await?;

        if response.content.is_empty() {
            return Err(ChatError::EmptyReply {
                model: self.model.clone(),
                prompt: text.to_string(),
            });
        }

        tracing::debug!(
            model = %self.model,
            turns = self.transcript.len(),
            latency_ms = response.latency_ms,
            "completion received"
        );

        self.transcript.push(ChatMessage::assistant(&response.content));
        Ok(response.content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sway_llm::{MockProvider, Role};

    #[tokio::test]
    async fn test_transcript_grows_by_two_per_submit() {
        let provider = Arc::new(MockProvider::constant("reply"));
        let mut session = ChatSession::new(provider, "mock");

        for n in 1..=3 {
            session.submit("question").await.unwrap();
            assert_eq!(session.transcript().len(), 2 * n);
        }
    }

    #[tokio::test]
    async fn test_system_seed_counts_once() {
        let provider = Arc::new(MockProvider::constant("reply"));
        let mut session = ChatSession::with_system(provider, "mock", "be terse");

        assert_eq!(session.transcript().len(), 1);
        session.submit("question").await.unwrap();
        assert_eq!(session.transcript().len(), 3);
        assert_eq!(session.transcript()[0].role, Role::System);
    }

    #[tokio::test]
    async fn test_append_only_prefix_stable() {
        let provider = Arc::new(MockProvider::scripted(vec!["one", "two"]));
        let mut session = ChatSession::new(provider, "mock");

        session.submit("first").await.unwrap();
        let before: Vec<_> = session.transcript().to_vec();

        session.submit("second").await.unwrap();
        assert_eq!(&session.transcript()[..before.len()], &before[..]);
    }

    #[tokio::test]
    async fn test_full_history_replayed() {
        let provider = Arc::new(MockProvider::scripted(vec!["one", "two"]));
        let mut session = ChatSession::new(provider.clone(), "mock");

        session.submit("first").await.unwrap();
        session.submit("second").await.unwrap();

        let requests = provider.requests();
        assert_eq!(requests[0].messages.len(), 1);
        assert_eq!(requests[1].messages.len(), 3);
        assert_eq!(requests[1].messages[0].content, "first");
        assert_eq!(requests[1].messages[1].content, "one");
        assert_eq!(requests[1].messages[2].content, "second");
    }

    #[tokio::test]
    async fn test_empty_reply_is_fatal() {
        let provider = Arc::new(MockProvider::constant("ok").with_empty_reply_at(1));
        let mut session = ChatSession::new(provider, "mock");

        let err = session.submit("question").await.unwrap_err();
        assert!(matches!(err, ChatError::EmptyReply { .. }));
    }
}
