//! # Sway LLM
//!
//! Chat-completion provider abstraction for the Sway probes.
//!
//! ## Supported Backends
//!
//! | Provider | Type | Key Required |
//! |----------|------|--------------|
//! | OpenRouter | API | `OPENROUTER_API_KEY` |
//! | Mock | Testing | None |
//!
//! ## Quick Start
//!
//! ```rust
//! use sway_llm::{ChatMessage, ChatProvider, ChatRequest, MockProvider};
//!
//! #[tokio::main]
//! async fn main() {
//!     let llm = MockProvider::constant("Hello!");
//!
//!     let request = ChatRequest::new("mock", vec![ChatMessage::user("Hi")]);
//!     let response = llm.complete(request).await.unwrap();
//!     println!("{}", response.content);
//! }
//! ```
//!
//! ## With OpenRouter
//!
//! ```rust,ignore
//! use sway_llm::{LlmConfig, OpenRouterProvider};
//!
//! let config = LlmConfig::from_env()?;
//! let llm = OpenRouterProvider::from_config(&config);
//! ```

pub mod config;
pub mod mock;
pub mod openrouter;
pub mod provider;

pub use config::{ConfigError, LlmConfig, DEFAULT_BASE_URL};
pub use mock::MockProvider;
pub use openrouter::OpenRouterProvider;
pub use provider::{ChatError, ChatMessage, ChatProvider, ChatRequest, ChatResponse, Role};
