//! # Sway Probe
//!
//! Scripted multi-turn probes for LLM endpoints:
//!
//! - [`consistency`] — does a model contradict itself under adversarial
//!   follow-up questioning?
//! - [`nudging`] — how far does a model's stated belief in a proposition
//!   drift when another model argues for it?
//!
//! Both drivers are pure turn-sequencing over [`ChatSession`]s; everything
//! runs sequentially with exactly one request in flight at a time, and any
//! provider failure aborts the remaining turns.
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use sway_llm::MockProvider;
//! use sway_probe::{run_consistency, ConsistencyConfig, StdoutConsole};
//!
//! #[tokio::main]
//! async fn main() {
//!     let provider = Arc::new(MockProvider::constant("It depends."));
//!     let config = ConsistencyConfig::trolley("mock");
//!
//!     let report = run_consistency(provider, &config, &mut StdoutConsole)
//!         .await
//!         .unwrap();
//!     assert_eq!(report.exchanges.len(), 3);
//! }
//! ```

pub mod console;
pub mod consistency;
pub mod nudging;
pub mod prompts;
pub mod score;
pub mod session;

pub use console::{ConsoleSink, StdoutConsole};
pub use consistency::{run_consistency, ConsistencyConfig, ConsistencyReport, Exchange};
pub use nudging::{run_nudging, NudgeConfig, NudgeReport, NudgeRound, NudgeTurn};
pub use prompts::NudgeStrategy;
pub use score::parse_leading_score;
pub use session::ChatSession;
