//! CLI command implementations

pub mod consistency;
pub mod nudge;
