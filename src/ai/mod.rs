//! Budget assistant module
//!
//! Wraps the hosted generation endpoint behind the [`Assistant`] trait.

pub mod client;
pub mod prompt;

pub use client::{AskFailure, AskOutcome, Assistant, GeminiClient};
pub use prompt::build_prompt;
