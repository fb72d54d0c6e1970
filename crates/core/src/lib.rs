//! # Pillarwise Core
//!
//! Domain types, traits, and error definitions for the Pillarwise startup
//! readiness assessment. This crate has **no I/O of its own**: it defines the
//! domain model that the provider, assessment, and CLI crates build on.
//!
//! ## Contents
//!
//! - The fixed list of 19 readiness pillars
//! - The ordered answer map collected during a session
//! - The `Provider` trait every LLM backend implements
//! - The shared error hierarchy

pub mod answers;
pub mod error;
pub mod message;
pub mod pillar;
pub mod provider;

// Re-export key types at crate root for ergonomics
pub use answers::AnswerMap;
pub use error::{Error, ExportError, ProviderError, Result, StateError};
pub use message::{Message, Role};
pub use pillar::{PILLARS, PILLAR_COUNT};
pub use provider::{Provider, ProviderRequest, ProviderResponse, Usage};
