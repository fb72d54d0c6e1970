//! LLM Provider implementations for Pillarwise.
//!
//! All providers implement the `pillarwise_core::Provider` trait.
//! `build_from_config` selects and constructs the configured backend.

pub mod openai_compat;
pub mod router;

pub use openai_compat::OpenAiCompatProvider;
pub use router::build_from_config;
