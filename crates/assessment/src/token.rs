//! Token counting for scoring prompts.
//!
//! Each model is resolved to the BPE encoding it was trained with and text
//! is counted with that encoding via `tiktoken-rs`, so budgets are in the
//! same tokens the provider bills and limits on.

use pillarwise_core::{Error, Result};
use std::sync::Arc;
use tiktoken_rs::CoreBPE;
use tiktoken_rs::tokenizer::{Tokenizer, get_tokenizer};

/// Anything that can price a piece of text in tokens.
pub trait TokenEstimator: Send + Sync {
    /// Token count for `text`. Must be deterministic.
    fn estimate(&self, text: &str) -> usize;
}

/// BPE encodings the estimator can load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    /// GPT-4o, GPT-4.1, o-series
    O200kBase,
    /// GPT-4, GPT-3.5-turbo, text-embedding-3
    Cl100kBase,
    /// Legacy davinci/codex models
    P50kBase,
    /// GPT-3 base models
    R50kBase,
}

impl Encoding {
    pub fn name(&self) -> &'static str {
        match self {
            Encoding::O200kBase => "o200k_base",
            Encoding::Cl100kBase => "cl100k_base",
            Encoding::P50kBase => "p50k_base",
            Encoding::R50kBase => "r50k_base",
        }
    }

    fn from_tokenizer(tokenizer: Tokenizer) -> Option<Self> {
        match tokenizer {
            Tokenizer::O200kBase => Some(Encoding::O200kBase),
            Tokenizer::Cl100kBase => Some(Encoding::Cl100kBase),
            Tokenizer::P50kBase => Some(Encoding::P50kBase),
            Tokenizer::R50kBase => Some(Encoding::R50kBase),
            _ => None,
        }
    }

    fn load(&self) -> Result<CoreBPE> {
        let bpe = match self {
            Encoding::O200kBase => tiktoken_rs::o200k_base(),
            Encoding::Cl100kBase => tiktoken_rs::cl100k_base(),
            Encoding::P50kBase => tiktoken_rs::p50k_base(),
            Encoding::R50kBase => tiktoken_rs::r50k_base(),
        };
        bpe.map_err(|e| Error::config(format!("failed to load {} encoding: {e}", self.name())))
    }
}

/// Resolve the encoding for a model identifier.
///
/// A provider prefix (`openai/gpt-4`) is ignored. Unknown models are a
/// configuration error: scoring cannot be budgeted without an encoding.
pub fn encoding_for_model(model: &str) -> Result<Encoding> {
    let bare = model.trim().rsplit('/').next().unwrap_or_default();

    get_tokenizer(bare)
        .and_then(Encoding::from_tokenizer)
        .ok_or_else(|| {
            Error::config(format!(
                "no token estimator available for model '{model}'"
            ))
        })
}

/// Counts tokens with a loaded BPE encoding.
#[derive(Clone)]
pub struct BpeEstimator {
    encoding: Encoding,
    bpe: Arc<CoreBPE>,
}

impl std::fmt::Debug for BpeEstimator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BpeEstimator")
            .field("encoding", &self.encoding)
            .finish()
    }
}

impl BpeEstimator {
    /// Load the ranks for `encoding`.
    pub fn new(encoding: Encoding) -> Result<Self> {
        Ok(Self {
            encoding,
            bpe: Arc::new(encoding.load()?),
        })
    }

    pub fn encoding(&self) -> Encoding {
        self.encoding
    }
}

impl TokenEstimator for BpeEstimator {
    fn estimate(&self, text: &str) -> usize {
        if text.is_empty() {
            return 0;
        }
        self.bpe.encode_with_special_tokens(text).len()
    }
}

/// Build the estimator for a model identifier.
pub fn estimator_for_model(model: &str) -> Result<BpeEstimator> {
    let encoding = encoding_for_model(model)?;
    tracing::debug!(model, encoding = encoding.name(), "Resolved token estimator");
    BpeEstimator::new(encoding)
}
