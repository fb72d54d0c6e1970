//! The ordered pillar → answer map.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Consolidated answers keyed by pillar name.
///
/// Iteration order is insertion order, which during a session is pillar
/// order. Chunks produced for scoring are `AnswerMap`s too.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnswerMap(IndexMap<String, String>);

impl AnswerMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace an answer. Replacing keeps the original position.
    pub fn insert(&mut self, pillar: impl Into<String>, answer: impl Into<String>) {
        self.0.insert(pillar.into(), answer.into());
    }

    pub fn get(&self, pillar: &str) -> Option<&str> {
        self.0.get(pillar).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Pillar names in insertion order.
    pub fn pillars(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Render as `pillar: answer` lines joined by newlines.
    pub fn to_lines(&self) -> String {
        self.iter()
            .map(|(pillar, answer)| format!("{pillar}: {answer}"))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for AnswerMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}
