use serde::{Deserialize, Serialize};

/// The sentence or single word a recognition attempt is graded against.
///
/// Immutable once built. Tokens keep their original capitalization and
/// attached punctuation; the reducer mirrors both onto spoken words.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TargetSpec(String);

impl TargetSpec {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whitespace-split tokens, empty tokens dropped.
    pub fn tokens(&self) -> Vec<&str> {
        self.0.split_whitespace().collect()
    }

    /// Number of word tokens in the target.
    pub fn word_count(&self) -> usize {
        self.0.split_whitespace().count()
    }
}

impl From<&str> for TargetSpec {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl From<String> for TargetSpec {
    fn from(text: String) -> Self {
        Self(text)
    }
}

impl std::fmt::Display for TargetSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
