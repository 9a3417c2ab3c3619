use serde::{Deserialize, Serialize};

/// Errors reported by a speech recognition capability.
///
/// These are session-local status conditions, not process failures. The
/// session surfaces them through its `error` field for the UI to render.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, Serialize, Deserialize)]
#[serde(tag = "kind", content = "detail", rename_all = "kebab-case")]
pub enum RecognizerError {
    #[error("speech recognition is not supported in this environment")]
    NotSupported,
    #[error("microphone permission denied")]
    PermissionDenied,
    #[error("recognizer network failure")]
    Network,
    #[error("no speech detected")]
    NoSpeech,
    #[error("recognition aborted")]
    Aborted,
    #[error("recognizer error: {0}")]
    Engine(String),
}

impl RecognizerError {
    /// True for the error an engine emits after an intentional `abort()`.
    ///
    /// Aborts are an expected outcome of starting a new attempt, so the
    /// session suppresses them instead of surfacing an error status.
    pub fn is_aborted(&self) -> bool {
        matches!(self, RecognizerError::Aborted)
    }
}
