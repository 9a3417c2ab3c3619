//! Recognition session lifecycle.
//!
//! Owns the speech recognition capability, pumps its event channel through
//! the transcript reducer, and exposes the listening status the UI renders.

mod recognizer;
mod session;

pub use recognizer::{
    RecognizerProvider, ScriptedProvider, ScriptedRecognizer, SpeechRecognizer,
    UnsupportedProvider,
};
pub use session::RecognitionSession;
