//! Live speech-transcript reduction for the reading tutor.
//!
//! This crate turns the raw hypothesis stream of a speech recognizer into a
//! stable, target-shaped transcript:
//! - Hypothesis and event types shared with the capability layer
//! - `TranscriptReducer`: accumulates finalized words, folds in interim words
//! - Target-mirroring word formatting (casing and attached punctuation)

mod error;
mod format;
mod hypothesis;
mod reducer;
mod target;

pub use error::RecognizerError;
pub use format::format_words_to_match;
pub use hypothesis::{RecognitionAlternative, RecognitionHypothesis, RecognizerEvent};
pub use reducer::{ReducedTranscript, TranscriptReducer, DEFAULT_WINDOW, FINAL_CONFIDENCE};
pub use target::TargetSpec;
