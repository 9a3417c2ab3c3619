//! Reduction of a hypothesis stream to a target-shaped transcript.

use crate::format::format_words_to_match;
use crate::hypothesis::RecognitionHypothesis;
use crate::target::TargetSpec;
use serde::{Deserialize, Serialize};

/// Display window when no target is set.
pub const DEFAULT_WINDOW: usize = 6;

/// Confidence reported on a finalized transcript.
///
/// Engines report wildly inconsistent per-alternative confidences, so the
/// reduced result carries a fixed value instead of aggregating them.
pub const FINAL_CONFIDENCE: f32 = 0.9;

/// The externally visible result of a reduction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReducedTranscript {
    pub text: String,
    pub confidence: f32,
    pub is_final: bool,
}

/// Folds a stream of recognition hypotheses into a live transcript shaped
/// like the target sentence.
///
/// Finalized words are append-only and never revised. Interim words are
/// replaced wholesale by every non-final hypothesis and dropped once the
/// utterance closes with a final one; they never reach the finalized result.
#[derive(Debug, Default)]
pub struct TranscriptReducer {
    finalized: Vec<String>,
    interim: Vec<String>,
    target: Option<TargetSpec>,
    display: String,
}

impl TranscriptReducer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_target(target: TargetSpec) -> Self {
        Self {
            target: Some(target),
            ..Self::default()
        }
    }

    /// Current target, if any.
    pub fn target(&self) -> Option<&TargetSpec> {
        self.target.as_ref()
    }

    /// Replace the target. Takes effect on the next computation; a change
    /// mid-session re-derives the display window from the new target.
    pub fn set_target(&mut self, target: Option<TargetSpec>) {
        self.target = target;
        self.display = self.build_display();
    }

    /// Fold one hypothesis into the session state.
    ///
    /// Total over all inputs; malformed or empty text collapses to zero
    /// tokens. Only the best alternative is ever consulted.
    pub fn ingest(&mut self, hypothesis: &RecognitionHypothesis) {
        let tokens = hypothesis
            .best()
            .map(|alt| {
                alt.transcript
                    .split_whitespace()
                    .map(str::to_string)
                    .collect::<Vec<_>>()
            })
            .unwrap_or_default();

        if hypothesis.is_final {
            self.finalized.extend(tokens);
            // The utterance closed; its interim guesses are superseded.
            self.interim.clear();
        } else {
            self.interim = tokens;
        }

        self.display = self.build_display();

        tracing::debug!(
            finalized = self.finalized.len(),
            interim = self.interim.len(),
            is_final = hypothesis.is_final,
            "hypothesis_ingested"
        );
    }

    /// The live transcript for display, recomputed on every ingest.
    pub fn live_transcript(&self) -> &str {
        &self.display
    }

    /// Produce the authoritative transcript from finalized words only.
    ///
    /// Interim words present at this moment are intentionally excluded; only
    /// committed recognizer output counts towards the graded answer.
    pub fn finalize(&mut self) -> ReducedTranscript {
        let window = self.window();
        let start = self.finalized.len().saturating_sub(window);
        let text = self.shape(&self.finalized[start..]);

        tracing::debug!(window, text = %text, "transcript_finalized");

        ReducedTranscript {
            text,
            confidence: FINAL_CONFIDENCE,
            is_final: true,
        }
    }

    /// Clear finalized words, interim words, and the live transcript.
    /// The target is untouched.
    pub fn reset(&mut self) {
        self.finalized.clear();
        self.interim.clear();
        self.display.clear();
    }

    fn window(&self) -> usize {
        match &self.target {
            Some(target) => target.word_count(),
            None => DEFAULT_WINDOW,
        }
    }

    /// Format the last-window words of a candidate sequence to the shape of
    /// the target, joined with single spaces.
    fn shape<S: AsRef<str>>(&self, words: &[S]) -> String {
        match &self.target {
            Some(target) => format_words_to_match(words, &target.tokens()).join(" "),
            None => words
                .iter()
                .map(AsRef::as_ref)
                .collect::<Vec<_>>()
                .join(" "),
        }
    }

    fn build_display(&self) -> String {
        let combined: Vec<&String> = self.finalized.iter().chain(self.interim.iter()).collect();
        let start = combined.len().saturating_sub(self.window());
        self.shape(&combined[start..])
    }
}
