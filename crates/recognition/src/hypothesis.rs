use crate::error::RecognizerError;
use serde::{Deserialize, Serialize};

/// One candidate transcription with the engine's confidence in it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecognitionAlternative {
    pub transcript: String,
    pub confidence: f32,
}

/// One recognizer result for a span of speech.
///
/// Alternatives are ordered best-first. Once `is_final` is true the engine
/// has committed to this hypothesis and will never retract it; non-final
/// hypotheses are revisable guesses for the still-open utterance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecognitionHypothesis {
    pub alternatives: Vec<RecognitionAlternative>,
    pub is_final: bool,
}

impl RecognitionHypothesis {
    pub fn new(alternatives: Vec<RecognitionAlternative>, is_final: bool) -> Self {
        Self {
            alternatives,
            is_final,
        }
    }

    /// Build a single-alternative hypothesis.
    pub fn from_text(transcript: impl Into<String>, confidence: f32, is_final: bool) -> Self {
        Self {
            alternatives: vec![RecognitionAlternative {
                transcript: transcript.into(),
                confidence,
            }],
            is_final,
        }
    }

    /// The best (first) alternative, if the engine produced any.
    pub fn best(&self) -> Option<&RecognitionAlternative> {
        self.alternatives.first()
    }
}

/// Chronological event stream delivered by a speech recognition capability.
///
/// Producers: recognizer capability implementations
/// Consumers: the recognition session's event pump
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum RecognizerEvent {
    /// The engine started listening.
    Started,
    /// A new interim or final hypothesis.
    Hypothesis(RecognitionHypothesis),
    /// The engine stopped listening (end of speech or explicit stop).
    Ended,
    /// The engine reported a runtime failure.
    Error(RecognizerError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_best_alternative_is_first() {
        let hypothesis = RecognitionHypothesis::new(
            vec![
                RecognitionAlternative {
                    transcript: "the cat".to_string(),
                    confidence: 0.92,
                },
                RecognitionAlternative {
                    transcript: "the cap".to_string(),
                    confidence: 0.41,
                },
            ],
            true,
        );

        assert_eq!(hypothesis.best().unwrap().transcript, "the cat");
    }

    #[test]
    fn test_best_of_empty_alternatives() {
        let hypothesis = RecognitionHypothesis::new(Vec::new(), false);
        assert!(hypothesis.best().is_none());
    }

    #[test]
    fn test_event_round_trips_as_json() {
        let event = RecognizerEvent::Hypothesis(RecognitionHypothesis::from_text(
            "hello there",
            0.8,
            false,
        ));

        let json = serde_json::to_string(&event).unwrap();
        let back: RecognizerEvent = serde_json::from_str(&json).unwrap();
        match back {
            RecognizerEvent::Hypothesis(h) => {
                assert!(!h.is_final);
                assert_eq!(h.best().unwrap().transcript, "hello there");
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }
}
