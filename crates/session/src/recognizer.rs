//! Capability abstraction over a speech recognition engine.
//!
//! The session never talks to a concrete engine; it asks a provider whether
//! the capability exists and, if so, for a recognizer plus the channel its
//! events arrive on. This replaces probing ambient globals with a single
//! injected `is_supported()` query.

use readalong_recognition::{RecognizerError, RecognizerEvent};
use tokio::sync::mpsc;

/// Control surface of one recognition context.
///
/// Events flow through the channel handed out at creation, in chronological
/// order; final hypotheses are never retracted. Engines support at most one
/// concurrent context, which the session enforces by aborting the previous
/// recognizer before creating the next.
pub trait SpeechRecognizer: Send {
    /// Begin listening. The engine emits `Started` once live.
    fn start(&mut self) -> Result<(), RecognizerError>;

    /// Stop listening, letting the engine finalize pending hypotheses and
    /// emit `Ended`. Asynchronous on the engine side; not awaited.
    fn stop(&mut self);

    /// Tear the context down without finalizing. Engines report this as an
    /// `Aborted` error, which consumers treat as expected.
    fn abort(&mut self);
}

/// Factory for recognition contexts.
pub trait RecognizerProvider: Send + Sync {
    /// Whether the environment has a speech recognition capability at all.
    fn is_supported(&self) -> bool;

    /// Create a recognizer and the receiving end of its event channel.
    fn create(
        &self,
    ) -> Result<(Box<dyn SpeechRecognizer>, mpsc::Receiver<RecognizerEvent>), RecognizerError>;
}

/// Provider for environments without speech recognition.
pub struct UnsupportedProvider;

impl RecognizerProvider for UnsupportedProvider {
    fn is_supported(&self) -> bool {
        false
    }

    fn create(
        &self,
    ) -> Result<(Box<dyn SpeechRecognizer>, mpsc::Receiver<RecognizerEvent>), RecognizerError>
    {
        Err(RecognizerError::NotSupported)
    }
}

/// Provider that replays a fixed event script.
///
/// Used by session tests and the headless demo driver: every created
/// recognizer emits the configured events on `start()`, then `Ended` on
/// `stop()` or `Aborted` on `abort()`.
#[derive(Default, Clone)]
pub struct ScriptedProvider {
    script: Vec<RecognizerEvent>,
}

impl ScriptedProvider {
    pub fn new(script: Vec<RecognizerEvent>) -> Self {
        Self { script }
    }
}

impl RecognizerProvider for ScriptedProvider {
    fn is_supported(&self) -> bool {
        true
    }

    fn create(
        &self,
    ) -> Result<(Box<dyn SpeechRecognizer>, mpsc::Receiver<RecognizerEvent>), RecognizerError>
    {
        // Room for the script plus the lifecycle events around it.
        let (tx, rx) = mpsc::channel(self.script.len() + 4);
        Ok((
            Box::new(ScriptedRecognizer {
                script: self.script.clone(),
                tx,
                live: false,
            }),
            rx,
        ))
    }
}

/// Recognizer half of [`ScriptedProvider`].
pub struct ScriptedRecognizer {
    script: Vec<RecognizerEvent>,
    tx: mpsc::Sender<RecognizerEvent>,
    live: bool,
}

impl ScriptedRecognizer {
    fn emit(&self, event: RecognizerEvent) {
        if self.tx.try_send(event).is_err() {
            tracing::debug!("scripted recognizer channel closed or full");
        }
    }
}

impl SpeechRecognizer for ScriptedRecognizer {
    fn start(&mut self) -> Result<(), RecognizerError> {
        self.live = true;
        self.emit(RecognizerEvent::Started);
        for event in self.script.clone() {
            self.emit(event);
        }
        Ok(())
    }

    fn stop(&mut self) {
        if self.live {
            self.live = false;
            self.emit(RecognizerEvent::Ended);
        }
    }

    fn abort(&mut self) {
        if self.live {
            self.live = false;
            self.emit(RecognizerEvent::Error(RecognizerError::Aborted));
            self.emit(RecognizerEvent::Ended);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use readalong_recognition::RecognitionHypothesis;

    #[tokio::test]
    async fn test_scripted_recognizer_replays_events_in_order() {
        let provider = ScriptedProvider::new(vec![RecognizerEvent::Hypothesis(
            RecognitionHypothesis::from_text("the cat", 0.9, true),
        )]);

        let (mut recognizer, mut rx) = provider.create().unwrap();
        recognizer.start().unwrap();
        recognizer.stop();

        assert!(matches!(rx.recv().await, Some(RecognizerEvent::Started)));
        assert!(matches!(
            rx.recv().await,
            Some(RecognizerEvent::Hypothesis(_))
        ));
        assert!(matches!(rx.recv().await, Some(RecognizerEvent::Ended)));
    }

    #[test]
    fn test_abort_emits_aborted_error() {
        let provider = ScriptedProvider::new(Vec::new());
        let (mut recognizer, mut rx) = provider.create().unwrap();

        recognizer.start().unwrap();
        recognizer.abort();

        assert!(matches!(rx.try_recv(), Ok(RecognizerEvent::Started)));
        assert!(matches!(
            rx.try_recv(),
            Ok(RecognizerEvent::Error(RecognizerError::Aborted))
        ));
        assert!(matches!(rx.try_recv(), Ok(RecognizerEvent::Ended)));
    }

    #[test]
    fn test_unsupported_provider() {
        let provider = UnsupportedProvider;
        assert!(!provider.is_supported());
        assert!(matches!(
            provider.create().map(|_| ()),
            Err(RecognizerError::NotSupported)
        ));
    }
}
