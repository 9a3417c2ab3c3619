use crate::recognizer::{RecognizerProvider, SpeechRecognizer};
use readalong_recognition::{
    RecognizerError, RecognizerEvent, ReducedTranscript, TargetSpec, TranscriptReducer,
};
use std::sync::Arc;
use tokio::sync::mpsc;

/// One user-facing recognition attempt.
///
/// Owns the recognizer capability and the reducer, and guarantees at most
/// one live recognition context: starting a new attempt aborts the previous
/// one first. All operations are synchronous and non-blocking; events are
/// drained from the channel with `pump`, never awaited.
pub struct RecognitionSession {
    provider: Arc<dyn RecognizerProvider>,
    reducer: TranscriptReducer,
    recognizer: Option<Box<dyn SpeechRecognizer>>,
    events: Option<mpsc::Receiver<RecognizerEvent>>,
    listening: bool,
    error: Option<String>,
}

impl RecognitionSession {
    pub fn new(provider: Arc<dyn RecognizerProvider>) -> Self {
        Self {
            provider,
            reducer: TranscriptReducer::new(),
            recognizer: None,
            events: None,
            listening: false,
            error: None,
        }
    }

    // --- Target ---

    /// Set or clear the target. Takes effect on the next computation, so a
    /// change mid-session immediately reshapes the live transcript.
    pub fn set_target(&mut self, target: Option<TargetSpec>) {
        self.reducer.set_target(target);
    }

    pub fn target(&self) -> Option<&TargetSpec> {
        self.reducer.target()
    }

    // --- Lifecycle ---

    /// Begin a recognition attempt.
    ///
    /// With no capability available this is a no-op that sets the error
    /// status. Any still-active recognizer is aborted first; engines allow
    /// only one concurrent recognition context.
    pub fn start_listening(&mut self) {
        if !self.provider.is_supported() {
            self.error = Some(RecognizerError::NotSupported.to_string());
            tracing::warn!("start_listening without a recognition capability");
            return;
        }

        self.abort();
        self.reducer.reset();
        self.error = None;

        match self.provider.create() {
            Ok((mut recognizer, events)) => {
                if let Err(e) = recognizer.start() {
                    self.error = Some(e.to_string());
                    return;
                }
                self.recognizer = Some(recognizer);
                self.events = Some(events);
                self.listening = true;
                tracing::debug!(target = ?self.reducer.target(), "listening_started");
            }
            Err(e) => {
                self.error = Some(e.to_string());
            }
        }
    }

    /// Apply one recognizer event to the session state.
    ///
    /// This is the dispatch-independent transition function; `pump` feeds it
    /// from the channel, tests call it directly.
    pub fn handle_event(&mut self, event: RecognizerEvent) {
        match event {
            RecognizerEvent::Started => {
                self.listening = true;
            }
            RecognizerEvent::Hypothesis(hypothesis) => {
                self.reducer.ingest(&hypothesis);
            }
            RecognizerEvent::Ended => {
                self.listening = false;
            }
            RecognizerEvent::Error(e) => {
                // An abort is the expected outcome of starting a new
                // attempt, not a failure to surface.
                if !e.is_aborted() {
                    tracing::warn!(error = %e, "recognizer_error");
                    self.error = Some(e.to_string());
                }
                self.listening = false;
            }
        }
    }

    /// Apply the next pending event, if any.
    pub fn pump_one(&mut self) -> bool {
        let Some(events) = self.events.as_mut() else {
            return false;
        };
        match events.try_recv() {
            Ok(event) => {
                self.handle_event(event);
                true
            }
            Err(_) => false,
        }
    }

    /// Drain all pending events.
    pub fn pump(&mut self) {
        while self.pump_one() {}
    }

    /// Stop listening and produce the authoritative transcript.
    ///
    /// Returns `None` when no attempt is active (a safe no-op). Interim
    /// words pending at this moment are excluded from the result.
    pub fn stop_listening(&mut self) -> Option<ReducedTranscript> {
        let mut recognizer = self.recognizer.take()?;
        self.pump();
        recognizer.stop();
        self.events = None;
        self.listening = false;

        let result = self.reducer.finalize();
        tracing::debug!(text = %result.text, "listening_stopped");
        Some(result)
    }

    /// Discard the active attempt without producing a transcript.
    pub fn abort(&mut self) {
        if let Some(mut recognizer) = self.recognizer.take() {
            recognizer.abort();
            self.events = None;
            self.listening = false;
            self.reducer.reset();
            tracing::debug!("attempt_aborted");
        }
    }

    /// Clear the transcript buffers; the target is untouched.
    pub fn reset_transcript(&mut self) {
        self.reducer.reset();
    }

    // --- Status ---

    /// Live transcript for display.
    pub fn transcript(&self) -> &str {
        self.reducer.live_transcript()
    }

    pub fn is_listening(&self) -> bool {
        self.listening
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recognizer::{ScriptedProvider, UnsupportedProvider};
    use readalong_recognition::RecognitionHypothesis;

    fn final_event(text: &str) -> RecognizerEvent {
        RecognizerEvent::Hypothesis(RecognitionHypothesis::from_text(text, 0.95, true))
    }

    fn interim_event(text: &str) -> RecognizerEvent {
        RecognizerEvent::Hypothesis(RecognitionHypothesis::from_text(text, 0.3, false))
    }

    fn scripted_session(script: Vec<RecognizerEvent>) -> RecognitionSession {
        RecognitionSession::new(Arc::new(ScriptedProvider::new(script)))
    }

    #[test]
    fn test_full_attempt_produces_shaped_transcript() {
        let mut session = scripted_session(vec![
            interim_event("the"),
            interim_event("the cat"),
            final_event("the cat sat"),
        ]);
        session.set_target(Some("The cat sat down.".into()));

        session.start_listening();
        assert!(session.is_listening());
        session.pump();
        assert_eq!(session.transcript(), "The cat sat");

        let result = session.stop_listening().unwrap();
        assert_eq!(result.text, "The cat sat");
        assert!(!session.is_listening());
    }

    #[test]
    fn test_interim_pending_at_stop_is_excluded() {
        let mut session = scripted_session(vec![
            final_event("the cat sat"),
            interim_event("on the mat"),
        ]);
        session.set_target(Some("The cat sat down.".into()));

        session.start_listening();
        let result = session.stop_listening().unwrap();
        assert_eq!(result.text, "The cat sat");
    }

    #[test]
    fn test_stop_without_start_is_none() {
        let mut session = scripted_session(Vec::new());
        assert!(session.stop_listening().is_none());
    }

    #[test]
    fn test_unsupported_capability_sets_error() {
        let mut session = RecognitionSession::new(Arc::new(UnsupportedProvider));
        session.start_listening();

        assert!(!session.is_listening());
        assert!(session.error().unwrap().contains("not supported"));
        assert!(session.stop_listening().is_none());
    }

    #[test]
    fn test_restart_aborts_previous_attempt() {
        let mut session = scripted_session(vec![final_event("old words here")]);
        session.set_target(Some("New words now.".into()));

        session.start_listening();
        session.pump();
        session.start_listening();
        session.pump();

        // The aborted attempt's words were discarded, and the abort error
        // from tearing it down was suppressed.
        assert!(session.error().is_none());
        let result = session.stop_listening().unwrap();
        assert_eq!(result.text, "Old words here.");
    }

    #[test]
    fn test_runtime_error_surfaces_and_stops_listening() {
        let mut session = scripted_session(vec![
            final_event("the cat"),
            RecognizerEvent::Error(RecognizerError::PermissionDenied),
        ]);

        session.start_listening();
        session.pump();

        assert!(!session.is_listening());
        assert!(session.error().unwrap().contains("permission denied"));
    }

    #[test]
    fn test_target_change_mid_session() {
        let mut session = scripted_session(vec![final_event("the cat sat down")]);
        session.set_target(Some("The cat sat down.".into()));

        session.start_listening();
        session.pump();

        session.set_target(Some("Sat down!".into()));
        assert_eq!(session.transcript(), "Sat down!");

        let result = session.stop_listening().unwrap();
        assert_eq!(result.text, "Sat down!");
    }

    #[test]
    fn test_reset_transcript_keeps_target() {
        let mut session = scripted_session(vec![final_event("hello there")]);
        session.set_target(Some("Hello there!".into()));

        session.start_listening();
        session.pump();
        session.reset_transcript();

        assert_eq!(session.transcript(), "");
        let result = session.stop_listening().unwrap();
        assert_eq!(result.text, "");
    }

    #[test]
    fn test_abort_produces_no_transcript() {
        let mut session = scripted_session(vec![final_event("the cat sat")]);
        session.set_target(Some("The cat sat.".into()));

        session.start_listening();
        session.pump();
        session.abort();

        assert!(!session.is_listening());
        assert_eq!(session.transcript(), "");
        assert!(session.stop_listening().is_none());
    }
}
