//! Headless demo driver for the reading tutor core.
//!
//! Replays a recognizer event script against a storybook page (read mode) or
//! a single page word (quiz mode) and prints the live transcript as it
//! evolves, followed by the final result.

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use readalong_recognition::{RecognitionHypothesis, RecognizerEvent};
use readalong_scoring::{classify, Closeness};
use readalong_session::{RecognitionSession, ScriptedProvider};
use readalong_story::Storybook;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Mode {
    /// Read a whole page sentence aloud.
    Read,
    /// Answer a single-word quiz.
    Quiz,
}

#[derive(Parser)]
#[command(name = "readalong", about = "Replay recognizer events against a story page")]
struct Args {
    #[arg(long, value_enum, default_value_t = Mode::Read)]
    mode: Mode,

    /// Storybook page index.
    #[arg(long, default_value_t = 0)]
    page: usize,

    /// Word index within the page (quiz mode).
    #[arg(long, default_value_t = 0)]
    word: usize,

    /// Recognizer event script: one JSON event per line. Defaults to a
    /// script derived from the target itself.
    #[arg(long)]
    script: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,readalong=debug")),
        )
        .init();

    let args = Args::parse();
    tracing::info!(mode = ?args.mode, page = args.page, "starting readalong demo");

    let book = Storybook::builtin();
    let page = book
        .page(args.page)
        .with_context(|| format!("no page {} in '{}'", args.page, book.title))?;

    let (target_text, quiz_word) = match args.mode {
        Mode::Read => (page.sentence.clone(), None),
        Mode::Quiz => {
            let words = page.words();
            let word = words
                .get(args.word)
                .with_context(|| format!("no word {} on page {}", args.word, args.page))?
                .clone();
            (word.clone(), Some(word))
        }
    };

    let script = match &args.script {
        Some(path) => load_script(path)?,
        None => demo_script(&target_text),
    };

    println!("book:   {}", book.title);
    println!("target: {target_text}");

    let mut session = RecognitionSession::new(Arc::new(ScriptedProvider::new(script)));
    // Quiz mode keeps the target unset so the fallback window preserves the
    // stray words the classifier is built to tolerate.
    if args.mode == Mode::Read {
        session.set_target(Some(target_text.as_str().into()));
    }
    session.start_listening();
    if let Some(error) = session.error() {
        bail!("could not start listening: {error}");
    }

    while session.pump_one() {
        if !session.transcript().is_empty() {
            println!("live:   {}", session.transcript());
        }
    }

    let Some(result) = session.stop_listening() else {
        bail!("no recognition attempt was active");
    };
    println!("final:  {}", result.text);

    if let Some(word) = quiz_word {
        let verdict = classify(&result.text, &word);
        println!(
            "verdict: {}",
            match verdict {
                Closeness::Exact => "exact! next word",
                Closeness::Close => "close, try once more",
                Closeness::Wrong => "wrong, listen and repeat",
            }
        );
    }

    Ok(())
}

/// Parse a script file of one JSON `RecognizerEvent` per line.
fn load_script(path: &Path) -> Result<Vec<RecognizerEvent>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading script {}", path.display()))?;
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| serde_json::from_str(line).with_context(|| format!("bad event: {line}")))
        .collect()
}

/// Simulate a recognizer hearing the target: interim prefixes growing word by
/// word, then one final hypothesis, all in the sloppy lowercase shape real
/// engines produce.
fn demo_script(target: &str) -> Vec<RecognizerEvent> {
    let words: Vec<String> = target
        .split_whitespace()
        .map(|w| {
            w.to_lowercase()
                .chars()
                .filter(|c| c.is_ascii_lowercase() || *c == '\'')
                .collect()
        })
        .collect();

    let mut script: Vec<RecognizerEvent> = (1..words.len())
        .map(|i| {
            RecognizerEvent::Hypothesis(RecognitionHypothesis::from_text(
                words[..i].join(" "),
                0.4,
                false,
            ))
        })
        .collect();
    script.push(RecognizerEvent::Hypothesis(RecognitionHypothesis::from_text(
        words.join(" "),
        0.92,
        true,
    )));
    script
}
