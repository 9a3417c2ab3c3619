//! Storybook domain model.
//!
//! A storybook is an ordered set of short sentences a child reads aloud, one
//! page at a time. Pages supply the target specifications the transcript
//! reducer shapes spoken words against, and the per-word quiz targets.

use chrono::{DateTime, Utc};
use readalong_recognition::TargetSpec;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Mutex;
use uuid::Uuid;

/// Repository trait for storybook persistence.
/// Implemented by storage layer, allowing domain to remain decoupled.
pub trait StorybookRepository: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static;

    fn save(&self, book: &Storybook) -> Result<(), Self::Error>;
    fn get(&self, id: &Uuid) -> Result<Storybook, Self::Error>;
    fn list(&self) -> Result<Vec<Storybook>, Self::Error>;
    fn delete(&self, id: &Uuid) -> Result<(), Self::Error>;
}

/// One page: a single sentence the child reads or writes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoryPage {
    pub index: usize,
    pub sentence: String,
}

impl StoryPage {
    /// The page sentence as a reduction target.
    pub fn target(&self) -> TargetSpec {
        TargetSpec::new(self.sentence.as_str())
    }

    /// Per-word quiz targets: sentence tokens stripped of punctuation.
    pub fn words(&self) -> Vec<String> {
        self.sentence
            .split_whitespace()
            .map(|token| {
                token
                    .chars()
                    .filter(|c| c.is_ascii_alphabetic() || *c == '\'')
                    .collect::<String>()
            })
            .filter(|w| !w.is_empty())
            .collect()
    }

    pub fn word_count(&self) -> usize {
        self.sentence.split_whitespace().count()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Storybook {
    pub id: Uuid,
    pub title: String,
    pub pages: Vec<StoryPage>,
    pub created_at: DateTime<Utc>,
}

impl Storybook {
    pub fn new(title: impl Into<String>, sentences: Vec<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            pages: sentences
                .into_iter()
                .enumerate()
                .map(|(index, sentence)| StoryPage { index, sentence })
                .collect(),
            created_at: Utc::now(),
        }
    }

    /// The bundled Isaac Newton story: six sentences of five to seven simple
    /// words each, readable by a five-to-seven year old.
    pub fn builtin() -> Self {
        Self::new(
            "Isaac Newton and the Apple",
            [
                "Isaac sat under a big apple tree.",
                "A red apple fell on his head.",
                "Isaac wondered why apples always fall down.",
                "He thought hard about the falling apple.",
                "Isaac discovered a force called gravity.",
                "Gravity pulls everything down to the ground.",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
        )
    }

    pub fn page(&self, index: usize) -> Option<&StoryPage> {
        self.pages.get(index)
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StoryError {
    #[error("storybook not found: {0}")]
    NotFound(Uuid),
}

/// In-memory storybook store. Session-scoped; nothing is persisted to disk.
#[derive(Default)]
pub struct MemoryStoryStore {
    books: Mutex<HashMap<Uuid, Storybook>>,
}

impl MemoryStoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StorybookRepository for MemoryStoryStore {
    type Error = StoryError;

    fn save(&self, book: &Storybook) -> Result<(), StoryError> {
        self.books.lock().unwrap().insert(book.id, book.clone());
        Ok(())
    }

    fn get(&self, id: &Uuid) -> Result<Storybook, StoryError> {
        self.books
            .lock()
            .unwrap()
            .get(id)
            .cloned()
            .ok_or(StoryError::NotFound(*id))
    }

    fn list(&self) -> Result<Vec<Storybook>, StoryError> {
        let mut books: Vec<Storybook> = self.books.lock().unwrap().values().cloned().collect();
        books.sort_by_key(|b| b.created_at);
        Ok(books)
    }

    fn delete(&self, id: &Uuid) -> Result<(), StoryError> {
        self.books
            .lock()
            .unwrap()
            .remove(id)
            .map(|_| ())
            .ok_or(StoryError::NotFound(*id))
    }
}
