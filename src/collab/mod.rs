//! Collaborators outside the loop: where puzzles come from and where answers go

mod aoc;

pub use aoc::{AOC_BASE_URL, AocClient, SESSION_ENV, classify_submission, extract_articles};

use std::fmt;

use async_trait::async_trait;
use log::info;

use crate::artifact::{ArtifactSlot, ArtifactStore};
use crate::domain::PuzzleCoordinate;
use crate::error::{Result, SolvrError};

/// Statement and personal input of one puzzle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PuzzleData {
    pub description: String,
    pub raw_input: String,
}

/// Anything that can produce a puzzle's description and input
#[async_trait]
pub trait PuzzleSource: Send + Sync {
    async fn fetch(&self, coordinate: &PuzzleCoordinate) -> Result<PuzzleData>;
}

/// Verdict on a submitted answer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Correct,
    Incorrect,
    RateLimited,
    /// Anything else, with the reply text
    Unexpected(String),
}

impl fmt::Display for SubmitOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubmitOutcome::Correct => write!(f, "correct"),
            SubmitOutcome::Incorrect => write!(f, "incorrect"),
            SubmitOutcome::RateLimited => write!(f, "rate limited, wait before trying again"),
            SubmitOutcome::Unexpected(text) => write!(f, "unexpected reply: {}", text),
        }
    }
}

/// Anything that can judge an answer
#[async_trait]
pub trait AnswerSubmitter: Send + Sync {
    async fn submit(&self, coordinate: &PuzzleCoordinate, answer: &str) -> Result<SubmitOutcome>;
}

/// Make sure Description and RawInput exist, fetching only when one is missing.
///
/// Returns true when a fetch happened.
pub async fn ensure_puzzle(store: &ArtifactStore, source: &dyn PuzzleSource, coordinate: &PuzzleCoordinate) -> Result<bool> {
    if store.slot_exists(coordinate, ArtifactSlot::Description) && store.slot_exists(coordinate, ArtifactSlot::RawInput) {
        info!("Puzzle {} already present, skipping fetch", coordinate);
        return Ok(false);
    }

    let data = source.fetch(coordinate).await?;
    store
        .write_slot(coordinate, ArtifactSlot::Description, &data.description)
        .await?;
    store
        .write_slot(coordinate, ArtifactSlot::RawInput, &data.raw_input)
        .await?;
    info!("Stored puzzle {} under {}", coordinate, store.dir(coordinate).display());
    Ok(true)
}

/// The answer the solve runner produced, trimmed
pub async fn read_answer(store: &ArtifactStore, coordinate: &PuzzleCoordinate) -> Result<String> {
    let path = store.resolve(coordinate, ArtifactSlot::Output);
    if !store.exists(&path) {
        return Err(SolvrError::Artifact(format!(
            "No answer found at {}; run solve first",
            path.display()
        )));
    }

    let answer = store.read(&path).await?.trim().to_string();
    if answer.is_empty() {
        return Err(SolvrError::Artifact(format!(
            "Answer at {} is empty; run solve first",
            path.display()
        )));
    }
    Ok(answer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tempfile::tempdir;

    struct CountingSource {
        fetches: AtomicUsize,
    }

    impl CountingSource {
        fn new() -> Self {
            Self {
                fetches: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl PuzzleSource for CountingSource {
        async fn fetch(&self, coordinate: &PuzzleCoordinate) -> Result<PuzzleData> {
            self.fetches.fetch_add(1, Ordering::SeqCst);
            Ok(PuzzleData {
                description: format!("<article>Day {}</article>", coordinate.day()),
                raw_input: "1\n2\n3\n".to_string(),
            })
        }
    }

    struct FailingSource;

    #[async_trait]
    impl PuzzleSource for FailingSource {
        async fn fetch(&self, _coordinate: &PuzzleCoordinate) -> Result<PuzzleData> {
            Err(SolvrError::Collaborator("offline".to_string()))
        }
    }

    fn coordinate() -> PuzzleCoordinate {
        PuzzleCoordinate::new(2024, 5, 1).unwrap()
    }

    #[tokio::test]
    async fn test_ensure_puzzle_fetches_once() {
        let temp = tempdir().unwrap();
        let store = ArtifactStore::new(temp.path(), "js");
        let source = CountingSource::new();

        assert!(ensure_puzzle(&store, &source, &coordinate()).await.unwrap());
        assert!(!ensure_puzzle(&store, &source, &coordinate()).await.unwrap());

        assert_eq!(source.fetches.load(Ordering::SeqCst), 1);
        let description = store.read_slot(&coordinate(), ArtifactSlot::Description).await.unwrap();
        assert_eq!(description, "<article>Day 5</article>");
        let input = store.read_slot(&coordinate(), ArtifactSlot::RawInput).await.unwrap();
        assert_eq!(input, "1\n2\n3\n");
    }

    #[tokio::test]
    async fn test_ensure_puzzle_refetches_when_input_missing() {
        let temp = tempdir().unwrap();
        let store = ArtifactStore::new(temp.path(), "js");
        store
            .write_slot(&coordinate(), ArtifactSlot::Description, "old")
            .await
            .unwrap();
        let source = CountingSource::new();

        assert!(ensure_puzzle(&store, &source, &coordinate()).await.unwrap());
        assert_eq!(source.fetches.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_ensure_puzzle_propagates_fetch_error() {
        let temp = tempdir().unwrap();
        let store = ArtifactStore::new(temp.path(), "js");

        let err = ensure_puzzle(&store, &FailingSource, &coordinate()).await.unwrap_err();

        assert!(matches!(err, SolvrError::Collaborator(_)));
        assert!(!store.slot_exists(&coordinate(), ArtifactSlot::Description));
    }

    #[tokio::test]
    async fn test_read_answer_trims() {
        let temp = tempdir().unwrap();
        let store = ArtifactStore::new(temp.path(), "js");
        store
            .write_slot(&coordinate(), ArtifactSlot::Output, "  1234\n")
            .await
            .unwrap();

        assert_eq!(read_answer(&store, &coordinate()).await.unwrap(), "1234");
    }

    #[tokio::test]
    async fn test_read_answer_missing_or_empty() {
        let temp = tempdir().unwrap();
        let store = ArtifactStore::new(temp.path(), "js");

        let err = read_answer(&store, &coordinate()).await.unwrap_err();
        assert!(err.to_string().contains("run solve first"));

        store
            .write_slot(&coordinate(), ArtifactSlot::Output, "\n")
            .await
            .unwrap();
        assert!(read_answer(&store, &coordinate()).await.is_err());
    }

    #[test]
    fn test_submit_outcome_display() {
        assert_eq!(SubmitOutcome::Correct.to_string(), "correct");
        assert_eq!(
            SubmitOutcome::Unexpected("huh".to_string()).to_string(),
            "unexpected reply: huh"
        );
    }
}
