use std::sync::Arc;

use chrono::NaiveDate;

use quiz_core::model::{HighScoreBoard, HighScoreEntry, QuizOutcome};
use storage::keys;
use storage::repository::KeyValueStore;

use crate::kv::{load_or_default, save_json};

/// Board after a merge plus what the merge meant for this attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighScoreRecord {
    pub entry: HighScoreEntry,
    pub board: HighScoreBoard,
    pub is_new_high_score: bool,
    pub rank: Option<usize>,
    /// False when the write failed; `board` is then only in memory.
    pub persisted: bool,
}

/// Leaderboard kept in the key/value store.
#[derive(Clone)]
pub struct HighScoreService {
    store: Arc<dyn KeyValueStore>,
}

impl HighScoreService {
    #[must_use]
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Current board; empty if missing, corrupt or unreadable.
    pub async fn load(&self) -> HighScoreBoard {
        load_or_default(self.store.as_ref(), keys::HIGH_SCORES, HighScoreBoard::new).await
    }

    /// Merge one completed attempt into the board.
    ///
    /// Every call inserts; callers invoke it once per completed session.
    pub async fn record(&self, outcome: &QuizOutcome, date: NaiveDate) -> HighScoreRecord {
        let entry = HighScoreEntry::from_outcome(outcome, date);
        let mut board = self.load().await;
        let insertion = board.insert(entry.clone());

        let persisted = match save_json(self.store.as_ref(), keys::HIGH_SCORES, &board).await {
            Ok(()) => true,
            Err(err) => {
                tracing::warn!(error = %err, "could not persist high scores");
                false
            }
        };

        HighScoreRecord {
            entry,
            board,
            is_new_high_score: insertion.is_new_high_score,
            rank: insertion.rank,
            persisted,
        }
    }

    /// Drop the stored board.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the store cannot be written.
    pub async fn clear(&self) -> Result<(), storage::StorageError> {
        self.store.remove(keys::HIGH_SCORES).await
    }
}
