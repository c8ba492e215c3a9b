use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;

use crate::model::{QuizOutcome, percentage};

/// Leaderboard capacity.
pub const MAX_HIGH_SCORES: usize = 5;

/// One leaderboard row. Field names match the persisted JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HighScoreEntry {
    pub score: u32,
    pub total: u32,
    pub percentage: u8,
    pub date: NaiveDate,
    pub time_taken: u64,
}

impl HighScoreEntry {
    #[must_use]
    pub fn new(score: u32, total: u32, date: NaiveDate, time_taken: u64) -> Self {
        Self {
            score,
            total,
            percentage: percentage(score, total),
            date,
            time_taken,
        }
    }

    #[must_use]
    pub fn from_outcome(outcome: &QuizOutcome, date: NaiveDate) -> Self {
        Self {
            score: outcome.score(),
            total: outcome.total(),
            percentage: outcome.percentage(),
            date,
            time_taken: outcome.time_taken_secs(),
        }
    }

    fn rank_key(&self) -> (Reverse<u8>, u64) {
        (Reverse(self.percentage), self.time_taken)
    }
}

/// Result of merging one entry into the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Insertion {
    /// Matched or beat the best entry that existed before the merge.
    pub is_new_high_score: bool,
    /// Zero-based position of the new entry, `None` if it was cut.
    pub rank: Option<usize>,
}

/// Best [`MAX_HIGH_SCORES`] attempts, highest percentage first, faster first on ties.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<HighScoreEntry>", into = "Vec<HighScoreEntry>")]
pub struct HighScoreBoard {
    entries: Vec<HighScoreEntry>,
}

impl From<Vec<HighScoreEntry>> for HighScoreBoard {
    fn from(entries: Vec<HighScoreEntry>) -> Self {
        Self::from_entries(entries)
    }
}

impl From<HighScoreBoard> for Vec<HighScoreEntry> {
    fn from(board: HighScoreBoard) -> Self {
        board.entries
    }
}

impl HighScoreBoard {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a board from stored rows, restoring order and the size cap.
    #[must_use]
    pub fn from_entries(mut entries: Vec<HighScoreEntry>) -> Self {
        entries.sort_by_key(HighScoreEntry::rank_key);
        entries.truncate(MAX_HIGH_SCORES);
        Self { entries }
    }

    #[must_use]
    pub fn entries(&self) -> &[HighScoreEntry] {
        &self.entries
    }

    #[must_use]
    pub fn best(&self) -> Option<&HighScoreEntry> {
        self.entries.first()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether `percentage` would match or beat the current best.
    #[must_use]
    pub fn is_new_high_score(&self, percentage: u8) -> bool {
        self.best().is_none_or(|best| percentage >= best.percentage)
    }

    /// Append, re-sort, and keep the top entries.
    ///
    /// Ties on both keys keep the older entry ahead.
    pub fn insert(&mut self, entry: HighScoreEntry) -> Insertion {
        let is_new_high_score = self.is_new_high_score(entry.percentage);

        // stable sort: the new entry lands after every existing equal key
        let key = entry.rank_key();
        let rank = self.entries.partition_point(|e| e.rank_key() <= key);
        self.entries.insert(rank, entry);
        self.entries.truncate(MAX_HIGH_SCORES);

        Insertion {
            is_new_high_score,
            rank: (rank < MAX_HIGH_SCORES).then_some(rank),
        }
    }
}
