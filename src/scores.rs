//! Match history records
//!
//! One record per finished match, or per abandoned match with a nonzero score.
//! Records are append-only; the review screen shows the most recent ones.

use serde::{Deserialize, Serialize};

/// A single finished (or abandoned) match
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub player1: String,
    pub player2: String,
    pub score1: u32,
    pub score2: u32,
    pub winner: String,
    pub loser: String,
    /// Session clock reading (ms) when the record was written
    pub date: u64,
}

impl MatchRecord {
    /// Build a record; player 1 wins only with a strictly higher score
    pub fn new(player1: &str, player2: &str, score1: u32, score2: u32, date: u64) -> Self {
        let (winner, loser) = if score1 > score2 {
            (player1, player2)
        } else {
            (player2, player1)
        };
        Self {
            player1: player1.to_string(),
            player2: player2.to_string(),
            score1,
            score2,
            winner: winner.to_string(),
            loser: loser.to_string(),
            date,
        }
    }

    /// One-line summary for the review screen
    pub fn summary(&self) -> String {
        format!(
            "{} {} - {} {} (Winner: {})",
            self.player1, self.score1, self.score2, self.player2, self.winner
        )
    }
}

/// The last `count` records, oldest first
pub fn recent(records: &[MatchRecord], count: usize) -> &[MatchRecord] {
    &records[records.len().saturating_sub(count)..]
}
