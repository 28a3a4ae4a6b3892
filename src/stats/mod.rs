//! Winning streak tracking across consecutive rounds
//!
//! A streak is a run of won rounds by the same player. It ends on a loss,
//! when the player leaves a round, or when the game quits; at that point
//! the tracker hands back a record for the streak leaderboard.

use crate::storage::streaks::StreakRecord;

/// Running streak for the current player
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StreakTracker {
    player_name: Option<String>,
    wins: u32,
    points: u32,
}

impl StreakTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start tracking a new player, dropping any unfinished streak.
    pub fn start(&mut self, player_name: impl Into<String>) {
        self.player_name = Some(player_name.into());
        self.wins = 0;
        self.points = 0;
    }

    pub fn wins(&self) -> u32 {
        self.wins
    }

    /// Count a won round worth `points`.
    pub fn record_win(&mut self, points: u32) {
        self.wins += 1;
        self.points += points;
    }

    /// End the streak, returning a record when at least one round was won.
    pub fn take_record(&mut self) -> Option<StreakRecord> {
        let wins = std::mem::take(&mut self.wins);
        let points = std::mem::take(&mut self.points);
        if wins == 0 {
            return None;
        }
        let player_name = self.player_name.clone()?;
        Some(StreakRecord {
            player_name,
            streak_count: wins,
            total_points_in_streak: points,
        })
    }
}
