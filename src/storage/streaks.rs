//! Winning streak leaderboard, stored as a JSON array

use super::{Storage, StorageError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;

/// How many streaks the leaderboard keeps
pub const MAX_STREAK_RECORDS: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakRecord {
    pub player_name: String,
    pub streak_count: u32,
    pub total_points_in_streak: u32,
}

/// Add `record`, sort by streak then points (both descending), keep the top ten.
pub fn merge_streak(mut records: Vec<StreakRecord>, record: StreakRecord) -> Vec<StreakRecord> {
    records.push(record);
    records.sort_by(|a, b| {
        (b.streak_count, b.total_points_in_streak).cmp(&(a.streak_count, a.total_points_in_streak))
    });
    records.truncate(MAX_STREAK_RECORDS);
    records
}

impl Storage {
    /// Stored streaks. A missing file is empty.
    pub fn load_streaks(&self) -> Result<Vec<StreakRecord>, StorageError> {
        match fs::read_to_string(self.streaks_path()) {
            Ok(text) if text.trim().is_empty() => Ok(Vec::new()),
            Ok(text) => Ok(serde_json::from_str(&text)?),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(e.into()),
        }
    }

    /// Merge `record` into the stored leaderboard and write it back.
    pub fn record_streak(&self, record: StreakRecord) -> Result<Vec<StreakRecord>, StorageError> {
        let records = merge_streak(self.load_streaks()?, record);
        let json = serde_json::to_string_pretty(&records)?;
        fs::write(self.streaks_path(), json)?;
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::scratch_dir;

    fn record(name: &str, streak: u32, points: u32) -> StreakRecord {
        StreakRecord {
            player_name: name.to_string(),
            streak_count: streak,
            total_points_in_streak: points,
        }
    }

    #[test]
    fn test_merge_sorts_by_streak_then_points() {
        let records = vec![record("a", 2, 50), record("b", 3, 10)];
        let merged = merge_streak(records, record("c", 2, 80));
        let names: Vec<&str> = merged.iter().map(|r| r.player_name.as_str()).collect();
        assert_eq!(names, vec!["b", "c", "a"]);
    }

    #[test]
    fn test_merge_keeps_top_ten() {
        let records: Vec<StreakRecord> = (1..=10).map(|i| record("p", i, 0)).collect();
        let merged = merge_streak(records, record("low", 0, 999));
        assert_eq!(merged.len(), MAX_STREAK_RECORDS);
        assert!(merged.iter().all(|r| r.player_name != "low"));

        let merged = merge_streak(merged, record("high", 11, 0));
        assert_eq!(merged[0].player_name, "high");
        assert_eq!(merged.len(), MAX_STREAK_RECORDS);
        assert_eq!(merged.last().unwrap().streak_count, 2);
    }

    #[test]
    fn test_record_and_load_streaks() {
        let dir = scratch_dir("streaks");
        let storage = Storage::open(&dir).unwrap();
        assert!(storage.load_streaks().unwrap().is_empty());

        storage.record_streak(record("alice", 2, 40)).unwrap();
        storage.record_streak(record("bob", 4, 90)).unwrap();

        let loaded = storage.load_streaks().unwrap();
        assert_eq!(loaded, vec![record("bob", 4, 90), record("alice", 2, 40)]);
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_json_field_names() {
        let json = serde_json::to_string(&record("zoe", 1, 7)).unwrap();
        assert!(json.contains("\"player_name\":\"zoe\""));
        assert!(json.contains("\"streak_count\":1"));
        assert!(json.contains("\"total_points_in_streak\":7"));
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = scratch_dir("bad-streaks");
        let storage = Storage::open(&dir).unwrap();
        fs::write(storage.streaks_path(), "{not json").unwrap();
        assert!(matches!(storage.load_streaks(), Err(StorageError::Json(_))));
        fs::remove_dir_all(&dir).unwrap();
    }
}
