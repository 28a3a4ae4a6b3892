//! Leaderboard persistence
//!
//! This module provides:
//! - OS-standard data directory location (via `directories` crate)
//! - The score leaderboard, one `name|points` line per finished round
//! - The winning streak leaderboard (see [`streaks`])
//!
//! Every file is opened, read or appended, and closed within one call.

pub mod streaks;

use directories::ProjectDirs;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Field delimiter in the score file
pub const SCORE_DELIMITER: char = '|';

const LEADERBOARD_DIR: &str = "leaderboard";
const SCORES_FILE: &str = "scores.txt";
const STREAKS_FILE: &str = "winning_streaks.json";

/// Errors that can occur during storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Could not determine data directory
    #[error("could not determine data directory")]
    NoDataDirectory,
    /// Failed to create the leaderboard directory
    #[error("failed to create data directory: {0}")]
    CreateDirFailed(#[source] io::Error),
    #[error("leaderboard file error: {0}")]
    Io(#[from] io::Error),
    #[error("malformed streak leaderboard: {0}")]
    Json(#[from] serde_json::Error),
}

/// One line of the score leaderboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreEntry {
    pub name: String,
    pub points: i64,
}

impl ScoreEntry {
    pub fn new(name: impl Into<String>, points: i64) -> Self {
        Self {
            name: name.into(),
            points,
        }
    }

    /// `name|points`, without the newline.
    pub fn to_line(&self) -> String {
        format!("{}{}{}", self.name, SCORE_DELIMITER, self.points)
    }
}

/// Parse a score file, skipping blank and malformed lines.
///
/// A line is kept only when it has exactly one delimiter and the part after
/// it is an integer.
pub fn parse_scores(text: &str) -> Vec<ScoreEntry> {
    text.lines()
        .filter_map(|line| {
            let line = line.trim();
            if line.is_empty() || line.matches(SCORE_DELIMITER).count() != 1 {
                return None;
            }
            let (name, points) = line.split_once(SCORE_DELIMITER)?;
            let points = points.trim().parse::<i64>().ok()?;
            Some(ScoreEntry::new(name.trim(), points))
        })
        .collect()
}

/// Sort by points, highest first. Ties keep file order.
pub fn sort_scores(scores: &mut [ScoreEntry]) {
    scores.sort_by(|a, b| b.points.cmp(&a.points));
}

/// Handle on the leaderboard directory.
#[derive(Debug, Clone)]
pub struct Storage {
    dir: PathBuf,
}

impl Storage {
    /// Open (creating if needed) the leaderboard directory under `data_dir`.
    pub fn open(data_dir: &Path) -> Result<Self, StorageError> {
        let dir = data_dir.join(LEADERBOARD_DIR);
        fs::create_dir_all(&dir).map_err(StorageError::CreateDirFailed)?;
        Ok(Self { dir })
    }

    /// Get the OS-standard data directory for worderly.
    ///
    /// - Linux: `$XDG_DATA_HOME/worderly/` or `~/.local/share/worderly/`
    /// - macOS: `~/Library/Application Support/worderly/`
    pub fn data_dir() -> Result<PathBuf, StorageError> {
        ProjectDirs::from("", "", "worderly")
            .map(|dirs| dirs.data_dir().to_path_buf())
            .ok_or(StorageError::NoDataDirectory)
    }

    pub fn scores_path(&self) -> PathBuf {
        self.dir.join(SCORES_FILE)
    }

    pub fn streaks_path(&self) -> PathBuf {
        self.dir.join(STREAKS_FILE)
    }

    /// Every well-formed score line, in file order. A missing file is empty.
    pub fn load_scores(&self) -> Result<Vec<ScoreEntry>, StorageError> {
        match fs::read_to_string(self.scores_path()) {
            Ok(text) => Ok(parse_scores(&text)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(e.into()),
        }
    }

    /// The best `limit` scores, highest first.
    pub fn top_scores(&self, limit: usize) -> Result<Vec<ScoreEntry>, StorageError> {
        let mut scores = self.load_scores()?;
        sort_scores(&mut scores);
        scores.truncate(limit);
        Ok(scores)
    }

    /// Append one finished round to the score file.
    pub fn append_score(&self, entry: &ScoreEntry) -> Result<(), StorageError> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(self.scores_path())?;
        writeln!(file, "{}", entry.to_line())?;
        log::debug!("recorded score {} for {}", entry.points, entry.name);
        Ok(())
    }
}

/// Unique scratch directory for file-backed tests.
#[cfg(test)]
pub(crate) fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "worderly-test-{}-{}",
        name,
        std::process::id()
    ));
    let _ = fs::remove_dir_all(&dir);
    dir
}
