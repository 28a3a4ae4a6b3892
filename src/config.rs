//! Runtime settings resolved from the environment

use crate::game::{difficulty_by_name, Difficulty};
use crate::storage::{Storage, StorageError};
use std::path::PathBuf;
use thiserror::Error;

/// Overrides the data directory
pub const DATA_DIR_VAR: &str = "WORDERLY_DATA_DIR";
/// Fixes the RNG seed
pub const SEED_VAR: &str = "WORDERLY_SEED";
/// Caps board generation attempts
pub const MAX_ATTEMPTS_VAR: &str = "WORDERLY_MAX_ATTEMPTS";
/// Preselects a difficulty on the difficulty screen
pub const DIFFICULTY_VAR: &str = "WORDERLY_DIFFICULTY";

/// Longest name taken from `USER` as a prefill
pub const MAX_DEFAULT_NAME_LEN: usize = 12;

/// A setting that could not be honoured and what was used instead.
///
/// Settings are read before logging is up, so these are handed back to the
/// caller rather than logged on the spot.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SettingWarning {
    #[error("ignoring WORDERLY_SEED={raw:?}: not a u64, seeding from the OS")]
    InvalidSeed { raw: String },

    #[error("ignoring WORDERLY_MAX_ATTEMPTS={raw:?}: not a positive integer, using {}", Settings::DEFAULT_MAX_ATTEMPTS)]
    InvalidMaxAttempts { raw: String },

    #[error("ignoring WORDERLY_DIFFICULTY={raw:?}: no such difficulty")]
    UnknownDifficulty { raw: String },

    #[error("no data directory for this user, using {}", .fallback.display())]
    NoDataDirectory { fallback: PathBuf },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Settings {
    /// Root for the log file and the leaderboards
    pub data_dir: PathBuf,
    pub seed: Option<u64>,
    pub max_attempts: usize,
    /// Prefill for the name entry screen
    pub default_name: String,
    pub preferred_difficulty: Option<&'static Difficulty>,
}

impl Settings {
    pub const DEFAULT_MAX_ATTEMPTS: usize = 250;

    /// Read settings from the process environment.
    pub fn from_env() -> (Self, Vec<SettingWarning>) {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolve settings with `lookup` standing in for the environment.
    ///
    /// Bad values fall back to their defaults and are reported in the
    /// returned warnings.
    pub fn from_lookup<F>(lookup: F) -> (Self, Vec<SettingWarning>)
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut warnings = Vec::new();

        let data_dir = match lookup(DATA_DIR_VAR).filter(|v| !v.trim().is_empty()) {
            Some(dir) => PathBuf::from(dir),
            None => data_dir_or_fallback(Storage::data_dir(), &mut warnings),
        };

        let seed = lookup(SEED_VAR).and_then(|raw| match raw.trim().parse::<u64>() {
            Ok(seed) => Some(seed),
            Err(_) => {
                warnings.push(SettingWarning::InvalidSeed { raw });
                None
            }
        });

        let max_attempts = match lookup(MAX_ATTEMPTS_VAR) {
            Some(raw) => match raw.trim().parse::<usize>() {
                Ok(n) if n > 0 => n,
                _ => {
                    warnings.push(SettingWarning::InvalidMaxAttempts { raw });
                    Self::DEFAULT_MAX_ATTEMPTS
                }
            },
            None => Self::DEFAULT_MAX_ATTEMPTS,
        };

        let preferred_difficulty =
            lookup(DIFFICULTY_VAR).and_then(|raw| match difficulty_by_name(raw.trim()) {
                Some(difficulty) => Some(difficulty),
                None => {
                    warnings.push(SettingWarning::UnknownDifficulty { raw });
                    None
                }
            });

        let default_name = lookup("USER")
            .map(|user| default_name_from(&user))
            .unwrap_or_default();

        let settings = Self {
            data_dir,
            seed,
            max_attempts,
            default_name,
            preferred_difficulty,
        };
        (settings, warnings)
    }

    pub fn log_path(&self) -> PathBuf {
        self.data_dir.join("worderly.log")
    }
}

/// The OS data directory, or a directory under the temp dir when there is none.
fn data_dir_or_fallback(
    os_dir: Result<PathBuf, StorageError>,
    warnings: &mut Vec<SettingWarning>,
) -> PathBuf {
    os_dir.unwrap_or_else(|_| {
        let fallback = std::env::temp_dir().join("worderly");
        warnings.push(SettingWarning::NoDataDirectory {
            fallback: fallback.clone(),
        });
        fallback
    })
}

/// First characters of `user` that are allowed in a leaderboard name.
fn default_name_from(user: &str) -> String {
    user.chars()
        .filter(|c| *c != crate::storage::SCORE_DELIMITER && !c.is_control())
        .take(MAX_DEFAULT_NAME_LEN)
        .collect()
}
