//! Game logic: difficulty presets, word selection, board generation, turns

pub mod arbitrator;
pub mod dictionary;
pub mod grid;
pub mod placement;
pub mod powerup;
pub mod selector;
pub mod state;
pub mod validation;
pub mod wizard;

pub use wizard::{PowerupKind, Wizard, WHITE_WIZARD, WIZARDS};

use once_cell::sync::Lazy;
use rand::prelude::*;
use std::collections::HashMap;

/// A board position as `(row, column)`.
pub type Coord = (usize, usize);

/// Presentational color tag shared by wizards and messages.
///
/// The game core never talks to the terminal; the renderer maps these to
/// real colors (or ignores them in plain mode).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Hue {
    White,
    Red,
    Green,
    Blue,
    Yellow,
    Gray,
}

/// Board and scoring parameters for one preset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Difficulty {
    pub name: &'static str,
    pub grid_height: usize,
    pub grid_width: usize,
    pub min_words: usize,
    pub max_words: usize,
    /// Length of the middle word, and the longest word allowed on the board.
    pub max_word_length: usize,
    pub min_subword_length: usize,
    /// When false, powerups and styled rendering are disabled.
    pub heart_point_mode: bool,
}

/// Preset used when heart points are switched off.
pub const NO_HEART_POINTS: &str = "No Heart Points";

/// Fixed difficulty presets, in menu order.
pub static DIFFICULTIES: [Difficulty; 6] = [
    Difficulty {
        name: "Simple Scroll",
        grid_height: 13,
        grid_width: 31,
        min_words: 8,
        max_words: 30,
        max_word_length: 5,
        min_subword_length: 3,
        heart_point_mode: true,
    },
    Difficulty {
        name: "Spellbook",
        grid_height: 15,
        grid_width: 45,
        min_words: 21,
        max_words: 100,
        max_word_length: 6,
        min_subword_length: 3,
        heart_point_mode: true,
    },
    Difficulty {
        name: "Grand Tome",
        grid_height: 17,
        grid_width: 51,
        min_words: 25,
        max_words: 110,
        max_word_length: 7,
        min_subword_length: 3,
        heart_point_mode: true,
    },
    Difficulty {
        name: "Arcane Codex",
        grid_height: 19,
        grid_width: 57,
        min_words: 30,
        max_words: 120,
        max_word_length: 8,
        min_subword_length: 4,
        heart_point_mode: true,
    },
    Difficulty {
        name: "The Great Bibliotheca",
        grid_height: 21,
        grid_width: 63,
        min_words: 35,
        max_words: 140,
        max_word_length: 9,
        min_subword_length: 4,
        heart_point_mode: true,
    },
    Difficulty {
        name: NO_HEART_POINTS,
        grid_height: 13,
        grid_width: 31,
        min_words: 8,
        max_words: 30,
        max_word_length: 5,
        min_subword_length: 3,
        heart_point_mode: false,
    },
];

static DIFFICULTY_INDEX: Lazy<HashMap<&'static str, &'static Difficulty>> =
    Lazy::new(|| DIFFICULTIES.iter().map(|d| (d.name, d)).collect());

/// Look a preset up by its display name.
pub fn difficulty_by_name(name: &str) -> Option<&'static Difficulty> {
    DIFFICULTY_INDEX.get(name).copied()
}

/// The shuffled letters of the middle word, as shown to the player.
#[derive(Debug, Clone)]
pub struct LetterRack {
    letters: Vec<char>,
}

impl LetterRack {
    /// Build a rack from `word`, uppercased and shuffled.
    pub fn from_word_with_rng<R: Rng>(word: &str, rng: &mut R) -> Self {
        let mut letters: Vec<char> = word.chars().map(|c| c.to_ascii_uppercase()).collect();
        letters.shuffle(rng);
        Self { letters }
    }

    /// Shuffle the rack in place.
    pub fn reshuffle<R: Rng>(&mut self, rng: &mut R) {
        self.letters.shuffle(rng);
    }

    /// Letters joined by single spaces, e.g. `"K A E R T S"`.
    pub fn as_string(&self) -> String {
        self.letters
            .iter()
            .map(|c| c.to_string())
            .collect::<Vec<_>>()
            .join(" ")
    }
}
