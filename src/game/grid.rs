//! Board generation
//!
//! The middle word goes down the main diagonal with one empty cell between
//! letters. Subwords are then crossed through existing letters one at a
//! time, preferring crossings on middle-word cells nobody has crossed yet.
//! A board is only accepted once every middle-word cell is crossed.

use super::placement::{check_placement, Orientation, Placement};
use super::selector::WordSelector;
use super::{Coord, Difficulty};
use crate::error::GameError;
use rand::prelude::*;
use std::collections::{BTreeMap, BTreeSet, HashSet};

/// Rectangular grid of optional letters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    height: usize,
    width: usize,
    cells: Vec<Vec<Option<char>>>,
}

impl Board {
    /// Create an empty board.
    pub fn new(height: usize, width: usize) -> Self {
        Self {
            height,
            width,
            cells: vec![vec![None; width]; height],
        }
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// Letter at `coord`, or `None` when empty or off the board.
    pub fn get(&self, coord: Coord) -> Option<char> {
        self.cells.get(coord.0)?.get(coord.1).copied().flatten()
    }

    /// Cell at a signed position: `None` off the board, `Some(None)` when empty.
    pub fn cell_at(&self, row: isize, col: isize) -> Option<Option<char>> {
        if row < 0 || col < 0 {
            return None;
        }
        self.cells.get(row as usize)?.get(col as usize).copied()
    }

    /// Write a letter. Positions off the board are ignored.
    pub fn set(&mut self, coord: Coord, letter: char) {
        if let Some(cell) = self.cells.get_mut(coord.0).and_then(|row| row.get_mut(coord.1)) {
            *cell = Some(letter);
        }
    }

    pub fn rows(&self) -> &[Vec<Option<char>>] {
        &self.cells
    }

    /// Coordinates of every non-empty cell, row by row.
    pub fn letter_coords(&self) -> impl Iterator<Item = Coord> + '_ {
        self.cells.iter().enumerate().flat_map(|(r, row)| {
            row.iter()
                .enumerate()
                .filter(|(_, cell)| cell.is_some())
                .map(move |(c, _)| (r, c))
        })
    }
}

/// A finished board and the words hidden in it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Puzzle {
    /// Middle-word cells are uppercase, everything else lowercase.
    pub grid: Board,
    pub middle_word: String,
    /// Every placed word (middle word included) and its cells, in letter order.
    pub words: BTreeMap<String, Vec<Coord>>,
}

impl Puzzle {
    pub fn word_count(&self) -> usize {
        self.words.len()
    }
}

/// Why a generation attempt was thrown away.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GridError {
    #[error("a {length}-letter diagonal does not fit a {height}x{width} board")]
    MiddleWordDoesNotFit {
        length: usize,
        height: usize,
        width: usize,
    },

    #[error("only {placed} words placed, need {required}")]
    TooFewWords { placed: usize, required: usize },

    #[error("{missing} middle-word cells left uncrossed")]
    UncrossedMiddleCells { missing: usize },
}

/// Mutable state while one board is being built.
pub struct GridBuilder<'a> {
    difficulty: &'a Difficulty,
    grid: Board,
    middle_word: String,
    known_words: HashSet<String>,
    placed_words_coords: BTreeMap<String, Vec<Coord>>,
    placed_letter_coords: BTreeMap<char, Vec<Coord>>,
    middle_word_coords: BTreeSet<Coord>,
    used_middle_word_coords: BTreeSet<Coord>,
}

impl<'a> GridBuilder<'a> {
    pub fn new(difficulty: &'a Difficulty, middle_word: &str, subwords: &[String]) -> Self {
        let mut known_words: HashSet<String> = subwords.iter().cloned().collect();
        known_words.insert(middle_word.to_string());
        Self {
            difficulty,
            grid: Board::new(difficulty.grid_height, difficulty.grid_width),
            middle_word: middle_word.to_string(),
            known_words,
            placed_words_coords: BTreeMap::new(),
            placed_letter_coords: BTreeMap::new(),
            middle_word_coords: BTreeSet::new(),
            used_middle_word_coords: BTreeSet::new(),
        }
    }

    pub fn placed_count(&self) -> usize {
        self.placed_words_coords.len()
    }

    /// Lay the middle word down the centred diagonal.
    pub fn place_middle_word(&mut self) -> Result<(), GridError> {
        let length = self.middle_word.chars().count();
        let height = self.grid.height();
        let width = self.grid.width();
        let span = (2 * length).saturating_sub(1);
        if length == 0 || span > height || span > width {
            return Err(GridError::MiddleWordDoesNotFit {
                length,
                height,
                width,
            });
        }

        let start_row = (height - span) / 2;
        let start_col = (width - span) / 2;
        let letters: Vec<char> = self.middle_word.chars().collect();
        let mut coords = Vec::with_capacity(length);
        for (k, &letter) in letters.iter().enumerate() {
            let coord = (start_row + 2 * k, start_col + 2 * k);
            self.write_letter(coord, letter);
            self.middle_word_coords.insert(coord);
            coords.push(coord);
        }
        self.placed_words_coords
            .insert(self.middle_word.clone(), coords);
        Ok(())
    }

    fn write_letter(&mut self, coord: Coord, letter: char) {
        self.grid.set(coord, letter);
        let cells = self.placed_letter_coords.entry(letter).or_default();
        if !cells.contains(&coord) {
            cells.push(coord);
        }
    }

    /// Every legal way to cross `word` through a letter already on the board.
    pub fn possible_placements(&self, word: &str) -> Vec<Placement> {
        let mut placements = Vec::new();
        for (index, letter) in word.chars().enumerate() {
            let Some(cells) = self.placed_letter_coords.get(&letter) else {
                continue;
            };
            for &intersection in cells {
                for orientation in Orientation::BOTH {
                    let placement = Placement {
                        word: word.to_string(),
                        intersection,
                        intersection_index: index,
                        orientation,
                    };
                    if check_placement(&self.grid, &placement, &self.known_words).is_valid() {
                        placements.push(placement);
                    }
                }
            }
        }
        placements
    }

    fn crosses_unused_middle_cell(&self, placement: &Placement) -> bool {
        self.middle_word_coords.contains(&placement.intersection)
            && !self.used_middle_word_coords.contains(&placement.intersection)
    }

    /// Pick a placement, preferring crossings on uncrossed middle-word cells.
    pub fn choose_placement<R: Rng>(
        &self,
        placements: Vec<Placement>,
        rng: &mut R,
    ) -> Option<Placement> {
        let (priority, other): (Vec<Placement>, Vec<Placement>) = placements
            .into_iter()
            .partition(|p| self.crosses_unused_middle_cell(p));
        let pool = if priority.is_empty() { other } else { priority };
        pool.choose(rng).cloned()
    }

    /// Write a placement onto the board.
    pub fn apply(&mut self, placement: &Placement) {
        let coords = placement.coords();
        for (&coord, letter) in coords.iter().zip(placement.word.chars()) {
            self.write_letter(coord, letter);
            // A straight word meets the diagonal at most once, so this is the intersection
            if self.middle_word_coords.contains(&coord) {
                self.used_middle_word_coords.insert(coord);
            }
        }
        self.placed_words_coords
            .insert(placement.word.clone(), coords);
    }

    /// Validate the board and hand it over as a puzzle.
    pub fn finish(mut self) -> Result<Puzzle, GridError> {
        let placed = self.placed_count();
        if placed < self.difficulty.min_words {
            return Err(GridError::TooFewWords {
                placed,
                required: self.difficulty.min_words,
            });
        }
        let missing = self
            .middle_word_coords
            .difference(&self.used_middle_word_coords)
            .count();
        if missing > 0 {
            return Err(GridError::UncrossedMiddleCells { missing });
        }

        for &coord in &self.middle_word_coords {
            if let Some(letter) = self.grid.get(coord) {
                self.grid.set(coord, letter.to_ascii_uppercase());
            }
        }

        Ok(Puzzle {
            grid: self.grid,
            middle_word: self.middle_word,
            words: self.placed_words_coords,
        })
    }
}

/// One randomised attempt at building a board for `middle_word`.
pub fn generate_grid<R: Rng>(
    difficulty: &Difficulty,
    middle_word: &str,
    subwords: &[String],
    rng: &mut R,
) -> Result<Puzzle, GridError> {
    let mut builder = GridBuilder::new(difficulty, middle_word, subwords);
    builder.place_middle_word()?;

    let mut order: Vec<&String> = subwords.iter().collect();
    order.shuffle(rng);
    for word in order {
        if builder.placed_count() >= difficulty.max_words {
            break;
        }
        if builder.placed_words_coords.contains_key(word) {
            continue;
        }
        let placements = builder.possible_placements(word);
        if let Some(placement) = builder.choose_placement(placements, rng) {
            builder.apply(&placement);
        }
    }

    builder.finish()
}

/// Select words and generate a board, retrying up to `max_attempts` times.
pub fn build_puzzle<R: Rng>(
    selector: &WordSelector,
    difficulty: &Difficulty,
    rng: &mut R,
    max_attempts: usize,
) -> Result<Puzzle, GameError> {
    for attempt in 1..=max_attempts {
        let Some(selection) = selector.select(rng) else {
            log::warn!(
                "no {}-letter middle word has {} subwords",
                difficulty.max_word_length,
                difficulty.min_words.saturating_sub(1)
            );
            return Err(GameError::NoMiddleWord {
                length: difficulty.max_word_length,
            });
        };

        match generate_grid(difficulty, &selection.middle_word, &selection.subwords, rng) {
            Ok(puzzle) => {
                log::info!(
                    "built {} board around {:?} with {} words (attempt {})",
                    difficulty.name,
                    puzzle.middle_word,
                    puzzle.word_count(),
                    attempt
                );
                return Ok(puzzle);
            }
            Err(e) => log::debug!("attempt {} with {:?} failed: {}", attempt, selection.middle_word, e),
        }
    }

    log::warn!("gave up building a {} board after {} attempts", difficulty.name, max_attempts);
    Err(GameError::GenerationExhausted {
        attempts: max_attempts,
    })
}
