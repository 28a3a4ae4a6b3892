//! Per-round game state

use super::grid::Puzzle;
use super::wizard::Wizard;
use super::{Coord, Hue, LetterRack};
use rand::Rng;
use std::collections::{BTreeMap, BTreeSet};

/// What the player sees in one grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    Empty,
    Hidden,
    Revealed(char),
}

/// Outcome of the round after a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Win,
    Loss,
    Continue,
}

/// Numbers shown in the statistics panel
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Statistics {
    /// Shuffled middle-word letters, space separated
    pub letters: String,
    pub lives_left: i32,
    pub points: u32,
    pub last_guess: String,
    pub combo: u32,
    pub power_points: u32,
    pub shield_turns: u32,
}

/// Everything that changes while a round is played.
#[derive(Debug, Clone)]
pub struct GameState {
    pub player_name: Option<String>,
    pub wizard: Wizard,
    pub heart_point_mode: bool,
    pub statistics: Statistics,
    pub hidden_grid: Vec<Vec<Cell>>,
    /// Cells to highlight on the next frame
    pub last_guess_coords: BTreeSet<Coord>,
    pub correctly_guessed_words: BTreeSet<String>,
    pub hidden_letter_coords: BTreeSet<Coord>,
    pub found_letter_coords: BTreeSet<Coord>,
    pub next_message: String,
    pub next_message_color: Hue,
    rack: LetterRack,
    puzzle: Puzzle,
}

impl GameState {
    /// Start a round on `puzzle` with every letter hidden.
    pub fn new<R: Rng>(
        puzzle: Puzzle,
        wizard: Wizard,
        player_name: Option<String>,
        heart_point_mode: bool,
        rng: &mut R,
    ) -> Self {
        let hidden_grid = puzzle
            .grid
            .rows()
            .iter()
            .map(|row| {
                row.iter()
                    .map(|cell| match cell {
                        Some(_) => Cell::Hidden,
                        None => Cell::Empty,
                    })
                    .collect()
            })
            .collect();
        let hidden_letter_coords = puzzle.grid.letter_coords().collect();
        let rack = LetterRack::from_word_with_rng(&puzzle.middle_word, rng);

        let greeting = match &player_name {
            Some(name) => format!("Welcome, {}! Find every word hidden in the grid.", name),
            None => "Welcome! Find every word hidden in the grid.".to_string(),
        };

        Self {
            player_name,
            wizard,
            heart_point_mode,
            statistics: Statistics {
                letters: rack.as_string(),
                lives_left: wizard.starting_lives,
                ..Default::default()
            },
            hidden_grid,
            last_guess_coords: BTreeSet::new(),
            correctly_guessed_words: BTreeSet::new(),
            hidden_letter_coords,
            found_letter_coords: BTreeSet::new(),
            next_message: greeting,
            next_message_color: wizard.color,
            rack,
            puzzle,
        }
    }

    pub fn puzzle(&self) -> &Puzzle {
        &self.puzzle
    }

    pub fn words_to_find(&self) -> &BTreeMap<String, Vec<Coord>> {
        &self.puzzle.words
    }

    /// Whether the powerup command is available at all this round.
    pub fn powerups_enabled(&self) -> bool {
        self.heart_point_mode && self.wizard.has_powerup()
    }

    pub fn set_message(&mut self, message: impl Into<String>, color: Hue) {
        self.next_message = message.into();
        self.next_message_color = color;
    }

    /// Reveal `coords`, scoring one point per cell not already found.
    ///
    /// Returns the number of newly revealed cells.
    pub fn apply_coord_reveal(&mut self, coords: &[Coord]) -> u32 {
        let mut newly_revealed = 0;
        for &(row, col) in coords {
            let Some(letter) = self.puzzle.grid.get((row, col)) else {
                continue;
            };
            if let Some(cell) = self.hidden_grid.get_mut(row).and_then(|r| r.get_mut(col)) {
                *cell = Cell::Revealed(letter);
            }
            if self.found_letter_coords.insert((row, col)) {
                newly_revealed += 1;
            }
            self.hidden_letter_coords.remove(&(row, col));
        }
        self.statistics.points += newly_revealed;
        self.last_guess_coords = coords.iter().copied().collect();
        newly_revealed
    }

    /// Mark every unguessed word whose cells are all revealed as found.
    ///
    /// Returns the newly completed words in sorted order.
    pub fn complete_implicit_words(&mut self) -> Vec<String> {
        let completed: Vec<String> = self
            .puzzle
            .words
            .iter()
            .filter(|(word, _)| !self.correctly_guessed_words.contains(*word))
            .filter(|(_, coords)| coords.iter().all(|c| self.found_letter_coords.contains(c)))
            .map(|(word, _)| word.clone())
            .collect();
        self.correctly_guessed_words
            .extend(completed.iter().cloned());
        completed
    }

    /// Shuffle the displayed letters.
    pub fn reshuffle_letters<R: Rng>(&mut self, rng: &mut R) {
        self.rack.reshuffle(rng);
        self.statistics.letters = self.rack.as_string();
    }

    pub fn words_found(&self) -> usize {
        self.correctly_guessed_words.len()
    }

    pub fn verdict(&self) -> Verdict {
        if self.correctly_guessed_words.len() == self.puzzle.words.len() {
            Verdict::Win
        } else if self.statistics.lives_left <= 0 {
            Verdict::Loss
        } else {
            Verdict::Continue
        }
    }
}
