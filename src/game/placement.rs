//! Placement rules for crossing a word through the board
//!
//! Checks, in order:
//! 1. The whole word fits on the board
//! 2. Nothing touches the cell before the first letter or after the last
//! 3. Existing letters on the path match the word
//! 4. Newly written letters have no side neighbours
//! 5. At least one letter is new
//! 6. No already-filled stretch of the path spells a known word

use super::grid::Board;
use super::Coord;
use std::collections::HashSet;

/// Direction a word grows in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

impl Orientation {
    pub const BOTH: [Orientation; 2] = [Orientation::Horizontal, Orientation::Vertical];

    /// `(row, column)` step between consecutive letters.
    pub fn step(self) -> (isize, isize) {
        match self {
            Orientation::Horizontal => (0, 1),
            Orientation::Vertical => (1, 0),
        }
    }

    /// Step across the word rather than along it.
    pub fn perpendicular(self) -> (isize, isize) {
        let (dr, dc) = self.step();
        (dc, dr)
    }
}

/// "Letter `intersection_index` of `word` sits on `intersection`."
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placement {
    pub word: String,
    pub intersection: Coord,
    pub intersection_index: usize,
    pub orientation: Orientation,
}

impl Placement {
    /// Signed position of the first letter; may lie off the board.
    pub fn start(&self) -> (isize, isize) {
        let (dr, dc) = self.orientation.step();
        let i = self.intersection_index as isize;
        (
            self.intersection.0 as isize - i * dr,
            self.intersection.1 as isize - i * dc,
        )
    }

    /// Signed positions of every letter, first to last.
    pub fn path(&self) -> Vec<(isize, isize)> {
        let (dr, dc) = self.orientation.step();
        let (sr, sc) = self.start();
        (0..self.word.chars().count() as isize)
            .map(|i| (sr + i * dr, sc + i * dc))
            .collect()
    }

    /// Board coordinates of every letter.
    ///
    /// Only meaningful for a placement that passed [`check_placement`].
    pub fn coords(&self) -> Vec<Coord> {
        self.path()
            .into_iter()
            .map(|(r, c)| (r as usize, c as usize))
            .collect()
    }
}

/// Outcome of checking a placement, with the rule that rejected it
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlacementVerdict {
    Valid,
    /// First or last letter would fall off the board
    OutOfBounds,
    /// The cell before the first letter is occupied
    HeadAbutment,
    /// The cell after the last letter is occupied
    TailAbutment,
    /// An existing letter differs from the word's letter
    LetterMismatch { index: usize },
    /// A newly written letter would sit beside another letter
    ParallelContact { index: usize },
    /// Every letter is already on the board
    NoNewLetters,
    /// An already-filled stretch of the path spells a known word
    SubsumesKnownWord { word: String },
}

impl PlacementVerdict {
    pub fn is_valid(&self) -> bool {
        matches!(self, PlacementVerdict::Valid)
    }
}

fn occupied(grid: &Board, row: isize, col: isize) -> bool {
    matches!(grid.cell_at(row, col), Some(Some(_)))
}

/// Decide whether `placement` may be written onto `grid`.
///
/// `known_words` holds every word that belongs on this board (the middle
/// word and all candidate subwords), lowercase.
pub fn check_placement(
    grid: &Board,
    placement: &Placement,
    known_words: &HashSet<String>,
) -> PlacementVerdict {
    let word = placement.word.as_str();
    let letters: Vec<char> = word.chars().collect();
    let path = placement.path();
    let (first, last) = match (path.first(), path.last()) {
        (Some(&first), Some(&last)) => (first, last),
        _ => return PlacementVerdict::NoNewLetters,
    };

    if grid.cell_at(first.0, first.1).is_none() || grid.cell_at(last.0, last.1).is_none() {
        return PlacementVerdict::OutOfBounds;
    }

    let (dr, dc) = placement.orientation.step();
    if occupied(grid, first.0 - dr, first.1 - dc) {
        return PlacementVerdict::HeadAbutment;
    }
    if occupied(grid, last.0 + dr, last.1 + dc) {
        return PlacementVerdict::TailAbutment;
    }

    let (pr, pc) = placement.orientation.perpendicular();
    let mut existing = vec![false; letters.len()];
    for (index, &(row, col)) in path.iter().enumerate() {
        match grid.cell_at(row, col) {
            Some(Some(letter)) => {
                if !letter.eq_ignore_ascii_case(&letters[index]) {
                    return PlacementVerdict::LetterMismatch { index };
                }
                existing[index] = true;
            }
            Some(None) => {
                // Side neighbours only matter for letters we are about to write
                if occupied(grid, row + pr, col + pc) || occupied(grid, row - pr, col - pc) {
                    return PlacementVerdict::ParallelContact { index };
                }
            }
            None => return PlacementVerdict::OutOfBounds,
        }
    }

    if existing.iter().all(|&e| e) {
        return PlacementVerdict::NoNewLetters;
    }

    for start in 0..letters.len() {
        for end in (start + 2)..=letters.len() {
            if !existing[start..end].iter().all(|&e| e) {
                break;
            }
            let stretch: String = letters[start..end]
                .iter()
                .flat_map(|c| c.to_lowercase())
                .collect();
            if known_words.contains(&stretch) {
                return PlacementVerdict::SubsumesKnownWord { word: stretch };
            }
        }
    }

    PlacementVerdict::Valid
}
