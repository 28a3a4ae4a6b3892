//! Wizard powerups and power point progression

use super::arbitrator::completion_note;
use super::state::GameState;
use super::PowerupKind;
use super::{Coord, Hue};
use rand::prelude::*;

/// Fewest letters a letter reveal uncovers
pub const MIN_REVEAL: usize = 5;
/// Most letters a letter reveal uncovers
pub const MAX_REVEAL: usize = 8;

/// Turns of protection granted by one shield cast
pub const SHIELD_TURNS: u32 = 2;

/// Spend one power point and apply the wizard's powerup.
///
/// Callers must have passed [`check_powerup`](super::validation::check_powerup).
pub fn activate<R: Rng>(state: &mut GameState, rng: &mut R) {
    state.statistics.power_points = state.statistics.power_points.saturating_sub(1);
    state.last_guess_coords.clear();
    let color = state.wizard.color;

    match state.wizard.powerup {
        PowerupKind::RevealWord => {
            let remaining: Vec<String> = state
                .words_to_find()
                .keys()
                .filter(|w| !state.correctly_guessed_words.contains(*w))
                .cloned()
                .collect();
            let Some(word) = remaining.choose(rng).cloned() else {
                state.set_message("There is nothing left to reveal.", Hue::Yellow);
                return;
            };
            let coords = state.words_to_find()[&word].clone();
            let revealed = state.apply_coord_reveal(&coords);
            let completed = state.complete_implicit_words();
            log::debug!("reveal word uncovered {} letters", revealed);
            state.set_message(
                format!("A hidden word appears!{}", completion_note(&completed)),
                color,
            );
        }
        PowerupKind::RevealLetters => {
            let hidden: Vec<Coord> = state.hidden_letter_coords.iter().copied().collect();
            if hidden.is_empty() {
                state.set_message("There is nothing left to reveal.", Hue::Yellow);
                return;
            }
            let count = rng.random_range(MIN_REVEAL..=MAX_REVEAL).min(hidden.len());
            let picked: Vec<Coord> = hidden.choose_multiple(rng, count).copied().collect();
            let revealed = state.apply_coord_reveal(&picked);
            let completed = state.complete_implicit_words();
            state.set_message(
                format!("{} letters shimmer into view!{}", revealed, completion_note(&completed)),
                color,
            );
        }
        PowerupKind::Shield => {
            state.statistics.shield_turns += SHIELD_TURNS;
            state.set_message(
                format!("Shield up! The next {} misses are free.", SHIELD_TURNS),
                color,
            );
        }
        PowerupKind::Heal => {
            state.statistics.lives_left += 1;
            state.set_message("A life is restored.", color);
        }
        PowerupKind::None => {
            log::warn!("powerup cast by a wizard without one");
        }
    }
}

/// Award a power point when the combo hits a multiple of the wizard's requirement.
///
/// Returns whether a point was awarded.
pub fn award_power_point(state: &mut GameState) -> bool {
    let Some(requirement) = state.wizard.combo_requirement else {
        return false;
    };
    let combo = state.statistics.combo;
    if requirement > 0 && combo > 0 && combo % requirement == 0 {
        state.statistics.power_points += 1;
        true
    } else {
        false
    }
}
