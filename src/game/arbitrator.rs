//! Turn processing
//!
//! Applies one line of player input to the game state. Within a turn the
//! mutations always happen in this order: classification, guess or powerup,
//! implicit completion, power point award, termination check.

use super::powerup::{activate, award_power_point};
use super::state::{GameState, Verdict};
use super::validation::{check_powerup, classify, Command, InputError};
use super::Hue;
use rand::Rng;

/// What a line of input did to the round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnOutcome {
    /// Input refused; nothing changed but the message
    Rejected(InputError),
    /// Letters reshuffled; no turn consumed
    Shuffled,
    /// A turn was played
    Played(Verdict),
}

impl TurnOutcome {
    /// Round verdict after this input.
    pub fn verdict(&self) -> Verdict {
        match self {
            TurnOutcome::Played(verdict) => *verdict,
            _ => Verdict::Continue,
        }
    }
}

/// Outcome of resolving a guess
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuessResult {
    /// New word found; carries the number of newly revealed cells
    Correct { revealed: u32, completed: Vec<String> },
    AlreadyFound,
    NotAWord,
}

/// `" Also completed: a, b."`, or empty when nothing completed.
pub fn completion_note(completed: &[String]) -> String {
    if completed.is_empty() {
        String::new()
    } else {
        format!(" Also completed: {}.", completed.join(", "))
    }
}

/// Process one line of input against `state`.
pub fn process_turn<R: Rng>(state: &mut GameState, input: &str, rng: &mut R) -> TurnOutcome {
    let command = match classify(input) {
        Ok(command) => command,
        Err(error) => return reject(state, error),
    };

    match command {
        Command::Shuffle => {
            state.reshuffle_letters(rng);
            state.set_message("Letters shuffled.", Hue::Gray);
            return TurnOutcome::Shuffled;
        }
        Command::Powerup => {
            if let Err(error) = check_powerup(state) {
                return reject(state, error);
            }
            activate(state, rng);
        }
        Command::Guess(word) => {
            resolve_guess(state, &word);
            if award_power_point(state) {
                state.next_message.push_str(" You earned a power point!");
            }
        }
    }

    let verdict = state.verdict();
    match verdict {
        Verdict::Win => log::info!("round won with {} points", state.statistics.points),
        Verdict::Loss => log::info!("round lost with {} points", state.statistics.points),
        Verdict::Continue => {}
    }
    TurnOutcome::Played(verdict)
}

fn reject(state: &mut GameState, error: InputError) -> TurnOutcome {
    state.set_message(error.message(), Hue::Yellow);
    TurnOutcome::Rejected(error)
}

/// Resolve a normalized guess and write the resulting message.
pub fn resolve_guess(state: &mut GameState, word: &str) -> GuessResult {
    state.statistics.last_guess = word.to_string();
    state.last_guess_coords.clear();

    if state.correctly_guessed_words.contains(word) {
        miss(state, format!("You already found '{}'.", word));
        return GuessResult::AlreadyFound;
    }

    let Some(coords) = state.words_to_find().get(word).cloned() else {
        miss(state, format!("'{}' is not one of the hidden words.", word));
        return GuessResult::NotAWord;
    };

    state.statistics.combo += 1;
    state.correctly_guessed_words.insert(word.to_string());
    let revealed = state.apply_coord_reveal(&coords);
    let completed = state.complete_implicit_words();
    state.set_message(
        format!("Correct! '{}' is on the board.{}", word, completion_note(&completed)),
        Hue::Green,
    );
    GuessResult::Correct { revealed, completed }
}

/// Break the combo and charge a life unless a shield absorbs it.
fn miss(state: &mut GameState, message: String) {
    let stats = &mut state.statistics;
    stats.combo = 0;
    if stats.shield_turns > 0 {
        stats.shield_turns -= 1;
        state.set_message(format!("{} Your shield absorbs the blow.", message), Hue::Blue);
    } else {
        stats.lives_left -= 1;
        state.set_message(message, Hue::Red);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::state::fixtures::{hat_puzzle, new_game, streak_puzzle};
    use crate::game::PowerupKind;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    #[test]
    fn test_correct_guess_flow() {
        let mut state = new_game(streak_puzzle(), PowerupKind::None);
        let outcome = process_turn(&mut state, "stare", &mut rng());

        assert_eq!(outcome, TurnOutcome::Played(Verdict::Continue));
        assert_eq!(state.statistics.lives_left, 5);
        assert_eq!(state.statistics.combo, 1);
        assert_eq!(state.statistics.points, 5);
        assert_eq!(state.statistics.last_guess, "stare");
        assert_eq!(
            state.correctly_guessed_words.iter().collect::<Vec<_>>(),
            vec!["stare"]
        );
        for coord in &state.words_to_find()["stare"] {
            assert!(state.found_letter_coords.contains(coord));
        }
        assert_eq!(state.next_message_color, Hue::Green);
    }

    #[test]
    fn test_wrong_then_correct() {
        let mut state = new_game(streak_puzzle(), PowerupKind::None);
        let mut rng = rng();
        process_turn(&mut state, "stare", &mut rng);

        process_turn(&mut state, "xxxx", &mut rng);
        assert_eq!(state.statistics.lives_left, 4);
        assert_eq!(state.statistics.combo, 0);
        assert_eq!(state.next_message_color, Hue::Red);

        let before = state.statistics.points;
        let new_cells = state.words_to_find()["ear"]
            .iter()
            .filter(|c| !state.found_letter_coords.contains(c))
            .count() as u32;
        process_turn(&mut state, "ear", &mut rng);
        assert_eq!(state.statistics.combo, 1);
        assert_eq!(state.statistics.lives_left, 4);
        assert_eq!(state.statistics.points, before + new_cells);
    }

    #[test]
    fn test_points_only_count_new_cells() {
        let mut state = new_game(streak_puzzle(), PowerupKind::None);
        let mut rng = rng();
        // "stare" reveals the S of the middle word
        process_turn(&mut state, "stare", &mut rng);
        process_turn(&mut state, "streak", &mut rng);
        assert_eq!(state.statistics.points, 5 + 5);
        assert_eq!(state.statistics.points as usize, state.found_letter_coords.len());
    }

    #[test]
    fn test_duplicate_guess_costs_a_life() {
        let mut state = new_game(streak_puzzle(), PowerupKind::None);
        let mut rng = rng();
        process_turn(&mut state, "rate", &mut rng);
        let points = state.statistics.points;

        let result = resolve_guess(&mut state, "rate");
        assert_eq!(result, GuessResult::AlreadyFound);
        assert_eq!(state.statistics.lives_left, 4);
        assert_eq!(state.statistics.combo, 0);
        assert_eq!(state.statistics.points, points);
        assert!(state.next_message.contains("already found"));
    }

    #[test]
    fn test_implicit_completion() {
        let mut state = new_game(hat_puzzle(), PowerupKind::None);
        let result = resolve_guess(&mut state, "hat");

        assert_eq!(
            result,
            GuessResult::Correct {
                revealed: 3,
                completed: vec!["at".to_string()]
            }
        );
        assert!(state.correctly_guessed_words.contains("hat"));
        assert!(state.correctly_guessed_words.contains("at"));
        assert!(state.next_message.contains("at"));
        assert!(state.next_message.contains("Also completed"));
    }

    #[test]
    fn test_shield_absorbs_hits() {
        let mut state = new_game(streak_puzzle(), PowerupKind::Shield);
        let mut rng = rng();
        state.statistics.power_points = 1;

        let outcome = process_turn(&mut state, "!p", &mut rng);
        assert_eq!(outcome, TurnOutcome::Played(Verdict::Continue));
        assert_eq!(state.statistics.shield_turns, 2);
        assert_eq!(state.statistics.power_points, 0);

        process_turn(&mut state, "zzz", &mut rng);
        assert_eq!(state.statistics.shield_turns, 1);
        assert_eq!(state.statistics.lives_left, 5);

        process_turn(&mut state, "zzz", &mut rng);
        assert_eq!(state.statistics.shield_turns, 0);
        assert_eq!(state.statistics.lives_left, 5);

        process_turn(&mut state, "zzz", &mut rng);
        assert_eq!(state.statistics.shield_turns, 0);
        assert_eq!(state.statistics.lives_left, 4);
    }

    #[test]
    fn test_single_shield_turn() {
        let mut state = new_game(streak_puzzle(), PowerupKind::Shield);
        let mut rng = rng();
        state.statistics.shield_turns = 1;

        process_turn(&mut state, "nope", &mut rng);
        assert_eq!(state.statistics.shield_turns, 0);
        assert_eq!(state.statistics.lives_left, 5);

        process_turn(&mut state, "nope", &mut rng);
        assert_eq!(state.statistics.lives_left, 4);
    }

    #[test]
    fn test_invalid_input_consumes_nothing() {
        let mut state = new_game(streak_puzzle(), PowerupKind::Heal);
        let mut rng = rng();
        process_turn(&mut state, "stare", &mut rng);
        let before = state.statistics.clone();

        for input in ["", "   ", "st4re", "!q"] {
            let outcome = process_turn(&mut state, input, &mut rng);
            assert!(matches!(outcome, TurnOutcome::Rejected(_)), "{:?}", input);
            assert_eq!(state.statistics, before);
            assert_eq!(state.next_message_color, Hue::Yellow);
        }
    }

    #[test]
    fn test_rejected_powerup_consumes_nothing() {
        let mut state = new_game(streak_puzzle(), PowerupKind::Heal);
        let before = state.statistics.clone();
        let outcome = process_turn(&mut state, "!p", &mut rng());
        assert_eq!(outcome, TurnOutcome::Rejected(InputError::NoPowerPoints));
        assert_eq!(state.statistics, before);

        let mut state = new_game(streak_puzzle(), PowerupKind::None);
        state.statistics.power_points = 1;
        let outcome = process_turn(&mut state, "!p", &mut rng());
        assert_eq!(outcome, TurnOutcome::Rejected(InputError::NoPowerup));
        assert_eq!(state.statistics.power_points, 1);
    }

    #[test]
    fn test_shuffle_consumes_nothing() {
        let mut state = new_game(streak_puzzle(), PowerupKind::Heal);
        state.statistics.combo = 2;
        let lives = state.statistics.lives_left;
        let outcome = process_turn(&mut state, "!s", &mut rng());

        assert_eq!(outcome, TurnOutcome::Shuffled);
        assert_eq!(outcome.verdict(), Verdict::Continue);
        assert_eq!(state.statistics.combo, 2);
        assert_eq!(state.statistics.lives_left, lives);
    }

    #[test]
    fn test_combo_earns_power_point() {
        // Red wizard: one power point every 3 correct guesses in a row
        let mut state = new_game(streak_puzzle(), PowerupKind::Heal);
        let mut rng = rng();
        for word in ["stare", "rest"] {
            process_turn(&mut state, word, &mut rng);
        }
        assert_eq!(state.statistics.power_points, 0);

        process_turn(&mut state, "rate", &mut rng);
        assert_eq!(state.statistics.combo, 3);
        assert_eq!(state.statistics.power_points, 1);
        assert!(state.next_message.contains("power point"));

        // a powerup turn does not touch the combo
        process_turn(&mut state, "!p", &mut rng);
        assert_eq!(state.statistics.combo, 3);
        assert_eq!(state.statistics.power_points, 0);
    }

    #[test]
    fn test_miss_resets_combo_before_award() {
        let mut state = new_game(streak_puzzle(), PowerupKind::Heal);
        state.statistics.combo = 2;
        process_turn(&mut state, "zzzz", &mut rng());
        assert_eq!(state.statistics.combo, 0);
        assert_eq!(state.statistics.power_points, 0);
    }

    #[test]
    fn test_win_when_every_word_found() {
        let mut state = new_game(streak_puzzle(), PowerupKind::None);
        let mut rng = rng();
        // the middle word goes first so nothing completes implicitly
        for word in ["streak", "ear", "rat", "rate", "rest", "stare"] {
            assert_eq!(
                process_turn(&mut state, word, &mut rng),
                TurnOutcome::Played(Verdict::Continue)
            );
        }
        assert_eq!(
            process_turn(&mut state, "stark", &mut rng),
            TurnOutcome::Played(Verdict::Win)
        );
        assert_eq!(state.statistics.points as usize, state.found_letter_coords.len());
        assert!(state.hidden_letter_coords.is_empty());
    }

    #[test]
    fn test_loss_when_lives_run_out() {
        let mut state = new_game(streak_puzzle(), PowerupKind::None);
        let mut rng = rng();
        state.statistics.lives_left = 2;
        assert_eq!(process_turn(&mut state, "qq", &mut rng).verdict(), Verdict::Continue);
        assert_eq!(process_turn(&mut state, "qq", &mut rng).verdict(), Verdict::Loss);
    }

    #[test]
    fn test_guessed_words_stay_within_puzzle() {
        let mut state = new_game(streak_puzzle(), PowerupKind::None);
        let mut rng = rng();
        for input in ["stare", "tears", "rat", "ear", "stare", "kate", "stark"] {
            process_turn(&mut state, input, &mut rng);
            assert!(state
                .correctly_guessed_words
                .iter()
                .all(|w| state.words_to_find().contains_key(w)));
            assert!(state.hidden_letter_coords.is_disjoint(&state.found_letter_coords));
        }
    }
}
