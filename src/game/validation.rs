//! Turn input validation
//!
//! Classifies a raw line of input before it reaches the turn processor:
//! - `!p` casts the wizard's powerup
//! - `!s` reshuffles the letters
//! - anything else must be a lowercase alphabetic guess

use super::state::GameState;

/// Input that casts the wizard's powerup
pub const POWERUP_COMMAND: &str = "!p";
/// Input that reshuffles the letter display
pub const SHUFFLE_COMMAND: &str = "!s";

/// A well-formed turn input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Guess(String),
    Powerup,
    Shuffle,
}

/// Why an input was refused. None of these consume a turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    /// Nothing was typed
    Empty,
    /// The guess contains something other than letters
    NotAlphabetic { input: String },
    /// Heart point mode is off
    PowerupsDisabled,
    /// The wizard has no powerup to cast
    NoPowerup,
    /// No power points to spend
    NoPowerPoints,
}

impl InputError {
    /// Returns a user-facing message
    pub fn message(&self) -> String {
        match self {
            InputError::Empty => "Type a word to guess.".to_string(),
            InputError::NotAlphabetic { input } => {
                format!("'{}' is not a word. Use letters only.", input)
            }
            InputError::PowerupsDisabled => "Powerups are off in this mode.".to_string(),
            InputError::NoPowerup => "Your wizard has no powerup.".to_string(),
            InputError::NoPowerPoints => {
                "No power points yet. Build a combo to earn one.".to_string()
            }
        }
    }
}

/// Normalize and classify a line of input.
pub fn classify(input: &str) -> Result<Command, InputError> {
    let normalized = input.trim().to_lowercase();

    if normalized.is_empty() {
        return Err(InputError::Empty);
    }
    if normalized == POWERUP_COMMAND {
        return Ok(Command::Powerup);
    }
    if normalized == SHUFFLE_COMMAND {
        return Ok(Command::Shuffle);
    }
    if !normalized.chars().all(|c| c.is_ascii_lowercase()) {
        return Err(InputError::NotAlphabetic { input: normalized });
    }

    Ok(Command::Guess(normalized))
}

/// Check that the powerup may be cast right now
///
/// Checks in order:
/// 1. Heart point mode is on
/// 2. The wizard has a powerup
/// 3. At least one power point is banked
pub fn check_powerup(state: &GameState) -> Result<(), InputError> {
    if !state.heart_point_mode {
        return Err(InputError::PowerupsDisabled);
    }
    if !state.wizard.has_powerup() {
        return Err(InputError::NoPowerup);
    }
    if state.statistics.power_points == 0 {
        return Err(InputError::NoPowerPoints);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::state::fixtures::{hat_puzzle, new_game};
    use crate::game::PowerupKind;

    #[test]
    fn test_guess_is_trimmed_and_lowercased() {
        assert_eq!(classify("  Stare \n"), Ok(Command::Guess("stare".to_string())));
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(classify(""), Err(InputError::Empty));
        assert_eq!(classify("   "), Err(InputError::Empty));
    }

    #[test]
    fn test_non_alphabetic_input() {
        assert!(matches!(
            classify("rat5"),
            Err(InputError::NotAlphabetic { input }) if input == "rat5"
        ));
        assert!(matches!(classify("two words"), Err(InputError::NotAlphabetic { .. })));
        assert!(matches!(classify("!x"), Err(InputError::NotAlphabetic { .. })));
        assert!(matches!(classify("café"), Err(InputError::NotAlphabetic { .. })));
    }

    #[test]
    fn test_commands() {
        assert_eq!(classify("!p"), Ok(Command::Powerup));
        assert_eq!(classify(" !P "), Ok(Command::Powerup));
        assert_eq!(classify("!s"), Ok(Command::Shuffle));
    }

    #[test]
    fn test_powerup_guards() {
        let mut state = new_game(hat_puzzle(), PowerupKind::Heal);
        assert_eq!(check_powerup(&state), Err(InputError::NoPowerPoints));

        state.statistics.power_points = 1;
        assert_eq!(check_powerup(&state), Ok(()));

        state.heart_point_mode = false;
        assert_eq!(check_powerup(&state), Err(InputError::PowerupsDisabled));

        let mut state = new_game(hat_puzzle(), PowerupKind::None);
        state.statistics.power_points = 3;
        assert_eq!(check_powerup(&state), Err(InputError::NoPowerup));
    }

    #[test]
    fn test_every_error_has_a_message() {
        for error in [
            InputError::Empty,
            InputError::NotAlphabetic { input: "a1".into() },
            InputError::PowerupsDisabled,
            InputError::NoPowerup,
            InputError::NoPowerPoints,
        ] {
            assert!(!error.message().is_empty());
        }
    }
}
