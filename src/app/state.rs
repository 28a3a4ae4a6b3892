//! State of the round being played

use crate::game::arbitrator::{process_turn, TurnOutcome};
use crate::game::state::{GameState, Verdict};
use crate::game::{Difficulty, Hue};
use rand::Rng;

/// Longest line the input box accepts
pub const MAX_INPUT_LEN: usize = 24;

/// One round: the game state plus the line being typed.
pub struct App {
    pub game: GameState,
    pub difficulty: &'static Difficulty,
    /// Current user input
    pub input: String,
    /// Set once the round is won or lost
    pub verdict: Verdict,
    /// Rounds won before this one in the current streak
    pub streak: u32,
}

impl App {
    pub fn new(game: GameState, difficulty: &'static Difficulty, streak: u32) -> Self {
        Self {
            game,
            difficulty,
            input: String::new(),
            verdict: Verdict::Continue,
            streak,
        }
    }

    /// Whether the round has been decided (input is locked)
    pub fn is_round_over(&self) -> bool {
        self.verdict != Verdict::Continue
    }

    pub fn is_won(&self) -> bool {
        self.verdict == Verdict::Win
    }

    pub fn points(&self) -> u32 {
        self.game.statistics.points
    }

    /// Styled rendering is reserved for heart point mode.
    pub fn styled(&self) -> bool {
        self.game.heart_point_mode
    }

    /// Handle character input (locked when round is over)
    pub fn on_char(&mut self, c: char) {
        if self.is_round_over() || c.is_control() || self.input.chars().count() >= MAX_INPUT_LEN {
            return;
        }
        self.input.push(c);
    }

    /// Handle backspace (locked when round is over)
    pub fn on_backspace(&mut self) {
        if self.is_round_over() {
            return;
        }
        self.input.pop();
    }

    /// Submit the input line as one turn (locked when round is over).
    pub fn on_submit<R: Rng>(&mut self, rng: &mut R) -> Option<TurnOutcome> {
        if self.is_round_over() {
            return None;
        }
        let line = std::mem::take(&mut self.input);
        let outcome = process_turn(&mut self.game, &line, rng);
        self.verdict = outcome.verdict();
        match self.verdict {
            Verdict::Win => self
                .game
                .next_message
                .push_str(" Every word found! Press Enter for the next round."),
            Verdict::Loss => self
                .game
                .set_message("Out of lives! Press Enter to return to the menu.", Hue::Red),
            Verdict::Continue => {}
        }
        Some(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::state::fixtures::{hat_puzzle, new_game, streak_puzzle};
    use crate::game::{PowerupKind, DIFFICULTIES};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn app(puzzle: crate::game::grid::Puzzle) -> App {
        App::new(new_game(puzzle, PowerupKind::None), &DIFFICULTIES[0], 0)
    }

    fn type_word(app: &mut App, word: &str) {
        for c in word.chars() {
            app.on_char(c);
        }
    }

    #[test]
    fn test_typing_and_backspace() {
        let mut app = app(streak_puzzle());
        type_word(&mut app, "stax");
        app.on_backspace();
        type_word(&mut app, "re");
        assert_eq!(app.input, "stare");
    }

    #[test]
    fn test_input_length_capped() {
        let mut app = app(streak_puzzle());
        type_word(&mut app, &"a".repeat(MAX_INPUT_LEN + 5));
        assert_eq!(app.input.len(), MAX_INPUT_LEN);
    }

    #[test]
    fn test_submit_clears_input_and_plays_turn() {
        let mut app = app(streak_puzzle());
        let mut rng = StdRng::seed_from_u64(3);
        type_word(&mut app, "Stare");
        let outcome = app.on_submit(&mut rng);

        assert_eq!(outcome, Some(TurnOutcome::Played(Verdict::Continue)));
        assert!(app.input.is_empty());
        assert_eq!(app.points(), 5);
        assert!(!app.is_round_over());
    }

    #[test]
    fn test_empty_submit_is_rejected_inline() {
        let mut app = app(streak_puzzle());
        let mut rng = StdRng::seed_from_u64(3);
        let outcome = app.on_submit(&mut rng);
        assert!(matches!(outcome, Some(TurnOutcome::Rejected(_))));
        assert_eq!(app.game.statistics.lives_left, 5);
    }

    #[test]
    fn test_win_locks_input() {
        let mut app = app(hat_puzzle());
        let mut rng = StdRng::seed_from_u64(3);
        for word in ["hats", "hat"] {
            type_word(&mut app, word);
            app.on_submit(&mut rng);
        }
        assert!(app.is_won());
        assert!(app.is_round_over());

        type_word(&mut app, "more");
        assert!(app.input.is_empty());
        assert_eq!(app.on_submit(&mut rng), None);
    }

    #[test]
    fn test_loss_ends_round() {
        let mut app = app(hat_puzzle());
        let mut rng = StdRng::seed_from_u64(3);
        app.game.statistics.lives_left = 1;
        type_word(&mut app, "nope");
        app.on_submit(&mut rng);
        assert_eq!(app.verdict, Verdict::Loss);
        assert!(app.game.next_message.contains("Out of lives"));
    }
}
