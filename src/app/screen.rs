//! Application screen state management
//!
//! Handles transitions between the application screens:
//! - Main menu
//! - Difficulty selection
//! - Name entry and wizard selection (heart point mode only)
//! - Playing a round, including the round-over prompt
//! - Leaderboards

use crate::config::Settings;
use crate::game::dictionary::Lexicon;
use crate::game::grid::build_puzzle;
use crate::game::selector::WordSelector;
use crate::game::state::{GameState, Verdict};
use crate::game::{Difficulty, Wizard, DIFFICULTIES, WHITE_WIZARD, WIZARDS};
use crate::stats::StreakTracker;
use crate::storage::streaks::StreakRecord;
use crate::storage::{ScoreEntry, Storage, SCORE_DELIMITER};
use rand::rngs::StdRng;
use std::collections::HashMap;

use super::state::App;

/// Longest accepted player name
pub const MAX_NAME_LEN: usize = 12;

/// Rows shown on the score leaderboard
pub const LEADERBOARD_ROWS: usize = 10;

/// Menu option on the main screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuOption {
    Play,
    Leaderboard,
    Quit,
}

impl MenuOption {
    /// Get all menu options in order
    pub fn all() -> &'static [MenuOption] {
        &[MenuOption::Play, MenuOption::Leaderboard, MenuOption::Quit]
    }

    /// Get the display label for this option
    pub fn label(&self) -> &'static str {
        match self {
            MenuOption::Play => "Play",
            MenuOption::Leaderboard => "Leaderboard",
            MenuOption::Quit => "Quit",
        }
    }
}

/// The current application screen
pub enum Screen {
    /// Main menu
    Menu { selected: usize },
    /// Choosing a difficulty preset
    Difficulty { selected: usize },
    /// Typing the player name
    NameEntry {
        difficulty: &'static Difficulty,
        input: String,
        error: Option<String>,
    },
    /// Choosing a wizard
    WizardSelect {
        difficulty: &'static Difficulty,
        player_name: String,
        selected: usize,
    },
    /// Playing a round (or looking at its result)
    Playing { app: Box<App> },
    /// Score and streak tables
    Leaderboard {
        scores: Vec<ScoreEntry>,
        streaks: Vec<StreakRecord>,
        error: Option<String>,
    },
    /// Something went wrong building a round
    Error { message: String },
}

fn difficulty_index(difficulty: &Difficulty) -> usize {
    DIFFICULTIES
        .iter()
        .position(|d| d.name == difficulty.name)
        .unwrap_or(0)
}

/// Choices that carry over from one round to the next
#[derive(Debug, Clone)]
pub struct Session {
    pub difficulty: &'static Difficulty,
    pub wizard: Wizard,
    pub player_name: Option<String>,
}

/// Main application coordinator
pub struct AppCoordinator {
    /// Current screen
    pub screen: Screen,
    /// Whether the application should quit
    pub should_quit: bool,
    lexicon: Lexicon,
    selectors: HashMap<&'static str, WordSelector>,
    rng: StdRng,
    settings: Settings,
    storage: Option<Storage>,
    session: Option<Session>,
    streak: StreakTracker,
}

impl AppCoordinator {
    /// Create a new app coordinator starting at the menu
    pub fn new(lexicon: Lexicon, settings: Settings, storage: Option<Storage>, rng: StdRng) -> Self {
        Self {
            screen: Screen::Menu { selected: 0 },
            should_quit: false,
            lexicon,
            selectors: HashMap::new(),
            rng,
            settings,
            storage,
            session: None,
            streak: StreakTracker::new(),
        }
    }

    /// Quit the application, closing any open streak first
    pub fn quit(&mut self) {
        self.end_streak();
        self.should_quit = true;
    }

    /// Go back to the main menu
    pub fn go_to_menu(&mut self) {
        self.screen = Screen::Menu { selected: 0 };
    }

    /// Handle list navigation (up)
    pub fn menu_up(&mut self) {
        if let Some((selected, _)) = self.list_cursor() {
            if *selected > 0 {
                *selected -= 1;
            }
        }
    }

    /// Handle list navigation (down)
    pub fn menu_down(&mut self) {
        if let Some((selected, len)) = self.list_cursor() {
            if *selected + 1 < len {
                *selected += 1;
            }
        }
    }

    fn list_cursor(&mut self) -> Option<(&mut usize, usize)> {
        match &mut self.screen {
            Screen::Menu { selected } => Some((selected, MenuOption::all().len())),
            Screen::Difficulty { selected } => Some((selected, DIFFICULTIES.len())),
            Screen::WizardSelect { selected, .. } => Some((selected, WIZARDS.len())),
            _ => None,
        }
    }

    /// Handle a typed character
    pub fn on_char(&mut self, c: char) {
        match &mut self.screen {
            Screen::NameEntry { input, error, .. } => {
                if c == SCORE_DELIMITER {
                    *error = Some(format!("The '{}' character is not allowed.", SCORE_DELIMITER));
                } else if !c.is_control() && input.chars().count() < MAX_NAME_LEN {
                    input.push(c);
                    *error = None;
                }
            }
            Screen::Playing { app } => app.on_char(c),
            _ => {}
        }
    }

    /// Handle backspace
    pub fn on_backspace(&mut self) {
        match &mut self.screen {
            Screen::NameEntry { input, error, .. } => {
                input.pop();
                *error = None;
            }
            Screen::Playing { app } => app.on_backspace(),
            _ => {}
        }
    }

    /// Handle Enter
    pub fn on_enter(&mut self) {
        match &mut self.screen {
            Screen::Menu { selected } => match MenuOption::all()[*selected] {
                MenuOption::Play => {
                    self.screen = Screen::Difficulty {
                        selected: self.preferred_difficulty_index(),
                    }
                }
                MenuOption::Leaderboard => self.open_leaderboard(),
                MenuOption::Quit => self.quit(),
            },
            Screen::Difficulty { selected } => {
                let difficulty = &DIFFICULTIES[*selected];
                if difficulty.heart_point_mode {
                    self.screen = Screen::NameEntry {
                        difficulty,
                        input: self.settings.default_name.clone(),
                        error: None,
                    };
                } else {
                    self.begin_session(Session {
                        difficulty,
                        wizard: WHITE_WIZARD,
                        player_name: None,
                    });
                }
            }
            Screen::NameEntry { difficulty, input, error } => {
                let name = input.trim();
                if name.is_empty() {
                    *error = Some("Enter a name to continue.".to_string());
                } else {
                    self.screen = Screen::WizardSelect {
                        difficulty: *difficulty,
                        player_name: name.to_string(),
                        selected: 0,
                    };
                }
            }
            Screen::WizardSelect { difficulty, player_name, selected } => {
                let session = Session {
                    difficulty: *difficulty,
                    wizard: WIZARDS[*selected],
                    player_name: Some(player_name.clone()),
                };
                self.begin_session(session);
            }
            Screen::Playing { app } => {
                if !app.is_round_over() {
                    let outcome = app.on_submit(&mut self.rng);
                    if outcome.is_some() && app.is_round_over() {
                        let (verdict, points) = (app.verdict, app.points());
                        self.finish_round(verdict, points);
                    }
                } else if app.is_won() {
                    self.start_round();
                } else {
                    self.go_to_menu();
                }
            }
            Screen::Leaderboard { .. } | Screen::Error { .. } => self.go_to_menu(),
        }
    }

    /// Handle Esc: back out one screen, leaving a round ends its streak
    pub fn on_escape(&mut self) {
        match &self.screen {
            Screen::Menu { .. } => self.quit(),
            Screen::Difficulty { .. } => self.go_to_menu(),
            Screen::NameEntry { difficulty, .. } => {
                self.screen = Screen::Difficulty {
                    selected: difficulty_index(difficulty),
                };
            }
            Screen::WizardSelect { difficulty, player_name, .. } => {
                self.screen = Screen::NameEntry {
                    difficulty: *difficulty,
                    input: player_name.clone(),
                    error: None,
                };
            }
            Screen::Playing { app } => {
                if !app.is_round_over() {
                    log::info!("round abandoned with {} points", app.points());
                }
                self.end_streak();
                self.session = None;
                self.go_to_menu();
            }
            Screen::Leaderboard { .. } | Screen::Error { .. } => self.go_to_menu(),
        }
    }

    /// Cursor position the difficulty screen opens on
    fn preferred_difficulty_index(&self) -> usize {
        self.settings
            .preferred_difficulty
            .map(difficulty_index)
            .unwrap_or(0)
    }

    fn begin_session(&mut self, session: Session) {
        if let Some(name) = &session.player_name {
            self.streak.start(name.clone());
        }
        self.session = Some(session);
        self.start_round();
    }

    /// Build a fresh board for the current session and start playing it
    pub fn start_round(&mut self) {
        let Some(session) = self.session.clone() else {
            self.go_to_menu();
            return;
        };
        let difficulty = session.difficulty;
        let lexicon = &self.lexicon;
        let selector = self
            .selectors
            .entry(difficulty.name)
            .or_insert_with(|| WordSelector::new(lexicon, difficulty));

        match build_puzzle(selector, difficulty, &mut self.rng, self.settings.max_attempts) {
            Ok(puzzle) => {
                let game = GameState::new(
                    puzzle,
                    session.wizard,
                    session.player_name.clone(),
                    difficulty.heart_point_mode,
                    &mut self.rng,
                );
                let app = App::new(game, difficulty, self.streak.wins());
                self.screen = Screen::Playing { app: Box::new(app) };
            }
            Err(e) => {
                log::error!("could not start a {} round: {}", difficulty.name, e);
                self.end_streak();
                self.session = None;
                self.screen = Screen::Error {
                    message: e.to_string(),
                };
            }
        }
    }

    fn finish_round(&mut self, verdict: Verdict, points: u32) {
        let Some(session) = &self.session else {
            return;
        };
        log::info!("{} round finished: {:?}, {} points", session.difficulty.name, verdict, points);
        if !session.difficulty.heart_point_mode {
            return;
        }

        if let (Some(name), Some(storage)) = (&session.player_name, &self.storage) {
            if let Err(e) = storage.append_score(&ScoreEntry::new(name.clone(), points as i64)) {
                log::warn!("failed to record score: {}", e);
            }
        }
        match verdict {
            Verdict::Win => self.streak.record_win(points),
            Verdict::Loss => self.end_streak(),
            Verdict::Continue => {}
        }
    }

    /// Close the running streak and merge it into the streak leaderboard
    fn end_streak(&mut self) {
        let Some(record) = self.streak.take_record() else {
            return;
        };
        log::info!(
            "{} ended a streak of {} wins ({} points)",
            record.player_name,
            record.streak_count,
            record.total_points_in_streak
        );
        if let Some(storage) = &self.storage {
            if let Err(e) = storage.record_streak(record) {
                log::warn!("failed to record streak: {}", e);
            }
        }
    }

    fn open_leaderboard(&mut self) {
        let Some(storage) = &self.storage else {
            self.screen = Screen::Leaderboard {
                scores: Vec::new(),
                streaks: Vec::new(),
                error: Some("Leaderboards are unavailable.".to_string()),
            };
            return;
        };

        let mut error = None;
        let scores = storage.top_scores(LEADERBOARD_ROWS).unwrap_or_else(|e| {
            log::warn!("failed to load scores: {}", e);
            error = Some("Could not read the score leaderboard.".to_string());
            Vec::new()
        });
        let streaks = storage.load_streaks().unwrap_or_else(|e| {
            log::warn!("failed to load streaks: {}", e);
            error = Some("Could not read the streak leaderboard.".to_string());
            Vec::new()
        });
        self.screen = Screen::Leaderboard {
            scores,
            streaks,
            error,
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{difficulty_by_name, PowerupKind, NO_HEART_POINTS};
    use crate::storage::scratch_dir;
    use rand::SeedableRng;
    use std::fs;
    use std::path::PathBuf;

    fn lexicon() -> Lexicon {
        Lexicon::from_words([
            "stare", "rates", "tears", "aster", "rate", "tear", "star", "rats", "arts", "tsar",
            "tare", "tar", "rat", "art", "sat", "ear", "era", "are", "tea", "eat", "ate", "sea",
            "set", "rest", "east", "seat", "teas",
        ])
    }

    fn coordinator(dir: &PathBuf) -> AppCoordinator {
        let settings = Settings {
            data_dir: dir.clone(),
            seed: Some(11),
            max_attempts: 500,
            default_name: "tester".to_string(),
            preferred_difficulty: None,
        };
        let storage = Storage::open(dir).ok();
        AppCoordinator::new(lexicon(), settings, storage, StdRng::seed_from_u64(11))
    }

    fn select_difficulty(app: &mut AppCoordinator, name: &str) {
        app.on_enter(); // Play
        let index = DIFFICULTIES.iter().position(|d| d.name == name).unwrap();
        for _ in 0..index {
            app.menu_down();
        }
        app.on_enter();
    }

    fn playing(app: &mut AppCoordinator) -> &mut App {
        match &mut app.screen {
            Screen::Playing { app } => app.as_mut(),
            _ => panic!("not playing"),
        }
    }

    /// Guess every word that is still hidden until the round is won.
    fn win_round(app: &mut AppCoordinator) {
        let words: Vec<String> = playing(app).game.words_to_find().keys().cloned().collect();
        for word in words {
            if playing(app).game.correctly_guessed_words.contains(&word) {
                continue;
            }
            for c in word.chars() {
                app.on_char(c);
            }
            app.on_enter();
        }
        assert!(playing(app).is_won());
    }

    #[test]
    fn test_menu_navigation_is_clamped() {
        let dir = scratch_dir("menu-nav");
        let mut app = coordinator(&dir);
        app.menu_up();
        assert!(matches!(app.screen, Screen::Menu { selected: 0 }));
        for _ in 0..10 {
            app.menu_down();
        }
        assert!(matches!(app.screen, Screen::Menu { selected: 2 }));
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_preferred_difficulty_is_preselected() {
        let dir = scratch_dir("preferred-difficulty");
        let mut app = coordinator(&dir);
        app.settings.preferred_difficulty = difficulty_by_name("Arcane Codex");

        app.on_enter(); // Play
        assert!(matches!(app.screen, Screen::Difficulty { selected: 3 }));

        // backing out of name entry returns to the chosen preset
        app.menu_up();
        app.on_enter();
        assert!(matches!(app.screen, Screen::NameEntry { .. }));
        app.on_escape();
        assert!(matches!(app.screen, Screen::Difficulty { selected: 2 }));
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_quit_from_menu() {
        let dir = scratch_dir("menu-quit");
        let mut app = coordinator(&dir);
        app.on_escape();
        assert!(app.should_quit);
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_name_entry_rejects_delimiter() {
        let dir = scratch_dir("name-entry");
        let mut app = coordinator(&dir);
        select_difficulty(&mut app, "Simple Scroll");

        app.on_char('|');
        match &app.screen {
            Screen::NameEntry { input, error, .. } => {
                assert_eq!(input, "tester");
                assert!(error.is_some());
            }
            _ => panic!("expected name entry"),
        }

        for _ in 0..6 {
            app.on_backspace();
        }
        app.on_enter();
        assert!(matches!(&app.screen, Screen::NameEntry { error: Some(_), .. }));
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_heart_point_flow_reaches_wizard_select() {
        let dir = scratch_dir("hp-flow");
        let mut app = coordinator(&dir);
        select_difficulty(&mut app, "Simple Scroll");
        app.on_enter(); // keep the prefilled name

        match &app.screen {
            Screen::WizardSelect { player_name, .. } => assert_eq!(player_name, "tester"),
            _ => panic!("expected wizard selection"),
        }

        app.menu_down();
        app.on_enter();
        let session = app.session.as_ref().unwrap();
        assert_eq!(session.wizard.powerup, PowerupKind::Heal);
        assert_eq!(session.player_name.as_deref(), Some("tester"));
        assert!(matches!(app.screen, Screen::Playing { .. }));
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_no_heart_points_skips_name_and_wizard() {
        let dir = scratch_dir("nhp-flow");
        let mut app = coordinator(&dir);
        select_difficulty(&mut app, NO_HEART_POINTS);

        let session = app.session.as_ref().unwrap();
        assert_eq!(session.wizard, WHITE_WIZARD);
        assert_eq!(session.player_name, None);
        let round = playing(&mut app);
        assert!(!round.styled());
        assert!(!round.game.powerups_enabled());

        win_round(&mut app);
        let storage = Storage::open(&dir).unwrap();
        assert!(storage.load_scores().unwrap().is_empty());
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_win_records_score_and_streak() {
        let dir = scratch_dir("win-streak");
        let mut app = coordinator(&dir);
        select_difficulty(&mut app, "Simple Scroll");
        app.on_enter(); // name
        app.on_enter(); // White Wizard

        win_round(&mut app);
        let points = playing(&mut app).points();
        assert_eq!(app.streak.wins(), 1);

        let storage = Storage::open(&dir).unwrap();
        assert_eq!(
            storage.load_scores().unwrap(),
            vec![ScoreEntry::new("tester", points as i64)]
        );

        // Enter starts the next round of the same streak
        app.on_enter();
        assert_eq!(playing(&mut app).streak, 1);
        assert!(!playing(&mut app).is_round_over());

        // leaving ends it
        app.on_escape();
        assert!(matches!(app.screen, Screen::Menu { .. }));
        let streaks = storage.load_streaks().unwrap();
        assert_eq!(streaks.len(), 1);
        assert_eq!(streaks[0].player_name, "tester");
        assert_eq!(streaks[0].streak_count, 1);
        assert_eq!(streaks[0].total_points_in_streak, points);
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_loss_returns_to_menu() {
        let dir = scratch_dir("loss");
        let mut app = coordinator(&dir);
        select_difficulty(&mut app, "Simple Scroll");
        app.on_enter();
        app.on_enter();

        playing(&mut app).game.statistics.lives_left = 1;
        for c in "zzz".chars() {
            app.on_char(c);
        }
        app.on_enter();
        assert_eq!(playing(&mut app).verdict, Verdict::Loss);

        app.on_enter();
        assert!(matches!(app.screen, Screen::Menu { .. }));
        // a loss without wins records no streak
        let storage = Storage::open(&dir).unwrap();
        assert!(storage.load_streaks().unwrap().is_empty());
        assert_eq!(storage.load_scores().unwrap().len(), 1);
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_unbuildable_board_shows_error() {
        let dir = scratch_dir("no-board");
        let settings = Settings {
            data_dir: dir.clone(),
            seed: None,
            max_attempts: 5,
            default_name: String::new(),
            preferred_difficulty: None,
        };
        let mut app = AppCoordinator::new(
            Lexicon::from_words(["lonely"]),
            settings,
            None,
            StdRng::seed_from_u64(1),
        );
        select_difficulty(&mut app, NO_HEART_POINTS);
        assert!(matches!(app.screen, Screen::Error { .. }));
        app.on_enter();
        assert!(matches!(app.screen, Screen::Menu { .. }));
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_leaderboard_screen_lists_scores() {
        let dir = scratch_dir("leaderboard-screen");
        let mut app = coordinator(&dir);
        let storage = Storage::open(&dir).unwrap();
        storage.append_score(&ScoreEntry::new("amy", 3)).unwrap();
        storage.append_score(&ScoreEntry::new("ben", 9)).unwrap();

        app.menu_down();
        app.on_enter();
        match &app.screen {
            Screen::Leaderboard { scores, error, .. } => {
                assert_eq!(scores[0], ScoreEntry::new("ben", 9));
                assert!(error.is_none());
            }
            _ => panic!("expected leaderboard"),
        }
        let _ = fs::remove_dir_all(&dir);
    }
}
