//! Worderly Place - a terminal word puzzle
//!
//! Find every word hidden on the board using the letters of the middle word.

mod app;
mod config;
mod error;
mod game;
mod stats;
mod storage;
mod tui;

use app::AppCoordinator;
use clap::Parser;
use config::{SettingWarning, Settings};
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use error::GameError;
use game::dictionary::Lexicon;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use storage::Storage;
use tui::Tui;

#[derive(Parser, Debug)]
#[command(name = "worderly", version, about = "Find the words hidden around the middle word")]
struct Cli {
    /// Lexicon file, one word per line
    lexicon: PathBuf,
}

fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(&cli) {
        eprintln!("worderly: {}", e);
        std::process::exit(1);
    }
}

/// Send log records to a file; the terminal belongs to the UI.
fn init_logging(path: &Path) {
    let file = match OpenOptions::new().create(true).append(true).open(path) {
        Ok(file) => file,
        Err(e) => {
            eprintln!("worderly: logging disabled, cannot open {}: {}", path.display(), e);
            return;
        }
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
}

/// Settings are read before the logger exists; report what they rejected now.
fn report_setting_warnings(warnings: &[SettingWarning]) {
    for warning in warnings {
        log::warn!("{}", warning);
        eprintln!("worderly: {}", warning);
    }
}

fn load_lexicon(path: &Path) -> Result<Lexicon, GameError> {
    let lexicon = Lexicon::from_file(path)?;
    if lexicon.is_empty() {
        return Err(GameError::EmptyLexicon {
            path: path.to_path_buf(),
        });
    }
    Ok(lexicon)
}

fn run(cli: &Cli) -> Result<(), GameError> {
    let (settings, warnings) = Settings::from_env();
    match fs::create_dir_all(&settings.data_dir) {
        Ok(()) => init_logging(&settings.log_path()),
        Err(e) => eprintln!(
            "worderly: logging disabled, cannot create {}: {}",
            settings.data_dir.display(),
            e
        ),
    }
    report_setting_warnings(&warnings);

    let lexicon = load_lexicon(&cli.lexicon)?;

    // Leaderboards are optional; the game still runs without them
    let storage = match Storage::open(&settings.data_dir) {
        Ok(storage) => Some(storage),
        Err(e) => {
            log::warn!("leaderboards disabled: {}", e);
            None
        }
    };

    let rng = match settings.seed {
        Some(seed) => {
            log::info!("using fixed seed {}", seed);
            StdRng::seed_from_u64(seed)
        }
        None => StdRng::from_os_rng(),
    };

    let mut coordinator = AppCoordinator::new(lexicon, settings, storage, rng);

    let mut terminal = Tui::new()?;
    terminal.enter()?;

    loop {
        terminal.draw(|frame| tui::render(frame, &coordinator))?;

        if let Event::Key(key) = event::read()? {
            // Only handle key press events (not release)
            if key.kind == KeyEventKind::Press {
                match key.code {
                    KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                        coordinator.quit();
                    }
                    KeyCode::Up => coordinator.menu_up(),
                    KeyCode::Down => coordinator.menu_down(),
                    KeyCode::Enter => coordinator.on_enter(),
                    KeyCode::Esc => coordinator.on_escape(),
                    KeyCode::Backspace => coordinator.on_backspace(),
                    KeyCode::Char(c) => coordinator.on_char(c),
                    _ => {}
                }
            }
        }

        if coordinator.should_quit {
            break;
        }
    }

    terminal.exit()?;
    log::info!("goodbye");
    Ok(())
}
