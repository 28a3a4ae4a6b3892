//! UI rendering using ratatui
//!
//! Supports multiple screens:
//! - Menu, difficulty, name entry, wizard selection, leaderboard (see `menu`)
//! - Playing: grid, statistics panel, message line and input box
//! - Error: error message display
//!
//! Heart point rounds use the styled theme; everything else renders plain.

use super::menu;
use super::theme::Theme;
use crate::app::{App, AppCoordinator, Screen};
use crate::game::state::{Cell, Verdict};
use crate::game::{Coord, Hue};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph, Wrap},
};
use std::collections::BTreeSet;

/// Rendered for empty cells
pub const EMPTY_SYMBOL: char = '.';
/// Rendered for letters not yet revealed
pub const HIDDEN_SYMBOL: char = '#';

/// Render the appropriate screen based on app state
pub fn render(frame: &mut Frame, coordinator: &AppCoordinator) {
    match &coordinator.screen {
        Screen::Menu { selected } => menu::render_menu(frame, *selected),
        Screen::Difficulty { selected } => menu::render_difficulty(frame, *selected),
        Screen::NameEntry { difficulty, input, error } => {
            menu::render_name_entry(frame, difficulty, input, error.as_deref());
        }
        Screen::WizardSelect { player_name, selected, .. } => {
            menu::render_wizard_select(frame, player_name, *selected);
        }
        Screen::Playing { app } => render_game(frame, app),
        Screen::Leaderboard { scores, streaks, error } => {
            menu::render_leaderboard(frame, scores, streaks, error.as_deref());
        }
        Screen::Error { message } => render_error(frame, message),
    }
}

fn theme_for(app: &App) -> Theme {
    if app.styled() {
        Theme::styled(app.game.wizard.color)
    } else {
        Theme::plain()
    }
}

/// Render the in-game screen
fn render_game(frame: &mut Frame, app: &App) {
    let theme = theme_for(app);
    let area = frame.area();

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(8),    // Grid and statistics
            Constraint::Length(4), // Message
            Constraint::Length(3), // Input
        ])
        .split(area);

    let grid_width = app.difficulty.grid_width as u16 + 2;
    let top = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(grid_width.max(20)), Constraint::Min(30)])
        .split(layout[0]);

    render_grid(frame, top[0], app, &theme);
    render_statistics(frame, top[1], app, &theme);
    render_message(frame, layout[1], app, &theme);
    render_input(frame, layout[2], app, &theme);
}

/// Character shown for one cell. After a loss the missed letters are shown too.
pub fn cell_symbol(cell: Cell, solution: Option<char>, show_solution: bool) -> char {
    match cell {
        Cell::Empty => EMPTY_SYMBOL,
        Cell::Revealed(letter) => letter,
        Cell::Hidden => match solution {
            Some(letter) if show_solution => letter,
            _ => HIDDEN_SYMBOL,
        },
    }
}

/// One styled line per grid row.
pub fn grid_lines(app: &App, theme: &Theme) -> Vec<Line<'static>> {
    let show_solution = app.verdict == Verdict::Loss;
    let highlight: &BTreeSet<Coord> = &app.game.last_guess_coords;
    let puzzle = app.game.puzzle();

    app.game
        .hidden_grid
        .iter()
        .enumerate()
        .map(|(r, row)| {
            let spans: Vec<Span<'static>> = row
                .iter()
                .enumerate()
                .map(|(c, &cell)| {
                    let symbol = cell_symbol(cell, puzzle.grid.get((r, c)), show_solution);
                    let style = match cell {
                        Cell::Empty => theme.hidden(),
                        Cell::Hidden if show_solution => theme.fg(Hue::Red),
                        Cell::Hidden => theme.hidden(),
                        Cell::Revealed(_) if highlight.contains(&(r, c)) => theme.highlight(),
                        Cell::Revealed(_) => theme.letter(),
                    };
                    Span::styled(symbol.to_string(), style)
                })
                .collect();
            Line::from(spans)
        })
        .collect()
}

fn render_grid(frame: &mut Frame, area: Rect, app: &App, theme: &Theme) {
    let title = format!(" {} ", app.difficulty.name);
    let grid = Paragraph::new(grid_lines(app, theme)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(theme.border())
            .title(title),
    );
    frame.render_widget(grid, area);
}

/// Lives as hearts when styled, a number otherwise.
pub fn format_lives(lives: i32, styled: bool) -> String {
    if !styled {
        return lives.to_string();
    }
    if lives <= 0 {
        return "-".to_string();
    }
    vec!["♥"; lives as usize].join(" ")
}

/// Label/value rows for the statistics panel
pub fn statistics_rows(app: &App) -> Vec<(&'static str, String)> {
    let game = &app.game;
    let stats = &game.statistics;
    let mut rows = Vec::new();

    if let Some(name) = &game.player_name {
        rows.push(("Player", name.clone()));
    }
    rows.push(("Wizard", game.wizard.name.to_string()));
    rows.push(("Letters", stats.letters.clone()));
    rows.push(("Lives", format_lives(stats.lives_left, app.styled())));
    rows.push(("Points", stats.points.to_string()));
    rows.push(("Combo", stats.combo.to_string()));
    if game.powerups_enabled() {
        rows.push((
            "Power",
            format!("{} ({})", stats.power_points, game.wizard.powerup.label()),
        ));
    }
    if stats.shield_turns > 0 {
        rows.push(("Shield", stats.shield_turns.to_string()));
    }
    rows.push((
        "Words",
        format!("{}/{}", game.words_found(), game.words_to_find().len()),
    ));
    if app.streak > 0 {
        rows.push(("Streak", app.streak.to_string()));
    }
    if !stats.last_guess.is_empty() {
        rows.push(("Last guess", stats.last_guess.clone()));
    }
    rows
}

fn render_statistics(frame: &mut Frame, area: Rect, app: &App, theme: &Theme) {
    let mut lines: Vec<Line> = statistics_rows(app)
        .into_iter()
        .map(|(label, value)| {
            let value_style = match label {
                "Lives" => theme.fg(Hue::Red),
                "Letters" => theme.accent().bold(),
                _ => theme.letter(),
            };
            Line::from(vec![
                Span::styled(format!("{:<11}", label), theme.hidden()),
                Span::styled(value, value_style),
            ])
        })
        .collect();

    lines.push(Line::from(""));
    let mut hint = String::from("!s shuffle");
    if app.game.powerups_enabled() {
        hint.push_str("  !p powerup");
    }
    lines.push(Line::from(Span::styled(hint, theme.hidden())));

    let panel = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(theme.border())
            .title(" Statistics "),
    );
    frame.render_widget(panel, area);
}

fn render_message(frame: &mut Frame, area: Rect, app: &App, theme: &Theme) {
    let message = Paragraph::new(app.game.next_message.as_str())
        .style(theme.fg(app.game.next_message_color))
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.border())
                .title(" Message "),
        );
    frame.render_widget(message, area);
}

fn render_input(frame: &mut Frame, area: Rect, app: &App, theme: &Theme) {
    let (text, hint) = if app.is_round_over() {
        (String::new(), " Enter continue  Esc menu ")
    } else {
        (format!("> {}_", app.input), " Enter guess  Esc leave ")
    };
    let input = Paragraph::new(text).style(theme.letter()).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(theme.border())
            .title(hint),
    );
    frame.render_widget(input, area);
}

/// Render error screen
fn render_error(frame: &mut Frame, message: &str) {
    let area = frame.area();

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(40),
            Constraint::Length(3),
            Constraint::Length(2),
            Constraint::Percentage(40),
        ])
        .margin(2)
        .split(area);

    let error = Paragraph::new(format!("Error: {}", message))
        .style(Style::default().fg(Color::Red))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(error, layout[1]);

    let hint = Paragraph::new("Press Enter to go back")
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    frame.render_widget(hint, layout[2]);
}
