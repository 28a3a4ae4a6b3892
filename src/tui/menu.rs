//! Menu screens: main menu, difficulty, name entry, wizard selection, leaderboards
//!
//! Layout of the wizard selection screen:
//! ┌──────────────┬──────────────────────────────────┐
//! │  Wizards     │  art                             │
//! │ > White      │                                  │
//! │   Red        │  lives, combo, powerup           │
//! │   ...        │  description                     │
//! └──────────────┴──────────────────────────────────┘

use super::theme::hue_color;
use crate::app::MenuOption;
use crate::game::{Difficulty, Wizard, DIFFICULTIES, WIZARDS};
use crate::storage::streaks::StreakRecord;
use crate::storage::ScoreEntry;
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, List, ListItem, Paragraph, Row, Table},
};

const LOGO: &str = r#"
__        __            _           _
\ \      / /__  _ __ __| | ___ _ __| |_   _
 \ \ /\ / / _ \| '__/ _` |/ _ \ '__| | | | |
  \ V  V / (_) | | | (_| |  __/ |  | | |_| |
   \_/\_/ \___/|_|  \__,_|\___|_|  |_|\__, |
                                      |___/
"#;

fn selectable_items<'a>(labels: impl Iterator<Item = String>, selected: usize) -> Vec<ListItem<'a>> {
    labels
        .enumerate()
        .map(|(i, label)| {
            let style = if i == selected {
                Style::default().fg(Color::Yellow).bold()
            } else {
                Style::default().fg(Color::White)
            };
            let prefix = if i == selected { "> " } else { "  " };
            ListItem::new(format!("{}{}", prefix, label)).style(style)
        })
        .collect()
}

fn footer(frame: &mut Frame, area: Rect, text: &str) {
    let footer = Paragraph::new(text.to_string())
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    frame.render_widget(footer, area);
}

/// Render the main menu
pub fn render_menu(frame: &mut Frame, selected: usize) {
    let area = frame.area();

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(8), // Logo
            Constraint::Length(1), // Spacer
            Constraint::Min(4),    // Menu options
            Constraint::Length(2), // Footer
        ])
        .margin(2)
        .split(area);

    let logo = Paragraph::new(LOGO)
        .style(Style::default().fg(Color::Yellow).bold())
        .alignment(Alignment::Center);
    frame.render_widget(logo, layout[0]);

    let items = selectable_items(
        MenuOption::all().iter().map(|opt| opt.label().to_string()),
        selected,
    );
    frame.render_widget(List::new(items).block(Block::default()), layout[2]);

    footer(frame, layout[3], "↑↓ Navigate  Enter Select  Esc Quit");
}

/// One-line summary of a preset
pub fn describe_difficulty(difficulty: &Difficulty) -> String {
    format!(
        "{:<22} {}x{} board, {}-letter middle word{}",
        difficulty.name,
        difficulty.grid_height,
        difficulty.grid_width,
        difficulty.max_word_length,
        if difficulty.heart_point_mode {
            ""
        } else {
            ", no wizards"
        }
    )
}

/// Render the difficulty list
pub fn render_difficulty(frame: &mut Frame, selected: usize) {
    let area = frame.area();

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(8),    // Presets
            Constraint::Length(2), // Footer
        ])
        .margin(1)
        .split(area);

    let header = Paragraph::new("Choose a Difficulty")
        .style(Style::default().fg(Color::Cyan).bold())
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(header, layout[0]);

    let items = selectable_items(DIFFICULTIES.iter().map(describe_difficulty), selected);
    frame.render_widget(
        List::new(items).block(Block::default().borders(Borders::ALL).title("Tomes")),
        layout[1],
    );

    footer(frame, layout[2], "↑↓ Select  Enter Choose  Esc Back");
}

/// Render the name entry prompt
pub fn render_name_entry(frame: &mut Frame, difficulty: &Difficulty, input: &str, error: Option<&str>) {
    let area = frame.area();

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(30),
            Constraint::Length(2), // Difficulty
            Constraint::Length(3), // Input
            Constraint::Length(2), // Error
            Constraint::Min(0),
            Constraint::Length(2), // Footer
        ])
        .margin(2)
        .split(area);

    let title = Paragraph::new(format!("{}: who dares enter?", difficulty.name))
        .style(Style::default().fg(Color::Cyan).bold())
        .alignment(Alignment::Center);
    frame.render_widget(title, layout[1]);

    let input = Paragraph::new(format!("{}_", input))
        .style(Style::default().fg(Color::White))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Name"));
    frame.render_widget(input, layout[2]);

    if let Some(error) = error {
        let error = Paragraph::new(error.to_string())
            .style(Style::default().fg(Color::Red))
            .alignment(Alignment::Center);
        frame.render_widget(error, layout[3]);
    }

    footer(frame, layout[5], "Enter Continue  Esc Back");
}

/// Stat lines shown under a wizard's art
pub fn wizard_card(wizard: &Wizard) -> Vec<String> {
    let combo = match wizard.combo_requirement {
        Some(n) => format!("power point every {} correct in a row", n),
        None => "no power points".to_string(),
    };
    vec![
        format!("Lives:   {}", wizard.starting_lives),
        format!("Combo:   {}", combo),
        format!("Powerup: {}", wizard.powerup.label()),
        String::new(),
        wizard.description.to_string(),
    ]
}

/// Render the wizard roster with the highlighted wizard's art
pub fn render_wizard_select(frame: &mut Frame, player_name: &str, selected: usize) {
    let area = frame.area();

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(12),   // Roster and card
            Constraint::Length(2), // Footer
        ])
        .margin(1)
        .split(area);

    let header = Paragraph::new(format!("Choose your wizard, {}", player_name))
        .style(Style::default().fg(Color::Cyan).bold())
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(header, layout[0]);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(20), Constraint::Min(30)])
        .split(layout[1]);

    let items = selectable_items(WIZARDS.iter().map(|w| w.name.to_string()), selected);
    frame.render_widget(
        List::new(items).block(Block::default().borders(Borders::ALL).title("Wizards")),
        columns[0],
    );

    let wizard = &WIZARDS[selected.min(WIZARDS.len() - 1)];
    let color = hue_color(wizard.color);
    let mut lines: Vec<Line> = wizard
        .art
        .lines()
        .map(|l| Line::styled(l.to_string(), Style::default().fg(color)))
        .collect();
    lines.extend(wizard_card(wizard).into_iter().map(Line::from));
    let card = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(color))
            .title(wizard.name),
    );
    frame.render_widget(card, columns[1]);

    footer(frame, layout[2], "↑↓ Select  Enter Play  Esc Back");
}

/// Render the score and streak tables
pub fn render_leaderboard(
    frame: &mut Frame,
    scores: &[ScoreEntry],
    streaks: &[StreakRecord],
    error: Option<&str>,
) {
    let area = frame.area();

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(8),    // Tables
            Constraint::Length(1), // Error
            Constraint::Length(2), // Footer
        ])
        .margin(1)
        .split(area);

    let header = Paragraph::new("Leaderboard")
        .style(Style::default().fg(Color::Cyan).bold())
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(header, layout[0]);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(layout[1]);

    let score_rows = scores.iter().enumerate().map(|(i, entry)| {
        Row::new(vec![
            format!("{}.", i + 1),
            entry.name.clone(),
            entry.points.to_string(),
        ])
    });
    let score_table = Table::new(
        score_rows,
        [Constraint::Length(4), Constraint::Min(12), Constraint::Length(8)],
    )
    .header(Row::new(vec!["#", "Name", "Points"]).style(Style::default().fg(Color::Yellow)))
    .block(Block::default().borders(Borders::ALL).title("Top Scores"));
    frame.render_widget(score_table, columns[0]);

    let streak_rows = streaks.iter().enumerate().map(|(i, record)| {
        Row::new(vec![
            format!("{}.", i + 1),
            record.player_name.clone(),
            record.streak_count.to_string(),
            record.total_points_in_streak.to_string(),
        ])
    });
    let streak_table = Table::new(
        streak_rows,
        [
            Constraint::Length(4),
            Constraint::Min(12),
            Constraint::Length(7),
            Constraint::Length(8),
        ],
    )
    .header(Row::new(vec!["#", "Name", "Wins", "Points"]).style(Style::default().fg(Color::Yellow)))
    .block(Block::default().borders(Borders::ALL).title("Winning Streaks"));
    frame.render_widget(streak_table, columns[1]);

    if let Some(error) = error {
        let error = Paragraph::new(error.to_string())
            .style(Style::default().fg(Color::Red))
            .alignment(Alignment::Center);
        frame.render_widget(error, layout[2]);
    }

    footer(frame, layout[3], "Enter/Esc Back");
}
