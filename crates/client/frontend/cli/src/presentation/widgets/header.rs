//! Header widget with the local player status line.

use client_frontend_core::Session;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::state::{AppMode, AppState};

/// Render the header panel with identity, position and zoom.
pub fn render(frame: &mut Frame, area: Rect, session: &Session, app_state: &AppState) {
    let identity = session.identity();
    let grid = session.grid();

    let position = match session.local_position() {
        Some(pos) => format!("({}, {})", pos.x, pos.y),
        None => "not on map".to_string(),
    };
    let health = session
        .local_player()
        .and_then(|player| Some((player.hp()?, player.max_hp())))
        .map(|(hp, max)| match max {
            Some(max) => format!(" | HP: {hp}/{max}"),
            None => format!(" | HP: {hp}"),
        })
        .unwrap_or_default();
    let mode_text = match app_state.mode {
        AppMode::Normal => "",
        AppMode::Help => " [HELP]",
    };

    let text = vec![Line::from(vec![
        Span::styled(
            identity.display_name.clone(),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(format!(" ({})", identity.uid)),
        Span::raw(" | Pos: "),
        Span::styled(position, Style::default().fg(Color::Yellow)),
        Span::styled(health, Style::default().fg(Color::LightRed)),
        Span::raw(" | Grid: "),
        Span::styled(
            format!("{}x{}", grid.width, grid.height),
            Style::default().fg(Color::LightGreen),
        ),
        Span::raw(format!(
            " | Zoom: {}/{}",
            session.radius(),
            session.max_radius()
        )),
        Span::styled(
            mode_text,
            Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
        ),
    ])];

    let paragraph =
        Paragraph::new(text).block(Block::default().borders(Borders::ALL).title("Lockdown"));

    frame.render_widget(paragraph, area);
}
