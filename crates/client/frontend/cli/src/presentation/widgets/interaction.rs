//! Selection panel: what is selected, its health, and what shares the
//! local tile.

use client_frontend_core::{Interaction, Session};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
};

use crate::presentation::{theme::RatatuiTheme, widgets::map::tile_entities};

const GAUGE_HEIGHT: u16 = 3;

pub fn render(frame: &mut Frame, area: Rect, session: &Session, theme: &RatatuiTheme) {
    let hp_ratio = session.selected_hp_ratio();

    let (details_area, gauge_area) = if hp_ratio.is_some() && area.height > GAUGE_HEIGHT * 2 {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(GAUGE_HEIGHT)])
            .split(area);
        (chunks[0], Some(chunks[1]))
    } else {
        (area, None)
    };

    let mut lines = selection_lines(session);
    lines.push(Line::from(""));
    lines.extend(local_tile_lines(session, theme));

    let paragraph =
        Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title("Selection"));
    frame.render_widget(paragraph, details_area);

    if let (Some(ratio), Some(gauge_area)) = (hp_ratio, gauge_area) {
        let gauge = Gauge::default()
            .block(Block::default().borders(Borders::ALL).title("HP"))
            .gauge_style(theme.health(ratio))
            .ratio(f64::from(ratio));
        frame.render_widget(gauge, gauge_area);
    }
}

fn label(text: &str) -> Span<'static> {
    Span::styled(text.to_string(), Style::default().fg(Color::White))
}

fn selection_lines(session: &Session) -> Vec<Line<'static>> {
    let selection = session.selection();
    let heading = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD);

    let mut lines = vec![Line::from(vec![
        label("Selected: "),
        Span::styled(selection.kind().to_string(), heading),
    ])];

    match selection {
        Interaction::None => {}
        Interaction::Tile { position } => {
            lines.push(Line::from(vec![
                label("Tile: "),
                Span::raw(format!("({}, {})", position.x, position.y)),
            ]));
            if let Some(code) = session.terrain_at(*position) {
                lines.push(Line::from(vec![label("Terrain: "), Span::raw(code.to_string())]));
            }
        }
        Interaction::Entity { position, .. } => {
            if let Some(entity) = session.selected_entity() {
                lines.push(Line::from(vec![label("Name: "), Span::raw(entity.label().to_string())]));
                lines.push(Line::from(vec![label("Kind: "), Span::raw(entity.kind.clone())]));
                if let Some(hp) = entity.hp() {
                    let max = entity
                        .max_hp()
                        .map(|max| format!("/{max}"))
                        .unwrap_or_default();
                    lines.push(Line::from(vec![label("HP: "), Span::raw(format!("{hp}{max}"))]));
                }
                if entity.downed == Some(true) {
                    lines.push(Line::from(Span::styled(
                        "Downed",
                        Style::default().fg(Color::LightRed),
                    )));
                }
            }
            lines.push(Line::from(vec![
                label("At: "),
                Span::raw(format!("({}, {})", position.x, position.y)),
            ]));
        }
    }

    lines
}

/// Numbered list matching the 1-9 slot keys.
fn local_tile_lines(session: &Session, theme: &RatatuiTheme) -> Vec<Line<'static>> {
    let Some(local) = session.local_position() else {
        return vec![Line::from(label("Here: unknown"))];
    };

    let uid = session.identity().uid.as_str();
    let entities = tile_entities(session, local);
    if entities.is_empty() {
        return vec![Line::from(label("Here: nothing"))];
    }

    let mut lines = vec![Line::from(label("Here:"))];
    for (slot, entity) in entities.iter().enumerate().take(9) {
        let (glyph, style) = theme.entity_glyph(entity, uid);
        lines.push(Line::from(vec![
            Span::raw(format!(" {} ", slot + 1)),
            Span::styled(glyph.to_string(), style),
            Span::raw(format!(" {}", entity.label())),
        ]));
    }
    lines
}
