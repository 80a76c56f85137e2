//! Ratatui styling for map glyphs, terrain, messages and gauges.

use client_frontend_core::MessageKind;
use game_core::{Entity, EntityCategory};
use ratatui::style::{Color, Modifier, Style};

/// Fixed terminal palette.
///
/// Terrain codes are single characters from the map document; the palette
/// only distinguishes them, it does not know what they mean.
#[derive(Clone, Copy, Debug, Default)]
pub struct RatatuiTheme;

impl RatatuiTheme {
    pub fn new() -> Self {
        Self
    }

    /// Glyph and style for an entity drawn on the map.
    pub fn entity_glyph(&self, entity: &Entity, local_uid: &str) -> (char, Style) {
        if entity.is_owned_by(local_uid) {
            return (
                '@',
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            );
        }

        let (glyph, color) = match entity.category {
            EntityCategory::Zombie => ('Z', Color::LightRed),
            EntityCategory::Human if entity.is_player() => ('P', Color::LightGreen),
            EntityCategory::Human => ('H', Color::Green),
            EntityCategory::Item => ('i', Color::LightCyan),
        };

        let mut style = Style::default().fg(color);
        if entity.category.is_actor() && entity.is_dead() {
            return (glyph.to_ascii_lowercase(), style.fg(Color::DarkGray));
        }
        if entity.downed == Some(true) {
            style = style.add_modifier(Modifier::DIM);
        }
        (glyph, style)
    }

    /// Background for a tile by terrain code.
    pub fn terrain(&self, code: Option<char>) -> Style {
        let color = match code {
            None => Color::Reset,
            Some('0') => Color::Rgb(40, 40, 40),
            Some('1') => Color::Rgb(20, 50, 20),
            Some('2') => Color::Rgb(50, 40, 20),
            Some('3') => Color::Rgb(20, 30, 60),
            Some(_) => Color::Rgb(45, 25, 45),
        };
        Style::default().bg(color).fg(Color::Gray)
    }

    pub fn selected_tile(&self, base: Style) -> Style {
        base.bg(Color::DarkGray).add_modifier(Modifier::BOLD)
    }

    pub fn selected_glyph(&self, base: Style) -> Style {
        base.add_modifier(Modifier::REVERSED | Modifier::BOLD)
    }

    pub fn own_tile_border(&self) -> Style {
        Style::default().fg(Color::Yellow)
    }

    pub fn message(&self, kind: MessageKind) -> Style {
        match kind {
            MessageKind::System => Style::default().fg(Color::White),
            MessageKind::Combat => Style::default().fg(Color::LightRed),
            MessageKind::Radio => Style::default().fg(Color::LightBlue),
        }
    }

    pub fn health(&self, ratio: f32) -> Style {
        let color = match (ratio * 100.0) as u32 {
            75..=100 => Color::Green,
            50..=74 => Color::Yellow,
            25..=49 => Color::LightRed,
            _ => Color::Red,
        };
        Style::default().fg(color)
    }
}
