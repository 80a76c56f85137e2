//! UI rendering entry point composing all widgets.
use anyhow::Result;
use client_frontend_core::Session;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
};

use crate::{
    presentation::{
        terminal::Tui,
        theme::RatatuiTheme,
        widgets::{self, map::MapLayout},
    },
    state::AppState,
};

/// Width of the selection panel beside the map.
const SIDE_PANEL_WIDTH: u16 = 32;

/// Everything one frame needs.
pub struct RenderContext<'a> {
    pub session: &'a Session,
    pub app_state: &'a AppState,
    pub message_panel_height: u16,
    pub min_cell_rows: u16,
}

/// Draw one frame and return the map geometry for hit-testing clicks.
pub fn render(terminal: &mut Tui, ctx: &RenderContext) -> Result<MapLayout> {
    let theme = RatatuiTheme::new();
    let mut layout = None;

    terminal.draw(|frame| {
        layout = Some(render_game_ui(frame, ctx, &theme));

        if ctx.app_state.mode.is_overlay() {
            let area = centered_rect(70, 70, frame.area());
            widgets::help::render(frame, area);
        }
    })?;

    layout.ok_or_else(|| anyhow::anyhow!("frame was not drawn"))
}

/// Header, map with side panel, messages, footer.
fn render_game_ui(frame: &mut Frame, ctx: &RenderContext, theme: &RatatuiTheme) -> MapLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),                        // Header
            Constraint::Min(0),                           // Game area
            Constraint::Length(ctx.message_panel_height), // Messages
            Constraint::Length(3),                        // Footer
        ])
        .split(frame.area());

    widgets::header::render(frame, chunks[0], ctx.session, ctx.app_state);

    let game_area = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(SIDE_PANEL_WIDTH)])
        .split(chunks[1]);

    let map_layout = widgets::map::render(
        frame,
        game_area[0],
        ctx.session,
        ctx.min_cell_rows,
        theme,
    );
    widgets::interaction::render(frame, game_area[1], ctx.session, theme);

    // Borders take two rows.
    let visible = ctx.message_panel_height.saturating_sub(2) as usize;
    let recent_messages: Vec<_> = ctx.session.messages().recent(visible).cloned().collect();
    widgets::messages::render(frame, chunks[2], &recent_messages, ctx.message_panel_height, theme);

    widgets::footer::render(frame, chunks[3], ctx.app_state);

    map_layout
}

/// Create a centered rectangle for modal overlays.
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
