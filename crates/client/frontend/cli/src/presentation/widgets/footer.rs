//! Footer widget displaying key bindings.

use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::state::{AppMode, AppState};

pub fn render(frame: &mut Frame, area: Rect, app_state: &AppState) {
    let text = match app_state.mode {
        AppMode::Normal => vec![Line::from(vec![
            Span::raw("[hjkl/yubn/Arrows] Move | "),
            Span::raw("[./Enter] Own tile | "),
            Span::raw("[1-9] Pick entity | "),
            Span::raw("[a] Attack | "),
            Span::raw("[t] Tick | "),
            Span::raw("[+/-] Zoom | "),
            Span::raw("[?] Help | "),
            Span::raw("[q] Quit"),
        ])],
        AppMode::Help => vec![Line::from(vec![Span::raw("[?/ESC] Close help")])],
    };

    let paragraph = Paragraph::new(text).block(Block::default().borders(Borders::ALL));

    frame.render_widget(paragraph, area);
}
