//! Messages widget displaying recent session feedback.

use client_frontend_core::MessageEntry;
use ratatui::{
    Frame,
    layout::Rect,
    widgets::{Block, Borders, List, ListDirection, ListItem},
};

use crate::presentation::theme::RatatuiTheme;

/// Render the message log panel.
///
/// `messages` is newest first; the list grows upward so the newest line sits
/// at the bottom.
pub fn render(
    frame: &mut Frame,
    area: Rect,
    messages: &[MessageEntry],
    panel_height: u16,
    theme: &RatatuiTheme,
) {
    let mut items: Vec<ListItem> = messages
        .iter()
        .map(|entry| ListItem::new(format_message(entry)).style(theme.message(entry.kind)))
        .collect();

    // Pad with empty lines to maintain consistent height
    while items.len() < panel_height as usize {
        items.push(ListItem::new(""));
    }

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title("Messages"))
        .direction(ListDirection::BottomToTop);

    frame.render_widget(list, area);
}

fn format_message(entry: &MessageEntry) -> String {
    match entry.timestamp {
        Some(ts) => format!("[{}] {}", format_clock(ts), entry.text),
        None => entry.text.clone(),
    }
}

/// `HH:MM:SS` in UTC.
fn format_clock(epoch_secs: u64) -> String {
    let secs = epoch_secs % 86_400;
    format!("{:02}:{:02}:{:02}", secs / 3600, (secs / 60) % 60, secs % 60)
}
