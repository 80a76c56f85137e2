//! Key binding overlay.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

const BINDINGS: &[(&str, &str)] = &[
    ("h j k l / arrows", "Step onto the adjacent tile"),
    ("y u b n", "Step diagonally"),
    (". / Space / Enter", "Select or deselect your own tile"),
    ("1-9", "Select the n-th entity on your tile"),
    ("mouse click", "Tap a tile or an entity glyph"),
    ("a", "Attack the selected target"),
    ("t", "Advance the world by one tick"),
    ("+ / - / scroll", "Zoom in or out"),
    ("Esc", "Clear the selection"),
    ("q / Ctrl-C", "Quit"),
];

pub fn render(frame: &mut Frame, area: Rect) {
    let key_style = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);

    let mut lines = vec![
        Line::from("Tap your tile to inspect it, tap a neighbour to move. Attacks need a target on your tile."),
        Line::from(""),
    ];
    lines.extend(BINDINGS.iter().map(|(keys, what)| {
        Line::from(vec![
            Span::styled(format!("{keys:<20}"), key_style),
            Span::raw(*what),
        ])
    }));

    let paragraph = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(Block::default().borders(Borders::ALL).title(" Help "));

    frame.render_widget(Clear, area);
    frame.render_widget(paragraph, area);
}
