//! Map widget rendering the visible window of the grid.
//!
//! Each tile is drawn as a block of `cell_rows` terminal rows and twice as
//! many columns. Row 0 carries the terrain code, row 1 the entity glyphs
//! (one column per entity, in id order), the last row marks the local tile.

use client_frontend_core::{Interaction, Session};
use game_core::{CanvasPoint, CanvasSize, Entity, Position, Viewport};
use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::presentation::theme::RatatuiTheme;

/// Terminal columns per row, so cells look roughly square.
pub const COLUMNS_PER_ROW: u16 = 2;

const GLYPH_ROW: u16 = 1;
/// Glyphs start after one column of padding.
const GLYPH_OFFSET: u16 = 1;

/// Where a click landed on the map.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MapHit {
    pub position: Position,
    /// Drawn glyph slot on the tile's entity row, if the click hit one.
    pub slot: Option<usize>,
}

/// On-screen part of a tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TileArea {
    /// Screen rectangle, clipped to the panel.
    pub rect: Rect,
    /// Tile rows and columns scrolled out above and to the left.
    pub skip: (u16, u16),
}

/// What a glyph slot shows.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Glyph {
    Entity(usize),
    Overflow,
}

/// The last slot turns into `+` once a tile holds more entities than fit.
fn glyph_at(slot: usize, count: usize, capacity: usize) -> Option<Glyph> {
    if slot >= capacity || slot >= count {
        return None;
    }
    if count > capacity && slot + 1 == capacity {
        Some(Glyph::Overflow)
    } else {
        Some(Glyph::Entity(slot))
    }
}

/// Geometry of the map panel for one frame.
///
/// When whole-row cells make the grid larger than the panel, the content is
/// scrolled so the local tile stays on screen.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MapLayout {
    inner: Rect,
    viewport: Viewport,
    cell_rows: u16,
    scroll_x: u16,
    scroll_y: u16,
}

impl MapLayout {
    /// Fits the session's viewport into `inner`, measured in terminal cells.
    pub fn compute(inner: Rect, session: &Session, min_cell_rows: u16) -> Self {
        let canvas = CanvasSize::new(
            f32::from(inner.width) / f32::from(COLUMNS_PER_ROW),
            f32::from(inner.height),
        );
        let mut viewport = session.viewport_with(canvas, f32::from(min_cell_rows));
        // Terminal cells are discrete; draw and hit-test with the same
        // whole-row size.
        viewport.cell_size = viewport.cell_size.floor().max(f32::from(min_cell_rows));

        let mut layout = Self {
            inner,
            viewport,
            cell_rows: viewport.cell_size as u16,
            scroll_x: 0,
            scroll_y: 0,
        };
        if let Some(focus) = session.local_position() {
            layout.scroll_to(focus);
        }
        layout
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn cell_rows(&self) -> u16 {
        self.cell_rows
    }

    pub fn cell_columns(&self) -> u16 {
        self.cell_rows.saturating_mul(COLUMNS_PER_ROW)
    }

    /// Scroll offset in terminal cells, `(columns, rows)`.
    pub fn scroll(&self) -> (u16, u16) {
        (self.scroll_x, self.scroll_y)
    }

    /// Glyph slots per tile, padding excluded.
    pub fn glyph_capacity(&self) -> usize {
        usize::from(self.cell_columns().saturating_sub(GLYPH_OFFSET * 2))
    }

    fn scroll_to(&mut self, focus: Position) {
        let Some((x, y)) = self.content_origin(focus) else {
            return;
        };
        let content = self.viewport.content_size();
        let content_columns = content.width as u32 * u32::from(COLUMNS_PER_ROW);
        let content_rows = content.height as u32;

        self.scroll_x = centered_scroll(
            x,
            u32::from(self.cell_columns()),
            content_columns,
            self.inner.width,
        );
        self.scroll_y = centered_scroll(y, u32::from(self.cell_rows), content_rows, self.inner.height);
    }

    /// Tile origin in unscrolled terminal cells relative to the panel.
    fn content_origin(&self, position: Position) -> Option<(u32, u32)> {
        let origin = self.viewport.origin_of(position)?;
        Some((origin.x as u32 * u32::from(COLUMNS_PER_ROW), origin.y as u32))
    }

    /// Visible part of a tile, `None` when it is scrolled or clipped away.
    pub fn tile_area(&self, position: Position) -> Option<TileArea> {
        let (x, y) = self.content_origin(position)?;
        let left = i64::from(x) - i64::from(self.scroll_x);
        let top = i64::from(y) - i64::from(self.scroll_y);
        let right = (left + i64::from(self.cell_columns())).min(i64::from(self.inner.width));
        let bottom = (top + i64::from(self.cell_rows)).min(i64::from(self.inner.height));

        let (visible_left, visible_top) = (left.max(0), top.max(0));
        if visible_left >= right || visible_top >= bottom {
            return None;
        }

        Some(TileArea {
            rect: Rect::new(
                self.inner.x + visible_left as u16,
                self.inner.y + visible_top as u16,
                (right - visible_left) as u16,
                (bottom - visible_top) as u16,
            ),
            skip: ((visible_top - top) as u16, (visible_left - left) as u16),
        })
    }

    /// Hit-tests a terminal cell.
    pub fn hit(&self, column: u16, row: u16) -> Option<MapHit> {
        let inner = self.inner;
        if column < inner.x
            || row < inner.y
            || column >= inner.x.saturating_add(inner.width)
            || row >= inner.y.saturating_add(inner.height)
        {
            return None;
        }

        let content_x = u32::from(column - inner.x) + u32::from(self.scroll_x);
        let content_y = u32::from(row - inner.y) + u32::from(self.scroll_y);
        let point = CanvasPoint::new(
            content_x as f32 / f32::from(COLUMNS_PER_ROW),
            content_y as f32,
        );
        let position = self.viewport.cell_at(point)?;
        let (x, y) = self.content_origin(position)?;

        let slot = if content_y.checked_sub(y) == Some(u32::from(GLYPH_ROW)) {
            content_x
                .checked_sub(x + u32::from(GLYPH_OFFSET))
                .map(|slot| slot as usize)
                .filter(|slot| *slot < self.glyph_capacity())
        } else {
            None
        };

        Some(MapHit { position, slot })
    }

    /// Entity behind a glyph slot; the `+` marker stands for the first one.
    pub fn slot_entity<'a>(&self, slot: usize, entities: &[&'a Entity]) -> Option<&'a Entity> {
        match glyph_at(slot, entities.len(), self.glyph_capacity())? {
            Glyph::Entity(index) => entities.get(index).copied(),
            Glyph::Overflow => entities.first().copied(),
        }
    }
}

/// Scroll that centres a tile, limited to the content.
fn centered_scroll(start: u32, size: u32, content: u32, view: u16) -> u16 {
    let view = u32::from(view);
    if content <= view {
        return 0;
    }
    let scroll = (start + size / 2)
        .saturating_sub(view / 2)
        .min(content - view);
    u16::try_from(scroll).unwrap_or(u16::MAX)
}

/// Entities in glyph-slot order on a tile.
pub fn tile_entities(session: &Session, position: Position) -> Vec<&Entity> {
    session.store().entities_at(position)
}

/// Render the map panel and return its layout for hit-testing.
pub fn render(
    frame: &mut Frame,
    area: Rect,
    session: &Session,
    min_cell_rows: u16,
    theme: &RatatuiTheme,
) -> MapLayout {
    let title = match session.map().map_id.as_deref() {
        Some(map_id) => format!("Map {map_id} (r={})", session.radius()),
        None => format!("Map (r={})", session.radius()),
    };
    let block = Block::default().borders(Borders::ALL).title(title);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let layout = MapLayout::compute(inner, session, min_cell_rows);
    let Some(window) = layout.viewport.window else {
        frame.render_widget(Paragraph::new("Waiting for map..."), inner);
        return layout;
    };

    for position in window.positions() {
        let Some(tile) = layout.tile_area(position) else {
            continue;
        };
        let lines = tile_lines(session, position, &layout, theme);
        frame.render_widget(Paragraph::new(lines).scroll(tile.skip), tile.rect);
    }

    layout
}

fn tile_lines(
    session: &Session,
    position: Position,
    layout: &MapLayout,
    theme: &RatatuiTheme,
) -> Vec<Line<'static>> {
    let width = usize::from(layout.cell_columns());
    let selection = session.selection();

    let mut base = theme.terrain(session.terrain_at(position));
    if matches!(selection, Interaction::Tile { position: selected } if *selected == position) {
        base = theme.selected_tile(base);
    }

    let mut lines = Vec::with_capacity(usize::from(layout.cell_rows));

    let code = session.terrain_at(position).unwrap_or(' ');
    lines.push(Line::from(Span::styled(
        pad(format!("{code}"), width),
        base,
    )));

    lines.push(glyph_line(session, position, layout, base, theme));

    let is_local = session.local_position() == Some(position);
    for row in 2..layout.cell_rows {
        let last = row + 1 == layout.cell_rows;
        if last && is_local {
            lines.push(Line::from(Span::styled(
                "-".repeat(width),
                base.patch(theme.own_tile_border()),
            )));
        } else {
            lines.push(Line::from(Span::styled(" ".repeat(width), base)));
        }
    }

    lines
}

fn glyph_line(
    session: &Session,
    position: Position,
    layout: &MapLayout,
    base: Style,
    theme: &RatatuiTheme,
) -> Line<'static> {
    let width = usize::from(layout.cell_columns());
    let capacity = layout.glyph_capacity();
    let uid = session.identity().uid.as_str();
    let selected_id = session.selection().entity_id();
    let entities = tile_entities(session, position);

    let mut spans = vec![Span::styled(" ", base)];
    for slot in 0..capacity {
        match glyph_at(slot, entities.len(), capacity) {
            None => break,
            Some(Glyph::Overflow) => spans.push(Span::styled("+", base)),
            Some(Glyph::Entity(index)) => {
                let entity = entities[index];
                let (glyph, style) = theme.entity_glyph(entity, uid);
                let mut style = base.patch(style);
                if selected_id == Some(&entity.id) {
                    style = theme.selected_glyph(style);
                }
                spans.push(Span::styled(glyph.to_string(), style));
            }
        }
    }

    let used: usize = spans.iter().map(|span| span.content.chars().count()).sum();
    spans.push(Span::styled(" ".repeat(width.saturating_sub(used)), base));
    Line::from(spans)
}

fn pad(mut text: String, width: usize) -> String {
    let len = text.chars().count();
    if len < width {
        text.push_str(&" ".repeat(width - len));
    }
    text
}
