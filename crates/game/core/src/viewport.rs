//! Visible window computation.
//!
//! Given the map size, a focus tile and a zoom radius, [`compute_viewport`]
//! returns the rectangle of tiles to draw and a uniform cell size. The window
//! is clamped to the map; the cell size fills the canvas along its tighter
//! axis but never drops below the configured minimum (the content may then
//! overflow the canvas and scroll).
use crate::{grid::GridSize, position::Position};

/// Drawable area, in whatever unit the frontend measures (points, pixels,
/// terminal cells).
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct CanvasSize {
    pub width: f32,
    pub height: f32,
}

impl CanvasSize {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct CanvasPoint {
    pub x: f32,
    pub y: f32,
}

impl CanvasPoint {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Inclusive tile rectangle. Always non-empty and inside the grid it was
/// computed for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CellWindow {
    pub min_x: i32,
    pub max_x: i32,
    pub min_y: i32,
    pub max_y: i32,
}

impl CellWindow {
    pub const fn columns(&self) -> u32 {
        (self.max_x - self.min_x + 1) as u32
    }

    pub const fn rows(&self) -> u32 {
        (self.max_y - self.min_y + 1) as u32
    }

    pub const fn contains(&self, position: Position) -> bool {
        position.x >= self.min_x
            && position.x <= self.max_x
            && position.y >= self.min_y
            && position.y <= self.max_y
    }

    /// Visible tiles in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        (self.min_y..=self.max_y)
            .flat_map(move |y| (self.min_x..=self.max_x).map(move |x| Position::new(x, y)))
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    /// `None` while the map is not loaded (either dimension is zero).
    pub window: Option<CellWindow>,
    pub cell_size: f32,
}

impl Viewport {
    pub const fn is_empty(&self) -> bool {
        self.window.is_none()
    }

    /// Total size of the drawn grid; may exceed the canvas.
    pub fn content_size(&self) -> CanvasSize {
        match self.window {
            Some(window) => CanvasSize::new(
                window.columns() as f32 * self.cell_size,
                window.rows() as f32 * self.cell_size,
            ),
            None => CanvasSize::default(),
        }
    }

    /// Top-left corner of a visible tile.
    pub fn origin_of(&self, position: Position) -> Option<CanvasPoint> {
        let window = self.window?;
        if !window.contains(position) {
            return None;
        }
        Some(CanvasPoint::new(
            (position.x - window.min_x) as f32 * self.cell_size,
            (position.y - window.min_y) as f32 * self.cell_size,
        ))
    }

    /// Tile under a canvas point (hit-testing for taps and clicks).
    pub fn cell_at(&self, point: CanvasPoint) -> Option<Position> {
        let window = self.window?;
        if point.x < 0.0 || point.y < 0.0 || self.cell_size <= 0.0 {
            return None;
        }
        let column = (point.x / self.cell_size).floor() as i64;
        let row = (point.y / self.cell_size).floor() as i64;
        if column >= i64::from(window.columns()) || row >= i64::from(window.rows()) {
            return None;
        }
        Some(Position::new(
            window.min_x + column as i32,
            window.min_y + row as i32,
        ))
    }
}

/// Computes the visible window around `focus`.
///
/// The focus is clamped into the grid first so the window never inverts.
/// Non-positive or non-finite canvas dimensions fall back to
/// `min_cell_size`.
pub fn compute_viewport(
    grid: GridSize,
    focus: Position,
    radius: u32,
    canvas: CanvasSize,
    min_cell_size: f32,
) -> Viewport {
    let Some(focus) = grid.clamp(focus) else {
        return Viewport {
            window: None,
            cell_size: min_cell_size,
        };
    };

    let radius = i64::from(radius);
    let max_x = i64::from(grid.width) - 1;
    let max_y = i64::from(grid.height) - 1;

    let window = CellWindow {
        min_x: (i64::from(focus.x) - radius).max(0) as i32,
        max_x: (i64::from(focus.x) + radius).min(max_x) as i32,
        min_y: (i64::from(focus.y) - radius).max(0) as i32,
        max_y: (i64::from(focus.y) + radius).min(max_y) as i32,
    };

    let fit = (canvas.width / window.columns() as f32).min(canvas.height / window.rows() as f32);
    let cell_size = if fit.is_finite() {
        fit.max(min_cell_size)
    } else {
        min_cell_size
    };

    Viewport {
        window: Some(window),
        cell_size,
    }
}

/// Clamps a requested zoom radius into `[0, max_radius]`.
pub fn clamp_radius(requested: i64, max_radius: u32) -> u32 {
    requested.clamp(0, i64::from(max_radius)) as u32
}
