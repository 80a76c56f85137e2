//! Map dimensions.
use crate::position::Position;

/// Width and height of the world grid in tiles.
///
/// A zero dimension means the map has not been loaded yet.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridSize {
    pub width: u32,
    pub height: u32,
}

impl GridSize {
    pub const EMPTY: Self = Self {
        width: 0,
        height: 0,
    };

    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub const fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn contains(self, position: Position) -> bool {
        position.x >= 0
            && position.y >= 0
            && (position.x as u32) < self.width
            && (position.y as u32) < self.height
    }

    /// Nearest in-bounds tile, or `None` for an empty grid.
    pub fn clamp(self, position: Position) -> Option<Position> {
        if self.is_empty() {
            return None;
        }
        let max_x = i64::from(self.width) - 1;
        let max_y = i64::from(self.height) - 1;
        Some(Position::new(
            i64::from(position.x).clamp(0, max_x) as i32,
            i64::from(position.y).clamp(0, max_y) as i32,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contains_rejects_negative_and_edge() {
        let grid = GridSize::new(10, 10);
        assert!(grid.contains(Position::new(0, 0)));
        assert!(grid.contains(Position::new(9, 9)));
        assert!(!grid.contains(Position::new(10, 3)));
        assert!(!grid.contains(Position::new(-1, 3)));
    }

    #[test]
    fn clamp_pulls_into_bounds() {
        let grid = GridSize::new(10, 5);
        assert_eq!(grid.clamp(Position::new(-3, 12)), Some(Position::new(0, 4)));
        assert_eq!(GridSize::EMPTY.clamp(Position::ORIGIN), None);
    }
}
