//! Tile coordinates and single-step movement deltas.
use core::fmt;

use thiserror::Error;

/// Discrete grid position expressed in tile coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const ORIGIN: Self = Self { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// King-move distance: `max(|dx|, |dy|)`.
    ///
    /// Used for every range check on the client (adjacent move, same-tile
    /// selection, same-tile attack).
    pub fn chebyshev_distance(self, other: Self) -> u32 {
        let dx = (i64::from(self.x) - i64::from(other.x)).unsigned_abs();
        let dy = (i64::from(self.y) - i64::from(other.y)).unsigned_abs();
        dx.max(dy).min(u64::from(u32::MAX)) as u32
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::ORIGIN
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum StepError {
    #[error("step must move at least one tile")]
    Stationary,

    #[error("step ({dx}, {dy}) exceeds one tile")]
    OutOfRange { dx: i32, dy: i32 },
}

/// A single-tile move request: `dx, dy ∈ {-1, 0, 1}`, never both zero.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StepDelta {
    dx: i8,
    dy: i8,
}

impl StepDelta {
    pub fn new(dx: i32, dy: i32) -> Result<Self, StepError> {
        if !(-1..=1).contains(&dx) || !(-1..=1).contains(&dy) {
            return Err(StepError::OutOfRange { dx, dy });
        }
        if dx == 0 && dy == 0 {
            return Err(StepError::Stationary);
        }
        Ok(Self {
            dx: dx as i8,
            dy: dy as i8,
        })
    }

    /// Delta leading from `from` to `to`, if the two tiles are adjacent.
    pub fn between(from: Position, to: Position) -> Result<Self, StepError> {
        let dx = i64::from(to.x) - i64::from(from.x);
        let dy = i64::from(to.y) - i64::from(from.y);
        let clamp = |v: i64| v.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32;
        Self::new(clamp(dx), clamp(dy))
    }

    pub const fn dx(self) -> i32 {
        self.dx as i32
    }

    pub const fn dy(self) -> i32 {
        self.dy as i32
    }
}
