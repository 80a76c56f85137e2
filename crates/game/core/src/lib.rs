//! Grid world data model shared across the Lockdown client crates.
//!
//! `game-core` defines positions, entities and the viewport geometry used to
//! decide which part of the map is visible. Everything here is pure: no I/O,
//! no clocks, no async. The authoritative simulation lives on the remote
//! engine; this crate only describes what the client mirrors from it.
pub mod entity;
pub mod grid;
pub mod position;
pub mod viewport;

pub use entity::{
    ActorStats, DEFAULT_ZOMBIE_MAX_HP, Entity, EntityCategory, EntityId, Equipment, ItemStats,
};
pub use grid::GridSize;
pub use position::{Position, StepDelta, StepError};
pub use viewport::{CanvasPoint, CanvasSize, CellWindow, Viewport, clamp_radius, compute_viewport};
