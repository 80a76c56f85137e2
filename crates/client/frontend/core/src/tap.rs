//! Tap routing.
//!
//! Turns a tap on a tile or on an entity glyph into a selection change or a
//! move request. Selection changes happen synchronously here; the caller is
//! responsible for dispatching any move afterwards.
use game_core::{GridSize, Position, StepDelta};

use crate::{
    interaction::{InteractionState, SelectOutcome},
    store::WorldStore,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TapOutcome {
    /// Local position unknown: nothing happened.
    Ignored,
    /// Tap outside the loaded grid: nothing happened.
    OutOfBounds,
    /// Selection toggled or replaced.
    Selection(SelectOutcome),
    /// Adjacent tile: selection cleared, move should be dispatched.
    Move(StepDelta),
    /// Tile farther than one step: selection cleared.
    OutOfRange,
    /// Entity tap that could not become a selection: selection cleared.
    Cleared,
}

impl TapOutcome {
    pub fn step(self) -> Option<StepDelta> {
        match self {
            Self::Move(step) => Some(step),
            _ => None,
        }
    }
}

/// Borrowed view over the state a tap needs.
pub struct TapRouter<'a> {
    interaction: &'a mut InteractionState,
    store: &'a WorldStore,
    local: Option<Position>,
    grid: GridSize,
}

impl<'a> TapRouter<'a> {
    pub fn new(
        interaction: &'a mut InteractionState,
        store: &'a WorldStore,
        local: Option<Position>,
        grid: GridSize,
    ) -> Self {
        Self {
            interaction,
            store,
            local,
            grid,
        }
    }

    /// Own tile toggles a tile selection, an adjacent tile (Chebyshev 1)
    /// becomes a move, anything farther clears the selection.
    pub fn on_tile_tap(&mut self, position: Position) -> TapOutcome {
        let Some(local) = self.local else {
            tracing::debug!(%position, "tile tap ignored: local position unknown");
            return TapOutcome::Ignored;
        };

        if !self.grid.is_empty() && !self.grid.contains(position) {
            tracing::debug!(%position, "tile tap outside grid");
            return TapOutcome::OutOfBounds;
        }

        match local.chebyshev_distance(position) {
            0 => TapOutcome::Selection(self.interaction.select_tile(position)),
            1 => {
                self.interaction.clear();
                match StepDelta::between(local, position) {
                    Ok(step) => {
                        tracing::debug!(%position, dx = step.dx(), dy = step.dy(), "move requested");
                        TapOutcome::Move(step)
                    }
                    Err(_) => TapOutcome::OutOfRange,
                }
            }
            distance => {
                self.interaction.clear();
                tracing::debug!(%position, distance, "tile tap too far away");
                TapOutcome::OutOfRange
            }
        }
    }

    /// Entity glyph tap: only entities on the local tile can be selected.
    pub fn on_entity_tap(&mut self, id: &str) -> TapOutcome {
        let Some(entity_position) = self.store.by_id(id).and_then(|entity| entity.position) else {
            self.interaction.clear();
            tracing::debug!(id, "entity tap on unknown or unplaced entity");
            return TapOutcome::Cleared;
        };

        let Some(local) = self.local else {
            tracing::debug!(id, "entity tap ignored: local position unknown");
            return TapOutcome::Ignored;
        };

        if local.chebyshev_distance(entity_position) == 0 {
            TapOutcome::Selection(self.interaction.select_entity(self.store, id))
        } else {
            self.interaction.clear();
            tracing::debug!(id, %entity_position, "entity tap too far away");
            TapOutcome::Cleared
        }
    }
}
