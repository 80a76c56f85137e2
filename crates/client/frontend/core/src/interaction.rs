//! Selection state machine.
//!
//! Exactly one [`Interaction`] is current per session. Tile selections are
//! plain positions; entity selections remember the id and the position the
//! entity had when last seen, and are corrected by [`InteractionState::reconcile`]
//! after every snapshot.
use strum::Display;

use game_core::{Entity, EntityCategory, EntityId, Position};

use crate::store::WorldStore;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "lowercase")]
pub enum InteractionKind {
    None,
    Tile,
    Human,
    Zombie,
    Item,
}

impl From<EntityCategory> for InteractionKind {
    fn from(category: EntityCategory) -> Self {
        match category {
            EntityCategory::Human => Self::Human,
            EntityCategory::Zombie => Self::Zombie,
            EntityCategory::Item => Self::Item,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub enum Interaction {
    #[default]
    None,
    Tile {
        position: Position,
    },
    Entity {
        category: EntityCategory,
        id: EntityId,
        position: Position,
    },
}

impl Interaction {
    pub fn kind(&self) -> InteractionKind {
        match self {
            Self::None => InteractionKind::None,
            Self::Tile { .. } => InteractionKind::Tile,
            Self::Entity { category, .. } => (*category).into(),
        }
    }

    pub fn position(&self) -> Option<Position> {
        match self {
            Self::None => None,
            Self::Tile { position } | Self::Entity { position, .. } => Some(*position),
        }
    }

    pub fn entity_id(&self) -> Option<&EntityId> {
        match self {
            Self::Entity { id, .. } => Some(id),
            _ => None,
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    fn for_entity(entity: &Entity, position: Position) -> Self {
        Self::Entity {
            category: entity.category,
            id: entity.id.clone(),
            position,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SelectOutcome {
    Selected,
    /// Same target selected twice: toggled back to none.
    Deselected,
    /// The entity is missing or unplaced; selection cleared.
    TargetVanished,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum ClearReason {
    Missing,
    Dead,
    Unplaced,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReconcileOutcome {
    Unchanged,
    Followed { from: Position, to: Position },
    Cleared(ClearReason),
}

impl ReconcileOutcome {
    pub fn changed(self) -> bool {
        !matches!(self, Self::Unchanged)
    }
}

#[derive(Clone, Debug, Default)]
pub struct InteractionState {
    current: Interaction,
}

impl InteractionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> &Interaction {
        &self.current
    }

    /// Toggles a tile selection at `position`.
    pub fn select_tile(&mut self, position: Position) -> SelectOutcome {
        if self.current == (Interaction::Tile { position }) {
            self.current = Interaction::None;
            tracing::debug!(%position, "tile deselected");
            SelectOutcome::Deselected
        } else {
            self.current = Interaction::Tile { position };
            tracing::debug!(%position, "tile selected");
            SelectOutcome::Selected
        }
    }

    /// Selects the entity with `id`, or toggles it off when the same entity
    /// at the same position is already selected.
    pub fn select_entity(&mut self, store: &WorldStore, id: &str) -> SelectOutcome {
        let Some((entity, position)) = store
            .by_id(id)
            .and_then(|entity| entity.position.map(|position| (entity, position)))
        else {
            self.current = Interaction::None;
            tracing::debug!(id, "selection target vanished");
            return SelectOutcome::TargetVanished;
        };

        let candidate = Interaction::for_entity(entity, position);
        if self.current == candidate {
            self.current = Interaction::None;
            tracing::debug!(id, "entity deselected");
            SelectOutcome::Deselected
        } else {
            tracing::debug!(id, kind = %candidate.kind(), %position, "entity selected");
            self.current = candidate;
            SelectOutcome::Selected
        }
    }

    pub fn clear(&mut self) -> bool {
        let changed = !self.current.is_none();
        self.current = Interaction::None;
        changed
    }

    /// Re-validates an entity selection against the store.
    ///
    /// Missing, dead (actors only) or unplaced targets clear the selection;
    /// otherwise the selection silently follows the entity's current
    /// position. Tile and empty selections are never touched. Idempotent.
    pub fn reconcile(&mut self, store: &WorldStore) -> ReconcileOutcome {
        let Interaction::Entity { id, position, .. } = &self.current else {
            return ReconcileOutcome::Unchanged;
        };

        let outcome = match store.by_id(id.as_str()) {
            None => ReconcileOutcome::Cleared(ClearReason::Missing),
            Some(entity) if entity.category.is_actor() && entity.is_dead() => {
                ReconcileOutcome::Cleared(ClearReason::Dead)
            }
            Some(entity) => match entity.position {
                None => ReconcileOutcome::Cleared(ClearReason::Unplaced),
                Some(now) if now == *position => ReconcileOutcome::Unchanged,
                Some(now) => ReconcileOutcome::Followed {
                    from: *position,
                    to: now,
                },
            },
        };

        match outcome {
            ReconcileOutcome::Cleared(reason) => {
                tracing::debug!(%id, %reason, "stale selection cleared");
                self.current = Interaction::None;
            }
            ReconcileOutcome::Followed { to, .. } => {
                if let Interaction::Entity { position, .. } = &mut self.current {
                    *position = to;
                }
            }
            ReconcileOutcome::Unchanged => {}
        }

        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use client_engine::Collection;

    fn store_with(entities: Vec<Entity>) -> WorldStore {
        let mut store = WorldStore::new();
        store.replace_collection(Collection::Zombies, entities);
        store
    }

    fn walker(id: &str, x: i32, y: i32) -> Entity {
        Entity::new(id, EntityCategory::Zombie, "WALKER").at(Position::new(x, y))
    }

    #[test]
    fn tile_selection_toggles() {
        let mut state = InteractionState::new();
        let p = Position::new(5, 5);

        assert_eq!(state.select_tile(p), SelectOutcome::Selected);
        assert_eq!(state.current(), &Interaction::Tile { position: p });
        assert_eq!(state.select_tile(p), SelectOutcome::Deselected);
        assert!(state.current().is_none());
    }

    #[test]
    fn different_tile_replaces_selection() {
        let mut state = InteractionState::new();
        state.select_tile(Position::new(1, 1));
        assert_eq!(state.select_tile(Position::new(2, 1)), SelectOutcome::Selected);
        assert_eq!(state.current().position(), Some(Position::new(2, 1)));
    }

    #[test]
    fn entity_selection_toggles() {
        let store = store_with(vec![walker("z1", 5, 5)]);
        let mut state = InteractionState::new();

        assert_eq!(state.select_entity(&store, "z1"), SelectOutcome::Selected);
        assert_eq!(state.current().kind(), InteractionKind::Zombie);
        assert_eq!(state.select_entity(&store, "z1"), SelectOutcome::Deselected);
        assert!(state.current().is_none());
    }

    #[test]
    fn entity_moved_since_selection_is_reselected() {
        let mut store = store_with(vec![walker("z1", 5, 5)]);
        let mut state = InteractionState::new();
        state.select_entity(&store, "z1");

        store.replace_collection(Collection::Zombies, vec![walker("z1", 6, 5)]);
        assert_eq!(state.select_entity(&store, "z1"), SelectOutcome::Selected);
        assert_eq!(state.current().position(), Some(Position::new(6, 5)));
    }

    #[test]
    fn selecting_unknown_or_unplaced_entity_clears() {
        let store = store_with(vec![Entity::new("z9", EntityCategory::Zombie, "WALKER")]);
        let mut state = InteractionState::new();
        state.select_tile(Position::new(1, 1));

        assert_eq!(state.select_entity(&store, "nope"), SelectOutcome::TargetVanished);
        assert!(state.current().is_none());
        assert_eq!(state.select_entity(&store, "z9"), SelectOutcome::TargetVanished);
    }

    #[test]
    fn reconcile_follows_moving_entity() {
        let mut store = store_with(vec![walker("z1", 5, 5)]);
        let mut state = InteractionState::new();
        state.select_entity(&store, "z1");

        store.replace_collection(Collection::Zombies, vec![walker("z1", 5, 6)]);
        assert_eq!(
            state.reconcile(&store),
            ReconcileOutcome::Followed {
                from: Position::new(5, 5),
                to: Position::new(5, 6)
            }
        );
        assert_eq!(state.current().position(), Some(Position::new(5, 6)));
        assert_eq!(state.reconcile(&store), ReconcileOutcome::Unchanged);
    }

    #[test]
    fn reconcile_clears_dead_missing_and_unplaced() {
        let cases = [
            (vec![walker("z1", 5, 5).with_alive(false)], ClearReason::Dead),
            (vec![walker("z2", 5, 5)], ClearReason::Missing),
            (
                vec![Entity::new("z1", EntityCategory::Zombie, "WALKER")],
                ClearReason::Unplaced,
            ),
        ];

        for (next, reason) in cases {
            let mut store = store_with(vec![walker("z1", 5, 5)]);
            let mut state = InteractionState::new();
            state.select_entity(&store, "z1");

            store.replace_collection(Collection::Zombies, next);
            assert_eq!(state.reconcile(&store), ReconcileOutcome::Cleared(reason));
            assert!(state.current().is_none());
        }
    }

    #[test]
    fn downed_human_stays_selected() {
        let mut store = WorldStore::new();
        let mut human = Entity::new("h1", EntityCategory::Human, "TRADER").at(Position::new(2, 2));
        store.replace_collection(Collection::Humans, vec![human.clone()]);
        let mut state = InteractionState::new();
        state.select_entity(&store, "h1");

        human.downed = Some(true);
        store.replace_collection(Collection::Humans, vec![human.clone()]);
        assert_eq!(state.reconcile(&store), ReconcileOutcome::Unchanged);

        store.replace_collection(Collection::Humans, vec![human.with_alive(false)]);
        assert_eq!(
            state.reconcile(&store),
            ReconcileOutcome::Cleared(ClearReason::Dead)
        );
    }

    #[test]
    fn item_selection_ignores_alive_flag() {
        let mut store = WorldStore::new();
        let item = Entity::new("i1", EntityCategory::Item, "CROWBAR").at(Position::new(1, 1));
        store.replace_collection(Collection::Items, vec![item.clone()]);
        let mut state = InteractionState::new();
        state.select_entity(&store, "i1");

        store.replace_collection(Collection::Items, vec![item.with_alive(false)]);
        assert_eq!(state.reconcile(&store), ReconcileOutcome::Unchanged);
        assert_eq!(state.current().kind(), InteractionKind::Item);
    }

    #[test]
    fn reconcile_leaves_tile_selection_alone() {
        let store = WorldStore::new();
        let mut state = InteractionState::new();
        state.select_tile(Position::new(3, 3));
        assert_eq!(state.reconcile(&store), ReconcileOutcome::Unchanged);
        assert_eq!(state.current().kind(), InteractionKind::Tile);
    }
}
