//! Session context.
//!
//! One [`Session`] per signed-in user owns the world mirror, the current
//! selection, the local player's position and the message log. It is driven
//! from a single task: snapshots and engine outcomes are marshalled onto that
//! task and applied here, and every mutation reports an [`UpdateScope`] so
//! the frontend knows what to redraw.
use client_engine::{AttackTarget, Collection, GameMeta, SnapshotEvent, TargetType};
use game_core::{
    CanvasSize, Entity, EntityCategory, GridSize, Position, Viewport, clamp_radius,
    compute_viewport,
};

use crate::{
    config::{FrontendConfig, SessionIdentity, ViewConfig},
    dispatch::{DispatchOutcome, Intent},
    format,
    interaction::{Interaction, InteractionState},
    message::MessageLog,
    scope::UpdateScope,
    store::WorldStore,
    tap::{TapOutcome, TapRouter},
};

/// What a user action changed, plus the engine call it asks for, if any.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Reaction {
    pub scope: UpdateScope,
    pub intent: Option<Intent>,
}

impl Reaction {
    pub fn none() -> Self {
        Self::default()
    }

    fn redraw(scope: UpdateScope) -> Self {
        Self {
            scope,
            intent: None,
        }
    }

    fn dispatch(scope: UpdateScope, intent: Intent) -> Self {
        Self {
            scope,
            intent: Some(intent),
        }
    }
}

pub struct Session {
    identity: SessionIdentity,
    store: WorldStore,
    interaction: InteractionState,
    local_position: Option<Position>,
    own_doc_seen: bool,
    map: GameMeta,
    messages: MessageLog,
    radius: u32,
    view: ViewConfig,
}

impl Session {
    pub fn new(identity: SessionIdentity, config: &FrontendConfig) -> Self {
        let view = config.view.clone();
        Self {
            identity,
            store: WorldStore::new(),
            interaction: InteractionState::new(),
            local_position: None,
            own_doc_seen: false,
            map: GameMeta::default(),
            messages: MessageLog::new(config.messages.capacity),
            radius: view.initial_radius.min(view.max_radius),
            view,
        }
    }

    // ------------------------------------------------------------------
    // Snapshots
    // ------------------------------------------------------------------

    /// Applies one snapshot delivery and re-validates the selection.
    pub fn apply_snapshot(&mut self, event: SnapshotEvent) -> UpdateScope {
        match event {
            SnapshotEvent::Game(meta) => self.apply_game_meta(meta),
            SnapshotEvent::Entities {
                collection,
                entities,
            } => self.apply_entities(collection, entities),
        }
    }

    /// Replaces one collection, syncs the local player and reconciles.
    pub fn apply_entities(&mut self, collection: Collection, entities: Vec<Entity>) -> UpdateScope {
        tracing::trace!(%collection, count = entities.len(), "snapshot applied");
        self.store.replace_collection(collection, entities);

        let mut scope = UpdateScope::ENTITIES;
        if collection == Collection::Players && self.sync_local_player() {
            scope |= UpdateScope::PLAYER;
        }
        if self.interaction.reconcile(&self.store).changed() {
            scope |= UpdateScope::SELECTION;
        }
        scope
    }

    fn apply_game_meta(&mut self, meta: GameMeta) -> UpdateScope {
        let scope = self.set_grid_size(meta.grid);
        if meta == self.map {
            return scope;
        }
        tracing::info!(
            width = meta.grid.width,
            height = meta.grid.height,
            map_id = meta.map_id.as_deref().unwrap_or("-"),
            "map updated"
        );
        self.map = meta;
        scope | UpdateScope::MAP
    }

    /// Resizes the grid, keeping map id and terrain.
    pub fn set_grid_size(&mut self, grid: GridSize) -> UpdateScope {
        if self.map.grid == grid {
            return UpdateScope::empty();
        }
        tracing::debug!(from = ?self.map.grid, to = ?grid, "grid resized");
        self.map.grid = grid;
        UpdateScope::MAP | UpdateScope::VIEWPORT
    }

    /// Mirrors the own player document into `local_position`.
    ///
    /// A document that was seen before and is now gone means the player left
    /// the map; until the first document arrives the join position stands.
    fn sync_local_player(&mut self) -> bool {
        let uid = self.identity.uid.as_str();
        let next = match self
            .store
            .collection(Collection::Players)
            .iter()
            .find(|entity| entity.is_owned_by(uid))
        {
            Some(own) => {
                self.own_doc_seen = true;
                own.position
            }
            None if self.own_doc_seen => None,
            None => return false,
        };

        if next == self.local_position {
            return false;
        }
        tracing::debug!(from = ?self.local_position, to = ?next, "local position synced");
        self.local_position = next;
        true
    }

    // ------------------------------------------------------------------
    // User input
    // ------------------------------------------------------------------

    pub fn tap_tile(&mut self, position: Position) -> Reaction {
        let outcome = TapRouter::new(
            &mut self.interaction,
            &self.store,
            self.local_position,
            self.map.grid,
        )
        .on_tile_tap(position);
        Self::react_to_tap(outcome)
    }

    pub fn tap_entity(&mut self, id: &str) -> Reaction {
        let outcome = TapRouter::new(
            &mut self.interaction,
            &self.store,
            self.local_position,
            self.map.grid,
        )
        .on_entity_tap(id);
        Self::react_to_tap(outcome)
    }

    fn react_to_tap(outcome: TapOutcome) -> Reaction {
        match outcome {
            TapOutcome::Ignored | TapOutcome::OutOfBounds => Reaction::none(),
            TapOutcome::Selection(_) | TapOutcome::OutOfRange | TapOutcome::Cleared => {
                Reaction::redraw(UpdateScope::SELECTION)
            }
            TapOutcome::Move(step) => Reaction::dispatch(UpdateScope::SELECTION, Intent::Move(step)),
        }
    }

    pub fn clear_selection(&mut self) -> UpdateScope {
        if self.interaction.clear() {
            UpdateScope::SELECTION
        } else {
            UpdateScope::empty()
        }
    }

    /// Resolves the current selection into an attack, or explains why not.
    ///
    /// Only zombies and other humans on the local tile can be attacked. A
    /// refused attack leaves the selection as it was.
    pub fn attack_selected(&mut self) -> Reaction {
        let (kind, target_position) = match self.interaction.current().clone() {
            Interaction::None => return self.refuse(format::NO_TARGET),
            Interaction::Tile { .. } => return self.refuse(format::CANT_ATTACK),
            Interaction::Entity {
                category, position, ..
            } => (category, position),
        };

        match kind {
            EntityCategory::Item => self.refuse(format::CANT_ATTACK),
            EntityCategory::Zombie => {
                self.attack_on_tile(target_position, format::ZOMBIE_TOO_FAR, format::NO_ZOMBIE_HERE)
            }
            EntityCategory::Human => {
                self.attack_on_tile(target_position, format::HUMAN_TOO_FAR, format::NO_HUMAN_HERE)
            }
        }
    }

    fn attack_on_tile(
        &mut self,
        target_position: Position,
        too_far: &'static str,
        none_here: &'static str,
    ) -> Reaction {
        let Some(local) = self.local_position else {
            return self.refuse(format::DONT_KNOW_WHERE);
        };
        if local != target_position {
            return self.refuse(too_far);
        }

        match self.pick_target(target_position) {
            Some(target) => {
                tracing::debug!(id = %target.id, target_type = %target.target_type, "attack requested");
                Reaction::dispatch(UpdateScope::empty(), Intent::Attack(target))
            }
            None => self.refuse(none_here),
        }
    }

    /// Prefers the selected entity while it is still a valid target on the
    /// tile, otherwise the first valid one of the same category by id.
    fn pick_target(&self, position: Position) -> Option<AttackTarget> {
        let Interaction::Entity { category, id, .. } = self.interaction.current() else {
            return None;
        };
        let uid = self.identity.uid.as_str();
        let candidates: Vec<&Entity> = self
            .store
            .entities_at(position)
            .into_iter()
            .filter(|entity| entity.category == *category)
            .filter(|entity| !entity.is_dead())
            .filter(|entity| !entity.is_owned_by(uid))
            .collect();

        let chosen = candidates
            .iter()
            .find(|entity| entity.id == *id)
            .or_else(|| candidates.first())?;

        Some(AttackTarget {
            id: chosen.id.clone(),
            target_type: TargetType::for_entity(chosen.category, chosen.is_player()),
        })
    }

    fn refuse(&mut self, text: &'static str) -> Reaction {
        self.messages.push_combat(text);
        Reaction::redraw(UpdateScope::MESSAGES)
    }

    pub fn join(&self) -> Intent {
        Intent::Join {
            display_name: self.identity.display_name.clone(),
        }
    }

    pub fn tick(&self) -> Intent {
        Intent::Tick
    }

    pub fn zoom_in(&mut self) -> UpdateScope {
        self.set_radius(i64::from(self.radius) - 1)
    }

    pub fn zoom_out(&mut self) -> UpdateScope {
        self.set_radius(i64::from(self.radius) + 1)
    }

    fn set_radius(&mut self, requested: i64) -> UpdateScope {
        let radius = clamp_radius(requested, self.view.max_radius);
        if radius == self.radius {
            return UpdateScope::empty();
        }
        self.radius = radius;
        UpdateScope::VIEWPORT
    }

    // ------------------------------------------------------------------
    // Engine outcomes
    // ------------------------------------------------------------------

    /// Turns an engine answer into log entries and position updates.
    ///
    /// Selection is never touched here: a late or failed response must not
    /// undo whatever the user did in the meantime.
    pub fn apply_outcome(&mut self, outcome: DispatchOutcome) -> UpdateScope {
        let mut scope = UpdateScope::MESSAGES;
        match outcome {
            DispatchOutcome::Joined(result) => {
                self.messages.push_system(format::join_message(&result));
                let position = result.ok().filter(|res| res.ok).and_then(|res| res.position());
                if self.set_local_position(position) {
                    scope |= UpdateScope::PLAYER;
                }
            }
            DispatchOutcome::Moved(result) => {
                self.messages.push_system(format::move_message(&result));
                let position = result.ok().filter(|res| res.ok).and_then(|res| res.position());
                if self.set_local_position(position) {
                    scope |= UpdateScope::PLAYER;
                }
            }
            DispatchOutcome::Attacked { target, result } => {
                self.messages
                    .push_combat(format::attack_message(target.target_type, &result));
            }
            DispatchOutcome::Ticked(result) => {
                self.messages.push_system(format::tick_message(&result));
            }
        }
        scope
    }

    fn set_local_position(&mut self, position: Option<Position>) -> bool {
        match position {
            Some(position) if self.local_position != Some(position) => {
                self.local_position = Some(position);
                true
            }
            _ => false,
        }
    }

    // ------------------------------------------------------------------
    // Rendering
    // ------------------------------------------------------------------

    pub fn viewport(&self, canvas: CanvasSize) -> Viewport {
        self.viewport_with(canvas, self.view.min_cell_size)
    }

    /// Window around the local player, or the grid centre before the first
    /// position is known.
    pub fn viewport_with(&self, canvas: CanvasSize, min_cell_size: f32) -> Viewport {
        let grid = self.map.grid;
        let focus = self.local_position.unwrap_or_else(|| {
            Position::new((grid.width / 2) as i32, (grid.height / 2) as i32)
        });
        compute_viewport(grid, focus, self.radius, canvas, min_cell_size)
    }

    /// Terrain code at `position`, if the map carries one.
    pub fn terrain_at(&self, position: Position) -> Option<char> {
        if position.x < 0 || position.y < 0 {
            return None;
        }
        self.map
            .terrain
            .get(position.y as usize)?
            .chars()
            .nth(position.x as usize)
    }

    /// Drops all mirrored state. The message log survives.
    pub fn teardown(&mut self) -> UpdateScope {
        self.store.clear();
        self.interaction.clear();
        self.local_position = None;
        self.own_doc_seen = false;
        self.map = GameMeta::default();
        tracing::info!(uid = %self.identity.uid, "session torn down");
        UpdateScope::GRID
    }

    // ------------------------------------------------------------------
    // Read accessors
    // ------------------------------------------------------------------

    pub fn identity(&self) -> &SessionIdentity {
        &self.identity
    }

    pub fn store(&self) -> &WorldStore {
        &self.store
    }

    pub fn selection(&self) -> &Interaction {
        self.interaction.current()
    }

    pub fn selected_entity(&self) -> Option<&Entity> {
        let id = self.interaction.current().entity_id()?;
        self.store.by_id(id.as_str())
    }

    pub fn selected_hp_ratio(&self) -> Option<f32> {
        self.selected_entity()?.hp_ratio()
    }

    pub fn local_position(&self) -> Option<Position> {
        self.local_position
    }

    /// Own player entity as last mirrored.
    pub fn local_player(&self) -> Option<&Entity> {
        self.store
            .by_id(&self.identity.uid)
            .filter(|entity| entity.is_owned_by(&self.identity.uid))
    }

    pub fn grid(&self) -> GridSize {
        self.map.grid
    }

    pub fn map(&self) -> &GameMeta {
        &self.map
    }

    pub fn messages(&self) -> &MessageLog {
        &self.messages
    }

    pub fn messages_mut(&mut self) -> &mut MessageLog {
        &mut self.messages
    }

    pub fn radius(&self) -> u32 {
        self.radius
    }

    pub fn max_radius(&self) -> u32 {
        self.view.max_radius
    }
}
