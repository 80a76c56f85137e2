//! World snapshot store.
//!
//! Holds the latest full list of every collection and three derived indexes:
//! id → slot, position → ids, and a stable id-sorted order. Each replacement
//! swaps one collection wholesale and rebuilds the indexes, so readers never
//! see a half-applied update.
use std::collections::{BTreeMap, HashMap};

use client_engine::Collection;
use game_core::{Entity, EntityCategory, EntityId, Position};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Slot {
    collection: Collection,
    index: usize,
}

#[derive(Clone, Debug, Default)]
pub struct WorldStore {
    collections: BTreeMap<Collection, Vec<Entity>>,
    by_id: HashMap<EntityId, Slot>,
    by_position: HashMap<Position, Vec<EntityId>>,
    ordered: Vec<EntityId>,
    revision: u64,
}

impl WorldStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces one collection with a full snapshot.
    pub fn replace_collection(&mut self, collection: Collection, entities: Vec<Entity>) {
        self.collections.insert(collection, entities);
        self.rebuild_indexes();
        self.revision += 1;
    }

    pub fn clear(&mut self) {
        self.collections.clear();
        self.by_id.clear();
        self.by_position.clear();
        self.ordered.clear();
        self.revision += 1;
    }

    /// Bumped on every replacement or clear.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn by_id(&self, id: &str) -> Option<&Entity> {
        let slot = self.by_id.get(id)?;
        self.collections.get(&slot.collection)?.get(slot.index)
    }

    pub fn category_of(&self, id: &str) -> Option<EntityCategory> {
        self.by_id(id).map(|entity| entity.category)
    }

    pub fn collection_of(&self, id: &str) -> Option<Collection> {
        self.by_id.get(id).map(|slot| slot.collection)
    }

    /// Placed entities on a tile, across all collections, ordered by id.
    pub fn entities_at(&self, position: Position) -> Vec<&Entity> {
        self.by_position
            .get(&position)
            .into_iter()
            .flatten()
            .filter_map(|id| self.by_id(id.as_str()))
            .collect()
    }

    /// Every indexed entity, ordered by id.
    pub fn all_entities(&self) -> impl Iterator<Item = &Entity> {
        self.ordered.iter().filter_map(|id| self.by_id(id.as_str()))
    }

    /// Raw snapshot of one collection, as delivered.
    pub fn collection(&self, collection: Collection) -> &[Entity] {
        self.collections
            .get(&collection)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.ordered.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ordered.is_empty()
    }

    /// Collections are indexed in a fixed order, so when the same id shows up
    /// twice the earlier collection wins regardless of arrival order.
    fn rebuild_indexes(&mut self) {
        self.by_id.clear();
        self.by_position.clear();

        for (&collection, entities) in &self.collections {
            for (index, entity) in entities.iter().enumerate() {
                if let Some(existing) = self.by_id.get(&entity.id) {
                    tracing::warn!(
                        id = %entity.id,
                        kept = %existing.collection,
                        dropped = %collection,
                        "duplicate entity id across snapshots"
                    );
                    continue;
                }
                self.by_id.insert(entity.id.clone(), Slot { collection, index });
                if let Some(position) = entity.position {
                    self.by_position
                        .entry(position)
                        .or_default()
                        .push(entity.id.clone());
                }
            }
        }

        for ids in self.by_position.values_mut() {
            ids.sort();
        }

        self.ordered = self.by_id.keys().cloned().collect();
        self.ordered.sort();
    }
}
