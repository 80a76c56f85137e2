//! Document → domain conversion.
use std::str::FromStr;

use game_core::{
    ActorStats, Entity, EntityCategory, EntityId, Equipment, GridSize, ItemStats,
};

use super::value::{Document, Value};
use crate::snapshot::{Collection, GameMeta};

/// Converts one document of `collection` into an [`Entity`].
///
/// Documents that cannot be classified are skipped (`None`), never fatal.
pub fn decode_entity(collection: Collection, doc: &Document) -> Option<Entity> {
    match collection {
        Collection::Players => Some(decode_player(doc)),
        Collection::Humans | Collection::Zombies | Collection::Items => decode_typed(doc),
    }
}

/// Decodes every document, dropping the ones that do not classify.
pub fn decode_entities(collection: Collection, docs: &[Document]) -> Vec<Entity> {
    docs.iter()
        .filter_map(|doc| {
            let entity = decode_entity(collection, doc);
            if entity.is_none() {
                tracing::debug!(%collection, doc = doc.id(), "skipping unclassified document");
            }
            entity
        })
        .collect()
}

/// Player documents are lean: `userId`, `displayName`, `pos`, `hp`, `ap`, `alive`.
fn decode_player(doc: &Document) -> Entity {
    let id = doc
        .str("userId")
        .filter(|uid| !uid.is_empty())
        .unwrap_or(doc.id());
    let kind = doc.str("kind").unwrap_or("PLAYER");

    let mut actor = decode_actor(doc);
    actor.is_player = true;
    actor.hp = actor.hp.or_else(|| doc.i32("hp"));
    actor.ap = actor.ap.or_else(|| doc.i32("ap"));

    Entity {
        id: EntityId::new(id),
        category: EntityCategory::Human,
        kind: kind.to_string(),
        position: doc.position("pos"),
        alive: doc.bool("alive"),
        downed: doc.bool("downed"),
        display_name: doc.str("displayName").map(str::to_owned),
        actor: Some(actor),
        item: None,
    }
}

/// Unified entity documents carry `type` and `kind`; both are required.
fn decode_typed(doc: &Document) -> Option<Entity> {
    let category = EntityCategory::from_str(doc.str("type")?).ok()?;
    let kind = doc.str("kind")?;

    let actor = category.is_actor().then(|| decode_actor(doc));
    let item = (category == EntityCategory::Item).then(|| decode_item(doc));

    Some(Entity {
        id: EntityId::new(doc.id()),
        category,
        kind: kind.to_string(),
        position: doc.position("pos"),
        alive: doc.bool("alive"),
        downed: doc.bool("downed"),
        display_name: doc
            .str("displayName")
            .or_else(|| doc.str("name"))
            .map(str::to_owned),
        actor,
        item,
    })
}

fn decode_actor(doc: &Document) -> ActorStats {
    ActorStats {
        is_player: doc.bool("isPlayer").unwrap_or(false),
        hp: doc.i32("currentHp"),
        max_hp: doc.i32("maxHp"),
        ap: doc.i32("currentAp"),
        max_ap: doc.i32("maxAp"),
        armor: doc.i32("armor"),
        defense: doc.i32("defense"),
        attack_damage: doc.i32("attackDamage"),
        hit_chance: doc.f64("hitChance").map(|v| v as f32),
        move_ap_cost: doc.i32("moveApCost"),
        attack_ap_cost: doc.i32("attackApCost"),
        faction: doc.str("faction").map(str::to_owned),
        hostile_to: doc.string_list("hostileTo").unwrap_or_default(),
        equipment: doc.get("equipment").map(decode_equipment).unwrap_or_default(),
        inventory: doc.string_list("inventory").unwrap_or_default(),
    }
}

fn decode_equipment(value: &Value) -> Equipment {
    let slot = |group: &str, key: &str| {
        value
            .as_map()
            .and_then(|map| map.get(group))
            .and_then(Value::as_map)
            .and_then(|inner| inner.get(key))
            .and_then(Value::as_str)
            .map(str::to_owned)
    };

    Equipment {
        body_under: slot("body", "under"),
        body_outer: slot("body", "outer"),
        weapon_main: slot("weapon", "main"),
        weapon_off: slot("weapon", "off"),
    }
}

fn decode_item(doc: &Document) -> ItemStats {
    ItemStats {
        durability_max: doc.i32("durabilityMax"),
        current_durability: doc.i32("currentDurability"),
        broken: doc.bool("broken"),
        destructible: doc.bool("destructible"),
        slot: doc.str("slot").map(str::to_owned),
        layer: doc.str("layer").map(str::to_owned),
        weight: doc.f64("weight").map(|v| v as f32),
        value: doc.i32("value"),
        armor: doc.i32("armor"),
        damage: doc.i32("damage"),
        range: doc.i32("range"),
    }
}

/// Reads `gridsize {w, h}`, `mapId` and `mapMeta.terrain` from the game document.
pub fn decode_game(doc: &Document) -> GameMeta {
    let grid = doc
        .get("gridsize")
        .and_then(Value::as_map)
        .and_then(|map| {
            let w = map.get("w")?.as_i64()?;
            let h = map.get("h")?.as_i64()?;
            Some(GridSize::new(
                u32::try_from(w).unwrap_or(0),
                u32::try_from(h).unwrap_or(0),
            ))
        })
        .unwrap_or(GridSize::EMPTY);

    let terrain = doc
        .get("mapMeta")
        .and_then(Value::as_map)
        .and_then(|meta| meta.get("terrain"))
        .and_then(Value::as_string_list)
        .unwrap_or_default();

    GameMeta {
        grid,
        map_id: doc.str("mapId").map(str::to_owned),
        terrain,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_core::Position;

    fn doc(json: &str) -> Document {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn player_document_becomes_human() {
        let player = decode_entity(
            Collection::Players,
            &doc(r#"{
                "name": "projects/p/databases/(default)/documents/games/g/players/abc",
                "fields": {
                    "userId": {"stringValue": "u-42"},
                    "displayName": {"stringValue": "Tester"},
                    "pos": {"mapValue": {"fields": {"x": {"integerValue": "3"}, "y": {"integerValue": "9"}}}},
                    "hp": {"integerValue": "100"},
                    "ap": {"integerValue": "3"},
                    "alive": {"booleanValue": true}
                }
            }"#),
        )
        .unwrap();

        assert_eq!(player.id.as_str(), "u-42");
        assert_eq!(player.category, EntityCategory::Human);
        assert_eq!(player.kind, "PLAYER");
        assert_eq!(player.position, Some(Position::new(3, 9)));
        assert_eq!(player.hp(), Some(100));
        assert!(player.is_player());
        assert!(player.is_owned_by("u-42"));
    }

    #[test]
    fn player_without_user_id_uses_document_id() {
        let player = decode_entity(
            Collection::Players,
            &doc(r#"{"name": "projects/p/databases/(default)/documents/games/g/players/abc"}"#),
        )
        .unwrap();
        assert_eq!(player.id.as_str(), "abc");
        assert_eq!(player.position, None);
    }

    #[test]
    fn zombie_document_decodes_actor_component() {
        let zombie = decode_entity(
            Collection::Zombies,
            &doc(r#"{
                "name": "projects/p/databases/(default)/documents/games/g/zombies/z1",
                "fields": {
                    "type": {"stringValue": "ZOMBIE"},
                    "kind": {"stringValue": "WALKER"},
                    "alive": {"booleanValue": false},
                    "currentHp": {"integerValue": "0"},
                    "maxHp": {"integerValue": "60"},
                    "hostileTo": {"arrayValue": {"values": [{"stringValue": "HUMAN"}]}},
                    "equipment": {"mapValue": {"fields": {
                        "weapon": {"mapValue": {"fields": {"main": {"stringValue": "claws"}}}}
                    }}}
                }
            }"#),
        )
        .unwrap();

        assert_eq!(zombie.category, EntityCategory::Zombie);
        assert!(zombie.is_dead());
        assert!(!zombie.is_placed());
        let actor = zombie.actor.unwrap();
        assert_eq!(actor.max_hp, Some(60));
        assert_eq!(actor.hostile_to, vec!["HUMAN".to_string()]);
        assert_eq!(actor.equipment.weapon_main.as_deref(), Some("claws"));
        assert!(zombie.item.is_none());
    }

    #[test]
    fn item_document_decodes_item_component() {
        let item = decode_entity(
            Collection::Items,
            &doc(r#"{
                "name": "projects/p/databases/(default)/documents/games/g/items/i1",
                "fields": {
                    "type": {"stringValue": "ITEM"},
                    "kind": {"stringValue": "CROWBAR"},
                    "pos": {"mapValue": {"fields": {"x": {"integerValue": "1"}, "y": {"integerValue": "1"}}}},
                    "damage": {"integerValue": "4"},
                    "weight": {"doubleValue": 2.5}
                }
            }"#),
        )
        .unwrap();

        assert_eq!(item.category, EntityCategory::Item);
        assert!(item.actor.is_none());
        let stats = item.item.unwrap();
        assert_eq!(stats.damage, Some(4));
        assert_eq!(stats.weight, Some(2.5));
    }

    #[test]
    fn untyped_documents_are_skipped() {
        let docs = vec![
            doc(r#"{"name": "a/zombies/z1", "fields": {"kind": {"stringValue": "WALKER"}}}"#),
            doc(r#"{"name": "a/zombies/z2", "fields": {
                "type": {"stringValue": "ZOMBIE"}, "kind": {"stringValue": "WALKER"}
            }}"#),
        ];
        let entities = decode_entities(Collection::Zombies, &docs);
        assert_eq!(entities.len(), 1);
        assert_eq!(entities[0].id.as_str(), "z2");
    }

    #[test]
    fn game_document_yields_grid_and_terrain() {
        let meta = decode_game(&doc(r#"{
            "name": "projects/p/databases/(default)/documents/games/lockdown2030",
            "fields": {
                "gridsize": {"mapValue": {"fields": {"w": {"integerValue": "32"}, "h": {"integerValue": "24"}}}},
                "mapId": {"stringValue": "city-1"},
                "mapMeta": {"mapValue": {"fields": {
                    "terrain": {"arrayValue": {"values": [{"stringValue": "0011"}, {"stringValue": "2200"}]}}
                }}}
            }
        }"#));

        assert_eq!(meta.grid, GridSize::new(32, 24));
        assert_eq!(meta.map_id.as_deref(), Some("city-1"));
        assert_eq!(meta.terrain, vec!["0011".to_string(), "2200".to_string()]);
    }

    #[test]
    fn game_document_without_grid_is_empty() {
        let meta = decode_game(&doc(r#"{"name": "a/games/g"}"#));
        assert!(meta.grid.is_empty());
    }
}
