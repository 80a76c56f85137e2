//! Entities mirrored from the remote world: players, NPC humans, zombies and items.
use core::{borrow::Borrow, fmt};

use strum::{Display, EnumIter, EnumString};

use crate::position::Position;

/// Max HP assumed for zombies whose document carries no `maxHp`.
pub const DEFAULT_ZOMBIE_MAX_HP: i32 = 60;

/// Document identifier, unique across every entity category.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct EntityId(pub String);

impl EntityId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for EntityId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for EntityId {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl From<String> for EntityId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Broad entity class. Players and NPC humans both map to [`EntityCategory::Human`].
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Display, EnumString, EnumIter,
)]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "UPPERCASE"))]
pub enum EntityCategory {
    Human,
    Zombie,
    Item,
}

impl EntityCategory {
    pub const fn is_actor(self) -> bool {
        matches!(self, Self::Human | Self::Zombie)
    }

    /// Lowercase noun used in player-facing text.
    pub const fn noun(self) -> &'static str {
        match self {
            Self::Human => "human",
            Self::Zombie => "zombie",
            Self::Item => "item",
        }
    }
}

/// Worn and wielded item ids.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Equipment {
    pub body_under: Option<String>,
    pub body_outer: Option<String>,
    pub weapon_main: Option<String>,
    pub weapon_off: Option<String>,
}

/// Combat-relevant numbers of a human or zombie. All optional: documents are
/// sparse and the client never derives rules from missing values.
#[derive(Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActorStats {
    pub is_player: bool,
    pub hp: Option<i32>,
    pub max_hp: Option<i32>,
    pub ap: Option<i32>,
    pub max_ap: Option<i32>,
    pub armor: Option<i32>,
    pub defense: Option<i32>,
    pub attack_damage: Option<i32>,
    pub hit_chance: Option<f32>,
    pub move_ap_cost: Option<i32>,
    pub attack_ap_cost: Option<i32>,
    pub faction: Option<String>,
    pub hostile_to: Vec<String>,
    pub equipment: Equipment,
    pub inventory: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemStats {
    pub durability_max: Option<i32>,
    pub current_durability: Option<i32>,
    pub broken: Option<bool>,
    pub destructible: Option<bool>,
    pub slot: Option<String>,
    pub layer: Option<String>,
    pub weight: Option<f32>,
    pub value: Option<i32>,
    pub armor: Option<i32>,
    pub damage: Option<i32>,
    pub range: Option<i32>,
}

/// One mirrored world object.
///
/// `position == None` excludes the entity from every spatial query.
/// `alive == None` means "assume alive".
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Entity {
    pub id: EntityId,
    pub category: EntityCategory,
    pub kind: String,
    pub position: Option<Position>,
    pub alive: Option<bool>,
    pub downed: Option<bool>,
    pub display_name: Option<String>,
    pub actor: Option<ActorStats>,
    pub item: Option<ItemStats>,
}

impl Entity {
    pub fn new(id: impl Into<EntityId>, category: EntityCategory, kind: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            category,
            kind: kind.into(),
            position: None,
            alive: None,
            downed: None,
            display_name: None,
            actor: category.is_actor().then(ActorStats::default),
            item: (category == EntityCategory::Item).then(ItemStats::default),
        }
    }

    pub fn at(mut self, position: Position) -> Self {
        self.position = Some(position);
        self
    }

    pub fn with_alive(mut self, alive: bool) -> Self {
        self.alive = Some(alive);
        self
    }

    pub fn with_hp(mut self, hp: i32, max_hp: Option<i32>) -> Self {
        let actor = self.actor.get_or_insert_with(ActorStats::default);
        actor.hp = Some(hp);
        actor.max_hp = max_hp;
        self
    }

    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }

    /// True only when the document explicitly says `alive == false`.
    pub fn is_dead(&self) -> bool {
        self.alive == Some(false)
    }

    pub fn is_placed(&self) -> bool {
        self.position.is_some()
    }

    /// True for the human entity whose id equals the local session user id.
    pub fn is_owned_by(&self, uid: &str) -> bool {
        self.category == EntityCategory::Human && self.id.as_str() == uid
    }

    pub fn is_player(&self) -> bool {
        self.actor.as_ref().is_some_and(|a| a.is_player) || self.kind.eq_ignore_ascii_case("PLAYER")
    }

    pub fn hp(&self) -> Option<i32> {
        self.actor.as_ref().and_then(|a| a.hp)
    }

    pub fn max_hp(&self) -> Option<i32> {
        self.actor.as_ref().and_then(|a| a.max_hp)
    }

    /// Fraction of HP left in `[0, 1]`; zombies without `maxHp` use
    /// [`DEFAULT_ZOMBIE_MAX_HP`].
    pub fn hp_ratio(&self) -> Option<f32> {
        let hp = self.hp()?;
        let max = match (self.max_hp(), self.category) {
            (Some(max), _) => max,
            (None, EntityCategory::Zombie) => DEFAULT_ZOMBIE_MAX_HP,
            (None, _) => return None,
        };
        if max <= 0 {
            return Some(0.0);
        }
        Some((hp as f32 / max as f32).clamp(0.0, 1.0))
    }

    /// Short player-facing name: display name if known, else the category noun.
    pub fn label(&self) -> &str {
        self.display_name
            .as_deref()
            .filter(|name| !name.is_empty())
            .unwrap_or(self.category.noun())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::str::FromStr;

    #[test]
    fn category_parses_document_tags() {
        assert_eq!(EntityCategory::from_str("ZOMBIE"), Ok(EntityCategory::Zombie));
        assert_eq!(EntityCategory::from_str("human"), Ok(EntityCategory::Human));
        assert!(EntityCategory::from_str("BUILDING").is_err());
        assert_eq!(EntityCategory::Item.to_string(), "ITEM");
    }

    #[test]
    fn missing_alive_flag_means_alive() {
        let zombie = Entity::new("z1", EntityCategory::Zombie, "WALKER");
        assert!(!zombie.is_dead());
        assert!(zombie.clone().with_alive(false).is_dead());
        assert!(!zombie.with_alive(true).is_dead());
    }

    #[test]
    fn ownership_requires_human_category() {
        let player = Entity::new("u1", EntityCategory::Human, "PLAYER");
        assert!(player.is_owned_by("u1"));
        assert!(!player.is_owned_by("u2"));

        let zombie = Entity::new("u1", EntityCategory::Zombie, "WALKER");
        assert!(!zombie.is_owned_by("u1"));
    }

    #[test]
    fn zombie_hp_ratio_defaults_max() {
        let zombie = Entity::new("z1", EntityCategory::Zombie, "WALKER").with_hp(30, None);
        assert_eq!(zombie.hp_ratio(), Some(0.5));

        let human = Entity::new("h1", EntityCategory::Human, "TRADER").with_hp(30, None);
        assert_eq!(human.hp_ratio(), None);

        let overhealed = Entity::new("z2", EntityCategory::Zombie, "WALKER").with_hp(90, Some(60));
        assert_eq!(overhealed.hp_ratio(), Some(1.0));
    }

    #[test]
    fn label_prefers_display_name() {
        let zombie = Entity::new("z1", EntityCategory::Zombie, "WALKER");
        assert_eq!(zombie.label(), "zombie");
        let named = Entity::new("h1", EntityCategory::Human, "PLAYER").with_display_name("Ana");
        assert_eq!(named.label(), "Ana");
    }
}
