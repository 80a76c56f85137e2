//! Engine contract: what the client may ask the authoritative server to do.
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use game_core::{EntityCategory, EntityId, Position, StepDelta};

use crate::error::Result;

/// Target class understood by the attack endpoint.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum TargetType {
    Zombie,
    Player,
    Human,
    Item,
}

impl TargetType {
    /// Wire type for an entity: zombies are `zombie`, player-controlled
    /// humans are `player`, other humans `human`.
    pub fn for_entity(category: EntityCategory, is_player: bool) -> Self {
        match category {
            EntityCategory::Zombie => Self::Zombie,
            EntityCategory::Human if is_player => Self::Player,
            EntityCategory::Human => Self::Human,
            EntityCategory::Item => Self::Item,
        }
    }

    /// Noun used in combat feedback.
    pub const fn noun(self) -> &'static str {
        match self {
            Self::Zombie => "zombie",
            Self::Player | Self::Human => "human",
            Self::Item => "target",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AttackTarget {
    pub id: EntityId,
    pub target_type: TargetType,
}

#[derive(Clone, Debug, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinResponse {
    pub ok: bool,
    #[serde(default)]
    pub x: Option<i32>,
    #[serde(default)]
    pub y: Option<i32>,
    #[serde(default)]
    pub hp: Option<i32>,
    #[serde(default)]
    pub ap: Option<i32>,
    #[serde(default)]
    pub reason: Option<String>,
}

impl JoinResponse {
    pub fn position(&self) -> Option<Position> {
        Some(Position::new(self.x?, self.y?))
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveResponse {
    pub ok: bool,
    #[serde(default)]
    pub x: Option<i32>,
    #[serde(default)]
    pub y: Option<i32>,
    #[serde(default)]
    pub reason: Option<String>,
}

impl MoveResponse {
    pub fn position(&self) -> Option<Position> {
        Some(Position::new(self.x?, self.y?))
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttackResponse {
    pub ok: bool,
    #[serde(default)]
    pub attacker_uid: Option<String>,
    #[serde(default)]
    pub target_id: Option<String>,
    #[serde(default)]
    pub target_type: Option<String>,
    #[serde(default)]
    pub hit: Option<bool>,
    #[serde(default)]
    pub damage: Option<i32>,
    #[serde(default)]
    pub hp_after: Option<i32>,
    #[serde(default)]
    pub dead: Option<bool>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TickResponse {
    pub ok: bool,
    #[serde(default)]
    pub game_id: Option<String>,
    #[serde(default)]
    pub zombies_moved: Option<u32>,
    #[serde(default)]
    pub zombies_total: Option<u32>,
    #[serde(default)]
    pub players_updated: Option<u32>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Authoritative engine operations.
///
/// Implementations must be cheap to share across tasks; the action dispatcher
/// holds one behind an `Arc` and calls it from spawned tasks.
#[async_trait]
pub trait EngineApi: Send + Sync {
    async fn join(&self, uid: &str, display_name: &str) -> Result<JoinResponse>;

    async fn move_player(&self, uid: &str, step: StepDelta) -> Result<MoveResponse>;

    async fn attack(&self, uid: &str, target: &AttackTarget) -> Result<AttackResponse>;

    async fn tick(&self) -> Result<TickResponse>;
}
