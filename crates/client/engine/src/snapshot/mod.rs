//! Live world snapshots.
//!
//! A transport delivers the *full* current list of one collection every time
//! it changes. Consumers replace their copy wholesale; there are no diffs.
pub mod firestore;
mod memory;

pub use memory::MemoryTransport;

use strum::{AsRefStr, Display, EnumIter, EnumString};
use tokio::{sync::mpsc, task::JoinHandle};

use game_core::{Entity, EntityCategory, GridSize};

/// Entity collection under `games/{gameId}/`.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Display, EnumString, EnumIter, AsRefStr,
)]
#[strum(serialize_all = "lowercase")]
pub enum Collection {
    Players,
    Humans,
    Zombies,
    Items,
}

impl Collection {
    pub const ALL: [Self; 4] = [Self::Players, Self::Humans, Self::Zombies, Self::Items];

    /// Category every entity of this collection belongs to.
    pub const fn category(self) -> EntityCategory {
        match self {
            Self::Players | Self::Humans => EntityCategory::Human,
            Self::Zombies => EntityCategory::Zombie,
            Self::Items => EntityCategory::Item,
        }
    }
}

/// What a subscription listens to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Feed {
    /// The game document itself (grid size, map metadata).
    Game,
    Entities(Collection),
}

/// Map-level metadata from the game document.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct GameMeta {
    pub grid: GridSize,
    pub map_id: Option<String>,
    /// One string per row; each character is a terrain code.
    pub terrain: Vec<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum SnapshotEvent {
    Game(GameMeta),
    Entities {
        collection: Collection,
        entities: Vec<Entity>,
    },
}

impl SnapshotEvent {
    pub fn feed(&self) -> Feed {
        match self {
            Self::Game(_) => Feed::Game,
            Self::Entities { collection, .. } => Feed::Entities(*collection),
        }
    }
}

pub type SnapshotSink = mpsc::UnboundedSender<SnapshotEvent>;

/// Source of live snapshots.
///
/// `subscribe` must be called from within a tokio runtime; implementations
/// spawn a task that pushes events into `sink` until the returned
/// [`Subscription`] is cancelled or dropped, or the sink is closed.
pub trait SnapshotTransport: Send + Sync {
    fn subscribe(&self, feed: Feed, sink: SnapshotSink) -> Subscription;
}

/// Handle to one active listener. Cancels on drop.
#[derive(Debug)]
pub struct Subscription {
    feed: Feed,
    task: Option<JoinHandle<()>>,
}

impl Subscription {
    pub fn new(feed: Feed, task: JoinHandle<()>) -> Self {
        Self {
            feed,
            task: Some(task),
        }
    }

    pub fn feed(&self) -> Feed {
        self.feed
    }

    pub fn cancel(mut self) {
        self.stop();
    }

    fn stop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
            tracing::debug!(feed = ?self.feed, "snapshot subscription cancelled");
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.stop();
    }
}
