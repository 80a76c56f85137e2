//! In-process snapshot transport.
use std::{
    collections::HashMap,
    sync::{Arc, Mutex, PoisonError},
};

use tokio::sync::broadcast::{self, error::RecvError};

use super::{Feed, SnapshotEvent, SnapshotSink, SnapshotTransport, Subscription};

const FEED_BUFFER: usize = 32;

struct FeedState {
    sender: broadcast::Sender<SnapshotEvent>,
    latest: Option<SnapshotEvent>,
}

impl FeedState {
    fn new() -> Self {
        let (sender, _) = broadcast::channel(FEED_BUFFER);
        Self {
            sender,
            latest: None,
        }
    }
}

/// Publish/subscribe transport kept entirely in memory.
///
/// New subscribers immediately receive the latest published snapshot of
/// their feed, mirroring how remote listeners deliver an initial state.
#[derive(Clone, Default)]
pub struct MemoryTransport {
    feeds: Arc<Mutex<HashMap<Feed, FeedState>>>,
}

impl MemoryTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Publishes a full snapshot to every current subscriber of its feed.
    pub fn publish(&self, event: SnapshotEvent) {
        let mut feeds = self.feeds.lock().unwrap_or_else(PoisonError::into_inner);
        let state = feeds.entry(event.feed()).or_insert_with(FeedState::new);
        state.latest = Some(event.clone());
        // No receivers is fine: the snapshot is kept as `latest`.
        let _ = state.sender.send(event);
    }
}

impl SnapshotTransport for MemoryTransport {
    fn subscribe(&self, feed: Feed, sink: SnapshotSink) -> Subscription {
        let (mut receiver, initial) = {
            let mut feeds = self.feeds.lock().unwrap_or_else(PoisonError::into_inner);
            let state = feeds.entry(feed).or_insert_with(FeedState::new);
            (state.sender.subscribe(), state.latest.clone())
        };

        let task = tokio::spawn(async move {
            if let Some(event) = initial {
                if sink.send(event).is_err() {
                    return;
                }
            }

            loop {
                match receiver.recv().await {
                    Ok(event) => {
                        if sink.send(event).is_err() {
                            break;
                        }
                    }
                    Err(RecvError::Lagged(skipped)) => {
                        tracing::warn!(?feed, skipped, "memory transport subscriber lagged");
                    }
                    Err(RecvError::Closed) => break,
                }
            }
        });

        Subscription::new(feed, task)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::Collection;
    use game_core::{Entity, EntityCategory, Position};
    use std::time::Duration;
    use tokio::{sync::mpsc, time::timeout};

    fn zombies(ids: &[&str]) -> SnapshotEvent {
        SnapshotEvent::Entities {
            collection: Collection::Zombies,
            entities: ids
                .iter()
                .map(|id| Entity::new(*id, EntityCategory::Zombie, "WALKER").at(Position::ORIGIN))
                .collect(),
        }
    }

    #[tokio::test]
    async fn late_subscriber_gets_latest_snapshot() {
        let transport = MemoryTransport::new();
        transport.publish(zombies(&["z1"]));
        transport.publish(zombies(&["z1", "z2"]));

        let (tx, mut rx) = mpsc::unbounded_channel();
        let _sub = transport.subscribe(Feed::Entities(Collection::Zombies), tx);

        let event = timeout(Duration::from_secs(1), rx.recv())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(event, zombies(&["z1", "z2"]));
    }

    #[tokio::test]
    async fn feeds_are_isolated() {
        let transport = MemoryTransport::new();
        let (tx, mut rx) = mpsc::unbounded_channel();
        let _sub = transport.subscribe(Feed::Entities(Collection::Items), tx);

        transport.publish(zombies(&["z1"]));
        assert!(
            timeout(Duration::from_millis(50), rx.recv())
                .await
                .is_err()
        );
    }

    #[tokio::test]
    async fn cancel_stops_delivery() {
        let transport = MemoryTransport::new();
        let (tx, mut rx) = mpsc::unbounded_channel();
        let sub = transport.subscribe(Feed::Entities(Collection::Zombies), tx);

        transport.publish(zombies(&["z1"]));
        assert!(
            timeout(Duration::from_secs(1), rx.recv())
                .await
                .unwrap()
                .is_some()
        );

        sub.cancel();
        // The aborted task drops its sender, closing the channel.
        let closed = timeout(Duration::from_secs(1), rx.recv()).await.unwrap();
        assert!(closed.is_none());
    }
}
