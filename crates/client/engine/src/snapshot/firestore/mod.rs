//! Firestore REST snapshot transport.
//!
//! Polls `games/{gameId}` and its entity collections on a fixed period and
//! forwards a full snapshot only when the decoded content changed.
mod decode;
mod value;

pub use decode::{decode_entities, decode_entity, decode_game};
pub use value::{Document, ListDocumentsResponse, Value};

use std::sync::Arc;

use reqwest::StatusCode;
use tokio::time::{self, MissedTickBehavior};

use super::{Feed, GameMeta, SnapshotEvent, SnapshotSink, SnapshotTransport, Subscription};
use crate::{config::SnapshotConfig, error::TransportError, snapshot::Collection};

const FIRESTORE_BASE_URL: &str = "https://firestore.googleapis.com/v1";

struct FirestoreClient {
    config: SnapshotConfig,
    base_url: String,
    http_client: reqwest::Client,
}

impl FirestoreClient {
    fn game_path(&self) -> String {
        format!(
            "{}/projects/{}/databases/(default)/documents/games/{}",
            self.base_url, self.config.project_id, self.config.game_id
        )
    }

    fn request(&self, url: &str) -> reqwest::RequestBuilder {
        let mut request = self.http_client.get(url);
        if let Some(key) = &self.config.api_key {
            request = request.query(&[("key", key)]);
        }
        if let Some(token) = &self.config.id_token {
            request = request.bearer_auth(token);
        }
        request
    }

    async fn fetch_game(&self) -> Result<GameMeta, TransportError> {
        let response = self.request(&self.game_path()).send().await?;
        let status = response.status();
        let text = response.text().await?;

        if status == StatusCode::NOT_FOUND {
            return Ok(GameMeta::default());
        }
        if !status.is_success() {
            return Err(TransportError::Status {
                status: status.as_u16(),
                body: text,
            });
        }

        let doc: Document = serde_json::from_str(&text).map_err(TransportError::Decode)?;
        Ok(decode_game(&doc))
    }

    async fn fetch_collection(&self, collection: Collection) -> Result<Vec<Document>, TransportError> {
        let url = format!("{}/{}", self.game_path(), collection);
        let page_size = self.config.page_size.to_string();
        let mut documents = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let mut request = self.request(&url).query(&[("pageSize", page_size.as_str())]);
            if let Some(token) = &page_token {
                request = request.query(&[("pageToken", token.as_str())]);
            }

            let response = request.send().await?;
            let status = response.status();
            let text = response.text().await?;
            if !status.is_success() {
                return Err(TransportError::Status {
                    status: status.as_u16(),
                    body: text,
                });
            }

            let page: ListDocumentsResponse =
                serde_json::from_str(&text).map_err(TransportError::Decode)?;
            documents.extend(page.documents);

            match page.next_page_token.filter(|token| !token.is_empty()) {
                Some(token) => page_token = Some(token),
                None => break,
            }
        }

        Ok(documents)
    }

    async fn poll(&self, feed: Feed) -> Result<SnapshotEvent, TransportError> {
        match feed {
            Feed::Game => Ok(SnapshotEvent::Game(self.fetch_game().await?)),
            Feed::Entities(collection) => {
                let docs = self.fetch_collection(collection).await?;
                Ok(SnapshotEvent::Entities {
                    collection,
                    entities: decode_entities(collection, &docs),
                })
            }
        }
    }
}

/// Polling implementation of [`SnapshotTransport`] over the Firestore REST API.
#[derive(Clone)]
pub struct FirestoreTransport {
    client: Arc<FirestoreClient>,
}

impl FirestoreTransport {
    pub fn new(config: SnapshotConfig) -> Result<Self, TransportError> {
        Self::with_base_url(config, FIRESTORE_BASE_URL)
    }

    /// Points the transport at another REST root (e.g. a local emulator).
    pub fn with_base_url(
        config: SnapshotConfig,
        base_url: impl Into<String>,
    ) -> Result<Self, TransportError> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        let mut builder = reqwest::Client::builder();
        if crate::http::is_loopback(&base_url) {
            builder = builder.no_proxy();
        }
        let http_client = builder.build()?;

        Ok(Self {
            client: Arc::new(FirestoreClient {
                config,
                base_url,
                http_client,
            }),
        })
    }
}

impl SnapshotTransport for FirestoreTransport {
    fn subscribe(&self, feed: Feed, sink: SnapshotSink) -> Subscription {
        let client = Arc::clone(&self.client);

        let task = tokio::spawn(async move {
            let mut interval = time::interval(client.config.poll_interval);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
            let mut last: Option<SnapshotEvent> = None;

            tracing::info!(?feed, "snapshot polling started");

            loop {
                interval.tick().await;
                if sink.is_closed() {
                    break;
                }

                match client.poll(feed).await {
                    Ok(event) => {
                        if last.as_ref() == Some(&event) {
                            continue;
                        }
                        if sink.send(event.clone()).is_err() {
                            break;
                        }
                        last = Some(event);
                    }
                    Err(err) => {
                        tracing::warn!(?feed, error = %err, "snapshot poll failed");
                    }
                }
            }

            tracing::info!(?feed, "snapshot polling stopped");
        });

        Subscription::new(feed, task)
    }
}
