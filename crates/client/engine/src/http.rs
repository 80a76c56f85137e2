//! Engine client over JSON-POST endpoints.
use async_trait::async_trait;
use serde::{Serialize, de::DeserializeOwned};
use strum::Display;

use game_core::StepDelta;

use crate::{
    api::{AttackResponse, AttackTarget, EngineApi, JoinResponse, MoveResponse, TickResponse},
    config::EngineConfig,
    error::{EngineError, Result},
};

#[derive(Clone, Copy, Debug, Display)]
#[strum(serialize_all = "kebab-case")]
enum Endpoint {
    JoinGame,
    MovePlayer,
    AttackEntity,
    TickGame,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JoinRequest<'a> {
    game_id: &'a str,
    uid: &'a str,
    display_name: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct MoveRequest<'a> {
    game_id: &'a str,
    uid: &'a str,
    dx: i32,
    dy: i32,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AttackRequest<'a> {
    game_id: &'a str,
    uid: &'a str,
    target_id: &'a str,
    target_type: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TickRequest<'a> {
    game_id: &'a str,
}

/// HTTP implementation of [`EngineApi`].
#[derive(Clone, Debug)]
pub struct HttpEngineClient {
    base_url: String,
    game_id: String,
    http_client: reqwest::Client,
}

impl HttpEngineClient {
    pub fn new(config: &EngineConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder().timeout(config.request_timeout);
        if is_loopback(&config.base_url) {
            builder = builder.no_proxy();
        }
        let http_client = builder.build()?;

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            game_id: config.game_id.clone(),
            http_client,
        })
    }

    async fn post_json<T, R>(&self, endpoint: Endpoint, body: &T) -> Result<R>
    where
        T: Serialize + Sync,
        R: DeserializeOwned,
    {
        let url = format!("{}/{}", self.base_url, endpoint);
        tracing::debug!(%url, "engine request");

        let response = self.http_client.post(&url).json(body).send().await?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            tracing::warn!(%url, status = status.as_u16(), "engine request rejected");
            return Err(EngineError::Status {
                status: status.as_u16(),
                body: text,
            });
        }

        serde_json::from_str(&text).map_err(|err| {
            tracing::warn!(%url, body = %text, "engine response did not match contract");
            EngineError::Decode(err)
        })
    }
}

/// Local engines and emulators are reached directly, bypassing any system proxy.
pub(crate) fn is_loopback(url: &str) -> bool {
    let rest = url
        .strip_prefix("http://")
        .or_else(|| url.strip_prefix("https://"))
        .unwrap_or(url);
    rest.starts_with("127.0.0.1") || rest.starts_with("localhost") || rest.starts_with("[::1]")
}

#[async_trait]
impl EngineApi for HttpEngineClient {
    async fn join(&self, uid: &str, display_name: &str) -> Result<JoinResponse> {
        let body = JoinRequest {
            game_id: &self.game_id,
            uid,
            display_name,
        };
        self.post_json(Endpoint::JoinGame, &body).await
    }

    async fn move_player(&self, uid: &str, step: StepDelta) -> Result<MoveResponse> {
        let body = MoveRequest {
            game_id: &self.game_id,
            uid,
            dx: step.dx(),
            dy: step.dy(),
        };
        self.post_json(Endpoint::MovePlayer, &body).await
    }

    async fn attack(&self, uid: &str, target: &AttackTarget) -> Result<AttackResponse> {
        let body = AttackRequest {
            game_id: &self.game_id,
            uid,
            target_id: target.id.as_str(),
            target_type: target.target_type.to_string(),
        };
        self.post_json(Endpoint::AttackEntity, &body).await
    }

    async fn tick(&self) -> Result<TickResponse> {
        let body = TickRequest {
            game_id: &self.game_id,
        };
        self.post_json(Endpoint::TickGame, &body).await
    }
}
