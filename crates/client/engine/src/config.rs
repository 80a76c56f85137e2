//! Connection settings for the engine and the document store.
use std::{env, time::Duration};

use crate::error::ConfigError;

pub const DEFAULT_ENGINE_BASE_URL: &str =
    "https://ld2030-52812703983.europe-west4.run.app/api/ld2030/v1";
pub const DEFAULT_GAME_ID: &str = "lockdown2030";

/// Engine HTTP configuration.
#[derive(Clone, Debug)]
pub struct EngineConfig {
    pub base_url: String,
    pub game_id: String,
    pub request_timeout: Duration,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_ENGINE_BASE_URL.to_string(),
            game_id: DEFAULT_GAME_ID.to_string(),
            request_timeout: Duration::from_secs(10),
        }
    }
}

impl EngineConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `ENGINE_BASE_URL` - Engine API root (default: public v1 endpoint)
    /// - `GAME_ID` - Game document id (default: `lockdown2030`)
    /// - `ENGINE_TIMEOUT_MS` - Per-request timeout (default: 10000)
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Ok(url) = env::var("ENGINE_BASE_URL") {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(ConfigError::Invalid {
                    key: "ENGINE_BASE_URL",
                    value: url,
                });
            }
            config.base_url = url.trim_end_matches('/').to_string();
        }

        if let Some(game_id) = read_non_empty("GAME_ID") {
            config.game_id = game_id;
        }

        if let Some(ms) = read_env::<u64>("ENGINE_TIMEOUT_MS") {
            config.request_timeout = Duration::from_millis(ms.max(1));
        }

        Ok(config)
    }
}

/// Document store (Firestore REST) polling configuration.
#[derive(Clone, Debug)]
pub struct SnapshotConfig {
    pub project_id: String,
    pub game_id: String,
    /// Web API key appended as `key=` when present.
    pub api_key: Option<String>,
    /// Bearer token for authenticated reads.
    pub id_token: Option<String>,
    pub poll_interval: Duration,
    pub page_size: u32,
}

impl SnapshotConfig {
    pub fn new(project_id: impl Into<String>, game_id: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            game_id: game_id.into(),
            api_key: None,
            id_token: None,
            poll_interval: Duration::from_millis(1000),
            page_size: 300,
        }
    }

    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `FIRESTORE_PROJECT_ID` - Project hosting the game documents (required)
    /// - `GAME_ID` - Game document id (default: `lockdown2030`)
    /// - `FIRESTORE_API_KEY` - Optional web API key
    /// - `FIRESTORE_ID_TOKEN` - Optional bearer token
    /// - `SNAPSHOT_POLL_MS` - Poll period (default: 1000, min: 100)
    pub fn from_env() -> Result<Self, ConfigError> {
        let project_id =
            read_non_empty("FIRESTORE_PROJECT_ID").ok_or(ConfigError::Missing("FIRESTORE_PROJECT_ID"))?;
        let game_id = read_non_empty("GAME_ID").unwrap_or_else(|| DEFAULT_GAME_ID.to_string());

        let mut config = Self::new(project_id, game_id);
        config.api_key = read_non_empty("FIRESTORE_API_KEY");
        config.id_token = read_non_empty("FIRESTORE_ID_TOKEN");

        if let Some(ms) = read_env::<u64>("SNAPSHOT_POLL_MS") {
            config.poll_interval = Duration::from_millis(ms.max(100));
        }

        Ok(config)
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}

fn read_non_empty(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
