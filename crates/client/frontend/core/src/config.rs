//! Frontend configuration structures and loaders.
//!
//! This module contains UI-specific configuration that is shared across
//! different frontend implementations (CLI, GUI, etc.).

use std::env;

use anyhow::{Result, bail};

/// Frontend-specific configuration.
#[derive(Clone, Debug, Default)]
pub struct FrontendConfig {
    pub channels: ChannelConfig,
    pub messages: MessageConfig,
    pub view: ViewConfig,
}

impl FrontendConfig {
    pub const fn new(channels: ChannelConfig, messages: MessageConfig, view: ViewConfig) -> Self {
        Self {
            channels,
            messages,
            view,
        }
    }

    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `ACTION_BUFFER` - Dispatch outcome queue size (default: 16)
    /// - `MESSAGE_CAPACITY` - Message log capacity (default: 64)
    /// - `VIEW_MAX_RADIUS` - Largest zoom radius in tiles (default: 1)
    /// - `VIEW_RADIUS` - Initial zoom radius, clamped to the max (default: max)
    /// - `VIEW_MIN_CELL_SIZE` - Smallest cell edge in canvas units (default: 44)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(capacity) = read_env::<usize>("ACTION_BUFFER") {
            config.channels.action_buffer = capacity.max(1);
        }

        if let Some(capacity) = read_env::<usize>("MESSAGE_CAPACITY") {
            config.messages.capacity = capacity.max(1);
        }

        if let Some(max_radius) = read_env::<u32>("VIEW_MAX_RADIUS") {
            config.view.max_radius = max_radius;
            config.view.initial_radius = max_radius;
        }
        if let Some(radius) = read_env::<u32>("VIEW_RADIUS") {
            config.view.initial_radius = radius.min(config.view.max_radius);
        }
        if let Some(size) = read_env::<f32>("VIEW_MIN_CELL_SIZE") {
            if size.is_finite() && size > 0.0 {
                config.view.min_cell_size = size;
            }
        }

        config
    }
}

#[derive(Clone, Debug)]
pub struct ChannelConfig {
    pub action_buffer: usize,
}

impl Default for ChannelConfig {
    fn default() -> Self {
        Self { action_buffer: 16 }
    }
}

#[derive(Clone, Debug)]
pub struct MessageConfig {
    pub capacity: usize,
}

impl Default for MessageConfig {
    fn default() -> Self {
        Self { capacity: 64 }
    }
}

/// Zoom and cell sizing.
#[derive(Clone, Debug)]
pub struct ViewConfig {
    pub max_radius: u32,
    pub initial_radius: u32,
    pub min_cell_size: f32,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            max_radius: 1,
            initial_radius: 1,
            min_cell_size: 44.0,
        }
    }
}

/// Who is playing this session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionIdentity {
    pub uid: String,
    pub display_name: String,
}

impl SessionIdentity {
    pub fn new(uid: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            uid: uid.into(),
            display_name: display_name.into(),
        }
    }

    /// Environment variables:
    /// - `LOCKDOWN_UID` - Authenticated user id (required)
    /// - `DISPLAY_NAME` - Name shown to other players (default: `Player`)
    pub fn from_env() -> Result<Self> {
        let uid = env::var("LOCKDOWN_UID").unwrap_or_default();
        if uid.trim().is_empty() {
            bail!("LOCKDOWN_UID must be set to the signed-in user id");
        }
        let display_name = env::var("DISPLAY_NAME")
            .ok()
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| "Player".to_string());

        Ok(Self::new(uid.trim(), display_name))
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
