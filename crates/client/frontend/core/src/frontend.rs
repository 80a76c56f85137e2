//! Trait describing a runnable client front-end.
use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;

use client_engine::{EngineApi, SnapshotTransport};

use crate::config::SessionIdentity;

/// Collaborators a frontend needs to run a session.
///
/// Frontends do NOT own the engine or the transport; they get shared handles
/// and build their own [`crate::Session`] on top.
#[derive(Clone)]
pub struct ClientServices {
    pub engine: Arc<dyn EngineApi>,
    pub transport: Arc<dyn SnapshotTransport>,
    pub identity: SessionIdentity,
}

impl ClientServices {
    pub fn new(
        engine: Arc<dyn EngineApi>,
        transport: Arc<dyn SnapshotTransport>,
        identity: SessionIdentity,
    ) -> Self {
        Self {
            engine,
            transport,
            identity,
        }
    }
}

/// Frontend abstraction for UI layers.
///
/// # Implementations
///
/// - `CliFrontend`: Terminal-based UI (ratatui + crossterm)
#[async_trait]
pub trait Frontend: Send {
    /// Run the frontend event loop until the user quits.
    ///
    /// # Errors
    ///
    /// Returns an error if the frontend encounters a fatal error.
    async fn run(&mut self, services: ClientServices) -> Result<()>;
}
