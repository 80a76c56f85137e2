//! Client builder with dependency injection pattern.

use std::sync::Arc;

use anyhow::{Context, Result};
use client_engine::{EngineApi, SnapshotTransport};
use client_frontend_core::{ClientServices, SessionIdentity};

use crate::{Client, Frontend};

/// Builder for constructing a Client with proper validation.
///
/// Every collaborator is required; `build()` fails fast on the first one
/// that is missing.
#[derive(Default)]
pub struct ClientBuilder {
    engine: Option<Arc<dyn EngineApi>>,
    transport: Option<Arc<dyn SnapshotTransport>>,
    identity: Option<SessionIdentity>,
    frontend: Option<Box<dyn Frontend>>,
}

impl ClientBuilder {
    /// Create a new ClientBuilder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the engine used for join, move, attack and tick calls.
    pub fn engine(mut self, engine: impl EngineApi + 'static) -> Self {
        self.engine = Some(Arc::new(engine));
        self
    }

    /// Set the live snapshot source.
    pub fn transport(mut self, transport: impl SnapshotTransport + 'static) -> Self {
        self.transport = Some(Arc::new(transport));
        self
    }

    pub fn identity(mut self, identity: SessionIdentity) -> Self {
        self.identity = Some(identity);
        self
    }

    /// Set the frontend (required).
    ///
    /// The frontend handles UI rendering and user input. It receives shared
    /// engine and transport handles when the client runs.
    pub fn frontend(mut self, frontend: impl Frontend + 'static) -> Self {
        self.frontend = Some(Box::new(frontend));
        self
    }

    /// Build the Client.
    ///
    /// # Errors
    ///
    /// Returns an error if the engine, transport, identity or frontend is
    /// not set.
    pub fn build(self) -> Result<Client> {
        let engine = self
            .engine
            .context("Engine is required. Use .engine() to set it.")?;

        let transport = self
            .transport
            .context("Snapshot transport is required. Use .transport() to set it.")?;

        let identity = self
            .identity
            .context("Identity is required. Use .identity() to set it.")?;

        let frontend = self
            .frontend
            .context("Frontend is required. Use .frontend() to set it.")?;

        Ok(Client {
            services: ClientServices::new(engine, transport, identity),
            frontend,
        })
    }
}
