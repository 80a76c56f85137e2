//! Top-level client wiring the remote engine, the snapshot feeds and a
//! frontend together.
//!
//! # Architecture
//!
//! ```text
//! Client (Top-level container)
//!   ├─→ Engine (HTTP: join, move, attack, tick)
//!   ├─→ Snapshot transport (live per-collection documents)
//!   └─→ Frontend (UI layer - CLI today)
//! ```
//!
//! The engine and the transport are shared handles. The frontend builds its
//! own session on top of them and owns it until the user quits.

mod builder;

pub use builder::ClientBuilder;

// Re-export Frontend trait from client-frontend-core
pub use client_frontend_core::Frontend;

use anyhow::Result;
use client_frontend_core::ClientServices;

/// Top-level client container.
pub struct Client {
    services: ClientServices,
    frontend: Box<dyn Frontend>,
}

impl Client {
    /// Create a new ClientBuilder.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    pub fn services(&self) -> &ClientServices {
        &self.services
    }

    /// Transfers control to the frontend until the user quits.
    ///
    /// # Errors
    ///
    /// Returns whatever fatal error the frontend reports.
    pub async fn run(self) -> Result<()> {
        let Client {
            services,
            mut frontend,
        } = self;

        tracing::info!(uid = %services.identity.uid, "client running");
        let result = frontend.run(services).await;
        if let Err(err) = &result {
            tracing::error!(error = %err, "frontend exited with error");
        }
        result
    }
}
