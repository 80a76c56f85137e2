//! Lockdown game client binary.
//!
//! This binary is the composition root that assembles:
//! 1. The HTTP engine client
//! 2. A snapshot transport (document store polling, or in-memory offline)
//! 3. The frontend (UI)
//!
//! # Examples
//!
//! ```bash
//! LOCKDOWN_UID=abc123 FIRESTORE_PROJECT_ID=my-project cargo run -p lockdown-client
//! ```

use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    #[cfg(feature = "frontend-cli")]
    {
        run_cli().await?;
    }

    #[cfg(not(feature = "frontend-cli"))]
    {
        compile_error!("At least one frontend feature must be enabled (frontend-cli, ...)");
    }

    Ok(())
}

/// Run the CLI frontend.
#[cfg(feature = "frontend-cli")]
async fn run_cli() -> Result<()> {
    use client_engine::{
        EngineConfig, FirestoreTransport, HttpEngineClient, MemoryTransport, SnapshotConfig,
    };
    use client_frontend_cli::{CliConfig, CliFrontend, FrontendConfig, logging};
    use client_frontend_core::SessionIdentity;
    use lockdown_client::Client;

    // 1. Load configuration from environment
    let identity = SessionIdentity::from_env()?;
    let engine_config = EngineConfig::from_env()?;
    let frontend_config = FrontendConfig::from_env();
    let cli_config = CliConfig::from_env();

    // 2. Setup logging
    let log_file = logging::setup_logging(cli_config.log_dir.as_deref(), &identity.uid)?;

    tracing::info!("Starting Lockdown client");
    tracing::info!("Log file: {}", log_file.display());
    tracing::info!("Engine: {} (game {})", engine_config.base_url, engine_config.game_id);

    // 3. Engine and snapshot transport
    let engine = HttpEngineClient::new(&engine_config)?;

    let mut builder = Client::builder().engine(engine).identity(identity);

    builder = match SnapshotConfig::from_env() {
        Ok(snapshot_config) => {
            tracing::info!(
                "Snapshot polling: project={} every {:?}",
                snapshot_config.project_id,
                snapshot_config.poll_interval
            );
            builder.transport(FirestoreTransport::new(snapshot_config)?)
        }
        Err(e) => {
            tracing::warn!(
                "Snapshot configuration not found: {}. Running without live snapshots.",
                e
            );
            builder.transport(MemoryTransport::new())
        }
    };

    // 4. Frontend
    tracing::debug!("Building CLI frontend...");
    let frontend = CliFrontend::new(frontend_config, cli_config);

    // 5. Build and run
    let client = builder.frontend(frontend).build()?;

    tracing::info!("Client assembled, starting...");
    client.run().await?;

    tracing::info!("Client shutdown complete");
    Ok(())
}
