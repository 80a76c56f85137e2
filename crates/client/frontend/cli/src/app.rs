//! Glue code tying the engine, the snapshot feeds and the terminal UI
//! together.
use anyhow::Result;
use async_trait::async_trait;
use tokio::sync::mpsc;

use client_engine::{Collection, Feed, SnapshotEvent, Subscription};
use client_frontend_core::{ActionDispatcher, ClientServices, Frontend, FrontendConfig, Session};

use crate::{config::CliConfig, event::EventLoop, presentation::terminal};

/// Terminal frontend.
pub struct CliFrontend {
    frontend_config: FrontendConfig,
    cli_config: CliConfig,
}

impl CliFrontend {
    pub fn new(frontend_config: FrontendConfig, cli_config: CliConfig) -> Self {
        Self {
            frontend_config,
            cli_config,
        }
    }

    async fn execute(&self, services: ClientServices) -> Result<()> {
        let ClientServices {
            engine,
            transport,
            identity,
        } = services;
        tracing::info!(uid = %identity.uid, "CLI client starting...");

        let mut session = Session::new(identity.clone(), &self.frontend_config);
        session
            .messages_mut()
            .push_system(format!("Welcome, {}.", identity.display_name));

        let (dispatcher, outcomes) = ActionDispatcher::new(
            engine,
            identity.uid.as_str(),
            self.frontend_config.channels.action_buffer,
        );

        // Subscribe before joining so the initial snapshots are not missed.
        let (sink, snapshots) = mpsc::unbounded_channel::<SnapshotEvent>();
        let subscriptions: Vec<Subscription> = std::iter::once(Feed::Game)
            .chain(Collection::ALL.into_iter().map(Feed::Entities))
            .map(|feed| transport.subscribe(feed, sink.clone()))
            .collect();
        // Only the subscriptions keep the stream open.
        drop(sink);

        drop(dispatcher.dispatch(session.join()));

        let event_loop = EventLoop::new(
            session,
            dispatcher,
            snapshots,
            outcomes,
            self.cli_config.clone(),
        );

        let mut terminal = terminal::init()?;
        let _guard = terminal::TerminalGuard;

        let result = event_loop.run(&mut terminal).await;

        for subscription in subscriptions {
            subscription.cancel();
        }

        terminal::restore()?;

        let mut session = result?;
        session.teardown();
        tracing::info!("CLI client exiting");

        Ok(())
    }
}

#[async_trait]
impl Frontend for CliFrontend {
    async fn run(&mut self, services: ClientServices) -> Result<()> {
        self.execute(services).await
    }
}
