//! Fire-and-forget engine calls.
//!
//! [`ActionDispatcher`] runs each [`Intent`] on its own task and sends the
//! result back over a channel, so the session task never waits on the
//! network. Outcomes are applied with [`crate::Session::apply_outcome`].
use std::sync::Arc;

use tokio::{sync::mpsc, task::JoinHandle};

use client_engine::{
    AttackResponse, AttackTarget, EngineApi, EngineError, JoinResponse, MoveResponse,
    TickResponse,
};
use game_core::StepDelta;

/// A confirmed user action that needs the engine.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Intent {
    Join { display_name: String },
    Move(StepDelta),
    Attack(AttackTarget),
    Tick,
}

/// Engine answer for one [`Intent`].
#[derive(Debug)]
pub enum DispatchOutcome {
    Joined(Result<JoinResponse, EngineError>),
    Moved(Result<MoveResponse, EngineError>),
    Attacked {
        target: AttackTarget,
        result: Result<AttackResponse, EngineError>,
    },
    Ticked(Result<TickResponse, EngineError>),
}

impl DispatchOutcome {
    pub fn is_network_error(&self) -> bool {
        match self {
            Self::Joined(result) => result.is_err(),
            Self::Moved(result) => result.is_err(),
            Self::Attacked { result, .. } => result.is_err(),
            Self::Ticked(result) => result.is_err(),
        }
    }
}

/// Cloneable handle that sends intents to the engine.
#[derive(Clone)]
pub struct ActionDispatcher {
    engine: Arc<dyn EngineApi>,
    uid: Arc<str>,
    outcomes: mpsc::Sender<DispatchOutcome>,
}

impl ActionDispatcher {
    /// Creates a dispatcher for `uid` and the receiver its outcomes arrive on.
    pub fn new(
        engine: Arc<dyn EngineApi>,
        uid: impl Into<Arc<str>>,
        buffer: usize,
    ) -> (Self, mpsc::Receiver<DispatchOutcome>) {
        let (outcomes, receiver) = mpsc::channel(buffer.max(1));
        let dispatcher = Self {
            engine,
            uid: uid.into(),
            outcomes,
        };
        (dispatcher, receiver)
    }

    /// Spawns the engine call for `intent`. Must be called inside a tokio
    /// runtime.
    pub fn dispatch(&self, intent: Intent) -> JoinHandle<()> {
        let engine = Arc::clone(&self.engine);
        let uid = Arc::clone(&self.uid);
        let outcomes = self.outcomes.clone();

        tracing::debug!(?intent, "dispatching intent");
        tokio::spawn(async move {
            let outcome = execute(engine.as_ref(), &uid, intent).await;
            if outcome.is_network_error() {
                tracing::warn!(?outcome, "engine call failed");
            }
            if outcomes.send(outcome).await.is_err() {
                tracing::debug!("outcome receiver closed; dropping engine result");
            }
        })
    }
}

async fn execute(engine: &dyn EngineApi, uid: &str, intent: Intent) -> DispatchOutcome {
    match intent {
        Intent::Join { display_name } => {
            DispatchOutcome::Joined(engine.join(uid, &display_name).await)
        }
        Intent::Move(step) => DispatchOutcome::Moved(engine.move_player(uid, step).await),
        Intent::Attack(target) => {
            let result = engine.attack(uid, &target).await;
            DispatchOutcome::Attacked { target, result }
        }
        Intent::Tick => DispatchOutcome::Ticked(engine.tick().await),
    }
}
