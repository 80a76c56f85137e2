//! Client-side interaction and viewport synchronization.
//!
//! Keeps a canonical mirror of the world built from independently arriving
//! collection snapshots, resolves taps into selection changes or engine
//! intents, keeps the selection consistent as entities move or die, and
//! computes the visible part of the grid. Frontends (CLI today) drive a
//! [`Session`] from a single task and render from its read accessors.
pub mod config;
pub mod dispatch;
pub mod format;
pub mod frontend;
pub mod interaction;
pub mod message;
pub mod scope;
pub mod session;
pub mod store;
pub mod tap;

pub use config::{ChannelConfig, FrontendConfig, MessageConfig, SessionIdentity, ViewConfig};
pub use dispatch::{ActionDispatcher, DispatchOutcome, Intent};
pub use frontend::{ClientServices, Frontend};
pub use interaction::{
    ClearReason, Interaction, InteractionKind, InteractionState, ReconcileOutcome, SelectOutcome,
};
pub use message::{MessageEntry, MessageKind, MessageLog};
pub use scope::UpdateScope;
pub use session::{Reaction, Session};
pub use store::WorldStore;
pub use tap::{TapOutcome, TapRouter};
