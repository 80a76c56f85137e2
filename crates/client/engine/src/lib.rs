//! Remote collaborators of the Lockdown client.
//!
//! Two narrow seams live here:
//! - [`EngineApi`]: request/response calls to the authoritative game engine
//!   (join, move, attack, tick), implemented over HTTP by [`HttpEngineClient`].
//! - [`SnapshotTransport`]: per-collection live snapshots of the world
//!   documents, implemented by [`FirestoreTransport`] (REST polling) and
//!   [`MemoryTransport`] (in-process, for tests and offline runs).
//!
//! Nothing in this crate owns client state. Results are handed back to the
//! caller, which marshals them onto its own task.
pub mod api;
pub mod config;
pub mod error;
pub mod http;
pub mod snapshot;

pub use api::{
    AttackResponse, AttackTarget, EngineApi, JoinResponse, MoveResponse, TargetType, TickResponse,
};
pub use config::{EngineConfig, SnapshotConfig};
pub use error::{ConfigError, EngineError, TransportError};
pub use http::HttpEngineClient;
pub use snapshot::{
    Collection, Feed, GameMeta, MemoryTransport, SnapshotEvent, SnapshotSink, SnapshotTransport,
    Subscription, firestore::FirestoreTransport,
};
