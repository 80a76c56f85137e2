//! Event handling for the CLI client.
//!
//! The event loop is the single owner of the [`client_frontend_core::Session`]:
//! snapshot deliveries, engine outcomes and terminal input are applied here,
//! one at a time, in arrival order.

mod handlers;
mod r#loop;

pub use r#loop::EventLoop;
