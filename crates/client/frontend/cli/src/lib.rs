//! Terminal UI frontend for Lockdown.
//!
//! Implements [`client_frontend_core::Frontend`] on top of ratatui and
//! crossterm. The frontend owns one [`client_frontend_core::Session`] and a
//! single event loop task that applies snapshot deliveries, engine outcomes
//! and terminal input in arrival order.
//!
//! # Architecture
//!
//! CliFrontend is a pure UI layer that:
//! - Receives shared engine and snapshot transport handles
//! - Subscribes to the game document and every entity collection
//! - Turns mouse clicks and key presses into taps on the session

mod app;
mod config;
mod event;
mod input;
pub mod logging;
pub mod presentation;
mod state;

pub use app::CliFrontend;
pub use config::{CliConfig, UiConfig};

// Re-export for convenience (used in main.rs)
pub use client_frontend_core::FrontendConfig;
