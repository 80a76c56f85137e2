//! Error types for engine calls, snapshot transports and configuration.
use thiserror::Error;

pub type Result<T> = std::result::Result<T, EngineError>;

/// Failure to obtain a well-formed engine response.
///
/// An engine *rejection* (`ok == false`) is not an error; it comes back as a
/// normal response carrying a reason.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("engine request failed")]
    Http(#[from] reqwest::Error),

    #[error("engine returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("failed to decode engine response")]
    Decode(#[source] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("snapshot request failed")]
    Http(#[from] reqwest::Error),

    #[error("document store returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("failed to decode document listing")]
    Decode(#[source] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("environment variable {0} is required")]
    Missing(&'static str),

    #[error("invalid value {value:?} for {key}")]
    Invalid { key: &'static str, value: String },
}
