//! Widgets composing the game screen.
pub mod footer;
pub mod header;
pub mod help;
pub mod interaction;
pub mod map;
pub mod messages;
