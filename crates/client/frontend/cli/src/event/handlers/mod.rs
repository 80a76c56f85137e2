//! Event handler implementations for EventLoop.
//!
//! - `input`: keyboard and mouse input turned into taps and commands
//! - `rendering`: terminal rendering

mod input;
mod rendering;
