//! Application state for mode management and UI context.

use crate::presentation::widgets::map::MapLayout;

/// Top-level application mode determining input handling and UI layout.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AppMode {
    /// Map, selection panel and messages.
    Normal,
    /// Key binding overlay on top of the game UI.
    Help,
}

impl AppMode {
    pub fn is_overlay(self) -> bool {
        matches!(self, Self::Help)
    }
}

/// Mutable UI state that is not part of the session.
#[derive(Clone, Debug)]
pub struct AppState {
    pub mode: AppMode,
    /// Map geometry from the last frame, used to hit-test mouse clicks.
    pub map_layout: Option<MapLayout>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            mode: AppMode::Normal,
            map_layout: None,
        }
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toggle_help(&mut self) {
        self.mode = match self.mode {
            AppMode::Normal => AppMode::Help,
            AppMode::Help => AppMode::Normal,
        };
    }

    /// Returns to Normal mode; true if an overlay was closed.
    pub fn exit_to_normal(&mut self) -> bool {
        let was_overlay = self.mode.is_overlay();
        self.mode = AppMode::Normal;
        was_overlay
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_mode_is_normal() {
        let state = AppState::new();
        assert_eq!(state.mode, AppMode::Normal);
        assert!(state.map_layout.is_none());
    }

    #[test]
    fn help_toggles_and_exits() {
        let mut state = AppState::new();
        state.toggle_help();
        assert_eq!(state.mode, AppMode::Help);
        assert!(state.exit_to_normal());
        assert!(!state.exit_to_normal());
    }
}
