//! Change tracking for session updates.
use bitflags::bitflags;

bitflags! {
    /// Which parts of the session changed after an update.
    ///
    /// Frontends skip redraws when the scope is empty and may repaint only
    /// the affected panels otherwise.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct UpdateScope: u32 {
        /// Grid size or terrain changed.
        const MAP        = 0b0000_0001;

        /// Some entity collection was replaced.
        const ENTITIES   = 0b0000_0010;

        /// The current interaction changed (selected, followed, cleared).
        const SELECTION  = 0b0000_0100;

        /// The local player's position changed.
        const PLAYER     = 0b0000_1000;

        /// New message log entries.
        const MESSAGES   = 0b0001_0000;

        /// Zoom radius changed.
        const VIEWPORT   = 0b0010_0000;

        /// Everything drawn on the grid.
        const GRID = Self::MAP.bits()
            | Self::ENTITIES.bits()
            | Self::SELECTION.bits()
            | Self::PLAYER.bits()
            | Self::VIEWPORT.bits();

        const ALL = Self::GRID.bits() | Self::MESSAGES.bits();
    }
}

impl UpdateScope {
    pub fn requires_redraw(self) -> bool {
        !self.is_empty()
    }
}
