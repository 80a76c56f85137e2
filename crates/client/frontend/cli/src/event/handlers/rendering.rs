//! Rendering handlers.

use anyhow::Result;

use super::super::EventLoop;
use crate::presentation::{terminal::Tui, ui};

impl EventLoop {
    /// Draw the session and remember the map geometry for click hit-testing.
    pub(in crate::event) fn render(&mut self, terminal: &mut Tui) -> Result<()> {
        let ctx = ui::RenderContext {
            session: &self.session,
            app_state: &self.app_state,
            message_panel_height: self.cli_config.ui.message_panel_height,
            min_cell_rows: self.cli_config.ui.min_cell_rows,
        };

        let layout = ui::render(terminal, &ctx)?;
        self.app_state.map_layout = Some(layout);
        Ok(())
    }
}
