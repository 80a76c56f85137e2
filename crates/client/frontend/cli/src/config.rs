//! CLI-specific configuration for terminal UI.
use std::{env, path::PathBuf};

/// CLI terminal UI configuration.
///
/// This contains settings specific to the terminal interface,
/// separate from cross-frontend client configuration.
#[derive(Clone, Debug, Default)]
pub struct CliConfig {
    pub ui: UiConfig,
    /// Overrides the platform log directory.
    pub log_dir: Option<PathBuf>,
}

impl CliConfig {
    /// Construct CLI configuration from environment variables.
    ///
    /// Environment variables:
    /// - `CLI_MESSAGE_PANEL_HEIGHT` - Message panel height in lines (default: 10)
    /// - `CLI_MIN_CELL_ROWS` - Smallest map cell height in rows (default: 3)
    /// - `LOG_DIR` - Directory for session log files (default: platform data dir)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(height) = read_env::<u16>("CLI_MESSAGE_PANEL_HEIGHT") {
            config.ui.message_panel_height = height.max(3);
        }

        if let Some(rows) = read_env::<u16>("CLI_MIN_CELL_ROWS") {
            config.ui.min_cell_rows = rows.max(MIN_CELL_ROWS);
        }

        config.log_dir = env::var_os("LOG_DIR")
            .filter(|dir| !dir.is_empty())
            .map(PathBuf::from);

        config
    }
}

/// A map cell needs a terrain line, a glyph line and a marker line.
const MIN_CELL_ROWS: u16 = 3;

/// UI layout and display configuration.
#[derive(Clone, Debug)]
pub struct UiConfig {
    /// Height of message panel in lines (including borders).
    pub message_panel_height: u16,
    /// Smallest map cell height in terminal rows. Cells are twice as wide
    /// as they are tall so they look square.
    pub min_cell_rows: u16,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            message_panel_height: 10,
            min_cell_rows: MIN_CELL_ROWS,
        }
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
