//! Input processing for the CLI client.
//!
//! This module owns the keyboard and mouse mapping so the rest of the
//! application can remain agnostic about concrete key bindings or the
//! specifics of `crossterm` events. Everything that moves or selects is
//! expressed as a tap, exactly like a click on the map would be.

use crossterm::event::{
    KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

/// High-level outcome of processing a keyboard event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyAction {
    /// Exit the application.
    Quit,
    /// Tap the tile at this offset from the local player.
    TapOffset { dx: i32, dy: i32 },
    /// Tap the n-th (zero based) entity glyph on the local tile.
    TapEntitySlot(usize),
    Attack,
    Tick,
    ZoomIn,
    ZoomOut,
    /// Close an overlay, otherwise clear the selection.
    Cancel,
    ToggleHelp,
    /// No meaningful command was produced.
    None,
}

/// Mouse gesture in terminal coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerAction {
    Click { column: u16, row: u16 },
    ScrollUp,
    ScrollDown,
    None,
}

/// Translates terminal events into commands.
#[derive(Clone, Copy, Debug, Default)]
pub struct InputHandler;

impl InputHandler {
    pub fn new() -> Self {
        Self
    }

    /// Converts a raw key event into a higher-level command.
    pub fn handle_key(&self, key: KeyEvent) -> KeyAction {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return KeyAction::Quit;
        }

        match key.code {
            KeyCode::Char(ch) => self.handle_char(ch),
            KeyCode::Left => Self::offset(-1, 0),
            KeyCode::Right => Self::offset(1, 0),
            KeyCode::Up => Self::offset(0, -1),
            KeyCode::Down => Self::offset(0, 1),
            KeyCode::Enter => Self::offset(0, 0),
            KeyCode::Esc => KeyAction::Cancel,
            _ => KeyAction::None,
        }
    }

    fn handle_char(&self, raw: char) -> KeyAction {
        match raw {
            'q' | 'Q' => KeyAction::Quit,
            'h' => Self::offset(-1, 0),
            'j' => Self::offset(0, 1),
            'k' => Self::offset(0, -1),
            'l' => Self::offset(1, 0),
            'y' => Self::offset(-1, -1),
            'u' => Self::offset(1, -1),
            'b' => Self::offset(-1, 1),
            'n' => Self::offset(1, 1),
            '.' | ' ' => Self::offset(0, 0),
            '1'..='9' => KeyAction::TapEntitySlot(raw as usize - '1' as usize),
            'a' | 'A' => KeyAction::Attack,
            't' | 'T' => KeyAction::Tick,
            '+' | '=' => KeyAction::ZoomIn,
            '-' | '_' => KeyAction::ZoomOut,
            '?' => KeyAction::ToggleHelp,
            _ => KeyAction::None,
        }
    }

    const fn offset(dx: i32, dy: i32) -> KeyAction {
        KeyAction::TapOffset { dx, dy }
    }

    pub fn handle_mouse(&self, mouse: MouseEvent) -> PointerAction {
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => PointerAction::Click {
                column: mouse.column,
                row: mouse.row,
            },
            MouseEventKind::ScrollUp => PointerAction::ScrollUp,
            MouseEventKind::ScrollDown => PointerAction::ScrollDown,
            _ => PointerAction::None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEventKind, KeyEventState};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::empty(),
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn mouse(kind: MouseEventKind) -> MouseEvent {
        MouseEvent {
            kind,
            column: 7,
            row: 3,
            modifiers: KeyModifiers::empty(),
        }
    }

    #[test]
    fn maps_movement_keys_to_adjacent_taps() {
        let handler = InputHandler::new();
        assert_eq!(
            handler.handle_key(key(KeyCode::Char('h'))),
            KeyAction::TapOffset { dx: -1, dy: 0 }
        );
        assert_eq!(
            handler.handle_key(key(KeyCode::Down)),
            KeyAction::TapOffset { dx: 0, dy: 1 }
        );
        assert_eq!(
            handler.handle_key(key(KeyCode::Char('u'))),
            KeyAction::TapOffset { dx: 1, dy: -1 }
        );
    }

    #[test]
    fn own_tile_and_entity_slots() {
        let handler = InputHandler::new();
        assert_eq!(
            handler.handle_key(key(KeyCode::Char('.'))),
            KeyAction::TapOffset { dx: 0, dy: 0 }
        );
        assert_eq!(
            handler.handle_key(key(KeyCode::Char('1'))),
            KeyAction::TapEntitySlot(0)
        );
        assert_eq!(
            handler.handle_key(key(KeyCode::Char('9'))),
            KeyAction::TapEntitySlot(8)
        );
    }

    #[test]
    fn maps_commands_and_quit() {
        let handler = InputHandler::new();
        assert_eq!(handler.handle_key(key(KeyCode::Char('a'))), KeyAction::Attack);
        assert_eq!(handler.handle_key(key(KeyCode::Char('t'))), KeyAction::Tick);
        assert_eq!(handler.handle_key(key(KeyCode::Char('+'))), KeyAction::ZoomIn);
        assert_eq!(handler.handle_key(key(KeyCode::Char('-'))), KeyAction::ZoomOut);
        assert_eq!(handler.handle_key(key(KeyCode::Esc)), KeyAction::Cancel);
        assert_eq!(handler.handle_key(key(KeyCode::Char('q'))), KeyAction::Quit);

        let ctrl_c = KeyEvent {
            modifiers: KeyModifiers::CONTROL,
            ..key(KeyCode::Char('c'))
        };
        assert_eq!(handler.handle_key(ctrl_c), KeyAction::Quit);
    }

    #[test]
    fn ignores_unknown_keys() {
        let handler = InputHandler::new();
        assert_eq!(handler.handle_key(key(KeyCode::Char('x'))), KeyAction::None);
        assert_eq!(handler.handle_key(key(KeyCode::Tab)), KeyAction::None);
    }

    #[test]
    fn left_click_becomes_click() {
        let handler = InputHandler::new();
        assert_eq!(
            handler.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left))),
            PointerAction::Click { column: 7, row: 3 }
        );
        assert_eq!(
            handler.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Right))),
            PointerAction::None
        );
        assert_eq!(
            handler.handle_mouse(mouse(MouseEventKind::ScrollUp)),
            PointerAction::ScrollUp
        );
        assert_eq!(handler.handle_mouse(mouse(MouseEventKind::Moved)), PointerAction::None);
    }
}
