//! Input handling (keyboard and mouse).

use anyhow::Result;
use client_frontend_core::{Reaction, UpdateScope};
use crossterm::event::{self as term_event, Event as TermEvent, KeyEvent, KeyEventKind, MouseEvent};
use game_core::Position;
use tokio::time::Duration;

use super::super::EventLoop;
use crate::{
    input::{KeyAction, PointerAction},
    presentation::{terminal::Tui, widgets::map::tile_entities},
    state::AppMode,
};

impl EventLoop {
    /// Handle every queued terminal event without blocking the other event
    /// sources.
    pub(in crate::event) async fn handle_input_tick(&mut self, terminal: &mut Tui) -> Result<bool> {
        drain_events(next_pending_event, |event| {
            self.handle_terminal_event(event, terminal)
        })
    }

    fn handle_terminal_event(&mut self, event: TermEvent, terminal: &mut Tui) -> Result<bool> {
        match event {
            TermEvent::Key(key) if key.kind == KeyEventKind::Press => {
                self.handle_key_press(key, terminal)
            }
            TermEvent::Mouse(mouse) => self.handle_mouse(mouse, terminal),
            TermEvent::Resize(_, _) => {
                self.render(terminal)?;
                Ok(false)
            }
            _ => Ok(false),
        }
    }

    fn handle_key_press(&mut self, key: KeyEvent, terminal: &mut Tui) -> Result<bool> {
        let action = self.input.handle_key(key);

        if self.app_state.mode == AppMode::Help {
            return match action {
                KeyAction::Quit => Ok(true),
                KeyAction::ToggleHelp | KeyAction::Cancel => {
                    self.app_state.exit_to_normal();
                    self.render(terminal)?;
                    Ok(false)
                }
                _ => Ok(false),
            };
        }

        let reaction = match action {
            KeyAction::Quit => {
                tracing::info!("Quit requested");
                return Ok(true);
            }
            KeyAction::TapOffset { dx, dy } => match self.session.local_position() {
                Some(local) => self.session.tap_tile(Position::new(local.x + dx, local.y + dy)),
                None => {
                    tracing::debug!("tap ignored: local position unknown");
                    Reaction::none()
                }
            },
            KeyAction::TapEntitySlot(slot) => self.tap_local_slot(slot),
            KeyAction::Attack => self.session.attack_selected(),
            KeyAction::Tick => Reaction {
                scope: UpdateScope::empty(),
                intent: Some(self.session.tick()),
            },
            KeyAction::ZoomIn => Reaction {
                scope: self.session.zoom_in(),
                intent: None,
            },
            KeyAction::ZoomOut => Reaction {
                scope: self.session.zoom_out(),
                intent: None,
            },
            KeyAction::Cancel => Reaction {
                scope: self.session.clear_selection(),
                intent: None,
            },
            KeyAction::ToggleHelp => {
                self.app_state.toggle_help();
                self.render(terminal)?;
                return Ok(false);
            }
            KeyAction::None => Reaction::none(),
        };

        self.apply_reaction(reaction, terminal)?;
        Ok(false)
    }

    fn handle_mouse(&mut self, mouse: MouseEvent, terminal: &mut Tui) -> Result<bool> {
        let action = self.input.handle_mouse(mouse);

        if self.app_state.mode.is_overlay() {
            if matches!(action, PointerAction::Click { .. }) {
                self.app_state.exit_to_normal();
                self.render(terminal)?;
            }
            return Ok(false);
        }

        let reaction = match action {
            PointerAction::Click { column, row } => self.tap_at(column, row),
            PointerAction::ScrollUp => Reaction {
                scope: self.session.zoom_in(),
                intent: None,
            },
            PointerAction::ScrollDown => Reaction {
                scope: self.session.zoom_out(),
                intent: None,
            },
            PointerAction::None => Reaction::none(),
        };

        self.apply_reaction(reaction, terminal)?;
        Ok(false)
    }

    /// A click on an entity glyph taps that entity, anywhere else on a tile
    /// taps the tile.
    fn tap_at(&mut self, column: u16, row: u16) -> Reaction {
        let Some(layout) = self.app_state.map_layout else {
            return Reaction::none();
        };
        let Some(hit) = layout.hit(column, row) else {
            return Reaction::none();
        };

        let entity_id = hit.slot.and_then(|slot| {
            layout
                .slot_entity(slot, &tile_entities(&self.session, hit.position))
                .map(|entity| entity.id.clone())
        });

        match entity_id {
            Some(id) => self.session.tap_entity(id.as_str()),
            None => self.session.tap_tile(hit.position),
        }
    }

    fn tap_local_slot(&mut self, slot: usize) -> Reaction {
        let Some(local) = self.session.local_position() else {
            return Reaction::none();
        };
        let entity_id = tile_entities(&self.session, local)
            .get(slot)
            .map(|entity| entity.id.clone());

        match entity_id {
            Some(id) => self.session.tap_entity(id.as_str()),
            None => Reaction::none(),
        }
    }

    /// Dispatch the requested engine call, then redraw what changed.
    fn apply_reaction(&mut self, reaction: Reaction, terminal: &mut Tui) -> Result<()> {
        if let Some(intent) = reaction.intent {
            // Outcome comes back through the outcome channel.
            drop(self.dispatcher.dispatch(intent));
        }
        if reaction.scope.requires_redraw() {
            self.render(terminal)?;
        }
        Ok(())
    }
}

fn next_pending_event() -> Result<Option<TermEvent>> {
    if term_event::poll(Duration::ZERO)? {
        Ok(Some(term_event::read()?))
    } else {
        Ok(None)
    }
}

/// Feeds events to `handle` until the source runs dry or `handle` asks to
/// quit. Returns `true` on quit.
fn drain_events<N, H>(mut next: N, mut handle: H) -> Result<bool>
where
    N: FnMut() -> Result<Option<TermEvent>>,
    H: FnMut(TermEvent) -> Result<bool>,
{
    while let Some(event) = next()? {
        if handle(event)? {
            return Ok(true);
        }
    }
    Ok(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyModifiers, MouseEventKind};
    use std::collections::VecDeque;

    fn moved(column: u16) -> TermEvent {
        TermEvent::Mouse(MouseEvent {
            kind: MouseEventKind::Moved,
            column,
            row: 0,
            modifiers: KeyModifiers::NONE,
        })
    }

    fn key(c: char) -> TermEvent {
        TermEvent::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE))
    }

    #[test]
    fn pending_events_are_handled_in_one_pass() {
        let mut queue: VecDeque<TermEvent> = (0..50).map(moved).collect();
        queue.push_back(key('a'));
        let mut handled = Vec::new();

        let quit = drain_events(
            || Ok(queue.pop_front()),
            |event| {
                handled.push(event);
                Ok(false)
            },
        )
        .unwrap();

        assert!(!quit);
        assert_eq!(handled.len(), 51);
        assert_eq!(handled.last(), Some(&key('a')));
    }

    #[test]
    fn quit_stops_the_drain() {
        let mut queue: VecDeque<TermEvent> = VecDeque::from([moved(0), key('q'), key('a')]);
        let mut handled = 0;

        let quit = drain_events(
            || Ok(queue.pop_front()),
            |event| {
                handled += 1;
                Ok(event == key('q'))
            },
        )
        .unwrap();

        assert!(quit);
        assert_eq!(handled, 2);
        assert_eq!(queue.len(), 1);
    }
}
