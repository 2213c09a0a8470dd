//! Terminal event abstraction.
//!
//! Wraps crossterm events into the host-level events the grid understands
//! and runs a background task that forwards them over a channel so the main
//! loop stays non-blocking.

use std::time::Duration;

use crossterm::event::{
    self, Event as CtEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton,
    MouseEvent, MouseEventKind,
};
use tokio::sync::mpsc;

use grid_surface::{PointerEvent, PointerPhase};

/// High-level events consumed by the application.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AppEvent {
    Pointer(PointerEvent),
    Resize(u16, u16),
    Quit,
    Tick,
}

/// Map a crossterm event to an [`AppEvent`].  Events the grid has no use
/// for map to `None`.
pub fn translate(ev: CtEvent) -> Option<AppEvent> {
    match ev {
        CtEvent::Mouse(m) => translate_mouse(m).map(AppEvent::Pointer),
        CtEvent::Key(k) => translate_key(k),
        CtEvent::Resize(w, h) => Some(AppEvent::Resize(w, h)),
        _ => None,
    }
}

fn translate_mouse(mouse: MouseEvent) -> Option<PointerEvent> {
    let phase = match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => PointerPhase::Press,
        MouseEventKind::Up(MouseButton::Left) => PointerPhase::Release,
        MouseEventKind::Drag(MouseButton::Left) | MouseEventKind::Moved => PointerPhase::Move,
        _ => return None,
    };
    Some(PointerEvent::new(
        f32::from(mouse.column),
        f32::from(mouse.row),
        phase,
    ))
}

fn translate_key(key: KeyEvent) -> Option<AppEvent> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => Some(AppEvent::Quit),
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Some(AppEvent::Quit),
        _ => None,
    }
}

/// Spawns a background task that polls the terminal for events and sends them
/// through the returned channel.
pub fn spawn_event_reader(tick_rate: Duration) -> mpsc::UnboundedReceiver<AppEvent> {
    let (tx, rx) = mpsc::unbounded_channel();

    tokio::task::spawn_blocking(move || {
        loop {
            // Use crossterm's poll with the tick rate so we can send Tick
            // events even when nothing is happening.
            let has_event = event::poll(tick_rate).unwrap_or(false);
            let app_event = if has_event {
                match event::read().ok().and_then(translate) {
                    Some(ev) => ev,
                    None => continue,
                }
            } else {
                AppEvent::Tick
            };
            if tx.send(app_event).is_err() {
                break; // receiver dropped
            }
        }
    });

    rx
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> CtEvent {
        CtEvent::Mouse(MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    #[test]
    fn left_button_maps_to_press_and_release() {
        assert_eq!(
            translate(mouse(MouseEventKind::Down(MouseButton::Left), 4, 7)),
            Some(AppEvent::Pointer(PointerEvent::press(4.0, 7.0)))
        );
        assert_eq!(
            translate(mouse(MouseEventKind::Up(MouseButton::Left), 4, 7)),
            Some(AppEvent::Pointer(PointerEvent::release(4.0, 7.0)))
        );
        assert_eq!(
            translate(mouse(MouseEventKind::Drag(MouseButton::Left), 1, 1)),
            Some(AppEvent::Pointer(PointerEvent::new(1.0, 1.0, PointerPhase::Move)))
        );
    }

    #[test]
    fn other_buttons_are_dropped() {
        assert_eq!(translate(mouse(MouseEventKind::Down(MouseButton::Right), 0, 0)), None);
        assert_eq!(translate(mouse(MouseEventKind::ScrollUp, 0, 0)), None);
    }

    #[test]
    fn quit_keys() {
        let q = CtEvent::Key(KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE));
        let ctrl_c = CtEvent::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        let c = CtEvent::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::NONE));
        assert_eq!(translate(q), Some(AppEvent::Quit));
        assert_eq!(translate(ctrl_c), Some(AppEvent::Quit));
        assert_eq!(translate(c), None);
        assert_eq!(translate(CtEvent::Resize(80, 24)), Some(AppEvent::Resize(80, 24)));
    }
}
