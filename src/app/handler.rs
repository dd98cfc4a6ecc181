//! Input handling: maps key/mouse events to viewport and state changes.
//!
//! Handlers only move the viewport; the header learns about the new offset
//! through its own subscription on the next loop iteration.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent, MouseEventKind};

use crate::config::Action;

use super::state::AppState;

/// Wheel notches scroll this many steps at once.
const WHEEL_STEPS: i64 = 3;

/// Process a key event.
pub fn handle_key(state: &mut AppState, key: KeyEvent) {
    // Ctrl+c always quits.
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        state.should_quit = true;
        return;
    }

    let Some(action) = state.config.match_key(key) else {
        return;
    };
    state.status_message = None;

    let step = i64::from(state.config.scroll_step_px);
    let page = i64::from(state.viewport_rows.saturating_sub(1).max(1)) * i64::from(state.config.row_px);

    match action {
        Action::ScrollUp => {
            state.viewport.scroll_by(-step);
        }
        Action::ScrollDown => {
            state.viewport.scroll_by(step);
        }
        Action::PageUp => {
            state.viewport.scroll_by(-page);
        }
        Action::PageDown => {
            state.viewport.scroll_by(page);
        }
        Action::Top => {
            state.viewport.scroll_to(0);
        }
        Action::Bottom => {
            let max = state.viewport.max_scroll_y();
            state.viewport.scroll_to(max);
        }
        Action::ToggleFixed => state.toggle_fixed(),
        Action::ToggleOffline => state.toggle_offline(),
        Action::Quit => state.should_quit = true,
    }
}

/// Process a mouse event.  Only the wheel does anything.
pub fn handle_mouse(state: &mut AppState, mouse: MouseEvent) {
    let step = i64::from(state.config.scroll_step_px) * WHEEL_STEPS;
    match mouse.kind {
        MouseEventKind::ScrollUp => {
            state.viewport.scroll_by(-step);
        }
        MouseEventKind::ScrollDown => {
            state.viewport.scroll_by(step);
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::KeyEventKind;

    use super::*;
    use crate::config::AppConfig;
    use crate::core::viewport::Viewport;
    use crate::ui::content_slot::ContentSlot;

    fn make_state() -> AppState {
        let text: Vec<String> = (0..100).map(|i| format!("line {i}")).collect();
        let mut state = AppState::new(AppConfig::default(), ContentSlot::new(&text.join("\n")), "t".into());
        state.relayout(11);
        state
    }

    fn press(code: KeyCode) -> KeyEvent {
        let mut ev = KeyEvent::new(code, KeyModifiers::NONE);
        ev.kind = KeyEventKind::Press;
        ev
    }

    fn wheel(kind: MouseEventKind) -> MouseEvent {
        MouseEvent {
            kind,
            column: 0,
            row: 0,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn keys_move_the_viewport() {
        let mut state = make_state();
        handle_key(&mut state, press(KeyCode::Char('j')));
        assert_eq!(state.viewport.scroll_y(), 8);
        handle_key(&mut state, press(KeyCode::PageDown));
        assert_eq!(state.viewport.scroll_y(), 8 + 10 * 16);
        handle_key(&mut state, press(KeyCode::Char('k')));
        assert_eq!(state.viewport.scroll_y(), 160);
        handle_key(&mut state, press(KeyCode::End));
        assert_eq!(state.viewport.scroll_y(), state.viewport.max_scroll_y());
        handle_key(&mut state, press(KeyCode::Home));
        assert_eq!(state.viewport.scroll_y(), 0);
    }

    #[test]
    fn wheel_scrolls_several_steps() {
        let mut state = make_state();
        handle_mouse(&mut state, wheel(MouseEventKind::ScrollDown));
        assert_eq!(state.viewport.scroll_y(), 24);
        handle_mouse(&mut state, wheel(MouseEventKind::ScrollUp));
        handle_mouse(&mut state, wheel(MouseEventKind::ScrollUp));
        assert_eq!(state.viewport.scroll_y(), 0);
    }

    #[test]
    fn quit_keys() {
        let mut state = make_state();
        handle_key(&mut state, KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(state.should_quit);

        let mut state = make_state();
        handle_key(&mut state, press(KeyCode::Char('q')));
        assert!(state.should_quit);
    }

    #[test]
    fn unbound_key_keeps_status() {
        let mut state = make_state();
        state.status_message = Some("hello".into());
        handle_key(&mut state, press(KeyCode::Char('z')));
        assert_eq!(state.status_message.as_deref(), Some("hello"));
    }
}
