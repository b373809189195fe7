use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::app::App;
use crate::picker::Key;

/// Handle a key event.
///
/// Session-level bindings (quit, tree expand/collapse) are intercepted
/// first; everything else is translated to the picker's abstract key
/// surface and routed through its state machine.
pub fn handle_key_event(app: &mut App, key: KeyEvent) {
    if key.kind == KeyEventKind::Release {
        return;
    }

    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.quit();
            return;
        }
        KeyCode::Left => {
            app.collapse_hovered();
            return;
        }
        KeyCode::Right => {
            app.expand_hovered();
            return;
        }
        _ => {}
    }

    // Single-letter session shortcuts only apply outside search mode, where
    // printable characters belong to the query.
    if !app.picker.is_searching() {
        match key.code {
            KeyCode::Char('q') => {
                app.quit();
                return;
            }
            KeyCode::Char('E') => {
                app.expand_all_hovered();
                return;
            }
            KeyCode::Char('C') => {
                app.collapse_all_hovered();
                return;
            }
            _ => {}
        }
    }

    if let Some(picker_key) = translate(key.code, app.picker.is_searching()) {
        if let Some(event) = app.picker.handle_key(picker_key) {
            app.handle_picker_event(event);
        }
    }
}

/// Map a crossterm key code to the picker's abstract key surface.
///
/// Vim-style letters only navigate outside search mode; inside it they are
/// query text like any other printable character.
fn translate(code: KeyCode, searching: bool) -> Option<Key> {
    Some(match code {
        KeyCode::Up => Key::Up,
        KeyCode::Down => Key::Down,
        KeyCode::Home => Key::First,
        KeyCode::End => Key::Last,
        KeyCode::Enter => Key::Confirm,
        KeyCode::Esc => Key::Escape,
        KeyCode::Backspace => Key::Backspace,
        KeyCode::Char(c) if !searching => match c {
            'k' => Key::Up,
            'j' => Key::Down,
            'h' => Key::First,
            'l' => Key::Last,
            other => Key::Char(other),
        },
        KeyCode::Char(c) => Key::Char(c),
        _ => return None,
    })
}
