//! Keyboard input handling for the TUI.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::runtime::App;

/// Maps a key event to an application action.
///
/// Guards on [`KeyEventKind::Press`] to avoid double-fire on some terminals.
pub fn handle_key(app: &mut App, key: KeyEvent) {
    if key.kind != KeyEventKind::Press {
        return;
    }
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.quit = true,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => app.quit = true,
        KeyCode::Up | KeyCode::Char('k') => app.move_up(),
        KeyCode::Down | KeyCode::Char('j') => app.move_down(),
        KeyCode::Char('+' | '=') | KeyCode::Right => app.add(),
        KeyCode::Char('-') | KeyCode::Left => app.remove(),
        KeyCode::Char(' ') => app.toggle(),
        KeyCode::Char('c') => app.clear(),
        KeyCode::Char('1') => app.switch_preset("starter"),
        KeyCode::Char('2') => app.switch_preset("home_office"),
        KeyCode::Char('3') => app.switch_preset("family"),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::SizingPolicy;
    use crate::selection::Selection;

    fn press(app: &mut App, code: KeyCode) {
        handle_key(app, KeyEvent::new(code, KeyModifiers::NONE));
    }

    #[test]
    fn navigation_and_quantity_keys() {
        let mut app = App::new(Selection::new(), "empty", SizingPolicy::default());
        press(&mut app, KeyCode::Char('j'));
        press(&mut app, KeyCode::Down);
        assert_eq!(app.cursor, 2);
        press(&mut app, KeyCode::Char('k'));
        assert_eq!(app.cursor, 1);

        press(&mut app, KeyCode::Right);
        press(&mut app, KeyCode::Char('+'));
        assert_eq!(app.current_row().unwrap().quantity, 2);
        press(&mut app, KeyCode::Left);
        assert_eq!(app.current_row().unwrap().quantity, 1);
    }

    #[test]
    fn preset_and_quit_keys() {
        let mut app = App::new(Selection::new(), "empty", SizingPolicy::default());
        press(&mut app, KeyCode::Char('2'));
        assert_eq!(app.preset_name, "home_office");
        press(&mut app, KeyCode::Char('c'));
        assert!(app.selection().is_empty());
        assert!(!app.quit);
        press(&mut app, KeyCode::Esc);
        assert!(app.quit);
    }
}
