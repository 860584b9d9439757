use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::ops::Intent;
use crate::tui::app::{App, Mode, View};
use crate::util::unicode::{pop_grapheme, pop_word};

/// Typing into the entry line. The buffer is edited in place; only
/// submitting goes through an intent.
pub(super) fn handle_insert(app: &mut App, key: KeyEvent) {
    app.view = View::Home;

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        match key.code {
            KeyCode::Char('u') => app.list.entry_mut().clear(),
            KeyCode::Char('w') => pop_word(app.list.entry_mut()),
            _ => {}
        }
        return;
    }

    match key.code {
        KeyCode::Esc => app.mode = Mode::Navigate,
        KeyCode::Enter => {
            let text = app.list.entry().to_string();
            app.push_intent(Intent::Submit(text));
        }
        KeyCode::Backspace => {
            pop_grapheme(app.list.entry_mut());
        }
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::ALT) => {
            app.list.entry_mut().push(c);
        }
        _ => {}
    }
}
