mod insert;
mod mouse;
mod navigate;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::app::{App, Mode, Setting};
use crate::ops::Intent;

#[allow(unused_imports)]
use insert::*;
#[allow(unused_imports)]
use navigate::*;

pub use mouse::handle_mouse;

/// Handle a key event in the current mode
pub fn handle_key(app: &mut App, key: KeyEvent) {
    // Ignore bare modifier key presses (Shift, Ctrl, Alt, etc.)
    if matches!(key.code, KeyCode::Modifier(_)) {
        return;
    }
    app.expire_status();

    // Help overlay intercepts all input
    if app.show_help {
        if matches!(
            key.code,
            KeyCode::Char('?') | KeyCode::Char('q') | KeyCode::Esc
        ) {
            app.show_help = false;
        }
        return;
    }

    let key = normalize_key(key);

    // Bindings that work in every mode
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                app.push_intent(Intent::Exit);
                return;
            }
            KeyCode::Char('s') | KeyCode::Char('S') => {
                app.push_intent(Intent::Save);
                return;
            }
            _ => {}
        }
    }
    if key.code == KeyCode::F(3) {
        app.show_perf = !app.show_perf;
        return;
    }

    match app.mode {
        Mode::Navigate => handle_navigate(app, key),
        Mode::Insert => handle_insert(app, key),
    }
}

/// Handle a bracketed paste event. Only the entry line accepts pasted text;
/// line breaks become spaces since a task is a single line.
pub fn handle_paste(app: &mut App, text: &str) {
    if app.mode != Mode::Insert || text.is_empty() {
        return;
    }
    let clean = text.replace(['\n', '\t'], " ").replace('\r', "");
    app.list.entry_mut().push_str(&clean);
}

/// Flip the setting on a Settings row
pub(super) fn activate_setting(app: &mut App, setting: Setting) {
    match setting {
        Setting::Theme => app.toggle_theme(),
        Setting::Autosave => app.toggle_autosave(),
        Setting::PerfOverlay => app.show_perf = !app.show_perf,
    }
}

/// Shift+letter arrives as lowercase with SHIFT on some terminals
pub(super) fn normalize_key(mut key: KeyEvent) -> KeyEvent {
    if let KeyCode::Char(c) = key.code
        && key.modifiers.contains(KeyModifiers::SHIFT)
        && c.is_ascii_lowercase()
    {
        key.code = KeyCode::Char(c.to_ascii_uppercase());
    }
    key
}
