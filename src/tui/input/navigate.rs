use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::ops::Intent;
use crate::tui::app::{App, Mode, Setting, View};

use super::activate_setting;

pub(super) fn handle_navigate(app: &mut App, key: KeyEvent) {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return;
    }

    match key.code {
        KeyCode::Char('q') => {
            app.push_intent(Intent::Exit);
            return;
        }
        KeyCode::Char('?') => {
            app.show_help = true;
            return;
        }
        KeyCode::Tab => {
            app.view = app.view.next();
            return;
        }
        KeyCode::BackTab => {
            app.view = app.view.prev();
            return;
        }
        KeyCode::Char(c @ '1'..='3') => {
            let idx = c as usize - '1' as usize;
            app.view = View::ALL[idx];
            return;
        }
        KeyCode::Char('t') => {
            app.toggle_theme();
            return;
        }
        KeyCode::Char('L') => {
            app.push_intent(Intent::Load);
            return;
        }
        KeyCode::Char('S') => {
            app.push_intent(Intent::Save);
            return;
        }
        _ => {}
    }

    match app.view {
        View::Home => handle_home(app, key),
        View::Settings => handle_settings(app, key),
        View::About => {}
    }
}

fn handle_home(app: &mut App, key: KeyEvent) {
    let len = app.list.len();
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => {
            if app.cursor + 1 < len {
                app.cursor += 1;
            }
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.cursor = app.cursor.saturating_sub(1);
        }
        KeyCode::Char('g') | KeyCode::Home => app.cursor = 0,
        KeyCode::Char('G') | KeyCode::End => app.cursor = len.saturating_sub(1),
        KeyCode::Char(' ') | KeyCode::Char('x') if len > 0 => {
            app.push_intent(Intent::Toggle(app.cursor));
        }
        KeyCode::Char('d') | KeyCode::Delete if len > 0 => {
            app.push_intent(Intent::Delete(app.cursor));
        }
        KeyCode::Char('a') | KeyCode::Char('i') | KeyCode::Enter => {
            app.mode = Mode::Insert;
        }
        _ => {}
    }
}

fn handle_settings(app: &mut App, key: KeyEvent) {
    let count = Setting::ALL.len();
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => {
            app.settings_cursor = (app.settings_cursor + 1).min(count - 1);
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.settings_cursor = app.settings_cursor.saturating_sub(1);
        }
        KeyCode::Char(' ') | KeyCode::Enter => {
            if let Some(&setting) = Setting::ALL.get(app.settings_cursor) {
                activate_setting(app, setting);
            }
        }
        _ => {}
    }
}
