use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};

use crate::ops::Intent;
use crate::tui::app::{App, Hit, Mode, Setting, View};

use super::activate_setting;

/// Handle a mouse event against the regions recorded by the last render
pub fn handle_mouse(app: &mut App, mouse: MouseEvent) {
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {}
        MouseEventKind::ScrollDown if app.view == View::Home && !app.show_help => {
            if app.cursor + 1 < app.list.len() {
                app.cursor += 1;
            }
            return;
        }
        MouseEventKind::ScrollUp if app.view == View::Home && !app.show_help => {
            app.cursor = app.cursor.saturating_sub(1);
            return;
        }
        _ => return,
    }

    if app.show_help {
        app.show_help = false;
        return;
    }

    let Some(hit) = app.hit_at(mouse.column, mouse.row) else {
        return;
    };
    match hit {
        Hit::Toggle(index) => {
            app.cursor = index;
            app.push_intent(Intent::Toggle(index));
        }
        Hit::Delete(index) => {
            app.cursor = index;
            app.push_intent(Intent::Delete(index));
        }
        Hit::Tab(view) => {
            app.view = view;
            app.mode = Mode::Navigate;
        }
        Hit::Entry => {
            app.view = View::Home;
            app.mode = Mode::Insert;
        }
        Hit::Setting(setting) => {
            if let Some(pos) = Setting::ALL.iter().position(|s| *s == setting) {
                app.settings_cursor = pos;
            }
            activate_setting(app, setting);
        }
    }
}
