pub mod about_view;
pub mod help_overlay;
pub mod home_view;
pub mod perf_overlay;
pub mod settings_view;
pub mod status_row;
pub mod tab_bar;

#[cfg(test)]
pub mod test_helpers;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::Style;
use ratatui::widgets::Block;

use super::app::{App, View};

/// Main render function, dispatches to sub-renderers.
///
/// Clickable regions are re-recorded every frame, so a click always
/// resolves against what is currently on screen.
pub fn render(frame: &mut Frame, app: &mut App) {
    let area = frame.area();
    app.hit_regions.clear();

    // Background fill
    let bg_style = Style::default().bg(app.theme.background);
    frame.render_widget(Block::default().style(bg_style), area);

    // Layout: tab bar (2 rows) | content | status row (1 row)
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // tab bar + separator
            Constraint::Min(1),    // content area
            Constraint::Length(1), // status row
        ])
        .split(area);

    tab_bar::render_tab_bar(frame, app, chunks[0]);

    match app.view {
        View::Home => home_view::render_home_view(frame, app, chunks[1]),
        View::Settings => settings_view::render_settings_view(frame, app, chunks[1]),
        View::About => about_view::render_about_view(frame, app, chunks[1]),
    }

    if app.show_perf {
        perf_overlay::render_perf_overlay(frame, app, chunks[1]);
    }

    // Help overlay (rendered on top of everything)
    if app.show_help {
        help_overlay::render_help_overlay(frame, app, area);
    }

    status_row::render_status_row(frame, app, chunks[2]);
}
