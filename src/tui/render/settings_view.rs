use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::{App, Hit, Setting};

const LABEL_WIDTH: usize = 22;

/// Render the Settings tab: one row per setting with its current value
pub fn render_settings_view(frame: &mut Frame, app: &mut App, area: Rect) {
    let bg = app.theme.background;
    let header_style = Style::default()
        .fg(app.theme.text_bright)
        .bg(bg)
        .add_modifier(Modifier::BOLD);
    let dim_style = Style::default().fg(app.theme.dim).bg(bg);

    let mut lines: Vec<Line> = vec![
        Line::from(Span::styled(" Settings", header_style)),
        Line::from(""),
    ];
    let first_row = area.y + lines.len() as u16;

    for (i, setting) in Setting::ALL.iter().enumerate() {
        let selected = i == app.settings_cursor;
        let row_bg = if selected { app.theme.selection_bg } else { bg };
        let label = format!(" {:<width$}", setting.label(), width = LABEL_WIDTH);
        lines.push(Line::from(vec![
            Span::styled(label, Style::default().fg(app.theme.text).bg(row_bg)),
            Span::styled(
                setting_value(app, *setting),
                Style::default()
                    .fg(app.theme.highlight)
                    .bg(row_bg)
                    .add_modifier(Modifier::BOLD),
            ),
        ]));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        " Enter, space or a click changes the selected setting",
        dim_style,
    )));
    if app.autosave_paused {
        lines.push(Line::from(Span::styled(
            " Autosave is paused until the file loads (press L)",
            Style::default().fg(app.theme.red).bg(bg),
        )));
    }

    frame.render_widget(
        Paragraph::new(lines).style(Style::default().bg(bg)),
        area,
    );

    for (i, setting) in Setting::ALL.iter().enumerate() {
        let y = first_row + i as u16;
        if y < area.y + area.height {
            app.hit_regions
                .push((Rect::new(area.x, y, area.width, 1), Hit::Setting(*setting)));
        }
    }
}

fn setting_value(app: &App, setting: Setting) -> String {
    let on_off = |on: bool| if on { "on" } else { "off" };
    match setting {
        Setting::Theme => app.theme.kind.label().to_string(),
        Setting::Autosave => on_off(app.list.autosave()).to_string(),
        Setting::PerfOverlay => on_off(app.show_perf).to_string(),
    }
}
