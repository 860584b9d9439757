use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Wrap};

use crate::tui::app::App;

/// Render the About tab: name, version, where the list lives
pub fn render_about_view(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let title_style = Style::default()
        .fg(app.theme.highlight)
        .bg(bg)
        .add_modifier(Modifier::BOLD);
    let text_style = Style::default().fg(app.theme.text).bg(bg);
    let key_style = Style::default().fg(app.theme.dim).bg(bg);

    let store = app.list.store();
    let lines = vec![
        Line::from(Span::styled(
            format!(" {} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION")),
            title_style,
        )),
        Line::from(Span::styled(" A small to-do list kept in a JSON file.", text_style)),
        Line::from(""),
        Line::from(vec![
            Span::styled(" File          ", key_style),
            Span::styled(store.path().display().to_string(), text_style),
        ]),
        Line::from(vec![
            Span::styled(" Recovery log  ", key_style),
            Span::styled(store.recovery_log_path().display().to_string(), text_style),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            " Press ? for key bindings. Run `tick --help` for the command line.",
            key_style,
        )),
    ];

    frame.render_widget(
        Paragraph::new(lines)
            .style(Style::default().bg(bg))
            .wrap(Wrap { trim: false }),
        area,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::render::test_helpers::*;

    #[test]
    fn shows_version_and_paths() {
        let app = app_with_tasks(&[]);
        let output = render_to_string(TERM_W, 10, |frame, area| {
            render_about_view(frame, &app, area);
        });
        assert!(output.contains(&format!("ticklist {}", env!("CARGO_PKG_VERSION"))));
        assert!(output.contains("File          /tmp/ticklist-render-test/todo.json"));
        assert!(output.contains("/tmp/ticklist-render-test/.ticklist-recovery.log"));
    }
}
