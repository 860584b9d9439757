use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::{App, Mode, StatusKind};
use crate::util::unicode::{display_width, truncate_to_width};

const NAVIGATE_HINTS: &str = " a add  space toggle  d delete  S save  L load  ? help";
const INSERT_HINTS: &str = " Enter add  Esc done  Ctrl+U clear";

/// Render the status row (bottom of screen): message or key hints on the
/// left, list counts on the right
pub fn render_status_row(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let width = area.width as usize;

    // Counts give way to the message on narrow terminals
    let right = summary_text(app);
    let right_width = display_width(&right);
    let show_right = right_width + 10 <= width;
    let left_budget = if show_right {
        width - right_width - 1
    } else {
        width
    };

    let mut spans: Vec<Span> = Vec::new();
    if app.mode == Mode::Insert {
        spans.push(Span::styled(
            " -- INSERT --",
            Style::default()
                .fg(app.theme.highlight)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        ));
    }

    let used: usize = spans.iter().map(|s| display_width(&s.content)).sum();
    let budget = left_budget.saturating_sub(used);
    if let Some(status) = &app.status {
        let color = match status.kind {
            StatusKind::Info => app.theme.text_bright,
            StatusKind::Error => app.theme.red,
        };
        spans.push(Span::styled(
            truncate_to_width(&format!(" {}", status.text), budget),
            Style::default().fg(color).bg(bg),
        ));
    } else if app.ui_config.show_key_hints {
        let hints = match app.mode {
            Mode::Navigate => NAVIGATE_HINTS,
            Mode::Insert => INSERT_HINTS,
        };
        spans.push(Span::styled(
            truncate_to_width(hints, budget),
            Style::default().fg(app.theme.dim).bg(bg),
        ));
    }

    let content_width: usize = spans.iter().map(|s| display_width(&s.content)).sum();
    if show_right && content_width + right_width < width {
        let padding = width - content_width - right_width;
        spans.push(Span::styled(" ".repeat(padding), Style::default().bg(bg)));
        let style = if app.list.is_dirty() {
            Style::default().fg(app.theme.yellow).bg(bg)
        } else {
            Style::default().fg(app.theme.dim).bg(bg)
        };
        spans.push(Span::styled(right, style));
    }

    let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}

/// e.g. `3 tasks, 1 done [modified] `
fn summary_text(app: &App) -> String {
    let count = app.list.len();
    let mut text = format!(
        "{} task{}, {} done",
        count,
        if count == 1 { "" } else { "s" },
        app.list.done_count()
    );
    if app.list.is_dirty() {
        text.push_str(" [modified]");
    }
    text.push(' ');
    text
}
