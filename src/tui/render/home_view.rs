use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::{App, Hit, Mode};
use crate::util::unicode::{display_width, tail_to_width, truncate_to_width};

const HINT: &str = " Add to or read your to do list here.";
const ENTRY_LABEL: &str = " New todo item  ";
const EMPTY_LIST: &str = " Nothing in the list yet.";
const DELETE_MARKER: &str = "\u{2715}";

/// Render the Home tab: hint line, entry line, then the task list
pub fn render_home_view(frame: &mut Frame, app: &mut App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // hint
            Constraint::Length(1), // entry line
            Constraint::Length(1), // gap
            Constraint::Min(0),    // task list
        ])
        .split(area);

    let bg = app.theme.background;
    frame.render_widget(
        Paragraph::new(Span::styled(HINT, Style::default().fg(app.theme.dim).bg(bg))),
        chunks[0],
    );

    render_entry_line(frame, app, chunks[1]);
    render_task_list(frame, app, chunks[3]);
}

fn render_entry_line(frame: &mut Frame, app: &mut App, area: Rect) {
    let bg = app.theme.background;
    let editing = app.mode == Mode::Insert;
    let label_style = if editing {
        Style::default()
            .fg(app.theme.highlight)
            .bg(bg)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(app.theme.text).bg(bg)
    };

    let mut spans = vec![Span::styled(ENTRY_LABEL, label_style)];
    let avail = (area.width as usize).saturating_sub(display_width(ENTRY_LABEL) + 1);
    let entry = app.list.entry();

    if entry.is_empty() && !editing {
        spans.push(Span::styled(
            truncate_to_width("press a to type", avail),
            Style::default().fg(app.theme.dim).bg(bg),
        ));
    } else {
        spans.push(Span::styled(
            tail_to_width(entry, avail),
            Style::default().fg(app.theme.text_bright).bg(bg),
        ));
        if editing {
            // ▌ cursor
            spans.push(Span::styled(
                "\u{258C}",
                Style::default().fg(app.theme.highlight).bg(bg),
            ));
        }
    }

    frame.render_widget(
        Paragraph::new(Line::from(spans)).style(Style::default().bg(bg)),
        area,
    );
    app.hit_regions.push((area, Hit::Entry));
}

fn render_task_list(frame: &mut Frame, app: &mut App, area: Rect) {
    if area.height == 0 {
        return;
    }
    let bg = app.theme.background;

    if app.list.is_empty() {
        frame.render_widget(
            Paragraph::new(Span::styled(EMPTY_LIST, Style::default().fg(app.theme.dim).bg(bg))),
            Rect::new(area.x, area.y, area.width, 1),
        );
        return;
    }

    // Keep the cursor on screen
    let visible = area.height as usize;
    if app.cursor < app.scroll_offset {
        app.scroll_offset = app.cursor;
    } else if app.cursor >= app.scroll_offset + visible {
        app.scroll_offset = app.cursor + 1 - visible;
    }
    app.scroll_offset = app.scroll_offset.min(app.list.len().saturating_sub(visible));

    let width = area.width as usize;
    // " [x] " before the text, " ✕ " after it
    let text_width = width.saturating_sub(8);
    let mut hits = Vec::new();
    let mut lines: Vec<Line> = Vec::new();

    let end = (app.scroll_offset + visible).min(app.list.len());
    for index in app.scroll_offset..end {
        let task = &app.list.tasks()[index];
        let y = area.y + (index - app.scroll_offset) as u16;
        let selected = index == app.cursor && app.mode == Mode::Navigate;
        let row_bg = if selected { app.theme.selection_bg } else { bg };

        let check_color = if task.done {
            app.theme.green
        } else {
            app.theme.text
        };
        let mut text_style = Style::default()
            .fg(app.theme.task_color(task.done))
            .bg(row_bg);
        if task.done {
            text_style = text_style.add_modifier(Modifier::CROSSED_OUT);
        }
        if selected {
            text_style = text_style.add_modifier(Modifier::BOLD);
        }

        let text = truncate_to_width(&task.text, text_width);
        let pad = text_width.saturating_sub(display_width(&text));
        lines.push(Line::from(vec![
            Span::styled(" ", Style::default().bg(row_bg)),
            Span::styled(task.checkbox(), Style::default().fg(check_color).bg(row_bg)),
            Span::styled(" ", Style::default().bg(row_bg)),
            Span::styled(text, text_style),
            Span::styled(" ".repeat(pad + 1), Style::default().bg(row_bg)),
            Span::styled(DELETE_MARKER, Style::default().fg(app.theme.red).bg(row_bg)),
            Span::styled(" ", Style::default().bg(row_bg)),
        ]));

        if width >= 8 {
            hits.push((Rect::new(area.x + 1, y, 3, 1), Hit::Toggle(index)));
            hits.push((
                Rect::new(area.x + (width - 2) as u16, y, 1, 1),
                Hit::Delete(index),
            ));
        }
    }

    frame.render_widget(
        Paragraph::new(lines).style(Style::default().bg(bg)),
        area,
    );
    app.hit_regions.extend(hits);
}
