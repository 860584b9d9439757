use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::{App, Hit, View};
use crate::util::unicode::display_width;

/// Render the tab bar: one tab per view, with separator line below
pub fn render_tab_bar(frame: &mut Frame, app: &mut App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // tabs
            Constraint::Length(1), // separator
        ])
        .split(area);

    let sep_cols = render_tabs(frame, app, chunks[0]);
    render_separator(frame, app, chunks[1], &sep_cols);
}

/// Render tabs, record their click regions and return the column of each
/// separator character.
fn render_tabs(frame: &mut Frame, app: &mut App, area: Rect) -> Vec<usize> {
    let mut spans: Vec<Span> = Vec::new();
    let mut sep_cols: Vec<usize> = Vec::new();
    let sep = Span::styled(
        "\u{2502}",
        Style::default().fg(app.theme.dim).bg(app.theme.background),
    );

    // Leading icon
    let bg_style = Style::default().bg(app.theme.background);
    spans.push(Span::styled(" ", bg_style));
    spans.push(Span::styled(
        "\u{2713}",
        Style::default().fg(app.theme.highlight).bg(app.theme.background),
    ));
    spans.push(Span::styled(" ", bg_style));

    for view in View::ALL {
        let start = line_width(&spans);
        let label = format!(" {} ", view.title());
        let width = display_width(&label);
        spans.push(Span::styled(label, tab_style(app, app.view == view)));
        if start < area.width as usize {
            let visible = width.min(area.width as usize - start);
            app.hit_regions.push((
                Rect::new(area.x + start as u16, area.y, visible as u16, 1),
                Hit::Tab(view),
            ));
        }
        sep_cols.push(line_width(&spans));
        spans.push(sep.clone());
    }

    let line = Line::from(spans);
    let tabs = Paragraph::new(line).style(Style::default().bg(app.theme.background));
    frame.render_widget(tabs, area);
    sep_cols
}

fn render_separator(frame: &mut Frame, app: &App, area: Rect, sep_cols: &[usize]) {
    let width = area.width as usize;
    let mut line: String = String::with_capacity(width * 3);
    for col in 0..width {
        if sep_cols.contains(&col) {
            line.push('\u{2534}');
        } else {
            line.push('\u{2500}');
        }
    }
    let sep_widget =
        Paragraph::new(line).style(Style::default().fg(app.theme.dim).bg(app.theme.background));
    frame.render_widget(sep_widget, area);
}

fn line_width(spans: &[Span]) -> usize {
    spans.iter().map(|s| display_width(&s.content)).sum()
}

fn tab_style(app: &App, is_current: bool) -> Style {
    if is_current {
        Style::default()
            .fg(app.theme.text_bright)
            .bg(app.theme.selection_bg)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(app.theme.text).bg(app.theme.background)
    }
}
