use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::tui::app::App;

/// Render the help overlay (toggled with ?)
pub fn render_help_overlay(frame: &mut Frame, app: &App, area: Rect) {
    let overlay_area = centered_rect(70, 90, area);

    // Clear the area behind the overlay
    frame.render_widget(Clear, overlay_area);

    let bg = app.theme.background;
    let key_style = Style::default()
        .fg(app.theme.highlight)
        .bg(bg)
        .add_modifier(Modifier::BOLD);
    let desc_style = Style::default().fg(app.theme.text).bg(bg);
    let header_style = Style::default()
        .fg(app.theme.text_bright)
        .bg(bg)
        .add_modifier(Modifier::BOLD);

    let mut lines: Vec<Line> = Vec::new();
    lines.push(Line::from(Span::styled(" Key Bindings", header_style)));
    lines.push(Line::from(""));

    lines.push(Line::from(Span::styled(" List", header_style)));
    add_binding(&mut lines, " \u{2191}\u{2193}/jk", "Move cursor", key_style, desc_style);
    add_binding(&mut lines, " space/x", "Toggle done", key_style, desc_style);
    add_binding(&mut lines, " d/Del", "Delete task", key_style, desc_style);
    add_binding(&mut lines, " a/i/Enter", "Type a new task", key_style, desc_style);
    add_binding(&mut lines, " S / Ctrl+S", "Save now", key_style, desc_style);
    add_binding(&mut lines, " L", "Reload from file", key_style, desc_style);
    lines.push(Line::from(""));

    lines.push(Line::from(Span::styled(" Typing", header_style)));
    add_binding(&mut lines, " Enter", "Add the task", key_style, desc_style);
    add_binding(&mut lines, " Esc", "Stop typing (text is kept)", key_style, desc_style);
    add_binding(&mut lines, " Ctrl+U/W", "Clear line / word", key_style, desc_style);
    lines.push(Line::from(""));

    lines.push(Line::from(Span::styled(" Global", header_style)));
    add_binding(&mut lines, " Tab/1-3", "Switch tab", key_style, desc_style);
    add_binding(&mut lines, " t", "Light / dark theme", key_style, desc_style);
    add_binding(&mut lines, " F3", "Performance overlay", key_style, desc_style);
    add_binding(&mut lines, " ?", "Toggle this help", key_style, desc_style);
    add_binding(&mut lines, " q / Ctrl+Q", "Quit", key_style, desc_style);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.border).bg(bg))
        .style(Style::default().bg(bg));

    let paragraph = Paragraph::new(lines)
        .block(block)
        .style(Style::default().bg(bg));

    frame.render_widget(paragraph, overlay_area);
}

fn add_binding<'a>(
    lines: &mut Vec<Line<'a>>,
    key: &'a str,
    desc: &'a str,
    key_style: Style,
    desc_style: Style,
) {
    let key_width = 14;
    let padded_key = format!("{:<width$}", key, width = key_width);
    lines.push(Line::from(vec![
        Span::styled(padded_key, key_style),
        Span::styled(desc, desc_style),
    ]));
}

/// Create a centered rectangle of the given percentage of the parent
fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
