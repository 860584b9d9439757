use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Clear, Paragraph};

use crate::tui::app::App;
use crate::util::unicode::display_width;

/// Draw the frame-rate readout in the top-right corner of `area`
pub fn render_perf_overlay(frame: &mut Frame, app: &App, area: Rect) {
    let text = format!(" {} ", app.frame_stats.summary());
    let width = (display_width(&text) as u16).min(area.width);
    if width == 0 || area.height == 0 {
        return;
    }
    let rect = Rect::new(area.x + area.width - width, area.y, width, 1);

    frame.render_widget(Clear, rect);
    frame.render_widget(
        Paragraph::new(text).style(
            Style::default()
                .fg(app.theme.yellow)
                .bg(app.theme.selection_bg)
                .add_modifier(Modifier::BOLD),
        ),
        rect,
    );
}
