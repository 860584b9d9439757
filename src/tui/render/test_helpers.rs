use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::layout::Rect;

use crate::io::store::JsonFileStore;
use crate::model::UiConfig;
use crate::ops::TaskList;
use crate::tui::app::App;

pub const TERM_W: u16 = 80;
pub const TERM_H: u16 = 24;

/// Render into an in-memory buffer and return plain text (no styles).
pub fn render_to_string<F>(w: u16, h: u16, f: F) -> String
where
    F: FnOnce(&mut ratatui::Frame, Rect),
{
    let backend = TestBackend::new(w, h);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal
        .draw(|frame| {
            let area = frame.area();
            f(frame, area);
        })
        .unwrap();

    let buf = terminal.backend().buffer().clone();
    let w = buf.area.width as usize;
    let lines: Vec<String> = buf
        .content
        .chunks(w)
        .map(|row| {
            let s: String = row.iter().map(|cell| cell.symbol()).collect();
            s.trim_end().to_string()
        })
        .collect();

    // Trim trailing blank lines
    let end = lines
        .iter()
        .rposition(|l| !l.is_empty())
        .map_or(0, |i| i + 1);
    lines[..end].join("\n")
}

/// An app over an in-memory list. Autosave is off and nothing is loaded,
/// so the backing path is never touched.
pub fn app_with_tasks(tasks: &[(&str, bool)]) -> App {
    let store = JsonFileStore::new("/tmp/ticklist-render-test/todo.json").with_recovery_log(false);
    let mut list = TaskList::new(store, false);
    for (i, (text, done)) in tasks.iter().enumerate() {
        list.add(text).unwrap();
        if *done {
            list.toggle_done(i).unwrap();
        }
    }
    App::new(list, UiConfig::default())
}
