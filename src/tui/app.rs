use std::io;
use std::time::{Duration, Instant};

use crossterm::event::{
    self, DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
    Event, KeyEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Rect;

use crate::io::store::{JsonFileStore, StoreError};
use crate::model::{ThemeKind, UiConfig};
use crate::ops::{Applied, Intent, TaskList};

use super::frame_stats::FrameStats;
use super::input;
use super::render;
use super::theme::Theme;

/// How long a status message stays up before a key press may clear it
const STATUS_MIN_DISPLAY: Duration = Duration::from_secs(3);

/// Which tab is currently displayed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Home,
    Settings,
    About,
}

impl View {
    pub const ALL: [View; 3] = [View::Home, View::Settings, View::About];

    pub fn title(self) -> &'static str {
        match self {
            View::Home => "Home",
            View::Settings => "Settings",
            View::About => "About",
        }
    }

    pub fn next(self) -> View {
        match self {
            View::Home => View::Settings,
            View::Settings => View::About,
            View::About => View::Home,
        }
    }

    pub fn prev(self) -> View {
        match self {
            View::Home => View::About,
            View::Settings => View::Home,
            View::About => View::Settings,
        }
    }
}

/// Current interaction mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Navigate,
    /// Typing into the new-task entry line
    Insert,
}

/// Rows of the Settings tab
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Setting {
    Theme,
    Autosave,
    PerfOverlay,
}

impl Setting {
    pub const ALL: [Setting; 3] = [Setting::Theme, Setting::Autosave, Setting::PerfOverlay];

    pub fn label(self) -> &'static str {
        match self {
            Setting::Theme => "Theme",
            Setting::Autosave => "Autosave",
            Setting::PerfOverlay => "Performance overlay",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Error,
}

/// A one-line message shown in the status row
#[derive(Debug, Clone)]
pub struct StatusMessage {
    pub text: String,
    pub kind: StatusKind,
    pub at: Instant,
}

/// Something drawn last frame that reacts to a mouse click
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hit {
    Toggle(usize),
    Delete(usize),
    Tab(View),
    Entry,
    Setting(Setting),
}

/// Session state for the UI: the task list plus everything about how it is shown
pub struct App {
    pub list: TaskList<JsonFileStore>,
    pub view: View,
    pub mode: Mode,
    pub should_quit: bool,
    pub theme: Theme,
    pub ui_config: UiConfig,
    /// Selected row in the Home tab
    pub cursor: usize,
    /// First visible task row in the Home tab
    pub scroll_offset: usize,
    /// Selected row in the Settings tab
    pub settings_cursor: usize,
    pub show_help: bool,
    pub show_perf: bool,
    pub frame_stats: FrameStats,
    pub status: Option<StatusMessage>,
    /// Intents collected from this frame's input, applied after the UI pass
    pub pending: Vec<Intent>,
    /// Clickable regions recorded by the last render
    pub hit_regions: Vec<(Rect, Hit)>,
    /// Autosave was switched off because the file could not be loaded
    pub autosave_paused: bool,
}

impl App {
    pub fn new(list: TaskList<JsonFileStore>, ui_config: UiConfig) -> Self {
        let theme = Theme::from_config(ui_config.theme, &ui_config);
        App {
            list,
            view: View::Home,
            mode: Mode::Navigate,
            should_quit: false,
            theme,
            show_perf: ui_config.show_perf,
            ui_config,
            cursor: 0,
            scroll_offset: 0,
            settings_cursor: 0,
            show_help: false,
            frame_stats: FrameStats::new(),
            status: None,
            pending: Vec::new(),
            hit_regions: Vec::new(),
            autosave_paused: false,
        }
    }

    /// Start with an empty list after the backing file failed to load.
    /// Autosave stays off until a load succeeds so the file is not overwritten.
    pub fn with_load_error(mut self, err: &StoreError) -> Self {
        let text = if self.list.autosave() {
            self.list.set_autosave(false);
            self.autosave_paused = true;
            format!("{} (autosave paused)", err)
        } else {
            err.to_string()
        };
        let text = self.with_log_warning(text);
        self.set_error(text);
        self
    }

    /// Append the latest recovery log failure, if any, to an error message
    fn with_log_warning(&self, text: String) -> String {
        match self.list.store().take_log_warnings().pop() {
            Some(warning) => format!("{}; {}", text, warning),
            None => text,
        }
    }

    pub fn set_theme(&mut self, kind: ThemeKind) {
        self.theme = Theme::from_config(kind, &self.ui_config);
    }

    pub fn toggle_theme(&mut self) {
        self.set_theme(self.theme.kind.toggled());
    }

    pub fn toggle_autosave(&mut self) {
        let on = !self.list.autosave();
        self.list.set_autosave(on);
        self.autosave_paused = false;
        self.set_info(if on { "Autosave on" } else { "Autosave off" });
    }

    pub fn set_info(&mut self, text: impl Into<String>) {
        self.status = Some(StatusMessage {
            text: text.into(),
            kind: StatusKind::Info,
            at: Instant::now(),
        });
    }

    pub fn set_error(&mut self, text: impl Into<String>) {
        self.status = Some(StatusMessage {
            text: text.into(),
            kind: StatusKind::Error,
            at: Instant::now(),
        });
    }

    /// Drop the status message once it has been up long enough
    pub fn expire_status(&mut self) {
        if self
            .status
            .as_ref()
            .is_some_and(|s| s.at.elapsed() >= STATUS_MIN_DISPLAY)
        {
            self.status = None;
        }
    }

    /// Queue an intent for the end of this frame
    pub fn push_intent(&mut self, intent: Intent) {
        self.pending.push(intent);
    }

    /// File name shown to the user
    pub fn file_label(&self) -> String {
        let path = self.list.store().path();
        path.file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string())
    }

    /// Apply this frame's intents and reflect the outcome in the UI state.
    pub fn apply_pending(&mut self) -> Applied {
        let intents = std::mem::take(&mut self.pending);
        let applied = self.list.apply(intents);

        if applied.loaded {
            if self.autosave_paused {
                self.list.set_autosave(true);
                self.autosave_paused = false;
            }
            self.cursor = 0;
            self.scroll_offset = 0;
            let count = self.list.len();
            let label = self.file_label();
            self.set_info(format!(
                "Loaded {} task{} from {}",
                count,
                if count == 1 { "" } else { "s" },
                label
            ));
        }
        if applied.saved {
            let label = self.file_label();
            self.set_info(format!("Saved to {}", label));
        }
        let warning = self.list.store().take_log_warnings().pop();
        match (applied.errors.last(), warning) {
            (Some(err), Some(warning)) => self.set_error(format!("{}; {}", err, warning)),
            (Some(err), None) => self.set_error(err.to_string()),
            (None, Some(warning)) => self.set_error(warning),
            (None, None) => {}
        }
        if applied.exit_requested {
            self.should_quit = true;
        }

        self.clamp_cursor();
        applied
    }

    pub fn clamp_cursor(&mut self) {
        let len = self.list.len();
        if len == 0 {
            self.cursor = 0;
        } else if self.cursor >= len {
            self.cursor = len - 1;
        }
    }

    /// True when input handled since `view_at_start` must be followed by a
    /// redraw before more input is read. Switching tabs drops the click
    /// regions of the tab that is no longer shown.
    pub fn ends_frame(&mut self, view_at_start: View) -> bool {
        if self.view != view_at_start {
            self.hit_regions.clear();
            return true;
        }
        !self.pending.is_empty()
    }

    /// The clickable target at a screen position, if any
    pub fn hit_at(&self, column: u16, row: u16) -> Option<Hit> {
        self.hit_regions
            .iter()
            .rev()
            .find(|(rect, _)| {
                column >= rect.x
                    && column < rect.x + rect.width
                    && row >= rect.y
                    && row < rect.y + rect.height
            })
            .map(|(_, hit)| *hit)
    }
}

/// Run the TUI until the user exits.
///
/// `load_error` is the error from the initial load, if any; the session then
/// starts with an empty list and shows the error.
pub fn run(
    list: TaskList<JsonFileStore>,
    ui_config: UiConfig,
    load_error: Option<StoreError>,
) -> Result<(), Box<dyn std::error::Error>> {
    let tick = Duration::from_millis(ui_config.tick_ms.max(1));
    let mut app = App::new(list, ui_config);
    if let Some(err) = &load_error {
        app = app.with_load_error(err);
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(
        stdout,
        EnterAlternateScreen,
        EnableMouseCapture,
        EnableBracketedPaste
    )?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Install panic hook to restore terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(
            io::stdout(),
            DisableBracketedPaste,
            DisableMouseCapture,
            LeaveAlternateScreen
        );
        original_hook(panic_info);
    }));

    let result = run_event_loop(&mut terminal, &mut app, tick);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableBracketedPaste,
        DisableMouseCapture,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;

    if app.list.is_dirty() {
        eprintln!(
            "note: unsaved changes were discarded ({} was not written)",
            app.list.store().path().display()
        );
    }

    result
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    tick: Duration,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        let frame_start = Instant::now();
        app.frame_stats.begin_frame(frame_start);
        terminal.draw(|frame| render::render(frame, app))?;
        app.frame_stats.end_frame(frame_start.elapsed());

        if event::poll(tick)? {
            let view_at_start = app.view;
            loop {
                match event::read()? {
                    Event::Key(key) if key.kind == KeyEventKind::Press => {
                        input::handle_key(app, key);
                    }
                    Event::Mouse(mouse) => input::handle_mouse(app, mouse),
                    Event::Paste(text) => input::handle_paste(app, &text),
                    _ => {}
                }
                if app.ends_frame(view_at_start) || !event::poll(Duration::ZERO)? {
                    break;
                }
            }
        }

        app.apply_pending();

        if app.should_quit {
            break;
        }
    }
    Ok(())
}
