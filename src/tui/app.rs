use std::io;

use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tracing::info;

use crate::model::{Config, Records};

use super::form::Form;
use super::input;
use super::motion::MotionEngine;
use super::render;
use super::theme::Theme;

/// Who owns keystrokes right now
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Keys move through the motion tree.
    Navigation,
    /// Keys edit the focused field of the open form.
    FieldEntry,
}

/// One line of feedback for the status row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Status {
    pub text: String,
    pub is_error: bool,
}

/// Main application state
pub struct App {
    pub config: Config,
    pub records: Records,
    pub motions: MotionEngine,
    pub mode: Mode,
    /// Open form while in FieldEntry
    pub form: Option<Form>,
    pub theme: Theme,
    pub should_quit: bool,
    /// Records were changed and must be saved on exit
    pub dirty: bool,
    pub status: Option<Status>,
}

impl App {
    pub fn new(config: Config, records: Records) -> Self {
        let theme = Theme::from_config(&config.ui);
        App {
            config,
            records,
            motions: MotionEngine::new(),
            mode: Mode::Navigation,
            form: None,
            theme,
            should_quit: false,
            dirty: false,
            status: None,
        }
    }

    pub fn set_status(&mut self, text: impl Into<String>) {
        self.status = Some(Status {
            text: text.into(),
            is_error: false,
        });
    }

    pub fn set_error(&mut self, text: impl Into<String>) {
        self.status = Some(Status {
            text: text.into(),
            is_error: true,
        });
    }
}

/// Run an interactive session over `records`. Returns whether any record
/// was changed; the caller owns persistence.
pub fn run(config: &Config, records: &mut Records) -> io::Result<bool> {
    let mut app = App::new(config.clone(), std::mem::take(records));

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Install panic hook to restore terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    let result = run_event_loop(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    *records = app.records;
    result?;
    info!(changed = app.dirty, "tui session ended");
    Ok(app.dirty)
}

/// Blocks on each key event; the quit key is the only way out.
fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> io::Result<()> {
    loop {
        terminal.draw(|frame| render::render(frame, app))?;

        if let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            input::handle_key(app, key);
        }

        if app.should_quit {
            break;
        }
    }
    Ok(())
}
