use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::layout::Rect;

use crate::model::{Config, Records};
use crate::ops::{goal_ops, task_ops};
use crate::tui::app::App;

pub const TERM_W: u16 = 60;
pub const TERM_H: u16 = 12;

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

/// Two goals (a half-done tally and a checklist) and two tasks.
pub fn sample_records() -> Records {
    let mut records = Records::default();
    let read = goal_ops::add_tally_goal(&mut records, "Read books", 10);
    goal_ops::set_progress(goal_ops::find_goal_mut(&mut records, read).unwrap(), 5).unwrap();
    let trip = goal_ops::add_checklist_goal(&mut records, "Trip");
    let goal = goal_ops::find_goal_mut(&mut records, trip).unwrap();
    goal_ops::add_element(goal, "Tickets").unwrap();
    goal_ops::add_element(goal, "Hotel").unwrap();
    goal_ops::toggle_element(goal, 0).unwrap();
    task_ops::add_task(&mut records, "Buy milk");
    task_ops::add_task(&mut records, "Pay rent");
    records
}

pub fn sample_app() -> App {
    App::new(Config::default(), sample_records())
}

/// Feed navigation keys straight to the motion engine.
pub fn navigate(app: &mut App, keys: &str) {
    for key in keys.chars() {
        app.motions.press(key, &app.records);
    }
}
