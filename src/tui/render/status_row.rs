use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::{App, Mode};

use super::helpers::{display_width, spans_width, truncate_to_width};

const ENTRY_LABEL: &str = "ENTRY ";

/// Render the status row (bottom of screen): last message on the left,
/// mode indicator on the right while a form is open.
pub fn render_status_row(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let width = area.width as usize;

    let indicator = match app.mode {
        Mode::Navigation => "",
        Mode::FieldEntry => ENTRY_LABEL,
    };
    let room = width.saturating_sub(display_width(indicator) + 1);

    let mut spans = Vec::new();
    if let Some(status) = &app.status {
        let fg = if status.is_error {
            app.theme.error
        } else {
            app.theme.text
        };
        spans.push(Span::styled(
            format!(" {}", truncate_to_width(&status.text, room.saturating_sub(1))),
            Style::default().fg(fg).bg(bg),
        ));
    }

    if !indicator.is_empty() {
        let used = spans_width(&spans);
        let padding = width.saturating_sub(used + display_width(indicator));
        spans.push(Span::styled(" ".repeat(padding), Style::default().bg(bg)));
        spans.push(Span::styled(
            indicator,
            Style::default()
                .fg(app.theme.accent)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        ));
    }

    let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}
