use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::App;
use crate::tui::form::{FieldValue, Form};

/// Render a form. `active` is set while the form owns the keyboard; an
/// inactive form is drawn dimmed with no focus marker.
pub fn render_form(frame: &mut Frame, app: &App, area: Rect, title: &str, form: &Form, active: bool) {
    let bg = app.theme.background;
    let mut lines = vec![
        Line::from(Span::styled(
            format!(" {}", title),
            Style::default()
                .fg(app.theme.text_bright)
                .add_modifier(Modifier::BOLD),
        )),
        Line::default(),
    ];

    for (i, field) in form.fields.iter().enumerate() {
        let focused = active && i == form.focus;
        let marker = if focused { "\u{25B8}" } else { " " };
        let row_bg = if focused { app.theme.selection_bg } else { bg };
        let label_fg = if active { app.theme.text } else { app.theme.dim };

        let mut spans = vec![
            Span::styled(
                format!(" {} ", marker),
                Style::default().fg(app.theme.accent).bg(row_bg),
            ),
            Span::styled(
                format!("{:<10}", field.name),
                Style::default().fg(label_fg).bg(row_bg),
            ),
            Span::styled(
                field.display(),
                Style::default().fg(app.theme.text_bright).bg(row_bg),
            ),
        ];
        if focused {
            spans.push(Span::styled(
                "\u{258C}",
                Style::default().fg(app.theme.accent).bg(row_bg),
            ));
        }
        if let FieldValue::Int { max, .. } = field.value {
            spans.push(Span::styled(
                format!("  (max {})", max),
                Style::default().fg(app.theme.dim).bg(row_bg),
            ));
        }
        lines.push(Line::from(spans));
    }

    let paragraph = Paragraph::new(lines).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}
