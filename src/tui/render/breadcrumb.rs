use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::App;

use super::helpers::{display_width, spans_width, truncate_to_width};

const SEPARATOR: &str = " \u{203A} ";

/// Render the breadcrumb trail with a separator line below
pub fn render_breadcrumb(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // trail
            Constraint::Length(1), // separator
        ])
        .split(area);

    render_trail(frame, app, chunks[0]);

    let rule = "\u{2500}".repeat(chunks[1].width as usize);
    let separator = Paragraph::new(Span::styled(
        rule,
        Style::default().fg(app.theme.dim).bg(app.theme.background),
    ));
    frame.render_widget(separator, chunks[1]);
}

fn render_trail(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let labels = app.motions.labels(&app.records);
    let width = (area.width as usize).saturating_sub(1);

    // Drop the oldest crumbs until the trail fits, marking the cut with `…`
    let mut skip = 0;
    while skip + 1 < labels.len() && trail_width(&labels[skip..], skip > 0) > width {
        skip += 1;
    }

    let sep_style = Style::default().fg(app.theme.dim).bg(bg);
    let mut spans = vec![Span::styled(" ", Style::default().bg(bg))];
    if skip > 0 {
        spans.push(Span::styled("\u{2026}", sep_style));
        spans.push(Span::styled(SEPARATOR, sep_style));
    }

    let last = labels.len() - 1;
    for (i, label) in labels.iter().enumerate().skip(skip) {
        if i > skip {
            spans.push(Span::styled(SEPARATOR, sep_style));
        }
        let style = if i == last {
            Style::default()
                .fg(app.theme.accent)
                .bg(bg)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(app.theme.text).bg(bg)
        };
        let used = spans_width(&spans);
        spans.push(Span::styled(
            truncate_to_width(label, width.saturating_sub(used).max(1)),
            style,
        ));
    }

    let trail = Paragraph::new(Line::from(spans)).style(Style::default().bg(bg));
    frame.render_widget(trail, area);
}

fn trail_width(labels: &[String], elided: bool) -> usize {
    let seps = labels.len().saturating_sub(1) + usize::from(elided);
    let elision = if elided { 1 } else { 0 };
    labels.iter().map(|l| display_width(l)).sum::<usize>()
        + seps * display_width(SEPARATOR)
        + elision
}
