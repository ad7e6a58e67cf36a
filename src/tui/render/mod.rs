pub mod breadcrumb;
pub mod form_view;
mod helpers;
pub mod page_view;
pub mod status_row;

#[cfg(test)]
pub(crate) mod test_helpers;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::Style;
use ratatui::widgets::Block;

use super::app::App;

/// Main render function: breadcrumb, page, status row
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    // Background fill
    let bg_style = Style::default().bg(app.theme.background);
    frame.render_widget(Block::default().style(bg_style), area);

    // Layout: breadcrumb (2 rows) | page | status row (1 row)
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // breadcrumb + separator
            Constraint::Min(1),    // page
            Constraint::Length(1), // status row
        ])
        .split(area);

    breadcrumb::render_breadcrumb(frame, app, chunks[0]);
    page_view::render_page(frame, app, chunks[1]);
    status_row::render_status_row(frame, app, chunks[2]);
}
