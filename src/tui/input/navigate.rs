use crossterm::event::{KeyCode, KeyEvent};
use tracing::debug;

use crate::tui::app::{App, Mode};
use crate::tui::form::{Form, FormKind};

use super::*;

pub(super) fn handle_navigate(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') => app.should_quit = true,
        KeyCode::Enter => enter_form(app),
        KeyCode::Backspace | KeyCode::Esc => {
            if app.motions.back() {
                app.status = None;
            }
        }
        KeyCode::Char(c) => {
            if app.motions.press(c, &app.records) {
                app.status = None;
            }
        }
        _ => {}
    }
}

/// Open the form the current page owns. A form without fields has nothing
/// to edit and is committed straight away.
fn enter_form(app: &mut App) {
    let Some(kind) = FormKind::for_page(app.motions.page()) else {
        return;
    };
    let form = Form::new(kind, app.motions.selection(), &app.records);
    let immediate = form.fields.is_empty();
    app.form = Some(form);
    app.mode = Mode::FieldEntry;
    debug!(?kind, "entered field entry");
    if immediate {
        submit_form(app);
    }
}
