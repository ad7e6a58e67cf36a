use crossterm::event::KeyEvent;
use tracing::warn;

use crate::tui::app::{App, Mode};
use crate::tui::form::FormEvent;

pub(super) fn handle_field_entry(app: &mut App, key: KeyEvent) {
    let Some(form) = app.form.as_mut() else {
        app.mode = Mode::Navigation;
        return;
    };
    match form.handle_key(key) {
        FormEvent::Cancel => leave_form(app),
        FormEvent::Submit => submit_form(app),
        FormEvent::Edited | FormEvent::Moved | FormEvent::Ignored => {}
    }
}

/// Commit the open form. The form is closed whether or not the commit
/// succeeded; failures land in the status row.
pub(super) fn submit_form(app: &mut App) {
    let selection = app.motions.selection();
    let Some(form) = app.form.as_mut() else {
        return;
    };
    match form.commit(&mut app.records, selection) {
        Ok(message) => {
            app.dirty = true;
            app.set_status(message);
        }
        Err(e) => {
            warn!(error = %e, "form commit failed");
            app.set_error(e.to_string());
        }
    }
    leave_form(app);
}

/// Back to Navigation, one crumb up from the form's page.
fn leave_form(app: &mut App) {
    app.form = None;
    app.mode = Mode::Navigation;
    app.motions.back();
}
