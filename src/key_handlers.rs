use crate::app::{App, Focus};
use crate::key_store::{KeyStore, SaveOutcome};
use crate::status::StatusVariant;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::warn;

/// Dispatches one key event. Returns the message text when a chat
/// submission should start; the caller owns spawning the request.
pub fn handle_key_event(key: KeyEvent, app: &mut App, store: &KeyStore) -> Option<String> {
    match key.code {
        KeyCode::Esc => {
            app.should_quit = true;
        }
        KeyCode::Tab => {
            app.toggle_focus();
        }
        KeyCode::Enter => match app.focus {
            Focus::Message => return app.begin_submission(),
            Focus::ApiKey => save_key(app, store),
        },
        KeyCode::PageUp => app.scroll_up(),
        KeyCode::PageDown => app.scroll_down(),
        KeyCode::Backspace => {
            app.focused_input_mut().pop();
        }
        KeyCode::Char(c) => {
            if key.modifiers.contains(KeyModifiers::CONTROL) {
                match c {
                    'c' => app.should_quit = true,
                    'k' => clear_key(app, store),
                    'u' => app.scroll_up(),
                    'd' => app.scroll_down(),
                    _ => {}
                }
            } else {
                app.focused_input_mut().push(c);
            }
        }
        _ => {}
    }
    None
}

/// Persists the key field. Store failures never propagate; they become an
/// error-variant banner.
pub fn save_key(app: &mut App, store: &KeyStore) {
    let value = app.key_input.trim().to_string();
    if value.is_empty() {
        app.banner
            .set("Enter a Gemini API key before saving.", StatusVariant::Error);
        return;
    }

    match store.save(&value) {
        Ok(SaveOutcome::Saved) => app.banner.set(
            "Key saved locally on this machine.",
            StatusVariant::Success,
        ),
        Ok(SaveOutcome::Cleared) => app
            .banner
            .set("Key cleared from local storage.", StatusVariant::Muted),
        Err(err) => {
            warn!("unable to persist API key: {err}");
            app.banner.set(
                "Unable to use local key storage on this machine.",
                StatusVariant::Error,
            );
        }
    }
}

pub fn clear_key(app: &mut App, store: &KeyStore) {
    app.key_input.clear();
    match store.clear() {
        Ok(_) => app
            .banner
            .set("Key cleared from local storage.", StatusVariant::Muted),
        Err(err) => {
            warn!("unable to clear API key: {err}");
            app.banner.set(
                "Unable to use local key storage on this machine.",
                StatusVariant::Error,
            );
        }
    }
}
