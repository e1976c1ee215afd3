//! Input handling for the ticonv TUI.
//!
//! There is a single editing mode: printable keys edit the color draft and
//! control chords drive the session.

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tracing::debug;

use ticonv_engine::App;

/// Block until the next terminal event and apply it.
///
/// Returns `true` when the app should exit.
pub fn handle_events(app: &mut App) -> Result<bool> {
    let event = event::read()?;
    Ok(apply_event(app, event))
}

/// Apply one terminal event to the app. Returns `true` when the app should exit.
pub fn apply_event(app: &mut App, event: Event) -> bool {
    match event {
        Event::Key(key) => {
            // Handle press + repeat events (ignore releases)
            if !matches!(key.kind, KeyEventKind::Release) {
                handle_key(app, key);
            }
        }
        Event::Paste(text) => app.draft_mut().enter_text(&text),
        _ => {}
    }
    app.should_quit()
}

fn handle_key(app: &mut App, key: KeyEvent) {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    if ctrl {
        match key.code {
            KeyCode::Char('c') => app.request_quit(),
            KeyCode::Char('n') => app.skip(),
            KeyCode::Char('b') => app.undo(),
            KeyCode::Char('l') => {
                let written = app.generate();
                debug!(files = written.len(), "Generate requested");
            }
            KeyCode::Char('o') => app.submit_draft(),
            KeyCode::Char('w') => app.draft_mut().delete_word_backwards(),
            KeyCode::Char('u') => app.draft_mut().clear(),
            _ => {}
        }
        return;
    }

    match key.code {
        KeyCode::Esc => app.request_quit(),
        KeyCode::Enter => app.submit_draft(),
        KeyCode::Backspace => app.draft_mut().delete_char(),
        KeyCode::Delete => app.draft_mut().delete_char_forward(),
        KeyCode::Left => app.draft_mut().move_cursor_left(),
        KeyCode::Right => app.draft_mut().move_cursor_right(),
        KeyCode::Home => app.draft_mut().reset_cursor(),
        KeyCode::End => app.draft_mut().move_cursor_end(),
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::ALT) => {
            app.draft_mut().enter_char(c);
        }
        _ => {}
    }
}
