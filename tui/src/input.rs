//! Key handling: translate terminal input into app mutations and actions.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use lumen_engine::App;

/// What the caller must do after a key was handled. Selection moves and tab
/// switches mutate the app directly and need nothing from the loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Run one landmark resolution for the selected category.
    Resolve,
    /// Leave the dashboard.
    Quit,
}

/// Handle one key event. Returns the follow-up action, if any.
pub fn handle_key(app: &mut App, key: KeyEvent) -> Option<Action> {
    if key.kind == KeyEventKind::Release {
        return None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Action::Quit);
    }

    match key.code {
        KeyCode::Up | KeyCode::Char('k') => {
            app.select_previous();
            None
        }
        KeyCode::Down | KeyCode::Char('j') => {
            app.select_next();
            None
        }
        KeyCode::Tab => {
            app.next_tab();
            None
        }
        KeyCode::Enter => Some(Action::Resolve),
        KeyCode::Esc | KeyCode::Char('q') => Some(Action::Quit),
        _ => None,
    }
}
