use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::App;

/// Input action that can be performed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Quit,
    ScrollDown,
    ScrollUp,
    ScrollHalfPageDown,
    ScrollHalfPageUp,
    ScrollPageDown,
    ScrollPageUp,
    JumpToTop,
    JumpToBottom,
    PendingG, // First 'g' press, waiting for second 'g'
    NextLink,
    PrevLink,
    Activate,
    Help,
    ExitMode,
    None,
}

/// Handle a key event and return the corresponding action
pub fn handle_key_event(key: KeyEvent, app: &App) -> Action {
    if app.show_help {
        // Any key exits help
        return Action::ExitMode;
    }

    match (key.code, key.modifiers) {
        // Quit
        (KeyCode::Char('q'), KeyModifiers::NONE) => Action::Quit,
        (KeyCode::Char('c'), KeyModifiers::CONTROL) => Action::Quit,

        // Line scrolling
        (KeyCode::Char('j'), KeyModifiers::NONE) => Action::ScrollDown,
        (KeyCode::Char('k'), KeyModifiers::NONE) => Action::ScrollUp,
        (KeyCode::Down, KeyModifiers::NONE) => Action::ScrollDown,
        (KeyCode::Up, KeyModifiers::NONE) => Action::ScrollUp,

        // Page scrolling
        (KeyCode::Char('d'), KeyModifiers::CONTROL) => Action::ScrollHalfPageDown,
        (KeyCode::Char('u'), KeyModifiers::CONTROL) => Action::ScrollHalfPageUp,
        (KeyCode::Char('f'), KeyModifiers::CONTROL) => Action::ScrollPageDown,
        (KeyCode::Char('b'), KeyModifiers::CONTROL) => Action::ScrollPageUp,
        (KeyCode::PageDown, KeyModifiers::NONE) => Action::ScrollPageDown,
        (KeyCode::PageUp, KeyModifiers::NONE) => Action::ScrollPageUp,

        // Jump to top/bottom
        (KeyCode::Char('g'), KeyModifiers::NONE) => {
            // gg requires double press
            if app.pending_key == Some('g') {
                Action::JumpToTop
            } else {
                Action::PendingG
            }
        }
        (KeyCode::Char('G'), KeyModifiers::SHIFT) => Action::JumpToBottom,
        (KeyCode::Home, KeyModifiers::NONE) => Action::JumpToTop,
        (KeyCode::End, KeyModifiers::NONE) => Action::JumpToBottom,

        // Link focus and activation
        (KeyCode::Tab, KeyModifiers::NONE) => Action::NextLink,
        (KeyCode::BackTab, KeyModifiers::SHIFT) => Action::PrevLink,
        (KeyCode::Char('n'), KeyModifiers::NONE) => Action::NextLink,
        (KeyCode::Char('p'), KeyModifiers::NONE) => Action::PrevLink,
        (KeyCode::Enter, KeyModifiers::NONE) => Action::Activate,

        // Help
        (KeyCode::Char('?'), KeyModifiers::SHIFT) => Action::Help,
        (KeyCode::Esc, KeyModifiers::NONE) => Action::ExitMode,

        _ => Action::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::tests::test_app;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_basic_bindings() {
        let app = test_app();
        assert_eq!(handle_key_event(key(KeyCode::Char('q')), &app), Action::Quit);
        assert_eq!(
            handle_key_event(key(KeyCode::Char('j')), &app),
            Action::ScrollDown
        );
        assert_eq!(handle_key_event(key(KeyCode::Tab), &app), Action::NextLink);
        assert_eq!(handle_key_event(key(KeyCode::Enter), &app), Action::Activate);
    }

    #[test]
    fn test_double_g_jumps_to_top() {
        let mut app = test_app();
        assert_eq!(
            handle_key_event(key(KeyCode::Char('g')), &app),
            Action::PendingG
        );
        app.pending_key = Some('g');
        assert_eq!(
            handle_key_event(key(KeyCode::Char('g')), &app),
            Action::JumpToTop
        );
    }

    #[test]
    fn test_any_key_closes_help() {
        let mut app = test_app();
        app.show_help = true;
        assert_eq!(
            handle_key_event(key(KeyCode::Char('j')), &app),
            Action::ExitMode
        );
    }
}
