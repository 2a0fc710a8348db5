//! Key mapping from terminal events to game actions.

use crate::types::GameAction;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Map keyboard input to game actions.
///
/// Arrow keys plus vi (`hjkl`) and `wasd` aliases. Unknown keys map to `None`.
pub fn handle_key_event(key: KeyEvent) -> Option<GameAction> {
    if should_quit(key) {
        return Some(GameAction::Quit);
    }

    match key.code {
        // Movement
        KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('H') | KeyCode::Char('a') | KeyCode::Char('A') => {
            Some(GameAction::MoveLeft)
        }
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('L') | KeyCode::Char('d') | KeyCode::Char('D') => {
            Some(GameAction::MoveRight)
        }
        KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('J') | KeyCode::Char('s') | KeyCode::Char('S') => {
            Some(GameAction::SoftDrop)
        }

        // Rotation
        KeyCode::Up
        | KeyCode::Char('k')
        | KeyCode::Char('K')
        | KeyCode::Char('w')
        | KeyCode::Char('W') => Some(GameAction::Rotate),

        // Actions
        KeyCode::Char(' ') => Some(GameAction::HardDrop),
        KeyCode::Char('p') | KeyCode::Char('P') => Some(GameAction::Pause),

        _ => None,
    }
}

/// Map a key event, ignoring releases.
///
/// Auto-repeat counts as a fresh press so holding a key keeps moving the piece.
pub fn action_for_key(key: KeyEvent) -> Option<GameAction> {
    match key.kind {
        KeyEventKind::Press | KeyEventKind::Repeat => handle_key_event(key),
        KeyEventKind::Release => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyEventState, KeyModifiers};

    #[test]
    fn test_movement_keys() {
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Left)),
            Some(GameAction::MoveLeft)
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Right)),
            Some(GameAction::MoveRight)
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Down)),
            Some(GameAction::SoftDrop)
        );

        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Char('H'))),
            Some(GameAction::MoveLeft)
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Char('d'))),
            Some(GameAction::MoveRight)
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Char('J'))),
            Some(GameAction::SoftDrop)
        );
    }

    #[test]
    fn test_rotation_keys() {
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Up)),
            Some(GameAction::Rotate)
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Char('W'))),
            Some(GameAction::Rotate)
        );
        assert_eq!(handle_key_event(KeyEvent::from(KeyCode::Char('z'))), None);
    }

    #[test]
    fn test_action_keys() {
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Char(' '))),
            Some(GameAction::HardDrop)
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Char('P'))),
            Some(GameAction::Pause)
        );
        assert_eq!(handle_key_event(KeyEvent::from(KeyCode::Enter)), None);
    }

    #[test]
    fn test_quit_keys() {
        assert!(should_quit(KeyEvent::from(KeyCode::Char('q'))));
        assert!(should_quit(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL
        )));
        assert!(!should_quit(KeyEvent::from(KeyCode::Char('x'))));
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Char('Q'))),
            Some(GameAction::Quit)
        );
    }

    #[test]
    fn test_release_is_ignored() {
        let release = KeyEvent {
            code: KeyCode::Left,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        };
        assert_eq!(action_for_key(release), None);

        let repeat = KeyEvent { kind: KeyEventKind::Repeat, ..release };
        assert_eq!(action_for_key(repeat), Some(GameAction::MoveLeft));
    }
}
