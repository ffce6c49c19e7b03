//! Key mapping from terminal events to engine commands.

use crate::types::Command;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Front-end controls that never reach the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    /// Stop or resume the tick scheduler
    Pause,
    /// Throw the current game away and start a new one
    Restart,
}

/// Map a key code to an engine command.
///
/// Arrows, WASD and hjkl all work; up/w/k rotate and space is a soft drop.
pub fn map_code(code: KeyCode) -> Option<Command> {
    match code {
        KeyCode::Left | KeyCode::Char('h' | 'H' | 'a' | 'A') => Some(Command::MoveLeft),
        KeyCode::Right | KeyCode::Char('l' | 'L' | 'd' | 'D') => Some(Command::MoveRight),
        KeyCode::Down | KeyCode::Char('j' | 'J' | 's' | 'S' | ' ') => Some(Command::SoftDrop),
        KeyCode::Up | KeyCode::Char('k' | 'K' | 'w' | 'W') => Some(Command::Rotate),
        _ => None,
    }
}

/// Map keyboard input to an engine command.
pub fn map_key(key: KeyEvent) -> Option<Command> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return None;
    }
    map_code(key.code)
}

/// Map keyboard input to a front-end control.
pub fn map_control(key: KeyEvent) -> Option<Control> {
    match key.code {
        KeyCode::Char('p' | 'P') => Some(Control::Pause),
        KeyCode::Char('r' | 'R') => Some(Control::Restart),
        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q' | 'Q') | KeyCode::Esc)
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_movement_keys() {
        assert_eq!(map_key(KeyEvent::from(KeyCode::Left)), Some(Command::MoveLeft));
        assert_eq!(map_key(KeyEvent::from(KeyCode::Right)), Some(Command::MoveRight));
        assert_eq!(map_key(KeyEvent::from(KeyCode::Down)), Some(Command::SoftDrop));

        assert_eq!(map_key(KeyEvent::from(KeyCode::Char('A'))), Some(Command::MoveLeft));
        assert_eq!(map_key(KeyEvent::from(KeyCode::Char('l'))), Some(Command::MoveRight));
        assert_eq!(map_key(KeyEvent::from(KeyCode::Char(' '))), Some(Command::SoftDrop));
    }

    #[test]
    fn test_rotation_keys() {
        assert_eq!(map_key(KeyEvent::from(KeyCode::Up)), Some(Command::Rotate));
        assert_eq!(map_key(KeyEvent::from(KeyCode::Char('w'))), Some(Command::Rotate));
        assert_eq!(map_key(KeyEvent::from(KeyCode::Char('K'))), Some(Command::Rotate));
    }

    #[test]
    fn test_control_keys() {
        assert_eq!(map_control(KeyEvent::from(KeyCode::Char('p'))), Some(Control::Pause));
        assert_eq!(map_control(KeyEvent::from(KeyCode::Char('R'))), Some(Control::Restart));
        assert_eq!(map_control(KeyEvent::from(KeyCode::Left)), None);
        assert_eq!(map_key(KeyEvent::from(KeyCode::Char('p'))), None);
    }

    #[test]
    fn test_quit_keys() {
        assert!(should_quit(KeyEvent::from(KeyCode::Char('q'))));
        assert!(should_quit(KeyEvent::from(KeyCode::Esc)));
        assert!(should_quit(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL
        )));
        assert!(!should_quit(KeyEvent::from(KeyCode::Char('x'))));
        // Ctrl-C is not a command either
        assert_eq!(
            map_key(KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL)),
            None
        );
    }
}
