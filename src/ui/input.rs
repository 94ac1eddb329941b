/// Keyboard input: drains crossterm events each frame and maps fresh key
/// presses to game commands.
///
/// Every press is one discrete command. Movement is deliberately not
/// continuous: each step has to be heard before the next one.

use std::time::Duration;

use crossterm::event::{self, poll, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::domain::grid::Direction;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Command {
    Move(Direction),
    ToggleDebug,
    NewMaze,
    Confirm,
    Quit,
}

// ── Key Constants ──

const KEYS_UP: &[KeyCode] = &[KeyCode::Up, KeyCode::Char('w'), KeyCode::Char('W')];
const KEYS_DOWN: &[KeyCode] = &[KeyCode::Down, KeyCode::Char('s'), KeyCode::Char('S')];
const KEYS_LEFT: &[KeyCode] = &[KeyCode::Left, KeyCode::Char('a'), KeyCode::Char('A')];
const KEYS_RIGHT: &[KeyCode] = &[KeyCode::Right, KeyCode::Char('d'), KeyCode::Char('D')];
const KEYS_NEW_MAZE: &[KeyCode] = &[KeyCode::Char('r'), KeyCode::Char('R')];
const KEYS_CONFIRM: &[KeyCode] = &[KeyCode::Enter, KeyCode::Char(' ')];
const KEYS_QUIT: &[KeyCode] = &[KeyCode::Esc, KeyCode::Char('q'), KeyCode::Char('Q')];

/// Map one key event to a command. Releases map to nothing.
pub fn command_for(key: &KeyEvent) -> Option<Command> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL)
        && matches!(key.code, KeyCode::Char('c') | KeyCode::Char('C'))
    {
        return Some(Command::Quit);
    }

    let code = key.code;
    let cmd = if KEYS_UP.contains(&code) {
        Command::Move(Direction::North)
    } else if KEYS_DOWN.contains(&code) {
        Command::Move(Direction::South)
    } else if KEYS_LEFT.contains(&code) {
        Command::Move(Direction::West)
    } else if KEYS_RIGHT.contains(&code) {
        Command::Move(Direction::East)
    } else if code == KeyCode::F(2) {
        Command::ToggleDebug
    } else if KEYS_NEW_MAZE.contains(&code) {
        Command::NewMaze
    } else if KEYS_CONFIRM.contains(&code) {
        Command::Confirm
    } else if KEYS_QUIT.contains(&code) {
        Command::Quit
    } else {
        return None;
    };
    Some(cmd)
}

pub struct InputState {
    /// Commands collected during the most recent `drain_events()`.
    commands: Vec<Command>,
}

impl InputState {
    pub fn new() -> Self {
        InputState { commands: Vec::with_capacity(8) }
    }

    /// Drain all pending terminal events without blocking.
    /// Call this once per frame.
    pub fn drain_events(&mut self) {
        self.commands.clear();
        while poll(Duration::ZERO).unwrap_or(false) {
            if let Ok(Event::Key(key)) = event::read() {
                if let Some(cmd) = command_for(&key) {
                    self.commands.push(cmd);
                }
            }
        }
    }

    /// Commands in arrival order.
    pub fn commands(&self) -> &[Command] {
        &self.commands
    }
}

impl Default for InputState {
    fn default() -> Self {
        InputState::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn arrows_and_wasd_move() {
        assert_eq!(command_for(&press(KeyCode::Up)), Some(Command::Move(Direction::North)));
        assert_eq!(command_for(&press(KeyCode::Char('s'))), Some(Command::Move(Direction::South)));
        assert_eq!(command_for(&press(KeyCode::Char('A'))), Some(Command::Move(Direction::West)));
        assert_eq!(command_for(&press(KeyCode::Right)), Some(Command::Move(Direction::East)));
    }

    #[test]
    fn meta_keys() {
        assert_eq!(command_for(&press(KeyCode::F(2))), Some(Command::ToggleDebug));
        assert_eq!(command_for(&press(KeyCode::Char('r'))), Some(Command::NewMaze));
        assert_eq!(command_for(&press(KeyCode::Enter)), Some(Command::Confirm));
        assert_eq!(command_for(&press(KeyCode::Esc)), Some(Command::Quit));
        assert_eq!(command_for(&press(KeyCode::Char('x'))), None);
    }

    #[test]
    fn ctrl_c_quits() {
        let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(command_for(&key), Some(Command::Quit));
    }

    #[test]
    fn releases_are_ignored() {
        let mut key = press(KeyCode::Up);
        key.kind = KeyEventKind::Release;
        assert_eq!(command_for(&key), None);
    }
}
