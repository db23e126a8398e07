use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::games::GameKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub fn offset(&self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    pub fn opposite(&self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    pub fn is_horizontal(&self) -> bool {
        matches!(self, Direction::Left | Direction::Right)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Jump,
    Move(Direction),
    SelectCell(usize),
    SelectOption(usize),
}

pub fn translate(kind: GameKind, key: &KeyEvent) -> Option<Command> {
    if key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) {
        return None;
    }
    match kind {
        GameKind::Flyer => match key.code {
            KeyCode::Char(' ') | KeyCode::Up | KeyCode::Enter => Some(Command::Jump),
            _ => None,
        },
        GameKind::Snake => direction_of(key.code, true).map(Command::Move),
        GameKind::Puzzle => match direction_of(key.code, false) {
            Some(d) => Some(Command::Move(d)),
            None => letter_index(key.code).map(Command::SelectCell),
        },
        GameKind::Memory => letter_index(key.code).map(Command::SelectCell),
        GameKind::Quiz => match key.code {
            KeyCode::Char(c @ '1'..='9') => Some(Command::SelectOption(c as usize - '1' as usize)),
            KeyCode::Char(c @ 'a'..='d') => Some(Command::SelectOption(c as usize - 'a' as usize)),
            _ => None,
        },
    }
}

fn direction_of(code: KeyCode, wasd: bool) -> Option<Direction> {
    match code {
        KeyCode::Up => Some(Direction::Up),
        KeyCode::Down => Some(Direction::Down),
        KeyCode::Left => Some(Direction::Left),
        KeyCode::Right => Some(Direction::Right),
        KeyCode::Char('w') | KeyCode::Char('W') if wasd => Some(Direction::Up),
        KeyCode::Char('s') | KeyCode::Char('S') if wasd => Some(Direction::Down),
        KeyCode::Char('a') | KeyCode::Char('A') if wasd => Some(Direction::Left),
        KeyCode::Char('d') | KeyCode::Char('D') if wasd => Some(Direction::Right),
        _ => None,
    }
}

// Skips p, q and r.
pub const CELL_LETTERS: &str = "abcdefghijklmnostuvwxyz";

fn letter_index(code: KeyCode) -> Option<usize> {
    match code {
        KeyCode::Char(c) => CELL_LETTERS.find(c),
        _ => None,
    }
}

pub fn cell_label(index: usize) -> char {
    CELL_LETTERS.chars().nth(index).unwrap_or('?')
}
