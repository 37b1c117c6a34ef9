use egui::Key;

use crate::model::cell::CellKey;
use crate::model::feedback::Vote;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridAction {
    Move(Direction),
    OpenDetail,
    Vote(Vote),
    Comment,
    CloseDetail,
}

pub fn key_action(key: Key) -> Option<GridAction> {
    let action = match key {
        Key::ArrowUp => GridAction::Move(Direction::Up),
        Key::ArrowDown => GridAction::Move(Direction::Down),
        Key::ArrowLeft => GridAction::Move(Direction::Left),
        Key::ArrowRight => GridAction::Move(Direction::Right),
        Key::Enter => GridAction::OpenDetail,
        Key::U => GridAction::Vote(Vote::Up),
        Key::D => GridAction::Vote(Vote::Down),
        Key::C => GridAction::Comment,
        Key::X => GridAction::CloseDetail,
        _ => return None,
    };
    Some(action)
}

pub const GRID_KEYS: [Key; 9] = [
    Key::ArrowUp,
    Key::ArrowDown,
    Key::ArrowLeft,
    Key::ArrowRight,
    Key::Enter,
    Key::U,
    Key::D,
    Key::C,
    Key::X,
];

/// Focus cursor over result cells, clamped to the current grid size.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FocusCursor {
    pub row: usize,
    pub prompt: usize,
}

impl FocusCursor {
    pub fn key(&self) -> CellKey {
        CellKey::new(self.row, self.prompt)
    }

    pub fn moved(self, direction: Direction, rows: usize, prompts: usize) -> Self {
        let (row, prompt) = match direction {
            Direction::Up => (self.row.saturating_sub(1), self.prompt),
            Direction::Down => (self.row + 1, self.prompt),
            Direction::Left => (self.row, self.prompt.saturating_sub(1)),
            Direction::Right => (self.row, self.prompt + 1),
        };

        Self { row, prompt }.clamped(rows, prompts)
    }

    /// Pulls the cursor back inside a grid that may have shrunk.
    pub fn clamped(self, rows: usize, prompts: usize) -> Self {
        Self {
            row: self.row.min(rows.saturating_sub(1)),
            prompt: self.prompt.min(prompts.saturating_sub(1)),
        }
    }
}
