//! Robot state and the primitive instruction set.

use glam::IVec2;
use serde::{Deserialize, Serialize};

/// A cardinal facing direction, cyclic in the order up → right → down → left.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    #[default]
    Up,
    Right,
    Down,
    Left,
}

impl Direction {
    /// One step against the cycle: up → left → down → right → up.
    pub fn turned_left(self) -> Self {
        match self {
            Direction::Up => Direction::Left,
            Direction::Left => Direction::Down,
            Direction::Down => Direction::Right,
            Direction::Right => Direction::Up,
        }
    }

    /// One step along the cycle: up → right → down → left → up.
    pub fn turned_right(self) -> Self {
        match self {
            Direction::Up => Direction::Right,
            Direction::Right => Direction::Down,
            Direction::Down => Direction::Left,
            Direction::Left => Direction::Up,
        }
    }

    /// The grid offset of one step in this direction. Row 0 is the top of
    /// the grid, so up is negative `y`.
    pub fn offset(self) -> IVec2 {
        match self {
            Direction::Up => IVec2::new(0, -1),
            Direction::Right => IVec2::new(1, 0),
            Direction::Down => IVec2::new(0, 1),
            Direction::Left => IVec2::new(-1, 0),
        }
    }
}

/// The state of the grid robot: where it is and where it faces.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Robot {
    /// Current cell, as `(column, row)`.
    pub position: IVec2,
    /// Current facing direction.
    pub direction: Direction,
}

impl Robot {
    /// A robot standing on `position`, facing up.
    pub fn new(position: IVec2) -> Self {
        Self {
            position,
            direction: Direction::Up,
        }
    }

    /// The cell one step ahead of the robot. May lie outside the grid.
    pub fn cell_ahead(&self) -> IVec2 {
        self.position + self.direction.offset()
    }
}

/// A primitive robot instruction, one per character of an expanded program.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Instr {
    /// Move one cell in the facing direction (`s`).
    Step,
    /// Rotate one step against the direction cycle (`l`).
    TurnLeft,
    /// Rotate one step along the direction cycle (`r`).
    TurnRight,
}

impl Instr {
    /// Maps an expanded-program character to its instruction.
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            's' => Some(Instr::Step),
            'l' => Some(Instr::TurnLeft),
            'r' => Some(Instr::TurnRight),
            _ => None,
        }
    }
}
