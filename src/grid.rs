//! Cell kinds and the fixed-size level grid.
//!
//! Level text is a newline-separated block of single-character cell codes.
//! [`Grid::from_level`] normalizes any input to a [`GRID_SIZE`]×[`GRID_SIZE`]
//! matrix by right/bottom padding with empty cells (or truncation), records
//! the robot-start marker and rewrites it as empty.

use glam::IVec2;
use serde::{Deserialize, Serialize};

/// Side length of every grid. Levels are normalized to this dimension.
pub const GRID_SIZE: usize = 25;

/// What a single grid cell contains.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cell {
    /// Nothing. The robot may move here freely.
    #[default]
    Empty,
    /// Non-destructible wall. Blocks a single step attempt without ending
    /// the run; the cell itself is never consumed.
    Wall,
    /// Ends the run as a loss when the robot steps onto it.
    Bomb,
    /// Collectible. Stepping onto it empties the cell and scores one point.
    Point,
}

impl Cell {
    /// The level-text character set. Unknown characters normalize to
    /// [`Cell::Empty`]; the robot-start marker `@` is handled by
    /// [`Grid::from_level`] and also stores as empty.
    pub fn from_char(c: char) -> Self {
        match c {
            '#' => Cell::Wall,
            '*' => Cell::Bomb,
            'o' => Cell::Point,
            _ => Cell::Empty,
        }
    }

    /// Inverse of [`from_char`](Self::from_char), for loaders and renderers
    /// that want to share one symbol table.
    pub fn as_char(self) -> char {
        match self {
            Cell::Empty => ' ',
            Cell::Wall => '#',
            Cell::Bomb => '*',
            Cell::Point => 'o',
        }
    }
}

/// A row-major [`GRID_SIZE`]×[`GRID_SIZE`] matrix of cells.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    cells: Vec<Cell>,
}

impl Default for Grid {
    fn default() -> Self {
        Self {
            cells: vec![Cell::Empty; GRID_SIZE * GRID_SIZE],
        }
    }
}

impl Grid {
    /// Parses level text into a normalized grid plus the robot's start cell.
    ///
    /// Each row is parsed independently: characters map through
    /// [`Cell::from_char`], the `@` marker records its coordinates and is
    /// rewritten as empty (if several appear, the last one wins). Rows longer
    /// than [`GRID_SIZE`] are truncated, shorter ones padded with empty
    /// cells; the same applies to the row count.
    ///
    /// A level without a marker yields the grid origin `(0, 0)` as the start
    /// position rather than an error.
    pub fn from_level(level: &str) -> (Self, IVec2) {
        let mut grid = Grid::default();
        let mut start = IVec2::ZERO;

        for (y, line) in level.lines().take(GRID_SIZE).enumerate() {
            for (x, c) in line.chars().take(GRID_SIZE).enumerate() {
                if c == '@' {
                    start = IVec2::new(x as i32, y as i32);
                }
                grid.cells[y * GRID_SIZE + x] = Cell::from_char(c);
            }
        }

        (grid, start)
    }

    /// Returns the cell at `pos`, or `None` when `pos` lies outside the grid.
    pub fn get(&self, pos: IVec2) -> Option<Cell> {
        let (x, y) = (pos.x, pos.y);
        if x < 0 || y < 0 || x >= GRID_SIZE as i32 || y >= GRID_SIZE as i32 {
            return None;
        }
        Some(self.cells[y as usize * GRID_SIZE + x as usize])
    }

    /// Overwrites the cell at `pos`. Out-of-bounds positions are ignored.
    pub fn set(&mut self, pos: IVec2, cell: Cell) {
        let (x, y) = (pos.x, pos.y);
        if x >= 0 && y >= 0 && x < GRID_SIZE as i32 && y < GRID_SIZE as i32 {
            self.cells[y as usize * GRID_SIZE + x as usize] = cell;
        }
    }

    /// Counts the cells of the given kind, e.g. the level's total points.
    pub fn count(&self, kind: Cell) -> usize {
        self.cells.iter().filter(|&&c| c == kind).count()
    }
}
