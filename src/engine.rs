//! The deterministic simulation engine.
//!
//! [`Simulation::start`] parses and expands program source, then replays the
//! flat primitive-instruction stream against a [`GameState`], one instruction
//! per [`Iterator::next`] call. Each call yields a fully self-consistent
//! snapshot, so the external driver owns pacing and cancellation entirely:
//! dropping the iterator between two snapshots is always safe and needs no
//! rollback. A fresh `Simulation` owns its state outright, so a reset run
//! can never interfere with stale snapshots a previous driver still holds.

use crate::expand::{ExpandError, Expander};
use crate::grid::{Cell, Grid};
use crate::program::Program;
use crate::robot::{Instr, Robot};
use serde::{Deserialize, Serialize};

/// Resource limits for one run.
#[derive(Clone, Copy, Debug)]
pub struct SimConfig {
    /// Maximum primitive instructions consumed before the run is declared
    /// lost. Default: 10 000.
    pub max_steps: usize,
    /// Maximum macro-expansion recursion depth. Default: 1000.
    pub max_depth: usize,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            max_steps: 10_000,
            max_depth: crate::expand::DEFAULT_MAX_DEPTH,
        }
    }
}

/// The full state of one run: grid, robot, score and outcome flags.
///
/// Once `game_over` is set no further mutation occurs; `won` implies
/// `game_over`; `points_collected` never decreases and never exceeds
/// `total_points`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GameState {
    /// The level grid, mutated in place as points are collected.
    pub grid: Grid,
    /// Current robot position and facing.
    pub robot: Robot,
    /// Points collected so far this run.
    pub points_collected: usize,
    /// Points present in the level at initialization.
    pub total_points: usize,
    /// Terminal flag. Set on win, loss, or an attached interpreter failure.
    pub game_over: bool,
    /// Whether the run ended with every point collected.
    pub won: bool,
    /// Human-readable outcome message for the presentation layer.
    pub message: String,
    initial_robot: Robot,
}

impl GameState {
    /// Builds the initial state for a level: normalized grid, robot at the
    /// parsed start marker facing up, nothing collected.
    pub fn from_level(level: &str) -> Self {
        let (grid, start) = Grid::from_level(level);
        let robot = Robot::new(start);
        let total_points = grid.count(Cell::Point);
        Self {
            grid,
            robot,
            points_collected: 0,
            total_points,
            game_over: false,
            won: false,
            message: String::new(),
            initial_robot: robot,
        }
    }

    /// The robot as it stood when the state was created. Immutable snapshot
    /// kept for resets.
    pub fn initial_robot(&self) -> Robot {
        self.initial_robot
    }

    /// Marks the state terminal with `message` attached, without running
    /// anything. This is the driver's fallback when expansion fails: the
    /// pre-run snapshot is surfaced as a failure state instead of silently
    /// truncated output.
    pub fn failed(mut self, message: impl Into<String>) -> Self {
        self.game_over = true;
        self.won = false;
        self.message = message.into();
        self
    }

    fn lose(&mut self, message: String) {
        self.game_over = true;
        self.message = message;
    }

    /// Applies one primitive instruction. No-op once terminal.
    fn apply(&mut self, instr: Instr) {
        if self.game_over {
            return;
        }
        match instr {
            Instr::TurnLeft => self.robot.direction = self.robot.direction.turned_left(),
            Instr::TurnRight => self.robot.direction = self.robot.direction.turned_right(),
            Instr::Step => self.step(),
        }
    }

    fn step(&mut self) {
        let target = self.robot.cell_ahead();
        match self.grid.get(target) {
            None => {
                // Leaving the grid loses without moving.
                self.lose("Crashed into the edge of the grid!".to_string());
            }
            Some(Cell::Wall) => {
                // A wall blocks this one step; the run continues.
            }
            Some(Cell::Bomb) => {
                self.robot.position = target;
                self.lose("Boom! The robot hit a bomb.".to_string());
            }
            Some(Cell::Point) => {
                self.robot.position = target;
                self.grid.set(target, Cell::Empty);
                self.points_collected += 1;
                if self.points_collected == self.total_points {
                    self.won = true;
                    self.game_over = true;
                    self.message = "All points collected, you win!".to_string();
                }
            }
            Some(Cell::Empty) => {
                self.robot.position = target;
            }
        }
    }

    fn exhaust_steps(&mut self, max_steps: usize) {
        self.lose(format!(
            "Stopped after {max_steps} steps without finishing."
        ));
    }
}

/// A lazily-produced, resumable run of one program against one state.
///
/// Each [`next`](Iterator::next) applies exactly one primitive instruction
/// and yields the resulting snapshot. After a terminal snapshot has been
/// yielded, or when the instruction stream is exhausted, the sequence ends.
#[derive(Debug)]
pub struct Simulation {
    state: GameState,
    instructions: Vec<Instr>,
    cursor: usize,
    max_steps: usize,
}

impl Simulation {
    /// Parses `source`, expands it, and prepares a run over `state`.
    ///
    /// The function table is rebuilt from source on every start. An
    /// expansion failure aborts before any simulation state is produced;
    /// the driver should surface it via [`GameState::failed`].
    pub fn start(source: &str, state: GameState, config: SimConfig) -> Result<Self, ExpandError> {
        let program = Program::parse(source);
        let flat = Expander::new(&program.functions)
            .with_max_depth(config.max_depth)
            .expand(&program.main)?;
        Ok(Self {
            state,
            instructions: flat.chars().filter_map(Instr::from_char).collect(),
            cursor: 0,
            max_steps: config.max_steps,
        })
    }

    /// Prepares a run over an already-expanded instruction list.
    pub fn from_instructions(state: GameState, instructions: Vec<Instr>, config: SimConfig) -> Self {
        Self {
            state,
            instructions,
            cursor: 0,
            max_steps: config.max_steps,
        }
    }

    /// The latest snapshot: the pre-run state before the first `next`,
    /// otherwise the state after the last applied instruction.
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Total primitive instructions in the expanded program.
    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    /// Whether the expanded program contains no instructions at all.
    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }
}

impl Iterator for Simulation {
    type Item = GameState;

    fn next(&mut self) -> Option<GameState> {
        if self.state.game_over {
            return None;
        }
        // Normal exhaustion of the stream just ends production with
        // whatever state holds; it is not an outcome of its own.
        if self.cursor >= self.instructions.len() {
            return None;
        }
        if self.cursor >= self.max_steps {
            // Instructions remain but the budget is spent: a loss in its
            // own right, distinct from running out of instructions.
            self.state.exhaust_steps(self.max_steps);
            return Some(self.state.clone());
        }
        let instr = self.instructions[self.cursor];
        self.cursor += 1;
        self.state.apply(instr);
        Some(self.state.clone())
    }
}
