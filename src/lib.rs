//! # gridbot
//!
//! An engine-agnostic interpretation core for a grid robot game: a tiny
//! textual command language expands into primitive instructions (`s` step,
//! `l` turn left, `r` turn right) which a deterministic simulation replays
//! one instruction at a time.
//!
//! It decouples the *program* (macro language, recursively expanded into a
//! flat instruction string) from the *presentation* (rendering, pacing,
//! persistence), producing a lazy sequence of `GameState` snapshots that any
//! driver can consume, pause, or cancel between steps.

pub mod engine;
pub mod expand;
pub mod expr;
pub mod grid;
pub mod program;
pub mod robot;

pub use engine::*;
pub use expand::*;
pub use grid::*;
pub use program::*;
pub use robot::*;
