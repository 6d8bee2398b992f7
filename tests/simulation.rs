// tests/simulation.rs
use glam::IVec2;
use gridbot::{Cell, Direction, GameState, Instr, SimConfig, Simulation};

fn run(level: &str, program: &str) -> Simulation {
    let state = GameState::from_level(level);
    Simulation::start(program, state, SimConfig::default()).expect("expansion should succeed")
}

#[test]
fn test_win_on_last_point() {
    // Robot at (0,1) facing up, the single point directly ahead.
    let mut sim = run("o\n@", "s");

    let snap = sim.next().expect("one instruction, one snapshot");
    assert_eq!(snap.robot.position, IVec2::new(0, 0));
    assert_eq!(snap.points_collected, snap.total_points);
    assert!(snap.won);
    assert!(snap.game_over);
    // The collected cell is emptied in place.
    assert_eq!(snap.grid.get(IVec2::new(0, 0)), Some(Cell::Empty));

    // Terminal: nothing is produced past the winning snapshot.
    assert!(sim.next().is_none());
}

#[test]
fn test_bomb_ends_the_run_on_the_bomb_cell() {
    let mut sim = run("*\n@", "s");

    let snap = sim.next().unwrap();
    assert!(snap.game_over);
    assert!(!snap.won);
    // The robot moves onto the bomb before the run ends.
    assert_eq!(snap.robot.position, IVec2::new(0, 0));
    assert!(snap.message.contains("bomb"));
    assert!(sim.next().is_none());
}

#[test]
fn test_wall_blocks_without_ending_the_run() {
    // Two step attempts into a wall: neither moves the robot, neither is
    // terminal, and the wall cell survives.
    let mut sim = run("#\n@", "ss");

    let first = sim.next().unwrap();
    assert_eq!(first.robot.position, IVec2::new(0, 1));
    assert!(!first.game_over);

    let second = sim.next().unwrap();
    assert_eq!(second.robot.position, IVec2::new(0, 1));
    assert!(!second.game_over);
    assert_eq!(second.grid.get(IVec2::new(0, 0)), Some(Cell::Wall));

    assert!(sim.next().is_none());
}

#[test]
fn test_leaving_the_grid_loses_without_moving() {
    // Robot on the top row facing up; stepping out is a loss, not a block.
    let mut sim = run("@", "s");

    let snap = sim.next().unwrap();
    assert!(snap.game_over);
    assert!(!snap.won);
    assert_eq!(snap.robot.position, IVec2::ZERO);
    assert!(snap.message.contains("edge"));
}

#[test]
fn test_step_cap_is_a_terminal_loss() {
    let state = GameState::from_level("@");
    let config = SimConfig {
        max_steps: 5,
        ..SimConfig::default()
    };
    // Eight turns against a budget of five: five applied snapshots, then
    // one final capped-out loss, then nothing.
    let sim = Simulation::start("llllllll", state, config).unwrap();
    let snapshots: Vec<GameState> = sim.collect();

    assert_eq!(snapshots.len(), 6);
    let last = snapshots.last().unwrap();
    assert!(last.game_over);
    assert!(!last.won);
    assert!(last.message.contains("5 steps"));
    // Exactly five turns were applied: Up rotated left five times is Left.
    assert_eq!(last.robot.direction, Direction::Left);
}

#[test]
fn test_exact_exhaustion_is_not_a_loss() {
    let state = GameState::from_level("@");
    let config = SimConfig {
        max_steps: 5,
        ..SimConfig::default()
    };
    // Five instructions against a budget of five end normally, still running.
    let sim = Simulation::start("lllll", state, config).unwrap();
    let snapshots: Vec<GameState> = sim.collect();

    assert_eq!(snapshots.len(), 5);
    assert!(!snapshots.last().unwrap().game_over);
}

#[test]
fn test_cancellation_leaves_a_consistent_snapshot() {
    // Stop consuming after two of six turns; the last delivered snapshot
    // reflects exactly the two applied instructions.
    let mut sim = run("@", "rrrrrr");

    let _ = sim.next().unwrap();
    let second = sim.next().unwrap();
    assert_eq!(second.robot.direction, Direction::Down);
    assert_eq!(second.robot.position, IVec2::ZERO);
    assert!(!second.game_over);

    // The producer itself agrees with the last delivered snapshot.
    assert_eq!(sim.state().robot.direction, Direction::Down);
}

#[test]
fn test_expansion_failure_falls_back_to_a_terminal_snapshot() {
    let state = GameState::from_level("o\n@");
    let err = Simulation::start("a:sa\na", state.clone(), SimConfig::default()).unwrap_err();

    // The driver surfaces the pre-run snapshot marked terminal, with the
    // error message attached; no simulation state was ever produced.
    let fallback = state.failed(err.to_string());
    assert!(fallback.game_over);
    assert!(!fallback.won);
    assert!(fallback.message.contains("recursion depth limit"));
    assert_eq!(fallback.points_collected, 0);
    assert_eq!(fallback.robot, fallback.initial_robot());
}

#[test]
fn test_empty_program_produces_nothing() {
    let mut sim = run("o\n@", "");
    assert!(sim.is_empty());
    assert!(sim.next().is_none());
    assert!(!sim.state().game_over);
}

#[test]
fn test_pre_expanded_instructions_replay_identically() {
    // A driver may hold an already-expanded instruction list and skip the
    // parse/expand phase entirely.
    let state = GameState::from_level("o\n@");
    let instructions = vec![Instr::Step];
    let mut sim = Simulation::from_instructions(state, instructions, SimConfig::default());

    assert_eq!(sim.len(), 1);
    let snap = sim.next().unwrap();
    assert!(snap.won);
    assert_eq!(snap.points_collected, 1);
}

#[test]
fn test_recursive_program_drives_the_robot() {
    // Three points in a row below the robot: turn around, then f(3) expands
    // to three steps that collect them all.
    let level = "@\no\no\no";
    let mut sim = run(level, "f(A):sf(A-1)\nrrf(3)");

    let last = sim.by_ref().last().unwrap();
    assert!(last.won);
    assert_eq!(last.points_collected, 3);
    assert_eq!(last.robot.position, IVec2::new(0, 3));
    assert!(sim.next().is_none());
}
