// tests/level.rs
use glam::IVec2;
use gridbot::{Cell, Direction, GRID_SIZE, Grid};

#[test]
fn test_normalization_is_idempotent() {
    // Same text, same matrix, whatever the input shape.
    let long_row = "#".repeat(40);
    let exact = vec!["o".repeat(25); 25].join("\n");
    let oversized = vec!["*".repeat(40); 40].join("\n");
    let inputs: [&str; 5] = [
        "",      // empty
        "o\n@",  // shorter than 25 both ways
        &long_row, &exact, &oversized,
    ];
    for level in inputs {
        let (a, start_a) = Grid::from_level(level);
        let (b, start_b) = Grid::from_level(level);
        assert_eq!(a, b);
        assert_eq!(start_a, start_b);
    }
}

#[test]
fn test_grid_is_always_25_by_25() {
    let (grid, _) = Grid::from_level("o");
    // Inside the fixed dimension every cell exists, padded with Empty.
    assert_eq!(grid.get(IVec2::new(0, 0)), Some(Cell::Point));
    assert_eq!(grid.get(IVec2::new(24, 24)), Some(Cell::Empty));
    // One past the edge does not.
    assert_eq!(grid.get(IVec2::new(25, 0)), None);
    assert_eq!(grid.get(IVec2::new(0, 25)), None);
    assert_eq!(grid.get(IVec2::new(-1, 0)), None);

    // Over-long input is truncated to the same dimension.
    let big = vec!["o".repeat(40); 40].join("\n");
    let (grid, _) = Grid::from_level(&big);
    assert_eq!(grid.count(Cell::Point), GRID_SIZE * GRID_SIZE);
}

#[test]
fn test_robot_marker_is_consumed() {
    let (grid, start) = Grid::from_level("  \n @");
    assert_eq!(start, IVec2::new(1, 1));
    // The marker cell stores as empty; it is never part of the grid.
    assert_eq!(grid.get(start), Some(Cell::Empty));
}

#[test]
fn test_missing_marker_defaults_to_origin() {
    let (_, start) = Grid::from_level("ooo");
    assert_eq!(start, IVec2::ZERO);
}

#[test]
fn test_unknown_characters_normalize_to_empty() {
    let (grid, _) = Grid::from_level("?zq");
    assert_eq!(grid.get(IVec2::new(0, 0)), Some(Cell::Empty));
    assert_eq!(grid.get(IVec2::new(2, 0)), Some(Cell::Empty));
}

#[test]
fn test_direction_cycle_closure() {
    for d in [
        Direction::Up,
        Direction::Right,
        Direction::Down,
        Direction::Left,
    ] {
        // Right then left cancels out.
        assert_eq!(d.turned_right().turned_left(), d);
        // Four of either turn is a full revolution.
        assert_eq!(
            d.turned_left().turned_left().turned_left().turned_left(),
            d
        );
        assert_eq!(
            d.turned_right().turned_right().turned_right().turned_right(),
            d
        );
    }
}

#[test]
fn test_direction_offsets() {
    // Row 0 is the top of the grid, so Up decreases y.
    assert_eq!(Direction::Up.offset(), IVec2::new(0, -1));
    assert_eq!(Direction::Right.offset(), IVec2::new(1, 0));
    assert_eq!(Direction::Down.offset(), IVec2::new(0, 1));
    assert_eq!(Direction::Left.offset(), IVec2::new(-1, 0));
}
