//! Proptest strategies for grids, poses and readings.

use maze_core::{Cell, Heading, Pose};
use maze_grid::GridMap;
use proptest::prelude::*;

/// Any heading.
pub fn arb_heading() -> impl Strategy<Value = Heading> {
    (0u8..4).prop_map(Heading::from_index)
}

/// A grid of side `1..=max_side` with an arbitrary set of reciprocal
/// walls added through [`GridMap::add_wall`]. Distances are unset.
pub fn arb_walled_grid(max_side: u32) -> impl Strategy<Value = GridMap> {
    (1..=max_side).prop_flat_map(|side| {
        let max_walls = (side * side * 2) as usize;
        proptest::collection::vec((0..side, 0..side, arb_heading()), 0..=max_walls).prop_map(
            move |walls| {
                let mut grid = GridMap::new(side).expect("side within 1..=MAX_SIDE");
                for (x, y, heading) in walls {
                    grid.add_wall(Cell::new(x, y), heading);
                }
                grid
            },
        )
    })
}

/// A walled grid together with a cell on it.
pub fn arb_grid_and_cell(max_side: u32) -> impl Strategy<Value = (GridMap, Cell)> {
    arb_walled_grid(max_side).prop_flat_map(|grid| {
        let side = grid.side();
        (Just(grid), (0..side, 0..side).prop_map(|(x, y)| Cell::new(x, y)))
    })
}

/// A pose on a grid of the given side.
pub fn arb_pose(side: u32) -> impl Strategy<Value = Pose> {
    (0..side, 0..side, arb_heading()).prop_map(|(x, y, h)| Pose::new(Cell::new(x, y), h))
}

/// A range reading: mostly plausible distances, sometimes an anomaly.
pub fn arb_reading_cm() -> impl Strategy<Value = f32> {
    prop_oneof![
        8 => 0.0f32..60.0,
        1 => Just(f32::NAN),
        1 => -20.0f32..0.0,
        1 => Just(f32::INFINITY),
    ]
}
