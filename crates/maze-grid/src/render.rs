//! ASCII rendering of a grid for logs and examples.

use crate::grid::GridMap;
use maze_core::{Cell, Heading, Pose, MAX_DISTANCE};
use std::fmt::Write;

/// Render walls and distances, North at the top.
///
/// Each cell is three characters wide and shows its distance (blank
/// when unreached, `###` when it does not fit). When `pose` is given,
/// the vehicle's cell shows an arrow for its heading instead.
///
/// ```
/// use maze_core::{Cell, Heading, Pose};
/// use maze_grid::{render_ascii, GridMap};
///
/// let grid = GridMap::new(2).unwrap();
/// let text = render_ascii(&grid, Some(Pose::new(Cell::new(0, 0), Heading::North)));
/// assert_eq!(
///     text,
///     "+---+---+\n|       |\n+   +   +\n| ^     |\n+---+---+\n"
/// );
/// ```
pub fn render_ascii(grid: &GridMap, pose: Option<Pose>) -> String {
    let side = grid.side();
    let mut out = String::new();
    for y in (0..side).rev() {
        horizontal_line(&mut out, grid, y, Heading::North);
        for x in 0..side {
            let cell = Cell::new(x, y);
            let walls = grid.walls_of(cell);
            out.push(if walls.has(Heading::West) { '|' } else { ' ' });
            out.push_str(&cell_body(grid, cell, pose));
        }
        let last = grid.walls_of(Cell::new(side - 1, y));
        out.push(if last.has(Heading::East) { '|' } else { ' ' });
        out.push('\n');
    }
    horizontal_line(&mut out, grid, 0, Heading::South);
    out
}

fn horizontal_line(out: &mut String, grid: &GridMap, y: u32, side_of_row: Heading) {
    for x in 0..grid.side() {
        out.push('+');
        let walled = grid.walls_of(Cell::new(x, y)).has(side_of_row);
        out.push_str(if walled { "---" } else { "   " });
    }
    out.push_str("+\n");
}

fn cell_body(grid: &GridMap, cell: Cell, pose: Option<Pose>) -> String {
    if let Some(p) = pose.filter(|p| p.cell == cell) {
        let arrow = match p.heading {
            Heading::North => '^',
            Heading::East => '>',
            Heading::South => 'v',
            Heading::West => '<',
        };
        return format!(" {arrow} ");
    }
    let d = grid.distance_of(cell);
    let mut body = String::with_capacity(3);
    if d == MAX_DISTANCE {
        body.push_str("   ");
    } else if d > 999 {
        body.push_str("###");
    } else {
        let _ = write!(body, "{d:>3}");
    }
    body
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_internal_wall_and_distances() {
        let mut g = GridMap::new(2).unwrap();
        g.add_wall(Cell::new(0, 0), Heading::East);
        g.set_distance(Cell::new(0, 0), 3);
        g.set_distance(Cell::new(1, 0), 0);
        g.set_distance(Cell::new(0, 1), 2);
        g.set_distance(Cell::new(1, 1), 1);
        let text = render_ascii(&g, None);
        let expected = "\
+---+---+
|  2   1|
+   +   +
|  3|  0|
+---+---+
";
        assert_eq!(text, expected);
    }

    #[test]
    fn large_distances_are_masked() {
        let mut g = GridMap::new(1).unwrap();
        g.set_distance(Cell::new(0, 0), 1200);
        assert_eq!(render_ascii(&g, None), "+---+\n|###|\n+---+\n");
    }
}
