//! Breadth-first reference distances.

use maze_core::{Cell, Distance, MAX_DISTANCE};
use maze_grid::GridMap;
use std::collections::VecDeque;

/// Unit-weight BFS distance from every cell to `target` through known
/// open passages, indexed row-major like [`GridMap::distances`].
///
/// Unreachable cells get [`MAX_DISTANCE`]. Used as the oracle for
/// propagator property tests.
pub fn reference_bfs(grid: &GridMap, target: Cell) -> Vec<Distance> {
    let mut dist = vec![MAX_DISTANCE; grid.cell_count()];
    dist[grid.index(target)] = 0;
    let mut queue = VecDeque::from([target]);
    while let Some(cell) = queue.pop_front() {
        let next = dist[grid.index(cell)] + 1;
        for (_, nb) in grid.open_neighbours(cell) {
            let slot = &mut dist[grid.index(nb)];
            if *slot == MAX_DISTANCE {
                *slot = next;
                queue.push_back(nb);
            }
        }
    }
    dist
}

#[cfg(test)]
mod tests {
    use super::*;
    use maze_core::Heading;

    #[test]
    fn open_grid_is_manhattan() {
        let g = GridMap::new(4).unwrap();
        let d = reference_bfs(&g, Cell::new(0, 0));
        assert_eq!(d[g.index(Cell::new(3, 3))], 6);
    }

    #[test]
    fn isolated_cell_is_unreached() {
        let mut g = GridMap::new(3).unwrap();
        for h in Heading::ALL {
            g.add_wall(Cell::new(2, 2), h);
        }
        let d = reference_bfs(&g, Cell::new(0, 0));
        assert_eq!(d[g.index(Cell::new(2, 2))], MAX_DISTANCE);
    }
}
