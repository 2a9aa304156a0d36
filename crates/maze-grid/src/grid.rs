//! Square grid of wall masks and distances with 4-connected neighbourhood.

use maze_core::{Cell, Distance, GridError, Heading, WallMask, MAX_DISTANCE};
use smallvec::SmallVec;

/// A square maze map of `side * side` cells.
///
/// Each cell holds a [`WallMask`] and a [`Distance`]. Cells are stored in
/// row-major order: index `y * side + x`. Neighbours are the four
/// cardinal cells; off-grid neighbours are omitted (there is no wrap).
///
/// The grid holds exactly one distance field, which is only meaningful
/// relative to the target most recently passed to a propagator.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GridMap {
    side: u32,
    walls: Vec<WallMask>,
    distances: Vec<Distance>,
}

impl GridMap {
    /// Largest supported side: keeps `side * side` below [`MAX_DISTANCE`].
    pub const MAX_SIDE: u32 = 255;

    /// Create a grid with every outer-boundary wall set and every
    /// distance at [`MAX_DISTANCE`].
    ///
    /// Returns `Err(GridError::EmptyGrid)` if `side` is 0, or
    /// `Err(GridError::SideTooLarge)` if it exceeds [`GridMap::MAX_SIDE`].
    ///
    /// # Examples
    ///
    /// ```
    /// use maze_core::{Cell, Heading};
    /// use maze_grid::GridMap;
    ///
    /// let grid = GridMap::new(4).unwrap();
    /// assert_eq!(grid.cell_count(), 16);
    ///
    /// // The corner starts with its two border walls.
    /// let corner = grid.walls_of(Cell::new(0, 0));
    /// assert!(corner.has(Heading::South));
    /// assert!(corner.has(Heading::West));
    /// assert!(!corner.has(Heading::North));
    /// ```
    pub fn new(side: u32) -> Result<Self, GridError> {
        if side == 0 {
            return Err(GridError::EmptyGrid);
        }
        if side > Self::MAX_SIDE {
            return Err(GridError::SideTooLarge {
                side,
                max: Self::MAX_SIDE,
            });
        }
        let count = (side as usize) * (side as usize);
        let mut grid = Self {
            side,
            walls: vec![WallMask::EMPTY; count],
            distances: vec![MAX_DISTANCE; count],
        };
        let last = side - 1;
        for i in 0..side {
            grid.merge(Cell::new(i, 0), WallMask::single(Heading::South));
            grid.merge(Cell::new(i, last), WallMask::single(Heading::North));
            grid.merge(Cell::new(0, i), WallMask::single(Heading::West));
            grid.merge(Cell::new(last, i), WallMask::single(Heading::East));
        }
        Ok(grid)
    }

    /// Side length.
    pub fn side(&self) -> u32 {
        self.side
    }

    /// Total number of cells.
    pub fn cell_count(&self) -> usize {
        self.walls.len()
    }

    /// Whether `cell` lies on the grid.
    pub fn contains(&self, cell: Cell) -> bool {
        cell.x < self.side && cell.y < self.side
    }

    /// Flat row-major index of `cell`, or `Err(GridError::CellOutOfBounds)`.
    pub fn try_index(&self, cell: Cell) -> Result<usize, GridError> {
        if self.contains(cell) {
            Ok(cell.y as usize * self.side as usize + cell.x as usize)
        } else {
            Err(GridError::CellOutOfBounds {
                cell,
                side: self.side,
            })
        }
    }

    /// Flat row-major index of `cell`.
    ///
    /// # Panics
    ///
    /// Panics if `cell` is off the grid. Positions stay in bounds by
    /// construction, so this is a programming error.
    pub fn index(&self, cell: Cell) -> usize {
        match self.try_index(cell) {
            Ok(i) => i,
            Err(e) => panic!("{e}"),
        }
    }

    /// Cell at a flat row-major index.
    pub fn cell_at(&self, index: usize) -> Cell {
        let side = self.side as usize;
        Cell::new((index % side) as u32, (index / side) as u32)
    }

    /// Iterate over all cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        (0..self.cell_count()).map(|i| self.cell_at(i))
    }

    /// Wall mask of `cell`. Panics if off the grid.
    pub fn walls_of(&self, cell: Cell) -> WallMask {
        self.walls[self.index(cell)]
    }

    /// Wall mask of `cell`, or `Err(GridError::CellOutOfBounds)`.
    pub fn try_walls_of(&self, cell: Cell) -> Result<WallMask, GridError> {
        Ok(self.walls[self.try_index(cell)?])
    }

    /// OR-merge `mask` into the walls of `cell`. Panics if off the grid.
    ///
    /// Only this cell is touched; use [`add_wall`](GridMap::add_wall) to
    /// keep the neighbour's reciprocal bit in step.
    pub fn set_walls(&mut self, cell: Cell, mask: WallMask) {
        self.merge(cell, mask);
    }

    /// Record a wall on the `heading` side of `cell`, and the reciprocal
    /// wall on the neighbour if one exists. Returns whether any bit was
    /// newly set.
    pub fn add_wall(&mut self, cell: Cell, heading: Heading) -> bool {
        let mut changed = self.merge(cell, WallMask::single(heading));
        if let Some(nb) = self.neighbour(cell, heading) {
            changed |= self.merge(nb, WallMask::single(heading.opposite()));
        }
        changed
    }

    /// Distance of `cell`. Panics if off the grid.
    pub fn distance_of(&self, cell: Cell) -> Distance {
        self.distances[self.index(cell)]
    }

    /// Overwrite the distance of `cell`. Panics if off the grid.
    pub fn set_distance(&mut self, cell: Cell, value: Distance) {
        let i = self.index(cell);
        self.distances[i] = value;
    }

    /// Overwrite every distance with `value`.
    pub fn fill_distances(&mut self, value: Distance) {
        self.distances.fill(value);
    }

    /// All wall masks in row-major order.
    pub fn walls(&self) -> &[WallMask] {
        &self.walls
    }

    /// All distances in row-major order.
    pub fn distances(&self) -> &[Distance] {
        &self.distances
    }

    /// Mutable distances in row-major order, for propagators.
    pub fn distances_mut(&mut self) -> &mut [Distance] {
        &mut self.distances
    }

    /// Total number of wall bits set across the grid.
    pub fn wall_bit_count(&self) -> u32 {
        self.walls.iter().map(|m| m.count()).sum()
    }

    /// The cell one step along `heading`, or `None` past the border.
    pub fn neighbour(&self, cell: Cell, heading: Heading) -> Option<Cell> {
        let (dx, dy) = heading.delta();
        let x = cell.x.checked_add_signed(dx)?;
        let y = cell.y.checked_add_signed(dy)?;
        let nb = Cell::new(x, y);
        self.contains(nb).then_some(nb)
    }

    /// Whether the vehicle may pass from `cell` toward `heading`: no known
    /// wall on that side and a neighbour exists.
    pub fn is_open(&self, cell: Cell, heading: Heading) -> bool {
        !self.walls_of(cell).has(heading) && self.neighbour(cell, heading).is_some()
    }

    /// Neighbours reachable from `cell` without crossing a known wall, in
    /// North, East, South, West order.
    pub fn open_neighbours(&self, cell: Cell) -> SmallVec<[(Heading, Cell); 4]> {
        let walls = self.walls_of(cell);
        Heading::ALL
            .into_iter()
            .filter(|h| !walls.has(*h))
            .filter_map(|h| self.neighbour(cell, h).map(|nb| (h, nb)))
            .collect()
    }

    /// Mark the artificial starting enclosure: South and West walls at
    /// `start`, with reciprocal bits on neighbours that exist.
    ///
    /// At the bottom-left corner this is a no-op because both sides are
    /// already border walls.
    pub fn mark_start_enclosure(&mut self, start: Cell) {
        self.add_wall(start, Heading::South);
        self.add_wall(start, Heading::West);
    }

    fn merge(&mut self, cell: Cell, mask: WallMask) -> bool {
        let i = self.index(cell);
        let before = self.walls[i];
        self.walls[i] = before | mask;
        self.walls[i] != before
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    // ── Constructor tests ───────────────────────────────────────

    #[test]
    fn new_zero_side_returns_error() {
        assert_eq!(GridMap::new(0), Err(GridError::EmptyGrid));
    }

    #[test]
    fn new_side_too_large_returns_error() {
        assert_eq!(
            GridMap::new(256),
            Err(GridError::SideTooLarge { side: 256, max: 255 })
        );
        assert!(GridMap::new(255).is_ok());
    }

    #[test]
    fn boundary_walls_are_set() {
        let g = GridMap::new(5).unwrap();
        for i in 0..5 {
            assert!(g.walls_of(Cell::new(i, 0)).has(Heading::South));
            assert!(g.walls_of(Cell::new(i, 4)).has(Heading::North));
            assert!(g.walls_of(Cell::new(0, i)).has(Heading::West));
            assert!(g.walls_of(Cell::new(4, i)).has(Heading::East));
        }
        assert!(g.walls_of(Cell::new(2, 2)).is_empty());
        // 4 sides * 5 cells each.
        assert_eq!(g.wall_bit_count(), 20);
    }

    #[test]
    fn single_cell_grid_is_fully_walled() {
        let g = GridMap::new(1).unwrap();
        assert_eq!(g.walls_of(Cell::new(0, 0)), WallMask::ALL);
        assert!(g.open_neighbours(Cell::new(0, 0)).is_empty());
    }

    #[test]
    fn distances_start_unreached() {
        let g = GridMap::new(3).unwrap();
        assert!(g.distances().iter().all(|&d| d == MAX_DISTANCE));
    }

    // ── Access tests ────────────────────────────────────────────

    #[test]
    fn index_is_row_major() {
        let g = GridMap::new(4).unwrap();
        assert_eq!(g.index(Cell::new(0, 0)), 0);
        assert_eq!(g.index(Cell::new(3, 0)), 3);
        assert_eq!(g.index(Cell::new(0, 1)), 4);
        assert_eq!(g.index(Cell::new(3, 3)), 15);
        assert_eq!(g.cell_at(6), Cell::new(2, 1));
    }

    #[test]
    fn try_index_rejects_out_of_bounds() {
        let g = GridMap::new(4).unwrap();
        assert_eq!(
            g.try_index(Cell::new(4, 0)),
            Err(GridError::CellOutOfBounds {
                cell: Cell::new(4, 0),
                side: 4
            })
        );
        assert!(g.try_walls_of(Cell::new(0, 9)).is_err());
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn walls_of_out_of_bounds_panics() {
        let g = GridMap::new(4).unwrap();
        g.walls_of(Cell::new(0, 4));
    }

    #[test]
    fn set_walls_or_merges() {
        let mut g = GridMap::new(4).unwrap();
        let c = Cell::new(1, 1);
        g.set_walls(c, WallMask::single(Heading::North));
        g.set_walls(c, WallMask::single(Heading::East));
        g.set_walls(c, WallMask::EMPTY);
        let m = g.walls_of(c);
        assert!(m.has(Heading::North));
        assert!(m.has(Heading::East));
        // set_walls touches only this cell.
        assert!(!g.walls_of(Cell::new(1, 2)).has(Heading::South));
    }

    #[test]
    fn add_wall_is_reciprocal() {
        let mut g = GridMap::new(4).unwrap();
        assert!(g.add_wall(Cell::new(1, 1), Heading::East));
        assert!(g.walls_of(Cell::new(1, 1)).has(Heading::East));
        assert!(g.walls_of(Cell::new(2, 1)).has(Heading::West));
        // Second time nothing changes.
        assert!(!g.add_wall(Cell::new(2, 1), Heading::West));
    }

    #[test]
    fn set_and_read_distance() {
        let mut g = GridMap::new(3).unwrap();
        g.set_distance(Cell::new(2, 1), 7);
        assert_eq!(g.distance_of(Cell::new(2, 1)), 7);
        g.fill_distances(0);
        assert_eq!(g.distance_of(Cell::new(2, 1)), 0);
    }

    // ── Neighbour tests ─────────────────────────────────────────

    #[test]
    fn neighbour_directions() {
        let g = GridMap::new(5).unwrap();
        let c = Cell::new(2, 2);
        assert_eq!(g.neighbour(c, Heading::North), Some(Cell::new(2, 3)));
        assert_eq!(g.neighbour(c, Heading::East), Some(Cell::new(3, 2)));
        assert_eq!(g.neighbour(c, Heading::South), Some(Cell::new(2, 1)));
        assert_eq!(g.neighbour(c, Heading::West), Some(Cell::new(1, 2)));
    }

    #[test]
    fn neighbour_off_grid_is_none() {
        let g = GridMap::new(5).unwrap();
        assert_eq!(g.neighbour(Cell::new(0, 0), Heading::South), None);
        assert_eq!(g.neighbour(Cell::new(0, 0), Heading::West), None);
        assert_eq!(g.neighbour(Cell::new(4, 4), Heading::North), None);
        assert_eq!(g.neighbour(Cell::new(4, 4), Heading::East), None);
    }

    #[test]
    fn open_neighbours_corner_and_interior() {
        let mut g = GridMap::new(5).unwrap();
        let corner = g.open_neighbours(Cell::new(0, 0));
        assert_eq!(corner.len(), 2);
        assert!(corner.contains(&(Heading::North, Cell::new(0, 1))));
        assert!(corner.contains(&(Heading::East, Cell::new(1, 0))));

        g.add_wall(Cell::new(2, 2), Heading::West);
        let interior = g.open_neighbours(Cell::new(2, 2));
        assert_eq!(interior.len(), 3);
        assert!(!g.is_open(Cell::new(2, 2), Heading::West));
        assert!(!g.is_open(Cell::new(1, 2), Heading::East));
    }

    #[test]
    fn start_enclosure_away_from_corner_is_reciprocal() {
        let mut g = GridMap::new(5).unwrap();
        let start = Cell::new(2, 2);
        g.mark_start_enclosure(start);
        assert!(g.walls_of(start).has(Heading::South));
        assert!(g.walls_of(start).has(Heading::West));
        assert!(g.walls_of(Cell::new(2, 1)).has(Heading::North));
        assert!(g.walls_of(Cell::new(1, 2)).has(Heading::East));
    }

    #[test]
    fn start_enclosure_at_corner_changes_nothing() {
        let mut g = GridMap::new(5).unwrap();
        let before = g.clone();
        g.mark_start_enclosure(Cell::new(0, 0));
        assert_eq!(g, before);
    }

    // ── Property tests ──────────────────────────────────────────

    proptest! {
        #[test]
        fn neighbours_symmetric(side in 1u32..12, x in 0u32..12, y in 0u32..12) {
            let g = GridMap::new(side).unwrap();
            let c = Cell::new(x % side, y % side);
            for h in Heading::ALL {
                if let Some(nb) = g.neighbour(c, h) {
                    prop_assert_eq!(g.neighbour(nb, h.opposite()), Some(c));
                }
            }
        }

        #[test]
        fn add_wall_never_clears(
            side in 2u32..8,
            ops in proptest::collection::vec((0u32..8, 0u32..8, 0u8..4), 0..40),
        ) {
            let mut g = GridMap::new(side).unwrap();
            for (x, y, h) in ops {
                let before = g.walls().to_vec();
                g.add_wall(Cell::new(x % side, y % side), Heading::from_index(h));
                for (old, new) in before.iter().zip(g.walls()) {
                    prop_assert!(new.contains(*old));
                }
            }
        }
    }
}
