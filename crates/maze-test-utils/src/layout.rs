//! Ground-truth maze layouts.
//!
//! A [`MazeLayout`] holds the real walls of a maze. The simulated vehicle
//! senses against it; the engine under test never sees it directly.

use maze_core::{Cell, GridError, Heading, WallMask};
use maze_grid::GridMap;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// True wall layout of a square maze.
///
/// Backed by a [`GridMap`] whose distance field is unused. Walls are always
/// reciprocal because they are only ever added through
/// [`GridMap::add_wall`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MazeLayout {
    grid: GridMap,
}

impl MazeLayout {
    /// A maze with border walls only.
    pub fn open(side: u32) -> Result<Self, GridError> {
        Ok(Self {
            grid: GridMap::new(side)?,
        })
    }

    /// Add a wall on `heading` of `cell` (and its reciprocal).
    ///
    /// Panics if `cell` is off the grid.
    pub fn with_wall(mut self, cell: Cell, heading: Heading) -> Self {
        self.grid.add_wall(cell, heading);
        self
    }

    /// Wall off `cell` on every side.
    pub fn with_walled_cell(mut self, cell: Cell) -> Self {
        for heading in Heading::ALL {
            self.grid.add_wall(cell, heading);
        }
        self
    }

    /// Parse a maze drawn in the same format as
    /// [`render_ascii`](maze_grid::render_ascii), North at the top.
    ///
    /// ```text
    /// +---+---+---+
    /// |           |
    /// +   +---+   +
    /// |   |       |
    /// +   +   +   +
    /// |           |
    /// +---+---+---+
    /// ```
    ///
    /// Cell bodies are ignored. Border walls are implied whether drawn or
    /// not. Short lines are padded with spaces.
    pub fn parse(text: &str) -> Result<Self, String> {
        let lines: Vec<Vec<char>> = text
            .lines()
            .map(str::trim_end)
            .filter(|l| !l.is_empty())
            .map(|l| l.chars().collect())
            .collect();
        if lines.len() < 3 || lines.len() % 2 == 0 {
            return Err(format!(
                "expected an odd number of at least 3 lines, got {}",
                lines.len()
            ));
        }
        let side = ((lines.len() - 1) / 2) as u32;
        let mut grid = GridMap::new(side).map_err(|e| e.to_string())?;
        let at = |line: &[char], col: usize| line.get(col).copied().unwrap_or(' ');

        for (row, line) in lines.iter().enumerate() {
            // Text row 0 is the northern border; cell row y sits on text
            // row 2 * (side - 1 - y) + 1.
            let k = (row / 2) as u32;
            if row % 2 == 0 {
                for x in 0..side {
                    if at(line, 4 * x as usize + 2) != '-' {
                        continue;
                    }
                    if k < side {
                        grid.add_wall(Cell::new(x, side - 1 - k), Heading::North);
                    } else {
                        grid.add_wall(Cell::new(x, 0), Heading::South);
                    }
                }
            } else {
                let y = side - 1 - k;
                for x in 0..=side {
                    if at(line, 4 * x as usize) != '|' {
                        continue;
                    }
                    if x < side {
                        grid.add_wall(Cell::new(x, y), Heading::West);
                    } else {
                        grid.add_wall(Cell::new(side - 1, y), Heading::East);
                    }
                }
            }
        }
        Ok(Self { grid })
    }

    /// A seeded random perfect maze: every cell reachable from every
    /// other by exactly one path.
    ///
    /// Carved with an iterative depth-first backtracker from `(0, 0)`.
    /// The same `(side, seed)` always produces the same maze.
    pub fn random_perfect(side: u32, seed: u64) -> Result<Self, GridError> {
        let mut grid = GridMap::new(side)?;
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut passages = vec![WallMask::EMPTY; grid.cell_count()];
        let mut visited = vec![false; grid.cell_count()];

        let origin = Cell::new(0, 0);
        visited[grid.index(origin)] = true;
        let mut stack = vec![origin];
        while let Some(&cell) = stack.last() {
            let mut candidates: Vec<(Heading, Cell)> = Heading::ALL
                .into_iter()
                .filter_map(|h| grid.neighbour(cell, h).map(|nb| (h, nb)))
                .filter(|&(_, nb)| !visited[grid.index(nb)])
                .collect();
            if candidates.is_empty() {
                stack.pop();
                continue;
            }
            candidates.shuffle(&mut rng);
            let (heading, next) = candidates[0];
            let (ci, ni) = (grid.index(cell), grid.index(next));
            passages[ci] |= WallMask::single(heading);
            passages[ni] |= WallMask::single(heading.opposite());
            visited[ni] = true;
            stack.push(next);
        }

        for index in 0..grid.cell_count() {
            let cell = grid.cell_at(index);
            for heading in [Heading::North, Heading::East] {
                if grid.neighbour(cell, heading).is_some() && !passages[index].has(heading) {
                    grid.add_wall(cell, heading);
                }
            }
        }
        Ok(Self { grid })
    }

    /// Side length.
    pub fn side(&self) -> u32 {
        self.grid.side()
    }

    /// True walls of `cell`.
    pub fn walls_of(&self, cell: Cell) -> WallMask {
        self.grid.walls_of(cell)
    }

    /// Whether passage from `cell` toward `heading` is physically open.
    pub fn is_open(&self, cell: Cell, heading: Heading) -> bool {
        self.grid.is_open(cell, heading)
    }

    /// The true walls as a grid.
    pub fn grid(&self) -> &GridMap {
        &self.grid
    }

    /// A copy of the true walls with a cleared distance field, as if the
    /// whole maze had already been explored.
    pub fn to_grid_map(&self) -> GridMap {
        self.grid.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bfs::reference_bfs;
    use maze_core::MAX_DISTANCE;
    use maze_grid::{check_reciprocity, render_ascii};

    const SAMPLE: &str = "
+---+---+---+
|           |
+   +---+   +
|   |       |
+   +   +   +
|           |
+---+---+---+
";

    #[test]
    fn parse_reads_internal_walls() {
        let m = MazeLayout::parse(SAMPLE).unwrap();
        assert_eq!(m.side(), 3);
        // The "---" under the top row sits between (1, 2) and (1, 1).
        assert!(m.walls_of(Cell::new(1, 2)).has(Heading::South));
        assert!(m.walls_of(Cell::new(1, 1)).has(Heading::North));
        // The "|" in the middle row sits between (0, 1) and (1, 1).
        assert!(m.walls_of(Cell::new(0, 1)).has(Heading::East));
        assert!(m.walls_of(Cell::new(1, 1)).has(Heading::West));
        assert!(m.is_open(Cell::new(0, 0), Heading::North));
        assert!(check_reciprocity(m.grid()).is_ok());
    }

    #[test]
    fn parse_round_trips_render() {
        let m = MazeLayout::parse(SAMPLE).unwrap();
        let text = render_ascii(m.grid(), None);
        assert_eq!(MazeLayout::parse(&text).unwrap(), m);
    }

    #[test]
    fn parse_rejects_even_line_count() {
        assert!(MazeLayout::parse("+---+\n|   |\n").is_err());
        assert!(MazeLayout::parse("").is_err());
    }

    #[test]
    fn random_perfect_is_deterministic() {
        let a = MazeLayout::random_perfect(8, 42).unwrap();
        let b = MazeLayout::random_perfect(8, 42).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn random_perfect_is_connected_tree() {
        for seed in 0..8 {
            let m = MazeLayout::random_perfect(6, seed).unwrap();
            assert!(check_reciprocity(m.grid()).is_ok());
            let d = reference_bfs(m.grid(), Cell::new(5, 5));
            assert!(d.iter().all(|&v| v != MAX_DISTANCE), "seed {seed}");
            // A spanning tree of n cells has n - 1 passages.
            let open_sides: u32 = m.grid().walls().iter().map(|w| 4 - w.count()).sum();
            assert_eq!(open_sides, 2 * (36 - 1));
        }
    }
}
