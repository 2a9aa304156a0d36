//! Descent with a forward-biased tie-break.
//!
//! The policy looks at the distance of the current cell and of the
//! neighbours reachable without crossing a known wall, and picks the
//! first direction, in the order forward, left, right, back, whose
//! distance equals the overall minimum.

use maze_core::{rotate, Action, Cell, Distance, PolicyError, Pose, Relative, MAX_DISTANCE};
use maze_grid::GridMap;

/// Priority order of relative directions.
const PRIORITY: [Relative; 4] = [Relative::Front, Relative::Left, Relative::Right, Relative::Back];

/// Distances around the vehicle, relative to its heading.
///
/// A neighbour is `None` when a known wall or the grid border blocks it;
/// for comparison it counts as [`MAX_DISTANCE`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NeighbourDistances {
    /// Cell the vehicle is in.
    pub cell: Cell,
    /// Distance of the current cell.
    pub current: Distance,
    /// Neighbour ahead.
    pub front: Option<Distance>,
    /// Neighbour to the left.
    pub left: Option<Distance>,
    /// Neighbour to the right.
    pub right: Option<Distance>,
    /// Neighbour behind.
    pub back: Option<Distance>,
}

impl NeighbourDistances {
    /// Gather the distances around `pose` from `grid`.
    pub fn gather(grid: &GridMap, pose: Pose) -> Self {
        let at = |relative: Relative| {
            let heading = rotate(relative, pose.heading);
            if !grid.is_open(pose.cell, heading) {
                return None;
            }
            grid.neighbour(pose.cell, heading).map(|nb| grid.distance_of(nb))
        };
        Self {
            cell: pose.cell,
            current: grid.distance_of(pose.cell),
            front: at(Relative::Front),
            left: at(Relative::Left),
            right: at(Relative::Right),
            back: at(Relative::Back),
        }
    }

    /// Neighbour distance toward `relative`.
    pub fn get(&self, relative: Relative) -> Option<Distance> {
        match relative {
            Relative::Front => self.front,
            Relative::Left => self.left,
            Relative::Right => self.right,
            Relative::Back => self.back,
        }
    }
}

/// Choose the next action from the distances around the vehicle.
///
/// # Errors
///
/// - [`PolicyError::Enclosed`] if no neighbour is reachable.
/// - [`PolicyError::Disconnected`] if nothing around the vehicle has a
///   finite distance: the target cannot be reached with what is known.
/// - [`PolicyError::NoDescent`] if the current cell is strictly better
///   than every neighbour (normally: already on the target).
///
/// # Examples
///
/// ```
/// use maze_core::{Action, Cell};
/// use maze_engine::policy::{select_action, NeighbourDistances};
///
/// let around = NeighbourDistances {
///     cell: Cell::new(1, 1),
///     current: 2,
///     front: Some(2),
///     left: Some(1),
///     right: Some(1),
///     back: Some(3),
/// };
/// assert_eq!(select_action(&around), Ok(Action::TurnLeft90));
/// ```
pub fn select_action(around: &NeighbourDistances) -> Result<Action, PolicyError> {
    let cell = around.cell;
    if PRIORITY.iter().all(|&r| around.get(r).is_none()) {
        return Err(PolicyError::Enclosed { cell });
    }
    let minimum = PRIORITY
        .iter()
        .filter_map(|&r| around.get(r))
        .fold(around.current, Distance::min);
    if minimum == MAX_DISTANCE {
        return Err(PolicyError::Disconnected { cell });
    }
    PRIORITY
        .into_iter()
        .find(|&r| around.get(r) == Some(minimum))
        .map(Action::toward)
        .ok_or(PolicyError::NoDescent {
            cell,
            distance: around.current,
        })
}

/// Stateless decision maker over a [`GridMap`].
#[derive(Clone, Copy, Debug, Default)]
pub struct NavigationPolicy;

impl NavigationPolicy {
    /// Decide the next action for `pose` using the grid's current
    /// distance field.
    pub fn decide(&self, grid: &GridMap, pose: Pose) -> Result<Action, PolicyError> {
        select_action(&NeighbourDistances::gather(grid, pose))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use maze_core::Heading;
    use proptest::prelude::*;

    fn around(
        current: Distance,
        front: Option<Distance>,
        left: Option<Distance>,
        right: Option<Distance>,
        back: Option<Distance>,
    ) -> NeighbourDistances {
        NeighbourDistances {
            cell: Cell::new(1, 1),
            current,
            front,
            left,
            right,
            back,
        }
    }

    // ── Tie-break tests ─────────────────────────────────────────

    #[test]
    fn strict_minimum_wins() {
        let a = around(2, Some(1), Some(1), Some(0), Some(3));
        assert_eq!(select_action(&a), Ok(Action::TurnRight90));
    }

    #[test]
    fn left_beats_right_on_tie() {
        let a = around(2, Some(2), Some(1), Some(1), Some(3));
        assert_eq!(select_action(&a), Ok(Action::TurnLeft90));
    }

    #[test]
    fn forward_beats_everything_on_tie() {
        let a = around(1, Some(0), Some(0), Some(0), Some(0));
        assert_eq!(select_action(&a), Ok(Action::Forward));
    }

    #[test]
    fn back_only_when_nothing_else_is_minimal() {
        let a = around(4, None, Some(5), None, Some(3));
        assert_eq!(select_action(&a), Ok(Action::TurnAround180));
    }

    #[test]
    fn equal_to_current_still_moves() {
        // Heuristic fields can leave a plateau; the tie with the current
        // cell is resolved by moving.
        let a = around(3, Some(4), Some(3), None, None);
        assert_eq!(select_action(&a), Ok(Action::TurnLeft90));
    }

    // ── Failure tests ───────────────────────────────────────────

    #[test]
    fn no_open_neighbour_is_enclosed() {
        let a = around(3, None, None, None, None);
        assert_eq!(
            select_action(&a),
            Err(PolicyError::Enclosed {
                cell: Cell::new(1, 1)
            })
        );
    }

    #[test]
    fn all_unreached_is_disconnected() {
        let a = around(MAX_DISTANCE, Some(MAX_DISTANCE), None, Some(MAX_DISTANCE), None);
        assert_eq!(
            select_action(&a),
            Err(PolicyError::Disconnected {
                cell: Cell::new(1, 1)
            })
        );
    }

    #[test]
    fn on_target_has_no_descent() {
        let a = around(0, Some(1), None, None, Some(1));
        assert_eq!(
            select_action(&a),
            Err(PolicyError::NoDescent {
                cell: Cell::new(1, 1),
                distance: 0
            })
        );
    }

    // ── Grid tests ──────────────────────────────────────────────

    #[test]
    fn gather_respects_walls_and_heading() {
        let mut g = GridMap::new(3).unwrap();
        for (i, d) in [5u16, 4, 3, 6, 5, 2, 7, 0, 1].into_iter().enumerate() {
            let cell = g.cell_at(i);
            g.set_distance(cell, d);
        }
        g.add_wall(Cell::new(1, 1), Heading::West);
        let pose = Pose::new(Cell::new(1, 1), Heading::East);
        let a = NeighbourDistances::gather(&g, pose);
        assert_eq!(a.current, 5);
        assert_eq!(a.front, Some(2)); // (2, 1)
        assert_eq!(a.left, Some(0)); // (1, 2)
        assert_eq!(a.right, Some(4)); // (1, 0)
        assert_eq!(a.back, None); // wall toward (0, 1)
        assert_eq!(NavigationPolicy.decide(&g, pose), Ok(Action::TurnLeft90));
    }

    #[test]
    fn gather_at_border_is_none() {
        let g = GridMap::new(2).unwrap();
        let a = NeighbourDistances::gather(&g, Pose::new(Cell::new(0, 0), Heading::South));
        assert_eq!(a.front, None);
        assert_eq!(a.right, None);
        assert!(a.left.is_some());
        assert!(a.back.is_some());
    }

    // ── Property tests ──────────────────────────────────────────

    fn arb_distance() -> impl Strategy<Value = Distance> {
        prop_oneof![4 => 0u16..6, 1 => Just(MAX_DISTANCE)]
    }

    fn arb_neighbour() -> impl Strategy<Value = Option<Distance>> {
        proptest::option::of(arb_distance())
    }

    fn arb_around() -> impl Strategy<Value = NeighbourDistances> {
        (
            arb_distance(),
            arb_neighbour(),
            arb_neighbour(),
            arb_neighbour(),
            arb_neighbour(),
        )
            .prop_map(|(current, front, left, right, back)| {
                around(current, front, left, right, back)
            })
    }

    proptest! {
        #[test]
        fn chosen_direction_is_first_minimum(a in arb_around()) {
            let minimum = PRIORITY
                .iter()
                .filter_map(|&r| a.get(r))
                .fold(a.current, Distance::min);
            if let Ok(action) = select_action(&a) {
                let pos = PRIORITY
                    .iter()
                    .position(|&r| Action::toward(r) == action)
                    .unwrap();
                prop_assert_eq!(a.get(PRIORITY[pos]), Some(minimum));
                prop_assert!(minimum < MAX_DISTANCE);
                for &earlier in &PRIORITY[..pos] {
                    prop_assert_ne!(a.get(earlier), Some(minimum));
                }
            }
        }

        #[test]
        fn failures_match_their_conditions(a in arb_around()) {
            let open: Vec<Distance> = PRIORITY.iter().filter_map(|&r| a.get(r)).collect();
            match select_action(&a) {
                Ok(_) => {}
                Err(PolicyError::Enclosed { .. }) => prop_assert!(open.is_empty()),
                Err(PolicyError::Disconnected { .. }) => {
                    prop_assert!(!open.is_empty());
                    prop_assert_eq!(a.current, MAX_DISTANCE);
                    prop_assert!(open.iter().all(|&d| d == MAX_DISTANCE));
                }
                Err(PolicyError::NoDescent { distance, .. }) => {
                    prop_assert_eq!(distance, a.current);
                    prop_assert!(open.iter().all(|&d| d > a.current));
                }
            }
        }

        #[test]
        fn no_open_neighbour_is_always_enclosed(current in arb_distance()) {
            let a = around(current, None, None, None, None);
            prop_assert_eq!(
                select_action(&a),
                Err(PolicyError::Enclosed { cell: Cell::new(1, 1) })
            );
        }
    }
}
