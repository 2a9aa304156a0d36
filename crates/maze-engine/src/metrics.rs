//! Counters collected over one navigation run.
//!
//! [`RunMetrics`] is updated by the controller after every cycle and can
//! be read at any time through
//! [`RunController::metrics`](crate::RunController::metrics).

use std::fmt;

/// Cumulative counters for a run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RunMetrics {
    /// Control cycles executed, including the one-shot map-ready cycle.
    pub cycles: u64,
    /// Cells advanced while exploring.
    pub explore_cells: u32,
    /// Cells advanced on the fast run.
    pub fast_run_cells: u32,
    /// In-place quarter turns performed in either phase.
    pub quarter_turns: u32,
    /// Propagation runs (heuristic and flood fill).
    pub propagations: u32,
    /// Relaxation passes summed over all propagation runs.
    pub propagation_passes: u64,
    /// Wall bits added by observation (reciprocal bits included).
    pub wall_bits_discovered: u32,
    /// Time spent inside motion segments, in microseconds.
    pub motion_us: u64,
    /// The run started from a persisted map and skipped exploration.
    pub from_persisted_map: bool,
    /// The map was written to storage at the end of exploration.
    pub map_saved: bool,
}

impl RunMetrics {
    /// Cells advanced in both phases.
    pub fn total_cells(&self) -> u32 {
        self.explore_cells + self.fast_run_cells
    }
}

impl fmt::Display for RunMetrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "cycles={} explore_cells={} fast_run_cells={} quarter_turns={} \
             propagations={} passes={} walls_found={} motion_ms={} persisted={} saved={}",
            self.cycles,
            self.explore_cells,
            self.fast_run_cells,
            self.quarter_turns,
            self.propagations,
            self.propagation_passes,
            self.wall_bits_discovered,
            self.motion_us / 1_000,
            self.from_persisted_map,
            self.map_saved,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_zeroed() {
        let m = RunMetrics::default();
        assert_eq!(m.cycles, 0);
        assert_eq!(m.total_cells(), 0);
        assert!(!m.from_persisted_map);
    }

    #[test]
    fn display_is_single_line() {
        let m = RunMetrics {
            explore_cells: 4,
            fast_run_cells: 4,
            motion_us: 2_500,
            ..RunMetrics::default()
        };
        let text = m.to_string();
        assert!(!text.contains('\n'));
        assert!(text.contains("explore_cells=4"));
        assert!(text.contains("motion_ms=2"));
        assert_eq!(m.total_cells(), 8);
    }
}
