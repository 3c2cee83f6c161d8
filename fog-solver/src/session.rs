use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use tracing::info;

use crate::error::MazeError;
use crate::geometry::{Coord, Dimensions};
use crate::knowledge::KnowledgeMap;
use crate::navigator::{Exploration, Navigator};
use crate::presenter::{render_fog, ExplorationStats};
use crate::world::{render_truth, Grid, GridSensor, PathOverlay};

/// Environment variable consulted for a seed when none is given.
pub const SEED_ENV: &str = "FOG_MAZE_SEED";

#[derive(Debug, Clone, Copy)]
pub struct SessionConfig {
    pub dimensions: Dimensions,
    /// Fixed seed for reproducible mazes; drawn from entropy when absent.
    pub seed: Option<u64>,
}

impl SessionConfig {
    pub fn new(dimensions: Dimensions, seed: Option<u64>) -> Self {
        Self { dimensions, seed }
    }
}

/// Everything one run produced.
pub struct SessionReport {
    pub seed: u64,
    pub grid: Grid,
    pub knowledge: KnowledgeMap,
    pub exploration: Exploration,
    pub reference_path: Option<Vec<Coord>>,
    pub stats: ExplorationStats,
}

/// Serializable digest of a run.
#[derive(Debug, Clone, Serialize)]
pub struct SessionSummary {
    pub seed: u64,
    pub width: usize,
    pub height: usize,
    pub stats: ExplorationStats,
    pub backtracks: usize,
    pub reference_path_len: Option<usize>,
}

impl SessionReport {
    pub fn truth_view(&self) -> String {
        render_truth(&self.grid, PathOverlay::None)
    }

    pub fn fog_view(&self) -> String {
        render_fog(&self.knowledge, self.exploration.is_solved())
    }

    pub fn comparison_view(&self) -> String {
        render_truth(&self.grid, PathOverlay::Discovered(&self.exploration.path))
    }

    pub fn reference_view(&self) -> String {
        render_truth(&self.grid, PathOverlay::Reference)
    }

    pub fn summary(&self) -> SessionSummary {
        let dims = self.grid.dimensions();
        SessionSummary {
            seed: self.seed,
            width: dims.width(),
            height: dims.height(),
            stats: self.stats.clone(),
            backtracks: self.exploration.backtracks(),
            reference_path_len: self.reference_path.as_ref().map(Vec::len),
        }
    }
}

/// Runs a fresh navigator against `grid` through a grid-backed sensor.
/// Returns the exploration, the final knowledge and the sense-call count.
pub fn explore_grid(grid: &Grid) -> Result<(Exploration, KnowledgeMap, usize), MazeError> {
    let mut sensor = GridSensor::new(grid);
    let mut navigator = Navigator::new(KnowledgeMap::new(grid.dimensions()));
    let exploration = navigator.explore(&mut sensor)?;
    Ok((exploration, navigator.into_knowledge(), sensor.calls()))
}

/// Generates a maze, solves it with full information for reference, then
/// explores it under fog.
pub fn run_session(config: &SessionConfig) -> Result<SessionReport, MazeError> {
    let seed = config.seed.unwrap_or_else(|| rand::thread_rng().gen());
    let mut rng = StdRng::seed_from_u64(seed);
    let mut grid = Grid::generate(config.dimensions, &mut rng);
    let reference_path = grid.solve_reference();

    let (exploration, knowledge, sense_calls) = explore_grid(&grid)?;
    let stats = ExplorationStats::collect(&knowledge, sense_calls, exploration.is_solved());

    info!(
        seed,
        width = config.dimensions.width(),
        height = config.dimensions.height(),
        solved = stats.solved,
        visited = stats.visited,
        path = stats.path,
        "session finished"
    );

    Ok(SessionReport {
        seed,
        grid,
        knowledge,
        exploration,
        reference_path,
        stats,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_sessions_are_reproducible() {
        let config = SessionConfig::new(Dimensions::new(10, 7).unwrap(), Some(99));
        let a = run_session(&config).unwrap();
        let b = run_session(&config).unwrap();
        assert_eq!(a.seed, 99);
        assert_eq!(a.exploration.path, b.exploration.path);
        assert_eq!(a.stats, b.stats);
        assert_eq!(a.fog_view(), b.fog_view());
    }

    #[test]
    fn unseeded_session_reports_a_replayable_seed() {
        let dims = Dimensions::new(8, 5).unwrap();
        let first = run_session(&SessionConfig::new(dims, None)).unwrap();
        let replay = run_session(&SessionConfig::new(dims, Some(first.seed))).unwrap();
        assert_eq!(replay.seed, first.seed);
        assert_eq!(replay.exploration.path, first.exploration.path);
        assert_eq!(replay.truth_view(), first.truth_view());
    }

    #[test]
    fn session_solves_and_reports() {
        let config = SessionConfig::new(Dimensions::new(6, 4).unwrap(), Some(5));
        let report = run_session(&config).unwrap();
        assert!(report.stats.solved);
        assert_eq!(report.stats.path, report.exploration.path.len());
        // a perfect maze has exactly one simple path
        assert_eq!(report.reference_path.as_ref(), Some(&report.exploration.path));

        let summary = report.summary();
        assert_eq!((summary.width, summary.height), (6, 4));
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["stats"]["solved"], serde_json::json!(true));
    }

    #[test]
    fn views_have_canvas_shape() {
        let config = SessionConfig::new(Dimensions::new(4, 3).unwrap(), Some(1));
        let report = run_session(&config).unwrap();
        for view in [
            report.truth_view(),
            report.fog_view(),
            report.comparison_view(),
            report.reference_view(),
        ] {
            let lines: Vec<&str> = view.lines().collect();
            assert_eq!(lines.len(), 7);
            assert!(lines.iter().all(|l| l.chars().count() == 9));
        }
    }
}
