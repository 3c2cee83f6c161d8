use crate::geometry::{Coord, Direction};

/// Errors raised by the maze engine.
#[derive(Debug, thiserror::Error)]
pub enum MazeError {
    #[error("invalid maze dimensions {width}x{height}: both must be positive")]
    InvalidDimensions { width: i64, height: i64 },
    #[error("goal unreachable after visiting {visited} cells; grid is not a perfect maze")]
    GridContractViolation { visited: usize },
    #[error("coordinate {at} is outside the grid")]
    OutOfBounds { at: Coord },
    #[error("observation at {at} contradicts known wall to the {direction}")]
    ContradictoryObservation { at: Coord, direction: Direction },
    #[error("internal invariant violated: {0}")]
    InvariantViolation(String),
}
