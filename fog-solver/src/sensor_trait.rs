use crate::error::MazeError;
use crate::geometry::Coord;
use crate::knowledge::KnowledgeMap;

/// The only channel through which an agent learns about the maze.
pub trait Sensor {
    /// Reveals the four walls at `at` into `knowledge` and discovers the
    /// cells behind any open wall. Re-sensing a cell is a no-op.
    fn sense(&mut self, at: Coord, knowledge: &mut KnowledgeMap) -> Result<(), MazeError>;
}
