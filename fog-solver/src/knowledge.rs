use serde::{Deserialize, Serialize};

use crate::error::MazeError;
use crate::geometry::{Coord, Dimensions, Direction, DIRECTION_COUNT};

/// How much the agent has seen of a coordinate. Only ever upgraded.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
pub enum Observation {
    #[default]
    Unseen,
    /// Known to exist through an open neighbor, walls still unknown.
    Discovered,
    /// All four walls sensed.
    Scanned,
}

/// What the agent believes about one cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BeliefRecord {
    walls: [bool; DIRECTION_COUNT],
    known: [bool; DIRECTION_COUNT],
    pub visited: bool,
    pub path_member: bool,
}

impl Default for BeliefRecord {
    fn default() -> Self {
        Self {
            walls: [true; DIRECTION_COUNT],
            known: [false; DIRECTION_COUNT],
            visited: false,
            path_member: false,
        }
    }
}

impl BeliefRecord {
    pub fn is_known(&self, dir: Direction) -> bool {
        self.known[dir.index()]
    }

    /// Believed wall value. Unknown directions report a wall.
    pub fn wall(&self, dir: Direction) -> bool {
        self.walls[dir.index()]
    }

    /// Known wall value, or `None` while the direction is unsensed.
    pub fn known_wall(&self, dir: Direction) -> Option<bool> {
        self.is_known(dir).then(|| self.wall(dir))
    }

    /// Unknown is never passable.
    pub fn is_passable(&self, dir: Direction) -> bool {
        self.is_known(dir) && !self.wall(dir)
    }

    pub fn is_fully_known(&self) -> bool {
        self.known.iter().all(|&k| k)
    }

    pub fn known_count(&self) -> usize {
        self.known.iter().filter(|&&k| k).count()
    }
}

/// The agent's private model of the maze.
///
/// Dense storage sized to the grid; a slot holds a record only once the
/// coordinate has been sensed or discovered. Records are never removed.
#[derive(Debug, Clone)]
pub struct KnowledgeMap {
    dimensions: Dimensions,
    records: Vec<Option<BeliefRecord>>,
    observations: Vec<Observation>,
}

impl KnowledgeMap {
    pub fn new(dimensions: Dimensions) -> Self {
        let cells = dimensions.cell_count();
        Self {
            dimensions,
            records: vec![None; cells],
            observations: vec![Observation::Unseen; cells],
        }
    }

    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    fn slot(&self, at: Coord) -> Result<usize, MazeError> {
        self.dimensions
            .index_of(at)
            .ok_or(MazeError::OutOfBounds { at })
    }

    pub fn get(&self, at: Coord) -> Option<&BeliefRecord> {
        let idx = self.dimensions.index_of(at)?;
        self.records[idx].as_ref()
    }

    pub fn observation(&self, at: Coord) -> Observation {
        self.dimensions
            .index_of(at)
            .map(|idx| self.observations[idx])
            .unwrap_or_default()
    }

    pub fn is_observed(&self, at: Coord) -> bool {
        self.observation(at) > Observation::Unseen
    }

    /// Returns the record at `at`, creating an all-unknown one if absent.
    pub fn ensure(&mut self, at: Coord) -> Result<&mut BeliefRecord, MazeError> {
        let idx = self.slot(at)?;
        Ok(self.records[idx].get_or_insert_with(BeliefRecord::default))
    }

    /// Raises the observation strength of `at`; weaker marks are ignored.
    pub fn observe(&mut self, at: Coord, strength: Observation) -> Result<(), MazeError> {
        let idx = self.slot(at)?;
        let current = &mut self.observations[idx];
        *current = (*current).max(strength);
        Ok(())
    }

    /// Stores a sensed wall value. A known value is never overwritten with a
    /// different one.
    pub fn learn_wall(&mut self, at: Coord, dir: Direction, wall: bool) -> Result<(), MazeError> {
        let record = self.ensure(at)?;
        let i = dir.index();
        if record.known[i] {
            if record.walls[i] != wall {
                return Err(MazeError::ContradictoryObservation { at, direction: dir });
            }
            return Ok(());
        }
        record.walls[i] = wall;
        record.known[i] = true;
        Ok(())
    }

    pub fn mark_visited(&mut self, at: Coord) -> Result<(), MazeError> {
        self.ensure(at)?.visited = true;
        Ok(())
    }

    pub fn mark_path(&mut self, at: Coord) -> Result<(), MazeError> {
        self.ensure(at)?.path_member = true;
        Ok(())
    }

    pub fn records(&self) -> impl Iterator<Item = (Coord, &BeliefRecord)> + '_ {
        let dims = self.dimensions;
        self.records
            .iter()
            .enumerate()
            .filter_map(move |(idx, rec)| rec.as_ref().map(|r| (dims.coord_of(idx), r)))
    }

    pub fn count_observed(&self, at_least: Observation) -> usize {
        self.observations.iter().filter(|&&o| o >= at_least).count()
    }

    pub fn visited_count(&self) -> usize {
        self.records().filter(|(_, r)| r.visited).count()
    }

    pub fn path_count(&self) -> usize {
        self.records().filter(|(_, r)| r.path_member).count()
    }
}
