use std::collections::HashSet;

use tracing::{debug, warn};

use crate::error::MazeError;
use crate::geometry::{Coord, Direction};
use crate::knowledge::KnowledgeMap;
use crate::sensor_trait::Sensor;

/// One event of an exploration, in the order it happened.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Step {
    Sensed(Coord),
    Entered(Coord),
    Backtracked(Coord),
    ReachedGoal(Coord),
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Outcome {
    Solved,
    /// Every reachable branch was tried without finding the goal.
    Exhausted,
}

#[derive(Debug, Clone)]
pub struct Exploration {
    pub outcome: Outcome,
    /// Start to goal, empty unless solved.
    pub path: Vec<Coord>,
    pub visited: usize,
    pub trace: Vec<Step>,
}

impl Exploration {
    pub fn is_solved(&self) -> bool {
        self.outcome == Outcome::Solved
    }

    pub fn backtracks(&self) -> usize {
        self.trace
            .iter()
            .filter(|s| matches!(s, Step::Backtracked(_)))
            .count()
    }

    pub fn require_solved(&self) -> Result<&[Coord], MazeError> {
        match self.outcome {
            Outcome::Solved => Ok(&self.path),
            Outcome::Exhausted => Err(MazeError::GridContractViolation {
                visited: self.visited,
            }),
        }
    }
}

struct Frame {
    at: Coord,
    next_dir: usize,
}

/// Depth-first explorer that decides only from its own knowledge map.
pub struct Navigator {
    knowledge: KnowledgeMap,
    visited: HashSet<Coord>,
    trace: Vec<Step>,
}

impl Navigator {
    pub fn new(knowledge: KnowledgeMap) -> Self {
        Self {
            knowledge,
            visited: HashSet::new(),
            trace: Vec::new(),
        }
    }

    pub fn knowledge(&self) -> &KnowledgeMap {
        &self.knowledge
    }

    pub fn into_knowledge(self) -> KnowledgeMap {
        self.knowledge
    }

    fn sense<S: Sensor + ?Sized>(&mut self, sensor: &mut S, at: Coord) -> Result<(), MazeError> {
        sensor.sense(at, &mut self.knowledge)?;
        self.trace.push(Step::Sensed(at));
        Ok(())
    }

    /// Marks `at` visited; senses it unless it is the goal. Returns whether
    /// the goal was reached.
    fn enter<S: Sensor + ?Sized>(&mut self, sensor: &mut S, at: Coord) -> Result<bool, MazeError> {
        self.visited.insert(at);
        self.knowledge.mark_visited(at)?;
        self.trace.push(Step::Entered(at));

        if at == self.knowledge.dimensions().goal() {
            self.knowledge.mark_path(at)?;
            self.trace.push(Step::ReachedGoal(at));
            return Ok(true);
        }

        self.sense(sensor, at)?;
        Ok(false)
    }

    /// Picks the next unexplored passable direction out of `frame`, advancing
    /// its cursor past everything it skips.
    fn next_move(&self, frame: &mut Frame) -> Option<Coord> {
        let dims = self.knowledge.dimensions();
        while frame.next_dir < Direction::ALL.len() {
            let dir = Direction::ALL[frame.next_dir];
            frame.next_dir += 1;

            let Some(next) = dims.neighbor(frame.at, dir) else {
                continue;
            };
            let passable = self
                .knowledge
                .get(frame.at)
                .is_some_and(|r| r.is_passable(dir));
            if !passable || self.visited.contains(&next) {
                continue;
            }
            return Some(next);
        }
        None
    }

    /// Explores from the start until the goal is reached or every known
    /// passage has been tried.
    pub fn explore<S: Sensor + ?Sized>(&mut self, sensor: &mut S) -> Result<Exploration, MazeError> {
        let dims = self.knowledge.dimensions();
        let start = dims.start();
        let max_depth = dims.cell_count();

        self.sense(sensor, start)?;
        let mut stack: Vec<Frame> = Vec::new();
        let mut solved = self.enter(sensor, start)?;
        if !solved {
            stack.push(Frame { at: start, next_dir: 0 });
        }

        while !solved {
            let Some(top) = stack.last_mut() else {
                break;
            };
            let next = self.next_move(top);
            match next {
                Some(next) => {
                    if self.enter(sensor, next)? {
                        solved = true;
                    } else {
                        // Frames are distinct non-goal cells, so this only
                        // trips if the visited set stops guarding re-entry.
                        if stack.len() >= max_depth {
                            return Err(MazeError::InvariantViolation(format!(
                                "search depth exceeded {} cells",
                                max_depth
                            )));
                        }
                        stack.push(Frame { at: next, next_dir: 0 });
                    }
                }
                None => {
                    if let Some(done) = stack.pop() {
                        debug!(at = %done.at, "dead end, backtracking");
                        self.trace.push(Step::Backtracked(done.at));
                    }
                }
            }
        }

        let path = if solved {
            let mut path: Vec<Coord> = stack.iter().map(|f| f.at).collect();
            for &at in &path {
                self.knowledge.mark_path(at)?;
            }
            path.push(dims.goal());
            path
        } else {
            Vec::new()
        };

        let outcome = if solved {
            debug!(length = path.len(), visited = self.visited.len(), "goal reached");
            Outcome::Solved
        } else {
            warn!(visited = self.visited.len(), "exploration exhausted without reaching the goal");
            Outcome::Exhausted
        };

        Ok(Exploration {
            outcome,
            path,
            visited: self.visited.len(),
            trace: std::mem::take(&mut self.trace),
        })
    }
}
