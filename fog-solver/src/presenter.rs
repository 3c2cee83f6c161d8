//! Text rendering of mazes and exploration statistics.
//!
//! A `w x h` maze is drawn on a `(2w+1) x (2h+1)` canvas: cell `(x, y)` sits
//! at column `2x+1`, row `2y+1`, wall segments between cells and corners on
//! the even/even positions.

use std::fmt;

use serde::Serialize;

use crate::geometry::{Coord, Dimensions, Direction};
use crate::knowledge::{KnowledgeMap, Observation};

pub const WALL: char = '#';
pub const PASSAGE: char = ' ';
pub const FOG: char = '░';
pub const START: char = 'S';
pub const GOAL: char = 'E';
pub const PATH: char = '?';
pub const VISITED: char = '·';
pub const BLANK: char = ' ';

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub(crate) enum Segment {
    Wall,
    Open,
    Fog,
}

impl Segment {
    fn symbol(self) -> char {
        match self {
            Segment::Wall => WALL,
            Segment::Open => PASSAGE,
            Segment::Fog => FOG,
        }
    }

    /// A segment is drawn from whichever side knows it.
    fn merge(self, other: Segment) -> Segment {
        match self {
            Segment::Fog => other,
            known => known,
        }
    }
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub(crate) enum Interior {
    Fog,
    Start,
    Goal,
    Path,
    Visited,
    Blank,
}

impl Interior {
    /// Start > goal > path > visited > blank.
    pub(crate) fn classify(dims: Dimensions, at: Coord, on_path: bool, visited: bool) -> Self {
        if at == dims.start() {
            Interior::Start
        } else if at == dims.goal() {
            Interior::Goal
        } else if on_path {
            Interior::Path
        } else if visited {
            Interior::Visited
        } else {
            Interior::Blank
        }
    }

    fn symbol(self) -> char {
        match self {
            Interior::Fog => FOG,
            Interior::Start => START,
            Interior::Goal => GOAL,
            Interior::Path => PATH,
            Interior::Visited => VISITED,
            Interior::Blank => BLANK,
        }
    }
}

/// Draws a maze from per-cell segment and interior providers.
pub(crate) fn draw<S, I>(dims: Dimensions, segment: S, interior: I) -> String
where
    S: Fn(Coord, Direction) -> Segment,
    I: Fn(Coord) -> Interior,
{
    let (w, h) = (dims.width(), dims.height());
    let cols = 2 * w + 1;
    let rows = 2 * h + 1;
    let interiors: Vec<Interior> = dims.coords().map(&interior).collect();
    let fogged = |x: usize, y: usize| interiors[y * w + x] == Interior::Fog;

    let mut out = String::with_capacity(rows * (cols + 1) * 3);
    for row in 0..rows {
        for col in 0..cols {
            let ch = match (col % 2, row % 2) {
                (1, 1) => interiors[(row / 2) * w + col / 2].symbol(),
                (1, 0) => {
                    // horizontal segment between (x, y-1) and (x, y)
                    let x = col / 2;
                    let y = row / 2;
                    let above = (y > 0).then(|| segment(Coord::new(x, y - 1), Direction::South));
                    let below = (y < h).then(|| segment(Coord::new(x, y), Direction::North));
                    merge_sides(above, below).symbol()
                }
                (0, 1) => {
                    let x = col / 2;
                    let y = row / 2;
                    let left = (x > 0).then(|| segment(Coord::new(x - 1, y), Direction::East));
                    let right = (x < w).then(|| segment(Coord::new(x, y), Direction::West));
                    merge_sides(left, right).symbol()
                }
                _ => {
                    let (cx, cy) = (col / 2, row / 2);
                    let all_fog = (cx.saturating_sub(1)..=cx.min(w - 1)).all(|x| {
                        (cy.saturating_sub(1)..=cy.min(h - 1)).all(|y| fogged(x, y))
                    });
                    if all_fog { FOG } else { WALL }
                }
            };
            out.push(ch);
        }
        out.push('\n');
    }
    out
}

fn merge_sides(a: Option<Segment>, b: Option<Segment>) -> Segment {
    match (a, b) {
        (Some(a), Some(b)) => a.merge(b),
        (Some(s), None) | (None, Some(s)) => s,
        (None, None) => Segment::Fog,
    }
}

/// Renders what the agent knows. Path markers appear only once solved.
pub fn render_fog(knowledge: &KnowledgeMap, solved: bool) -> String {
    let dims = knowledge.dimensions();
    draw(
        dims,
        |at, dir| match knowledge.get(at).and_then(|r| r.known_wall(dir)) {
            Some(true) => Segment::Wall,
            Some(false) => Segment::Open,
            None => Segment::Fog,
        },
        |at| {
            if !knowledge.is_observed(at) {
                return Interior::Fog;
            }
            let (on_path, visited) = knowledge
                .get(at)
                .map(|r| (solved && r.path_member, r.visited))
                .unwrap_or((false, false));
            Interior::classify(dims, at, on_path, visited)
        },
    )
}

/// Aggregate counts over the final knowledge map.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExplorationStats {
    pub total: usize,
    pub observed: usize,
    pub scanned: usize,
    pub visited: usize,
    pub path: usize,
    pub sense_calls: usize,
    pub solved: bool,
}

impl ExplorationStats {
    pub fn collect(knowledge: &KnowledgeMap, sense_calls: usize, solved: bool) -> Self {
        Self {
            total: knowledge.dimensions().cell_count(),
            observed: knowledge.count_observed(Observation::Discovered),
            scanned: knowledge.count_observed(Observation::Scanned),
            visited: knowledge.visited_count(),
            path: knowledge.path_count(),
            sense_calls,
            solved,
        }
    }

    pub fn percent(&self, count: usize) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        count as f64 * 100.0 / self.total as f64
    }
}

impl fmt::Display for ExplorationStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Exploration Statistics ===")?;
        writeln!(f, "Total cells:    {}", self.total)?;
        for (name, count) in [
            ("Observed cells:", self.observed),
            ("Scanned cells: ", self.scanned),
            ("Visited cells: ", self.visited),
            ("Path cells:    ", self.path),
        ] {
            writeln!(f, "{} {} ({:.1}%)", name, count, self.percent(count))?;
        }
        writeln!(f, "Sense calls:    {}", self.sense_calls)?;
        write!(f, "Solved:         {}", if self.solved { "yes" } else { "no" })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dims(w: i64, h: i64) -> Dimensions {
        Dimensions::new(w, h).unwrap()
    }

    #[test]
    fn untouched_map_is_all_fog() {
        let km = KnowledgeMap::new(dims(3, 2));
        let text = render_fog(&km, false);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 5);
        for line in lines {
            assert_eq!(line.chars().count(), 7);
            assert!(line.chars().all(|c| c == FOG));
        }
    }

    #[test]
    fn unknown_segments_of_observed_cells_are_fogged() {
        let mut km = KnowledgeMap::new(dims(2, 1));
        let at = Coord::new(0, 0);
        km.observe(at, Observation::Scanned).unwrap();
        km.learn_wall(at, Direction::North, true).unwrap();
        km.learn_wall(at, Direction::West, true).unwrap();
        km.learn_wall(at, Direction::South, true).unwrap();
        km.learn_wall(at, Direction::East, false).unwrap();

        let text = render_fog(&km, false);
        let rows: Vec<Vec<char>> = text.lines().map(|l| l.chars().collect()).collect();
        assert_eq!(rows[1][1], START);
        assert_eq!(rows[1][0], WALL);
        assert_eq!(rows[1][2], PASSAGE);
        assert_eq!(rows[0][1], WALL);
        // goal cell is still unobserved
        assert_eq!(rows[1][3], FOG);
        assert_eq!(rows[1][4], FOG);
        assert_eq!(rows[0][4], FOG);
        assert_eq!(rows[0][2], WALL);
    }

    #[test]
    fn interior_priority_prefers_markers_in_order() {
        let d = dims(3, 1);
        let start = d.start();
        let goal = d.goal();
        let mid = Coord::new(1, 0);
        assert_eq!(Interior::classify(d, start, true, true), Interior::Start);
        assert_eq!(Interior::classify(d, goal, true, true), Interior::Goal);
        assert_eq!(Interior::classify(d, mid, true, true), Interior::Path);
        assert_eq!(Interior::classify(d, mid, false, true), Interior::Visited);
        assert_eq!(Interior::classify(d, mid, false, false), Interior::Blank);
    }

    #[test]
    fn path_markers_hidden_until_solved() {
        let mut km = KnowledgeMap::new(dims(3, 1));
        let mid = Coord::new(1, 0);
        km.observe(mid, Observation::Scanned).unwrap();
        km.mark_visited(mid).unwrap();
        km.mark_path(mid).unwrap();
        let row = |text: String| text.lines().nth(1).unwrap().chars().nth(3).unwrap();
        assert_eq!(row(render_fog(&km, false)), VISITED);
        assert_eq!(row(render_fog(&km, true)), PATH);
    }

    #[test]
    fn stats_report_percentages() {
        let mut km = KnowledgeMap::new(dims(2, 2));
        km.observe(Coord::new(0, 0), Observation::Scanned).unwrap();
        km.observe(Coord::new(1, 0), Observation::Discovered).unwrap();
        km.mark_visited(Coord::new(0, 0)).unwrap();
        let stats = ExplorationStats::collect(&km, 1, false);
        assert_eq!(stats.total, 4);
        assert_eq!(stats.observed, 2);
        assert_eq!(stats.scanned, 1);
        assert_eq!(stats.visited, 1);
        assert_eq!(stats.path, 0);
        assert!((stats.percent(stats.observed) - 50.0).abs() < f64::EPSILON);
        let text = stats.to_string();
        assert!(text.contains("Observed cells: 2 (50.0%)"));
        assert!(text.contains("Solved:         no"));
    }
}
