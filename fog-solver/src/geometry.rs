use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::MazeError;

pub const DIRECTION_COUNT: usize = 4;

/// Cell coordinate. `y = 0` is the northern edge.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
pub struct Coord {
    pub x: usize,
    pub y: usize,
}

impl Coord {
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq)]
pub enum Direction {
    North = 0,
    East = 1,
    South = 2,
    West = 3,
}

impl Direction {
    /// Branching order used by every search in the crate.
    pub const ALL: [Direction; DIRECTION_COUNT] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn opposite(self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::East => Direction::West,
            Direction::South => Direction::North,
            Direction::West => Direction::East,
        }
    }

    fn delta(self) -> (isize, isize) {
        match self {
            Direction::North => (0, -1),
            Direction::East => (1, 0),
            Direction::South => (0, 1),
            Direction::West => (-1, 0),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Direction::North => "north",
            Direction::East => "east",
            Direction::South => "south",
            Direction::West => "west",
        };
        f.write_str(name)
    }
}

/// Validated grid size. Both sides are at least one cell and the cell count
/// fits in `usize`.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawDimensions")]
pub struct Dimensions {
    width: usize,
    height: usize,
}

#[derive(Deserialize)]
struct RawDimensions {
    width: i64,
    height: i64,
}

impl TryFrom<RawDimensions> for Dimensions {
    type Error = MazeError;

    fn try_from(raw: RawDimensions) -> Result<Self, Self::Error> {
        Dimensions::new(raw.width, raw.height)
    }
}

impl Dimensions {
    pub fn new(width: i64, height: i64) -> Result<Self, MazeError> {
        if width <= 0 || height <= 0 {
            return Err(MazeError::InvalidDimensions { width, height });
        }
        let invalid = || MazeError::InvalidDimensions { width, height };
        let w = usize::try_from(width).map_err(|_| invalid())?;
        let h = usize::try_from(height).map_err(|_| invalid())?;
        w.checked_mul(h).ok_or_else(invalid)?;
        Ok(Self { width: w, height: h })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn cell_count(&self) -> usize {
        self.width * self.height
    }

    pub fn contains(&self, at: Coord) -> bool {
        at.x < self.width && at.y < self.height
    }

    pub fn start(&self) -> Coord {
        Coord::new(0, 0)
    }

    pub fn goal(&self) -> Coord {
        Coord::new(self.width - 1, self.height - 1)
    }

    /// Row-major slot index, or `None` outside the grid.
    pub fn index_of(&self, at: Coord) -> Option<usize> {
        self.contains(at).then(|| at.y * self.width + at.x)
    }

    pub fn coord_of(&self, index: usize) -> Coord {
        Coord::new(index % self.width, index / self.width)
    }

    /// Neighbor one step in `dir`, if it stays inside the grid.
    pub fn neighbor(&self, at: Coord, dir: Direction) -> Option<Coord> {
        let (dx, dy) = dir.delta();
        let x = at.x.checked_add_signed(dx)?;
        let y = at.y.checked_add_signed(dy)?;
        let next = Coord::new(x, y);
        self.contains(next).then_some(next)
    }

    pub fn coords(&self) -> impl Iterator<Item = Coord> {
        let dims = *self;
        (0..dims.cell_count()).map(move |i| dims.coord_of(i))
    }
}
