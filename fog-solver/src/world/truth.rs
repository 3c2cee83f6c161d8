use std::collections::HashSet;

use super::grid::Grid;
use crate::geometry::Coord;
use crate::presenter::{draw, Interior, Segment};

/// Which path to annotate on the full-truth view.
#[derive(Debug, Clone, Copy)]
pub enum PathOverlay<'a> {
    None,
    /// Path flags left by `Grid::solve_reference`.
    Reference,
    /// A path found by an agent.
    Discovered(&'a [Coord]),
}

/// Renders the real maze, ignoring what any agent knows. Comparison view
/// only; nothing here flows back into a knowledge map.
pub fn render_truth(grid: &Grid, overlay: PathOverlay<'_>) -> String {
    let dims = grid.dimensions();
    let discovered: HashSet<Coord> = match overlay {
        PathOverlay::Discovered(path) => path.iter().copied().collect(),
        _ => HashSet::new(),
    };
    let on_path = |at: Coord| match overlay {
        PathOverlay::None => false,
        PathOverlay::Reference => grid.is_reference_path(at),
        PathOverlay::Discovered(_) => discovered.contains(&at),
    };

    draw(
        dims,
        |at, dir| {
            if grid.is_open(at, dir) {
                Segment::Open
            } else {
                Segment::Wall
            }
        },
        |at| Interior::classify(dims, at, on_path(at), false),
    )
}
