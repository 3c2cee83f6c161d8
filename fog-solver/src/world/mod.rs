//! Ground truth. Wall data is readable only inside this module tree: the
//! grid-backed sensor, the reference solver and the truth renderer.

mod grid;
mod reference;
mod sensor;
mod truth;

pub use grid::{Grid, GridCell};
pub use sensor::GridSensor;
pub use truth::{render_truth, PathOverlay};
