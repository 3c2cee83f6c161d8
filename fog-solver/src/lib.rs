pub mod error;
pub mod geometry;
pub mod knowledge;
pub mod navigator;
pub mod presenter;
pub mod sensor_trait;
pub mod session;
pub mod world;

mod random_test;

pub use error::MazeError;
pub use geometry::{Coord, Dimensions, Direction};
pub use knowledge::{BeliefRecord, KnowledgeMap, Observation};
pub use navigator::{Exploration, Navigator, Outcome, Step};
pub use presenter::{render_fog, ExplorationStats};
pub use sensor_trait::Sensor;
pub use session::{explore_grid, run_session, SessionConfig, SessionReport, SessionSummary};
pub use world::{render_truth, Grid, GridSensor, PathOverlay};
