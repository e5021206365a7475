pub mod cli;
pub mod config;
pub mod display;
pub mod grid;
pub mod math;
pub mod traversal;

pub use grid::{CellState, Grid, GridError};
pub use math::{Axis, Ray, AABB};
pub use traversal::{DdaWalk, Termination, Traversal, TraversalStep, TraversalSummary};
