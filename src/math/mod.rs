mod aabb;
mod axis;
mod grid;
mod ray;

pub use aabb::AABB;
pub use axis::Axis;
pub use grid::world_to_cell;
pub use ray::Ray;
