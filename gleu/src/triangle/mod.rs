//! Triangle sample: one white equilateral triangle centered at the origin

mod geometry;
mod triangle_view_controller;

pub use geometry::{equilateral_triangle, TRIANGLE_VERTICES};
pub use triangle_view_controller::{TriangleConfig, TriangleViewController};
