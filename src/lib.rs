pub mod consts;
pub mod error;

pub mod tuple;
pub mod matrix;
pub mod ray;

pub mod shape;
pub mod intersect;
pub mod light;
pub mod world;
pub mod camera;

pub mod color;
pub mod canvas;

pub mod render;
pub mod scene;

use consts::EPSILON;

/// Approximate float equality, used by every `PartialEq` in the crate.
pub fn feq(left: f64, right: f64) -> bool {
    (left - right).abs() < EPSILON
}
