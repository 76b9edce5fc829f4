//! Scalar fields and noise over 2D grids

pub mod blur;
pub mod grid;
pub mod noise;
pub mod scalar;

pub use grid::Grid;
pub use scalar::{FieldBuilder, ScalarField};
