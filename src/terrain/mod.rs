//! Course terrain synthesis

pub mod cell;
pub mod course;
pub mod generator;
pub mod placement;
pub mod walk;

pub use cell::{Blockage, CellKind};
pub use course::{Course, CourseParams};
pub use generator::{synthesize_layers, TerrainLayers, TerrainParams};
pub use placement::place_tee_and_hole;
pub use walk::{loop_erased_random_walk, Direction};
