//! Course container and the top-level generation entry point.

use glam::IVec2;
use serde::{Deserialize, Serialize};

use crate::core::error::Error;
use crate::core::rng::GameRng;
use crate::field::grid::Grid;
use crate::terrain::cell::CellKind;
use crate::terrain::generator::{synthesize_layers, TerrainParams};
use crate::terrain::placement::place_tee_and_hole;

/// Parameters for course generation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CourseParams {
    pub width: usize,
    pub height: usize,
    /// Minimum tee/hole distance from the left/right board edges.
    pub edge_margin_x: i32,
    /// Minimum tee/hole distance from the top/bottom board edges.
    pub edge_margin_y: i32,
    pub terrain: TerrainParams,
}

impl Default for CourseParams {
    fn default() -> Self {
        Self {
            width: 25,
            height: 15,
            edge_margin_x: 1,
            edge_margin_y: 1,
            terrain: TerrainParams::default(),
        }
    }
}

/// A generated course: the classified grid plus tee and hole positions.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Course {
    width: usize,
    height: usize,
    layout: Grid<CellKind>,
    tee: IVec2,
    hole: IVec2,
}

impl Course {
    /// Generate a course from explicit parameters and a seeded engine.
    ///
    /// The engine is consumed in a fixed order — one child for placement,
    /// one for terrain synthesis — so the same parameters and seed always
    /// reproduce the same course.
    pub fn generate(params: &CourseParams, rng: &mut GameRng) -> Result<Course, Error> {
        let mut placement_rng = rng.derive();
        let (tee, hole) = place_tee_and_hole(
            params.width,
            params.height,
            params.edge_margin_x,
            params.edge_margin_y,
            &mut placement_rng,
        )?;
        log::debug!("tee at ({}, {}), hole at ({}, {})", tee.x, tee.y, hole.x, hole.y);

        let mut terrain_rng = rng.derive();
        let layers = synthesize_layers(
            params.width,
            params.height,
            tee,
            hole,
            &params.terrain,
            &mut terrain_rng,
        )?;

        Ok(Course {
            width: params.width,
            height: params.height,
            layout: layers.layout,
            tee,
            hole,
        })
    }

    /// Convenience wrapper: generate from a bare seed.
    pub fn from_seed(params: &CourseParams, seed: u64) -> Result<Course, Error> {
        Course::generate(params, &mut GameRng::seed_from_u64(seed))
    }

    /// Rebuild a course from stored parts, validating layout dimensions.
    pub fn from_parts(
        width: usize,
        height: usize,
        layout: Grid<CellKind>,
        tee: IVec2,
        hole: IVec2,
    ) -> Result<Course, Error> {
        if layout.width() != width || layout.height() != height {
            return Err(Error::DimensionMismatch {
                expected_width: width,
                expected_height: height,
                width: layout.width(),
                height: layout.height(),
            });
        }
        Ok(Course {
            width,
            height,
            layout,
            tee,
            hole,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn cell(&self, pos: IVec2) -> CellKind {
        *self.layout.at(pos)
    }

    pub fn layout(&self) -> &Grid<CellKind> {
        &self.layout
    }

    pub fn tee(&self) -> IVec2 {
        self.tee
    }

    pub fn hole(&self) -> IVec2 {
        self.hole
    }

    pub fn is_valid_position(&self, pos: IVec2) -> bool {
        self.layout.contains(pos)
    }

    /// ASCII rendering, one glyph per cell, origin at the bottom-left
    /// (y grows northwards). The tee prints as `t`.
    pub fn render_ascii(&self) -> String {
        let mut out = String::with_capacity((self.width + 1) * self.height);
        for y in (0..self.height).rev() {
            for x in 0..self.width {
                if self.tee == IVec2::new(x as i32, y as i32) {
                    out.push('t');
                } else {
                    out.push(self.layout.get(x, y).glyph());
                }
            }
            out.push('\n');
        }
        out
    }
}
