//! Terrain layer synthesis.
//!
//! Composes the path walk, edge proximity, and layered noise into
//! thresholded terrain masks and the final per-cell classification. Stage
//! order is fixed: the walk consumes one derived engine, then every noise
//! layer derives one child in a fixed sequence. Reordering any stage
//! changes the course a seed produces.

use glam::IVec2;
use serde::{Deserialize, Serialize};

use crate::core::error::Error;
use crate::core::rng::GameRng;
use crate::field::grid::Grid;
use crate::field::scalar::{FieldBuilder, ScalarField};
use crate::terrain::cell::CellKind;
use crate::terrain::walk::loop_erased_random_walk;

/// Tunable synthesis parameters.
///
/// The defaults are the values the layer constants were calibrated
/// against; they are exposed for experimentation rather than as a stable
/// contract.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TerrainParams {
    /// Width of the hazard-suppression band along each board edge, in cells.
    pub edge_falloff: i32,
    /// Falloff curve exponent within the edge band.
    pub edge_falloff_exponent: f64,
    /// Steps the walk trails behind its head before marking its region.
    pub mark_delay: usize,
    /// Steps the walk unwinds after running off the board.
    pub edge_backtrack: usize,
    /// Multiplier applied to every noise-layer scale.
    pub global_noise_scale: f64,
}

impl Default for TerrainParams {
    fn default() -> Self {
        Self {
            edge_falloff: 3,
            edge_falloff_exponent: 0.85,
            mark_delay: 1,
            edge_backtrack: 2,
            global_noise_scale: 1.0,
        }
    }
}

/// Sigma of the blur that softens the raw path and ends stamps.
const STAMP_BLUR_SIGMA: f64 = 1.7;

/// Decaying protection weights stamped along the first and last path steps.
const END_WEIGHTS: [f64; 6] = [1.5, 1.0, 0.85, 0.7, 0.5, 0.3];

/// Every intermediate product of a synthesis run.
///
/// `layout` is the gameplay result; the scalar fields and masks are kept
/// as a diagnostic surface for tuning and visual inspection.
pub struct TerrainLayers {
    /// The walk's route from tee to hole.
    pub path: Vec<IVec2>,
    /// Edge-proximity attenuation, 1 in the interior.
    pub edge: ScalarField,
    /// Blurred path density.
    pub path_density: ScalarField,
    /// Blurred tee/hole protection.
    pub ends: ScalarField,
    /// Land likelihood; its inverse thresholds into water.
    pub land: ScalarField,
    /// Fairway likelihood prior to thresholding.
    pub fairway_value: ScalarField,
    pub water: Grid<bool>,
    pub fairway: Grid<bool>,
    pub rock: Grid<bool>,
    pub tree: Grid<bool>,
    pub sand: Grid<bool>,
    /// Final classification, one kind per cell.
    pub layout: Grid<CellKind>,
}

/// Synthesize all terrain layers for a board with known tee and hole.
pub fn synthesize_layers(
    width: usize,
    height: usize,
    tee: IVec2,
    hole: IVec2,
    params: &TerrainParams,
    rng: &mut GameRng,
) -> Result<TerrainLayers, Error> {
    let mut walk_rng = rng.derive();
    let path = loop_erased_random_walk(
        width,
        height,
        tee,
        hole,
        params.mark_delay,
        params.edge_backtrack,
        &mut walk_rng,
    )?;
    log::debug!("fairway path has {} steps", path.len());

    // Stamp the route and its protected ends, then soften both with a blur.
    let mut raw_path = Grid::new(width, height, 0.0_f64);
    for pos in &path {
        raw_path.set(pos.x as usize, pos.y as usize, 1.0);
    }

    let mut raw_ends = Grid::new(width, height, 0.0_f64);
    for offset in [IVec2::NEG_X, IVec2::X, IVec2::NEG_Y, IVec2::Y] {
        let cell = hole + offset;
        if raw_ends.contains(cell) {
            raw_ends.set(cell.x as usize, cell.y as usize, 0.65);
        }
    }
    for offset in [IVec2::NEG_X, IVec2::X, IVec2::NEG_Y, IVec2::Y] {
        let cell = tee + offset;
        if raw_ends.contains(cell) && *raw_ends.get(cell.x as usize, cell.y as usize) == 0.0 {
            raw_ends.set(cell.x as usize, cell.y as usize, 0.45);
        }
    }
    for (i, weight) in END_WEIGHTS.iter().enumerate() {
        if let Some(step) = path.get(i) {
            let v = *raw_ends.get(step.x as usize, step.y as usize);
            raw_ends.set(step.x as usize, step.y as usize, v + weight);
        }
        if let Some(step) = path.len().checked_sub(1 + i).map(|j| path[j]) {
            let v = *raw_ends.get(step.x as usize, step.y as usize);
            raw_ends.set(step.x as usize, step.y as usize, v + weight);
        }
    }

    let path_density = ScalarField::from_grid(raw_path)
        .blur(STAMP_BLUR_SIGMA)
        .scale(3.0, 0.0)
        .clamp(0.0, 1.0);
    let ends = ScalarField::from_grid(raw_ends)
        .blur(STAMP_BLUR_SIGMA)
        .scale(4.5, 0.0)
        .clamp(0.0, 1.0);

    // Deterministic attenuation toward the board border: each near-edge
    // axis contributes a power-law factor below 1.
    let band = params.edge_falloff as f64;
    let exponent = params.edge_falloff_exponent;
    let edge = ScalarField::from_fn(width, height, |x, y| {
        let mut proximity = 1.0;
        for dist in [
            x as f64,
            (width - 1 - x) as f64,
            y as f64,
            (height - 1 - y) as f64,
        ] {
            if dist < band {
                proximity *= ((dist + 1.5) / (band + 1.5)).powf(exponent);
            }
        }
        proximity
    });

    let mut builder = FieldBuilder::new(width, height, rng);
    builder.set_global_noise_scale(params.global_noise_scale);

    // Land: warped noise shaped by the edge band, with the route and its
    // ends carved back in so the ball always has ground under it. Water is
    // wherever land falls away.
    let land_noise = builder.warp_noise(10.0, 10.0, 2.5);
    let edge_shaped = edge.clone().pinch(0.2, 1.0, 1.0);
    let land_core = builder.product(&[&land_noise, &edge_shaped]).invert();
    let ends_guard = ends.clone().invert();
    let path_guard = path_density.clone().scale(0.08, 0.0).invert();
    let land = builder
        .product(&[&land_core, &ends_guard, &path_guard])
        .invert()
        .pinch(-0.2, 1.0, 1.0);
    let water = land.clone().invert().threshold(0.6);

    // Fairway: warped noise gated by land, with the tee/hole surroundings
    // pulled strongly toward fairway.
    let fairway_noise = builder.warp_noise(10.0, 8.0, 3.0);
    let fairway_base = builder.sum(0.5, &[&fairway_noise]);
    let fairway_land_gate = land.clone().scale(0.85, 0.0).shift(0.125).clamp(0.0, 1.0);
    let fairway_core = builder.product(&[&fairway_base, &fairway_land_gate]).invert();
    let fairway_ends_gate = ends.clone().scale(3.5, 1.0).clamp(0.0, 1.0).invert();
    let fairway_value = builder.product(&[&fairway_core, &fairway_ends_gate]).invert();
    let fairway = fairway_value.threshold(0.5);

    // Rocks: swirled noise clusters, kept off the route and its ends.
    let rock_loopy = builder
        .loopy_noise(13.0, 4.0, 10.0, 4.0, 8.0, 0.025)
        .scale(1.0, 0.5);
    let rock_warp = builder.warp_noise(7.0, 10.0, 1.0).scale(0.0, 0.5);
    let rock_base = builder.sum(0.5, &[&rock_loopy, &rock_warp]);
    let rock_land_gate = land.clone().scale(1.4, 0.0).shift(0.2).clamp(0.0, 1.0);
    let rock_path_gate = path_density
        .clone()
        .pinch(-0.2, 1.0, 0.2)
        .clamp(0.0, 1.0)
        .scale(0.8, 0.0)
        .invert();
    let rock_ends_gate = ends.clone().scale(2.0, 1.0).clamp(0.0, 1.0).invert();
    let rock_value = builder.product(&[&rock_base, &rock_land_gate, &rock_path_gate, &rock_ends_gate]);
    let rock = rock_value.threshold(0.575);

    // Trees: three noise scales summed, avoiding fairway and the ends.
    let tree_coarse = builder.warp_noise(10.0, 15.0, 2.5).scale(0.15, 0.5);
    let tree_mid = builder.warp_noise(7.0, 10.0, 2.0).scale(0.5, 0.5);
    let tree_fine = builder.warp_noise(3.0, 8.0, 2.0).scale(1.0, 0.5);
    let tree_base = builder.sum(0.5, &[&tree_coarse, &tree_mid, &tree_fine]);
    let tree_land_gate = land.clone().scale(1.5, 0.0).shift(0.225).clamp(0.0, 1.0);
    let tree_ends_gate = ends.clone().scale(2.0, 1.0).clamp(0.0, 1.0).invert();
    let tree_fairway_gate = fairway_value.clone().scale(3.0, 1.0).clamp(0.0, 1.0).invert();
    let tree_value = builder.product(&[&tree_base, &tree_land_gate, &tree_ends_gate, &tree_fairway_gate]);
    let tree = tree_value.threshold(0.65);

    // Sand: plain noise pockets, pushed away from water.
    let sand_noise = builder.noise(8.0).scale(1.0, 0.5);
    let sand_base = builder.sum(0.5, &[&sand_noise]);
    let sand_water_avoidance = land.clone().invert().scale(2.0, 0.0).shift(0.125).clamp(0.0, 1.0);
    let sand_value = builder.product(&[&sand_base, &sand_water_avoidance]);
    let sand = sand_value.threshold(0.725);

    let layout = Grid::from_fn(width, height, |x, y| {
        if hole.x as usize == x && hole.y as usize == y {
            CellKind::Hole
        } else if *water.get(x, y) {
            CellKind::Water
        } else if *rock.get(x, y) {
            CellKind::Rock
        } else if *tree.get(x, y) {
            CellKind::Tree
        } else if *sand.get(x, y) {
            CellKind::Sand
        } else if *fairway.get(x, y) {
            CellKind::Fairway
        } else {
            CellKind::Rough
        }
    });

    Ok(TerrainLayers {
        path,
        edge,
        path_density,
        ends,
        land,
        fairway_value,
        water,
        fairway,
        rock,
        tree,
        sand,
        layout,
    })
}
