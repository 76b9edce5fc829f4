//! Scalar-field algebra over 2D grids.
//!
//! Fields hold `f64` values, conventionally in [0, 1]. Operations may leave
//! that range transiently; `clamp` restores it. Every op consumes the field
//! and returns the transformed one, so chains never alias — `clone()` an
//! operand that is reused later.

use crate::core::rng::GameRng;
use crate::field::blur::gaussian_blur;
use crate::field::grid::Grid;
use crate::field::noise::{LoopyNoise2d, Noise2d, WarpNoise2d};

#[derive(Clone, Debug, PartialEq)]
pub struct ScalarField {
    grid: Grid<f64>,
}

impl ScalarField {
    pub fn from_grid(grid: Grid<f64>) -> Self {
        Self { grid }
    }

    pub fn from_fn(width: usize, height: usize, f: impl FnMut(usize, usize) -> f64) -> Self {
        Self {
            grid: Grid::from_fn(width, height, f),
        }
    }

    pub fn width(&self) -> usize {
        self.grid.width()
    }

    pub fn height(&self) -> usize {
        self.grid.height()
    }

    pub fn get(&self, x: usize, y: usize) -> f64 {
        *self.grid.get(x, y)
    }

    pub fn grid(&self) -> &Grid<f64> {
        &self.grid
    }

    /// Pointwise map.
    pub fn apply(mut self, f: impl Fn(f64) -> f64) -> Self {
        for v in self.grid.cells_mut() {
            *v = f(*v);
        }
        self
    }

    /// v -> v + amount
    pub fn shift(self, amount: f64) -> Self {
        self.apply(move |v| v + amount)
    }

    /// v -> center + (v - center) * factor
    pub fn scale(self, factor: f64, center: f64) -> Self {
        self.apply(move |v| center + (v - center) * factor)
    }

    /// Power-law remap of the deviation from `center`, normalized over
    /// `range`, with exponent exp(-amount): positive `amount` saturates
    /// in-range deviations toward the range boundary, negative draws them
    /// back toward the center.
    pub fn pinch(self, amount: f64, center: f64, range: f64) -> Self {
        let exponent = (-amount).exp();
        self.apply(move |v| {
            let adjusted = v - center;
            let sign = if adjusted < 0.0 { -1.0 } else { 1.0 };
            center + sign * (sign * adjusted / range).powf(exponent) * range
        })
    }

    /// v -> 1 - v (the [0, 1] convention's mirror)
    pub fn invert(self) -> Self {
        self.apply(|v| 1.0 - v)
    }

    pub fn clamp(self, lo: f64, hi: f64) -> Self {
        self.apply(move |v| v.clamp(lo, hi))
    }

    /// Replace with the Gaussian-blurred field.
    pub fn blur(self, sigma: f64) -> Self {
        Self {
            grid: gaussian_blur(&self.grid, sigma),
        }
    }

    /// Boolean mask of cells where the value reaches `value`.
    pub fn threshold(&self, value: f64) -> Grid<bool> {
        Grid::from_fn(self.width(), self.height(), |x, y| self.get(x, y) >= value)
    }
}

/// Builds fields of one fixed size, deriving one child engine per noise
/// layer so layer construction order is the only thing that matters for
/// reproducibility.
pub struct FieldBuilder<'a> {
    width: usize,
    height: usize,
    global_scale: f64,
    rng: &'a mut GameRng,
}

impl<'a> FieldBuilder<'a> {
    pub fn new(width: usize, height: usize, rng: &'a mut GameRng) -> Self {
        Self {
            width,
            height,
            global_scale: 1.0,
            rng,
        }
    }

    /// Multiplier applied to every noise-layer scale (and inversely to warp
    /// amounts, which are measured in cells).
    pub fn set_global_noise_scale(&mut self, scale: f64) {
        self.global_scale = scale;
    }

    pub fn from_fn(&self, f: impl FnMut(usize, usize) -> f64) -> ScalarField {
        ScalarField::from_fn(self.width, self.height, f)
    }

    /// Plain noise layer, remapped into [0, 1].
    pub fn noise(&mut self, scale: f64) -> ScalarField {
        let mut child = self.rng.derive();
        let noise = Noise2d::new(scale * self.global_scale, &mut child);
        self.sample(|x, y| noise.get(x, y))
    }

    /// Domain-warped noise layer, remapped into [0, 1].
    pub fn warp_noise(&mut self, scale: f64, warp_scale: f64, warp_amount: f64) -> ScalarField {
        let mut child = self.rng.derive();
        let noise = WarpNoise2d::new(
            scale * self.global_scale,
            warp_scale * self.global_scale,
            warp_amount / self.global_scale,
            &mut child,
        );
        self.sample(|x, y| noise.get(x, y))
    }

    /// Spiral-warped noise layer, remapped into [0, 1].
    pub fn loopy_noise(
        &mut self,
        scale: f64,
        warp_amount: f64,
        variance_scale: f64,
        variance_amount: f64,
        loop_scale: f64,
        loopiness: f64,
    ) -> ScalarField {
        let mut child = self.rng.derive();
        let noise = LoopyNoise2d::new(
            scale * self.global_scale,
            warp_amount / self.global_scale,
            variance_scale * self.global_scale,
            variance_amount / self.global_scale,
            loop_scale * self.global_scale,
            loopiness,
            &mut child,
        );
        self.sample(|x, y| noise.get(x, y))
    }

    fn sample(&self, f: impl Fn(f64, f64) -> f64) -> ScalarField {
        ScalarField::from_fn(self.width, self.height, |x, y| {
            0.5 * f(x as f64, y as f64) + 0.5
        })
    }

    /// Centered accumulation: center + sum(field - center).
    pub fn sum(&self, center: f64, fields: &[&ScalarField]) -> ScalarField {
        for field in fields {
            self.check_dims(field);
        }
        self.from_fn(|x, y| {
            center + fields.iter().map(|f| f.get(x, y) - center).sum::<f64>()
        })
    }

    /// Pointwise multiply — the [0, 1] convention's gating combinator.
    pub fn product(&self, fields: &[&ScalarField]) -> ScalarField {
        for field in fields {
            self.check_dims(field);
        }
        self.from_fn(|x, y| fields.iter().map(|f| f.get(x, y)).product::<f64>())
    }

    fn check_dims(&self, field: &ScalarField) {
        assert!(
            field.width() == self.width && field.height() == self.height,
            "field is {}x{}, expected {}x{}",
            field.width(),
            field.height(),
            self.width,
            self.height
        );
    }
}
