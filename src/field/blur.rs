//! Separable Gaussian blur over scalar grids.

use crate::field::grid::Grid;

/// Build a normalized 1D Gaussian kernel for `sigma`.
///
/// Radius is cut off at 3 sigma, where the remaining tail weight is
/// negligible for field work.
fn kernel(sigma: f64) -> Vec<f64> {
    assert!(sigma > 0.0, "blur sigma must be positive");
    let radius = (3.0 * sigma).ceil().max(1.0) as i64;
    let mut weights = Vec::with_capacity((2 * radius + 1) as usize);
    for i in -radius..=radius {
        let t = i as f64 / sigma;
        weights.push((-0.5 * t * t).exp());
    }
    let total: f64 = weights.iter().sum();
    for w in &mut weights {
        *w /= total;
    }
    weights
}

/// Blur rows then columns with a Gaussian kernel.
///
/// Edge cells renormalize the kernel over the in-bounds taps only, so a
/// constant field blurs to itself everywhere. Zero-padding instead would
/// darken values toward the border and bias every downstream threshold.
pub fn gaussian_blur(grid: &Grid<f64>, sigma: f64) -> Grid<f64> {
    let weights = kernel(sigma);
    let rows = blur_axis(grid, &weights, true);
    blur_axis(&rows, &weights, false)
}

fn blur_axis(grid: &Grid<f64>, weights: &[f64], horizontal: bool) -> Grid<f64> {
    let radius = (weights.len() / 2) as i64;
    let width = grid.width() as i64;
    let height = grid.height() as i64;
    Grid::from_fn(grid.width(), grid.height(), |x, y| {
        let mut value = 0.0;
        let mut coverage = 0.0;
        for (i, w) in weights.iter().enumerate() {
            let offset = i as i64 - radius;
            let (sx, sy) = if horizontal {
                (x as i64 + offset, y as i64)
            } else {
                (x as i64, y as i64 + offset)
            };
            if sx < 0 || sy < 0 || sx >= width || sy >= height {
                continue;
            }
            value += w * grid.get(sx as usize, sy as usize);
            coverage += w;
        }
        value / coverage
    })
}
