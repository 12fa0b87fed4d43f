//! Palette tinting strategies: linear blend, hue substitution, and
//! vector-space projection.
//!
//! All three tinters mutate their grid in place, reading each pixel's
//! original value before writing its replacement. Preconditions (palette
//! contents, basis validity) are checked before the first pixel is
//! touched, so a failed tint never leaves a partially transformed grid.

use nalgebra::{Matrix3, Vector3};

use crate::hsv::{hsv_to_rgb, rgb_to_hsv, Hsv};
use crate::palette::{Palette, PaletteError};
use crate::{Pixel, PixelGrid};

/// Errors produced by the tinting stages.
#[derive(thiserror::Error, Debug)]
pub enum TintError {
    #[error(transparent)]
    Palette(#[from] PaletteError),
    #[error("reference colors are parallel or zero, basis matrix is singular")]
    DegenerateBasis,
}

/// Blends every pixel toward its nearest palette color.
///
/// `percent` is the blend strength in `[0, 1]`. Values outside that range
/// violate the contract: the blend is only guaranteed to stay within 8-bit
/// channel range for a convex combination.
pub struct ScalarTint {
    palette: Palette,
    percent: f64,
}

impl ScalarTint {
    /// The palette is used exactly as given; callers that want the usual
    /// black/white fallback targets should pass `palette.with_anchors()`.
    pub fn new(palette: &Palette, percent: f64) -> Self {
        debug_assert!(
            (0.0..=1.0).contains(&percent),
            "blend strength {percent} outside [0, 1]"
        );
        Self {
            palette: palette.clone(),
            percent,
        }
    }

    pub fn apply(&self, grid: &mut PixelGrid) -> Result<(), TintError> {
        self.apply_with_progress(grid, |_| {})
    }

    /// Tint in place; `on_row` fires after each completed row.
    pub fn apply_with_progress(
        &self,
        grid: &mut PixelGrid,
        mut on_row: impl FnMut(usize),
    ) -> Result<(), TintError> {
        if self.palette.is_empty() {
            return Err(PaletteError::Empty.into());
        }

        for y in 0..grid.height() {
            for x in 0..grid.width() {
                let old = grid.get(x, y);
                let target = self.palette.nearest(old)?;
                grid.set(x, y, blend(old, target, self.percent));
            }
            on_row(y);
        }
        Ok(())
    }
}

/// Per-channel blend: `new = old + floor(percent * (target - old))`.
///
/// Convex for `percent` in `[0, 1]`, so no clamping is needed.
fn blend(old: Pixel, target: Pixel, percent: f64) -> Pixel {
    let channel = |o: u8, t: u8| -> u8 {
        let delta = (percent * f64::from(i16::from(t) - i16::from(o))).floor() as i32;
        (i32::from(o) + delta) as u8
    };
    Pixel::new(
        channel(old.r, target.r),
        channel(old.g, target.g),
        channel(old.b, target.b),
    )
}

/// Replaces each pixel's hue with the nearest palette hue, keeping the
/// pixel's own saturation and value.
///
/// Hue distance is linear, not circular: hues near 0 and near 1 compare as
/// far apart even though they are neighbors on the hue ring. This matches
/// the original tool's matching rule.
pub struct HueTint {
    hues: Vec<Hsv>,
}

impl HueTint {
    /// Pre-converts the palette to HSV. As with [`ScalarTint`], anchors are
    /// the caller's choice via `with_anchors`.
    pub fn new(palette: &Palette) -> Self {
        let hues = palette.colors().iter().map(|&c| rgb_to_hsv(c)).collect();
        Self { hues }
    }

    pub fn apply(&self, grid: &mut PixelGrid) -> Result<(), TintError> {
        self.apply_with_progress(grid, |_| {})
    }

    /// Tint in place; `on_row` fires after each completed row.
    pub fn apply_with_progress(
        &self,
        grid: &mut PixelGrid,
        mut on_row: impl FnMut(usize),
    ) -> Result<(), TintError> {
        if self.hues.is_empty() {
            return Err(PaletteError::Empty.into());
        }

        for y in 0..grid.height() {
            for x in 0..grid.width() {
                let mut hsv = rgb_to_hsv(grid.get(x, y));
                hsv.h = self.nearest_hue(hsv.h);
                grid.set(x, y, quantize_unit(hsv_to_rgb(hsv)));
            }
            on_row(y);
        }
        Ok(())
    }

    /// Palette hue with the smallest absolute difference; ties keep the
    /// earliest entry.
    fn nearest_hue(&self, hue: f64) -> f64 {
        let mut best = hue;
        let mut best_diff = f64::INFINITY;
        for c in &self.hues {
            let diff = (c.h - hue).abs();
            if diff < best_diff {
                best = c.h;
                best_diff = diff;
            }
        }
        best
    }
}

/// Clamp unit-range channels and rescale to 8 bits, truncating.
fn quantize_unit(rgb: [f64; 3]) -> Pixel {
    let q = |c: f64| (255.0 * c.clamp(0.0, 1.0)) as u8;
    Pixel::new(q(rgb[0]), q(rgb[1]), q(rgb[2]))
}

/// Projects every pixel onto the color plane spanned by two reference
/// colors.
///
/// The basis columns are the two normalized reference colors plus their
/// cross product; a pixel is mapped into that basis, its out-of-plane
/// coordinate dropped, and the rest mapped back to RGB.
#[derive(Debug)]
pub struct VectorTint {
    forward: Matrix3<f64>,
    inverse: Matrix3<f64>,
}

impl VectorTint {
    /// Build the projection basis from two reference colors.
    ///
    /// Zero-length or parallel references leave no plane to project onto
    /// and fail with [`TintError::DegenerateBasis`] before any inversion
    /// is attempted.
    pub fn new(a: Pixel, b: Pixel) -> Result<Self, TintError> {
        let va = a.to_vector3();
        let vb = b.to_vector3();
        if va.norm() <= f64::EPSILON || vb.norm() <= f64::EPSILON {
            return Err(TintError::DegenerateBasis);
        }

        let u0 = va.normalize();
        let u1 = vb.normalize();
        let u2 = u0.cross(&u1);
        if u2.norm() <= 1e-9 {
            return Err(TintError::DegenerateBasis);
        }

        let forward = Matrix3::from_columns(&[u0, u1, u2]);
        let inverse = forward.try_inverse().ok_or(TintError::DegenerateBasis)?;
        log::debug!(
            "vector tint basis: u0 = ({:.4}, {:.4}, {:.4}), u1 = ({:.4}, {:.4}, {:.4})",
            u0[0],
            u0[1],
            u0[2],
            u1[0],
            u1[1],
            u1[2]
        );

        Ok(Self { forward, inverse })
    }

    pub fn apply(&self, grid: &mut PixelGrid) {
        self.apply_with_progress(grid, |_| {});
    }

    /// Tint in place; `on_row` fires after each completed row.
    pub fn apply_with_progress(&self, grid: &mut PixelGrid, mut on_row: impl FnMut(usize)) {
        for y in 0..grid.height() {
            for x in 0..grid.width() {
                grid.set(x, y, self.project(grid.get(x, y)));
            }
            on_row(y);
        }
    }

    /// Drop the out-of-plane coordinate and clamp back into 8-bit range.
    fn project(&self, pixel: Pixel) -> Pixel {
        let coords = self.inverse * pixel.to_vector3();
        let flat = self.forward * Vector3::new(coords[0], coords[1], 0.0);

        let q = |c: f64| c.clamp(0.0, 255.0) as u8;
        Pixel::new(q(flat[0]), q(flat[1]), q(flat[2]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_grid() -> PixelGrid {
        let pixels = vec![
            Pixel::new(10, 20, 30),
            Pixel::new(200, 40, 90),
            Pixel::new(0, 255, 0),
            Pixel::new(128, 128, 128),
        ];
        PixelGrid::from_pixels(2, 2, pixels)
    }

    #[test]
    fn scalar_tint_at_zero_is_identity() {
        let palette = Palette::new(vec![Pixel::new(255, 0, 0)]).with_anchors();
        let mut grid = test_grid();
        let before = grid.clone();

        ScalarTint::new(&palette, 0.0).apply(&mut grid).unwrap();
        assert_eq!(grid, before);
    }

    #[test]
    fn scalar_tint_at_one_snaps_to_nearest_palette_color() {
        let palette = Palette::new(vec![Pixel::new(255, 0, 0), Pixel::new(0, 255, 0)]);
        let mut grid = test_grid();

        ScalarTint::new(&palette, 1.0).apply(&mut grid).unwrap();
        for &p in grid.pixels() {
            assert!(palette.colors().contains(&p), "{p:?} not a palette color");
        }
        assert_eq!(grid.get(0, 1), Pixel::new(0, 255, 0));
    }

    #[test]
    fn scalar_tint_halfway_from_white_to_black_floors() {
        let palette = Palette::new(vec![Pixel::BLACK]);
        let mut grid = PixelGrid::from_pixels(1, 1, vec![Pixel::WHITE]);

        ScalarTint::new(&palette, 0.5).apply(&mut grid).unwrap();
        assert_eq!(grid.get(0, 0), Pixel::new(127, 127, 127));
    }

    #[test]
    fn scalar_tint_rejects_empty_palette_before_mutating() {
        let mut grid = test_grid();
        let before = grid.clone();

        let err = ScalarTint::new(&Palette::default(), 1.0)
            .apply(&mut grid)
            .unwrap_err();
        assert!(matches!(err, TintError::Palette(PaletteError::Empty)));
        assert_eq!(grid, before);
    }

    #[test]
    fn progress_fires_once_per_row() {
        let palette = Palette::new(vec![Pixel::BLACK]);
        let mut grid = PixelGrid::new(3, 5);
        let mut rows = Vec::new();

        ScalarTint::new(&palette, 1.0)
            .apply_with_progress(&mut grid, |row| rows.push(row))
            .unwrap();
        assert_eq!(rows, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn hue_tint_substitutes_the_nearest_hue() {
        // Pure red against a green-only palette becomes pure green: the hue
        // moves, saturation and value stay at 1.
        let palette = Palette::new(vec![Pixel::new(0, 255, 0)]);
        let mut grid = PixelGrid::from_pixels(1, 1, vec![Pixel::new(255, 0, 0)]);

        HueTint::new(&palette).apply(&mut grid).unwrap();
        assert_eq!(grid.get(0, 0), Pixel::new(0, 255, 0));
    }

    #[test]
    fn hue_tint_distance_is_linear_not_circular() {
        // Hue 0.95 sits next to red (hue 0) on the ring, but the linear
        // rule measures 0.95 vs 0.28 and picks blue.
        let palette = Palette::new(vec![Pixel::new(255, 0, 0), Pixel::new(0, 0, 255)]);
        let mut grid = PixelGrid::from_pixels(1, 1, vec![Pixel::new(255, 0, 76)]);

        HueTint::new(&palette).apply(&mut grid).unwrap();
        assert_eq!(grid.get(0, 0), Pixel::new(0, 0, 255));
    }

    #[test]
    fn hue_tint_keeps_saturation_and_value() {
        let palette = Palette::new(vec![Pixel::new(0, 255, 0)]);
        let mut grid = PixelGrid::from_pixels(1, 1, vec![Pixel::new(120, 60, 60)]);
        let before = rgb_to_hsv(grid.get(0, 0));

        HueTint::new(&palette).apply(&mut grid).unwrap();
        let after = rgb_to_hsv(grid.get(0, 0));
        assert!((after.s - before.s).abs() < 0.02);
        assert!((after.v - before.v).abs() < 0.02);
    }

    #[test]
    fn vector_tint_rejects_parallel_references() {
        let err = VectorTint::new(Pixel::new(1, 1, 1), Pixel::new(2, 2, 2)).unwrap_err();
        assert!(matches!(err, TintError::DegenerateBasis));
    }

    #[test]
    fn vector_tint_rejects_zero_references() {
        let err = VectorTint::new(Pixel::BLACK, Pixel::new(1, 2, 3)).unwrap_err();
        assert!(matches!(err, TintError::DegenerateBasis));
    }

    #[test]
    fn vector_tint_with_axis_references_zeroes_the_third_channel() {
        // Red and green span the r/g plane, so projection just drops blue.
        let tint = VectorTint::new(Pixel::new(255, 0, 0), Pixel::new(0, 255, 0)).unwrap();
        let mut grid = PixelGrid::from_pixels(1, 1, vec![Pixel::new(10, 20, 30)]);

        tint.apply(&mut grid);
        assert_eq!(grid.get(0, 0), Pixel::new(10, 20, 0));
    }

    #[test]
    fn vector_tint_output_lies_on_the_reference_plane() {
        let a = Pixel::new(0, 107, 182);
        let b = Pixel::new(255, 225, 76);
        let tint = VectorTint::new(a, b).unwrap();

        let mut grid = PixelGrid::from_pixels(1, 1, vec![Pixel::new(36, 82, 97)]);
        tint.apply(&mut grid);

        // Re-projecting the result must give a near-zero out-of-plane
        // coordinate; clamping and truncation allow a small residual.
        let coords = tint.inverse * grid.get(0, 0).to_vector3();
        assert!(coords[2].abs() < 2.0, "out-of-plane residual {}", coords[2]);
    }
}
