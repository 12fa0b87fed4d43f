//! Factor-two resampling of pixel grids.

use crate::{Pixel, PixelGrid};

/// Shrink a grid to half resolution on both axes.
///
/// Each output pixel is the channel-wise mean of the 2x2 source block it
/// covers; a trailing odd row or column of the source is dropped.
pub fn downsample(src: &PixelGrid) -> PixelGrid {
    let width = src.width() / 2;
    let height = src.height() / 2;
    log::debug!(
        "downsample {}x{} -> {}x{}",
        src.width(),
        src.height(),
        width,
        height
    );

    let mut out = PixelGrid::new(width, height);
    for y in 0..height {
        for x in 0..width {
            let block = [
                src.get(2 * x, 2 * y),
                src.get(2 * x + 1, 2 * y),
                src.get(2 * x, 2 * y + 1),
                src.get(2 * x + 1, 2 * y + 1),
            ];
            out.set(x, y, Pixel::average_of(&block));
        }
    }
    out
}

/// Enlarge a grid to double resolution on both axes.
///
/// The output is built in three ordered passes: seed the odd/odd cells from
/// the source, fill the remaining cells of odd rows from their horizontal
/// neighbors, then fill the even rows from their vertical neighbors. Row 0
/// and column 0 are never reached by the fill passes and stay black; this
/// border gap is kept as-is from the original averaging scheme, so callers
/// that care about the border should crop one row and one column.
pub fn upsample(src: &PixelGrid) -> PixelGrid {
    let width = src.width() * 2;
    let height = src.height() * 2;
    log::debug!(
        "upsample {}x{} -> {}x{}",
        src.width(),
        src.height(),
        width,
        height
    );

    let mut out = PixelGrid::new(width, height);

    // Pass 1: spread the source pixels over four times the area.
    for y in (1..height).step_by(2) {
        for x in (1..width).step_by(2) {
            out.set(x, y, src.get(x / 2, y / 2));
        }
    }

    // Pass 2: on odd rows, fill the even columns from the seeded neighbors.
    for y in (1..height).step_by(2) {
        for x in (2..width).step_by(2) {
            let avg = Pixel::average_of(&[out.get(x - 1, y), out.get(x + 1, y)]);
            out.set(x, y, avg);
        }
    }

    // Pass 3: fill the even rows from the completed rows above and below.
    for y in (2..height).step_by(2) {
        for x in 1..width {
            let avg = Pixel::average_of(&[out.get(x, y - 1), out.get(x, y + 1)]);
            out.set(x, y, avg);
        }
    }

    out
}
