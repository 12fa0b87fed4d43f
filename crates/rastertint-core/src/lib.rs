//! Pixel-grid resampling and palette tinting.
//!
//! This crate holds the numerical core: factor-two resampling and three
//! tinting strategies (linear blend, hue substitution, vector-space
//! projection) over dense 8-bit RGB grids. Image file decoding/encoding
//! and the command line live in the `rastertint` facade crate.

mod grid;
mod hsv;
mod logger;
mod palette;
mod resample;
mod tint;

pub use grid::{Pixel, PixelGrid};
pub use hsv::{hsv_to_rgb, rgb_to_hsv, Hsv};
pub use logger::init_with_level;
pub use palette::{distance_sq, Palette, PaletteError, PaletteIoError, PaletteTable};
pub use resample::{downsample, upsample};
pub use tint::{HueTint, ScalarTint, TintError, VectorTint};
