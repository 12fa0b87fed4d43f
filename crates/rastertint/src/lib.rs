//! High-level facade for the rastertint workspace.
//!
//! This crate provides:
//! - a stable re-export of the algorithm crate as [`core`]
//! - (feature `image`) the decode/encode boundary between image files and
//!   pixel grids
//! - (feature `cli`) the `rastertint` binary
//!
//! ## Quickstart
//!
//! ```no_run
//! use rastertint::io::{decode, encode};
//! use rastertint::core::downsample;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let grid = decode("photo.png")?;
//! let small = downsample(&grid);
//! encode(&small, "output/small_photo.png")?;
//! # Ok(())
//! # }
//! ```

pub use rastertint_core as core;

pub use rastertint_core::{Palette, PaletteTable, Pixel, PixelGrid};

#[cfg(feature = "image")]
pub mod io;
