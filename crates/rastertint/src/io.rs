//! Decode and encode contracts between image files and pixel grids.

use std::fs;
use std::path::Path;

use image::{ColorType, ImageReader, RgbImage};
use log::info;

use crate::core::{Pixel, PixelGrid};

/// Errors produced at the image file boundary.
#[derive(thiserror::Error, Debug)]
pub enum ImageIoError {
    #[error("unsupported color layout {0:?}; expected 8-bit RGB or RGBA")]
    UnsupportedFormat(ColorType),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Image(#[from] image::ImageError),
}

/// Read an image file into a pixel grid, discarding any alpha channel.
///
/// Only 8-bit RGB and RGBA sources are accepted; anything else fails with
/// [`ImageIoError::UnsupportedFormat`].
pub fn decode(path: impl AsRef<Path>) -> Result<PixelGrid, ImageIoError> {
    let img = ImageReader::open(path)?.decode()?;
    info!(
        "decoded {}x{} image with layout {:?}",
        img.width(),
        img.height(),
        img.color()
    );

    match img.color() {
        ColorType::Rgb8 | ColorType::Rgba8 => {}
        other => return Err(ImageIoError::UnsupportedFormat(other)),
    }

    let rgb = img.to_rgb8();
    let width = rgb.width() as usize;
    let height = rgb.height() as usize;
    let mut grid = PixelGrid::new(width, height);
    for (x, y, p) in rgb.enumerate_pixels() {
        grid.set(x as usize, y as usize, Pixel::new(p[0], p[1], p[2]));
    }
    Ok(grid)
}

/// Write a grid as a lossless 8-bit RGB image.
///
/// The destination directory is created if absent; the format follows the
/// output extension.
pub fn encode(grid: &PixelGrid, path: impl AsRef<Path>) -> Result<(), ImageIoError> {
    let path = path.as_ref();
    if let Some(dir) = path.parent() {
        if !dir.as_os_str().is_empty() {
            fs::create_dir_all(dir)?;
        }
    }

    let img = RgbImage::from_fn(grid.width() as u32, grid.height() as u32, |x, y| {
        image::Rgb(grid.get(x as usize, y as usize).channels())
    });
    img.save(path)?;
    info!(
        "wrote {}x{} image to {}",
        grid.width(),
        grid.height(),
        path.display()
    );
    Ok(())
}
