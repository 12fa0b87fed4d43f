use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

/// An 8-bit RGB color triple.
///
/// Serializes as a `[r, g, b]` array so palette files read naturally.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(from = "[u8; 3]", into = "[u8; 3]")]
pub struct Pixel {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Pixel {
    pub const BLACK: Pixel = Pixel::new(0, 0, 0);
    pub const WHITE: Pixel = Pixel::new(255, 255, 255);

    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    #[inline]
    pub fn channels(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    /// The pixel as a real 3-vector in RGB space.
    #[inline]
    pub fn to_vector3(self) -> Vector3<f64> {
        Vector3::new(f64::from(self.r), f64::from(self.g), f64::from(self.b))
    }

    /// Channel-wise integer mean of a set of colors, truncating.
    ///
    /// Each output channel lies within the min/max of the inputs'
    /// corresponding channel. Averaging zero colors is a caller bug.
    pub fn average_of(colors: &[Pixel]) -> Pixel {
        debug_assert!(!colors.is_empty(), "average of zero colors");
        if colors.is_empty() {
            return Pixel::BLACK;
        }

        let mut sum = [0u32; 3];
        for c in colors {
            sum[0] += u32::from(c.r);
            sum[1] += u32::from(c.g);
            sum[2] += u32::from(c.b);
        }
        let n = colors.len() as u32;
        Pixel::new((sum[0] / n) as u8, (sum[1] / n) as u8, (sum[2] / n) as u8)
    }
}

impl From<[u8; 3]> for Pixel {
    fn from(c: [u8; 3]) -> Self {
        Self::new(c[0], c[1], c[2])
    }
}

impl From<Pixel> for [u8; 3] {
    fn from(p: Pixel) -> Self {
        p.channels()
    }
}

/// A fixed-size 2D array of pixels indexed by `(x, y)`.
///
/// `x` runs over `[0, width)` and `y` over `[0, height)`; both dimensions
/// are fixed for the grid's lifetime. Storage is row-major.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PixelGrid {
    width: usize,
    height: usize,
    data: Vec<Pixel>,
}

impl PixelGrid {
    /// An all-black grid of the given dimensions.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            data: vec![Pixel::BLACK; width * height],
        }
    }

    /// Wrap a row-major pixel buffer. `data.len()` must be `width * height`.
    pub fn from_pixels(width: usize, height: usize, data: Vec<Pixel>) -> Self {
        assert_eq!(data.len(), width * height, "pixel buffer length mismatch");
        Self {
            width,
            height,
            data,
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Pixel {
        self.data[y * self.width + x]
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, pixel: Pixel) {
        self.data[y * self.width + x] = pixel;
    }

    /// Row-major view of the underlying pixels.
    pub fn pixels(&self) -> &[Pixel] {
        &self.data
    }

    /// A new grid with the axes swapped: `out.get(y, x) == self.get(x, y)`.
    pub fn transposed(&self) -> PixelGrid {
        let mut out = PixelGrid::new(self.height, self.width);
        for y in 0..self.height {
            for x in 0..self.width {
                out.set(y, x, self.get(x, y));
            }
        }
        out
    }
}
