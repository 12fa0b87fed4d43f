//! RGB to HSV conversion with every component in `[0, 1]`.

use crate::Pixel;

/// A color in HSV form; hue, saturation and value all lie in `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hsv {
    pub h: f64,
    pub s: f64,
    pub v: f64,
}

/// Convert an 8-bit RGB pixel to HSV.
///
/// Channels are scaled to `[0, 1]` before conversion; achromatic pixels
/// get hue 0.
pub fn rgb_to_hsv(pixel: Pixel) -> Hsv {
    let r = f64::from(pixel.r) / 255.0;
    let g = f64::from(pixel.g) / 255.0;
    let b = f64::from(pixel.b) / 255.0;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;

    let v = max;
    let s = if max > 0.0 { delta / max } else { 0.0 };
    let h = if delta <= 0.0 {
        0.0
    } else if max == r {
        ((g - b) / delta).rem_euclid(6.0) / 6.0
    } else if max == g {
        ((b - r) / delta + 2.0) / 6.0
    } else {
        ((r - g) / delta + 4.0) / 6.0
    };

    Hsv { h, s, v }
}

/// Convert HSV back to RGB channels in `[0, 1]`.
pub fn hsv_to_rgb(hsv: Hsv) -> [f64; 3] {
    let Hsv { h, s, v } = hsv;
    if s <= 0.0 {
        return [v, v, v];
    }

    let sector = (h * 6.0).rem_euclid(6.0);
    let i = sector.floor() as usize % 6;
    let f = sector - sector.floor();

    let p = v * (1.0 - s);
    let q = v * (1.0 - s * f);
    let t = v * (1.0 - s * (1.0 - f));

    match i {
        0 => [v, t, p],
        1 => [q, v, p],
        2 => [p, v, t],
        3 => [p, q, v],
        4 => [t, p, v],
        _ => [v, p, q],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn primary_colors_map_to_known_hues() {
        let red = rgb_to_hsv(Pixel::new(255, 0, 0));
        assert_relative_eq!(red.h, 0.0);
        assert_relative_eq!(red.s, 1.0);
        assert_relative_eq!(red.v, 1.0);

        let green = rgb_to_hsv(Pixel::new(0, 255, 0));
        assert_relative_eq!(green.h, 1.0 / 3.0, epsilon = 1e-12);

        let blue = rgb_to_hsv(Pixel::new(0, 0, 255));
        assert_relative_eq!(blue.h, 2.0 / 3.0, epsilon = 1e-12);
    }

    #[test]
    fn gray_is_achromatic() {
        let gray = rgb_to_hsv(Pixel::new(90, 90, 90));
        assert_relative_eq!(gray.h, 0.0);
        assert_relative_eq!(gray.s, 0.0);
        assert_relative_eq!(gray.v, 90.0 / 255.0, epsilon = 1e-12);
    }

    #[test]
    fn conversion_round_trips_within_quantization() {
        for pixel in [
            Pixel::new(12, 200, 56),
            Pixel::new(255, 128, 0),
            Pixel::new(7, 7, 250),
            Pixel::new(131, 45, 90),
        ] {
            let rgb = hsv_to_rgb(rgb_to_hsv(pixel));
            assert_relative_eq!(rgb[0] * 255.0, f64::from(pixel.r), epsilon = 1e-9);
            assert_relative_eq!(rgb[1] * 255.0, f64::from(pixel.g), epsilon = 1e-9);
            assert_relative_eq!(rgb[2] * 255.0, f64::from(pixel.b), epsilon = 1e-9);
        }
    }

    #[test]
    fn hue_stays_in_unit_range_for_all_sectors() {
        for pixel in [
            Pixel::new(255, 100, 0),
            Pixel::new(100, 255, 0),
            Pixel::new(0, 255, 100),
            Pixel::new(0, 100, 255),
            Pixel::new(100, 0, 255),
            Pixel::new(255, 0, 100),
        ] {
            let hsv = rgb_to_hsv(pixel);
            assert!((0.0..1.0).contains(&hsv.h), "hue {} out of range", hsv.h);
        }
    }
}
