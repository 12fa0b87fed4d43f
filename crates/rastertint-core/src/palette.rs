//! Ordered reference palettes and nearest-color search.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::Pixel;

/// Errors produced by palette lookups and nearest-color search.
#[derive(thiserror::Error, Debug)]
pub enum PaletteError {
    #[error("palette contains no colors")]
    Empty,
    #[error("unknown palette name: {name}")]
    Unknown { name: String },
}

/// Errors produced when reading or writing palette table files.
#[derive(thiserror::Error, Debug)]
pub enum PaletteIoError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// An ordered list of reference colors.
///
/// Order matters: nearest-color ties resolve in favor of the earliest
/// entry.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Palette {
    colors: Vec<Pixel>,
}

impl Palette {
    pub fn new(colors: Vec<Pixel>) -> Self {
        Self { colors }
    }

    pub fn colors(&self) -> &[Pixel] {
        &self.colors
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// A copy of this palette with black and white appended as anchors.
    ///
    /// The scalar and hue tints operate on anchored palettes so that dark
    /// and bright pixels have a neutral target; the vector tint never does.
    pub fn with_anchors(&self) -> Palette {
        let mut colors = self.colors.clone();
        colors.push(Pixel::BLACK);
        colors.push(Pixel::WHITE);
        Palette { colors }
    }

    /// The first two entries, used as the vector-tint reference pair.
    pub fn primary_pair(&self) -> Option<(Pixel, Pixel)> {
        match self.colors.as_slice() {
            [a, b, ..] => Some((*a, *b)),
            _ => None,
        }
    }

    /// The entry minimizing squared Euclidean RGB distance to `pixel`.
    ///
    /// The scan replaces the current best only on strict improvement, so
    /// ties keep the earliest entry.
    pub fn nearest(&self, pixel: Pixel) -> Result<Pixel, PaletteError> {
        let mut best: Option<(Pixel, u32)> = None;
        for &candidate in &self.colors {
            let d = distance_sq(pixel, candidate);
            if best.map_or(true, |(_, best_d)| d < best_d) {
                best = Some((candidate, d));
            }
        }
        best.map(|(c, _)| c).ok_or(PaletteError::Empty)
    }
}

/// Squared Euclidean distance between two colors over the three channels.
#[inline]
pub fn distance_sq(a: Pixel, b: Pixel) -> u32 {
    let dr = i32::from(a.r) - i32::from(b.r);
    let dg = i32::from(a.g) - i32::from(b.g);
    let db = i32::from(a.b) - i32::from(b.b);
    (dr * dr + dg * dg + db * db) as u32
}

/// Immutable name-to-palette lookup.
///
/// Built once at startup and passed by reference into the tint stages.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PaletteTable {
    palettes: BTreeMap<String, Palette>,
}

impl PaletteTable {
    pub fn new(palettes: BTreeMap<String, Palette>) -> Self {
        Self { palettes }
    }

    /// The two-color team palettes shipped with the tool.
    pub fn builtin() -> Self {
        let teams: [(&str, [[u8; 3]; 2]); 12] = [
            ("Warriors", [[0, 107, 182], [255, 225, 76]]),
            ("Ducks", [[0, 121, 53], [254, 225, 35]]),
            ("49ers", [[175, 30, 44], [230, 190, 138]]),
            ("Kings", [[255, 255, 255], [178, 183, 187]]),
            ("Leafs", [[255, 255, 255], [1, 62, 127]]),
            ("Packers", [[23, 94, 34], [255, 184, 28]]),
            ("Vikings", [[84, 41, 109], [255, 184, 28]]),
            ("Giants", [[251, 91, 31], [255, 253, 208]]),
            ("RG", [[255, 0, 0], [0, 255, 0]]),
            ("GB", [[0, 255, 0], [0, 0, 255]]),
            ("BR", [[0, 0, 255], [255, 0, 0]]),
            ("RY", [[255, 0, 0], [255, 255, 0]]),
        ];

        let mut palettes = BTreeMap::new();
        for (name, [a, b]) in teams {
            let palette = Palette::new(vec![Pixel::from(a), Pixel::from(b)]);
            palettes.insert(name.to_string(), palette);
        }
        Self { palettes }
    }

    /// Registered palette names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.palettes.keys().map(String::as_str)
    }

    pub fn get(&self, name: &str) -> Result<&Palette, PaletteError> {
        self.palettes.get(name).ok_or_else(|| PaletteError::Unknown {
            name: name.to_string(),
        })
    }

    /// Load a palette table from a JSON file mapping names to color lists.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, PaletteIoError> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Write this table to disk as pretty JSON.
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), PaletteIoError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }
}
