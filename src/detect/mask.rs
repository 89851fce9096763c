use std::fmt;
use std::str::FromStr;

use image::RgbaImage;
use serde::{Deserialize, Serialize};

/// Reference background color of a sprite sheet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BackgroundColor(pub [u8; 3]);

impl BackgroundColor {
    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self([r, g, b])
    }

    /// Sum of absolute per-channel differences against an RGB sample
    pub fn distance(&self, rgb: [u8; 3]) -> u32 {
        self.0
            .iter()
            .zip(rgb)
            .map(|(&bg, c)| u32::from(bg.abs_diff(c)))
            .sum()
    }
}

impl Default for BackgroundColor {
    fn default() -> Self {
        Self([254, 254, 254])
    }
}

impl fmt::Display for BackgroundColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [r, g, b] = self.0;
        write!(f, "{},{},{}", r, g, b)
    }
}

/// Accepts `R,G,B` decimal triples or `#rrggbb` hex
impl FromStr for BackgroundColor {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Some(hex) = s.strip_prefix('#') {
            if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
                return Err(format!("invalid hex color: {}", s));
            }
            let channel = |i: usize| {
                u8::from_str_radix(&hex[i..i + 2], 16)
                    .map_err(|_e| format!("invalid hex color: {}", s))
            };
            return Ok(Self([channel(0)?, channel(2)?, channel(4)?]));
        }

        let parts: Vec<&str> = s.split(',').map(str::trim).collect();
        if parts.len() != 3 {
            return Err(format!("expected R,G,B or #rrggbb, got {}", s));
        }
        let mut rgb = [0u8; 3];
        for (slot, part) in rgb.iter_mut().zip(&parts) {
            *slot = part
                .parse::<u8>()
                .map_err(|_e| format!("color channel must be 0-255, got {}", part))?;
        }
        Ok(Self(rgb))
    }
}

/// Per-pixel foreground classification of a sheet
#[derive(Debug, Clone)]
pub struct Mask {
    width: u32,
    height: u32,
    bits: Vec<bool>,
}

impl Mask {
    /// Mark every pixel whose color distance from `background` exceeds `threshold`.
    ///
    /// Only the RGB channels are compared; alpha is ignored.
    pub fn from_image(image: &RgbaImage, background: BackgroundColor, threshold: u32) -> Self {
        let (width, height) = image.dimensions();
        let bits = image
            .pixels()
            .map(|p| background.distance([p[0], p[1], p[2]]) > threshold)
            .collect();

        Self {
            width,
            height,
            bits,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    #[cfg(test)]
    pub fn is_foreground(&self, x: u32, y: u32) -> bool {
        self.bits[y as usize * self.width as usize + x as usize]
    }

    /// Number of foreground pixels
    pub fn count(&self) -> usize {
        self.bits.iter().filter(|&&b| b).count()
    }

    /// One entry per row, `true` if the row holds any foreground pixel
    pub fn row_projection(&self) -> Vec<bool> {
        if self.width == 0 {
            return vec![false; self.height as usize];
        }
        self.bits
            .chunks(self.width as usize)
            .map(|row| row.iter().any(|&b| b))
            .collect()
    }

    /// One entry per column, `true` if the column holds any foreground pixel
    pub fn column_projection(&self) -> Vec<bool> {
        let mut projection = vec![false; self.width as usize];
        if self.width == 0 {
            return projection;
        }
        for row in self.bits.chunks(self.width as usize) {
            for (active, &b) in projection.iter_mut().zip(row) {
                *active |= b;
            }
        }
        projection
    }
}
