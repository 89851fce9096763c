use std::collections::HashSet;
use std::ffi::OsStr;
use std::path::Path;

use anyhow::Result;
use image::RgbaImage;
use log::{debug, info, warn};

use super::{ExtractedSprite, crop_window};
use crate::cli::BoundsPolicy;
use crate::detect::{BackgroundColor, Grid, Mask, Segment, find_segments};
use crate::error::SlicerError;

/// Sprite names of the reel symbol sheet, in row-major order
pub const DEFAULT_NAMES: [&str; 9] = [
    "seven",
    "star",
    "bell",
    "plum",
    "orange",
    "pear",
    "strawberry",
    "grapes",
    "watermelon",
];

pub const DEFAULT_THRESHOLD: u32 = 30;
pub const DEFAULT_MIN_SEGMENT: u32 = 10;
pub const DEFAULT_HALF_SIZE: u32 = 250;
pub const DEFAULT_GRID: usize = 3;
/// Largest accepted half size; output squares are at most 16384 pixels wide
pub const MAX_HALF_SIZE: u32 = 8192;

/// Segments found on a sheet before they are fitted to the grid
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Detection {
    pub width: u32,
    pub height: u32,
    /// Number of foreground pixels
    pub foreground: usize,
    pub rows: Vec<Segment>,
    pub columns: Vec<Segment>,
}

/// Result of a successful extraction
#[derive(Debug)]
pub struct Extraction {
    pub detection: Detection,
    /// Segments actually paired into boxes
    pub grid: Grid,
    /// Sprites in row-major order
    pub sprites: Vec<ExtractedSprite>,
}

/// Configuration for sprite extraction
#[derive(Debug, Clone)]
pub struct SpriteExtractor {
    pub background: BackgroundColor,
    pub threshold: u32,
    pub min_segment: u32,
    pub half_size: u32,
    pub rows: usize,
    pub columns: usize,
    pub names: Vec<String>,
    pub bounds: BoundsPolicy,
    pub strict_grid: bool,
}

impl Default for SpriteExtractor {
    fn default() -> Self {
        Self::new(DEFAULT_NAMES.iter().map(|s| s.to_string()).collect())
    }
}

impl SpriteExtractor {
    pub fn new(names: Vec<String>) -> Self {
        Self {
            background: BackgroundColor::default(),
            threshold: DEFAULT_THRESHOLD,
            min_segment: DEFAULT_MIN_SEGMENT,
            half_size: DEFAULT_HALF_SIZE,
            rows: DEFAULT_GRID,
            columns: DEFAULT_GRID,
            names,
            bounds: BoundsPolicy::Pad,
            strict_grid: false,
        }
    }

    pub fn background(mut self, background: BackgroundColor) -> Self {
        self.background = background;
        self
    }

    pub fn threshold(mut self, threshold: u32) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn min_segment(mut self, min_segment: u32) -> Self {
        self.min_segment = min_segment;
        self
    }

    pub fn half_size(mut self, half_size: u32) -> Self {
        self.half_size = half_size;
        self
    }

    pub fn grid(mut self, rows: usize, columns: usize) -> Self {
        self.rows = rows;
        self.columns = columns;
        self
    }

    pub fn bounds(mut self, bounds: BoundsPolicy) -> Self {
        self.bounds = bounds;
        self
    }

    pub fn strict_grid(mut self, strict: bool) -> Self {
        self.strict_grid = strict;
        self
    }

    /// Check parameters that would make extraction meaningless
    pub fn validate(&self) -> Result<(), SlicerError> {
        if self.names.is_empty() {
            return Err(SlicerError::NoNames);
        }
        let mut seen = HashSet::new();
        for name in &self.names {
            if name.is_empty() {
                return Err(SlicerError::InvalidParameter(
                    "sprite names must not be empty".to_string(),
                ));
            }
            if !is_plain_file_name(name) {
                return Err(SlicerError::InvalidParameter(format!(
                    "sprite name '{}' must be a plain file name",
                    name
                )));
            }
            if !seen.insert(name.as_str()) {
                return Err(SlicerError::DuplicateName(name.clone()));
            }
        }
        if self.half_size == 0 || self.half_size > MAX_HALF_SIZE {
            return Err(SlicerError::InvalidParameter(format!(
                "half size must be between 1 and {}, got {}",
                MAX_HALF_SIZE, self.half_size
            )));
        }
        if self.rows == 0 || self.columns == 0 {
            return Err(SlicerError::InvalidParameter(format!(
                "grid must have at least one row and column, got {}x{}",
                self.rows, self.columns
            )));
        }
        Ok(())
    }

    /// Mask the sheet and find row and column segments.
    pub fn detect(&self, image: &RgbaImage) -> Detection {
        let mask = Mask::from_image(image, self.background, self.threshold);
        let rows = find_segments(&mask.row_projection(), self.min_segment);
        let columns = find_segments(&mask.column_projection(), self.min_segment);

        debug!(
            "Mask has {} foreground pixels, {} row and {} column segments",
            mask.count(),
            rows.len(),
            columns.len()
        );

        Detection {
            width: mask.width(),
            height: mask.height(),
            foreground: mask.count(),
            rows,
            columns,
        }
    }

    /// Detect the sprite grid and crop every named sprite.
    ///
    /// Nothing is returned unless every sprite could be produced.
    pub fn extract(&self, image: &RgbaImage) -> Result<Extraction> {
        self.validate()?;

        let detection = self.detect(image);
        let grid = Grid::fit(
            detection.rows.clone(),
            detection.columns.clone(),
            self.rows,
            self.columns,
            self.strict_grid,
        )?;

        let box_count = grid.len();
        if box_count > self.names.len() {
            debug!(
                "Dropping {} boxes without a name",
                box_count - self.names.len()
            );
        } else if box_count < self.names.len() {
            warn!(
                "Only {} sprites detected; no sprite for: {}",
                box_count,
                self.names[box_count..].join(", ")
            );
        }

        let sprites = grid
            .boxes()
            .zip(&self.names)
            .map(|(bbox, name)| -> Result<ExtractedSprite, SlicerError> {
                let crop = bbox.crop_window(self.half_size);
                let image = crop_window(image, crop, self.bounds, name)?;
                let sprite = ExtractedSprite {
                    name: name.clone(),
                    row: bbox.row,
                    column: bbox.column,
                    bounds: bbox.bounds(),
                    crop,
                    image,
                };
                let (cx, cy) = sprite.center();
                debug!(
                    "Sprite '{}' at row {} column {}: centered on ({}, {}), {}x{}",
                    name,
                    bbox.row,
                    bbox.column,
                    cx,
                    cy,
                    sprite.width(),
                    sprite.height()
                );
                Ok(sprite)
            })
            .collect::<Result<Vec<_>, _>>()?;

        info!(
            "Extracted {} sprites from a {}x{} grid",
            sprites.len(),
            grid.rows.len(),
            grid.columns.len()
        );

        Ok(Extraction {
            detection,
            grid,
            sprites,
        })
    }
}

/// A single path component that is neither `.` nor `..`
fn is_plain_file_name(name: &str) -> bool {
    name != "."
        && name != ".."
        && !name.contains(['/', '\\'])
        && Path::new(name).file_name() == Some(OsStr::new(name))
}
