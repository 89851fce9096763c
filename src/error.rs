use std::path::PathBuf;
use thiserror::Error;

use crate::detect::Axis;

#[derive(Error, Debug)]
pub enum SlicerError {
    #[error("Failed to load image '{path}': {source}")]
    ImageLoad {
        path: PathBuf,
        source: image::ImageError,
    },

    #[error("Failed to save image '{path}': {source}")]
    ImageSave {
        path: PathBuf,
        source: image::ImageError,
    },

    #[error("Input path does not exist: {0}")]
    InputNotFound(PathBuf),

    #[error(
        "No {axis} segments found; the sheet looks blank against the background color"
    )]
    DegenerateInput { axis: Axis },

    #[error("Expected {expected} {axis} segments but found {found}")]
    GridMismatch {
        axis: Axis,
        expected: usize,
        found: usize,
    },

    #[error(
        "Crop for sprite '{name}' at ({x}, {y}) with size {size} exceeds the {width}x{height} sheet"
    )]
    CropOutOfBounds {
        name: String,
        x: i64,
        y: i64,
        size: u32,
        width: u32,
        height: u32,
    },

    #[error("Sprite name list is empty")]
    NoNames,

    #[error("Sprite name '{0}' appears more than once")]
    DuplicateName(String),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Failed to write output file '{path}': {source}")]
    OutputWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to compress PNG '{path}': {message}")]
    PngCompress { path: PathBuf, message: String },
}
