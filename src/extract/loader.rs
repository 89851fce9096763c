use std::path::Path;

use anyhow::Result;
use image::{ImageReader, RgbaImage};
use log::debug;

use crate::error::SlicerError;

/// Load a sprite sheet and convert it to RGBA8
pub fn load_sheet(path: &Path) -> Result<RgbaImage> {
    if !path.is_file() {
        return Err(SlicerError::InputNotFound(path.to_path_buf()).into());
    }

    let img = ImageReader::open(path)
        .map_err(|e| SlicerError::ImageLoad {
            path: path.to_path_buf(),
            source: e.into(),
        })?
        .with_guessed_format()
        .map_err(|e| SlicerError::ImageLoad {
            path: path.to_path_buf(),
            source: e.into(),
        })?
        .decode()
        .map_err(|e| SlicerError::ImageLoad {
            path: path.to_path_buf(),
            source: e,
        })?
        .into_rgba8();

    debug!(
        "Loaded sheet {} ({}x{})",
        path.display(),
        img.width(),
        img.height()
    );

    Ok(img)
}
