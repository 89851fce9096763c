use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;
use log::debug;

use super::format::encode_png;
use super::json::{MANIFEST_FILE, manifest_json, sprite_png_filename};
use crate::cli::CompressionLevel;
use crate::error::SlicerError;
use crate::extract::{Extraction, SpriteExtractor};

/// Options for writing extracted sprites
#[derive(Debug, Clone, Copy, Default)]
pub struct WriteOptions<'a> {
    pub opaque: bool,
    pub compress: Option<CompressionLevel>,
    /// Sheet path recorded in the manifest; no manifest when `None`
    pub manifest_sheet: Option<&'a Path>,
}

/// Write one PNG per sprite (plus the optional manifest) into `output_dir`.
///
/// Everything is encoded before the directory is touched, so an encoding
/// failure leaves no files behind. Existing files with the same names are
/// overwritten. Returns the written paths in sprite order.
pub fn write_sprites(
    extraction: &Extraction,
    extractor: &SpriteExtractor,
    output_dir: &Path,
    options: WriteOptions<'_>,
) -> Result<Vec<PathBuf>> {
    let mut files: Vec<(PathBuf, Vec<u8>)> = Vec::with_capacity(extraction.sprites.len() + 1);
    for sprite in &extraction.sprites {
        let path = output_dir.join(sprite_png_filename(&sprite.name));
        let data = encode_png(&sprite.image, &path, options.opaque, options.compress)?;
        files.push((path, data));
    }

    if let Some(sheet) = options.manifest_sheet {
        let path = output_dir.join(MANIFEST_FILE);
        let content = manifest_json(extraction, extractor, sheet)?;
        files.push((path, content.into_bytes()));
    }

    fs::create_dir_all(output_dir).map_err(|e| SlicerError::OutputWrite {
        path: output_dir.to_path_buf(),
        source: e,
    })?;

    let mut written = Vec::with_capacity(files.len());
    for (path, data) in files {
        fs::write(&path, &data).map_err(|e| SlicerError::OutputWrite {
            path: path.clone(),
            source: e,
        })?;
        debug!("Wrote {} ({} bytes)", path.display(), data.len());
        written.push(path);
    }

    Ok(written)
}
