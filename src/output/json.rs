use std::path::Path;

use anyhow::Result;
use serde::Serialize;

use crate::detect::{BackgroundColor, Segment};
use crate::extract::{ExtractedSprite, Extraction, SpriteExtractor};
use crate::geometry::Rect;

pub const MANIFEST_FILE: &str = "sprites.json";

#[derive(Serialize)]
struct Manifest<'a> {
    meta: Meta,
    rows: &'a [Segment],
    columns: &'a [Segment],
    sprites: Vec<JsonSprite<'a>>,
}

#[derive(Serialize)]
struct Meta {
    app: &'static str,
    version: &'static str,
    sheet: String,
    size: Size,
    background: BackgroundColor,
    threshold: u32,
    min_segment_length: u32,
    half_size: u32,
    bounds: &'static str,
}

#[derive(Serialize)]
struct Size {
    w: u32,
    h: u32,
}

#[derive(Serialize)]
struct JsonSprite<'a> {
    name: &'a str,
    image: String,
    row: usize,
    column: usize,
    bounds: Rect,
    crop: Rect,
}

/// Render the manifest describing every sprite of an extraction
pub fn manifest_json(
    extraction: &Extraction,
    extractor: &SpriteExtractor,
    sheet: &Path,
) -> Result<String> {
    let manifest = Manifest {
        meta: Meta {
            app: "sheetslice",
            version: env!("CARGO_PKG_VERSION"),
            sheet: sheet.to_string_lossy().into_owned(),
            size: Size {
                w: extraction.detection.width,
                h: extraction.detection.height,
            },
            background: extractor.background,
            threshold: extractor.threshold,
            min_segment_length: extractor.min_segment,
            half_size: extractor.half_size,
            bounds: extractor.bounds.as_str(),
        },
        rows: &extraction.grid.rows,
        columns: &extraction.grid.columns,
        sprites: extraction.sprites.iter().map(sprite_to_json).collect(),
    };

    Ok(serde_json::to_string_pretty(&manifest)?)
}

fn sprite_to_json(sprite: &ExtractedSprite) -> JsonSprite<'_> {
    JsonSprite {
        name: &sprite.name,
        image: sprite_png_filename(&sprite.name),
        row: sprite.row,
        column: sprite.column,
        bounds: sprite.bounds,
        crop: sprite.crop,
    }
}

/// File name of a sprite image
pub fn sprite_png_filename(name: &str) -> String {
    format!("{}.png", name)
}
