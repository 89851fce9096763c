mod crop;
mod extractor;
mod loader;
mod sprite;

pub use crop::crop_window;
pub use extractor::{
    DEFAULT_GRID, DEFAULT_HALF_SIZE, DEFAULT_MIN_SEGMENT, DEFAULT_NAMES, DEFAULT_THRESHOLD,
    Detection, Extraction, SpriteExtractor,
};
pub use loader::load_sheet;
pub use sprite::ExtractedSprite;
