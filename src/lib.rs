pub mod cli;
pub mod config;
pub mod detect;
pub mod error;
pub mod extract;
pub mod geometry;
pub mod output;

pub use cli::{BoundsPolicy, CliArgs, Command, CompressionLevel};
pub use detect::{BackgroundColor, BoundingBox, Grid, Mask, Segment};
pub use error::SlicerError;
pub use extract::{ExtractedSprite, Extraction, SpriteExtractor};
