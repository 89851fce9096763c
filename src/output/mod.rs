mod format;
mod json;
mod writer;

pub use format::encode_png;
pub use json::{MANIFEST_FILE, manifest_json, sprite_png_filename};
pub use writer::{WriteOptions, write_sprites};
