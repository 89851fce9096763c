use serde::{Deserialize, Serialize};

use crate::detect::BackgroundColor;
use crate::extract::{
    DEFAULT_GRID, DEFAULT_HALF_SIZE, DEFAULT_MIN_SEGMENT, DEFAULT_NAMES, DEFAULT_THRESHOLD,
};

/// PNG compression level configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CompressConfig {
    /// Optimization level 0-6
    Level(u8),
    /// Maximum compression ("max")
    Max(String),
}

/// Slicer configuration file structure.
///
/// All paths in the config are relative to the config file location.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SlicerConfig {
    /// Config file version (currently 1)
    pub version: u32,
    /// Sprite sheet image
    pub input: String,
    /// Output directory for sprite images
    pub output_dir: String,
    /// Sheet background color as [r, g, b]
    pub background: BackgroundColor,
    /// Color distance above which a pixel counts as foreground
    pub threshold: u32,
    /// Shortest run kept as a row or column segment
    pub min_segment_length: u32,
    /// Half the side of each output square
    pub half_size: u32,
    /// Grid rows
    pub rows: usize,
    /// Grid columns
    pub cols: usize,
    /// Sprite names in row-major order
    pub names: Vec<String>,
    /// Crop bounds policy: "pad" or "error"
    pub bounds: String,
    /// Require exactly `rows` x `cols` segments
    pub strict_grid: bool,
    /// Output RGB instead of RGBA
    pub opaque: bool,
    /// PNG compression configuration (optional)
    pub compress: Option<CompressConfig>,
    /// Write sprites.json next to the images
    pub manifest: bool,
}

impl Default for SlicerConfig {
    fn default() -> Self {
        Self {
            version: 1,
            input: "public/sprites.png".to_string(),
            output_dir: "public/images".to_string(),
            background: BackgroundColor::default(),
            threshold: DEFAULT_THRESHOLD,
            min_segment_length: DEFAULT_MIN_SEGMENT,
            half_size: DEFAULT_HALF_SIZE,
            rows: DEFAULT_GRID,
            cols: DEFAULT_GRID,
            names: DEFAULT_NAMES.iter().map(|s| s.to_string()).collect(),
            bounds: "pad".to_string(),
            strict_grid: false,
            opaque: false,
            compress: None,
            manifest: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: SlicerConfig =
            serde_json::from_str(r#"{ "threshold": 12, "background": [0, 0, 0] }"#).unwrap();

        assert_eq!(config.threshold, 12);
        assert_eq!(config.background, BackgroundColor::new(0, 0, 0));
        assert_eq!(config.min_segment_length, 10);
        assert_eq!(config.half_size, 250);
        assert_eq!(config.names.len(), 9);
        assert_eq!(config.names[0], "seven");
        assert_eq!(config.bounds, "pad");
        assert!(config.compress.is_none());
    }

    #[test]
    fn test_compress_forms() {
        let level: SlicerConfig = serde_json::from_str(r#"{ "compress": 3 }"#).unwrap();
        assert!(matches!(level.compress, Some(CompressConfig::Level(3))));

        let max: SlicerConfig = serde_json::from_str(r#"{ "compress": "max" }"#).unwrap();
        assert!(matches!(max.compress, Some(CompressConfig::Max(ref s)) if s == "max"));
    }

    #[test]
    fn test_rejects_bad_background() {
        assert!(serde_json::from_str::<SlicerConfig>(r#"{ "background": [1, 2] }"#).is_err());
        assert!(serde_json::from_str::<SlicerConfig>(r#"{ "background": [1, 2, 300] }"#).is_err());
    }
}
