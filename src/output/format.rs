use std::io::Cursor;
use std::path::Path;

use anyhow::Result;
use image::{DynamicImage, ImageFormat, RgbImage, RgbaImage};

use crate::cli::CompressionLevel;
use crate::error::SlicerError;

/// Encode a sprite as PNG bytes, optionally with compression.
///
/// `path` is only used for error messages; nothing is written here.
pub fn encode_png(
    image: &RgbaImage,
    path: &Path,
    opaque: bool,
    compress: Option<CompressionLevel>,
) -> Result<Vec<u8>> {
    let mut png_data = Cursor::new(Vec::new());
    if opaque {
        let rgb: RgbImage = DynamicImage::ImageRgba8(image.clone()).into_rgb8();
        rgb.write_to(&mut png_data, ImageFormat::Png)
            .map_err(|e| SlicerError::ImageSave {
                path: path.to_path_buf(),
                source: e,
            })?;
    } else {
        image
            .write_to(&mut png_data, ImageFormat::Png)
            .map_err(|e| SlicerError::ImageSave {
                path: path.to_path_buf(),
                source: e,
            })?;
    }

    let output_data = if let Some(level) = compress {
        let opts = match level {
            CompressionLevel::Level(n) => oxipng::Options::from_preset(n),
            CompressionLevel::Max => oxipng::Options::max_compression(),
        };
        oxipng::optimize_from_memory(&png_data.into_inner(), &opts).map_err(|e| {
            SlicerError::PngCompress {
                path: path.to_path_buf(),
                message: e.to_string(),
            }
        })?
    } else {
        png_data.into_inner()
    };

    Ok(output_data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ColorType, Rgba};

    fn decode(bytes: &[u8]) -> DynamicImage {
        image::load_from_memory_with_format(bytes, ImageFormat::Png).unwrap()
    }

    #[test]
    fn test_rgba_output() {
        let img = RgbaImage::from_pixel(8, 6, Rgba([1, 2, 3, 128]));
        let bytes = encode_png(&img, Path::new("a.png"), false, None).unwrap();
        let decoded = decode(&bytes);

        assert_eq!(decoded.color(), ColorType::Rgba8);
        assert_eq!((decoded.width(), decoded.height()), (8, 6));
        assert_eq!(decoded.to_rgba8().get_pixel(0, 0), &Rgba([1, 2, 3, 128]));
    }

    #[test]
    fn test_opaque_output() {
        let img = RgbaImage::from_pixel(4, 4, Rgba([9, 8, 7, 0]));
        let bytes = encode_png(&img, Path::new("a.png"), true, None).unwrap();
        assert_eq!(decode(&bytes).color(), ColorType::Rgb8);
    }

    #[test]
    fn test_compressed_output_decodes_identically() {
        let img = RgbaImage::from_fn(32, 32, |x, _| {
            if x < 16 {
                Rgba([255, 0, 0, 255])
            } else {
                Rgba([0, 0, 0, 0])
            }
        });
        let bytes =
            encode_png(&img, Path::new("a.png"), false, Some(CompressionLevel::Level(1))).unwrap();
        assert_eq!(decode(&bytes).to_rgba8(), img);
    }
}
