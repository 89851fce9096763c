use image::RgbaImage;

use crate::geometry::Rect;

/// A named sprite cut from the sheet
#[derive(Debug, Clone)]
pub struct ExtractedSprite {
    /// Output name, taken from the name list
    pub name: String,
    /// Grid row of the source box
    pub row: usize,
    /// Grid column of the source box
    pub column: usize,
    /// Detected footprint in sheet coordinates
    pub bounds: Rect,
    /// Crop window in sheet coordinates (may extend past the sheet)
    pub crop: Rect,
    /// Cropped image, always `crop.width` x `crop.height`
    pub image: RgbaImage,
}

impl ExtractedSprite {
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Crop center in sheet coordinates
    pub fn center(&self) -> (i64, i64) {
        (
            self.crop.x + i64::from(self.crop.width / 2),
            self.crop.y + i64::from(self.crop.height / 2),
        )
    }
}
