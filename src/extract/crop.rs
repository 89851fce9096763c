use image::{RgbaImage, imageops};

use crate::cli::BoundsPolicy;
use crate::error::SlicerError;
use crate::geometry::Rect;

/// Cut `window` out of `image`.
///
/// With [`BoundsPolicy::Pad`] the result always has the window's size; the
/// part outside the sheet is left fully transparent. With
/// [`BoundsPolicy::Error`] a window that is not fully inside the sheet fails.
pub fn crop_window(
    image: &RgbaImage,
    window: Rect,
    policy: BoundsPolicy,
    name: &str,
) -> Result<RgbaImage, SlicerError> {
    let (width, height) = image.dimensions();
    let sheet = Rect::of_image(width, height);

    if sheet.contains(&window) {
        return Ok(crop_inside(image, window));
    }

    match policy {
        BoundsPolicy::Error => Err(SlicerError::CropOutOfBounds {
            name: name.to_string(),
            x: window.x,
            y: window.y,
            size: window.width,
            width,
            height,
        }),
        BoundsPolicy::Pad => {
            let mut out = RgbaImage::new(window.width, window.height);
            if let Some(overlap) = sheet.intersection(&window) {
                let part = crop_inside(image, overlap);
                imageops::replace(&mut out, &part, overlap.x - window.x, overlap.y - window.y);
            }
            Ok(out)
        }
    }
}

/// Crop a window already known to lie inside the image
#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "window lies inside the image, so its origin fits in u32"
)]
fn crop_inside(image: &RgbaImage, window: Rect) -> RgbaImage {
    imageops::crop_imm(
        image,
        window.x as u32,
        window.y as u32,
        window.width,
        window.height,
    )
    .to_image()
}
