// Flat-color painting of selected mask regions.

use crate::segmentation::quadrants;
use fresco_core::{ColorSpec, Error, Result};
use image::{ImageFormat, Rgb, RgbImage};
use std::io::Cursor;
use tracing::debug;

/// Overwrite the selected quadrant regions with a flat color.
///
/// Ids outside {0, 1, 2, 3} are silently ignored. The regions are disjoint,
/// so selection order is irrelevant and the operation is idempotent. An
/// empty selection returns a pixel-identical copy.
pub fn apply_color(image: &RgbImage, mask_ids: &[i64], color: ColorSpec) -> RgbImage {
    let (width, height) = image.dimensions();
    let regions = quadrants(width, height);
    let pixel = Rgb(color.channels());

    let mut output = image.clone();
    for &id in mask_ids {
        let Ok(index) = usize::try_from(id) else { continue };
        let Some(region) = regions.get(index) else { continue };
        for y in region.y..region.y + region.height {
            for x in region.x..region.x + region.width {
                output.put_pixel(x, y, pixel);
            }
        }
    }
    output
}

/// Decode raw image bytes, paint the selected regions, and re-encode as PNG.
///
/// The source is normalized to RGB before compositing, so grayscale and
/// alpha-channel inputs are handled rather than shape-faulting. Decode and
/// encode failures surface as composition faults; nothing is silently
/// swallowed.
pub fn colorize_image_bytes(bytes: &[u8], mask_ids: &[i64], color: ColorSpec) -> Result<Vec<u8>> {
    let image = image::load_from_memory(bytes)
        .map_err(|e| Error::Composition(format!("failed to decode image: {}", e)))?
        .to_rgb8();

    debug!(
        "applying {} to {} mask regions of a {}x{} image",
        color,
        mask_ids.len(),
        image.width(),
        image.height()
    );
    let colored = apply_color(&image, mask_ids, color);

    let mut buf = Vec::new();
    colored
        .write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
        .map_err(|e| Error::Composition(format!("failed to encode image: {}", e)))?;
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn checkerboard(width: u32, height: u32) -> RgbImage {
        RgbImage::from_fn(width, height, |x, y| {
            if (x + y) % 2 == 0 {
                Rgb([10, 20, 30])
            } else {
                Rgb([200, 210, 220])
            }
        })
    }

    #[test]
    fn test_empty_selection_is_identity() {
        let image = checkerboard(10, 8);
        let output = apply_color(&image, &[], ColorSpec::new(0xFF, 0, 0));
        assert_eq!(output, image);
    }

    #[test]
    fn test_full_selection_fills_image() {
        let image = checkerboard(10, 8);
        let output = apply_color(&image, &[0, 1, 2, 3], ColorSpec::new(0x11, 0x22, 0x33));
        for pixel in output.pixels() {
            assert_eq!(pixel.0, [0x11, 0x22, 0x33]);
        }
    }

    #[test]
    fn test_single_quadrant_leaves_rest_untouched() {
        let image = checkerboard(10, 8);
        let output = apply_color(&image, &[0], ColorSpec::new(0xFF, 0x00, 0x00));

        for y in 0..8 {
            for x in 0..10 {
                let expected = if x < 5 && y < 4 {
                    [0xFF, 0x00, 0x00]
                } else {
                    image.get_pixel(x, y).0
                };
                assert_eq!(output.get_pixel(x, y).0, expected);
            }
        }
    }

    #[test]
    fn test_unknown_ids_are_ignored() {
        let image = checkerboard(10, 8);
        let output = apply_color(&image, &[-1, 4, 99], ColorSpec::new(0xFF, 0x00, 0x00));
        assert_eq!(output, image);
    }

    #[test]
    fn test_apply_color_is_idempotent() {
        let image = checkerboard(10, 8);
        let color = ColorSpec::new(0x00, 0xAA, 0x55);
        let once = apply_color(&image, &[1, 2], color);
        let twice = apply_color(&once, &[1, 2], color);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_selection_order_is_irrelevant() {
        let image = checkerboard(11, 7);
        let color = ColorSpec::new(0x12, 0x34, 0x56);
        assert_eq!(
            apply_color(&image, &[0, 3], color),
            apply_color(&image, &[3, 0], color)
        );
    }

    #[test]
    fn test_colorize_bytes_round_trip() {
        let image = checkerboard(6, 6);
        let mut png = Vec::new();
        image
            .write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
            .unwrap();

        let out = colorize_image_bytes(&png, &[0, 1, 2, 3], ColorSpec::new(1, 2, 3)).unwrap();
        let decoded = image::load_from_memory(&out).unwrap().to_rgb8();
        assert_eq!(decoded.dimensions(), (6, 6));
        for pixel in decoded.pixels() {
            assert_eq!(pixel.0, [1, 2, 3]);
        }
    }

    #[test]
    fn test_colorize_bytes_normalizes_grayscale_input() {
        let gray = image::GrayImage::from_pixel(4, 4, image::Luma([128]));
        let mut png = Vec::new();
        gray.write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
            .unwrap();

        let out = colorize_image_bytes(&png, &[0], ColorSpec::new(0xFF, 0x00, 0x00)).unwrap();
        let decoded = image::load_from_memory(&out).unwrap().to_rgb8();
        assert_eq!(decoded.get_pixel(0, 0).0, [0xFF, 0x00, 0x00]);
        assert_eq!(decoded.get_pixel(3, 3).0, [128, 128, 128]);
    }

    #[test]
    fn test_colorize_bytes_rejects_garbage() {
        assert!(matches!(
            colorize_image_bytes(b"garbage", &[0], ColorSpec::new(0, 0, 0)),
            Err(Error::Composition(_))
        ));
    }
}
