// Mask generation behind a pluggable strategy trait.
//
// The quadrant generator is a deterministic placeholder standing in for a
// promptable segmentation model. A real model plugs in behind the same
// `MaskGenerator` contract without touching the store, the compositor, or
// either facade.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use fresco_core::{Error, MaskDescriptor, PointMask, Result};
use image::{GrayImage, ImageFormat, Luma, RgbImage};
use std::io::Cursor;
use tracing::debug;

/// A rectangular pixel region, half-open on both axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Region {
    pub fn area(&self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }

    pub fn contains(&self, x: u32, y: u32) -> bool {
        x >= self.x && x < self.x + self.width && y >= self.y && y < self.y + self.height
    }
}

/// The four quadrants of a `width` x `height` image, in fixed order:
/// top-left, top-right, bottom-left, bottom-right. Boundaries sit at
/// `width / 2` and `height / 2`, so odd dimensions give the left/top halves
/// one fewer pixel. The regions tile the image exactly.
pub fn quadrants(width: u32, height: u32) -> [Region; 4] {
    let mid_x = width / 2;
    let mid_y = height / 2;
    [
        Region { x: 0, y: 0, width: mid_x, height: mid_y },
        Region { x: mid_x, y: 0, width: width - mid_x, height: mid_y },
        Region { x: 0, y: mid_y, width: mid_x, height: height - mid_y },
        Region { x: mid_x, y: mid_y, width: width - mid_x, height: height - mid_y },
    ]
}

/// Strategy seam for mask generation.
pub trait MaskGenerator: Send + Sync {
    /// Produce an ordered list of region masks for the image. Ids are
    /// 0-based in generation order.
    fn generate(&self, image: &RgbImage) -> Result<Vec<MaskDescriptor>>;

    /// Point-prompted segmentation. Placeholder contract only: returns a
    /// fixed-radius region centered at the query point and is not routed
    /// to any endpoint.
    fn mask_at_point(&self, x: u32, y: u32) -> PointMask {
        PointMask {
            id: -1,
            center: [x, y],
            radius: 50,
        }
    }
}

/// Placeholder generator: partitions the image into its four quadrants,
/// ignoring pixel content entirely. Synthetic confidence scores:
/// `predicted_iou = 0.8 + 0.05 * id`, `stability_score = 0.9`.
#[derive(Debug, Default, Clone)]
pub struct QuadrantMaskGenerator;

impl QuadrantMaskGenerator {
    pub fn new() -> Self {
        Self
    }
}

impl MaskGenerator for QuadrantMaskGenerator {
    fn generate(&self, image: &RgbImage) -> Result<Vec<MaskDescriptor>> {
        let (width, height) = image.dimensions();
        debug!("generating quadrant masks for {}x{} image", width, height);

        quadrants(width, height)
            .iter()
            .enumerate()
            .map(|(i, region)| {
                let id = i as u32;
                let bbox = [region.x, region.y, region.width, region.height];
                Ok(MaskDescriptor {
                    id,
                    segmentation: encode_mask_bitmap(width, height, region)?,
                    area: region.area(),
                    bbox,
                    predicted_iou: 0.8 + 0.05 * f64::from(id),
                    point_coords: vec![MaskDescriptor::bbox_center(bbox)],
                    stability_score: 0.9,
                })
            })
            .collect()
    }
}

/// Base64 PNG of a single-channel bitmap at the source dimensions:
/// 255 inside the region, 0 outside.
fn encode_mask_bitmap(width: u32, height: u32, region: &Region) -> Result<String> {
    let bitmap = GrayImage::from_fn(width, height, |x, y| {
        if region.contains(x, y) {
            Luma([255u8])
        } else {
            Luma([0u8])
        }
    });

    let mut buf = Vec::new();
    bitmap
        .write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
        .map_err(|e| Error::Composition(format!("failed to encode mask bitmap: {}", e)))?;
    Ok(BASE64.encode(&buf))
}

/// Decode raw image bytes and run the generator. Decode failures surface
/// as a composition fault before the generator is reached.
pub fn segment_image_bytes(
    generator: &dyn MaskGenerator,
    bytes: &[u8],
) -> Result<Vec<MaskDescriptor>> {
    let image = image::load_from_memory(bytes)
        .map_err(|e| Error::Composition(format!("failed to decode image: {}", e)))?
        .to_rgb8();
    generator.generate(&image)
}
