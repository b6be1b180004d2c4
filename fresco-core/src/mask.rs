// Wire-level mask types shared by both facades

use serde::{Deserialize, Serialize};

/// One region mask produced by a mask generator.
///
/// `segmentation` is a base64-encoded single-channel PNG at the source
/// image's dimensions: 255 inside the region, 0 outside. `bbox` is
/// `[x, y, width, height]` in pixels. Ids are 0-based and stable within
/// a single generation call, in generation order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaskDescriptor {
    pub id: u32,
    pub segmentation: String,
    pub area: u64,
    pub bbox: [u32; 4],
    pub predicted_iou: f64,
    pub point_coords: Vec<[u32; 2]>,
    pub stability_score: f64,
}

impl MaskDescriptor {
    /// Bounding-box center, matching `point_coords[0]`.
    pub fn representative_point(&self) -> [u32; 2] {
        Self::bbox_center(self.bbox)
    }

    /// Center of an `[x, y, w, h]` box. `x + w / 2` rather than
    /// `(2x + w) / 2`, which can overflow for coordinates near `u32::MAX`.
    pub fn bbox_center(bbox: [u32; 4]) -> [u32; 2] {
        let [x, y, w, h] = bbox;
        [x + w / 2, y + h / 2]
    }
}

/// Placeholder result for point-prompted segmentation.
///
/// Not wired to any endpoint; the id is always -1 and the radius fixed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PointMask {
    pub id: i64,
    pub center: [u32; 2],
    pub radius: u32,
}
