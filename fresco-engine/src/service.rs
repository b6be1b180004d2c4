// Store-backed segmentation service shared by the local facade.

use crate::compositor;
use crate::segmentation::{self, MaskGenerator};
use fresco_core::{ColorSpec, MaskDescriptor, Result};
use fresco_store::ImageStore;
use std::sync::Arc;
use tracing::info;

pub const COLORED_SUFFIX: &str = "_colored.png";

/// Ties the image store to a mask generation strategy. Constructed once at
/// startup and injected into the facade; there is no hidden global instance.
pub struct SegmentationService {
    store: Arc<ImageStore>,
    generator: Arc<dyn MaskGenerator>,
}

impl SegmentationService {
    pub fn new(store: Arc<ImageStore>, generator: Arc<dyn MaskGenerator>) -> Self {
        Self { store, generator }
    }

    pub fn store(&self) -> &Arc<ImageStore> {
        &self.store
    }

    /// Generate masks for a previously uploaded image.
    pub async fn generate_masks(&self, file_id: &str) -> Result<Vec<MaskDescriptor>> {
        let stored = self.store.locate(file_id).await?;
        let bytes = self.store.retrieve(&stored.filename).await?;
        let masks = segmentation::segment_image_bytes(self.generator.as_ref(), &bytes)?;
        info!("generated {} masks for {}", masks.len(), stored.filename);
        Ok(masks)
    }

    /// Paint the selected mask regions of a previously uploaded image and
    /// persist the result as `{file_id}_colored.png`. The color string is
    /// validated before any pixel work; returns the output filename.
    pub async fn apply_color(
        &self,
        file_id: &str,
        mask_indices: &[i64],
        color: &str,
    ) -> Result<String> {
        let color: ColorSpec = color.parse()?;
        let stored = self.store.locate(file_id).await?;
        let bytes = self.store.retrieve(&stored.filename).await?;
        let colored = compositor::colorize_image_bytes(&bytes, mask_indices, color)?;
        let output = self
            .store
            .store_derived(file_id, COLORED_SUFFIX, &colored)
            .await?;
        info!(
            "applied {} to masks {:?} of {} -> {}",
            color, mask_indices, stored.filename, output.filename
        );
        Ok(output.filename)
    }
}
