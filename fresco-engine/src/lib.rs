pub mod compositor;
pub mod segmentation;
pub mod service;

pub use compositor::{apply_color, colorize_image_bytes};
pub use segmentation::{segment_image_bytes, MaskGenerator, QuadrantMaskGenerator};
pub use service::SegmentationService;
