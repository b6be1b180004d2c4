// Request/response shapes shared by the local and edge facades.

use fresco_core::MaskDescriptor;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadResponse {
    pub success: bool,
    pub file_id: String,
    pub filename: String,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateMasksParams {
    pub file_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MasksResponse {
    pub success: bool,
    pub masks: Vec<MaskDescriptor>,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplyColorRequest {
    pub file_id: String,
    pub mask_indices: Vec<i64>,
    pub color: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplyColorResponse {
    pub success: bool,
    pub output_filename: String,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

// Edge facade: the image travels inline instead of through the store.

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EdgeHealthResponse {
    pub status: String,
    pub service: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EdgeSegmentRequest {
    /// Base64-encoded image bytes.
    pub file_data: String,
    pub filename: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EdgeColorizeRequest {
    /// Base64-encoded image bytes.
    pub file_data: String,
    pub filename: String,
    pub mask_indices: Vec<i64>,
    pub color: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EdgeColorizeResponse {
    pub success: bool,
    /// Base64-encoded PNG of the edited image.
    pub colored_image: String,
    pub message: String,
}
