// HTTP server with API routes for the upload/segment/colorize workflow

use axum::{
    body::Body,
    extract::{DefaultBodyLimit, Multipart, Path, Query, State},
    http::{Response, StatusCode},
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use fresco_api::{
    ApplyColorRequest, ApplyColorResponse, ErrorResponse, GenerateMasksParams, HealthResponse,
    MasksResponse, MessageResponse, UploadResponse,
};
use fresco_core::Error;
use fresco_engine::SegmentationService;
use fresco_store::ImageStore;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

// Uploads above this size are rejected by the framework before any handler runs.
const MAX_UPLOAD_BYTES: usize = 32 * 1024 * 1024;

// API state
#[derive(Clone)]
pub struct ApiState {
    pub service: Arc<SegmentationService>,
    pub store: Arc<ImageStore>,
}

pub fn create_router(state: ApiState) -> Router {
    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_handler))
        .route("/upload", post(upload_handler))
        .route("/generate-masks", post(generate_masks_handler))
        .route("/apply-color", post(apply_color_handler))
        .route("/download/:filename", get(download_handler))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        // The original frontend is served from a different origin.
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Map a service fault to its HTTP shape. Validation and not-found are
/// client errors; everything else is a 500.
fn fault_response(err: Error) -> Response<Body> {
    let (status, code) = match &err {
        Error::Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION"),
        Error::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
        Error::Storage(_) | Error::Io(_) => (StatusCode::INTERNAL_SERVER_ERROR, "STORAGE"),
        Error::Composition(_) => (StatusCode::INTERNAL_SERVER_ERROR, "COMPOSITION"),
    };
    warn!("request failed: {}", err);
    (
        status,
        Json(ErrorResponse {
            error: err.to_string(),
            code: code.to_string(),
        }),
    )
        .into_response()
}

/// Liveness probe
async fn root_handler() -> impl IntoResponse {
    Json(MessageResponse {
        message: "Fresco segmentation API is running!".to_string(),
    })
}

async fn health_handler() -> impl IntoResponse {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Upload a building image (multipart `file` field, image MIME type required).
async fn upload_handler(
    State(state): State<ApiState>,
    mut multipart: Multipart,
) -> Response<Body> {
    let field = loop {
        match multipart.next_field().await {
            Ok(Some(field)) if field.name() == Some("file") => break field,
            Ok(Some(_)) => continue,
            Ok(None) => {
                return fault_response(Error::Validation(
                    "missing 'file' field in multipart body".to_string(),
                ))
            }
            Err(e) => {
                return fault_response(Error::Validation(format!("invalid multipart body: {}", e)))
            }
        }
    };

    let content_type = field.content_type().unwrap_or("").to_string();
    if !content_type.starts_with("image/") {
        return fault_response(Error::Validation("File must be an image".to_string()));
    }

    let original_filename = field.file_name().unwrap_or("upload").to_string();
    let bytes = match field.bytes().await {
        Ok(bytes) => bytes,
        Err(e) => {
            return fault_response(Error::Validation(format!("failed to read upload: {}", e)))
        }
    };

    match state.store.store(&bytes, &original_filename).await {
        Ok(stored) => {
            info!("uploaded {} as {}", original_filename, stored.filename);
            Json(UploadResponse {
                success: true,
                file_id: stored.id,
                filename: stored.filename,
                message: "Image uploaded successfully".to_string(),
            })
            .into_response()
        }
        Err(e) => fault_response(e),
    }
}

/// Generate masks for a previously uploaded image.
async fn generate_masks_handler(
    State(state): State<ApiState>,
    Query(params): Query<GenerateMasksParams>,
) -> Response<Body> {
    match state.service.generate_masks(&params.file_id).await {
        Ok(masks) => Json(MasksResponse {
            success: true,
            masks,
            message: "Masks generated successfully".to_string(),
        })
        .into_response(),
        Err(e) => fault_response(e),
    }
}

/// Paint the selected masks; the edited image is persisted for download.
async fn apply_color_handler(
    State(state): State<ApiState>,
    Json(request): Json<ApplyColorRequest>,
) -> Response<Body> {
    match state
        .service
        .apply_color(&request.file_id, &request.mask_indices, &request.color)
        .await
    {
        Ok(output_filename) => Json(ApplyColorResponse {
            success: true,
            output_filename,
            message: "Color applied successfully".to_string(),
        })
        .into_response(),
        Err(e) => fault_response(e),
    }
}

/// Download an original or edited image by filename.
async fn download_handler(
    State(state): State<ApiState>,
    Path(filename): Path<String>,
) -> Response<Body> {
    let bytes = match state.store.retrieve(&filename).await {
        Ok(bytes) => bytes,
        Err(e) => return fault_response(e),
    };

    Response::builder()
        .status(StatusCode::OK)
        .header("content-type", content_type_for(&filename))
        .header(
            "content-disposition",
            format!("attachment; filename=\"{}\"", filename),
        )
        .body(Body::from(bytes))
        .unwrap_or_else(|_| {
            Response::builder()
                .status(StatusCode::INTERNAL_SERVER_ERROR)
                .body(Body::from("Internal server error"))
                .unwrap_or_else(|_| Response::new(Body::from("Error")))
        })
}

fn content_type_for(filename: &str) -> &'static str {
    match std::path::Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
    {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("bmp") => "image/bmp",
        _ => "application/octet-stream",
    }
}
