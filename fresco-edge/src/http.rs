// Stateless cloud-function facade: the image travels inline as base64
// instead of through the disk store, and the edited image comes back
// inline instead of via a download step. Mask and error shapes are
// identical to the local facade.

use axum::{
    body::Body,
    extract::{DefaultBodyLimit, State},
    http::{Response, StatusCode},
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use fresco_api::{
    EdgeColorizeRequest, EdgeColorizeResponse, EdgeHealthResponse, EdgeSegmentRequest,
    ErrorResponse, MasksResponse,
};
use fresco_core::{ColorSpec, Error};
use fresco_engine::{colorize_image_bytes, segment_image_bytes, MaskGenerator};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

const MAX_BODY_BYTES: usize = 48 * 1024 * 1024;

#[derive(Clone)]
pub struct EdgeState {
    pub generator: Arc<dyn MaskGenerator>,
}

pub fn create_router(state: EdgeState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/generate-masks", post(generate_masks_handler))
        .route("/apply-color", post(apply_color_handler))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

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

fn decode_file_data(file_data: &str) -> Result<Vec<u8>, Error> {
    BASE64
        .decode(file_data)
        .map_err(|e| Error::Validation(format!("invalid base64 file data: {}", e)))
}

async fn health_handler() -> impl IntoResponse {
    Json(EdgeHealthResponse {
        status: "healthy".to_string(),
        service: "Fresco Segmentation Edge".to_string(),
    })
}

async fn generate_masks_handler(
    State(state): State<EdgeState>,
    Json(request): Json<EdgeSegmentRequest>,
) -> Response<Body> {
    let bytes = match decode_file_data(&request.file_data) {
        Ok(bytes) => bytes,
        Err(e) => return fault_response(e),
    };

    match segment_image_bytes(state.generator.as_ref(), &bytes) {
        Ok(masks) => {
            info!("generated {} masks for {}", masks.len(), request.filename);
            Json(MasksResponse {
                success: true,
                masks,
                message: "Masks generated successfully".to_string(),
            })
            .into_response()
        }
        Err(e) => fault_response(e),
    }
}

async fn apply_color_handler(
    State(_state): State<EdgeState>,
    Json(request): Json<EdgeColorizeRequest>,
) -> Response<Body> {
    let color: ColorSpec = match request.color.parse() {
        Ok(color) => color,
        Err(e) => return fault_response(e),
    };
    let bytes = match decode_file_data(&request.file_data) {
        Ok(bytes) => bytes,
        Err(e) => return fault_response(e),
    };

    match colorize_image_bytes(&bytes, &request.mask_indices, color) {
        Ok(colored) => {
            info!(
                "applied {} to masks {:?} of {}",
                color, request.mask_indices, request.filename
            );
            Json(EdgeColorizeResponse {
                success: true,
                colored_image: BASE64.encode(&colored),
                message: "Color applied successfully".to_string(),
            })
            .into_response()
        }
        Err(e) => fault_response(e),
    }
}
