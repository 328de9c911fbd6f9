use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use std::sync::Arc;

use crate::api::response::ApiError;
use crate::uploads::UploadError;
use crate::AppState;

/// Serve an uploaded attachment from the content directory.
/// Route: GET /uploads/*name
pub async fn serve_upload(
    State(state): State<Arc<AppState>>,
    axum::extract::Path(name): axum::extract::Path<String>,
) -> Result<Response, ApiError> {
    let data = state.uploads.read(&name).await.map_err(|e| match e {
        UploadError::NotFound(_) => ApiError::not_found("File not found"),
        _ => ApiError::from(e),
    })?;

    let byte_size = data.len() as u64;
    let mut response = (StatusCode::OK, data).into_response();
    let headers = response.headers_mut();

    let mime_type = mime_guess::from_path(&name).first_or_octet_stream();
    headers.insert(
        header::CONTENT_TYPE,
        mime_type
            .as_ref()
            .parse()
            .unwrap_or(header::HeaderValue::from_static("application/octet-stream")),
    );

    headers.insert(header::CONTENT_LENGTH, header::HeaderValue::from(byte_size));

    // Stored names are timestamped and never rewritten
    headers.insert(
        header::CACHE_CONTROL,
        header::HeaderValue::from_static("public, max-age=3600"),
    );

    Ok(response)
}
