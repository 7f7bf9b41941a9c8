//! Cleaned CSV downloads.

use axum::{
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Response},
};

use hopemarket::Dataset;

use crate::server::error::ApiError;
use crate::server::state::AppState;

/// Serve a dataset's cleaned export as an attachment.
pub async fn download(
    State(state): State<AppState>,
    Path(dataset): Path<String>,
) -> Result<Response, ApiError> {
    let dataset: Dataset = dataset.parse().map_err(ApiError::NotFound)?;

    let bytes = {
        let mut cache = state.cache.lock().await;
        state.pipeline.export(&mut cache, dataset)?
    };

    tracing::debug!(%dataset, bytes = bytes.len(), "serving cleaned export");

    let disposition = format!("attachment; filename=\"{}\"", dataset.export_file_name());
    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        bytes,
    )
        .into_response())
}
