//! Dashboard page handler.

use axum::{
    extract::{Query, State},
    response::Html,
};

use super::dashboard::{PageQuery, build_dashboard};
use crate::page::{PageMode, render};
use crate::server::error::ApiError;
use crate::server::state::AppState;

/// Render the full page for the current controls.
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Result<Html<String>, ApiError> {
    let dashboard = build_dashboard(&state, &query).await?;
    Ok(Html(render(&dashboard, PageMode::Served)))
}
