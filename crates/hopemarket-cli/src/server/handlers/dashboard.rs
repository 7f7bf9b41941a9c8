//! Dashboard JSON handler and the page query parameters.

use axum::{
    Json,
    extract::{Query, State},
};
use serde::Deserialize;

use hopemarket::{ChartStyle, Dashboard, LineMode, PageParams};

use crate::server::error::ApiError;
use crate::server::state::AppState;

/// Sidebar controls as they arrive in the query string.
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    /// `on` / `off`; an absent value after a form submit means off.
    pub glow: Option<String>,
    pub line_style: Option<String>,
    pub year: Option<i64>,
    /// Present when the controls form was submitted.
    pub controls: Option<String>,
}

impl PageQuery {
    /// Resolve against the configured default style.
    pub fn to_params(&self, defaults: ChartStyle) -> Result<PageParams, ApiError> {
        let glow = match self.glow.as_deref() {
            Some(value) => parse_switch(value)?,
            None if self.controls.is_some() => false,
            None => defaults.glow,
        };
        let line_mode = match self.line_style.as_deref() {
            Some(value) => value.parse::<LineMode>().map_err(ApiError::BadRequest)?,
            None => defaults.line_mode,
        };

        Ok(PageParams {
            year: self.year,
            style: ChartStyle { glow, line_mode },
        })
    }
}

fn parse_switch(value: &str) -> Result<bool, ApiError> {
    match value.to_lowercase().as_str() {
        "on" | "true" | "1" | "yes" => Ok(true),
        "off" | "false" | "0" | "no" => Ok(false),
        _ => Err(ApiError::BadRequest(format!(
            "Invalid glow value: {}. Use on or off.",
            value
        ))),
    }
}

/// Build the dashboard for the current query.
pub async fn build_dashboard(state: &AppState, query: &PageQuery) -> Result<Dashboard, ApiError> {
    let params = query.to_params(state.pipeline.config().style)?;
    let mut cache = state.cache.lock().await;
    Ok(state.pipeline.dashboard(&mut cache, &params))
}

/// Sections, file status and controls as JSON.
pub async fn get_dashboard(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Result<Json<Dashboard>, ApiError> {
    Ok(Json(build_dashboard(&state, &query).await?))
}
