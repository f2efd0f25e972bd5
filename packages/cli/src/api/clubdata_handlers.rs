// ABOUTME: API handlers for the club data record
// ABOUTME: Escaped reads, sanitized writes, form descriptors and public rendering

use axum::{
    extract::{Path, State},
    http::header,
    response::IntoResponse,
    Json,
};
use serde_json::{json, Value};
use tracing::info;

use super::AppState;
use crate::error::AppError;

/// Get the whole record, every value HTML-escaped
pub async fn get_clubdata(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    let data = state.manager.field(None).await?;
    Ok(Json(json!({
        "success": true,
        "data": data,
        "error": null
    })))
}

/// Get one field, HTML-escaped. Unknown or unset names return the whole record.
pub async fn get_clubdata_field(
    State(state): State<AppState>,
    Path(field): Path<String>,
) -> Result<Json<Value>, AppError> {
    let data = state.manager.field(Some(&field)).await?;
    Ok(Json(json!({
        "success": true,
        "data": data,
        "error": null
    })))
}

/// Replace the record with a sanitized submission
pub async fn update_clubdata(
    State(state): State<AppState>,
    Json(raw): Json<Value>,
) -> Result<Json<Value>, AppError> {
    if !raw.is_object() {
        return Err(AppError::Validation(
            "Request body must be a JSON object".to_string(),
        ));
    }

    info!("Updating club record");
    let settings = state.manager.save_raw(&raw).await?;

    Ok(Json(json!({
        "success": true,
        "data": settings,
        "error": null
    })))
}

/// Descriptors for the editable form, values escaped
pub async fn get_form_fields(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    let fields = state.manager.render_form().await?;
    Ok(Json(json!({
        "success": true,
        "data": fields,
        "error": null
    })))
}

/// Public display fragment
pub async fn get_fragment(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let fragment = state.manager.shortcode().await?;
    Ok((
        [(header::CONTENT_TYPE, "text/html; charset=utf-8")],
        fragment.into_string(),
    ))
}

/// Expand `[clubdata]` shortcodes in a posted document
pub async fn render_document(
    State(state): State<AppState>,
    document: String,
) -> Result<impl IntoResponse, AppError> {
    let rendered = state.manager.expand(&document).await?;
    Ok((
        [(header::CONTENT_TYPE, "text/html; charset=utf-8")],
        rendered,
    ))
}
