// ABOUTME: Admin page handlers
// ABOUTME: Login, settings page HTML, form submission, and the page-scoped stylesheet

use std::collections::HashMap;

use axum::{
    extract::{Form, Query, State},
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Redirect, Response},
};
use clubdata_config::constants::{ADMIN_PAGE_HOOK, OPTION_NAME};
use clubdata_settings::{
    admin_menu_entry, admin_stylesheet, render_login_page, ClubField, HtmlSafe,
};
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::{info, warn};

use super::{AppState, ADMIN_ASSET_PREFIX, ADMIN_LOGIN_PATH, ADMIN_PAGE_PATH};
use crate::error::AppError;
use crate::middleware::api_token::{token_matches, ADMIN_TOKEN_COOKIE};

const ADMIN_STYLESHEET: &str = include_str!("../../assets/admin-style.css");

#[derive(Debug, Default, Deserialize)]
pub struct AdminPageQuery {
    #[serde(rename = "settings-updated")]
    pub settings_updated: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub token: String,
}

/// Wrap admin markup into a full document that links the page stylesheet
fn admin_document(body: &HtmlSafe) -> Response {
    let menu = admin_menu_entry();

    let stylesheet = admin_stylesheet(ADMIN_PAGE_HOOK)
        .map(|asset| {
            format!(
                "<link rel=\"stylesheet\" id=\"{}-css\" href=\"{}/{}\">\n",
                asset.handle,
                ADMIN_ASSET_PREFIX,
                HtmlSafe::escape(asset.path)
            )
        })
        .unwrap_or_default();

    let document = format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>{}</title>\n{}</head>\n<body>\n{}</body>\n</html>\n",
        HtmlSafe::escape(menu.page_title),
        stylesheet,
        body
    );

    (
        [(header::CONTENT_TYPE, "text/html; charset=utf-8")],
        document,
    )
        .into_response()
}

/// Render the settings page as a full HTML document
pub async fn admin_page(
    State(state): State<AppState>,
    Query(query): Query<AdminPageQuery>,
) -> Result<Response, AppError> {
    let settings_updated = query.settings_updated.as_deref() == Some("true");
    let body = state
        .manager
        .render_admin_page(ADMIN_PAGE_PATH, settings_updated)
        .await?;

    Ok(admin_document(&body))
}

/// Handle the settings form post (`vdm_clubdata[phone]=...` etc.)
pub async fn submit_admin_form(
    State(state): State<AppState>,
    Form(params): Form<HashMap<String, String>>,
) -> Result<Redirect, AppError> {
    let mut raw = Map::new();
    for field in ClubField::ALL {
        let key = format!("{}[{}]", OPTION_NAME, field.as_str());
        if let Some(value) = params.get(&key) {
            raw.insert(field.as_str().to_string(), Value::String(value.clone()));
        }
    }

    info!("Club record submitted from admin form");
    state.manager.save_raw(&Value::Object(raw)).await?;

    Ok(Redirect::to(&format!(
        "{}?settings-updated=true",
        ADMIN_PAGE_PATH
    )))
}

/// Token entry form for browsers
pub async fn login_page() -> Response {
    admin_document(&render_login_page(ADMIN_LOGIN_PATH))
}

/// Check the submitted token and hand the browser a session cookie for the admin pages
pub async fn login(
    State(state): State<AppState>,
    Form(form): Form<LoginForm>,
) -> Result<Response, AppError> {
    if state.dev_mode {
        return Ok(Redirect::to(ADMIN_PAGE_PATH).into_response());
    }

    let Some(expected) = state.api_token.as_deref() else {
        return Err(AppError::Forbidden {
            message: "Admin access is disabled. Configure CLUBDATA_API_TOKEN.".to_string(),
        });
    };

    if !token_matches(form.token.trim(), expected) {
        warn!("Admin login with invalid token");
        return Err(AppError::Unauthorized {
            message: "Invalid API token".to_string(),
        });
    }

    let cookie = HeaderValue::from_str(&format!(
        "{}={}; Path=/admin; HttpOnly; SameSite=Strict",
        ADMIN_TOKEN_COOKIE, expected
    ))
    .map_err(|_| {
        AppError::Validation("API token cannot be stored in a cookie".to_string())
    })?;

    info!("Admin login succeeded");
    let mut response = Redirect::to(ADMIN_PAGE_PATH).into_response();
    response.headers_mut().insert(header::SET_COOKIE, cookie);
    Ok(response)
}

/// Serve the admin stylesheet
pub async fn admin_stylesheet_asset() -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/css; charset=utf-8")],
        ADMIN_STYLESHEET,
    )
}
