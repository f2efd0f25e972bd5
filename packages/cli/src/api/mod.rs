use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};
use clubdata_config::constants::STYLESHEET_PATH;
use clubdata_settings::ClubSettingsManager;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::error::AppError;
use crate::middleware::api_token::api_token_middleware;

pub mod admin_handlers;
pub mod clubdata_handlers;
pub mod health;

/// Path of the settings page, also the form's post target
pub const ADMIN_PAGE_PATH: &str = "/admin/clubdata";

/// Login form that exchanges the API token for an admin cookie
pub const ADMIN_LOGIN_PATH: &str = "/admin/login";

/// Prefix admin assets are served under
pub const ADMIN_ASSET_PREFIX: &str = "/admin/assets";

/// Shared state for every handler
#[derive(Clone)]
pub struct AppState {
    pub manager: ClubSettingsManager,
    pub api_token: Option<Arc<str>>,
    pub dev_mode: bool,
}

impl AppState {
    pub fn new(manager: ClubSettingsManager, api_token: Option<String>, dev_mode: bool) -> Self {
        Self {
            manager,
            api_token: api_token.map(Arc::from),
            dev_mode,
        }
    }
}

pub fn create_router(state: AppState) -> Router {
    // Admin routes require a valid API token
    let admin_router = Router::new()
        .route("/api/clubdata", put(clubdata_handlers::update_clubdata))
        .route("/api/clubdata/form", get(clubdata_handlers::get_form_fields))
        .route(
            ADMIN_PAGE_PATH,
            get(admin_handlers::admin_page).post(admin_handlers::submit_admin_form),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            api_token_middleware,
        ));

    let public_router = Router::new()
        .route("/api/health", get(health::health_check))
        .route("/api/clubdata", get(clubdata_handlers::get_clubdata))
        .route(
            "/api/clubdata/{field}",
            get(clubdata_handlers::get_clubdata_field),
        )
        .route("/clubdata", get(clubdata_handlers::get_fragment))
        .route("/render", post(clubdata_handlers::render_document))
        .route(
            ADMIN_LOGIN_PATH,
            get(admin_handlers::login_page).post(admin_handlers::login),
        )
        .route(
            &format!("{}/{}", ADMIN_ASSET_PREFIX, STYLESHEET_PATH),
            get(admin_handlers::admin_stylesheet_asset),
        );

    public_router
        .merge(admin_router)
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn not_found() -> AppError {
    AppError::NotFound
}
