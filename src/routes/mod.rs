//! HTTP route handlers.

pub mod duo;

use crate::auth::Protocol;
use crate::config::Config;
use axum::{routing::get, routing::post, Router};
use std::sync::Arc;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub protocol: Arc<Protocol>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let protocol = config.protocol();
        Self {
            config: Arc::new(config),
            protocol: Arc::new(protocol),
        }
    }
}

/// Build the router: the login page at `/` and the widget callback at
/// `response_path`.
pub fn router(response_path: &str) -> Router<AppState> {
    Router::new()
        .route("/", get(duo::login_page))
        .route(response_path, post(duo::duo_response))
}
