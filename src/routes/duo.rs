//! Login page and Duo callback endpoints.

use crate::auth::{sign, verify};
use crate::error::AppError;
use crate::models::{DuoResponseForm, LoginPage, LoginQuery};
use crate::routes::AppState;
use axum::{
    extract::{Query, State},
    response::Html,
    Form,
};

/// GET /?username=: sign a request and serve the page hosting the Duo frame
pub async fn login_page(
    State(state): State<AppState>,
    Query(query): Query<LoginQuery>,
) -> Result<Html<String>, AppError> {
    let sig_request = sign(&state.protocol, &state.config.credentials, &query.username)
        .map_err(|e| {
            tracing::warn!(action = "sign_failed", error = %e, "Could not sign Duo request");
            AppError::from(e)
        })?;

    tracing::debug!(action = "sign_request", username = %query.username, "Signed Duo request");

    let page = LoginPage {
        host: &state.config.host,
        sig_request: &sig_request,
        post_action: &state.config.response_path,
    };

    Ok(Html(page.render()))
}

/// POST /response: verify the signed response posted by the Duo widget
pub async fn duo_response(
    State(state): State<AppState>,
    Form(form): Form<DuoResponseForm>,
) -> Result<String, AppError> {
    let username = verify(&state.protocol, &state.config.credentials, &form.sig_response)
        .map_err(|e| {
            tracing::warn!(action = "auth_failed", error = %e, "Invalid Duo response");
            AppError::from(e)
        })?;

    tracing::info!(action = "auth_success", username = %username, "User authenticated");

    Ok(format!("Successfully authenticated as: {}", username))
}
