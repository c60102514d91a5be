//! Beta access gate. Active only when `APP_PASSWORD` is configured.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::errors::AppError;
use crate::state::AppState;

pub const PASSWORD_HEADER: &str = "x-app-password";

/// Rejects requests whose `x-app-password` header does not match the configured password.
pub async fn require_app_password(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let Some(expected) = state.config.app_password.as_deref() else {
        return Ok(next.run(request).await);
    };

    let supplied = request
        .headers()
        .get(PASSWORD_HEADER)
        .and_then(|v| v.to_str().ok());

    if supplied != Some(expected) {
        return Err(AppError::Unauthorized);
    }

    Ok(next.run(request).await)
}
