use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};

use crate::error::AppError;
use crate::routes::user::model::User;
use crate::AppState;

/// Authenticated user attached to the request by the gate; handlers pick it
/// up as an `Extension`.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

/// The authorization gate. Requires `Authorization: "<prefix> <token>"` with
/// the configured prefix and a token matching a stored access token; any
/// parse failure, prefix mismatch, or unknown token gets a 403.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| extract_token(value, &state.config.auth_prefix))
        .ok_or(AppError::Forbidden)?
        .to_string();

    let user = User::get_by_access_token(&state.db, &token)
        .await?
        .ok_or(AppError::Forbidden)?;

    request.extensions_mut().insert(CurrentUser(user));
    Ok(next.run(request).await)
}

// One space, exact prefix, nothing else.
fn extract_token<'a>(header: &'a str, prefix: &str) -> Option<&'a str> {
    let (scheme, token) = header.split_once(' ')?;

    if scheme != prefix || token.is_empty() || token.contains(' ') {
        return None;
    }

    Some(token)
}
