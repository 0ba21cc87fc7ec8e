use axum::{
    extract::{Json, State},
    response::IntoResponse,
};
use axum_extra::extract::WithRejection;

use crate::error::AppError;
use crate::utils::{email_is_valid, success_to_api_response};
use crate::AppState;

use super::model::{LoginRequest, RegisterRequest, User};
use crate::routes::group::model::Group;

#[axum::debug_handler]
pub async fn register(
    State(state): State<AppState>,
    WithRejection(Json(req), _): WithRejection<Json<RegisterRequest>, AppError>,
) -> Result<impl IntoResponse, AppError> {
    let email = req.email.unwrap_or_default();
    let password = req.password.unwrap_or_default();

    if !email_is_valid(&email) {
        return Err(AppError::InvalidEmail);
    }

    if password.is_empty() {
        return Err(AppError::InvalidPassword);
    }

    let user = User::register(&state.db, &email, &password).await?;

    // Every account starts with a default Friends group that shares the
    // user's id; invite activation later adds people to it.
    Group::create(&state.db, &user.id, &user.id, "Friends").await?;

    Ok(success_to_api_response(user.profile()))
}

#[axum::debug_handler]
pub async fn login(
    State(state): State<AppState>,
    WithRejection(Json(req), _): WithRejection<Json<LoginRequest>, AppError>,
) -> Result<impl IntoResponse, AppError> {
    let email = req.email.unwrap_or_default();
    let password = req.password.unwrap_or_default();

    if email.is_empty() || password.is_empty() {
        return Err(AppError::EmptyEmailOrPassword);
    }

    let user = User::login(&state.db, &email, &password).await?;

    Ok(success_to_api_response(user.profile()))
}
