use axum::{
    extract::{Form, Path, State},
    response::IntoResponse,
};
use axum_extra::extract::WithRejection;
use serde::Deserialize;

use crate::error::AppError;
use crate::routes::pages::render_template;
use crate::routes::user::model::User;
use crate::utils::success_to_api_response;
use crate::AppState;

use super::model::Invite;

#[derive(Debug, Deserialize)]
pub struct ActivateForm {
    pub password: String,
}

/// GET /confirm/{token} — the page an invited email lands on.
#[axum::debug_handler]
pub async fn confirm(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    tracing::info!("Starting confirmation...");

    let invite = Invite::get_by_token(&state.db, &token)
        .await?
        .ok_or_else(|| AppError::Internal(format!("no invite for token {}", token)))?;

    let inviter = User::get_by_id(&state.db, &invite.inviter_id)
        .await?
        .ok_or_else(|| AppError::Internal(format!("inviter {} not found", invite.inviter_id)))?;

    tracing::info!("Invited by: {}", inviter.email);

    render_template(
        &state.config,
        "invite.html",
        &[
            ("email", invite.email.as_str()),
            ("token", token.as_str()),
            ("inviter_email", inviter.email.as_str()),
        ],
    )
    .await
}

/// POST /activate/{token} — form submission from the confirmation page.
#[axum::debug_handler]
pub async fn activate(
    State(state): State<AppState>,
    Path(token): Path<String>,
    WithRejection(Form(form), _): WithRejection<Form<ActivateForm>, AppError>,
) -> Result<impl IntoResponse, AppError> {
    Invite::activate(&state.db, &token, &form.password).await?;

    Ok(success_to_api_response("Success!"))
}
