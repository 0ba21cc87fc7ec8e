use axum::{
    Extension,
    extract::{Json, Path, State},
    response::IntoResponse,
};
use axum_extra::extract::WithRejection;

use crate::error::AppError;
use crate::middleware::CurrentUser;
use crate::utils::{email_is_valid, success_to_api_response};
use crate::AppState;

use super::model::{AddMemberRequest, CreateGroupRequest, Group};
use crate::routes::invite::model::Invite;
use crate::routes::user::model::User;

#[axum::debug_handler]
pub async fn create_group(
    State(state): State<AppState>,
    Extension(CurrentUser(current)): Extension<CurrentUser>,
    WithRejection(Json(req), _): WithRejection<Json<CreateGroupRequest>, AppError>,
) -> Result<impl IntoResponse, AppError> {
    let group = Group::create(&state.db, &req.group_id, &current.id, &req.name).await?;

    Ok(success_to_api_response(group.profile()))
}

/// Adds someone to a group, by user id or by email. An email that matches no
/// account turns into an Invite instead of a membership change.
#[axum::debug_handler]
pub async fn add_member(
    State(state): State<AppState>,
    Extension(CurrentUser(current)): Extension<CurrentUser>,
    Path(group_id): Path<String>,
    WithRejection(Json(req), _): WithRejection<Json<AddMemberRequest>, AppError>,
) -> Result<impl IntoResponse, AppError> {
    tracing::info!("Adding member to group {}", group_id);

    let email = req.email.as_deref().unwrap_or_default();
    let user_id = req.user_id.as_deref().unwrap_or_default();

    if !email.is_empty() && email_is_valid(email) {
        match User::get_by_email(&state.db, email).await? {
            Some(user) => {
                tracing::info!("Email: adding {} to group {}", email, group_id);
                Group::add_member(&state.db, &group_id, &user.id).await?;
            }
            None => {
                let invite = Invite::create(&state.db, email, &current.id).await?;
                invite.send(&state.config).await?;
            }
        }
    } else if !user_id.is_empty() {
        tracing::info!("ID: adding {} to group {}", user_id, group_id);
        Group::add_member(&state.db, &group_id, user_id).await?;
    } else {
        return Err(AppError::MissingIdentifier);
    }

    let group = Group::get_by_id(&state.db, &group_id)
        .await?
        .ok_or_else(|| AppError::Internal(format!("group {} not found", group_id)))?;

    Ok(success_to_api_response(group.profile()))
}
