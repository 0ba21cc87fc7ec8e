use bson::serde_helpers::chrono_datetime_as_bson_datetime;
use chrono::{DateTime, Utc};
use mongodb::Database;
use mongodb::bson::doc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::Config;
use crate::error::AppError;
use crate::mailer;
use crate::routes::group::model::Group;
use crate::routes::user::model::User;

const COLLECTION: &str = "invites";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Invite {
    #[serde(rename = "_id")]
    pub id: String,
    pub email: String,
    pub inviter_id: String,
    pub token: String,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub created_date: DateTime<Utc>,
    pub pending: bool,
}

impl Invite {
    pub fn new(email: &str, inviter_id: &str) -> Self {
        Invite {
            id: Uuid::new_v4().to_string(),
            email: email.to_string(),
            inviter_id: inviter_id.to_string(),
            token: Uuid::new_v4().simple().to_string(),
            created_date: Utc::now(),
            pending: true,
        }
    }

    pub async fn create(db: &Database, email: &str, inviter_id: &str) -> Result<Self, AppError> {
        let invite = Self::new(email, inviter_id);

        db.collection::<Invite>(COLLECTION)
            .insert_one(&invite)
            .await?;

        tracing::info!("Created invite for {} from {}", invite.email, inviter_id);
        Ok(invite)
    }

    /// Hands the invite to the mail collaborator. Delivery is best-effort;
    /// when no mail API is configured this is a logged no-op.
    pub async fn send(&self, config: &Config) -> Result<(), AppError> {
        mailer::send_invite(config, &self.email, &self.token).await
    }

    pub async fn get_by_token(db: &Database, token: &str) -> Result<Option<Self>, AppError> {
        let invite = db
            .collection::<Invite>(COLLECTION)
            .find_one(doc! { "token": token })
            .await?;

        Ok(invite)
    }

    /// Consumes a pending invite: creates the account, flips `pending`, and
    /// joins the new user to the inviter's default group (group id ==
    /// inviter id).
    ///
    /// Limitation: the user insert and the group update are two separate
    /// writes with no transaction around them. A crash in between leaves a
    /// registered user outside the inviter's group.
    pub async fn activate(db: &Database, token: &str, password: &str) -> Result<User, AppError> {
        let invite = db
            .collection::<Invite>(COLLECTION)
            .find_one(doc! { "token": token, "pending": true })
            .await?
            .ok_or_else(|| {
                AppError::Internal(format!("no pending invite for token {}", token))
            })?;

        let user = User::register(db, &invite.email, password).await?;

        db.collection::<Invite>(COLLECTION)
            .update_one(
                doc! { "_id": &invite.id },
                doc! { "$set": { "pending": false } },
            )
            .await?;

        Group::add_member(db, &invite.inviter_id, &user.id).await?;

        tracing::info!("Activated invite {} for {}", invite.id, invite.email);
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_invite_is_pending_with_token_and_timestamp() {
        let invite = Invite::new("test123@gmail.com", "inviter-1");

        assert_eq!(invite.email, "test123@gmail.com");
        assert_eq!(invite.inviter_id, "inviter-1");
        assert!(!invite.token.is_empty());
        assert!(invite.pending);
        assert!(invite.created_date.timestamp() > 0);
    }

    #[test]
    fn invite_tokens_are_unique() {
        let a = Invite::new("a@example.com", "u1");
        let b = Invite::new("a@example.com", "u1");
        assert_ne!(a.token, b.token);
        assert_ne!(a.id, b.id);
    }
}
