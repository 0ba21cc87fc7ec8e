use mongodb::Database;
use mongodb::bson::doc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AppError;
use crate::utils::{generate_access_token, hash_password, verify_password};

const COLLECTION: &str = "users";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id")]
    pub id: String,
    pub email: String,
    // bcrypt hash, never the cleartext
    pub password: String,
    pub location: Option<[f64; 2]>,
    pub access_token: String,
}

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Public projection of a user document. The password hash stays out of
/// every response body.
#[derive(Debug, Serialize)]
pub struct UserProfile {
    pub id: String,
    pub email: String,
    pub location: Option<[f64; 2]>,
    pub access_token: String,
}

impl From<&User> for UserProfile {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            email: user.email.clone(),
            location: user.location,
            access_token: user.access_token.clone(),
        }
    }
}

impl User {
    pub fn profile(&self) -> UserProfile {
        UserProfile::from(self)
    }

    /// Builds a user document with a freshly hashed password and a new
    /// access token, without touching the store.
    pub fn new(email: &str, password: &str) -> Result<Self, AppError> {
        Ok(User {
            id: Uuid::new_v4().to_string(),
            email: email.to_string(),
            password: hash_password(password)?,
            location: None,
            access_token: generate_access_token(),
        })
    }

    pub async fn register(db: &Database, email: &str, password: &str) -> Result<Self, AppError> {
        if Self::get_by_email(db, email).await?.is_some() {
            return Err(AppError::UsedEmail);
        }

        let user = Self::new(email, password)?;

        db.collection::<User>(COLLECTION)
            .insert_one(&user)
            .await?;

        tracing::info!("Registered user {}", user.id);
        Ok(user)
    }

    pub async fn login(db: &Database, email: &str, password: &str) -> Result<Self, AppError> {
        let mut user = Self::get_by_email(db, email)
            .await?
            .ok_or(AppError::UserNotExists)?;

        if !verify_password(password, &user.password)? {
            return Err(AppError::IncorrectEmailOrPassword);
        }

        // A fresh token invalidates any previously issued one.
        user.access_token = generate_access_token();
        db.collection::<User>(COLLECTION)
            .update_one(
                doc! { "_id": &user.id },
                doc! { "$set": { "access_token": &user.access_token } },
            )
            .await?;

        Ok(user)
    }

    pub async fn get_by_id(db: &Database, id: &str) -> Result<Option<Self>, AppError> {
        let user = db
            .collection::<User>(COLLECTION)
            .find_one(doc! { "_id": id })
            .await?;

        Ok(user)
    }

    pub async fn get_by_email(db: &Database, email: &str) -> Result<Option<Self>, AppError> {
        let user = db
            .collection::<User>(COLLECTION)
            .find_one(doc! { "email": email })
            .await?;

        Ok(user)
    }

    /// The authorization primitive: resolves a bearer token back to its one
    /// owning user, or nothing.
    pub async fn get_by_access_token(db: &Database, token: &str) -> Result<Option<Self>, AppError> {
        let user = db
            .collection::<User>(COLLECTION)
            .find_one(doc! { "access_token": token })
            .await?;

        Ok(user)
    }

    pub async fn update_location(
        db: &Database,
        id: &str,
        latitude: f64,
        longitude: f64,
    ) -> Result<(), AppError> {
        db.collection::<User>(COLLECTION)
            .update_one(
                doc! { "_id": id },
                doc! { "$set": { "location": [latitude, longitude] } },
            )
            .await?;

        Ok(())
    }

    // Administrative/test-only removal; no API route points here.
    pub async fn remove(db: &Database, id: &str) -> Result<(), AppError> {
        db.collection::<User>(COLLECTION)
            .delete_one(doc! { "_id": id })
            .await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_user_hashes_password_and_issues_token() {
        let user = User::new("test123@gmail.com", "jose").unwrap();

        assert_eq!(user.email, "test123@gmail.com");
        assert_ne!(user.password, "jose");
        assert!(verify_password("jose", &user.password).unwrap());
        assert!(!user.access_token.is_empty());
        assert!(user.location.is_none());
    }

    #[test]
    fn profile_never_carries_the_password_hash() {
        let user = User::new("test123@gmail.com", "jose").unwrap();
        let json = serde_json::to_value(user.profile()).unwrap();

        assert_eq!(json["email"], "test123@gmail.com");
        assert!(json.get("password").is_none());
        assert_eq!(json["access_token"], user.access_token);
    }
}
