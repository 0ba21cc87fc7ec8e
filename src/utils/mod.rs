use axum::Json;
use bcrypt::{DEFAULT_COST, hash, verify};
use serde::Serialize;
use uuid::Uuid;

pub fn hash_password(password: &str) -> Result<String, bcrypt::BcryptError> {
    hash(password.as_bytes(), DEFAULT_COST)
}

pub fn verify_password(password: &str, hash: &str) -> Result<bool, bcrypt::BcryptError> {
    verify(password.as_bytes(), hash)
}

/// Opaque bearer credential stored on the user document. Not a signed
/// token; authorization is a straight lookup against the stored value.
pub fn generate_access_token() -> String {
    Uuid::new_v4().simple().to_string()
}

pub fn email_is_valid(email: &str) -> bool {
    if email.contains(char::is_whitespace) {
        return false;
    }

    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };

    if local.is_empty() || domain.contains('@') {
        return false;
    }

    // The domain needs at least one dot with something on both sides.
    match domain.rsplit_once('.') {
        Some((host, tld)) => !host.is_empty() && !tld.is_empty(),
        None => false,
    }
}

#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub data: T,
    pub status_code: u16,
}

pub fn success_to_api_response<T: Serialize>(data: T) -> Json<ApiResponse<T>> {
    Json(ApiResponse {
        data,
        status_code: 200,
    })
}
