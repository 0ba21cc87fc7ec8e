use axum::Json;
use axum::{
    extract::rejection::{FormRejection, JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

#[derive(Debug)]
pub enum AppError {
    InvalidEmail,
    InvalidPassword,
    UsedEmail,
    EmptyEmailOrPassword,
    IncorrectEmailOrPassword,
    UserNotExists,
    Forbidden,
    BadRequest,
    PageNotFound,
    MethodNotAllowed,
    // Neither an email nor a user id was supplied on a member-add request.
    // Reported as InternalServerError/500 for parity with the original
    // service, even though it is really a client error.
    MissingIdentifier,
    Template,
    Internal(String),
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
    pub status_code: u16,
}

#[derive(Serialize)]
pub struct ErrorBody {
    pub name: &'static str,
    pub message: &'static str,
}

impl AppError {
    fn parts(&self) -> (StatusCode, &'static str, &'static str) {
        match self {
            AppError::InvalidEmail => {
                (StatusCode::CONFLICT, "InvalidEmail", "This email is invalid")
            }
            AppError::InvalidPassword => (
                StatusCode::CONFLICT,
                "InvalidPassword",
                "This password is invalid",
            ),
            AppError::UsedEmail => (
                StatusCode::CONFLICT,
                "UsedEmail",
                "This email is already in use",
            ),
            AppError::EmptyEmailOrPassword => (
                StatusCode::CONFLICT,
                "EmptyEmailOrPassword",
                "The email or password is empty",
            ),
            AppError::IncorrectEmailOrPassword => (
                StatusCode::CONFLICT,
                "IncorrectEmailOrPassword",
                "The email or password is incorrect",
            ),
            AppError::UserNotExists => (
                StatusCode::CONFLICT,
                "UserNotExists",
                "The user was not found in the database!",
            ),
            AppError::Forbidden => (StatusCode::FORBIDDEN, "Forbidden", "Forbidden"),
            AppError::BadRequest => (StatusCode::BAD_REQUEST, "BadRequest", "Bad request"),
            AppError::PageNotFound => (
                StatusCode::NOT_FOUND,
                "PageNotFound",
                "Sorry, nothing at this URL",
            ),
            AppError::MethodNotAllowed => (
                StatusCode::METHOD_NOT_ALLOWED,
                "MethodNotAllowed",
                "The method is not allowed for the requested URL",
            ),
            AppError::MissingIdentifier => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "InternalServerError",
                "The server could not fulfil your request",
            ),
            AppError::Template => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "InternalServerError",
                "The server could not display the template",
            ),
            AppError::Internal(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "InternalServerError",
                "The server could not fulfill the request",
            ),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if let AppError::Internal(ref detail) = self {
            tracing::error!("Internal error: {}", detail);
        }

        let (status, name, message) = self.parts();
        let body = Json(ErrorResponse {
            error: ErrorBody { name, message },
            status_code: status.as_u16(),
        });

        (status, body).into_response()
    }
}

impl From<mongodb::error::Error> for AppError {
    fn from(e: mongodb::error::Error) -> Self {
        AppError::Internal(format!("database error: {}", e))
    }
}

impl From<bcrypt::BcryptError> for AppError {
    fn from(e: bcrypt::BcryptError) -> Self {
        AppError::Internal(format!("bcrypt error: {}", e))
    }
}

impl From<JsonRejection> for AppError {
    fn from(_: JsonRejection) -> Self {
        AppError::BadRequest
    }
}

impl From<FormRejection> for AppError {
    fn from(_: FormRejection) -> Self {
        AppError::BadRequest
    }
}
