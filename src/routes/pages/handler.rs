use std::path::Path;

use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

use crate::config::Config;
use crate::error::AppError;
use crate::AppState;

/// Loads a page from the templates directory and fills `{{ name }}`
/// placeholders. Reading at request time keeps the template-failure path
/// honest: a missing or unreadable file surfaces as a 500.
pub async fn render_template(
    config: &Config,
    name: &str,
    vars: &[(&str, &str)],
) -> Result<Html<String>, AppError> {
    let path = Path::new(&config.templates_dir).join(name);

    let mut page = tokio::fs::read_to_string(&path).await.map_err(|e| {
        tracing::error!("Failed to load template {}: {}", path.display(), e);
        AppError::Template
    })?;

    for (key, value) in vars {
        page = page.replace(&format!("{{{{ {} }}}}", key), value);
    }

    Ok(Html(page))
}

#[axum::debug_handler]
pub async fn home(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    render_template(&state.config, "home.html", &[]).await
}

#[axum::debug_handler]
pub async fn about(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    render_template(&state.config, "about.html", &[]).await
}

/// Fallback for unmatched paths: the custom 404 page, or the JSON envelope
/// when even that page cannot be rendered.
#[axum::debug_handler]
pub async fn not_found(State(state): State<AppState>) -> Response {
    match render_template(&state.config, "404.html", &[]).await {
        Ok(page) => (StatusCode::NOT_FOUND, page).into_response(),
        Err(_) => AppError::PageNotFound.into_response(),
    }
}
