use crate::config::Config;
use crate::error::AppError;

/// Sends the invite notification through the configured mail API. With no
/// API configured the invite still exists; only the notification is skipped.
pub async fn send_invite(config: &Config, email: &str, token: &str) -> Result<(), AppError> {
    let (Some(api_url), Some(api_key)) = (&config.mailgun_api_url, &config.mailgun_api_key) else {
        tracing::warn!("Mail API not configured, skipping invite email to {}", email);
        return Ok(());
    };

    let link = format!("{}/confirm/{}", config.public_base_url, token);
    let text = format!(
        "You have been invited to join a group. Follow this link to accept: {}",
        link
    );
    let params = [
        ("from", config.mail_from.as_str()),
        ("to", email),
        ("subject", "You have been invited!"),
        ("text", text.as_str()),
    ];

    let response = reqwest::Client::new()
        .post(api_url)
        .basic_auth("api", Some(api_key))
        .form(&params)
        .send()
        .await
        .map_err(|e| AppError::Internal(format!("mail dispatch failed: {}", e)))?;

    if !response.status().is_success() {
        return Err(AppError::Internal(format!(
            "mail API returned {}",
            response.status()
        )));
    }

    tracing::info!("Sent invite email to {}", email);
    Ok(())
}
