use std::env;

#[derive(Debug, Clone, serde::Deserialize)]
pub struct Config {
    pub mongodb_uri: String,
    pub database_name: String,
    pub server_host: String,
    pub server_port: u16,
    pub auth_prefix: String,
    pub templates_dir: String,
    pub public_base_url: String,
    pub mailgun_api_url: Option<String>,
    pub mailgun_api_key: Option<String>,
    pub mail_from: String,
}

impl Config {
    pub fn from_env() -> Result<Self, env::VarError> {
        dotenv::dotenv().ok();

        Ok(Config {
            mongodb_uri: env::var("MONGOLAB_URI")?,
            database_name: env::var("MONGODB_DATABASE").unwrap_or_else(|_| "app".into()),
            server_host: env::var("SERVER_HOST").unwrap_or_else(|_| "::".into()),
            server_port: env::var("SERVER_PORT")
                .unwrap_or_default()
                .parse()
                .unwrap_or(3000),
            auth_prefix: env::var("AUTH_PREFIX").unwrap_or_else(|_| "Bearer".into()),
            templates_dir: env::var("TEMPLATES_DIR").unwrap_or_else(|_| "templates".into()),
            public_base_url: env::var("PUBLIC_BASE_URL")
                .unwrap_or_else(|_| "http://localhost:3000".into()),
            mailgun_api_url: env::var("MAILGUN_API_URL").ok(),
            mailgun_api_key: env::var("MAILGUN_API_KEY").ok(),
            mail_from: env::var("MAIL_FROM").unwrap_or_else(|_| "invites@example.com".into()),
        })
    }
}
