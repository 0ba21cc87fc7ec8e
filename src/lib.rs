use config::Config;
use mongodb::Database;

pub mod config;
pub mod error;
pub mod mailer;
pub mod middleware;
pub mod utils;

pub mod routes;

#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub config: Config,
}
