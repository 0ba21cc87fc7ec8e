use std::net::{IpAddr, SocketAddr};

use axum::{
    Router,
    http::{HeaderValue, header},
    routing::{get, post},
};
use backend::{
    AppState,
    config::Config,
    error::AppError,
    middleware::{auth_middleware, log_errors},
    routes,
};
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::set_header::SetResponseHeaderLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env().expect("Failed to load configuration");

    #[cfg(debug_assertions)]
    tracing::info!("Running in debug mode with CORS enabled");

    #[cfg(not(debug_assertions))]
    tracing::info!("Running in production mode with CORS disabled");

    let client = mongodb::Client::with_uri_str(&config.mongodb_uri)
        .await
        .expect("Failed to connect to MongoDB");
    let db = client.database(&config.database_name);

    let state = AppState {
        db,
        config: config.clone(),
    };

    let public_routes = Router::new()
        .route("/users/register", post(routes::user::register))
        .route("/users/login", post(routes::user::login))
        .route("/confirm/{token}", get(routes::invite::confirm))
        .route("/activate/{token}", post(routes::invite::activate))
        .route("/", get(routes::pages::home))
        .route("/about", get(routes::pages::about));

    let protected_routes = Router::new()
        .route("/groups", post(routes::group::create_group))
        .route("/groups/{group_id}/add", post(routes::group::add_member))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    let router = Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .fallback(routes::pages::not_found)
        .method_not_allowed_fallback(|| async { AppError::MethodNotAllowed });

    let router = router.layer(
        ServiceBuilder::new()
            .layer(axum::middleware::from_fn(log_errors))
            .layer(SetResponseHeaderLayer::overriding(
                header::HeaderName::from_static("x-ua-compatible"),
                HeaderValue::from_static("IE=Edge,chrome=1"),
            ))
            .layer(SetResponseHeaderLayer::overriding(
                header::CACHE_CONTROL,
                HeaderValue::from_static("public, max-age=600"),
            )),
    );

    #[cfg(debug_assertions)]
    let router = {
        tracing::debug!("Adding CORS layer for development mode");
        router.layer(CorsLayer::permissive())
    };

    let app = router.with_state(state.clone());

    let addr = SocketAddr::new(
        state.config.server_host.parse().unwrap_or_else(|_| {
            tracing::warn!("Invalid server_host, falling back to dual-stack default");
            IpAddr::V6(std::net::Ipv6Addr::UNSPECIFIED)
        }),
        state.config.server_port,
    );
    tracing::info!("Server listening on {}", addr);
    axum::serve(
        tokio::net::TcpListener::bind(&addr)
            .await
            .expect("Failed to bind"),
        app,
    )
    .await
    .expect("Failed to start server");
}
