mod config;
mod error;
mod middleware;
mod models;
mod routes;
mod services;
mod store;

use std::path::Path;
use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    http::{header, Method},
    routing::{delete, get, post, put},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use config::Config;
use middleware::auth::JwtSecret;
use services::auth::AuthService;
use store::JsonStore;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<JsonStore>,
    pub config: Arc<Config>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Arc::new(Config::from_env()?);

    tokio::fs::create_dir_all(Path::new(&config.uploads_dir).join("pdf")).await?;
    tokio::fs::create_dir_all(Path::new(&config.uploads_dir).join("images")).await?;

    let store = Arc::new(JsonStore::new(&config.data_file));
    if AuthService::seed_admin(&store, &config.admin_username, &config.admin_password).await? {
        info!("Seeded initial admin '{}'", config.admin_username);
    }

    let state = AppState {
        store,
        config: config.clone(),
    };

    let cors = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT])
        .allow_origin(Any);

    let jwt_secret = JwtSecret(config.jwt_secret.clone());

    let app = Router::new()
        .route("/health", get(routes::health::health_check))
        // Auth
        .route("/api/auth/login", post(routes::auth::login))
        .route("/api/auth/verify", get(routes::auth::verify))
        .route("/api/admin/username", put(routes::auth::change_username))
        .route("/api/admin/password", put(routes::auth::change_password))
        // Historia
        .route(
            "/api/historia",
            get(routes::historia::get_historia).post(routes::historia::update_historia),
        )
        // Almuerzos
        .route(
            "/api/almuerzos",
            get(routes::almuerzos::list_items).post(routes::almuerzos::create_item),
        )
        .route("/api/almuerzos/all", get(routes::almuerzos::list_all_items))
        .route("/api/almuerzos/reorder", post(routes::almuerzos::reorder_items))
        .route(
            "/api/almuerzos/{id}",
            put(routes::almuerzos::update_item).delete(routes::almuerzos::delete_item),
        )
        // Reservas
        .route(
            "/api/reservas",
            get(routes::reservas::get_config).put(routes::reservas::update_config),
        )
        // Menú
        .route("/api/menu", get(routes::menu::get_menu))
        .route("/api/menu/current", get(routes::menu::current_pdf))
        .route("/api/menu/pdf", post(routes::menu::upload_pdf))
        .route("/api/menu/prices", put(routes::menu::update_prices))
        // Galería
        .route(
            "/api/galeria",
            get(routes::galeria::list_images).post(routes::galeria::upload_image),
        )
        .route("/api/galeria/{filename}", delete(routes::galeria::delete_image))
        .nest_service("/uploads", ServeDir::new(&config.uploads_dir))
        .layer(axum::Extension(jwt_secret))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        // Global body size limit (covers the 5 MB PDF plus multipart overhead)
        .layer(DefaultBodyLimit::max(10 * 1024 * 1024))
        .with_state(state);

    let addr = format!("{}:{}", config.host, config.port);
    info!("restobar API listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
