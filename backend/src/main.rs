//! Main entry point for the Rolodex backend.
//!
//! This file initializes the Axum web server, sets up the database
//! connection, and registers all API routes and middleware.
//! It orchestrates the application's startup and defines its overall structure.

use rolodex_backend::app;
use rolodex_backend::config::Config;
use rolodex_backend::database::Database;
use tracing::info;
use tracing_subscriber::fmt::init;

#[tokio::main]
async fn main() {
    init();

    let config = Config::from_env().unwrap();
    let db = Database::new(&config).await.unwrap();
    db.migrate().await.unwrap();

    let app = app(db.pool().clone(), config.clone());

    let bind_address = format!("0.0.0.0:{}", config.server_port);
    let listener = tokio::net::TcpListener::bind(&bind_address).await.unwrap();

    info!("Starting Rolodex server on port {}", config.server_port);
    axum::serve(listener, app).await.unwrap();
}
