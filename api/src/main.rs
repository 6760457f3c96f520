use std::sync::Arc;

use axum::Router;
use diesel_async::AsyncPgConnection;
use diesel_async::pooled_connection::{AsyncDieselConnectionManager, deadpool::Pool};
use dotenv::dotenv;
use mimalloc::MiMalloc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod account;
mod config;
mod error;
mod forum;
mod json;
mod schema;

use config::ServerConfig;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[derive(Clone)]
pub struct App {
    pub diesel: Pool<AsyncPgConnection>,
    pub config: Arc<ServerConfig>,
}

#[tokio::main]
async fn main() {
    dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("api=debug,tower_http=info")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Arc::new(ServerConfig::new_from_env());

    let manager = AsyncDieselConnectionManager::<AsyncPgConnection>::new(&config.database_url);
    let pool = Pool::builder(manager)
        .max_size(10)
        .build()
        .expect("couldn't build the database pool");

    let app = App {
        diesel: pool,
        config: config.clone(),
    };

    let router = Router::new()
        .merge(account::routes::route())
        .merge(forum::routes::route())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(app);

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .expect("couldn't bind the listen address");

    tracing::info!("listening on {}", config.bind_addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("server error");
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("couldn't install the ctrl-c handler");
    tracing::info!("shutting down");
}
