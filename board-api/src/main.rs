use crate::server::{
    ServerState,
    cors::{DEFAULT_CORS_ORIGINS, cors_layer},
};
use axum::http::{HeaderValue, header::InvalidHeaderValue};
use board_db::{
    client::DbClient,
    memory::MemoryStore,
    store::{DbError, PostStore},
};
use serde::Deserialize;
use std::{
    net::{IpAddr, SocketAddr},
    sync::Arc,
};
use thiserror::Error;
use tower_http::trace::TraceLayer;
use tracing::{debug, error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod server;

#[derive(Debug, Error)]
enum InitError {
    #[error("Error parsing .env file: {0}")]
    Dotenv(#[from] dotenvy::Error),
    #[error("Error parsing environment: {0}")]
    Envy(#[from] envy::Error),
    #[error("Invalid CORS origin: {0}")]
    CorsOrigin(#[from] InvalidHeaderValue),
    #[error("Error setting up the post store: {0}")]
    Store(#[from] DbError),
    #[error("Error binding tcp listener: {0}")]
    TcpBind(std::io::Error),
    #[error("Error serving server: {0}")]
    TcpServe(std::io::Error),
}

#[derive(Copy, Clone, Eq, PartialEq, Debug, Default, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
enum StoreBackend {
    #[default]
    Mongo,
    Memory,
}

#[derive(Clone, Eq, PartialEq, Debug, Hash, Deserialize)]
struct Env {
    server_address: IpAddr,
    server_port: u16,
    #[serde(default)]
    store_backend: StoreBackend,
    #[serde(default = "default_mongodb_uri")]
    mongodb_uri: String,
    #[serde(default = "default_mongodb_database")]
    mongodb_database: String,
    #[serde(default = "default_mongodb_collection")]
    mongodb_collection: String,
    #[serde(default = "default_cors_origins")]
    cors_origins: Vec<String>,
}

fn default_mongodb_uri() -> String {
    "mongodb://localhost:27017".to_owned()
}

fn default_mongodb_database() -> String {
    "board_tutorial_db".to_owned()
}

fn default_mongodb_collection() -> String {
    "posts".to_owned()
}

fn default_cors_origins() -> Vec<String> {
    Vec::from(DEFAULT_CORS_ORIGINS.map(str::to_owned))
}

fn install_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "board_api=debug,\
                board_db=debug,\
                tower_http=debug,axum::rejection=trace,mongodb=info"
                    .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn get_env() -> Result<Env, InitError> {
    if let Err(e) = dotenvy::dotenv() {
        if e.not_found() {
            debug!("No .dotenv file found");
        } else {
            return Err(e.into());
        }
    }

    envy::from_env().map_err(InitError::from)
}

async fn open_store(env: &Env) -> Result<Arc<dyn PostStore>, InitError> {
    match env.store_backend {
        StoreBackend::Mongo => {
            let client = DbClient::connect(
                &env.mongodb_uri,
                &env.mongodb_database,
                &env.mongodb_collection,
            )
            .await?;
            info!(
                database = %env.mongodb_database,
                collection = %env.mongodb_collection,
                "Using MongoDB post store"
            );
            Ok(Arc::new(client))
        }
        StoreBackend::Memory => {
            info!("Using in-memory post store");
            Ok(Arc::new(MemoryStore::new()))
        }
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Could not listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};

        match signal(SignalKind::terminate()) {
            Ok(mut terminate) => {
                terminate.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Could not listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    info!("Shutting down");
}

#[tokio::main]
async fn main() -> Result<(), InitError> {
    install_tracing();
    let env = get_env()?;

    let cors_origins = env
        .cors_origins
        .iter()
        .map(|origin| HeaderValue::from_str(origin))
        .collect::<Result<Vec<_>, _>>()?;
    let state = ServerState {
        store: open_store(&env).await?,
    };

    let tracing_layer = TraceLayer::new_for_http();
    let app = server::routes()
        .layer(cors_layer(cors_origins))
        .layer(tracing_layer)
        .with_state(state);

    let server_address = SocketAddr::new(env.server_address, env.server_port);
    let listener = tokio::net::TcpListener::bind(server_address)
        .await
        .map_err(InitError::TcpBind)?;
    info!(%server_address, "Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(InitError::TcpServe)?;

    Ok(())
}
