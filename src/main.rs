//! Word game backend binary entrypoint wiring configuration, storage, and the REST router.

use std::{net::SocketAddr, sync::Arc};

use anyhow::Context;
use axum::Router;
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use wordgame_back::{
    config::{AppConfig, StorageConfig},
    dao::game_store::InMemoryGameStore,
    routes,
    state::{AppState, SharedState},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is the normal case in containers.
    let dotenv = dotenvy::dotenv();
    init_tracing();
    match dotenv {
        Ok(path) => info!(path = %path.display(), "loaded .env file"),
        Err(err) if err.not_found() => {}
        Err(err) => warn!(error = %err, "failed to load .env file"),
    }

    let config = AppConfig::from_env().context("loading configuration")?;
    let app_state = AppState::new();
    start_storage(&app_state, config.storage).await?;

    let app = build_router(app_state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!(%addr, "starting server");

    let listener = TcpListener::bind(addr).await.context("binding server")?;
    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("serving axum")?;

    Ok(())
}

/// Install the configured storage backend, spawning the supervisor for remote stores.
async fn start_storage(state: &SharedState, storage: StorageConfig) -> anyhow::Result<()> {
    match storage {
        StorageConfig::Memory => {
            warn!("using in-memory storage; games are lost on restart");
            state
                .install_game_store(Arc::new(InMemoryGameStore::new()))
                .await;
            Ok(())
        }
        #[cfg(feature = "mongo-store")]
        StorageConfig::Mongo { uri, database } => {
            use wordgame_back::dao::{
                game_store::{
                    GameStore,
                    mongodb::{MongoConfig, MongoGameStore},
                },
                storage::StorageError,
            };
            use wordgame_back::services::storage_supervisor;

            info!(%database, "using MongoDB storage");
            let connect = move || {
                let uri = uri.clone();
                let database = database.clone();
                async move {
                    let config = MongoConfig::from_uri(&uri, &database)
                        .await
                        .map_err(StorageError::from)?;
                    let store = MongoGameStore::connect(config)
                        .await
                        .map_err(StorageError::from)?;
                    Ok::<_, StorageError>(Arc::new(store) as Arc<dyn GameStore>)
                }
            };
            tokio::spawn(storage_supervisor::run(state.clone(), connect));
            Ok(())
        }
        #[cfg(not(feature = "mongo-store"))]
        StorageConfig::Mongo { .. } => {
            anyhow::bail!("MongoDB storage requested but the `mongo-store` feature is disabled")
        }
    }
}

/// Build the top-level router and attach cross-cutting middleware layers.
fn build_router(state: SharedState) -> Router<()> {
    routes::router(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

/// Configure tracing subscribers so logs include spans by default.
fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info,tower_http=debug".into());
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Wait for Ctrl+C or SIGTERM and shut the server down gracefully.
async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};

        let mut term = signal(SignalKind::terminate()).expect("install SIGTERM handler");
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {},
            _ = term.recv() => {},
        }
    }

    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
    info!("shutdown signal received");
}
