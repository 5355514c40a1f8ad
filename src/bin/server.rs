use std::{fs::OpenOptions, process::ExitCode, sync::Arc};

use axum::{
    Router,
    extract::{MatchedPath, Request},
    middleware,
};
use axum_server::Handle;
use clap::Parser;
use rusqlite::Connection;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{EnvFilter, Layer, filter, layer::SubscriberExt, util::SubscriberInitExt};

use cashbook::{
    Config, DatabaseLocation, build_router, cors_layer, graceful_shutdown, load_env_file,
    logging_middleware,
    stores::sqlite::create_app_state,
};

#[tokio::main]
async fn main() -> ExitCode {
    if let Err(error) = load_env_file() {
        eprintln!("Could not read .env file: {error}");
        return ExitCode::FAILURE;
    }

    let config = Config::parse();

    if let Err(error) = setup_logging(&config) {
        eprintln!("Could not set up logging: {error}");
        return ExitCode::FAILURE;
    }

    let connection = match open_database(&config.database_location()) {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("Could not open database: {error}");
            return ExitCode::FAILURE;
        }
    };

    let state = match create_app_state(connection) {
        Ok(state) => state,
        Err(error) => {
            tracing::error!("Could not initialize database: {error}");
            return ExitCode::FAILURE;
        }
    };

    let cors = match cors_layer(&config.cors_origin) {
        Ok(cors) => cors,
        Err(error) => {
            tracing::error!("Invalid CORS origin \"{}\": {error}", config.cors_origin);
            return ExitCode::FAILURE;
        }
    };

    let router = build_router(state)
        .layer(middleware::from_fn(logging_middleware))
        .layer(cors);
    let router = add_tracing_layer(router);

    let handle = Handle::new();
    tokio::spawn(graceful_shutdown(handle.clone()));

    let addr = config.socket_addr();
    tracing::info!("HTTP server listening on {addr}");

    if let Err(error) = axum_server::bind(addr)
        .handle(handle)
        .serve(router.into_make_service())
        .await
    {
        tracing::error!("Server error: {error}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

fn open_database(location: &DatabaseLocation) -> Result<Connection, rusqlite::Error> {
    match location {
        DatabaseLocation::InMemory => {
            tracing::warn!("Using an in-memory database, data will be lost on shutdown");
            Connection::open_in_memory()
        }
        DatabaseLocation::File(path) => {
            tracing::info!("Opening database {}", path.display());
            Connection::open(path)
        }
    }
}

/// Log to stdout at the level set by `RUST_LOG` (default `info`), and at the
/// debug level to `config.log_file` if it is set.
fn setup_logging(config: &Config) -> std::io::Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let stdout_log = tracing_subscriber::fmt::layer().with_filter(env_filter);

    let debug_log = match &config.log_file {
        Some(path) => {
            let log_file = OpenOptions::new().create(true).append(true).open(path)?;

            Some(
                tracing_subscriber::fmt::layer()
                    .with_ansi(false)
                    .with_writer(Arc::new(log_file))
                    .with_filter(filter::LevelFilter::DEBUG),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(stdout_log)
        .with(debug_log)
        .init();

    Ok(())
}

fn add_tracing_layer(router: Router) -> Router {
    let tracing_layer = TraceLayer::new_for_http()
        .make_span_with(|req: &Request| {
            let method = req.method();
            let uri = req.uri();

            let matched_path = req
                .extensions()
                .get::<MatchedPath>()
                .map(|matched_path| matched_path.as_str());

            tracing::debug_span!("request", %method, %uri, matched_path)
        })
        // Errors are already logged by the handlers.
        .on_failure(());

    router.layer(tracing_layer)
}
