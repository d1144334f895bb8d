use std::{
    net::IpAddr,
    process::ExitCode,
    sync::{Arc, Mutex},
};

use axum::{
    Router,
    extract::{MatchedPath, Request},
    middleware,
};
use axum_server::Handle;
use clap::Parser;
use rusqlite::Connection;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use transacoes_rs::{
    Config, build_router, close_connection, graceful_shutdown, logging_middleware,
    stores::sqlite::create_app_state,
};

/// The REST API server for recording transactions.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to the application SQLite database, or `:memory:`.
    #[arg(long, env = "DATABASE_URL", default_value = "transacoes.db")]
    db_path: String,

    /// The address to serve the API from.
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    host: IpAddr,

    /// The port to serve the API from.
    #[arg(short, long, env = "PORT", default_value_t = 3000)]
    port: u16,

    /// Require the API key in the `X-API-Key` header on all routes except `/`.
    #[arg(long, env = "REQUIRE_API_KEY")]
    require_api_key: bool,

    /// The shared API key clients must send when the key is required.
    #[arg(long, env = "API_KEY", hide_env_values = true)]
    api_key: Option<String>,
}

#[tokio::main]
async fn main() -> ExitCode {
    setup_logging();

    let args = Args::parse();

    let config = match Config::new(
        args.host,
        args.port,
        &args.db_path,
        args.require_api_key,
        args.api_key.as_deref(),
    ) {
        Ok(config) => config,
        Err(error) => {
            tracing::error!("Invalid configuration: {error}");
            return ExitCode::FAILURE;
        }
    };

    let conn = match Connection::open(&config.db_path) {
        Ok(conn) => Arc::new(Mutex::new(conn)),
        Err(error) => {
            tracing::error!("Could not open database \"{}\": {error}", config.db_path);
            return ExitCode::FAILURE;
        }
    };

    let state = match create_app_state(conn.clone(), config.access_gate) {
        Ok(state) => state,
        Err(error) => {
            tracing::error!("Could not initialize database: {error}");
            return ExitCode::FAILURE;
        }
    };

    let handle = Handle::new();
    tokio::spawn(graceful_shutdown(handle.clone()));

    let router = build_router(state).layer(middleware::from_fn(logging_middleware));
    let router = add_tracing_layer(router);

    tracing::info!("HTTP server listening on {}", config.addr);
    let result = axum_server::bind(config.addr)
        .handle(handle)
        .serve(router.into_make_service())
        .await;

    close_connection(conn);

    match result {
        Ok(()) => {
            tracing::info!("Server stopped.");
            ExitCode::SUCCESS
        }
        Err(error) => {
            tracing::error!("Server error: {error}");
            ExitCode::FAILURE
        }
    }
}

fn setup_logging() {
    let stdout_log = tracing_subscriber::fmt::layer().pretty();
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(stdout_log)
        .init();
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
        // Errors are logged where they are converted into responses.
        .on_failure(());

    router.layer(tracing_layer)
}
