use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::{TokioIo, TokioTimer};
use tokio::net::TcpListener;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use shared::config::{LiveConfig, load_config};

use server::AppState;
use server::auth::jwt::JwtKeys;
use server::database;
use server::handlers::http::routes::build_router;
use server::handlers::http::utils::internal_error_response;
use server::handlers::http::{handle_request, routes::Router};

#[derive(Parser, Debug)]
#[command(name = "booking-server", about = "Booking platform HTTP server")]
struct Args {
    /// Path to the TOML configuration file
    #[arg(short, long, default_value = "config.toml")]
    config: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();

    // Any config problem is fatal here, before the listener binds — in
    // particular a missing or too-short signing secret.  Tokens must never
    // be minted lazily against an unvalidated secret.
    let app_config =
        load_config(&args.config).with_context(|| format!("Bad config: {}", args.config))?;

    let secret = app_config
        .auth
        .resolved_jwt_secret()
        .context("Signing secret disappeared after validation")?;
    let jwt = Arc::new(JwtKeys::new(&secret));

    let db = database::connect(&app_config.database.path)
        .await
        .with_context(|| format!("Failed to open database: {}", app_config.database.path))?;

    let addr: SocketAddr = app_config
        .server
        .addr()
        .parse()
        .with_context(|| format!("Invalid bind address: {}", app_config.server.addr()))?;

    let config = LiveConfig::new(app_config);
    let state = AppState {
        db,
        config: config.clone(),
        jwt,
    };
    let router = Arc::new(build_router());

    spawn_config_reload(config, args.config.clone());

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    info!("Listening on http://{}", addr);

    serve(listener, router, state).await
}

/// Accept loop: one spawned task per connection, every request funneled
/// through the gatekeeper before the route table.
async fn serve(listener: TcpListener, router: Arc<Router>, state: AppState) -> Result<()> {
    loop {
        let (stream, peer) = match listener.accept().await {
            Ok(conn) => conn,
            Err(err) => {
                error!("Failed to accept connection: {}", err);
                continue;
            }
        };

        let io = TokioIo::new(stream);
        let router = router.clone();
        let state = state.clone();

        tokio::task::spawn(async move {
            let service = service_fn(move |req| {
                let router = router.clone();
                let state = state.clone();
                async move {
                    match handle_request(&router, req, state).await {
                        Ok(response) => Ok::<_, std::convert::Infallible>(response),
                        Err(err) => {
                            error!("Handler error: {:#}", err);
                            Ok(internal_error_response())
                        }
                    }
                }
            });

            if let Err(err) = http1::Builder::new()
                .timer(TokioTimer::new())
                .serve_connection(io, service)
                .await
            {
                warn!("Error serving connection from {}: {:?}", peer, err);
            }
        });
    }
}

/// Reload the config file on SIGHUP.
///
/// The signing secret is intentionally NOT re-read: rotating it would
/// instantly invalidate every active session, so that takes a restart.
/// A reload that fails validation keeps the old config.
fn spawn_config_reload(config: LiveConfig, path: String) {
    #[cfg(unix)]
    tokio::spawn(async move {
        use tokio::signal::unix::{SignalKind, signal};

        let mut hup = match signal(SignalKind::hangup()) {
            Ok(hup) => hup,
            Err(err) => {
                warn!("SIGHUP handler unavailable, hot-reload disabled: {}", err);
                return;
            }
        };

        while hup.recv().await.is_some() {
            match load_config(&path) {
                Ok(new_config) => {
                    config.reload(new_config).await;
                    info!("Configuration reloaded from {}", path);
                }
                Err(err) => {
                    error!("Config reload failed, keeping previous config: {}", err);
                }
            }
        }
    });

    #[cfg(not(unix))]
    {
        let _ = (config, path);
    }
}
