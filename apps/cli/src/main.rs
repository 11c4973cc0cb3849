mod args;
mod config;
mod dirs;

use std::io;
use std::net::SocketAddr;

use app_api::AppContext;
use http_api::HttpState;
use metron_app::{AppPaths, AppState, ensure_app_data_dir};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = args::parse_args().map_err(|err| {
        eprintln!("{err}");
        args::print_help();
        io::Error::new(io::ErrorKind::InvalidInput, "invalid arguments")
    })?;

    let data_dir = dirs::resolve_data_dir(args.data_dir.clone()).map_err(io::Error::other)?;
    let paths = AppPaths::new(data_dir.clone());
    ensure_app_data_dir(&paths).map_err(|err| io::Error::other(err.to_string()))?;

    let config = config::load_or_create(&data_dir).map_err(io::Error::other)?;
    if config.created {
        println!(
            "Created config at {} (default port {}).",
            config.paths.file.display(),
            config.config.port
        );
    }
    let port = args.port.unwrap_or(config.config.port);

    let app_state = AppState::new(paths.db_path, paths.plan_defaults_path)
        .map_err(|err| io::Error::other(format!("load plan defaults: {}", err)))?;
    if let Err(err) = app_state.initialize() {
        return Err(io::Error::other(format!("failed to initialize database: {}", err)).into());
    }

    let context = AppContext {
        app_state,
        app_data_dir: data_dir,
    };
    let state = HttpState::new(context, config.config.service_token.clone());
    let router = http_api::router(state);

    let (listener, actual_port, used_fallback) = bind_port(port).await?;
    if used_fallback {
        tracing::warn!(
            configured = port,
            actual = actual_port,
            "configured port was unavailable, using a fallback for this run"
        );
    }

    println!("Metron is listening on http://127.0.0.1:{actual_port}");
    println!("Press Ctrl+C to stop.");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn bind_port(port: u16) -> Result<(tokio::net::TcpListener, u16, bool), io::Error> {
    if port == 0 {
        let listener = tokio::net::TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
        let actual_port = listener.local_addr()?.port();
        return Ok((listener, actual_port, false));
    }

    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => Ok((listener, port, false)),
        Err(_) => {
            let listener =
                tokio::net::TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
            let actual_port = listener.local_addr()?.port();
            Ok((listener, actual_port, true))
        }
    }
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
}
