//! Screengate HTTP server entrypoint.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use mimalloc::MiMalloc;
use tokio::net::TcpListener;
use tokio::signal;

use screengate::broker::InvocationBroker;
use screengate::config::Config;
use screengate::gateway::{HandlerState, create_router_with_state};
use screengate::scorer::LambdaScorer;
use screengate::store::FsRecordStore;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

fn main() -> anyhow::Result<()> {
    // The health check builds its own current-thread runtime; block_on
    // panics inside an already-running runtime, so this must branch before
    // tokio starts.
    if std::env::args().any(|arg| arg == "--health-check") {
        std::process::exit(run_health_check());
    }

    serve()
}

#[tokio::main]
async fn serve() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = Config::from_env()?;
    config.validate()?;
    let addr: SocketAddr = config.socket_addr().parse()?;

    tracing::info!(
        bind_addr = %config.bind_addr,
        port = config.port,
        data_path = %config.data_path.display(),
        scorer_function = %config.scorer_function,
        "Screengate starting"
    );

    let store = FsRecordStore::new(config.data_path.clone());
    store.ensure_data_path()?;

    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(30))
        .build()?;
    let scorer = match &config.scorer_endpoint {
        Some(endpoint) => {
            tracing::warn!(endpoint = %endpoint, "Using scorer endpoint override");
            LambdaScorer::with_endpoint(client, &config.scorer_function, endpoint)
        }
        None => LambdaScorer::new(client, &config.scorer_function, &config.scorer_region),
    };
    tracing::info!(invoke_url = %scorer.invoke_url(), "Remote scorer configured");

    let broker = Arc::new(InvocationBroker::new(store, scorer));
    let state = HandlerState::new(broker);

    let app = create_router_with_state(state);

    let listener = TcpListener::bind(addr).await?;
    tracing::info!(addr = %addr, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Screengate shutdown complete");
    Ok(())
}

fn run_health_check() -> i32 {
    let port = std::env::var("SCREENGATE_PORT")
        .ok()
        .and_then(|p| p.parse::<u16>().ok())
        .unwrap_or(screengate::config::DEFAULT_PORT);

    let url = format!("http://127.0.0.1:{}/healthz", port);

    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("failed to build runtime");

    rt.block_on(async {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(1))
            .build()
            .expect("failed to build client");

        match client.get(&url).send().await {
            Ok(res) if res.status().is_success() => 0,
            _ => 1,
        }
    })
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}
