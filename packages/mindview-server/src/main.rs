use std::net::SocketAddr;
use std::sync::Arc;

use clap::Parser;
use mindview_server::{
    cli::Cli, config::ServerConfig, create_router, state::ServerState,
};
use mind_rs::{synth, RecordKind};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mindview_server=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Parse CLI arguments
    let cli = Cli::parse();

    // Load configuration
    let mut config = ServerConfig::from_env()?;
    if let Some(port) = cli.port {
        config.port = port;
    }

    info!("Starting MINDVIEW server v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration loaded:");
    info!("   Port: {}", config.port);
    info!("   Bind address: {}", config.bind_addr);
    info!("   Live window: {}s, scroll step: {}s", config.window_length, config.scroll_step);
    info!("   Trend points: {}", config.trend_points);
    info!("   Max upload size: {} bytes", config.max_upload_size);

    // Create server state
    let state = Arc::new(ServerState::new(config.clone()));

    if cli.preload_demo {
        for kind in RecordKind::ALL {
            let record = synth::demo_record(kind)?;
            let summary = state.store.install(record);
            info!("   Preloaded demo record for {}", summary.kind);
        }
    }

    // Build router
    let app = create_router(state);

    // Start server
    let addr: SocketAddr = config.bind_address().parse()?;
    info!("Listening on http://{}", addr);
    info!("Health endpoint: http://{}/api/health", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
