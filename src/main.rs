// Main entry point - Dependency injection and server setup
use std::{net::SocketAddr, sync::Arc, time::Duration};
use anyhow::Context;
use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use live_scope::application::data_source::DataSource;
use live_scope::application::scheduler::Scheduler;
use live_scope::application::session::ScopeSession;
use live_scope::application::update_strategy::strategy_for;
use live_scope::infrastructure::config::{load_scope_config, SourceConfig, SourceKind};
use live_scope::infrastructure::frame_hub::FrameHub;
use live_scope::infrastructure::http_source::HttpSource;
use live_scope::infrastructure::sim_source::SimSource;
use live_scope::presentation::app_state::AppState;
use live_scope::presentation::handlers::{health_check, latest_frame, stream_frames};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("live_scope=info,tower_http=info")),
        )
        .init();

    // Load configuration
    let config = load_scope_config()?;
    let settings = config.window.settings()?;

    // Ingestion side (infrastructure layer)
    let source = build_source(&config.source)?;

    // Scope session and scheduler (application layer)
    let frames = FrameHub::new();
    let strategy = strategy_for(config.window.strategy);
    tracing::info!(
        "Window of {} with {:?} polling, {} updates",
        settings.window_duration(),
        settings.interval(),
        strategy.name()
    );
    let session = ScopeSession::new(settings, config.viewport, strategy);
    let scheduler = Scheduler::new(source, Arc::new(frames.clone()), session).start();

    // Create application state
    let state = Arc::new(AppState {
        frames,
        phase: scheduler.phase_receiver(),
    });

    // Build router (presentation layer)
    let router = Router::new()
        .route("/healthz", get(health_check))
        .route("/frame", get(latest_frame))
        .route("/frames/stream", get(stream_frames))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Start server
    let addr: SocketAddr = config
        .server
        .bind
        .parse()
        .with_context(|| format!("Invalid bind address {}", config.server.bind))?;
    tracing::info!("Starting live-scope service on {}", addr);

    axum::serve(tokio::net::TcpListener::bind(addr).await?, router)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await?;

    scheduler.stop().await?;
    Ok(())
}

fn build_source(config: &SourceConfig) -> anyhow::Result<Arc<dyn DataSource>> {
    let source: Arc<dyn DataSource> = match config.kind {
        SourceKind::Http => Arc::new(HttpSource::new(
            config.url.clone(),
            config.keys.clone(),
            Duration::from_millis(config.timeout_ms),
        )?),
        SourceKind::Sim => Arc::new(SimSource::new(
            config.sim.series.clone(),
            config.sim.sample_period,
            config.sim.samples_per_fetch,
            config.sim.warmup_fetches,
        )),
    };
    Ok(source)
}
