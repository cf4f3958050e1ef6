// Main entry point - Dependency injection and server setup
use std::{net::SocketAddr, sync::Arc};
use axum::{
    routing::{get, post, put},
    Router,
};
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use climate_sim::application::netlogo_session::NetLogoSession;
use climate_sim::application::simulation_service::SimulationService;
use climate_sim::infrastructure::broadcast_sink::BroadcastSink;
use climate_sim::infrastructure::config::load_simulator_config;
use climate_sim::presentation::app_state::AppState;
use climate_sim::presentation::handlers::{
    control, frame_error, frame_loaded, get_chart, get_reference_levels, get_session,
    get_temperature, health_check, list_models, select_model, set_co2, stream_commands,
    upload_model,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("climate_sim=info,tower_http=info")),
        )
        .init();

    // Load configuration
    let config = load_simulator_config()?;
    let domain = config.chart.domain()?;

    // Frame commands fan out to every subscribed page
    let command_sink = BroadcastSink::new();

    // Create services (application layer)
    let simulation_service =
        SimulationService::new(config.model.to_model(), domain, config.chart.clone());
    let netlogo_session = NetLogoSession::new(
        Arc::new(command_sink.clone()),
        config.netlogo.co2_variables.clone(),
        config.netlogo.catalog(),
    );

    // Create application state
    let state = Arc::new(AppState {
        simulation_service,
        netlogo_session,
        command_sink,
    });

    // Build router (presentation layer)
    // JSON bodies are compressed by the response helpers, so no CompressionLayer here
    let router = Router::new()
        .route("/healthz", get(health_check))
        .route("/temperature", get(get_temperature))
        .route("/chart", get(get_chart))
        .route("/reference-levels", get(get_reference_levels))
        .route("/session", get(get_session))
        .route("/session/co2", put(set_co2))
        .route("/netlogo/models", get(list_models))
        .route("/netlogo/model", put(select_model))
        .route("/netlogo/frame/loaded", post(frame_loaded))
        .route("/netlogo/frame/error", post(frame_error))
        .route("/netlogo/control/:action", post(control))
        .route("/netlogo/upload", post(upload_model))
        .route("/netlogo/commands", get(stream_commands))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Start server
    let addr: SocketAddr = config.server.bind.parse()?;
    tracing::info!("Starting climate-sim service on {}", addr);

    axum::serve(tokio::net::TcpListener::bind(addr).await?, router).await?;

    Ok(())
}
