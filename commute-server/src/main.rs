use std::process::ExitCode;

use chrono::Utc;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use commute_server::board::ArrivalBoard;
use commute_server::config::ServerConfig;
use commute_server::external::Providers;
use commute_server::openmeteo::OpenMeteoClient;
use commute_server::registry::StationRegistry;
use commute_server::tfl::TflClient;
use commute_server::web::{AppState, create_router};

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,tower_http=info")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "server exited");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = ServerConfig::from_env()?;

    let registry = StationRegistry::bart()?;
    let weather = OpenMeteoClient::new(config.open_meteo.clone())?;
    let tfl = TflClient::new(config.tfl.clone())?;
    let board = ArrivalBoard::new(registry, Providers::new(weather, tfl), &config.board);

    // Generate up front so the first request doesn't pay for it
    let schedule = board.schedule(Utc::now()).await;
    info!(
        stations = schedule.station_count(),
        trains = schedule.train_count(),
        "schedule ready"
    );

    let app = create_router(AppState::new(board), &config.static_dir);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    info!(addr = %config.bind_addr, static_dir = %config.static_dir.display(), "listening");

    axum::serve(listener, app).await?;
    Ok(())
}
