//! Development server for admin UI work
//!
//! Runs the api against the in-memory booking backend seeded with
//! [`DevDataset`], so a frontend can be developed without a real backend.
//! The mocked clock is kept in step with real time.
//!
//! Usage: cargo run -p dev-server
//!        DEV_SERVER_PORT=8000 cargo run -p dev-server

use anyhow::Result;
use jiff::Timestamp;
use std::time::Duration;
use test_helpers::mock::DevDataset;
use tokio::time::interval;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();
    let subscriber = api::telemetry::get_subscriber("info".into());
    api::telemetry::init_subscriber(subscriber)?;

    let port = std::env::var("DEV_SERVER_PORT")
        .ok()
        .map(|p| p.parse())
        .transpose()?
        .unwrap_or(0);

    info!("Starting development server");
    let app = test_helpers::spawn_app_on_port(port).await;
    app.time_source.set(Timestamp::now());

    let dataset = DevDataset::create(&app)?;
    start_time_sync_task(&app);

    info!("API: http://127.0.0.1:{}/api", app.port);
    dataset.print_summary();
    info!("Press Ctrl+C to shut down");

    tokio::signal::ctrl_c().await?;
    info!("Shutting down development server");
    Ok(())
}

/// Keep the mocked clock on real time so the "today" filters follow the
/// wall clock.
fn start_time_sync_task(app: &test_helpers::TestApp) {
    let time_source = app.time_source.clone();

    tokio::spawn(async move {
        let mut interval = interval(Duration::from_secs(1));
        loop {
            interval.tick().await;
            time_source.set(Timestamp::now());
        }
    });
}
