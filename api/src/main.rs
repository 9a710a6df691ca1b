use api::{
    Config,
    backend::BackendService,
    build,
    telemetry::{get_subscriber, init_subscriber},
    time::TimeSource,
};

/// Hotel admin pricing service
///
/// Environment variables can be set directly or loaded from a .env file in the project root.
///
/// Required environment variables:
/// - BACKEND_URL: Base URL of the booking backend (its admin API lives under /admin)
/// - BACKEND_TOKEN: Bearer token for the booking backend
/// - IP_ADDRESS: Server bind address (127.0.0.1 for local, 0.0.0.0 for public)
/// - PORT: Server port
///
/// Optional:
/// - ALLOWED_ORIGINS: CORS origins ("*" for any origin in development, or comma-separated list for production). Defaults to "*"
/// - TIME_ZONE: IANA time zone used for the "today" filters. Defaults to UTC
///
/// Example .env file:
/// BACKEND_URL=http://localhost:4000
/// BACKEND_TOKEN=dev-token
/// IP_ADDRESS=127.0.0.1
/// PORT=8000
/// ALLOWED_ORIGINS=*
/// TIME_ZONE=Europe/Paris
///
/// Example production command:
/// BACKEND_URL=https://booking.internal BACKEND_TOKEN=... \
/// IP_ADDRESS=0.0.0.0 PORT=8000 ALLOWED_ORIGINS=https://admin.example.com \
/// cargo run
#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // silently ignored if there is no .env file
    let _ = dotenvy::dotenv();

    let subscriber = get_subscriber("info".into());
    init_subscriber(subscriber)?;

    let mut config = Config::from_env()?;

    #[cfg(not(feature = "mock-time"))]
    let time_source = TimeSource::new();
    #[cfg(feature = "mock-time")]
    let time_source = TimeSource::new(jiff::Timestamp::now());

    let backend = BackendService::new(&config);

    let server = build(&mut config, time_source, backend)?;
    server.await?;
    Ok(())
}
