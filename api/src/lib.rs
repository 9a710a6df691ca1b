pub mod backend;
pub mod export;
pub mod occupancy;
pub mod receipt;
pub mod routes;
pub mod table;
pub mod telemetry;
pub mod time;

use actix_cors::Cors;
use actix_web::dev::Server;
use actix_web::{App, HttpServer, web};
use anyhow::Context;
use jiff::tz::TimeZone;
use secrecy::SecretBox;
use std::net::TcpListener;

use crate::backend::BackendService;
use crate::time::TimeSource;

/// Build the server, but not await it.
///
/// Returns the port that the server has bound to by modifying the config.
pub fn build(
    config: &mut Config,
    time_source: TimeSource,
    backend: BackendService,
) -> std::io::Result<Server> {
    let time_source = web::Data::new(time_source);
    let backend = web::Data::new(backend);
    let time_zone = web::Data::new(config.time_zone.clone());

    let allowed_origins = config.allowed_origins.clone();

    // OS assigns the port if binding to 0
    let listener = TcpListener::bind(format!("{}:{}", config.ip, config.port))?;
    config.port = listener.local_addr()?.port();
    tracing::info!(port = config.port, "Listening");
    let server = HttpServer::new(move || {
        let cors = if allowed_origins.iter().any(|o| o == "*") {
            // development
            Cors::default()
                .allow_any_origin()
                .allow_any_method()
                .allow_any_header()
                .supports_credentials()
        } else {
            let mut cors = Cors::default()
                .allow_any_method()
                .allow_any_header()
                .supports_credentials();
            for origin in &allowed_origins {
                cors = cors.allowed_origin(origin);
            }
            cors
        };

        App::new()
            .wrap(cors)
            .service(routes::api_services())
            .app_data(backend.clone())
            .app_data(time_source.clone())
            .app_data(time_zone.clone())
    })
    .listen(listener)?
    .run();
    Ok(server)
}

pub struct Config {
    /// Base url of the booking backend, without the `/admin` prefix
    pub backend_url: String,
    pub backend_token: SecretBox<String>,
    /// set to "0.0.0.0" for public access, "127.0.0.1" for local dev
    pub ip: String,
    /// set to 0 to get an os-assigned port
    pub port: u16,
    /// List of allowed CORS origins. Use "*" to allow any origin (development only)
    pub allowed_origins: Vec<String>,
    /// Where "today" is evaluated for the check-in and check-out filters
    pub time_zone: TimeZone,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        use std::env::var;

        let allowed_origins = var("ALLOWED_ORIGINS")
            .unwrap_or_else(|_| "*".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let time_zone = match var("TIME_ZONE") {
            Ok(name) if name != "UTC" => TimeZone::get(&name)
                .with_context(|| format!("Unknown TIME_ZONE {name}"))?,
            _ => TimeZone::UTC,
        };

        Ok(Config {
            backend_url: var("BACKEND_URL").context("BACKEND_URL must be set")?,
            backend_token: SecretBox::new(Box::new(
                var("BACKEND_TOKEN").context("BACKEND_TOKEN must be set")?,
            )),
            ip: var("IP_ADDRESS").context("IP_ADDRESS must be set")?,
            port: var("PORT")
                .context("PORT must be set")?
                .parse()
                .context("PORT must be a port number")?,
            allowed_origins,
            time_zone,
        })
    }
}
