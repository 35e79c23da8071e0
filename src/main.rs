use datasweep::infrastructure::config::AppConfig;
use datasweep::interfaces::http::start_server;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let _ = dotenvy::dotenv();
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .try_init();

    let config = AppConfig::load()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string()))?;

    if config.llm.api_key.is_none() {
        warn!("No GROQ_API_KEY configured; AI endpoints will return errors");
    }
    info!(host = %config.host, port = config.port, "Starting datasweep");

    start_server(config)?.await
}
