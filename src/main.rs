use hospital_directory::{api::Server, config::Config};
use tracing::info;
use tracing_subscriber::EnvFilter;

const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

/// The main entry point for the hospital directory.
///
/// Initializes logging, loads the configuration and serves the REST API
/// until the process exits. Records live only in memory.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs default to info for this crate; RUST_LOG overrides.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("hospital_directory=info")),
        )
        .init();

    let path = std::env::var("HOSPITAL_DIRECTORY_CONFIG")
        .unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
    let config = Config::load(&path)?.with_env_port()?;
    info!("Hospital directory starting with config: {:?}", config);

    let server = Server::new(config);
    server.start().await?;

    Ok(())
}
