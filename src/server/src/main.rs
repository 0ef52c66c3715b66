use anyhow::Result;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> Result<()> {
    let subscriber = FmtSubscriber::builder().with_max_level(Level::INFO).finish();
    tracing::subscriber::set_global_default(subscriber)
        .expect("setting default subscriber failed");

    let config_path =
        std::env::args().nth(1).unwrap_or_else(|| "techdoc.toml".to_owned());
    let config = match common::config::load(&config_path) {
        Ok(config) => config,
        Err(e) => {
            info!("config {} not loaded ({}), using defaults", config_path, e);
            common::config::Config::default()
        }
    };

    storage::init(&config.storage).await?;
    info!("storage ready");

    info!("listening on port {}", config.port);
    api::start(config.port).await;

    Ok(())
}
