use packet_service::config::Config;
use packet_service::startup::Application;
use service_core::observability::init_tracing;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // The log directory is needed before the rest of the config loads.
    let log_dir = std::env::var("PACKET_LOG_DIR").unwrap_or_else(|_| "data/log".to_string());
    let _guard = init_tracing("packet-service", "info,packet_service=debug", &log_dir);

    let config = Config::from_env().map_err(|e| {
        tracing::error!("Failed to load configuration: {}", e);
        e
    })?;

    let application = Application::build(config).await?;
    application.run_until_stopped().await?;

    Ok(())
}
