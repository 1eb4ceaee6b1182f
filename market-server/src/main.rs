use market_server::{Config, Server, ServerState, print_banner};
use market_server::utils::logger::init_logger;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Environment and configuration
    dotenv::dotenv().ok();
    let config = Config::from_env();
    config.ensure_work_dir_structure()?;

    // 2. Logging: stdout in development, daily rolling files otherwise.
    //    The guard must outlive the server or buffered file output is
    //    dropped on shutdown.
    let log_dir = config.log_dir();
    let _log_guard = if config.is_development() {
        init_logger("info", None)
    } else {
        init_logger("info", log_dir.to_str())
    };

    print_banner();
    tracing::info!("🥬 Farmgate Market Server starting...");
    tracing::info!(
        environment = %config.environment,
        port = config.http_port,
        "configuration loaded"
    );

    // 3. State (work dir, database, services)
    let state = ServerState::initialize(&config).await;

    // 4. Serve until ctrl-c
    let server = Server::with_state(config, state);
    if let Err(e) = server.run().await {
        tracing::error!("Server error: {}", e);
        return Err(e.into());
    }

    Ok(())
}
