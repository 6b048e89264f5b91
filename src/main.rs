use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use companion_engine::api::{router, AppState};
use companion_engine::config::Settings;
use companion_engine::modules::session::SessionRegistry;

#[derive(Parser, Debug)]
#[command(name = "companion_engine", about = "Conversational companion engine server")]
struct Cli {
    /// Optional TOML configuration file; COMPANION_* environment variables
    /// override it.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the configured listen address, e.g. 127.0.0.1:8096.
    #[arg(long)]
    listen: Option<String>,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let mut settings = match Settings::load(cli.config.as_deref()) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Configuration error: {e}");
            std::process::exit(1);
        }
    };
    if let Some(listen) = cli.listen {
        settings.listen_addr = listen;
        if let Err(e) = settings.validate() {
            eprintln!("Configuration error: {e}");
            std::process::exit(1);
        }
    }

    let registry = match SessionRegistry::new(&settings).await {
        Ok(registry) => registry,
        Err(e) => {
            eprintln!("Startup failed: {e}");
            std::process::exit(1);
        }
    };

    let app = router(Arc::new(AppState::new(registry)));
    let listener = match tokio::net::TcpListener::bind(&settings.listen_addr).await {
        Ok(listener) => listener,
        Err(e) => {
            eprintln!("Failed to bind {}: {e}", settings.listen_addr);
            std::process::exit(1);
        }
    };

    tracing::info!(addr = %settings.listen_addr, "companion engine listening");
    if let Err(e) = axum::serve(listener, app).await {
        eprintln!("Server error: {e}");
        std::process::exit(1);
    }
}
