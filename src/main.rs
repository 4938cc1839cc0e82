//! Attendance Hub Server entrypoint
//!
//! Loads configuration, installs logging, and hands off to
//! [`lifecycle`](attendance_server::lifecycle); nothing else lives here.

use anyhow::Result;
use attendance_server::config::ServerConfig;
use attendance_server::lifecycle::{bootstrap, run};
use attendance_server::logging;
use log::info;

#[actix_web::main]
async fn main() -> Result<()> {
    // A missing config.toml is fine; required auth values can come from env
    let config_path = "config.toml";
    let config = match ServerConfig::from_file(config_path) {
        Ok(cfg) => {
            if std::path::Path::new(config_path).exists() {
                eprintln!(
                    "✅ Loaded config from: {}",
                    std::fs::canonicalize(config_path)
                        .unwrap_or_else(|_| std::path::PathBuf::from(config_path))
                        .display()
                );
            } else {
                eprintln!("No config.toml found; using defaults and environment overrides");
            }
            cfg
        },
        Err(e) => {
            eprintln!("❌ FATAL: Failed to load configuration: {}", e);
            eprintln!("❌ Server cannot start without valid configuration");
            std::process::exit(1);
        },
    };

    // Logging before any other side effects
    logging::init_logging(
        &config.logging.level,
        &config.logging.file_path,
        config.logging.log_to_console,
        Some(&config.logging.targets),
        &config.logging.format,
    )?;

    let version = env!("CARGO_PKG_VERSION");
    info!("Attendance Hub server v{}", version);
    info!("Host: {}  Port: {}", config.server.host, config.server.port);

    let components = bootstrap(&config)?;
    run(&config, components).await
}
