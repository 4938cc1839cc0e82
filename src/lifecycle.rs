//! Server lifecycle management helpers.
//!
//! [`bootstrap`] builds the Supabase client and the OAuth flow engine from
//! configuration; [`run`] wires the HTTP server around them and coordinates
//! graceful shutdown.

use crate::config::ServerConfig;
use crate::{middleware, routes};
use actix_web::{web, App, HttpServer};
use anyhow::Result;
use attendance_oauth::{GoogleOauthFlow, IdentityProvider, RoleStore, SupabaseClient};
use log::info;
use std::net::{SocketAddr, TcpListener};
use std::sync::Arc;

/// Aggregated application components that need to be shared across the
/// HTTP server and shutdown handling.
pub struct ApplicationComponents {
    pub flow: Arc<GoogleOauthFlow>,
}

/// Build the Supabase client and the OAuth flow engine from configuration.
///
/// The same client serves as both the identity provider (token exchange)
/// and the role store (role-table lookup).
pub fn bootstrap(config: &ServerConfig) -> Result<ApplicationComponents> {
    let supabase = Arc::new(SupabaseClient::new(&config.auth)?);
    info!("Supabase client initialized for {}", config.auth.supabase_url);

    let provider: Arc<dyn IdentityProvider> = supabase.clone();
    let roles: Arc<dyn RoleStore> = supabase;
    let flow = Arc::new(GoogleOauthFlow::new(config.auth.clone(), provider, roles));

    Ok(ApplicationComponents { flow })
}

/// Start the HTTP server and manage graceful shutdown.
pub async fn run(config: &ServerConfig, components: ApplicationComponents) -> Result<()> {
    let bind_addr = format!("{}:{}", config.server.host, config.server.port);
    info!("Starting HTTP server on {}", bind_addr);

    let workers = if config.server.workers == 0 {
        num_cpus::get()
    } else {
        config.server.workers
    };
    info!(
        "Server config: workers={}, cookie_secure={}, allowed_email_domain={}",
        workers, config.auth.cookie_secure, config.auth.allowed_email_domain
    );

    let flow = components.flow.clone();
    let auth_settings = config.auth.clone();
    let cors_config = config.clone();

    let server = HttpServer::new(move || {
        App::new()
            .wrap(middleware::request_logger())
            .wrap(middleware::build_cors_from_config(&cors_config))
            .app_data(web::Data::new(flow.clone()))
            .app_data(web::Data::new(auth_settings.clone()))
            .configure(routes::configure)
    })
    .bind(&bind_addr)?
    .workers(workers)
    .run();

    let server_handle = server.handle();
    let server_task = tokio::spawn(server);

    tokio::select! {
        result = server_task => {
            if let Err(e) = result {
                log::error!("Server task failed: {}", e);
            }
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Received Ctrl+C, initiating graceful shutdown...");
            server_handle.stop(true).await;
            info!("Graceful shutdown complete");
        }
    }

    info!("Server shutdown complete");
    Ok(())
}

/// A running HTTP server instance intended for integration tests.
///
/// This starts the same Actix app wiring as the production server
/// (middleware stack, route registration, app_data wiring) but binds to an
/// ephemeral port and provides an explicit shutdown handle.
pub struct RunningTestHttpServer {
    pub base_url: String,
    pub bind_addr: SocketAddr,
    server_handle: actix_web::dev::ServerHandle,
    server_task: tokio::task::JoinHandle<std::io::Result<()>>,
}

impl RunningTestHttpServer {
    pub async fn shutdown(self) {
        self.server_handle.stop(false).await;
        let _ = self.server_task.await;
    }
}

/// Start the HTTP server for integration tests on a random available port.
///
/// Notes:
/// - Does not install Ctrl+C handling.
/// - Caller must invoke `shutdown()` to stop the server.
pub async fn run_for_tests(
    config: &ServerConfig,
    components: ApplicationComponents,
) -> Result<RunningTestHttpServer> {
    let bind_ip = if config.server.host.is_empty() {
        "127.0.0.1"
    } else {
        config.server.host.as_str()
    };

    let listener = TcpListener::bind((bind_ip, 0))?;
    let bind_addr = listener.local_addr()?;

    let flow = components.flow.clone();
    let auth_settings = config.auth.clone();
    let cors_config = config.clone();

    let server = HttpServer::new(move || {
        App::new()
            .wrap(middleware::request_logger())
            .wrap(middleware::build_cors_from_config(&cors_config))
            .app_data(web::Data::new(flow.clone()))
            .app_data(web::Data::new(auth_settings.clone()))
            .configure(routes::configure)
    })
    .listen(listener)?
    .workers(1)
    .run();

    let server_handle = server.handle();
    let server_task = tokio::spawn(server);
    let base_url = format!("http://{}", bind_addr);

    Ok(RunningTestHttpServer {
        base_url,
        bind_addr,
        server_handle,
        server_task,
    })
}
