//! Wiring from configuration to a listening axum server.

use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;

use crate::api::{self, RouterOptions};
use crate::config::ServerConfig;
use crate::service::ModelService;
use crate::store::YamlModelRepository;

/// How many consecutive ports to try before giving up.
pub const PORT_ATTEMPTS: u16 = 3;

/// Bind the first free port in `base_port..base_port + PORT_ATTEMPTS`.
pub async fn bind_available(host: &str, base_port: u16) -> anyhow::Result<(u16, TcpListener)> {
    for offset in 0..PORT_ATTEMPTS {
        let Some(port) = base_port.checked_add(offset) else {
            break;
        };
        match TcpListener::bind((host, port)).await {
            Ok(listener) => {
                let port = listener.local_addr()?.port();
                return Ok((port, listener));
            }
            Err(e) => tracing::warn!("Port {} unavailable: {}", port, e),
        }
    }

    anyhow::bail!(
        "ports {}-{} on {} are all in use",
        base_port,
        base_port.saturating_add(PORT_ATTEMPTS - 1),
        host
    )
}

/// Build the router for `config`: YAML store, service, and HTTP layer.
pub fn build_app(config: &ServerConfig) -> anyhow::Result<axum::Router> {
    let models_dir = config.resolved_models_dir()?;
    let repo = YamlModelRepository::new(&models_dir)
        .with_context(|| format!("Failed to open models directory {}", models_dir.display()))?;
    tracing::info!("Serving models from {}", models_dir.display());

    let service = ModelService::new(Arc::new(repo));
    Ok(api::create_router(
        service,
        RouterOptions {
            enable_cors: config.enable_cors,
        },
    ))
}

pub async fn serve(config: ServerConfig) -> anyhow::Result<()> {
    let app = build_app(&config)?;
    let (port, listener) = bind_available(&config.host, config.port).await?;
    tracing::info!("vectrag listening on http://{}:{}", config.host, port);

    axum::serve(listener, app).await?;
    Ok(())
}
