//! Server configuration loaded from environment variables.

use std::path::{Path, PathBuf};

use anyhow::Context;

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_MODELS_DIR: &str = "models";

#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// Interface to bind (from VECTRAG_HOST)
    pub host: String,
    /// First port to try (from VECTRAG_PORT)
    pub port: u16,
    /// Directory holding one YAML file per model (from VECTRAG_MODELS_DIR)
    pub models_dir: PathBuf,
    /// Permissive CORS for a separately served admin UI (from VECTRAG_ENABLE_CORS)
    pub enable_cors: bool,
}

impl ServerConfig {
    /// Load configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(host) = std::env::var("VECTRAG_HOST") {
            config.host = host;
        }
        if let Some(port) = std::env::var("VECTRAG_PORT")
            .ok()
            .and_then(|s| s.parse::<u16>().ok())
        {
            config.port = port;
        }
        if let Ok(dir) = std::env::var("VECTRAG_MODELS_DIR") {
            config.models_dir = PathBuf::from(dir);
        }
        if let Ok(flag) = std::env::var("VECTRAG_ENABLE_CORS") {
            config.enable_cors = parse_flag(&flag);
        }

        config
    }

    /// The models directory as an absolute path, resolved against the working directory.
    pub fn resolved_models_dir(&self) -> anyhow::Result<PathBuf> {
        resolve_dir(&self.models_dir)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            models_dir: PathBuf::from(DEFAULT_MODELS_DIR),
            enable_cors: false,
        }
    }
}

fn parse_flag(s: &str) -> bool {
    matches!(
        s.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

fn resolve_dir(dir: &Path) -> anyhow::Result<PathBuf> {
    std::path::absolute(dir)
        .with_context(|| format!("Failed to resolve models directory {}", dir.display()))
}
