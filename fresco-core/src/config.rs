// Server configuration - defaults first, environment overrides second

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub http_port: u16,
    pub upload_dir: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            http_port: 8000,
            upload_dir: PathBuf::from("./uploads"),
        }
    }
}

impl ServerConfig {
    /// Default configuration with `FRESCO_PORT` / `FRESCO_UPLOAD_DIR`
    /// environment overrides applied.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(port) = std::env::var("FRESCO_PORT") {
            if let Ok(port) = port.parse() {
                config.http_port = port;
            }
        }
        if let Ok(dir) = std::env::var("FRESCO_UPLOAD_DIR") {
            config.upload_dir = PathBuf::from(dir);
        }
        config
    }
}
