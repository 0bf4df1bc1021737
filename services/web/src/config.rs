//! Server configuration loaded from the environment

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use ::config::{Config, Environment};
use serde::Deserialize;

/// Port used when `PORT` is not set
pub const DEFAULT_PORT: u16 = 8080;

/// Directory name searched for the built client bundle
pub const PUBLIC_DIR_NAME: &str = "public";

/// Static server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Port to listen on
    pub port: u16,
    /// Explicit public directory; resolved by `public_dir()` when unset
    pub public_dir: Option<PathBuf>,
    /// Mount the `/_ls` directory listing
    pub debug_listing: bool,
}

impl ServerConfig {
    /// Create a new ServerConfig from environment variables
    ///
    /// # Environment Variables
    /// - `PORT`: listen port (default: 8080)
    /// - `PUBLIC_DIR`: directory holding the client bundle (default: see `public_dir`)
    /// - `DEBUG_LISTING`: mount the `/_ls` diagnostic route (default: false)
    pub fn from_env() -> Result<Self> {
        let settings = Config::builder()
            .set_default("port", i64::from(DEFAULT_PORT))?
            .set_default("debug_listing", false)?
            .add_source(Environment::default().ignore_empty(true))
            .build()
            .context("Failed to read configuration from environment")?;

        settings
            .try_deserialize()
            .context("Invalid server configuration")
    }

    /// Directory the static files are served from
    ///
    /// `PUBLIC_DIR` wins when set. Otherwise a `public` directory next to the
    /// executable is preferred, falling back to `public` under the working
    /// directory.
    pub fn public_dir(&self) -> PathBuf {
        if let Some(dir) = self.public_dir.as_ref().filter(|dir| !dir.as_os_str().is_empty()) {
            return dir.clone();
        }

        let beside_exe = std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(|dir| dir.join(PUBLIC_DIR_NAME)));
        resolve_public_dir(beside_exe.as_deref())
    }
}

fn resolve_public_dir(beside_exe: Option<&Path>) -> PathBuf {
    match beside_exe {
        Some(dir) if dir.is_dir() => dir.to_path_buf(),
        _ => PathBuf::from(PUBLIC_DIR_NAME),
    }
}
