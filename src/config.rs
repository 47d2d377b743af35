//! Server configuration from environment variables.

use std::path::PathBuf;
use std::time::Duration;

/// Minimum length of a session signing secret.
pub const SESSION_KEY_MIN_LEN: usize = 64;

/// Runtime settings for the web binary.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Root directory; each browser session gets its own subdirectory.
    pub data_dir: PathBuf,
    /// Secret for signing session cookies. `None` means generate one per run.
    pub session_key: Option<Vec<u8>>,
    /// Saved rosters not written for this long are deleted from `data_dir`.
    pub retention: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            data_dir: PathBuf::from("data"),
            session_key: None,
            retention: default_retention(),
        }
    }
}

/// Thirty days.
fn default_retention() -> Duration {
    Duration::from_secs(30 * 24 * 3600)
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

impl ServerConfig {
    /// Read `HOST`, `PORT`, `RUMMY_DATA_DIR`, `RUMMY_SESSION_KEY`, and `RUMMY_RETENTION_DAYS`.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from any variable source. Unparseable values fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let host = lookup("HOST")
            .filter(|h| !h.trim().is_empty())
            .unwrap_or(defaults.host);
        let port = lookup("PORT")
            .and_then(|p| p.trim().parse().ok())
            .unwrap_or(defaults.port);
        let data_dir = lookup("RUMMY_DATA_DIR")
            .filter(|d| !d.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or(defaults.data_dir);
        let session_key = match lookup("RUMMY_SESSION_KEY") {
            Some(key) if key.len() >= SESSION_KEY_MIN_LEN => Some(key.into_bytes()),
            Some(_) => {
                log::warn!(
                    "RUMMY_SESSION_KEY shorter than {} bytes, ignoring it",
                    SESSION_KEY_MIN_LEN
                );
                None
            }
            None => None,
        };
        let retention = lookup("RUMMY_RETENTION_DAYS")
            .and_then(|d| d.trim().parse::<u64>().ok())
            .filter(|days| *days > 0)
            .map(|days| Duration::from_secs(days.saturating_mul(24 * 3600)))
            .unwrap_or(defaults.retention);
        Self {
            host,
            port,
            data_dir,
            session_key,
            retention,
        }
    }
}
