//! Server configuration.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

use anyhow::{Context, Result};

/// Port used when neither a flag nor the port file says otherwise.
pub const DEFAULT_PORT: u16 = 5000;
/// Largest request body accepted, in bytes.
pub const DEFAULT_MAX_BODY_BYTES: usize = 100 * 1024 * 1024;

/// Directory under the home directory holding runtime files.
const RUNTIME_DIR: &str = ".focusd";
const PORT_FILE: &str = "server.port";

/// Resolved settings for one server run.
#[derive(Debug, Clone)]
pub struct Config {
    pub host: IpAddr,
    pub port: u16,
    /// Root of the files served under `/static`.
    pub static_dir: PathBuf,
    pub max_body_bytes: usize,
    pub open_browser: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: DEFAULT_PORT,
            static_dir: PathBuf::from("static"),
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
            open_browser: false,
        }
    }
}

impl Config {
    pub const fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Directory scanned for ambient audio tracks.
    pub fn audio_dir(&self) -> PathBuf {
        self.static_dir.join("audio")
    }

    /// Directory scanned for background images.
    pub fn backgrounds_dir(&self) -> PathBuf {
        self.static_dir.join("images").join("backgrounds")
    }
}

/// Directory holding the port file (`~/.focusd`).
pub fn runtime_dir() -> Result<PathBuf> {
    let home = dirs::home_dir().context("Could not find home directory")?;
    Ok(home.join(RUNTIME_DIR))
}

/// Path of the file a running server writes its port to.
pub fn port_file() -> Result<PathBuf> {
    Ok(runtime_dir()?.join(PORT_FILE))
}

/// Port recorded by a running server, if any.
pub fn recorded_port() -> Option<u16> {
    let contents = std::fs::read_to_string(port_file().ok()?).ok()?;
    contents.trim().parse().ok()
}
