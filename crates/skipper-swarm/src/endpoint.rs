use std::path::PathBuf;
use std::str::FromStr;

use crate::error::SwarmError;

/// Endpoint used when `DOCKER_HOST` is not set.
pub const DEFAULT_DOCKER_HOST: &str = "unix:///var/run/docker.sock";

/// Where the Docker Engine listens.
///
/// Parsed from a `DOCKER_HOST`-style string: `unix://<path>` or
/// `tcp://<host:port>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Endpoint {
    Unix(PathBuf),
    Tcp(String),
}

impl Endpoint {
    /// Value for the `Host` header on requests to this endpoint.
    ///
    /// The engine ignores it on a Unix socket, but HTTP/1.1 requires one.
    pub fn host_header(&self) -> &str {
        match self {
            Endpoint::Unix(_) => "localhost",
            Endpoint::Tcp(addr) => addr.as_str(),
        }
    }
}

impl Default for Endpoint {
    fn default() -> Self {
        Endpoint::Unix(PathBuf::from("/var/run/docker.sock"))
    }
}

impl FromStr for Endpoint {
    type Err = SwarmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(path) = s.strip_prefix("unix://") {
            if path.is_empty() {
                return Err(SwarmError::InvalidHost(s.to_string()));
            }
            return Ok(Endpoint::Unix(PathBuf::from(path)));
        }
        if let Some(addr) = s.strip_prefix("tcp://") {
            if addr.is_empty() {
                return Err(SwarmError::InvalidHost(s.to_string()));
            }
            return Ok(Endpoint::Tcp(addr.to_string()));
        }
        Err(SwarmError::InvalidHost(s.to_string()))
    }
}
