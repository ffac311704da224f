//! Docker Engine API client backing the [`skipper_core::orchestrator::Orchestrator`] seam.
//!
//! One short-lived HTTP/1 connection per call, over the engine's Unix socket
//! or a TCP endpoint. The client holds no mutable state, so a single instance
//! is shared freely across concurrent requests.

mod client;
pub use client::SwarmClient;

mod endpoint;
pub use endpoint::{DEFAULT_DOCKER_HOST, Endpoint};

mod error;
pub use error::{SwarmError, SwarmResult};
