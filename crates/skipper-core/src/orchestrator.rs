//! The seam between the rollout pipeline and the cluster it talks to.
//!
//! The pipeline never speaks HTTP to the orchestration layer directly; it
//! goes through [`Orchestrator`], which keeps the core testable with in-memory
//! fakes and keeps cluster-protocol concerns in their own crate.

use async_trait::async_trait;
use thiserror::Error;

use skipper_model::{Service, ServiceSpec};

/// Narrow interface to the container-orchestration cluster.
///
/// Implementations must be safe for concurrent use by multiple in-flight
/// requests; the pipeline shares one instance across handlers.
#[async_trait]
pub trait Orchestrator: Send + Sync + 'static {
    /// List services, optionally scoped to a name filter.
    async fn list_services(
        &self,
        name_filter: Option<&str>,
    ) -> Result<Vec<Service>, OrchestratorError>;

    /// Replace the spec of the service `id`, guarded by `version`.
    ///
    /// `version` must be the token captured when the spec was read; the
    /// cluster rejects stale tokens, and that rejection surfaces as an
    /// [`OrchestratorError::Api`]. No retry happens at this layer or above.
    async fn update_service(
        &self,
        id: &str,
        version: u64,
        spec: &ServiceSpec,
        opts: UpdateOptions,
    ) -> Result<UpdateOutcome, OrchestratorError>;
}

/// Knobs for a service update submission.
#[derive(Debug, Clone, Copy, Default)]
pub struct UpdateOptions {
    /// Ask the cluster to re-resolve the image reference against its
    /// registry, so a moving tag is re-pulled.
    pub query_registry: bool,
}

/// Result of a successful update submission.
#[derive(Debug, Clone, Default)]
pub struct UpdateOutcome {
    /// Non-fatal advisory text attached by the cluster. Warnings do not mean
    /// the update failed; they are relayed to the caller verbatim.
    pub warnings: Vec<String>,
}

#[derive(Debug, Error)]
pub enum OrchestratorError {
    #[error("orchestrator transport error: {0}")]
    Transport(String),

    #[error("orchestrator api error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("orchestrator response decode error: {0}")]
    Decode(String),
}
