use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::Labels;

/// A service as returned by the Docker Engine `GET /services` endpoint.
///
/// Only the fields the rollout path reads or writes are modeled explicitly;
/// everything else the engine sends is kept in flattened passthrough maps.
/// That matters because a service update replaces the whole spec for the
/// version being advanced: resubmitting a spec with fields stripped would
/// silently reset them on the cluster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Service {
    /// Opaque service identity assigned by the engine.
    #[serde(rename = "ID")]
    pub id: String,
    /// Optimistic-concurrency version token.
    pub version: ServiceVersion,
    /// The deployable specification this service currently runs.
    pub spec: ServiceSpec,
    #[serde(flatten)]
    pub rest: Map<String, Value>,
}

/// Version token attached to a service.
///
/// The engine advances `index` on every successful update and rejects
/// submissions carrying a stale value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ServiceVersion {
    #[serde(default)]
    pub index: u64,
    #[serde(flatten)]
    pub rest: Map<String, Value>,
}

/// The mutable service specification.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ServiceSpec {
    /// Human-readable service name; the update endpoint resolves by it.
    #[serde(default)]
    pub name: String,
    /// Service-level labels.
    #[serde(default)]
    pub labels: Labels,
    /// Task template holding the container-level fields.
    #[serde(default)]
    pub task_template: TaskTemplate,
    #[serde(flatten)]
    pub rest: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TaskTemplate {
    #[serde(default)]
    pub container_spec: ContainerSpec,
    #[serde(flatten)]
    pub rest: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ContainerSpec {
    /// Container image reference (the field a rollout changes).
    #[serde(default)]
    pub image: String,
    /// Container-level labels.
    #[serde(default)]
    pub labels: Labels,
    #[serde(flatten)]
    pub rest: Map<String, Value>,
}

impl Service {
    /// Current container image reference.
    pub fn image(&self) -> &str {
        &self.spec.task_template.container_spec.image
    }
}
